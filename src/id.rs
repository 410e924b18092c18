use std::{fmt, str};

use fstr::FStr;

use crate::{Error, ParseError, UuidV8};

/// Value of the 4-bit version field.
const VERSION_V8: u8 = 0x8;

/// Value of the 2-bit variant field.
const VARIANT_RFC4122: u8 = 0b10;

/// Offsets of the dashes in the 8-4-4-4-12 string representation.
const DASH_POSITIONS: [usize; 4] = [8, 13, 18, 23];

/// Number of timestamp bits written by the encoder.
///
/// The encoder always keeps the timestamp within the first six bytes, so the 60-bit width stores
/// the high 48 bits of the value and drops the low 12. The decoder has no way to tell which width
/// produced a UUID and always reads the first six bytes as a 48-bit integer.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum TimestampWidth {
    /// Bits 31..0 in bytes 0-3; bytes 4-5 are zero.
    Bits32,

    /// Bits 47..0 in bytes 0-5.
    #[default]
    Bits48,

    /// Bits 59..12 in bytes 0-5.
    Bits60,
}

impl TimestampWidth {
    /// Returns the number of bits as an integer.
    pub const fn bits(self) -> u32 {
        match self {
            Self::Bits32 => 32,
            Self::Bits48 => 48,
            Self::Bits60 => 60,
        }
    }
}

impl TryFrom<u32> for TimestampWidth {
    type Error = Error;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        match bits {
            32 => Ok(Self::Bits32),
            48 => Ok(Self::Bits48),
            60 => Ok(Self::Bits60),
            _ => Err(Error::UnsupportedTimestampWidth(bits)),
        }
    }
}

/// Represents a Universally Unique IDentifier.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Uuid([u8; 16]);

impl Uuid {
    /// Nil UUID (00000000-0000-0000-0000-000000000000)
    pub const NIL: Self = Self([0x00; 16]);

    /// Max UUID (ffffffff-ffff-ffff-ffff-ffffffffffff)
    pub const MAX: Self = Self([0xff; 16]);

    /// Returns a reference to the underlying byte array.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Creates a UUID byte array from UUIDv8 field values.
    ///
    /// Only the low 12 bits of `clock_seq` are used. Bits 7 and 6 of the clock sequence share byte
    /// 7 with the variant field and are overwritten by it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNodeLength`] if `node` is not exactly six bytes long.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuidv8::{TimestampWidth, Uuid};
    ///
    /// let node = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06];
    /// let x = Uuid::from_fields_v8(123_456_789, 0x0800, &node, TimestampWidth::Bits48)?;
    /// assert_eq!(x.to_string(), "0000075b-cd15-8880-0102-030405060000");
    /// # Ok::<(), uuidv8::Error>(())
    /// ```
    pub fn from_fields_v8(
        timestamp: u64,
        clock_seq: u16,
        node: &[u8],
        width: TimestampWidth,
    ) -> Result<Self, Error> {
        if node.len() != 6 {
            return Err(Error::InvalidNodeLength(node.len()));
        }

        let mut bytes = [0u8; 16];
        match width {
            TimestampWidth::Bits32 => bytes[..4].copy_from_slice(&timestamp.to_be_bytes()[4..]),
            TimestampWidth::Bits48 => bytes[..6].copy_from_slice(&timestamp.to_be_bytes()[2..]),
            TimestampWidth::Bits60 => {
                bytes[..6].copy_from_slice(&(timestamp >> 12).to_be_bytes()[2..]);
            }
        }

        bytes[6] = (VERSION_V8 << 4) | ((clock_seq >> 8) as u8 & 0x0f);
        bytes[7] = (clock_seq as u8 & 0x3f) | (VARIANT_RFC4122 << 6);
        bytes[8..14].copy_from_slice(node);
        Ok(Self(bytes))
    }

    /// Returns the first six bytes interpreted as a 48-bit big-endian timestamp.
    pub const fn timestamp(&self) -> u64 {
        let b = &self.0;
        (b[0] as u64) << 40
            | (b[1] as u64) << 32
            | (b[2] as u64) << 24
            | (b[3] as u64) << 16
            | (b[4] as u64) << 8
            | b[5] as u64
    }

    /// Returns the 12-bit clock sequence stored in the low nibble of byte 6 and in byte 7.
    ///
    /// The value includes the variant bits that occupy the top of byte 7.
    pub const fn clock_seq(&self) -> u16 {
        ((self.0[6] & 0x0f) as u16) << 8 | self.0[7] as u16
    }

    /// Returns a copy of the 6-byte node field.
    pub const fn node(&self) -> [u8; 6] {
        let b = &self.0;
        [b[8], b[9], b[10], b[11], b[12], b[13]]
    }

    /// Decodes the timestamp, clock sequence, and node into a [`UuidV8`].
    pub fn fields(&self) -> UuidV8 {
        UuidV8 {
            timestamp: self.timestamp(),
            clock_seq: self.clock_seq(),
            node: self.node().to_vec(),
        }
    }

    /// Returns `true` if every bit of the UUID is zero.
    pub fn is_nil(&self) -> bool {
        self.0.iter().all(|e| *e == 0)
    }

    /// Reports the variant field value of the UUID, as read from the top bits of byte 7.
    pub const fn variant(&self) -> Variant {
        match self.0[7] >> 4 {
            0..=7 => Variant::Var0,
            8..=0xb => Variant::Var10,
            0xc..=0xd => Variant::Var110,
            _ => Variant::Var111,
        }
    }

    /// Returns the version field value of the UUID or `None` if the UUID does not have the
    /// variant field value of `10`.
    pub const fn version(&self) -> Option<u8> {
        match self.variant() {
            Variant::Var10 => Some(self.0[6] >> 4),
            _ => None,
        }
    }

    /// Returns `true` if the UUID carries the version 8 and variant `10` tags and is not the Nil
    /// UUID.
    pub fn is_valid_v8(&self) -> bool {
        !self.is_nil() && self.0[6] >> 4 == VERSION_V8 && self.0[7] >> 6 == VARIANT_RFC4122
    }

    /// Returns the 8-4-4-4-12 hexadecimal string representation stored in a stack-allocated
    /// string type that can be dereferenced as `str` and [`Display`](fmt::Display)ed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuidv8::Uuid;
    ///
    /// let x = "ab674967-4000-8080-0102-030405060000".parse::<Uuid>()?;
    /// let y = x.encode();
    /// assert_eq!(&y as &str, "ab674967-4000-8080-0102-030405060000");
    /// assert_eq!(format!("{}", y), "ab674967-4000-8080-0102-030405060000");
    /// # Ok::<(), uuidv8::ParseError>(())
    /// ```
    pub fn encode(&self) -> FStr<36> {
        const DIGITS: &[u8; 16] = b"0123456789abcdef";

        let mut buffer = [0u8; 36];
        let mut buf_iter = buffer.iter_mut();
        for (i, e) in self.0.iter().enumerate() {
            *buf_iter.next().unwrap() = DIGITS[(e >> 4) as usize];
            *buf_iter.next().unwrap() = DIGITS[(e & 15) as usize];
            if i == 3 || i == 5 || i == 7 || i == 9 {
                *buf_iter.next().unwrap() = b'-';
            }
        }
        debug_assert!(buffer.is_ascii());
        // SAFETY: the buffer consists of ASCII hex digits and dashes only
        unsafe { FStr::from_bytes_unchecked(buffer) }
    }

    /// Creates an object from the 36-character 8-4-4-4-12 form or the 32-character form without
    /// dashes, given as ASCII bytes. Hexadecimal digits are case-insensitive.
    ///
    /// # Errors
    ///
    /// - [`ParseError::InvalidLength`] if the input is neither 32 nor 36 bytes long.
    /// - [`ParseError::InvalidFormat`] if a 36-byte input lacks a dash at offset 8, 13, 18, or 23.
    /// - [`ParseError::InvalidHexEncoding`] if any other byte is not a hexadecimal digit. The
    ///   error carries the offset of the first offending byte in `src` and that byte as a `char`.
    pub fn parse_ascii(src: &[u8]) -> Result<Self, ParseError> {
        let mut digits = [0u8; 32];
        match src.len() {
            32 => digits.copy_from_slice(src),
            36 => {
                if DASH_POSITIONS.iter().any(|&i| src[i] != b'-') {
                    return Err(ParseError::InvalidFormat);
                }
                let hex_chars = src
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| !DASH_POSITIONS.contains(i))
                    .map(|(_, c)| *c);
                for (d, c) in digits.iter_mut().zip(hex_chars) {
                    *d = c;
                }
            }
            n => return Err(ParseError::InvalidLength(n)),
        }

        let mut dst = [0u8; 16];
        match hex::decode_to_slice(digits, &mut dst) {
            Ok(()) => Ok(Self(dst)),
            Err(hex::FromHexError::InvalidHexCharacter { index, .. }) => {
                // map the digit index back to the input offset
                let mut offset = index;
                if src.len() == 36 {
                    for p in DASH_POSITIONS {
                        if p <= offset {
                            offset += 1;
                        }
                    }
                }
                Err(ParseError::InvalidHexEncoding(
                    hex::FromHexError::InvalidHexCharacter {
                        c: src[offset] as char,
                        index: offset,
                    },
                ))
            }
            Err(err) => Err(err.into()),
        }
    }
}

/// Represents the variant field value of a UUID.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Variant {
    /// Variant field value `0`, including the Nil UUID.
    Var0,

    /// Variant field value `10`, used by UUIDv8.
    Var10,

    /// Variant field value `110`.
    Var110,

    /// Variant field value `111`, including the Max UUID.
    Var111,
}

impl fmt::Display for Uuid {
    /// Returns the 8-4-4-4-12 canonical hexadecimal string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl str::FromStr for Uuid {
    type Err = ParseError;

    /// Creates an object from the 8-4-4-4-12 hexadecimal string representation or its 32-digit
    /// form without dashes.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        Self::parse_ascii(src.as_bytes()).map_err(|err| match err {
            // every byte before the offending one is ASCII, so `index` is a char boundary
            ParseError::InvalidHexEncoding(hex::FromHexError::InvalidHexCharacter { c, index }) => {
                let c = src.get(index..).and_then(|s| s.chars().next()).unwrap_or(c);
                ParseError::InvalidHexEncoding(hex::FromHexError::InvalidHexCharacter { c, index })
            }
            err => err,
        })
    }
}

impl From<Uuid> for [u8; 16] {
    fn from(src: Uuid) -> Self {
        src.0
    }
}

impl From<[u8; 16]> for Uuid {
    fn from(src: [u8; 16]) -> Self {
        Self(src)
    }
}

impl AsRef<[u8]> for Uuid {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<Uuid> for u128 {
    fn from(src: Uuid) -> Self {
        Self::from_be_bytes(src.0)
    }
}

impl From<u128> for Uuid {
    fn from(src: u128) -> Self {
        Self(src.to_be_bytes())
    }
}

impl From<Uuid> for String {
    fn from(src: Uuid) -> Self {
        src.to_string()
    }
}

impl TryFrom<String> for Uuid {
    type Error = ParseError;

    fn try_from(src: String) -> Result<Self, Self::Error> {
        src.parse()
    }
}

#[cfg(feature = "uuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
mod uuid_support {
    use super::Uuid;

    impl From<Uuid> for uuid::Uuid {
        fn from(src: Uuid) -> Self {
            uuid::Uuid::from_bytes(src.0)
        }
    }

    impl From<uuid::Uuid> for Uuid {
        fn from(src: uuid::Uuid) -> Self {
            Self(src.into_bytes())
        }
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::{fmt, Uuid};
    use serde::{de, Deserializer, Serializer};

    impl serde::Serialize for Uuid {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.serialize_str(&self.encode())
            } else {
                serializer.serialize_bytes(self.as_bytes())
            }
        }
    }

    impl<'de> serde::Deserialize<'de> for Uuid {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            if deserializer.is_human_readable() {
                deserializer.deserialize_str(VisitorImpl)
            } else {
                deserializer.deserialize_bytes(VisitorImpl)
            }
        }
    }

    struct VisitorImpl;

    impl de::Visitor<'_> for VisitorImpl {
        type Value = Uuid;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a UUID representation")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            value.parse::<Self::Value>().map_err(de::Error::custom)
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            <[u8; 16]>::try_from(value)
                .map(Self::Value::from)
                .map_err(de::Error::custom)
        }
    }

}
