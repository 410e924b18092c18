//! Structured form of a UUIDv8.

use std::{fmt, str};

use crate::{Error, ParseError, TimestampWidth, Uuid};

/// Represents the decoded fields of a UUIDv8.
///
/// This is a plain value type. Its fields are public and can hold values that do not fit the
/// binary layout (a node of the wrong length or a clock sequence wider than 12 bits), so each
/// boundary that consumes it decides how strict to be:
///
/// - [`UuidV8::to_uuid()`] rejects a node that is not six bytes long.
/// - [`UuidV8::validate()`] (and thus JSON serialization) additionally rejects a zero timestamp and
///   a clock sequence above `0x0fff`.
/// - [`fmt::Display`] never fails; it truncates or zero-fills the node to six bytes.
/// - [`UuidV8::to_sql_value()`] yields `Null` for a bad node instead of an error.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct UuidV8 {
    /// The timestamp, up to 48 bits when decoded.
    pub timestamp: u64,

    /// The clock sequence, up to 12 bits.
    pub clock_seq: u16,

    /// The node identifier, six bytes in a well-formed value.
    pub node: Vec<u8>,
}

impl UuidV8 {
    /// Creates a value from its fields.
    pub fn new(timestamp: u64, clock_seq: u16, node: impl Into<Vec<u8>>) -> Self {
        Self {
            timestamp,
            clock_seq,
            node: node.into(),
        }
    }

    /// Parses a UUID string into its fields, returning `None` if the string is malformed or
    /// represents the Nil UUID.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuidv8::UuidV8;
    ///
    /// assert!(UuidV8::parse_or_none("9a3d4049-0e2c-8080-0102-030405060000").is_some());
    /// assert!(UuidV8::parse_or_none("00000000-0000-0000-0000-000000000000").is_none());
    /// assert!(UuidV8::parse_or_none("invalid-uuid").is_none());
    /// ```
    pub fn parse_or_none(src: &str) -> Option<Self> {
        src.parse::<Uuid>()
            .ok()
            .filter(|e| !e.is_nil())
            .map(|e| e.fields())
    }

    /// Encodes the fields with the 48-bit timestamp layout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNodeLength`] if the node is not six bytes long.
    pub fn to_uuid(&self) -> Result<Uuid, Error> {
        Uuid::from_fields_v8(
            self.timestamp,
            self.clock_seq,
            &self.node,
            TimestampWidth::Bits48,
        )
    }

    /// Checks that the fields describe a well-formed UUIDv8.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAValidIdentifier`] if the node is not six bytes long, the timestamp is
    /// zero, or the clock sequence does not fit in 12 bits.
    pub fn validate(&self) -> Result<(), Error> {
        if self.node.len() != 6 || self.timestamp == 0 || self.clock_seq > 0x0fff {
            return Err(Error::NotAValidIdentifier(format!(
                "timestamp={} clock_seq={:#06x} node_len={}",
                self.timestamp,
                self.clock_seq,
                self.node.len()
            )));
        }

        let uuid = self.to_uuid()?;
        if !uuid.is_valid_v8() {
            return Err(Error::NotAValidIdentifier(uuid.to_string()));
        }
        Ok(())
    }
}

impl From<Uuid> for UuidV8 {
    fn from(src: Uuid) -> Self {
        src.fields()
    }
}

impl TryFrom<&UuidV8> for Uuid {
    type Error = Error;

    fn try_from(src: &UuidV8) -> Result<Self, Self::Error> {
        src.to_uuid()
    }
}

impl fmt::Display for UuidV8 {
    /// Returns the 8-4-4-4-12 string representation of the fields encoded with the 48-bit
    /// timestamp layout.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut node = [0u8; 6];
        for (d, s) in node.iter_mut().zip(&self.node) {
            *d = *s;
        }
        match Uuid::from_fields_v8(self.timestamp, self.clock_seq, &node, TimestampWidth::Bits48) {
            Ok(uuid) => f.write_str(&uuid.encode()),
            Err(_) => Err(fmt::Error),
        }
    }
}

impl str::FromStr for UuidV8 {
    type Err = ParseError;

    /// Parses the 8-4-4-4-12 form or the 32-digit form into its fields without checking the
    /// version and variant bits.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        src.parse::<Uuid>().map(|e| e.fields())
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::{fmt, Uuid, UuidV8};
    use serde::{de, ser, Deserializer, Serializer};

    impl serde::Serialize for UuidV8 {
        /// Serializes the fields as the canonical string, failing if they do not pass
        /// [`UuidV8::validate()`].
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if let Err(err) = self.validate() {
                tracing::debug!(%err, "refusing to serialize UUIDv8");
                return Err(ser::Error::custom(err));
            }
            let uuid = self.to_uuid().map_err(ser::Error::custom)?;
            serializer.serialize_str(&uuid.encode())
        }
    }

    impl<'de> serde::Deserialize<'de> for UuidV8 {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_str(VisitorImpl)
        }
    }

    struct VisitorImpl;

    impl de::Visitor<'_> for VisitorImpl {
        type Value = UuidV8;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a UUIDv8 string")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            let uuid = value.parse::<Uuid>().map_err(de::Error::custom)?;
            if !uuid.is_valid_v8() {
                tracing::debug!(input = value, "refusing to deserialize UUIDv8");
                return Err(de::Error::custom(crate::Error::NotAValidIdentifier(
                    value.to_owned(),
                )));
            }
            Ok(uuid.fields())
        }
    }

}

#[cfg(test)]
mod tests {
    use super::UuidV8;
    use crate::{Error, ParseError, TimestampWidth, Uuid};

    const NODE: [u8; 6] = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06];

    /// Parses strings into fields without checking tags
    #[test]
    fn parses_strings_into_fields_without_checking_tags() {
        let e = "ab674967-4000-8080-0102-030405060000"
            .parse::<UuidV8>()
            .unwrap();
        assert_eq!(e.timestamp, 1_633_024_800_000_000_000 & ((1 << 48) - 1));
        assert_eq!(e.clock_seq, 0x0080);
        assert_eq!(e.node, NODE.to_vec());

        let e = "0193bde4a9fa77eba3046cf8530ece78".parse::<UuidV8>().unwrap();
        assert_eq!(e.timestamp, 0x0193_bde4_a9fa);
        assert_eq!(e.clock_seq, 0x07eb);
        assert_eq!(e.node, vec![0xa3, 0x04, 0x6c, 0xf8, 0x53, 0x0e]);

        assert_eq!(
            "not-a-uuid".parse::<UuidV8>(),
            Err(ParseError::InvalidLength(10))
        );
    }

    /// Returns None for malformed or Nil strings
    #[test]
    fn returns_none_for_malformed_or_nil_strings() {
        let e = UuidV8::parse_or_none("9a3d4049-0e2c-8080-0102-030405060000").unwrap();
        assert_ne!(e.timestamp, 0);
        assert_eq!(e.node.len(), 6);

        for text in [
            "invalid-uuid",
            "1234",
            "gibberish-not-a-uuid",
            "00000000-0000-0000-0000-000000000000",
            "00000000000000000000000000000000",
        ] {
            assert_eq!(UuidV8::parse_or_none(text), None, "{text}");
        }
    }

    /// Formats fields leniently with the 48-bit layout
    #[test]
    fn formats_fields_leniently_with_the_48_bit_layout() {
        assert_eq!(
            UuidV8::default().to_string(),
            "00000000-0000-8080-0000-000000000000"
        );
        assert_eq!(
            UuidV8::new(1, 0, vec![0x01, 0x02, 0x03]).to_string(),
            "00000000-0001-8080-0102-030000000000"
        );
        assert_eq!(
            UuidV8::new(1, 0, vec![0x01; 8]).to_string(),
            "00000000-0001-8080-0101-010101010000"
        );
    }

    /// Encodes strictly into the binary form
    #[test]
    fn encodes_strictly_into_the_binary_form() {
        let e = UuidV8::new(0x0123_4567_89ab, 0x0abc, NODE);
        let uuid = e.to_uuid().unwrap();
        assert_eq!(
            uuid,
            Uuid::from_fields_v8(0x0123_4567_89ab, 0x0abc, &NODE, TimestampWidth::Bits48).unwrap()
        );
        assert_eq!(Uuid::try_from(&e).unwrap(), uuid);
        assert_eq!(UuidV8::from(uuid).node, NODE.to_vec());

        assert!(matches!(
            UuidV8::new(1, 0, vec![0x01; 2]).to_uuid(),
            Err(Error::InvalidNodeLength(2))
        ));
    }

    /// Validates structural constraints
    #[test]
    fn validates_structural_constraints() {
        assert!(UuidV8::new(123_456_789, 0x0800, NODE).validate().is_ok());
        assert!(UuidV8::new(1, 0x0fff, NODE).validate().is_ok());
        for e in [
            UuidV8::new(0, 0x0800, NODE),
            UuidV8::new(1, 0x1000, NODE),
            UuidV8::new(1, 0, vec![0x01; 5]),
        ] {
            assert!(matches!(e.validate(), Err(Error::NotAValidIdentifier(_))));
        }
    }
}
