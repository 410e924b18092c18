//! Text binding for generic value stores such as database drivers.
//!
//! A [`UuidV8`] is written to a text column as its canonical string and read back from either a
//! text or a blob column. Drivers convert their own value types into [`SqlValue`] and back.

use crate::{Error, Uuid, UuidV8};

/// A dynamically typed value as exchanged with a value store.
#[derive(Clone, PartialEq, Debug)]
pub enum SqlValue {
    /// The absent value.
    Null,

    /// A signed integer.
    Integer(i64),

    /// A floating point number.
    Real(f64),

    /// A UTF-8 string.
    Text(String),

    /// A byte sequence.
    Blob(Vec<u8>),
}

impl SqlValue {
    /// Returns the name of the value's type.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Integer(_) => "integer",
            Self::Real(_) => "real",
            Self::Text(_) => "text",
            Self::Blob(_) => "blob",
        }
    }
}

impl UuidV8 {
    /// Converts the fields into a value to be written to a text column.
    ///
    /// Returns [`SqlValue::Null`] if the node is not six bytes long. Other fields are not checked.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuidv8::{SqlValue, UuidV8};
    ///
    /// let e = UuidV8::new(123_456_789, 0x0800, [1, 2, 3, 4, 5, 6]);
    /// assert_eq!(
    ///     e.to_sql_value(),
    ///     SqlValue::Text("0000075b-cd15-8880-0102-030405060000".to_owned())
    /// );
    /// assert_eq!(UuidV8::new(1, 0, [1, 2, 3]).to_sql_value(), SqlValue::Null);
    /// ```
    pub fn to_sql_value(&self) -> SqlValue {
        match self.to_uuid() {
            Ok(uuid) => SqlValue::Text(uuid.to_string()),
            Err(_) => SqlValue::Null,
        }
    }

    /// Reads the fields from a text or blob value holding a UUID string.
    ///
    /// The version and variant bits are not checked.
    ///
    /// # Errors
    ///
    /// - [`Error::Parse`] if the text (or the blob read as text) is not a UUID string.
    /// - [`Error::UnsupportedScanType`] for any other kind of value.
    pub fn from_sql_value(value: &SqlValue) -> Result<Self, Error> {
        let uuid = match value {
            SqlValue::Text(text) => text.parse::<Uuid>()?,
            SqlValue::Blob(bytes) => Uuid::parse_ascii(bytes)?,
            other => {
                tracing::debug!(value_type = other.type_name(), "cannot scan UUIDv8");
                return Err(Error::UnsupportedScanType(other.type_name()));
            }
        };
        Ok(uuid.fields())
    }
}

impl From<&UuidV8> for SqlValue {
    fn from(src: &UuidV8) -> Self {
        src.to_sql_value()
    }
}

impl TryFrom<&SqlValue> for UuidV8 {
    type Error = Error;

    fn try_from(src: &SqlValue) -> Result<Self, Self::Error> {
        Self::from_sql_value(src)
    }
}
