//! A Rust implementation of UUID version 8 with a timestamp, clock sequence, and node layout
//!
//! ```rust
//! let uuid = uuidv8::uuidv8()?;
//! println!("{}", uuid); // e.g. "17f4a2c9-3e10-8b42-9c1d-5e7f20a40000"
//! println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
//!
//! let node = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06];
//! let text = uuidv8::new_with_params(1_633_024_800_000_000_000, 0, &node, 48)?;
//! assert_eq!(text, "ab674967-4000-8080-0102-030405060000");
//! assert!(uuidv8::is_valid(&text));
//!
//! let fields = text.parse::<uuidv8::UuidV8>()?;
//! assert_eq!(fields.node, node);
//! # Ok::<(), uuidv8::Error>(())
//! ```
//!
//! # Field and bit layout
//!
//! This implementation produces identifiers with the following bit layout:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                           timestamp                           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |           timestamp           |  ver  |  seq  |var|    seq    |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                             node                              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |             node              |             zero              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Where:
//!
//! - The 48-bit `timestamp` field holds bits 31..0 of the timestamp followed by 16 zero bits,
//!   bits 47..0, or bits 59..12, depending on the [`TimestampWidth`] chosen at encoding time.
//!   Decoding always reads it as a 48-bit integer.
//! - The 4-bit `ver` field is set at `1000`.
//! - The `seq` fields carry the clock sequence: bits 11..8 follow the version, and bits 5..0 follow
//!   the variant. Bits 7..6 of the clock sequence are overwritten by the variant.
//! - The 2-bit `var` field is set at `10`.
//! - The 48-bit `node` field holds a caller-supplied or random node identifier.
//! - The last 16 bits are always zero.
//!
//! The Nil UUID is never considered a valid UUIDv8.
//!
//! # Crate features
//!
//! - `global_gen` (default): the thread-local default generator behind [`uuidv8()`].
//! - `serde`: string serialization of [`Uuid`] and [`UuidV8`]; the latter validates its fields.
//! - `uuid`: conversions from and into `uuid::Uuid`.

#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
pub use error::{Error, ParseError};

mod id;
pub use id::{TimestampWidth, Uuid, Variant};

mod fields;
pub use fields::UuidV8;

pub mod generator;
pub use generator::V8Generator;

mod entry;
pub use entry::{is_valid, new_with_params};

#[cfg(feature = "global_gen")]
pub use entry::{uuidv8, uuidv8_string};

mod store;
pub use store::SqlValue;
