//! Default generator and entry point functions.

use crate::{Error, TimestampWidth, Uuid};

/// Generates a UUIDv8 string from caller-supplied fields.
///
/// `timestamp_bits` selects the timestamp layout and must be 32, 48, or 60. Only the low 12 bits
/// of `clock_seq` are used.
///
/// # Errors
///
/// - [`Error::InvalidNodeLength`] if `node` is not exactly six bytes long.
/// - [`Error::UnsupportedTimestampWidth`] if `timestamp_bits` is not a supported width.
///
/// # Examples
///
/// ```rust
/// let node = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06];
/// let uuid = uuidv8::new_with_params(1_633_024_800_000_000_000, 0, &node, 48)?;
/// assert_eq!(uuid, "ab674967-4000-8080-0102-030405060000");
/// assert!(uuidv8::is_valid(&uuid));
/// # Ok::<(), uuidv8::Error>(())
/// ```
pub fn new_with_params(
    timestamp: u64,
    clock_seq: u16,
    node: &[u8],
    timestamp_bits: u32,
) -> Result<String, Error> {
    if node.len() != 6 {
        return Err(Error::InvalidNodeLength(node.len()));
    }
    let width = TimestampWidth::try_from(timestamp_bits)?;
    Uuid::from_fields_v8(timestamp, clock_seq, node, width).map(String::from)
}

/// Returns `true` if `uuid` is a well-formed UUID string carrying the version 8 and variant `10`
/// tags and is not the Nil UUID.
///
/// # Examples
///
/// ```rust
/// assert!(uuidv8::is_valid("9a3d4049-0e2c-8080-0102-030405060000"));
/// assert!(uuidv8::is_valid("9A3D40490E2C80800102030405060000"));
/// assert!(!uuidv8::is_valid("9a3d4049-0e2c-7080-0102-030405060000"));
/// assert!(!uuidv8::is_valid("00000000-0000-0000-0000-000000000000"));
/// assert!(!uuidv8::is_valid("invalid-uuid"));
/// ```
pub fn is_valid(uuid: &str) -> bool {
    uuid.parse::<Uuid>().is_ok_and(|e| e.is_valid_v8())
}

#[cfg(feature = "global_gen")]
#[cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]
pub use default_gen::{uuidv8, uuidv8_string};

#[cfg(feature = "global_gen")]
mod default_gen {
    use std::cell::RefCell;

    use crate::{Error, Uuid, V8Generator};
    use inner::GlobalGenRng;

    thread_local! {
        static DEFAULT_GENERATOR: RefCell<Option<V8Generator<GlobalGenRng>>> =
            const { RefCell::new(None) };
    }

    /// Generates a UUIDv8 object from the current time in nanoseconds, a random 12-bit clock
    /// sequence, and a random 6-byte node.
    ///
    /// This function employs a thread-local generator seeded from the operating system. On Unix,
    /// this function reseeds the generator when the process ID changes (i.e., upon process forks)
    /// to prevent collisions across processes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RandomSourceUnavailable`] if the operating system cannot supply entropy.
    ///
    /// # Examples
    ///
    /// ```rust
    /// let uuid = uuidv8::uuidv8()?;
    /// println!("{uuid}"); // e.g., "2c1e3f5a-9b7d-8a9c-4f12-9ab3c4d50000"
    /// println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
    /// # Ok::<(), uuidv8::Error>(())
    /// ```
    pub fn uuidv8() -> Result<Uuid, Error> {
        DEFAULT_GENERATOR.with(|cell| {
            let mut slot = cell.borrow_mut();
            if unix_fork_safety::pid_changed() {
                *slot = None;
            }

            let g = match slot.take() {
                Some(g) => g,
                None => V8Generator::new(GlobalGenRng::try_new().map_err(|err| {
                    tracing::debug!(%err, "failed to seed default generator");
                    Error::RandomSourceUnavailable(err)
                })?),
            };
            slot.insert(g).generate()
        })
    }

    /// Generates a UUIDv8 string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RandomSourceUnavailable`] if the operating system cannot supply entropy.
    ///
    /// # Examples
    ///
    /// ```rust
    /// let uuid = uuidv8::uuidv8_string()?;
    /// assert!(uuidv8::is_valid(&uuid));
    /// # Ok::<(), uuidv8::Error>(())
    /// ```
    pub fn uuidv8_string() -> Result<String, Error> {
        uuidv8().map(String::from)
    }

    mod inner {
        use rand::rngs::{adapter::ReseedingRng, OsRng};
        use rand::SeedableRng;
        use rand_chacha::ChaCha12Core;

        use crate::generator::RandSource;

        /// The random number generator of the default generator.
        ///
        /// It employs [`ChaCha12Core`] with [`ReseedingRng`] wrapper to emulate the strategy used
        /// by `rand::rngs::ThreadRng`, but reports seeding failures instead of panicking.
        #[derive(Debug)]
        pub struct GlobalGenRng(ReseedingRng<ChaCha12Core, OsRng>);

        impl GlobalGenRng {
            /// Seeds a new instance from [`OsRng`].
            pub fn try_new() -> Result<Self, rand::Error> {
                let core = ChaCha12Core::from_rng(OsRng)?;
                Ok(Self(ReseedingRng::new(core, 1024 * 64, OsRng)))
            }
        }

        impl RandSource for GlobalGenRng {
            fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
                rand::RngCore::try_fill_bytes(&mut self.0, dest)
            }
        }
    }

    #[cfg(unix)]
    mod unix_fork_safety {
        use std::{cell::Cell, process};

        thread_local! {
            static PID: Cell<u32> = Cell::new(process::id());
        }

        /// Returns true if the process ID has changed since the last call on this thread.
        pub fn pid_changed() -> bool {
            PID.with(|last_pid| {
                let pid = process::id();
                pid != last_pid.replace(pid)
            })
        }
    }

    #[cfg(not(unix))]
    mod unix_fork_safety {
        pub const fn pid_changed() -> bool {
            false
        }
    }

}
