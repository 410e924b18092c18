//! UUIDv8 generator and related types.

use crate::{Error, TimestampWidth, Uuid};

pub mod with_rand08;

/// A trait that defines the minimum random number generator interface for [`V8Generator`].
pub trait RandSource {
    /// Fills `dest` with random data, or reports that the entropy source is unavailable.
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error>;
}

/// A trait that defines the minimum system clock interface for [`V8Generator`].
pub trait TimeSource {
    /// Returns the current time in nanoseconds since the Unix epoch.
    fn unix_ts_ns(&mut self) -> u64;
}

/// The default [`TimeSource`] that uses [`std::time::SystemTime`].
///
/// A clock set before the Unix epoch reads as zero.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct StdSystemTime;

impl TimeSource for StdSystemTime {
    fn unix_ts_ns(&mut self) -> u64 {
        unix_ts_ns_of(std::time::SystemTime::now())
    }
}

/// Converts `time` into nanoseconds since the Unix epoch, saturating at zero.
fn unix_ts_ns_of(time: std::time::SystemTime) -> u64 {
    time.duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos() as u64
}

/// Represents a UUIDv8 generator that combines the current time with a random clock sequence and
/// a random node.
///
/// The generator keeps no state between calls other than its random number generator and clock,
/// so two UUIDs generated within the same nanosecond differ only by their 12-bit clock sequence
/// and 48-bit node. Both the random number generator and the clock are replaceable, which makes
/// the output deterministic under test.
///
/// # Examples
///
/// ```rust
/// use uuidv8::V8Generator;
///
/// let mut g = V8Generator::with_rand08(rand::rngs::OsRng);
/// let uuid = g.generate()?;
/// assert!(uuid.is_valid_v8());
/// # Ok::<(), uuidv8::Error>(())
/// ```
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct V8Generator<R, T = StdSystemTime> {
    /// The random number generator used by the generator.
    rng: R,

    /// The system clock used by the generator.
    time: T,
}

impl<R> V8Generator<R> {
    /// Creates a generator instance that reads the system clock.
    pub const fn new(rng: R) -> Self {
        Self {
            rng,
            time: StdSystemTime,
        }
    }
}

impl<R: RandSource, T: TimeSource> V8Generator<R, T> {
    /// Creates a generator instance with specified random number generator and clock.
    pub const fn with_rand_and_time_sources(rng: R, time: T) -> Self {
        Self { rng, time }
    }

    /// Generates a new UUIDv8 object from the current timestamp in nanoseconds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RandomSourceUnavailable`] if the random number generator fails.
    pub fn generate(&mut self) -> Result<Uuid, Error> {
        let timestamp = self.time.unix_ts_ns();
        self.generate_core(timestamp)
    }

    /// Generates a new UUIDv8 object from the `timestamp` passed, with a random 12-bit clock
    /// sequence and a random 6-byte node, using the 48-bit timestamp layout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RandomSourceUnavailable`] if the random number generator fails.
    pub fn generate_core(&mut self, timestamp: u64) -> Result<Uuid, Error> {
        let mut random = [0u8; 8];
        self.rng.try_fill_bytes(&mut random).map_err(|err| {
            tracing::debug!(%err, "failed to read random clock sequence and node");
            Error::RandomSourceUnavailable(err)
        })?;

        let clock_seq = u16::from_be_bytes([random[0], random[1]]) & 0x0fff;
        let uuid =
            Uuid::from_fields_v8(timestamp, clock_seq, &random[2..], TimestampWidth::Bits48)?;
        tracing::trace!(%uuid, "generated UUIDv8");
        Ok(uuid)
    }
}

/// Supports operations as an infinite iterator that produces a new UUIDv8 object for each call of
/// `next()`, or an error if the random number generator fails.
///
/// # Examples
///
/// ```rust
/// use uuidv8::V8Generator;
///
/// V8Generator::with_rand08(rand::thread_rng())
///     .enumerate()
///     .skip(4)
///     .take(4)
///     .for_each(|(i, e)| println!("[{}] {}", i, e.unwrap()));
/// ```
impl<R: RandSource, T: TimeSource> Iterator for V8Generator<R, T> {
    type Item = Result<Uuid, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.generate())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl<R: RandSource, T: TimeSource> std::iter::FusedIterator for V8Generator<R, T> {}

#[cfg(test)]
mod tests;
