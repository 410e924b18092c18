use super::{unix_ts_ns_of, with_rand08, RandSource, TimeSource, V8Generator};
use crate::{Error, Uuid, Variant};

/// Random source that replays a fixed byte pattern.
struct FixedRandSource([u8; 8]);

impl RandSource for FixedRandSource {
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        for (d, s) in dest.iter_mut().zip(self.0.iter().cycle()) {
            *d = *s;
        }
        Ok(())
    }
}

/// Random source that is never available.
struct FailingRandSource;

impl RandSource for FailingRandSource {
    fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
        Err(rand::Error::new(std::io::Error::new(
            std::io::ErrorKind::Other,
            "entropy source offline",
        )))
    }
}

/// Clock that advances by one nanosecond per reading.
struct SteppingTimeSource(u64);

impl TimeSource for SteppingTimeSource {
    fn unix_ts_ns(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }
}

/// Generates deterministic UUIDs from substituted sources
#[test]
fn generates_deterministic_uuids_from_substituted_sources() {
    let mut g = V8Generator::with_rand_and_time_sources(
        FixedRandSource([0xfa, 0xbc, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06]),
        SteppingTimeSource(1_633_024_799_999_999_999),
    );

    let first = g.generate().unwrap();
    assert_eq!(&first.encode() as &str, "ab674967-4000-8abc-0102-030405060000");
    assert_eq!(first.clock_seq(), 0x0abc);
    assert_eq!(first.node(), [0x01, 0x02, 0x03, 0x04, 0x05, 0x06]);

    let second = g.generate().unwrap();
    assert_eq!(&second.encode() as &str, "ab674967-4001-8abc-0102-030405060000");
    assert!(first < second);
}

/// Reports an unavailable random source
#[test]
fn reports_an_unavailable_random_source() {
    let mut g = V8Generator::with_rand_and_time_sources(FailingRandSource, SteppingTimeSource(0));
    let err = g.generate().unwrap_err();
    assert!(matches!(err, Error::RandomSourceUnavailable(_)));
    assert!(err.to_string().contains("entropy source offline"));
    assert!(g.next().unwrap().is_err());
}

/// Encodes up-to-date timestamp
#[test]
fn encodes_up_to_date_timestamp() {
    use std::time;
    let mut g = V8Generator::with_rand08(rand::thread_rng());
    for _ in 0..10_000 {
        let ts_now = time::SystemTime::now()
            .duration_since(time::UNIX_EPOCH)
            .expect("clock may have gone backwards")
            .as_nanos() as u64
            & ((1 << 48) - 1);
        let timestamp = g.generate().unwrap().timestamp();
        // tolerate 48-bit wraparound between the two readings
        let diff = timestamp.wrapping_sub(ts_now) & ((1 << 48) - 1);
        assert!(diff < 1_000_000_000, "{diff}");
    }
}

/// Reads a clock set before the Unix epoch as zero
#[test]
fn reads_a_clock_set_before_the_unix_epoch_as_zero() {
    use std::time::{Duration, UNIX_EPOCH};
    assert_eq!(unix_ts_ns_of(UNIX_EPOCH - Duration::from_secs(1)), 0);
    assert_eq!(unix_ts_ns_of(UNIX_EPOCH), 0);
    assert_eq!(
        unix_ts_ns_of(UNIX_EPOCH + Duration::from_nanos(1_633_024_800_000_000_000)),
        1_633_024_800_000_000_000
    );
}

/// Sets correct variant and version bits
#[test]
fn sets_correct_variant_and_version_bits() {
    let g: V8Generator<with_rand08::Adapter<rand::rngs::ThreadRng>> = Default::default();
    for e in g.take(1_000) {
        let e: Uuid = e.unwrap();
        assert_eq!(e.variant(), Variant::Var10);
        assert_eq!(e.version(), Some(8));
        assert!(e.is_valid_v8());
        assert_eq!(e.as_bytes()[14..], [0, 0]);
    }
}

/// Spreads random bits across the clock sequence and node
#[test]
fn spreads_random_bits_across_the_clock_sequence_and_node() {
    const N_SAMPLES: usize = 10_000;
    let mut g = V8Generator::with_rand08(rand::thread_rng());
    let mut bins = [0u32; 128];
    for _ in 0..N_SAMPLES {
        let num = u128::from(g.generate_core(1).unwrap());
        for (i, bin) in bins.iter_mut().enumerate() {
            *bin += ((num >> (127 - i)) & 1) as u32;
        }
    }

    // constant bits
    let n = N_SAMPLES as u32;
    assert_eq!(bins[48..52], [n, 0, 0, 0], "version bits");
    assert_eq!(bins[56..58], [n, 0], "variant bits");
    assert!(bins[112..].iter().all(|e| *e == 0), "trailing bytes");

    // random bits are set to 1 at ~50% probability
    // margin based on binom dist 99.999% confidence interval
    let margin = 4.417173 * (0.5 * 0.5 / N_SAMPLES as f64).sqrt();
    for i in (52..56).chain(58..64).chain(64..112) {
        let p = bins[i] as f64 / N_SAMPLES as f64;
        assert!((p - 0.5).abs() < margin, "random bit {i}: {p}");
    }
}
