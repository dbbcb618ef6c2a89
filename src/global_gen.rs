//! Default generator, sequence source and entry point functions.

#![cfg(feature = "global_gen")]
#![cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]

use std::sync;

use crate::generator::StdSystemTime;
use crate::{Guid, SequenceSource, SequentialGuidFormat, TimeGuidLayout};
use inner::GlobalGenInner;

/// Process-wide sequence source behind [`next_sequence`] and [`sequential_guid`].
static SEQUENCE: SequenceSource = SequenceSource::new(StdSystemTime);

/// Returns the lock handle of process-wide global generator, creating one if none exists.
fn lock_global_gen() -> sync::MutexGuard<'static, GlobalGenInner> {
    static G: sync::OnceLock<sync::Mutex<GlobalGenInner>> = sync::OnceLock::new();
    G.get_or_init(Default::default)
        .lock()
        .expect("identifiable: could not lock global generator")
}

/// Generates a time-based GUID in `layout` from the current time.
///
/// This function employs a global generator whose random source is reseeded when the process ID
/// changes (i.e., upon process forks) so that forked processes do not share clock sequences and
/// nodes.
///
/// # Examples
///
/// ```rust
/// use identifiable::TimeGuidLayout;
///
/// let guid = identifiable::time_guid(TimeGuidLayout::Standard);
/// println!("{}", guid); // e.g., "3c4d5e6f-0a2b-11ef-a677-0b2c3d4e5f60"
/// assert_eq!(guid.version(), Some(1));
/// ```
pub fn time_guid(layout: TimeGuidLayout) -> Guid {
    lock_global_gen().get_mut().generate(layout)
}

/// Generates a random (version 4) GUID.
///
/// # Examples
///
/// ```rust
/// let guid = identifiable::random_guid();
/// println!("{}", guid); // e.g., "2ca4b2ce-6c13-40d4-bccf-37d222820f6f"
/// ```
pub fn random_guid() -> Guid {
    lock_global_gen().get_mut().generate_v4()
}

/// Returns the next value of the process-wide sequence.
///
/// Values are strictly increasing across all threads and track the system clock in
/// 100-nanosecond ticks since 00:00:00.00, 15 October 1582.
pub fn next_sequence() -> i64 {
    SEQUENCE.next()
}

/// Generates a sequential GUID by embedding [`next_sequence`] into a fresh [`random_guid`].
///
/// # Examples
///
/// ```rust
/// use identifiable::SequentialGuidFormat;
///
/// let a = identifiable::sequential_guid(SequentialGuidFormat::SqlServer);
/// let b = identifiable::sequential_guid(SequentialGuidFormat::SqlServer);
/// assert!(a.cmp_sql_server(&b).is_lt());
/// ```
pub fn sequential_guid(format: SequentialGuidFormat) -> Guid {
    match random_guid().sequentialize(format, next_sequence()) {
        Ok(guid) => guid,
        Err(_) => unreachable!("system clock ticks are positive"),
    }
}

mod inner {
    use rand::rngs::OsRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    use crate::generator::{RandSource, TimeGuidGenerator};

    /// The random number generator of the global generator, seeded from [`OsRng`].
    #[derive(Debug)]
    pub struct GlobalGenRng(ChaCha12Rng);

    impl RandSource for GlobalGenRng {
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            rand::RngCore::fill_bytes(&mut self.0, dest)
        }
    }

    /// A thin wrapper to reset the state when the process ID changes (i.e., upon Unix forks).
    #[derive(Debug)]
    pub struct GlobalGenInner {
        #[cfg(unix)]
        pid: u32,
        generator: TimeGuidGenerator<GlobalGenRng>,
    }

    impl Default for GlobalGenInner {
        fn default() -> Self {
            let pid = std::process::id();
            tracing::debug!(pid, "initializing global GUID generator");
            Self {
                #[cfg(unix)]
                pid,
                generator: TimeGuidGenerator::new(GlobalGenRng(
                    ChaCha12Rng::from_rng(OsRng)
                        .expect("identifiable: could not initialize global generator"),
                )),
            }
        }
    }

    impl GlobalGenInner {
        /// Returns a mutable reference to the inner [`TimeGuidGenerator`] instance, reseting the
        /// generator state on Unix if the process ID has changed.
        pub fn get_mut(&mut self) -> &mut TimeGuidGenerator<GlobalGenRng> {
            #[cfg(unix)]
            if self.pid != std::process::id() {
                tracing::debug!(previous = self.pid, "process ID changed; reseeding");
                *self = Default::default();
            }
            &mut self.generator
        }
    }
}


#[cfg(test)]
mod tests_sequential {
    use super::{next_sequence, sequential_guid};
    use crate::time::{StandardFormatter, TimeGuidFormatter};
    use crate::{SequentialGuidFormat, Variant};

    const N_SAMPLES: usize = 100_000;

    /// Generates increasing sequence values
    #[test]
    fn generates_increasing_sequence_values() {
        let mut prev = next_sequence();
        for _ in 0..N_SAMPLES {
            let curr = next_sequence();
            assert!(prev < curr);
            prev = curr;
        }
    }

    /// Generates sql server sortable identifiers by creation order
    #[test]
    fn generates_sql_server_sortable_identifiers_by_creation_order() {
        let mut prev = sequential_guid(SequentialGuidFormat::SqlServer);
        for _ in 0..N_SAMPLES {
            let curr = sequential_guid(SequentialGuidFormat::SqlServer);
            assert!(prev.cmp_sql_server(&curr).is_lt());
            assert_eq!(curr.variant(), Variant::Var0);
            prev = curr;
        }
    }

    /// Generates version one identifiers with increasing timestamps
    #[test]
    fn generates_version_one_identifiers_with_increasing_timestamps() {
        let mut prev = StandardFormatter
            .decode(&sequential_guid(SequentialGuidFormat::UuidVersion1))
            .time;
        for _ in 0..N_SAMPLES {
            let e = sequential_guid(SequentialGuidFormat::UuidVersion1);
            assert_eq!(e.version(), Some(1));
            let curr = StandardFormatter.decode(&e).time;
            assert!(prev < curr);
            prev = curr;
        }
    }

    /// Generates no duplicate identifiers under multithreading
    #[test]
    fn generates_no_duplicate_identifiers_under_multithreading(
    ) -> Result<(), Box<dyn std::error::Error>> {
        use std::{collections::HashSet, sync::mpsc, thread};

        let (tx, rx) = mpsc::channel();
        for _ in 0..4 {
            let tx = tx.clone();
            thread::Builder::new()
                .spawn(move || {
                    for _ in 0..10_000 {
                        tx.send(sequential_guid(SequentialGuidFormat::SqlServer))
                            .unwrap();
                    }
                })
                .map_err(|err| format!("failed to spawn thread: {:?}", err))?;
        }
        drop(tx);

        let mut s = HashSet::new();
        while let Ok(e) = rx.recv() {
            // sequence bytes only
            s.insert(<[u8; 8]>::try_from(&e.as_bytes()[8..]).unwrap());
        }

        assert_eq!(s.len(), 4 * 10_000);
        Ok(())
    }
}
