//! Monotonic sequence values for sequential GUIDs.

use std::sync::atomic::{AtomicI64, Ordering};

use crate::generator::{StdSystemTime, TimeSource};

/// A lock-free source of strictly increasing `i64` values that track a clock.
///
/// Each value is the current tick count of the time source, or one more than the previously issued
/// value when the clock has not advanced past it (several calls within one tick, or a clock that
/// went backwards). All callers sharing a source observe a single strictly increasing series.
///
/// [`SequenceSource::new`] is a `const fn`, so a process-wide instance can be a plain `static`:
///
/// ```rust
/// use identifiable::{SequenceSource, StdSystemTime};
///
/// static ORDERS: SequenceSource = SequenceSource::new(StdSystemTime);
///
/// let a = ORDERS.next();
/// let b = ORDERS.next();
/// assert!(a < b);
/// assert_eq!(ORDERS.last(), b);
/// ```
#[derive(Debug, Default)]
pub struct SequenceSource<T = StdSystemTime> {
    last: AtomicI64,
    time_source: T,
}

impl<T: TimeSource> SequenceSource<T> {
    /// Creates a source that has not issued any value yet.
    pub const fn new(time_source: T) -> Self {
        Self {
            last: AtomicI64::new(0),
            time_source,
        }
    }

    /// Returns the next value of the sequence.
    ///
    /// The result is greater than every value previously returned by this source and no less than
    /// the tick count read from the time source at the time of the call.
    pub fn next(&self) -> i64 {
        let now = self.time_source.ticks_since_epoch();
        let mut current = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = if now > current {
                now
            } else {
                tracing::trace!(now, current, "clock lags sequence; incrementing");
                current + 1
            };

            match self.last.compare_exchange_weak(
                current,
                candidate,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => return candidate,
                Err(observed) => {
                    tracing::trace!(candidate, observed, "lost sequence race; retrying");
                    current = observed;
                }
            }
        }
    }

    /// Returns the value most recently issued, or zero if none has been.
    pub fn last(&self) -> i64 {
        self.last.load(Ordering::Acquire)
    }
}
