//! Time-based GUID generator and related types.

use crate::{Guid, TimeGuidLayout};

pub mod with_rand08;

/// Number of 100-nanosecond intervals between 00:00:00.00, 15 October 1582 (the start of the
/// Gregorian calendar) and the Unix epoch.
pub const GREGORIAN_OFFSET_TICKS: i64 = 0x01b2_1dd2_1381_4000;

/// A trait that defines the minimum random number generator interface for [`TimeGuidGenerator`].
pub trait RandSource {
    /// Fills `dest` with random data.
    fn fill_bytes(&mut self, dest: &mut [u8]);
}

/// A trait that defines the minimum system clock interface for [`TimeGuidGenerator`] and
/// [`SequenceSource`](crate::SequenceSource).
pub trait TimeSource {
    /// Returns the current number of 100-nanosecond intervals since 00:00:00.00, 15 October 1582.
    fn ticks_since_epoch(&self) -> i64;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn ticks_since_epoch(&self) -> i64 {
        (**self).ticks_since_epoch()
    }
}

/// The default [`TimeSource`] that uses [`std::time::SystemTime`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct StdSystemTime;

impl TimeSource for StdSystemTime {
    fn ticks_since_epoch(&self) -> i64 {
        use std::time;
        let since_unix = time::SystemTime::now()
            .duration_since(time::UNIX_EPOCH)
            .expect("identifiable: clock may have gone backwards");
        GREGORIAN_OFFSET_TICKS + (since_unix.as_nanos() / 100) as i64
    }
}

/// Represents a time-based GUID generator that draws a fresh random clock sequence and node for
/// every identifier it creates.
///
/// This type provides the interface to customize the random number generator and system clock.
/// The generator holds no state between calls besides its sources, so identifiers created within
/// the same clock tick are told apart by their 62 random bits only.
///
/// # Examples
///
/// ```rust
/// use identifiable::{TimeGuidGenerator, TimeGuidLayout};
/// use rand::rngs::OsRng;
///
/// let mut g = TimeGuidGenerator::with_rand08(OsRng);
/// let guid = g.generate(TimeGuidLayout::Standard);
/// assert_eq!(guid.version(), Some(1));
/// println!("{}", guid); // e.g., "3c4d5e6f-0a2b-11ef-a677-0b2c3d4e5f60"
///
/// let sql = g.generate(TimeGuidLayout::SqlServer);
/// println!("{}", sql); // e.g., "3d2c0b01-5f4e-77a6-1e6f-1ef0a2b3c4d5"
/// ```
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct TimeGuidGenerator<R, T = StdSystemTime> {
    /// The random number generator used by the generator.
    rand_source: R,

    /// The system clock used by the generator.
    time_source: T,
}

impl<R: RandSource> TimeGuidGenerator<R> {
    /// Creates a generator instance that reads the time from [`StdSystemTime`].
    pub const fn new(rand_source: R) -> Self {
        Self::with_rand_and_time_sources(rand_source, StdSystemTime)
    }
}

impl<R: RandSource, T: TimeSource> TimeGuidGenerator<R, T> {
    /// Creates a generator instance with specified random number generator and system clock.
    pub const fn with_rand_and_time_sources(rand_source: R, time_source: T) -> Self {
        Self {
            rand_source,
            time_source,
        }
    }

    /// Generates a new time-based GUID in `layout` from the current time.
    pub fn generate(&mut self, layout: TimeGuidLayout) -> Guid {
        let time = self.time_source.ticks_since_epoch();
        self.generate_core(layout, time)
    }

    /// Generates a new time-based GUID in `layout` from the `time` passed.
    ///
    /// `time` is the number of 100-nanosecond intervals since 00:00:00.00, 15 October 1582. The
    /// clock sequence and node are random; the node has its multicast bit set as RFC 4122 section
    /// 4.5 requires of nodes that are not IEEE 802 addresses.
    pub fn generate_core(&mut self, layout: TimeGuidLayout, time: i64) -> Guid {
        let mut clock = [0u8; 2];
        self.rand_source.fill_bytes(&mut clock);

        let mut node = [0u8; 6];
        self.rand_source.fill_bytes(&mut node);
        node[0] |= 0x01;

        layout
            .formatter()
            .format_node(time, i16::from_le_bytes(clock), node)
    }

    /// Generates a new random (version 4) GUID utilizing the random number generator inside.
    pub fn generate_v4(&mut self) -> Guid {
        let mut bytes = [0u8; 16];
        self.rand_source.fill_bytes(&mut bytes);
        bytes[7] = 0x40 | (bytes[7] >> 4);
        bytes[8] = 0x80 | (bytes[8] >> 2);
        Guid::from(bytes)
    }
}
