//! Time-based (version 1) GUID layouts.
//!
//! Both layouts carry the same fields and can be transposed into each other without loss:
//!
//! ```text
//! Standard (RFC 4122 section 4.1.2), in GUID byte order
//!  0       1       2       3       4       5       6       7
//! +-------+-------+-------+-------+-------+-------+-------+-------+
//! |        time_low (LE)          | time_mid (LE) |ver|time_hi(LE)|
//! +-------+-------+-------+-------+-------+-------+-------+-------+
//! |var| clock (BE)|                    node                       |
//! +-------+-------+-------+-------+-------+-------+-------+-------+
//!  8       9       10      11      12      13      14      15
//!
//! SqlServer
//!  0       1       2       3       4       5       6       7
//! +-------+-------+-------+-------+-------+-------+-------+-------+
//! |                    node                       |var| clock (BE)|
//! +-------+-------+-------+-------+-------+-------+-------+-------+
//! |ver| time bits |       time bits 12 through 59 (BE)            |
//! |   |  0 - 11   |                                               |
//! +-------+-------+-------+-------+-------+-------+-------+-------+
//!  8       9       10      11      12      13      14      15
//! ```
//!
//! SQL Server compares bytes 10 through 15 first, then 8-9, so the SqlServer layout sorts
//! chronologically in a `uniqueidentifier` clustered index. The variant bits sit at the top of
//! byte 6 instead of byte 8, which makes these GUIDs report variant `0`.

use crate::hash::VERSION_TIME;
use crate::{Error, Guid};

/// Byte layouts of time-based GUIDs.
///
/// The discriminants double as the raw tags accepted by [`TryFrom<u8>`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(u8)]
pub enum TimeGuidLayout {
    /// GUID layout as described in RFC 4122 section 4.1.2.
    Standard = 1,

    /// Layout optimized for SQL Server clustered indexes. Identifiers in this layout can be
    /// transposed to and from the standard layout.
    SqlServer = 2,
}

impl TimeGuidLayout {
    /// Returns the formatter that produces the layout.
    pub fn formatter(self) -> &'static dyn TimeGuidFormatter {
        match self {
            Self::Standard => &StandardFormatter,
            Self::SqlServer => &SqlServerFormatter,
        }
    }

    /// Rewrites `guid`, assumed to be in this layout, into the `to` layout.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use identifiable::TimeGuidLayout::{SqlServer, Standard};
    ///
    /// let node = [0x01, 0x23, 0x45, 0x67, 0x89, 0xab];
    /// let standard = Standard.formatter().format(0x01d1_0a2b_3c4d_5e6f, 0x2677, &node)?;
    /// let sql = Standard.transpose(&standard, SqlServer);
    /// assert_eq!(sql, SqlServer.formatter().format(0x01d1_0a2b_3c4d_5e6f, 0x2677, &node)?);
    /// assert_eq!(SqlServer.transpose(&sql, Standard), standard);
    /// # Ok::<(), identifiable::Error>(())
    /// ```
    pub fn transpose(self, guid: &Guid, to: Self) -> Guid {
        let TimeComponents { time, clock, node } = self.formatter().decode(guid);
        to.formatter().format_node(time, clock, node)
    }
}

impl TryFrom<u8> for TimeGuidLayout {
    type Error = Error;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            1 => Ok(Self::Standard),
            2 => Ok(Self::SqlServer),
            _ => Err(Error::UnsupportedLayout(tag)),
        }
    }
}

impl From<TimeGuidLayout> for u8 {
    fn from(src: TimeGuidLayout) -> Self {
        src as u8
    }
}

/// Fields carried by a time-based GUID.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct TimeComponents {
    /// Number of 100-nanosecond intervals since 00:00:00.00, 15 October 1582.
    pub time: i64,

    /// Clock sequence.
    pub clock: i16,

    /// 48-bit node identifier.
    pub node: [u8; 6],
}

/// Lays time, clock sequence and node values out into a GUID.
pub trait TimeGuidFormatter {
    /// Creates a time-based GUID.
    ///
    /// - `time` is the number of 100-nanosecond intervals since 00:00:00.00, 15 October 1582. The
    ///   most-significant nibble is overwritten by the version, so values roll over roughly every
    ///   two thousand years.
    /// - The least-significant 14 bits of `clock` are used as the clock sequence.
    /// - `node` must be 6 bytes long. Random nodes should have the multicast bit set.
    ///
    /// Negative `time` and `clock` values are taken as raw bit patterns.
    ///
    /// Fails with [`Error::InvalidLength`] if `node` is not exactly 6 bytes.
    fn format(&self, time: i64, clock: i16, node: &[u8]) -> Result<Guid, Error> {
        let node = <[u8; 6]>::try_from(node).map_err(|_| Error::InvalidLength {
            name: "node",
            expected: 6,
            actual: node.len(),
        })?;
        Ok(self.format_node(time, clock, node))
    }

    /// Creates a time-based GUID from a node of the correct size.
    fn format_node(&self, time: i64, clock: i16, node: [u8; 6]) -> Guid;

    /// Recovers the fields of a GUID in this layout.
    ///
    /// The version nibble replaces the top four bits of `time` and the variant replaces the top two
    /// bits of `clock`, so those come back as zeros.
    fn decode(&self, guid: &Guid) -> TimeComponents;
}

/// Formatter for standard time-based GUIDs as described in RFC 4122.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct StandardFormatter;

impl TimeGuidFormatter for StandardFormatter {
    fn format_node(&self, time: i64, clock: i16, node: [u8; 6]) -> Guid {
        let mut output = [0u8; 16];
        output[0..8].copy_from_slice(&time.to_le_bytes());
        output[8..10].copy_from_slice(&clock.to_be_bytes());
        output[10..16].copy_from_slice(&node);

        output[7] = (output[7] & 0x0f) | VERSION_TIME;
        output[8] = (output[8] & 0x3f) | 0x80;

        Guid::from(output)
    }

    fn decode(&self, guid: &Guid) -> TimeComponents {
        let b = guid.as_bytes();
        let mut time = [0u8; 8];
        time.copy_from_slice(&b[0..8]);
        time[7] &= 0x0f;

        let mut node = [0u8; 6];
        node.copy_from_slice(&b[10..16]);

        TimeComponents {
            time: i64::from_le_bytes(time),
            clock: i16::from_be_bytes([b[8] & 0x3f, b[9]]),
            node,
        }
    }
}

/// Formatter for time-based GUIDs that sort chronologically in SQL Server.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct SqlServerFormatter;

impl TimeGuidFormatter for SqlServerFormatter {
    fn format_node(&self, time: i64, clock: i16, node: [u8; 6]) -> Guid {
        // open a nibble above the low 12 time bits for the version, dropping the top nibble
        let time = ((time & 0x0fff_ffff_ffff_f000).wrapping_shl(4)) + (time & 0x0fff);
        let clock = clock & 0x3fff;

        let time_bytes = time.to_be_bytes();
        let mut output = [0u8; 16];
        output[0..6].copy_from_slice(&node);
        output[6..8].copy_from_slice(&clock.to_be_bytes());
        output[8..10].copy_from_slice(&time_bytes[6..8]);
        output[10..16].copy_from_slice(&time_bytes[0..6]);

        // version and variant are transposed
        output[8] |= VERSION_TIME;
        output[6] |= 0x80;

        Guid::from(output)
    }

    fn decode(&self, guid: &Guid) -> TimeComponents {
        let b = guid.as_bytes();
        let mut time = [0u8; 8];
        time[0..6].copy_from_slice(&b[10..16]);
        time[6] = b[8] & 0x0f;
        time[7] = b[9];
        let time = i64::from_be_bytes(time);

        let mut node = [0u8; 6];
        node.copy_from_slice(&b[0..6]);

        TimeComponents {
            time: ((time >> 4) & 0x0fff_ffff_ffff_f000) | (time & 0x0fff),
            clock: i16::from_be_bytes([b[6] & 0x3f, b[7]]),
            node,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        SqlServerFormatter, StandardFormatter, TimeComponents, TimeGuidFormatter, TimeGuidLayout,
    };
    use crate::{Error, Guid, Variant};
    use proptest::prelude::*;

    const TIMES: [i64; 5] = [0, i64::MAX, i64::MIN, 0x0102_0304_0506_0708, 0x0123_4567_89ab_cdef];
    const CLOCKS: [i16; 4] = [0, i16::MAX, i16::MIN, 0x1234];

    /// Requires node of 6 bytes
    #[test]
    fn requires_node_of_6_bytes() {
        for layout in [TimeGuidLayout::Standard, TimeGuidLayout::SqlServer] {
            for size in [0, 5, 7] {
                let node = vec![0u8; size];
                assert_eq!(
                    layout.formatter().format(0, 0, &node),
                    Err(Error::InvalidLength {
                        name: "node",
                        expected: 6,
                        actual: size,
                    })
                );
            }
            assert!(layout.formatter().format(0, 0, &[0u8; 6]).is_ok());
        }
    }

    /// Places time into bytes 0 through 6 of standard layout
    #[test]
    fn places_time_into_bytes_0_through_6_of_standard_layout() {
        for time in TIMES {
            let actual = StandardFormatter.format_node(time, 0, [0; 6]).into_bytes();
            for (i, e) in actual.iter().enumerate().take(7) {
                assert_eq!(*e as i64, (time >> (i * 8)) & 0xff);
            }
        }
    }

    /// Places time high with version into byte 7 of standard layout
    #[test]
    fn places_time_high_with_version_into_byte_7_of_standard_layout() {
        for time in TIMES {
            let actual = StandardFormatter.format_node(time, 0, [0; 6]).into_bytes();
            assert_eq!(actual[7] as i64, 0x10 + ((time >> 56) & 0x0f));
        }
    }

    /// Places clock with variant into bytes 8 and 9 of standard layout
    #[test]
    fn places_clock_with_variant_into_bytes_8_and_9_of_standard_layout() {
        for clock in CLOCKS {
            let actual = StandardFormatter.format_node(0, clock, [0; 6]).into_bytes();
            assert_eq!(actual[8] as i16, 0x80 + ((clock >> 8) & 0x3f));
            assert_eq!(actual[9] as i16, clock & 0xff);
        }
    }

    /// Places node into bytes 10 through 15 of standard layout
    #[test]
    fn places_node_into_bytes_10_through_15_of_standard_layout() {
        let node: [u8; 6] = rand::random();
        let actual = StandardFormatter.format(0, 0, &node).unwrap().into_bytes();
        assert_eq!(actual[10..16], node);
    }

    /// Places time high into bytes 10 through 15 of sql server layout
    #[test]
    fn places_time_high_into_bytes_10_through_15_of_sql_server_layout() {
        for time in TIMES {
            let actual = SqlServerFormatter.format_node(time, 0, [0; 6]).into_bytes();
            let mut high = time >> 12;
            for i in (10..16).rev() {
                assert_eq!(actual[i] as i64, high & 0xff);
                high >>= 8;
            }
        }
    }

    /// Places time low with version into bytes 8 and 9 of sql server layout
    #[test]
    fn places_time_low_with_version_into_bytes_8_and_9_of_sql_server_layout() {
        for time in TIMES {
            let actual = SqlServerFormatter.format_node(time, 0, [0; 6]).into_bytes();
            assert_eq!(actual[8] as i64, 0x10 + ((time >> 8) & 0x0f));
            assert_eq!(actual[9] as i64, time & 0xff);
        }
    }

    /// Places clock with variant into bytes 6 and 7 of sql server layout
    #[test]
    fn places_clock_with_variant_into_bytes_6_and_7_of_sql_server_layout() {
        for clock in CLOCKS {
            let actual = SqlServerFormatter.format_node(0, clock, [0; 6]).into_bytes();
            assert_eq!(actual[6] as i16, 0x80 + ((clock >> 8) & 0x3f));
            assert_eq!(actual[7] as i16, clock & 0xff);
        }
    }

    /// Places node into bytes 0 through 5 of sql server layout
    #[test]
    fn places_node_into_bytes_0_through_5_of_sql_server_layout() {
        let node: [u8; 6] = rand::random();
        let actual = SqlServerFormatter.format(0, 0, &node).unwrap().into_bytes();
        assert_eq!(actual[0..6], node);
    }

    /// Formats prepared cases correctly
    #[test]
    fn formats_prepared_cases_correctly() {
        let node = [0x00, 0x11, 0x22, 0x33, 0x44, 0x55];
        let cases = [
            (
                (0x0123_4567_89ab_cdef, 0x1234),
                "89abcdef-4567-1123-9234-001122334455",
                "33221100-5544-3492-1def-123456789abc",
            ),
            (
                (0x01d1_0a2b_3c4d_5e6f, 0x6677),
                "3c4d5e6f-0a2b-11d1-a677-001122334455",
                "33221100-5544-77a6-1e6f-1d10a2b3c4d5",
            ),
            (
                (0, 0),
                "00000000-0000-1000-8000-001122334455",
                "33221100-5544-0080-1000-000000000000",
            ),
            (
                (-1, -1),
                "ffffffff-ffff-1fff-bfff-001122334455",
                "33221100-5544-ffbf-1fff-ffffffffffff",
            ),
        ];

        for ((time, clock), standard, sql) in cases {
            let actual = TimeGuidLayout::Standard.formatter().format(time, clock, &node);
            assert_eq!(actual.unwrap().to_string(), standard);
            let actual = TimeGuidLayout::SqlServer.formatter().format(time, clock, &node);
            assert_eq!(actual.unwrap().to_string(), sql);
        }
    }

    /// Reports version and variant of each layout
    #[test]
    fn reports_version_and_variant_of_each_layout() {
        let node = [0x01, 0, 0, 0, 0, 0];
        let standard = StandardFormatter.format_node(0x01d1_0a2b_3c4d_5e6f, 0x1234, node);
        assert_eq!(standard.variant(), Variant::Var10);
        assert_eq!(standard.version(), Some(1));

        let sql = SqlServerFormatter.format_node(0x01d1_0a2b_3c4d_5e6f, 0x1234, node);
        assert_eq!(sql.variant(), Variant::Var0);
        assert_eq!(sql.as_bytes()[8] >> 4, 1);
        assert_eq!(sql.as_bytes()[6] & 0xc0, 0x80);
    }

    /// Sorts sql server layout chronologically under sql server ordering
    #[test]
    fn sorts_sql_server_layout_chronologically_under_sql_server_ordering() {
        let mut prev = SqlServerFormatter.format_node(0x01d1_0000_0000_0000, 0x3fff, [0xff; 6]);
        for i in 1..10_000i64 {
            let time = 0x01d1_0000_0000_0000 + i * 997;
            let curr = SqlServerFormatter.format_node(time, (i % 0x4000) as i16, rand::random());
            assert!(prev.sql_server_key() < curr.sql_server_key());
            prev = curr;
        }
    }

    /// Rejects unknown layout tags
    #[test]
    fn rejects_unknown_layout_tags() {
        assert_eq!(TimeGuidLayout::try_from(1), Ok(TimeGuidLayout::Standard));
        assert_eq!(TimeGuidLayout::try_from(2), Ok(TimeGuidLayout::SqlServer));
        for tag in [0u8, 3, 255] {
            assert_eq!(TimeGuidLayout::try_from(tag), Err(Error::UnsupportedLayout(tag)));
        }
        assert_eq!(u8::from(TimeGuidLayout::SqlServer), 2);
    }

    proptest! {
        /// Produces layouts with the same hex digits
        #[test]
        fn produces_layouts_with_the_same_hex_digits(time: i64, clock: i16, node: [u8; 6]) {
            let mut standard: Vec<char> =
                StandardFormatter.format_node(time, clock, node).to_string().chars().collect();
            let mut sql: Vec<char> =
                SqlServerFormatter.format_node(time, clock, node).to_string().chars().collect();
            standard.sort_unstable();
            sql.sort_unstable();
            prop_assert_eq!(standard, sql);
        }

        /// Decodes what it formats
        #[test]
        fn decodes_what_it_formats(time: i64, clock: i16, node: [u8; 6]) {
            let expected = TimeComponents {
                time: time & 0x0fff_ffff_ffff_ffff,
                clock: clock & 0x3fff,
                node,
            };
            for layout in [TimeGuidLayout::Standard, TimeGuidLayout::SqlServer] {
                let f = layout.formatter();
                let guid = f.format_node(time, clock, node);
                prop_assert_eq!(f.decode(&guid), expected);
                prop_assert_eq!(f.format_node(expected.time, expected.clock, node), guid);
            }
        }

        /// Transposes losslessly between layouts
        #[test]
        fn transposes_losslessly_between_layouts(time: i64, clock: i16, node: [u8; 6]) {
            use TimeGuidLayout::{SqlServer, Standard};
            let standard = Standard.formatter().format_node(time, clock, node);
            let sql = SqlServer.formatter().format_node(time, clock, node);
            prop_assert_eq!(Standard.transpose(&standard, SqlServer), sql);
            prop_assert_eq!(SqlServer.transpose(&sql, Standard), standard);
            prop_assert_eq!(Standard.transpose(&standard, Standard), standard);
        }
    }

    /// Leaves nil node untouched
    #[test]
    fn leaves_nil_node_untouched() {
        let guid: Guid = StandardFormatter.format_node(0, 0, [0; 6]);
        assert_eq!(guid.as_bytes()[10..], [0; 6]);
    }
}
