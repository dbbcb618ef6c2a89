//! Sequential GUIDs built by embedding a sequence value into another GUID.
//!
//! The source GUID (typically random) supplies the bytes that keep the result unique while the
//! sequence value supplies the bytes that make results sort in issue order.

use crate::time::{StandardFormatter, TimeGuidFormatter};
use crate::{Error, Guid};

/// Formats of sequential GUIDs.
///
/// The discriminants double as the raw tags accepted by [`TryFrom<u8>`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(u8)]
pub enum SequentialGuidFormat {
    /// RFC 4122 time-based layout carrying the sequence as its timestamp and the last six bytes of
    /// the source as its node. Sorts by sequence under the RFC field order.
    UuidVersion1 = 1,

    /// Sequence placed in the bytes SQL Server compares first. Sorts by sequence in a
    /// `uniqueidentifier` column but is not RFC 4122 conformant.
    SqlServer = 2,
}

impl SequentialGuidFormat {
    /// Returns the sequentializer that produces the format.
    pub fn sequentializer(self) -> &'static dyn Sequentializer {
        match self {
            Self::UuidVersion1 => &VersionOneSequentializer,
            Self::SqlServer => &SqlServerSequentializer,
        }
    }
}

impl TryFrom<u8> for SequentialGuidFormat {
    type Error = Error;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            1 => Ok(Self::UuidVersion1),
            2 => Ok(Self::SqlServer),
            _ => Err(Error::UnsupportedLayout(tag)),
        }
    }
}

impl From<SequentialGuidFormat> for u8 {
    fn from(src: SequentialGuidFormat) -> Self {
        src as u8
    }
}

/// Embeds a sequence value into a source GUID.
pub trait Sequentializer {
    /// Returns a copy of `source` with part of its bytes replaced by `sequence`.
    fn sequentialize(&self, source: &Guid, sequence: i64) -> Result<Guid, Error>;
}

/// Produces RFC 4122 time-based GUIDs whose timestamp is the sequence value.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct VersionOneSequentializer;

impl Sequentializer for VersionOneSequentializer {
    /// Formats `sequence` as the time of a standard layout GUID with the node taken from
    /// `source[10..16]`. The four high bits the version displaces are kept in the clock sequence.
    fn sequentialize(&self, source: &Guid, sequence: i64) -> Result<Guid, Error> {
        let mut node = [0u8; 6];
        node.copy_from_slice(&source.as_bytes()[10..16]);
        let overflow = ((sequence as u64) >> 60) as i16;
        Ok(StandardFormatter.format_node(sequence, overflow, node))
    }
}

/// Places the sequence in the bytes SQL Server sorts on first.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct SqlServerSequentializer;

impl Sequentializer for SqlServerSequentializer {
    /// Keeps `source[0..8]` and writes `sequence` over the last eight bytes: bits 15 and up into
    /// bytes 10 through 15, the low 15 bits into bytes 8 and 9 with the top bit of byte 8 clear.
    ///
    /// Fails with [`Error::OutOfRange`] if `sequence` is negative.
    fn sequentialize(&self, source: &Guid, sequence: i64) -> Result<Guid, Error> {
        if sequence < 0 {
            return Err(Error::OutOfRange {
                name: "sequence",
                value: sequence,
            });
        }

        // free bit 15 so that byte 8 never reads as an RFC 4122 variant
        let shifted = ((sequence & !0x7fff).wrapping_shl(1)) + (sequence & 0x7fff);
        let sequence_bytes = shifted.to_be_bytes();

        let mut output = [0u8; 16];
        output[0..8].copy_from_slice(&source.as_bytes()[0..8]);
        output[8..10].copy_from_slice(&sequence_bytes[6..8]);
        output[10..16].copy_from_slice(&sequence_bytes[0..6]);
        Ok(Guid::from(output))
    }
}

impl Guid {
    /// Embeds `sequence` into a copy of this GUID in `format`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use identifiable::{Guid, SequentialGuidFormat};
    ///
    /// let source: Guid = "13121110-1514-1716-1819-1a1b1c1d1e1f".parse()?;
    /// let guid = source.sequentialize(SequentialGuidFormat::SqlServer, 0x8000)?;
    /// assert_eq!(guid.to_string(), "13121110-1514-1716-0000-000000000001");
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn sequentialize(
        &self,
        format: SequentialGuidFormat,
        sequence: i64,
    ) -> Result<Guid, Error> {
        format.sequentializer().sequentialize(self, sequence)
    }
}
