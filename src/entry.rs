//! Entry points taking raw selector tags and nullable inputs.
//!
//! These functions serve callers whose arguments come from untyped sources such as database
//! columns or configuration files. Each one validates its tag and required inputs, then delegates
//! to the typed API.

use crate::{
    Error, Guid, NamedGuidAlgorithm, NamedGuidFactory, SequentialGuidFormat, TimeGuidLayout,
};

/// Builds a name-based GUID with the algorithm tagged `selector` (3 for MD5, 5 for SHA-1).
///
/// Fails with [`Error::UnsupportedAlgorithm`] for any other tag and with
/// [`Error::NullArgument`] if `name` is absent.
///
/// # Examples
///
/// ```rust
/// use identifiable::{entry, Guid};
///
/// let guid = entry::build_named_identifier(5, &Guid::NAMESPACE_DNS, Some("www.widgets.com"))?;
/// assert_eq!(guid.to_string(), "21f7f8de-8051-5b89-8680-0195ef798b6a");
/// # Ok::<(), identifiable::Error>(())
/// ```
pub fn build_named_identifier(
    selector: u8,
    namespace: &Guid,
    name: Option<&str>,
) -> Result<Guid, Error> {
    let algorithm = NamedGuidAlgorithm::try_from(selector)?;
    let name = name.ok_or(Error::NullArgument("name"))?;
    NamedGuidFactory::with_rust_crypto().compute(algorithm, namespace, name)
}

/// Builds a time-based GUID in the layout tagged `layout` (1 for standard, 2 for SQL Server) from
/// the current time, using the process-wide generator.
///
/// Fails with [`Error::UnsupportedLayout`] for any other tag.
#[cfg(feature = "global_gen")]
#[cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]
pub fn build_time_identifier(layout: u8) -> Result<Guid, Error> {
    let layout = TimeGuidLayout::try_from(layout)?;
    Ok(crate::time_guid(layout))
}

/// Lays the given time, clock sequence and node out in the layout tagged `layout`.
///
/// Fails with [`Error::UnsupportedLayout`] for an unknown tag, [`Error::NullArgument`] if `node`
/// is absent and [`Error::InvalidLength`] if it is not 6 bytes long.
///
/// # Examples
///
/// ```rust
/// use identifiable::entry;
///
/// let node: &[u8] = &[0x00, 0x11, 0x22, 0x33, 0x44, 0x55];
/// let guid = entry::format_time_components(2, 0x0123_4567_89ab_cdef, 0x1234, Some(node))?;
/// assert_eq!(guid.to_string(), "33221100-5544-3492-1def-123456789abc");
/// # Ok::<(), identifiable::Error>(())
/// ```
pub fn format_time_components(
    layout: u8,
    time: i64,
    clock: i16,
    node: Option<&[u8]>,
) -> Result<Guid, Error> {
    let layout = TimeGuidLayout::try_from(layout)?;
    let node = node.ok_or(Error::NullArgument("node"))?;
    layout.formatter().format(time, clock, node)
}

/// Embeds `sequence` into `source` in the format tagged `format` (1 for UUID version 1, 2 for SQL
/// Server).
///
/// Fails with [`Error::UnsupportedLayout`] for an unknown tag, [`Error::NullArgument`] if
/// `source` is absent and [`Error::OutOfRange`] if the format cannot hold `sequence`.
pub fn embed_sequence(format: u8, source: Option<&Guid>, sequence: i64) -> Result<Guid, Error> {
    let format = SequentialGuidFormat::try_from(format)?;
    let source = source.ok_or(Error::NullArgument("source"))?;
    source.sequentialize(format, sequence)
}

/// Returns the next value of the process-wide sequence.
#[cfg(feature = "global_gen")]
#[cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]
pub fn next_sequence() -> i64 {
    crate::next_sequence()
}
