//! Error type shared by the identifier builders.

use thiserror::Error;

/// Errors raised when an identifier cannot be built from the inputs given.
///
/// Every variant describes invalid caller input; nothing here is transient, so none of the
/// builders retry.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Error)]
pub enum Error {
    /// The named-identifier algorithm tag is unknown or not offered by the hash provider.
    #[error("unsupported named GUID algorithm: {0}")]
    UnsupportedAlgorithm(u8),

    /// The layout (or sequential format) tag is unknown.
    #[error("unsupported GUID layout: {0}")]
    UnsupportedLayout(u8),

    /// A required argument was absent.
    #[error("`{0}` is required")]
    NullArgument(&'static str),

    /// A byte buffer had the wrong length.
    #[error("`{name}` must be a {expected}-byte array (got {actual} bytes)")]
    InvalidLength {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A numeric argument is outside the range the layout can represent.
    #[error("`{name}` must be a positive value (got {value})")]
    OutOfRange { name: &'static str, value: i64 },
}
