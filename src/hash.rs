//! Hash primitives behind name-based GUIDs.

use std::{fmt, str};

use digest::DynDigest;

use crate::Error;

/// Version field value (already shifted into the high nibble) of time-based GUIDs.
pub const VERSION_TIME: u8 = 0x10;

/// Version field value (already shifted into the high nibble) of MD5 name-based GUIDs.
pub const VERSION_MD5: u8 = 0x30;

/// Version field value (already shifted into the high nibble) of SHA-1 name-based GUIDs.
pub const VERSION_SHA1: u8 = 0x50;

/// Hash algorithms for name-based GUIDs as defined in RFC 4122 section 4.3.
///
/// The discriminants are the RFC 4122 version numbers and double as the raw tags accepted by
/// [`TryFrom<u8>`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(u8)]
pub enum NamedGuidAlgorithm {
    /// Version 3 GUIDs, hashed with MD5.
    Md5 = 3,

    /// Version 5 GUIDs, hashed with SHA-1 (preferred).
    Sha1 = 5,
}

impl NamedGuidAlgorithm {
    /// Returns the version field value, shifted into the high nibble, of GUIDs built with the
    /// algorithm.
    pub const fn version(self) -> u8 {
        match self {
            Self::Md5 => VERSION_MD5,
            Self::Sha1 => VERSION_SHA1,
        }
    }
}

impl TryFrom<u8> for NamedGuidAlgorithm {
    type Error = Error;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            3 => Ok(Self::Md5),
            5 => Ok(Self::Sha1),
            _ => Err(Error::UnsupportedAlgorithm(tag)),
        }
    }
}

impl From<NamedGuidAlgorithm> for u8 {
    fn from(src: NamedGuidAlgorithm) -> Self {
        src as u8
    }
}

impl fmt::Display for NamedGuidAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
        })
    }
}

impl str::FromStr for NamedGuidAlgorithm {
    type Err = Error;

    /// Accepts `md5`, `sha1` and `sha-1` in any letter case.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        if src.eq_ignore_ascii_case("md5") {
            Ok(Self::Md5)
        } else if src.eq_ignore_ascii_case("sha1") || src.eq_ignore_ascii_case("sha-1") {
            Ok(Self::Sha1)
        } else {
            Err(Error::UnsupportedAlgorithm(0))
        }
    }
}

/// Supplies the hash primitive and version field for each [`NamedGuidAlgorithm`].
///
/// Implement this to route hashing through a different backend, or to restrict which algorithms
/// a [`NamedGuidFactory`](crate::NamedGuidFactory) will accept.
pub trait HashProvider {
    /// Returns a fresh hash primitive for `algorithm` and the version field value (shifted into
    /// the high nibble) for GUIDs derived from its digest.
    ///
    /// Fails with [`Error::UnsupportedAlgorithm`] if the provider does not offer `algorithm`.
    fn select(&self, algorithm: NamedGuidAlgorithm) -> Result<(Box<dyn DynDigest>, u8), Error>;
}

impl<T: HashProvider + ?Sized> HashProvider for &T {
    fn select(&self, algorithm: NamedGuidAlgorithm) -> Result<(Box<dyn DynDigest>, u8), Error> {
        (**self).select(algorithm)
    }
}

/// The default [`HashProvider`] backed by the RustCrypto `md-5` and `sha1` crates.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct RustCryptoHashes;

impl HashProvider for RustCryptoHashes {
    fn select(&self, algorithm: NamedGuidAlgorithm) -> Result<(Box<dyn DynDigest>, u8), Error> {
        let hasher: Box<dyn DynDigest> = match algorithm {
            NamedGuidAlgorithm::Md5 => Box::new(md5::Md5::default()),
            NamedGuidAlgorithm::Sha1 => Box::new(sha1::Sha1::default()),
        };
        Ok((hasher, algorithm.version()))
    }
}

#[cfg(test)]
mod tests {
    use super::{HashProvider, NamedGuidAlgorithm, RustCryptoHashes};
    use crate::Error;
    use digest::DynDigest;

    /// Selects primitives with expected output sizes and versions
    #[test]
    fn selects_primitives_with_expected_output_sizes_and_versions() {
        let (md5, version) = RustCryptoHashes.select(NamedGuidAlgorithm::Md5).unwrap();
        assert_eq!(md5.output_size(), 16);
        assert_eq!(version, 0x30);

        let (sha1, version) = RustCryptoHashes.select(NamedGuidAlgorithm::Sha1).unwrap();
        assert_eq!(sha1.output_size(), 20);
        assert_eq!(version, 0x50);
    }

    /// Returns fresh primitives on every call
    #[test]
    fn returns_fresh_primitives_on_every_call() {
        let (mut first, _) = RustCryptoHashes.select(NamedGuidAlgorithm::Sha1).unwrap();
        first.update(b"polluted");
        let (second, _) = RustCryptoHashes.select(NamedGuidAlgorithm::Sha1).unwrap();
        let (third, _) = RustCryptoHashes.select(NamedGuidAlgorithm::Sha1).unwrap();
        assert_ne!(first.finalize(), second.finalize());
        // SHA-1 of the empty input
        assert_eq!(
            third.finalize()[..4],
            [0xda, 0x39, 0xa3, 0xee],
        );
    }

    /// Converts raw tags and names
    #[test]
    fn converts_raw_tags_and_names() {
        assert_eq!(NamedGuidAlgorithm::try_from(3), Ok(NamedGuidAlgorithm::Md5));
        assert_eq!(NamedGuidAlgorithm::try_from(5), Ok(NamedGuidAlgorithm::Sha1));
        for tag in [0u8, 1, 2, 4, 6, 255] {
            assert_eq!(
                NamedGuidAlgorithm::try_from(tag),
                Err(Error::UnsupportedAlgorithm(tag))
            );
        }

        assert_eq!(u8::from(NamedGuidAlgorithm::Sha1), 5);
        assert_eq!("MD5".parse(), Ok(NamedGuidAlgorithm::Md5));
        assert_eq!("sha-1".parse(), Ok(NamedGuidAlgorithm::Sha1));
        assert_eq!(NamedGuidAlgorithm::Sha1.to_string().parse(), Ok(NamedGuidAlgorithm::Sha1));
        assert!("sha256".parse::<NamedGuidAlgorithm>().is_err());
    }
}
