//! Name-based (version 3 and 5) GUIDs.

use digest::DynDigest;

use crate::hash::{HashProvider, NamedGuidAlgorithm, RustCryptoHashes};
use crate::{Error, Guid};

/// Computes name-based GUIDs as defined in RFC 4122 section 4.3.
///
/// # Examples
///
/// ```rust
/// use identifiable::{Guid, NamedGuidAlgorithm, NamedGuidFactory};
///
/// let factory = NamedGuidFactory::with_rust_crypto();
/// let guid = factory.compute(NamedGuidAlgorithm::Sha1, &Guid::NAMESPACE_DNS, "python.org")?;
/// assert_eq!(guid.to_string(), "886313e1-3b8a-5372-9b90-0c9aee199e5d");
/// # Ok::<(), identifiable::Error>(())
/// ```
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct NamedGuidFactory<H = RustCryptoHashes> {
    hashes: H,
}

impl NamedGuidFactory<RustCryptoHashes> {
    /// Creates a factory backed by the RustCrypto `md-5` and `sha1` crates.
    pub const fn with_rust_crypto() -> Self {
        Self::new(RustCryptoHashes)
    }
}

impl Default for NamedGuidFactory<RustCryptoHashes> {
    fn default() -> Self {
        Self::with_rust_crypto()
    }
}

impl<H: HashProvider> NamedGuidFactory<H> {
    /// Creates a factory that obtains its hash primitives from `hashes`.
    pub const fn new(hashes: H) -> Self {
        Self { hashes }
    }

    /// Computes the GUID of `name` within `namespace`.
    ///
    /// The result depends only on the three arguments. The empty string is a valid name.
    pub fn compute(
        &self,
        algorithm: NamedGuidAlgorithm,
        namespace: &Guid,
        name: &str,
    ) -> Result<Guid, Error> {
        let (mut hasher, version) = self.hashes.select(algorithm).map_err(|err| {
            tracing::debug!(%algorithm, "hash provider rejected algorithm");
            err
        })?;

        hasher.update(&namespace.to_rfc_bytes());
        hasher.update(name.as_bytes());
        let digest = hasher.finalize();

        let mut bytes = Guid::from_rfc_bytes(resize_digest(&digest)).into_bytes();
        bytes[7] = (bytes[7] & 0x0f) | version;
        bytes[8] = (bytes[8] & 0x3f) | 0x80;
        Ok(Guid::from(bytes))
    }
}

/// Truncates a longer digest or zero-pads a shorter one to sixteen bytes.
fn resize_digest(digest: &[u8]) -> [u8; 16] {
    let mut hash = [0u8; 16];
    let len = digest.len().min(16);
    hash[..len].copy_from_slice(&digest[..len]);
    hash
}

impl Guid {
    /// Creates a version 3 (MD5) name-based GUID.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use identifiable::Guid;
    ///
    /// let guid = Guid::new_v3(&Guid::NAMESPACE_DNS, "www.widgets.com");
    /// assert_eq!(guid.to_string(), "3d813cbb-47fb-32ba-91df-831e1593ac29");
    /// ```
    pub fn new_v3(namespace: &Guid, name: &str) -> Self {
        Self::new_named(NamedGuidAlgorithm::Md5, namespace, name)
    }

    /// Creates a version 5 (SHA-1) name-based GUID.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use identifiable::Guid;
    ///
    /// let guid = Guid::new_v5(&Guid::NAMESPACE_DNS, "www.widgets.com");
    /// assert_eq!(guid.to_string(), "21f7f8de-8051-5b89-8680-0195ef798b6a");
    /// ```
    pub fn new_v5(namespace: &Guid, name: &str) -> Self {
        Self::new_named(NamedGuidAlgorithm::Sha1, namespace, name)
    }

    fn new_named(algorithm: NamedGuidAlgorithm, namespace: &Guid, name: &str) -> Self {
        match NamedGuidFactory::with_rust_crypto().compute(algorithm, namespace, name) {
            Ok(guid) => guid,
            Err(_) => unreachable!("RustCryptoHashes supports every algorithm"),
        }
    }
}
