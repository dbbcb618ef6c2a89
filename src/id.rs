use std::{cmp, fmt, str};

/// Represents a Globally Unique IDentifier.
///
/// The sixteen bytes are held in GUID byte order: the first three fields (4, 2 and 2 bytes) are
/// little-endian and the trailing 8 bytes are stored as-is. Byte indices used throughout this crate
/// (e.g. "the version nibble lives in byte 7") refer to this order. The canonical 8-4-4-4-12 string
/// prints each of the three leading fields most-significant byte first, so it matches the RFC 4122
/// rendering of the same identifier.
///
/// Equality and [`Ord`] compare the bytes in GUID byte order. See [`Guid::cmp_sql_server`] for the
/// order used by SQL Server `uniqueidentifier` columns.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Guid([u8; 16]);

/// Byte indices in the order SQL Server compares `uniqueidentifier` values.
const SQL_SERVER_PRECEDENCE: [usize; 16] = [10, 11, 12, 13, 14, 15, 8, 9, 6, 7, 4, 5, 0, 1, 2, 3];

/// Index in GUID byte order of each byte of the canonical string, left to right.
const DISPLAY_ORDER: [usize; 16] = [3, 2, 1, 0, 5, 4, 7, 6, 8, 9, 10, 11, 12, 13, 14, 15];

impl Guid {
    /// Nil GUID (00000000-0000-0000-0000-000000000000)
    pub const NIL: Self = Self([0x00; 16]);

    /// Max GUID (ffffffff-ffff-ffff-ffff-ffffffffffff)
    pub const MAX: Self = Self([0xff; 16]);

    /// Name space for fully-qualified domain names (6ba7b810-9dad-11d1-80b4-00c04fd430c8).
    pub const NAMESPACE_DNS: Self = Self::from_rfc_bytes([
        0x6b, 0xa7, 0xb8, 0x10, 0x9d, 0xad, 0x11, 0xd1, 0x80, 0xb4, 0x00, 0xc0, 0x4f, 0xd4, 0x30,
        0xc8,
    ]);

    /// Name space for URLs (6ba7b811-9dad-11d1-80b4-00c04fd430c8).
    pub const NAMESPACE_URL: Self = Self::from_rfc_bytes([
        0x6b, 0xa7, 0xb8, 0x11, 0x9d, 0xad, 0x11, 0xd1, 0x80, 0xb4, 0x00, 0xc0, 0x4f, 0xd4, 0x30,
        0xc8,
    ]);

    /// Name space for ISO OIDs (6ba7b812-9dad-11d1-80b4-00c04fd430c8).
    pub const NAMESPACE_OID: Self = Self::from_rfc_bytes([
        0x6b, 0xa7, 0xb8, 0x12, 0x9d, 0xad, 0x11, 0xd1, 0x80, 0xb4, 0x00, 0xc0, 0x4f, 0xd4, 0x30,
        0xc8,
    ]);

    /// Name space for X.500 DNs (6ba7b814-9dad-11d1-80b4-00c04fd430c8).
    pub const NAMESPACE_X500: Self = Self::from_rfc_bytes([
        0x6b, 0xa7, 0xb8, 0x14, 0x9d, 0xad, 0x11, 0xd1, 0x80, 0xb4, 0x00, 0xc0, 0x4f, 0xd4, 0x30,
        0xc8,
    ]);

    /// Creates a GUID from bytes in GUID byte order.
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Returns a reference to the underlying byte array in GUID byte order.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Returns the underlying byte array in GUID byte order.
    pub const fn into_bytes(self) -> [u8; 16] {
        self.0
    }

    /// Creates a GUID from bytes in RFC 4122 network byte order (every field big-endian).
    pub const fn from_rfc_bytes(bytes: [u8; 16]) -> Self {
        Self(swap_leading_fields(bytes))
    }

    /// Returns the bytes in RFC 4122 network byte order (every field big-endian).
    pub const fn to_rfc_bytes(&self) -> [u8; 16] {
        swap_leading_fields(self.0)
    }

    /// Returns the variant field value of the GUID.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use identifiable::{Guid, Variant};
    ///
    /// assert_eq!(Guid::NIL.variant(), Variant::VarNil);
    /// assert_eq!(Guid::MAX.variant(), Variant::VarMax);
    /// assert_eq!(Guid::NAMESPACE_DNS.variant(), Variant::Var10);
    /// ```
    pub fn variant(&self) -> Variant {
        match self.0[8] >> 4 {
            0x0..=0x7 if self == &Self::NIL => Variant::VarNil,
            0x0..=0x7 => Variant::Var0,
            0x8..=0xb => Variant::Var10,
            0xc | 0xd => Variant::Var110,
            0xe | 0xf if self == &Self::MAX => Variant::VarMax,
            _ => Variant::VarReserved,
        }
    }

    /// Returns the version field value of the GUID or `None` if the GUID does not have the variant
    /// field value of `10`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use identifiable::Guid;
    ///
    /// assert_eq!(Guid::NAMESPACE_DNS.version(), Some(1));
    /// assert_eq!(Guid::NIL.version(), None);
    /// ```
    pub fn version(&self) -> Option<u8> {
        match self.variant() {
            Variant::Var10 => Some(self.0[7] >> 4),
            _ => None,
        }
    }

    /// Returns the bytes rearranged in the order SQL Server compares `uniqueidentifier` values, so
    /// that a plain lexicographic comparison of two keys matches the database's sort order.
    ///
    /// Bytes 10 through 15 are the most significant, followed by 8-9, 6-7, 4-5 and 0-3.
    pub fn sql_server_key(&self) -> [u8; 16] {
        let mut key = [0u8; 16];
        for (dst, src) in key.iter_mut().zip(SQL_SERVER_PRECEDENCE) {
            *dst = self.0[src];
        }
        key
    }

    /// Compares two GUIDs the way SQL Server orders `uniqueidentifier` values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use identifiable::Guid;
    /// use std::cmp::Ordering;
    ///
    /// let a: Guid = "ffffffff-ffff-ffff-ffff-000000000000".parse()?;
    /// let b: Guid = "00000000-0000-0000-0000-000000000001".parse()?;
    /// assert!(a > b);
    /// assert_eq!(a.cmp_sql_server(&b), Ordering::Less);
    /// # Ok::<(), identifiable::ParseError>(())
    /// ```
    pub fn cmp_sql_server(&self, other: &Self) -> cmp::Ordering {
        self.sql_server_key().cmp(&other.sql_server_key())
    }

    /// Returns the 8-4-4-4-12 hexadecimal string representation stored in a stack-allocated
    /// structure that can be dereferenced as `str` and [`Display`](fmt::Display)ed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use identifiable::Guid;
    ///
    /// let x = "6ba7b810-9dad-11d1-80b4-00c04fd430c8".parse::<Guid>()?;
    /// let y = x.encode();
    /// assert_eq!(&y as &str, "6ba7b810-9dad-11d1-80b4-00c04fd430c8");
    /// assert_eq!(x.as_bytes()[..4], [0x10, 0xb8, 0xa7, 0x6b]);
    /// # Ok::<(), identifiable::ParseError>(())
    /// ```
    pub fn encode(&self) -> impl std::ops::Deref<Target = str> + fmt::Display {
        const DIGITS: &[u8; 16] = b"0123456789abcdef";

        let mut buffer = [0u8; 36];
        let mut buf_iter = buffer.iter_mut();
        for (i, src) in DISPLAY_ORDER.into_iter().enumerate() {
            let e = self.0[src] as usize;
            *buf_iter.next().unwrap() = DIGITS[e >> 4];
            *buf_iter.next().unwrap() = DIGITS[e & 15];
            if i == 3 || i == 5 || i == 7 || i == 9 {
                *buf_iter.next().unwrap() = b'-';
            }
        }
        debug_assert!(buffer.is_ascii());
        GuidStr(buffer)
    }
}

/// Reverses the byte order of the three leading fields, converting between GUID byte order and
/// RFC 4122 network byte order in either direction.
const fn swap_leading_fields(b: [u8; 16]) -> [u8; 16] {
    [
        b[3], b[2], b[1], b[0], b[5], b[4], b[7], b[6], b[8], b[9], b[10], b[11], b[12], b[13],
        b[14], b[15],
    ]
}

/// The reserved variants of GUIDs.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Variant {
    /// Nil GUID.
    VarNil,

    /// The variant field value of `0xx` (NCS backward compatibility, and the variant the SQL Server
    /// layouts of this crate report).
    Var0,

    /// The variant field value of `10x` described in RFC 4122.
    Var10,

    /// The variant field value of `110` reserved for Microsoft backward compatibility.
    Var110,

    /// The reserved variant field value of `111`.
    VarReserved,

    /// Max GUID.
    VarMax,
}

impl fmt::Display for Guid {
    /// Returns the 8-4-4-4-12 canonical hexadecimal string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl str::FromStr for Guid {
    type Err = ParseError;

    /// Creates an object from the 8-4-4-4-12 hexadecimal string representation.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        const ERR: ParseError = ParseError {};
        let mut dst = [0u8; 16];
        let mut iter = src.chars();
        for (i, e) in dst.iter_mut().enumerate() {
            let hi = iter.next().ok_or(ERR)?.to_digit(16).ok_or(ERR)? as u8;
            let lo = iter.next().ok_or(ERR)?.to_digit(16).ok_or(ERR)? as u8;
            *e = (hi << 4) | lo;
            if (i == 3 || i == 5 || i == 7 || i == 9) && iter.next().ok_or(ERR)? != '-' {
                return Err(ERR);
            }
        }
        if iter.next().is_none() {
            Ok(Self::from_rfc_bytes(dst))
        } else {
            Err(ERR)
        }
    }
}

impl From<Guid> for [u8; 16] {
    fn from(src: Guid) -> Self {
        src.0
    }
}

impl From<[u8; 16]> for Guid {
    fn from(src: [u8; 16]) -> Self {
        Self(src)
    }
}

impl AsRef<[u8]> for Guid {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<Guid> for String {
    fn from(src: Guid) -> Self {
        src.to_string()
    }
}

impl TryFrom<String> for Guid {
    type Error = ParseError;

    fn try_from(src: String) -> Result<Self, Self::Error> {
        src.parse()
    }
}

/// Concrete return type of [`Guid::encode()`] containing the stack-allocated 8-4-4-4-12 string
/// representation.
struct GuidStr([u8; 36]);

impl std::ops::Deref for GuidStr {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        debug_assert!(self.0.is_ascii());
        unsafe { str::from_utf8_unchecked(&self.0) }
    }
}

impl fmt::Display for GuidStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self)
    }
}

/// Error parsing an invalid string representation of GUID.
#[derive(Clone, Eq, PartialEq, Hash, Debug, thiserror::Error)]
#[error("invalid string representation")]
pub struct ParseError {}

#[cfg(feature = "uuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
mod uuid_support {
    use super::Guid;

    impl From<Guid> for uuid::Uuid {
        fn from(src: Guid) -> Self {
            uuid::Uuid::from_bytes_le(src.0)
        }
    }

    impl From<uuid::Uuid> for Guid {
        fn from(src: uuid::Uuid) -> Self {
            Self(src.to_bytes_le())
        }
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::{fmt, Guid};
    use serde::{de, Deserializer, Serializer};

    impl serde::Serialize for Guid {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.serialize_str(&self.encode())
            } else {
                serializer.serialize_bytes(self.as_bytes())
            }
        }
    }

    impl<'de> serde::Deserialize<'de> for Guid {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            if deserializer.is_human_readable() {
                deserializer.deserialize_str(VisitorImpl)
            } else {
                deserializer.deserialize_bytes(VisitorImpl)
            }
        }
    }

    struct VisitorImpl;

    impl<'de> de::Visitor<'de> for VisitorImpl {
        type Value = Guid;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a GUID representation")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            value.parse::<Self::Value>().map_err(de::Error::custom)
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            <[u8; 16]>::try_from(value)
                .map(Self::Value::from)
                .map_err(de::Error::custom)
        }
    }

}
