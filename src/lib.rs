//! Name-based, time-based and sequential GUIDs with SQL Server friendly layouts
//!
//! ```rust
//! use identifiable::{Guid, SequentialGuidFormat, TimeGuidLayout};
//!
//! // name-based (RFC 4122 version 5)
//! let guid = Guid::new_v5(&Guid::NAMESPACE_DNS, "www.widgets.com");
//! assert_eq!(guid.to_string(), "21f7f8de-8051-5b89-8680-0195ef798b6a");
//!
//! // time-based, in the standard or the SQL Server layout
//! let guid = identifiable::time_guid(TimeGuidLayout::SqlServer);
//! println!("{}", guid); // e.g. "3d2c0b01-5f4e-77a6-1e6f-1ef0a2b3c4d5"
//!
//! // sequential, sorting by creation order in a `uniqueidentifier` column
//! let guid = identifiable::sequential_guid(SequentialGuidFormat::SqlServer);
//! println!("{}", guid); // e.g. "9b2f6c1e-4a7d-4e3b-1234-01ef0a2b3c4d"
//! println!("{:?}", guid.as_bytes()); // as 16-byte array in GUID byte order
//! ```
//!
//! # Byte order
//!
//! [`Guid`] holds its bytes the way Windows and SQL Server do: the first three fields are stored
//! little-endian and the remaining eight bytes as-is. The canonical string prints every field
//! most-significant byte first, so text produced here matches other RFC 4122 tools byte for byte.
//! Use [`Guid::from_rfc_bytes`] and [`Guid::to_rfc_bytes`] to exchange big-endian (network order)
//! byte arrays.
//!
//! # Name-based GUIDs
//!
//! [`NamedGuidFactory`] hashes a namespace GUID and a name with MD5 (version 3) or SHA-1
//! (version 5) as described in RFC 4122 section 4.3. The hash primitives come from a
//! [`HashProvider`], by default the RustCrypto `md-5` and `sha1` crates.
//!
//! # Time-based GUIDs
//!
//! A time-based GUID carries a 60-bit count of 100-nanosecond intervals since 00:00:00.00,
//! 15 October 1582, a 14-bit clock sequence and a 48-bit node. [`TimeGuidLayout`] selects where
//! those fields go:
//!
//! - [`TimeGuidLayout::Standard`] follows RFC 4122 section 4.1.2.
//! - [`TimeGuidLayout::SqlServer`] moves the node to the front and the time to the back, so that
//!   identifiers sort chronologically under SQL Server's `uniqueidentifier` ordering, which
//!   compares bytes 10 through 15 first.
//!
//! The two layouts carry the same information and [`TimeGuidLayout::transpose`] converts between
//! them. [`TimeGuidGenerator`] draws a random clock sequence and node for each identifier.
//!
//! # Sequential GUIDs
//!
//! A [`Sequentializer`] embeds a strictly increasing `i64` from a [`SequenceSource`] into another
//! GUID, usually a random one:
//!
//! ```text
//! SqlServer        0               8      10                      16
//!                  +---------------+-------+-----------------------+
//!                  |  source bytes |seq lo |      seq high (BE)    |
//!                  +---------------+-------+-----------------------+
//!
//! UuidVersion1     0                       8      10               16
//!                  +-----------------------+-------+---------------+
//!                  | seq as RFC 4122 time  | clock | source node   |
//!                  +-----------------------+-------+---------------+
//! ```
//!
//! # Crate features
//!
//! Default features:
//!
//! - `global_gen`: process-wide generator and sequence source behind [`time_guid`],
//!   [`random_guid`], [`next_sequence`] and [`sequential_guid`].
//!
//! Optional features:
//!
//! - `serde`: enables serialization/deserialization of [`Guid`] via serde.
//! - `uuid`: enables conversion from/to the [`uuid::Uuid`] type.
//!
//! # Logging
//!
//! The crate emits [`tracing`] events at `debug` and `trace` levels and installs no subscriber.

#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
pub use error::Error;

mod id;
pub use id::{Guid, ParseError, Variant};

pub mod hash;
pub use hash::{HashProvider, NamedGuidAlgorithm, RustCryptoHashes};

mod named;
pub use named::NamedGuidFactory;

pub mod time;
pub use time::{TimeComponents, TimeGuidFormatter, TimeGuidLayout};

pub mod generator;
pub use generator::{RandSource, StdSystemTime, TimeGuidGenerator, TimeSource};

pub mod sequential;
pub use sequential::{SequentialGuidFormat, Sequentializer};

mod sequence;
pub use sequence::SequenceSource;

mod global_gen;
#[cfg(feature = "global_gen")]
pub use global_gen::{next_sequence, random_guid, sequential_guid, time_guid};

pub mod entry;
