//! # DID URL
//!
//! Parse Decentralized Identifier (DID) URLs into their structural parts and
//! format them back into canonical strings.
//!
//! A DID URL has the shape
//!
//! `did:<method>:<method-specific-id>[;<params>][/<path>][?<query>][#<fragment>]`
//!
//! ```rust
//! use vercre_didurl::DidUrl;
//!
//! let url: DidUrl = "did:example:abc;service=agent/path?versionId=1#key-1".parse()?;
//! assert_eq!(url.did().method(), "example");
//! assert_eq!(url.parameter("service"), Some(Some("agent")));
//! assert_eq!(url.path(), "/path");
//! assert_eq!(url.query_parameter("versionId"), Some(Some("1")));
//! assert_eq!(url.fragment(), "key-1");
//! # Ok::<(), vercre_didurl::Error>(())
//! ```
//!
//! See [DID URL syntax](https://www.w3.org/TR/did-core/#did-url-syntax) for
//! more.

mod builder;
mod did;
mod error;
mod params;
mod url;

pub use self::builder::DidUrlBuilder;
pub use self::did::Did;
pub use self::error::{Component, Error};
pub use self::params::Parameters;
pub use self::url::DidUrl;

/// Result type for DID URL operations.
pub type Result<T, E = Error> = core::result::Result<T, E>;
