//! Destructure DID URLs into strongly typed components.
//!
//! A DID URL is of the form
//!
//! `did:<method>:<method-specific-id>[;<params>][/<path>][?<query>][#<fragment>]`.
//!
//! Delimiters are resolved right to left: the fragment is split off first,
//! then the query, then the path, and finally the matrix parameters. A
//! delimiter character inside a later component (say a `?` in the fragment)
//! therefore never breaks an earlier split. Delimiters are always structural;
//! no percent-decoding is performed.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::did::{DELIMITERS, Did};
use crate::error::{Component, Error};
use crate::params::Parameters;
use crate::DidUrlBuilder;

/// Structure of a DID URL.
///
/// Values are produced by parsing or by [`DidUrlBuilder`] and are not
/// modified afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DidUrl {
    pub(crate) did: Did,
    pub(crate) params: Parameters,
    pub(crate) path: String,
    pub(crate) query: Parameters,
    pub(crate) fragment: String,
}

impl DidUrl {
    /// Parse a DID URL string.
    ///
    /// Equivalent to [`str::parse`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedDidUrl`] if the `did:` prefix, method or
    /// method-specific id is missing or empty, or if a parameter or query
    /// entry has an empty key.
    pub fn parse(s: &str) -> crate::Result<Self> {
        s.parse()
    }

    /// Parse a DID URL that may be relative to `base`.
    ///
    /// Strings starting with `#`, `?`, `/` or `;` are resolved against the
    /// base DID, so `#key-1` becomes `<base>#key-1`. Anything else is parsed
    /// as an absolute DID URL.
    ///
    /// # Errors
    ///
    /// As for [`DidUrl::parse`].
    pub fn parse_relative(base: &Did, s: &str) -> crate::Result<Self> {
        if s.starts_with(DELIMITERS) {
            return format!("{base}{s}").parse();
        }
        s.parse()
    }

    /// The DID reference.
    #[must_use]
    pub const fn did(&self) -> &Did {
        &self.did
    }

    /// Matrix parameters, in encounter order.
    #[must_use]
    pub const fn params(&self) -> &Parameters {
        &self.params
    }

    /// Path, including its leading `/`, or empty.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query parameters, in encounter order.
    #[must_use]
    pub const fn query(&self) -> &Parameters {
        &self.query
    }

    /// Fragment, without the `#`, or empty.
    #[must_use]
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// Look up a matrix parameter.
    ///
    /// `Some(None)` means the key is present without a value.
    #[must_use]
    pub fn parameter(&self, key: &str) -> Option<Option<&str>> {
        self.params.get(key)
    }

    /// Whether a matrix parameter is present.
    #[must_use]
    pub fn has_parameter(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Look up a query parameter.
    ///
    /// `Some(None)` means the key is present without a value.
    #[must_use]
    pub fn query_parameter(&self, key: &str) -> Option<Option<&str>> {
        self.query.get(key)
    }

    /// Whether a query parameter is present.
    #[must_use]
    pub fn has_query_parameter(&self, key: &str) -> bool {
        self.query.contains_key(key)
    }

    /// Get the internal resource identifier from the DID URL.
    ///
    /// This is in the form of `did:<method>:<method-specific-id>#<fragment>`
    /// and is used to dereference a service or verification method that is
    /// internal to the DID document.
    ///
    /// Note this is unreliable as an ID if there is no fragment on the URL.
    #[must_use]
    pub fn resource_id(&self) -> String {
        if self.fragment.is_empty() {
            return self.did.to_string();
        }
        format!("{}#{}", self.did, self.fragment)
    }

    /// Format the URL relative to `base`.
    ///
    /// When the URL's DID is `base` the DID is omitted, leaving only the
    /// parameters, path, query and fragment (e.g. `#key-1`). Otherwise the
    /// full URL is returned.
    #[must_use]
    pub fn to_relative(&self, base: &Did) -> String {
        let full = self.to_string();
        if &self.did != base || full.len() == base.as_str().len() {
            return full;
        }
        full[base.as_str().len()..].to_string()
    }

    /// Start a builder pre-populated with this URL's components.
    #[must_use]
    pub fn to_builder(&self) -> DidUrlBuilder {
        DidUrlBuilder::from(self.clone())
    }
}

impl FromStr for DidUrl {
    type Err = Error;

    /// Parse a string if possible into a strongly typed DID URL struct.
    ///
    /// Expecting a format:
    /// `did:<method>:<method-specific-id>[;<params>][/<path>][?<query>][#<fragment>]`.
    ///
    /// # Errors
    ///
    /// If the DID reference is incomplete or a parameter or query entry has
    /// no key, an error is returned.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (rest, fragment) = s.split_once('#').unwrap_or((s, ""));
        let (rest, query) = rest.split_once('?').unwrap_or((rest, ""));
        let (rest, path) = rest.find('/').map_or((rest, ""), |pos| rest.split_at(pos));
        let (did, params) = rest.split_once(';').unwrap_or((rest, ""));

        let url = Self {
            did: Did::parse(did, s)?,
            params: Parameters::parse(params, ';', s, Component::Parameters)?,
            path: path.to_string(),
            query: Parameters::parse(query, '&', s, Component::Query)?,
            fragment: fragment.to_string(),
        };
        tracing::trace!(input = s, method = url.did.method(), "parsed DID URL");

        Ok(url)
    }
}

impl Display for DidUrl {
    /// Format the URL as its canonical string.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.did)?;
        self.params.write_delimited(f, ';', true)?;
        f.write_str(&self.path)?;
        if !self.query.is_empty() {
            f.write_str("?")?;
            self.query.write_delimited(f, '&', false)?;
        }
        if !self.fragment.is_empty() {
            write!(f, "#{}", self.fragment)?;
        }
        Ok(())
    }
}

impl From<Did> for DidUrl {
    fn from(did: Did) -> Self {
        Self {
            did,
            params: Parameters::new(),
            path: String::new(),
            query: Parameters::new(),
            fragment: String::new(),
        }
    }
}

impl TryFrom<&str> for DidUrl {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl TryFrom<String> for DidUrl {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl Serialize for DidUrl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DidUrl {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
