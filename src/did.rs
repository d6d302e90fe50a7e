//! # DID Reference
//!
//! The `did:<method>:<method-specific-id>` part of a DID URL.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Component, Error};

/// Characters that end the DID reference inside a DID URL.
pub(crate) const DELIMITERS: [char; 4] = [';', '/', '?', '#'];

/// A bare Decentralized Identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Did {
    value: String,
    method_len: usize,
}

impl Did {
    /// Parse a DID reference already separated from any parameters, path,
    /// query and fragment.
    ///
    /// `input` is the complete string being parsed, reported in errors.
    pub(crate) fn parse(s: &str, input: &str) -> crate::Result<Self> {
        let Some(rest) = s.strip_prefix("did:") else {
            return Err(Error::malformed(input, Some(Component::Did), "missing 'did:' prefix"));
        };
        let Some((method, id)) = rest.split_once(':') else {
            return Err(Error::malformed(
                input,
                Some(Component::MethodSpecificId),
                "missing method-specific id",
            ));
        };
        if method.is_empty() {
            return Err(Error::malformed(input, Some(Component::Method), "empty method"));
        }
        if id.is_empty() {
            return Err(Error::malformed(
                input,
                Some(Component::MethodSpecificId),
                "empty method-specific id",
            ));
        }

        Ok(Self {
            value: s.to_string(),
            method_len: method.len(),
        })
    }

    /// The full `did:<method>:<method-specific-id>` string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// The DID method, e.g. `elastos` in `did:elastos:abc`.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.value[4..4 + self.method_len]
    }

    /// The method-specific identifier, verbatim. It may contain colons.
    #[must_use]
    pub fn method_specific_id(&self) -> &str {
        &self.value[4 + self.method_len + 1..]
    }
}

impl FromStr for Did {
    type Err = Error;

    /// Parse a bare DID.
    ///
    /// # Errors
    ///
    /// Fails if the string is not of the form
    /// `did:<method>:<method-specific-id>` or carries any DID URL component.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(pos) = s.find(DELIMITERS) {
            return Err(Error::malformed(
                s,
                Some(Component::Did),
                format!("unexpected {:?} in DID", &s[pos..=pos]),
            ));
        }
        Self::parse(s, s)
    }
}

impl Display for Did {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}

impl AsRef<str> for Did {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl Serialize for Did {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value)
    }
}

impl<'de> Deserialize<'de> for Did {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
