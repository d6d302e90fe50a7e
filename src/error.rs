//! # DID URL Errors
//!
//! Parsing a DID URL has a single failure mode: the input is malformed. The
//! error carries the offending input and, where it can be determined, the
//! component that was being parsed when the failure occurred.

use std::fmt::{Display, Formatter};

use thiserror::Error;

/// Public error type for DID URL handling.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The input could not be split into a well-formed DID URL.
    #[error("malformed DID URL {input:?}: {reason}")]
    MalformedDidUrl {
        /// The string that failed to parse.
        input: String,

        /// The component being parsed when the failure occurred.
        component: Option<Component>,

        /// Human-readable description of the failure.
        reason: String,
    },
}

impl Error {
    pub(crate) fn malformed(
        input: &str, component: Option<Component>, reason: impl Into<String>,
    ) -> Self {
        let err = Self::MalformedDidUrl {
            input: input.to_string(),
            component,
            reason: reason.into(),
        };
        tracing::debug!(input, component = ?err.component(), "{err}");
        err
    }

    /// The input that failed to parse.
    #[must_use]
    pub fn input(&self) -> &str {
        match self {
            Self::MalformedDidUrl { input, .. } => input,
        }
    }

    /// The component being parsed when the error occurred, if known.
    #[must_use]
    pub const fn component(&self) -> Option<Component> {
        match self {
            Self::MalformedDidUrl { component, .. } => *component,
        }
    }

    /// Transfer the error to `OAuth2` compatible format.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let code = match self {
            Self::MalformedDidUrl { .. } => "invalid_did_url",
        };
        serde_json::json!({
            "error": code,
            "error_description": self.to_string(),
        })
    }
}

/// The structural parts of a DID URL, used to locate parse failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Component {
    /// The `did:<method>:<method-specific-id>` reference as a whole.
    Did,

    /// The DID method name.
    Method,

    /// The method-specific identifier.
    MethodSpecificId,

    /// Matrix parameters (`;key=value`).
    Parameters,

    /// The path (`/a/b`).
    Path,

    /// Query parameters (`?key=value`).
    Query,

    /// The fragment (`#frag`).
    Fragment,
}

impl Display for Component {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Did => "did",
            Self::Method => "method",
            Self::MethodSpecificId => "method-specific-id",
            Self::Parameters => "parameters",
            Self::Path => "path",
            Self::Query => "query",
            Self::Fragment => "fragment",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    use super::*;

    #[test]
    fn json_format() {
        let err = Error::malformed("did:x", Some(Component::Method), "missing method-specific id");

        assert_eq!(
            err.to_json(),
            json!({
                "error": "invalid_did_url",
                "error_description": "malformed DID URL \"did:x\": missing method-specific id"
            })
        );
    }

    #[test]
    fn accessors() {
        let err = Error::malformed("nope", None, "missing 'did:' prefix");
        assert_eq!(err.input(), "nope");
        assert_eq!(err.component(), None);

        let err = Error::malformed("did:a:b;=1", Some(Component::Parameters), "empty key");
        assert_eq!(err.component(), Some(Component::Parameters));
        assert_eq!(Component::MethodSpecificId.to_string(), "method-specific-id");
    }

    #[test]
    fn logged_on_failure() {
        let subscriber =
            FmtSubscriber::builder().with_max_level(Level::DEBUG).with_test_writer().finish();

        let err = tracing::subscriber::with_default(subscriber, || {
            "did:example".parse::<crate::DidUrl>().expect_err("should fail")
        });
        assert_eq!(err.to_string(), "malformed DID URL \"did:example\": missing method-specific id");
    }
}
