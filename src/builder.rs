//! # DID URL Builder
//!
//! Construct a [`DidUrl`] from parts rather than by parsing a string, or derive
//! a modified copy of an existing URL.

use crate::did::Did;
use crate::error::{Component, Error};
use crate::params::Parameters;
use crate::url::DidUrl;

/// A builder for creating a DID URL.
#[derive(Clone, Debug)]
pub struct DidUrlBuilder {
    // URL under construction
    url: DidUrl,
}

impl DidUrlBuilder {
    /// Creates a new `DidUrlBuilder` for the given DID.
    #[must_use]
    pub fn new(did: Did) -> Self {
        Self { url: did.into() }
    }

    /// Add a matrix parameter.
    ///
    /// Chain to add multiple parameters. Setting a key a second time replaces
    /// its value without moving it.
    #[must_use]
    pub fn parameter(mut self, key: impl Into<String>, value: Option<&str>) -> Self {
        self.url.params.insert(key, value.map(ToString::to_string));
        self
    }

    /// Set the path.
    ///
    /// A leading `/` is added when missing. An empty path clears it.
    #[must_use]
    pub fn path(mut self, path: &str) -> Self {
        self.url.path = if path.is_empty() || path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };
        self
    }

    /// Add a query parameter.
    ///
    /// Chain to add multiple parameters. Setting a key a second time replaces
    /// its value without moving it.
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: Option<&str>) -> Self {
        self.url.query.insert(key, value.map(ToString::to_string));
        self
    }

    /// Set the fragment, without the leading `#`.
    #[must_use]
    pub fn fragment(mut self, fragment: &str) -> Self {
        self.url.fragment = fragment.to_string();
        self
    }

    /// Build the DID URL.
    ///
    /// # Errors
    ///
    /// Components are checked against the DID URL grammar so that the
    /// canonical string of the result parses back to the same value. Fails if
    /// a key is empty or contains a delimiter of its component, or a value,
    /// path or fragment contains a delimiter that would end it early.
    pub fn build(self) -> crate::Result<DidUrl> {
        let url = self.url;
        let input = url.to_string();

        check_params(&url.params, &input, Component::Parameters, &[';', '/', '?', '#'])?;
        if let Some(c) = url.path.chars().find(|c| matches!(c, '?' | '#')) {
            return Err(Error::malformed(
                &input,
                Some(Component::Path),
                format!("path contains {c:?}"),
            ));
        }
        check_params(&url.query, &input, Component::Query, &['&', '#'])?;

        Ok(url)
    }
}

fn check_params(
    params: &Parameters, input: &str, component: Component, reserved: &[char],
) -> crate::Result<()> {
    for (key, value) in params {
        if key.is_empty() {
            return Err(Error::malformed(input, Some(component), format!("{component} key is empty")));
        }
        if key.contains(reserved) || key.contains('=') {
            return Err(Error::malformed(
                input,
                Some(component),
                format!("{component} key {key:?} contains a delimiter"),
            ));
        }
        if value.is_some_and(|v| v.contains(reserved)) {
            return Err(Error::malformed(
                input,
                Some(component),
                format!("{component} value for {key:?} contains a delimiter"),
            ));
        }
    }
    Ok(())
}

impl From<DidUrl> for DidUrlBuilder {
    fn from(url: DidUrl) -> Self {
        Self { url }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn did() -> Did {
        Did::from_str("did:elastos:icJ4z2DULrHEzYSvjKNJpKyhqFDxvYV7pN").unwrap()
    }

    #[test]
    fn build_all_parts() {
        let url = DidUrlBuilder::new(did())
            .parameter("elastos:foo", Some("testvalue"))
            .parameter("keyonly", None)
            .path("path/to/the/resource")
            .query("qkey", Some("qvalue"))
            .query("qkeyonly", None)
            .fragment("testfragment")
            .build()
            .expect("should build");

        assert_eq!(
            url.to_string(),
            "did:elastos:icJ4z2DULrHEzYSvjKNJpKyhqFDxvYV7pN;elastos:foo=testvalue;keyonly/path/to/the/resource?qkey=qvalue&qkeyonly#testfragment"
        );
        assert_eq!(DidUrl::from_str(&url.to_string()).unwrap(), url);
    }

    #[test]
    fn modify_existing() {
        let url = DidUrl::from_str("did:example:abc;a=1?q=1#key-1").unwrap();
        let changed = url
            .to_builder()
            .parameter("a", Some("2"))
            .fragment("key-2")
            .build()
            .expect("should build");

        assert_eq!(changed.to_string(), "did:example:abc;a=2?q=1#key-2");
        // the original is untouched
        assert_eq!(url.to_string(), "did:example:abc;a=1?q=1#key-1");
    }

    #[test]
    fn reject_delimiters() {
        let err = DidUrlBuilder::new(did()).parameter("a", Some("x/y")).build().unwrap_err();
        assert_eq!(err.component(), Some(Component::Parameters));

        let err = DidUrlBuilder::new(did()).query("", Some("1")).build().unwrap_err();
        assert_eq!(err.component(), Some(Component::Query));

        let err = DidUrlBuilder::new(did()).path("/a?b").build().unwrap_err();
        assert_eq!(err.component(), Some(Component::Path));

        // '/' and '?' are fine in query values and the fragment
        let url = DidUrlBuilder::new(did())
            .query("relativeRef", Some("/a/b?c"))
            .fragment("x?/y")
            .build()
            .expect("should build");
        assert_eq!(url.query_parameter("relativeRef"), Some(Some("/a/b?c")));
    }
}
