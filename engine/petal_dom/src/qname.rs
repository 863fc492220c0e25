//! Namespace-qualified names for elements and attributes.

use std::fmt;

/// A possibly namespace-prefixed name, such as `tal:define` or `href`.
///
/// Namespace membership is decided by prefix; resolving prefix declarations
/// to namespace URIs is the concern of a full document backend.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct QName {
    prefix: Option<Box<str>>,
    local: Box<str>,
}

impl QName {
    /// A name with no namespace prefix.
    pub fn local(local: impl Into<Box<str>>) -> Self {
        QName {
            prefix: None,
            local: local.into(),
        }
    }

    /// A name within a namespace prefix.
    pub fn prefixed(prefix: impl Into<Box<str>>, local: impl Into<Box<str>>) -> Self {
        QName {
            prefix: Some(prefix.into()),
            local: local.into(),
        }
    }

    /// Parse a raw name, splitting on the first `:`.
    pub fn parse(raw: &str) -> Self {
        match raw.split_once(':') {
            Some((prefix, local)) if !prefix.is_empty() && !local.is_empty() => {
                QName::prefixed(prefix, local)
            }
            _ => QName::local(raw),
        }
    }

    /// The namespace prefix, if any.
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// The local part of the name.
    pub fn local_name(&self) -> &str {
        &self.local
    }

    /// `true` if this name lives under the given namespace prefix.
    pub fn is_in_namespace(&self, prefix: &str) -> bool {
        self.prefix() == Some(prefix)
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.prefix {
            Some(prefix) => write!(f, "{prefix}:{}", self.local),
            None => write!(f, "{}", self.local),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain() {
        let name = QName::parse("href");
        assert_eq!(name.prefix(), None);
        assert_eq!(name.local_name(), "href");
        assert_eq!(name.to_string(), "href");
    }

    #[test]
    fn test_parse_prefixed() {
        let name = QName::parse("tal:define");
        assert_eq!(name.prefix(), Some("tal"));
        assert_eq!(name.local_name(), "define");
        assert_eq!(name.to_string(), "tal:define");
        assert!(name.is_in_namespace("tal"));
        assert!(!name.is_in_namespace("metal"));
    }

    #[test]
    fn test_degenerate_colons_stay_local() {
        assert_eq!(QName::parse(":x").local_name(), ":x");
        assert_eq!(QName::parse("x:").local_name(), "x:");
    }
}
