//! Raw expression text split into an optional prefix and content.

/// An expression as found in a directive attribute value.
///
/// Immutable once constructed. The prefix selects an evaluator strategy
/// through the registry; an absent prefix selects the path evaluator.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Expression {
    text: String,
    /// Byte length of the prefix, excluding the `:`. Zero when absent.
    prefix_len: usize,
}

impl Expression {
    /// Split raw text into `(prefix, content)`.
    ///
    /// A prefix is a leading identifier (`[A-Za-z_][A-Za-z0-9_]*`)
    /// immediately followed by `:`. Anything else is content for the
    /// default evaluator.
    pub fn parse(text: impl Into<String>) -> Self {
        let text = text.into();
        let prefix_len = prefix_length(&text);
        Expression { text, prefix_len }
    }

    /// Construct with an explicit prefix, bypassing text splitting.
    ///
    /// Used when an evaluator builds a nested expression for known-type
    /// content (for example, string interpolation dispatching a bare token
    /// as a path).
    pub fn with_prefix(prefix: &str, content: &str) -> Self {
        Expression {
            text: format!("{prefix}:{content}"),
            prefix_len: prefix.len(),
        }
    }

    /// The whole raw text, prefix included.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The evaluator-selecting prefix, if present.
    pub fn prefix(&self) -> Option<&str> {
        (self.prefix_len > 0).then(|| &self.text[..self.prefix_len])
    }

    /// The content after the prefix (or the whole text when unprefixed).
    pub fn content(&self) -> &str {
        if self.prefix_len > 0 {
            &self.text[self.prefix_len + 1..]
        } else {
            &self.text
        }
    }
}

fn prefix_length(text: &str) -> usize {
    let mut chars = text.char_indices();
    match chars.next() {
        Some((_, c)) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return 0,
    }
    for (offset, c) in chars {
        if c == ':' {
            return offset;
        }
        if !(c.is_ascii_alphanumeric() || c == '_') {
            return 0;
        }
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unprefixed() {
        let e = Expression::parse("foo/bar");
        assert_eq!(e.prefix(), None);
        assert_eq!(e.content(), "foo/bar");
        assert_eq!(e.text(), "foo/bar");
    }

    #[test]
    fn test_prefixed() {
        let e = Expression::parse("string:Hello $name");
        assert_eq!(e.prefix(), Some("string"));
        assert_eq!(e.content(), "Hello $name");
    }

    #[test]
    fn test_nested_prefix_stays_in_content() {
        let e = Expression::parse("not:path:foo");
        assert_eq!(e.prefix(), Some("not"));
        assert_eq!(e.content(), "path:foo");
    }

    #[test]
    fn test_non_identifier_head_is_content() {
        let e = Expression::parse("a b:c");
        assert_eq!(e.prefix(), None);
        assert_eq!(e.content(), "a b:c");
    }

    #[test]
    fn test_with_prefix() {
        let e = Expression::with_prefix("path", "user/name");
        assert_eq!(e.prefix(), Some("path"));
        assert_eq!(e.content(), "user/name");
        assert_eq!(e.text(), "path:user/name");
    }
}
