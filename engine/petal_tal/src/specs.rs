//! The directive attribute names under a namespace prefix.

use petal_dom::QName;

/// Qualified names of the eight directive attributes.
#[derive(Clone, Debug)]
pub struct AttributeSpecs {
    prefix: String,
    define: QName,
    condition: QName,
    repeat: QName,
    content: QName,
    replace: QName,
    omit_tag: QName,
    attributes: QName,
    on_error: QName,
}

impl AttributeSpecs {
    /// Specs for the given namespace prefix.
    pub fn new(prefix: &str) -> Self {
        let q = |local: &str| QName::prefixed(prefix, local);
        AttributeSpecs {
            prefix: prefix.to_string(),
            define: q("define"),
            condition: q("condition"),
            repeat: q("repeat"),
            content: q("content"),
            replace: q("replace"),
            omit_tag: q("omit-tag"),
            attributes: q("attributes"),
            on_error: q("on-error"),
        }
    }

    /// The namespace prefix itself.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn define(&self) -> &QName {
        &self.define
    }

    pub fn condition(&self) -> &QName {
        &self.condition
    }

    pub fn repeat(&self) -> &QName {
        &self.repeat
    }

    pub fn content(&self) -> &QName {
        &self.content
    }

    pub fn replace(&self) -> &QName {
        &self.replace
    }

    pub fn omit_tag(&self) -> &QName {
        &self.omit_tag
    }

    pub fn attributes(&self) -> &QName {
        &self.attributes
    }

    pub fn on_error(&self) -> &QName {
        &self.on_error
    }
}

impl Default for AttributeSpecs {
    fn default() -> Self {
        AttributeSpecs::new("tal")
    }
}
