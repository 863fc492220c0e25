//! Minimal markup reading and writing for the built-in tree.
//!
//! Handles well-formed element/text/comment structure with quoted
//! attributes, self-closing tags, and the five predefined entities. This is
//! deliberately small: full HTML/XML conformance belongs to a pluggable
//! document backend, not to the engine core.

use thiserror::Error;

use crate::document::Document;
use crate::node::{NodeId, NodeKind};
use crate::qname::QName;

/// Markup text could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed markup at offset {offset}: {detail}")]
pub struct MarkupError {
    /// Byte offset of the failure.
    pub offset: usize,
    /// Human-readable description.
    pub detail: String,
}

impl MarkupError {
    fn new(offset: usize, detail: impl Into<String>) -> Self {
        MarkupError {
            offset,
            detail: detail.into(),
        }
    }
}

/// Parse a whole document: exactly one top-level element, with optional
/// surrounding whitespace and comments (dropped).
pub(crate) fn parse_document(text: &str) -> Result<Document, MarkupError> {
    let mut doc = Document::with_root(QName::local("#document"));
    let top = parse_fragment(&mut doc, text)?;

    let mut root = None;
    for node in top {
        match doc.kind(node) {
            NodeKind::Element(_) => {
                if root.is_some() {
                    return Err(MarkupError::new(0, "more than one top-level element"));
                }
                root = Some(node);
            }
            NodeKind::Text(t) if t.trim().is_empty() => {}
            NodeKind::Comment(_) => {}
            NodeKind::Text(_) => {
                return Err(MarkupError::new(0, "text content outside the root element"));
            }
        }
    }

    let Some(root) = root else {
        return Err(MarkupError::new(0, "no root element"));
    };
    doc.set_root(root);
    Ok(doc)
}

/// Parse a markup fragment into `doc`'s arena, returning the detached
/// top-level nodes.
pub(crate) fn parse_fragment(doc: &mut Document, text: &str) -> Result<Vec<NodeId>, MarkupError> {
    Reader::new(text).parse(doc)
}

struct Reader<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(text: &'a str) -> Self {
        Reader { text, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn eat(&mut self, token: &str) -> bool {
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn error(&self, detail: impl Into<String>) -> MarkupError {
        MarkupError::new(self.pos, detail)
    }

    fn parse(&mut self, doc: &mut Document) -> Result<Vec<NodeId>, MarkupError> {
        let mut top = Vec::new();
        // Open-element stack; (id, name) so end tags can be checked.
        let mut stack: Vec<(NodeId, String)> = Vec::new();

        while self.pos < self.text.len() {
            if self.eat("<!--") {
                let node = self.parse_comment(doc)?;
                attach(doc, &stack, &mut top, node);
            } else if self.rest().starts_with("</") {
                self.parse_end_tag(&mut stack)?;
            } else if self.rest().starts_with("<!") || self.rest().starts_with("<?") {
                self.skip_declaration()?;
            } else if self.rest().starts_with('<') {
                self.parse_start_tag(doc, &mut stack, &mut top)?;
            } else {
                let node = self.parse_text(doc);
                attach(doc, &stack, &mut top, node);
            }
        }

        if let Some((_, name)) = stack.last() {
            return Err(self.error(format!("unclosed element '{name}'")));
        }
        Ok(top)
    }

    fn parse_comment(&mut self, doc: &mut Document) -> Result<NodeId, MarkupError> {
        let Some(end) = self.rest().find("-->") else {
            return Err(self.error("unterminated comment"));
        };
        let body = &self.rest()[..end];
        let node = doc.create_comment(body);
        self.pos += end + "-->".len();
        Ok(node)
    }

    fn parse_end_tag(&mut self, stack: &mut Vec<(NodeId, String)>) -> Result<(), MarkupError> {
        let at = self.pos;
        self.pos += "</".len();
        let name = self.read_name()?;
        self.skip_whitespace();
        if !self.eat(">") {
            return Err(self.error("expected '>' after end tag name"));
        }
        match stack.pop() {
            Some((_, open)) if open == name => Ok(()),
            Some((_, open)) => Err(MarkupError::new(
                at,
                format!("end tag '</{name}>' does not match open element '{open}'"),
            )),
            None => Err(MarkupError::new(
                at,
                format!("end tag '</{name}>' with no open element"),
            )),
        }
    }

    fn skip_declaration(&mut self) -> Result<(), MarkupError> {
        // Doctypes and processing instructions are skipped, not modeled.
        let Some(end) = self.rest().find('>') else {
            return Err(self.error("unterminated declaration"));
        };
        self.pos += end + 1;
        Ok(())
    }

    fn parse_start_tag(
        &mut self,
        doc: &mut Document,
        stack: &mut Vec<(NodeId, String)>,
        top: &mut Vec<NodeId>,
    ) -> Result<(), MarkupError> {
        self.pos += 1;
        let name = self.read_name()?;
        let node = doc.create_element(QName::parse(&name));

        loop {
            self.skip_whitespace();
            if self.eat("/>") {
                attach(doc, stack, top, node);
                return Ok(());
            }
            if self.eat(">") {
                attach(doc, stack, top, node);
                stack.push((node, name));
                return Ok(());
            }
            let (attr_name, attr_value) = self.read_attribute()?;
            doc.set_attribute(node, QName::parse(&attr_name), attr_value);
        }
    }

    fn read_attribute(&mut self) -> Result<(String, String), MarkupError> {
        let name = self.read_name()?;
        self.skip_whitespace();
        if !self.eat("=") {
            // Boolean attribute with no value.
            return Ok((name, String::new()));
        }
        self.skip_whitespace();
        let quote = match self.rest().chars().next() {
            Some(q @ ('"' | '\'')) => q,
            _ => return Err(self.error("expected quoted attribute value")),
        };
        self.pos += 1;
        let Some(end) = self.rest().find(quote) else {
            return Err(self.error("unterminated attribute value"));
        };
        let raw = &self.rest()[..end];
        let value = decode_entities(raw);
        self.pos += end + 1;
        Ok((name, value))
    }

    fn parse_text(&mut self, doc: &mut Document) -> NodeId {
        let end = self.rest().find('<').unwrap_or(self.rest().len());
        let raw = &self.rest()[..end];
        let node = doc.create_text(decode_entities(raw));
        self.pos += end;
        node
    }

    fn read_name(&mut self) -> Result<String, MarkupError> {
        let start = self.pos;
        for (offset, c) in self.rest().char_indices() {
            if c.is_whitespace() || matches!(c, '>' | '/' | '=') {
                self.pos = start + offset;
                break;
            }
            self.pos = start + offset + c.len_utf8();
        }
        if self.pos == start {
            return Err(self.error("expected a name"));
        }
        Ok(self.text[start..self.pos].to_string())
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.rest().chars().next() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }
}

fn attach(doc: &mut Document, stack: &[(NodeId, String)], top: &mut Vec<NodeId>, node: NodeId) {
    match stack.last() {
        Some(&(parent, _)) => doc.append_child(parent, node),
        None => top.push(node),
    }
}

fn decode_entities(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        let Some(end) = rest.find(';') else {
            out.push('&');
            rest = &rest[1..];
            continue;
        };
        let entity = &rest[1..end];
        let decoded = match entity {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            _ => entity
                .strip_prefix("#x")
                .or_else(|| entity.strip_prefix("#X"))
                .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                .or_else(|| entity.strip_prefix('#').and_then(|dec| dec.parse().ok()))
                .and_then(char::from_u32),
        };
        match decoded {
            Some(c) => {
                out.push(c);
                rest = &rest[end + 1..];
            }
            None => {
                // Unknown entity: copy verbatim.
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

// Serialization

enum Event {
    Enter(NodeId),
    Exit(NodeId),
}

/// Serialize a subtree to markup text, iteratively.
pub(crate) fn serialize(doc: &Document, node: NodeId) -> String {
    let mut out = String::new();
    let mut work = vec![Event::Enter(node)];

    while let Some(event) = work.pop() {
        match event {
            Event::Enter(id) => match doc.kind(id) {
                NodeKind::Text(text) => out.push_str(&escape_text(text)),
                NodeKind::Comment(text) => {
                    out.push_str("<!--");
                    out.push_str(text);
                    out.push_str("-->");
                }
                NodeKind::Element(element) => {
                    out.push('<');
                    out.push_str(&element.name.to_string());
                    for attr in &element.attributes {
                        out.push(' ');
                        out.push_str(&attr.name.to_string());
                        out.push_str("=\"");
                        out.push_str(&escape_attribute(&attr.value));
                        out.push('"');
                    }
                    if element.children.is_empty() {
                        out.push_str("/>");
                    } else {
                        out.push('>');
                        work.push(Event::Exit(id));
                        for &child in element.children.iter().rev() {
                            work.push(Event::Enter(child));
                        }
                    }
                }
            },
            Event::Exit(id) => {
                if let NodeKind::Element(element) = doc.kind(id) {
                    out.push_str("</");
                    out.push_str(&element.name.to_string());
                    out.push('>');
                }
            }
        }
    }
    out
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests;
