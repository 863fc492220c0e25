//! The small value grammars of the directive attributes.
//!
//! Grammar failures here are plain detail strings; the handlers wrap them
//! into [`crate::DirectiveParseError`] together with the element name,
//! attribute name, and raw value.

use petal_dom::QName;

/// Where a `define` binding lands.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum DefineScope {
    /// Visible in this scope and children created after the write.
    Local,
    /// Visible everywhere sharing the model's global map.
    Global,
}

/// One parsed `[scope] name expression` triple.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct VariableDefinition {
    pub scope: DefineScope,
    pub name: String,
    pub expression: String,
}

/// How a substituted value becomes document content.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ContentMode {
    /// Literal text (the default).
    Text,
    /// Parsed as a markup fragment.
    Structure,
}

/// One parsed `[prefix:]name expression` attribute assignment.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct AttributeAssignment {
    pub name: QName,
    pub expression: String,
}

/// Split a `;`-separated list, honoring `;;` as an escaped literal `;`.
///
/// Empty items (including a trailing separator's) are skipped.
fn split_items(value: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut current = String::new();
    let mut chars = value.chars().peekable();

    while let Some(c) = chars.next() {
        if c != ';' {
            current.push(c);
            continue;
        }
        if chars.peek() == Some(&';') {
            chars.next();
            current.push(';');
        } else {
            items.push(std::mem::take(&mut current));
        }
    }
    items.push(current);

    items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

/// Split one item into its first whitespace-delimited token and the rest.
fn split_token(item: &str) -> (&str, &str) {
    match item.find(char::is_whitespace) {
        Some(position) => (&item[..position], item[position..].trim_start()),
        None => (item, ""),
    }
}

fn is_variable_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Parse a `define` attribute value: `;`-separated `[scope] name expression`
/// triples.
pub fn parse_definitions(value: &str) -> Result<Vec<VariableDefinition>, String> {
    let items = split_items(value);
    if items.is_empty() {
        return Err("no variable definitions".to_string());
    }

    let mut definitions = Vec::with_capacity(items.len());
    for item in items {
        let (first, rest) = split_token(&item);
        let (scope, name, expression) = match first {
            "local" | "global" if !rest.is_empty() => {
                let scope = if first == "global" {
                    DefineScope::Global
                } else {
                    DefineScope::Local
                };
                let (name, expression) = split_token(rest);
                (scope, name, expression)
            }
            _ => {
                let (name, expression) = split_token(&item);
                (DefineScope::Local, name, expression)
            }
        };

        if !is_variable_name(name) {
            return Err(format!("'{name}' is not a valid variable name"));
        }
        if expression.is_empty() {
            return Err(format!("definition of '{name}' has no expression"));
        }
        definitions.push(VariableDefinition {
            scope,
            name: name.to_string(),
            expression: expression.to_string(),
        });
    }
    Ok(definitions)
}

/// Parse a `repeat` attribute value: `name expression`.
pub fn parse_repeat(value: &str) -> Result<(String, String), String> {
    let (name, expression) = split_token(value.trim());
    if !is_variable_name(name) {
        return Err(format!("'{name}' is not a valid repeat variable name"));
    }
    if expression.is_empty() {
        return Err("repeat directive has no expression".to_string());
    }
    Ok((name.to_string(), expression.to_string()))
}

/// Parse a `content`/`replace`/`on-error` value: `[text|structure] expression`.
pub fn parse_content_value(value: &str) -> Result<(ContentMode, String), String> {
    let trimmed = value.trim();
    let (first, rest) = split_token(trimmed);
    let (mode, expression) = match first {
        "text" if !rest.is_empty() => (ContentMode::Text, rest),
        "structure" if !rest.is_empty() => (ContentMode::Structure, rest),
        _ => (ContentMode::Text, trimmed),
    };
    if expression.is_empty() {
        return Err("directive has no expression".to_string());
    }
    Ok((mode, expression.to_string()))
}

/// Parse an `attributes` value: `;`-separated `[prefix:]name expression`
/// pairs.
pub fn parse_attribute_assignments(value: &str) -> Result<Vec<AttributeAssignment>, String> {
    let items = split_items(value);
    if items.is_empty() {
        return Err("no attribute assignments".to_string());
    }

    let mut assignments = Vec::with_capacity(items.len());
    for item in items {
        let (raw_name, expression) = split_token(&item);
        if raw_name.is_empty() || expression.is_empty() {
            return Err(format!("'{item}' is not an 'name expression' pair"));
        }
        assignments.push(AttributeAssignment {
            name: QName::parse(raw_name),
            expression: expression.to_string(),
        });
    }
    Ok(assignments)
}
