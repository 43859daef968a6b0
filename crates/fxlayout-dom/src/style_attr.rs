//! Inline style declarations
//!
//! `style="..."` attributes are split into declarations and each one is
//! checked with lightningcss. Declarations it rejects are dropped, the rest
//! keep the author's text and their `!important` flag.

use lightningcss::stylesheet::{ParserOptions, StyleAttribute};

const IMPORTANT: &str = "important";

#[derive(Debug, Clone, PartialEq, Eq)]
struct Declaration {
    name: String,
    value: String,
    important: bool,
}

/// Ordered property -> value declarations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineStyle {
    declarations: Vec<Declaration>,
}

impl InlineStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a property value (without its priority)
    pub fn get(&self, property: &str) -> Option<&str> {
        self.find(property).map(|d| d.value.as_str())
    }

    /// Whether a property is set with `!important`
    pub fn is_important(&self, property: &str) -> bool {
        self.find(property).is_some_and(|d| d.important)
    }

    /// Set a property; an empty value removes it (like `style.setProperty`).
    /// A trailing `!important` sets the priority.
    pub fn set(&mut self, property: &str, value: &str) {
        let (value, important) = split_priority(value);
        if value.is_empty() {
            self.remove(property);
            return;
        }
        match self.declarations.iter_mut().find(|d| d.name == property) {
            Some(slot) => {
                slot.value = value.to_string();
                slot.important = important;
            }
            None => self.declarations.push(Declaration {
                name: property.to_string(),
                value: value.to_string(),
                important,
            }),
        }
    }

    /// Remove a property, returning its previous value
    pub fn remove(&mut self, property: &str) -> Option<String> {
        let pos = self.declarations.iter().position(|d| d.name == property)?;
        Some(self.declarations.remove(pos).value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.declarations.iter().map(|d| (d.name.as_str(), d.value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Serialize back to attribute text
    pub fn to_css_text(&self) -> String {
        self.declarations.iter()
            .map(|d| if d.important {
                format!("{}: {} !{};", d.name, d.value, IMPORTANT)
            } else {
                format!("{}: {};", d.name, d.value)
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn find(&self, property: &str) -> Option<&Declaration> {
        self.declarations.iter().find(|d| d.name == property)
    }
}

/// Strip a trailing `!important`, returning the value and the flag
fn split_priority(value: &str) -> (&str, bool) {
    let value = value.trim();
    if let Some(bang) = value.rfind('!') {
        if value[bang + 1..].trim().eq_ignore_ascii_case(IMPORTANT) {
            return (value[..bang].trim_end(), true);
        }
    }
    (value, false)
}

/// Split declaration text on `;` outside quotes and parentheses
fn split_declarations(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, c) in text.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, ';') if depth == 0 => {
                out.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    out.push(&text[start..]);
    out.into_iter().map(str::trim).filter(|d| !d.is_empty()).collect()
}

/// Whether lightningcss accepts `name: value` as a declaration
fn is_valid_declaration(name: &str, value: &str) -> bool {
    let text = format!("{}: {}", name, value);
    let options = ParserOptions { error_recovery: true, ..ParserOptions::default() };
    match StyleAttribute::parse(&text, options) {
        Ok(attr) => attr.declarations.iter().next().is_some(),
        Err(_) => false,
    }
}

/// Parse the text of a `style` attribute, dropping malformed declarations
pub fn parse_style_attribute(text: &str) -> InlineStyle {
    let mut style = InlineStyle::new();

    for declaration in split_declarations(text) {
        let Some((name, value)) = declaration.split_once(':') else {
            tracing::debug!("dropping style declaration '{}'", declaration);
            continue;
        };
        let name = name.trim();
        let name = if name.starts_with("--") { name.to_string() } else { name.to_ascii_lowercase() };
        let (bare, _) = split_priority(value);
        if name.is_empty() || bare.is_empty() || !is_valid_declaration(&name, bare) {
            tracing::debug!("dropping style declaration '{}'", declaration);
            continue;
        }
        style.set(&name, value);
    }

    style
}
