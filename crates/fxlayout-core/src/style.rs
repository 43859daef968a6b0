//! Style definitions
//!
//! The CSS property map every style builder produces. Keys are kept
//! sorted, which is also the order they are written to the element in.

use std::collections::BTreeMap;
use std::fmt;

/// Value of one CSS property in a [`StyleDefinition`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleValue {
    /// Plain textual value; an empty string clears the property when applied
    Text(String),
    /// Integer value (`order`, `margin: 0`)
    Int(i64),
    /// Vendor alternatives, written in sorted order so the last one wins
    Multi(Vec<String>),
    /// Remove the property from the element
    Clear,
}

impl StyleValue {
    /// Whether the value is "falsy": cleared or empty text
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::Multi(values) => values.is_empty(),
            Self::Clear => true,
            Self::Int(_) => false,
        }
    }

    /// Text view of the value (None when cleared)
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Text(s) => Some(s.clone()),
            Self::Int(n) => Some(n.to_string()),
            Self::Multi(_) => self.css_values().pop(),
            Self::Clear => None,
        }
    }

    /// Values to write to the element, in application order
    pub fn css_values(&self) -> Vec<String> {
        match self {
            Self::Text(s) => vec![s.clone()],
            Self::Int(n) => vec![n.to_string()],
            Self::Multi(values) => {
                let mut sorted = values.clone();
                sorted.sort();
                sorted
            }
            Self::Clear => vec![String::new()],
        }
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_text() {
            Some(text) => f.write_str(&text),
            None => Ok(()),
        }
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for StyleValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<i64> for StyleValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for StyleValue {
    fn from(value: i32) -> Self {
        Self::Int(value as i64)
    }
}

impl From<Option<String>> for StyleValue {
    fn from(value: Option<String>) -> Self {
        value.map(Self::Text).unwrap_or(Self::Clear)
    }
}

/// CSS property map produced by a style builder
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleDefinition {
    props: BTreeMap<String, StyleValue>,
}

impl StyleDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, property: &str, value: impl Into<StyleValue>) -> Self {
        self.set(property, value);
        self
    }

    /// Insert or replace a property
    pub fn set(&mut self, property: &str, value: impl Into<StyleValue>) {
        self.props.insert(property.to_string(), value.into());
    }

    /// Mark a property to be removed from the element
    pub fn clear(&mut self, property: &str) {
        self.props.insert(property.to_string(), StyleValue::Clear);
    }

    pub fn get(&self, property: &str) -> Option<&StyleValue> {
        self.props.get(property)
    }

    /// Text of a property; None when missing or cleared
    pub fn text(&self, property: &str) -> Option<String> {
        self.props.get(property).and_then(StyleValue::as_text)
    }

    /// True when the property is present and non-empty
    pub fn is_set(&self, property: &str) -> bool {
        self.props.get(property).is_some_and(|v| !v.is_empty())
    }

    /// True when the property is present as an explicit clear
    pub fn is_cleared(&self, property: &str) -> bool {
        matches!(self.props.get(property), Some(StyleValue::Clear))
    }

    pub fn contains(&self, property: &str) -> bool {
        self.props.contains_key(property)
    }

    pub fn remove(&mut self, property: &str) -> Option<StyleValue> {
        self.props.remove(property)
    }

    /// Merge `other` into `self`; `other` wins on conflicts
    pub fn extend(&mut self, other: StyleDefinition) {
        self.props.extend(other.props);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.props.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.props.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }
}

impl<K: Into<String>, V: Into<StyleValue>> FromIterator<(K, V)> for StyleDefinition {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            props: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}
