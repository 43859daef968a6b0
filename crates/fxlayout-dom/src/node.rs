//! DOM Node
//!
//! Nodes link to their relatives by `NodeId` instead of pointers so the
//! whole tree lives in one arena.

use crate::{InlineStyle, NodeId};

/// DOM Node - Core structure
#[derive(Debug)]
pub struct Node {
    /// Parent node (NONE if detached or root)
    pub parent: NodeId,
    /// First child
    pub first_child: NodeId,
    /// Last child (for O(1) append)
    pub last_child: NodeId,
    /// Previous sibling
    pub prev_sibling: NodeId,
    /// Next sibling
    pub next_sibling: NodeId,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    fn with_data(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    /// Create a new element node
    pub fn element(tag: &str) -> Self {
        Self::with_data(NodeData::Element(ElementData::new(tag)))
    }

    /// Create a new text node
    pub fn text(content: String) -> Self {
        Self::with_data(NodeData::Text(content))
    }

    /// Create a comment node
    pub fn comment(content: String) -> Self {
        Self::with_data(NodeData::Comment(content))
    }

    /// Create a document node
    pub fn document() -> Self {
        Self::with_data(NodeData::Document)
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug)]
pub enum NodeData {
    /// Document root
    Document,
    /// Element
    Element(ElementData),
    /// Text content
    Text(String),
    /// Comment
    Comment(String),
}

/// Element-specific data
///
/// `class` and `style` are not kept in `attrs`; they live in `classes` and
/// `style` and are reflected back by [`ElementData::attribute`].
#[derive(Debug, Default)]
pub struct ElementData {
    /// Lowercased tag name
    pub tag: String,
    /// Attributes in insertion order
    pub attrs: Vec<Attribute>,
    /// Class list
    pub classes: Vec<String>,
    /// Inline `style` declarations
    pub style: InlineStyle,
    /// Declarations that reach the element from author stylesheets
    pub sheet_style: InlineStyle,
}

impl ElementData {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    /// Get an attribute value, reflecting `class` and `style`
    pub fn attribute(&self, name: &str) -> Option<String> {
        match name {
            "class" if !self.classes.is_empty() => Some(self.classes.join(" ")),
            "class" => None,
            "style" if !self.style.is_empty() => Some(self.style.to_css_text()),
            "style" => None,
            _ => self.attrs.iter()
                .find(|a| a.name == name)
                .map(|a| a.value.clone()),
        }
    }

    /// Check whether an attribute is present
    pub fn has_attribute(&self, name: &str) -> bool {
        match name {
            "class" => !self.classes.is_empty(),
            "style" => !self.style.is_empty(),
            _ => self.attrs.iter().any(|a| a.name == name),
        }
    }

    /// All attributes as (name, value) pairs, `class` and `style` last
    pub fn attributes(&self) -> Vec<(String, String)> {
        let mut out: Vec<(String, String)> = self.attrs.iter()
            .map(|a| (a.name.clone(), a.value.clone()))
            .collect();
        for name in ["class", "style"] {
            if let Some(value) = self.attribute(name) {
                out.push((name.to_string(), value));
            }
        }
        out
    }

    /// Set a plain attribute (not `class`/`style`)
    pub(crate) fn set_plain_attr(&mut self, name: &str, value: &str) {
        if let Some(attr) = self.attrs.iter_mut().find(|a| a.name == name) {
            attr.value = value.to_string();
            return;
        }
        self.attrs.push(Attribute {
            name: name.to_string(),
            value: value.to_string(),
        });
    }

    /// Remove an attribute, returning whether it existed
    pub fn remove_attribute(&mut self, name: &str) -> bool {
        match name {
            "class" => {
                let had = !self.classes.is_empty();
                self.classes.clear();
                had
            }
            "style" => {
                let had = !self.style.is_empty();
                self.style = InlineStyle::new();
                had
            }
            _ => {
                let before = self.attrs.len();
                self.attrs.retain(|a| a.name != name);
                before != self.attrs.len()
            }
        }
    }

    /// Replace the class list from a class attribute value
    pub fn set_class_attr(&mut self, value: &str) {
        self.classes.clear();
        for class in value.split_whitespace() {
            self.add_class(class);
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add a class if not already present
    pub fn add_class(&mut self, class: &str) {
        if !class.is_empty() && !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }
}

/// Attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// User-agent default for the handful of properties directives probe.
pub fn user_agent_default(tag: &str, property: &str) -> &'static str {
    match property {
        "display" => match tag {
            "html" | "body" | "div" | "p" | "section" | "header" | "footer"
            | "main" | "nav" | "article" | "aside" | "ul" | "ol" | "form"
            | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "figure" => "block",
            "li" => "list-item",
            "button" | "input" | "select" | "textarea" => "inline-block",
            "head" | "script" | "style" | "template" => "none",
            _ => "inline",
        },
        "flex-direction" => "row",
        "flex-wrap" => "nowrap",
        "order" => "0",
        _ => "",
    }
}
