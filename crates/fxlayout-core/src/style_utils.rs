//! Style utilities
//!
//! Writes style maps onto elements and reads styles back. On a server
//! platform with the server module loaded, writes go to a
//! [`ServerStylesheet`] instead of the element.

use std::collections::BTreeMap;

use fxlayout_dom::{DomTree, NodeId};

use crate::config::{LayoutConfig, Platform};
use crate::prefixer::apply_css_prefixes;
use crate::style::StyleDefinition;

/// Styles collected per element during server rendering
#[derive(Debug, Default)]
pub struct ServerStylesheet {
    styles: BTreeMap<NodeId, BTreeMap<String, String>>,
}

impl ServerStylesheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property for an element; an empty value removes it
    pub fn add_style_to_element(&mut self, element: NodeId, property: &str, value: &str) {
        let styles = self.styles.entry(element).or_default();
        if value.is_empty() {
            styles.remove(property);
        } else {
            styles.insert(property.to_string(), value.to_string());
        }
    }

    pub fn get_style_for_element(&self, element: NodeId, property: &str) -> Option<&str> {
        self.styles.get(&element)
            .and_then(|s| s.get(property))
            .map(String::as_str)
    }

    /// All properties recorded for an element
    pub fn styles_for_element(&self, element: NodeId) -> Vec<(&str, &str)> {
        self.styles.get(&element)
            .map(|s| s.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect())
            .unwrap_or_default()
    }

    pub fn clear_element(&mut self, element: NodeId) {
        self.styles.remove(&element);
    }

    pub fn clear(&mut self) {
        self.styles.clear();
    }
}

/// Applies and looks up element styles
#[derive(Debug)]
pub struct StyleUtils {
    config: LayoutConfig,
    platform: Platform,
    server: ServerStylesheet,
}

impl StyleUtils {
    pub fn new(config: LayoutConfig, platform: Platform) -> Self {
        Self {
            config,
            platform,
            server: ServerStylesheet::new(),
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn server_stylesheet(&self) -> &ServerStylesheet {
        &self.server
    }

    pub fn server_stylesheet_mut(&mut self) -> &mut ServerStylesheet {
        &mut self.server
    }

    /// Writes go to the server stylesheet
    fn uses_server_stylesheet(&self) -> bool {
        self.platform.is_server() && self.config.server_loaded
    }

    fn prefixed(&self, styles: &StyleDefinition) -> StyleDefinition {
        if self.config.disable_vendor_prefixes {
            styles.clone()
        } else {
            apply_css_prefixes(styles.clone())
        }
    }

    /// Apply a style map to one element
    pub fn apply_style_to_element(&mut self, dom: &mut DomTree, styles: &StyleDefinition, element: NodeId) {
        let styles = self.prefixed(styles);
        self.apply_multi_value_style(dom, &styles, element);
    }

    /// Apply a single property to one element
    pub fn apply_property(&mut self, dom: &mut DomTree, element: NodeId, property: &str, value: &str) {
        let styles = StyleDefinition::new().with(property, value);
        self.apply_style_to_element(dom, &styles, element);
    }

    /// Apply a style map to several elements
    pub fn apply_style_to_elements(&mut self, dom: &mut DomTree, styles: &StyleDefinition, elements: &[NodeId]) {
        let styles = self.prefixed(styles);
        for &element in elements {
            self.apply_multi_value_style(dom, &styles, element);
        }
    }

    fn apply_multi_value_style(&mut self, dom: &mut DomTree, styles: &StyleDefinition, element: NodeId) {
        // Keys in sorted order; alternatives in sorted order so the last wins
        for (property, value) in styles.iter() {
            for css in value.css_values() {
                if self.uses_server_stylesheet() {
                    self.server.add_style_to_element(element, property, &css);
                } else {
                    dom.set_style_property(element, property, &css);
                }
            }
        }
    }

    /// Flow direction of an element and whether it is set inline
    ///
    /// Returns `(direction, has_inline_value)`; the direction defaults to
    /// `row`.
    pub fn get_flow_direction(&self, dom: &DomTree, target: NodeId) -> (String, bool) {
        let query = "flex-direction";
        let value = self.lookup_style(dom, target, query, false);
        let has_inline = !self.lookup_inline_style(dom, target, query).is_empty()
            || (self.uses_server_stylesheet() && !value.is_empty());

        if value.is_empty() {
            ("row".to_string(), has_inline)
        } else {
            (value, has_inline)
        }
    }

    /// Whether the element wraps its flex lines
    pub fn has_wrap(&self, dom: &DomTree, target: NodeId) -> bool {
        self.lookup_style(dom, target, "flex-wrap", false) == "wrap"
    }

    /// Attribute value, empty when missing
    pub fn lookup_attribute_value(&self, dom: &DomTree, element: NodeId, attribute: &str) -> String {
        dom.attribute(element, attribute).unwrap_or_default()
    }

    /// Inline style value, empty when missing
    pub fn lookup_inline_style(&self, dom: &DomTree, element: NodeId, property: &str) -> String {
        dom.style_property(element, property)
            .map(str::to_string)
            .unwrap_or_default()
    }

    /// Inline value, falling back to the computed value (or the server
    /// stylesheet) unless `inline_only`
    pub fn lookup_style(&self, dom: &DomTree, element: NodeId, property: &str, inline_only: bool) -> String {
        let immediate = self.lookup_inline_style(dom, element, property);
        let value = if !immediate.is_empty() {
            immediate
        } else if !self.platform.is_server() {
            if inline_only {
                String::new()
            } else {
                dom.computed_style(element, property)
            }
        } else if self.config.server_loaded {
            self.server.get_style_for_element(element, property)
                .map(str::to_string)
                .unwrap_or_default()
        } else {
            String::new()
        };
        value.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (DomTree, NodeId) {
        let mut dom = DomTree::new();
        let div = dom.create_element("div");
        dom.append_child(dom.root(), div).unwrap();
        (dom, div)
    }

    #[test]
    fn test_apply_prefixed_styles() {
        let (mut dom, div) = setup();
        let mut styler = StyleUtils::new(LayoutConfig::default(), Platform::Browser);
        let styles = StyleDefinition::new()
            .with("display", "flex")
            .with("flex-direction", "column");
        styler.apply_style_to_element(&mut dom, &styles, div);

        assert_eq!(dom.style_property(div, "display"), Some("flex"));
        assert_eq!(dom.style_property(div, "-webkit-flex-direction"), Some("column"));
    }

    #[test]
    fn test_vendor_prefixes_disabled() {
        let (mut dom, div) = setup();
        let config = LayoutConfig {
            disable_vendor_prefixes: true,
            ..LayoutConfig::default()
        };
        let mut styler = StyleUtils::new(config, Platform::Browser);
        styler.apply_style_to_element(&mut dom, &StyleDefinition::new().with("flex", "1 1 auto"), div);
        assert_eq!(dom.style_property(div, "flex"), Some("1 1 auto"));
        assert_eq!(dom.style_property(div, "-webkit-flex"), None);
    }

    #[test]
    fn test_clear_removes_property() {
        let (mut dom, div) = setup();
        let mut styler = StyleUtils::new(LayoutConfig::default(), Platform::Browser);
        styler.apply_property(&mut dom, div, "margin-right", "10px");
        let mut clear = StyleDefinition::new();
        clear.clear("margin-right");
        styler.apply_style_to_element(&mut dom, &clear, div);
        assert_eq!(dom.style_property(div, "margin-right"), None);
    }

    #[test]
    fn test_flow_direction_lookup() {
        let (mut dom, div) = setup();
        let styler = StyleUtils::new(LayoutConfig::default(), Platform::Browser);
        assert_eq!(styler.get_flow_direction(&dom, div), ("row".to_string(), false));

        dom.set_sheet_property(div, "flex-direction", "column");
        assert_eq!(styler.get_flow_direction(&dom, div), ("column".to_string(), false));

        dom.set_style_property(div, "flex-direction", "row-reverse");
        assert_eq!(styler.get_flow_direction(&dom, div), ("row-reverse".to_string(), true));

        dom.set_style_property(div, "flex-wrap", "wrap");
        assert!(styler.has_wrap(&dom, div));
    }

    #[test]
    fn test_server_stylesheet_writes() {
        let (mut dom, div) = setup();
        let config = LayoutConfig {
            server_loaded: true,
            ..LayoutConfig::default()
        };
        let mut styler = StyleUtils::new(config, Platform::Server);
        styler.apply_property(&mut dom, div, "display", "none");

        assert_eq!(dom.style_property(div, "display"), None);
        assert_eq!(styler.server_stylesheet().get_style_for_element(div, "display"), Some("none"));
        assert_eq!(styler.lookup_style(&dom, div, "display", false), "none");
    }
}
