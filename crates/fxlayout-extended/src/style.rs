//! Responsive `ngStyle`
//!
//! Style expressions come as `"a: b; c: d"` text, lists of `"a: b"` entries
//! or property maps. The element's original `style` attribute acts as the
//! fallback the active expression is merged over. [`NgStyle`] writes the
//! merged map and removes properties that dropped out of it.

use std::collections::BTreeMap;

use fxlayout_core::directive::{DirectiveContext, ResponsiveDirective};
use fxlayout_core::inputs::Feature;
use fxlayout_core::keys::{self, DirectiveKey};
use fxlayout_core::marshaller::InputValue;
use fxlayout_core::{LayoutConfig, StyleDefinition};
use fxlayout_dom::{DomTree, NodeId};

pub const FEATURE: Feature = Feature::new(keys::NG_STYLE, &["ngStyle"]);

/// Property -> value
pub type StyleMap = BTreeMap<String, String>;

/// Split `"a: b; c: d"` into trimmed, non-empty entries
pub fn build_raw_list(source: &str) -> Vec<&str> {
    source.trim()
        .split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .collect()
}

/// Parse `key: value` (quotes stripped, first `;` dropped)
fn key_value(entry: &str) -> (String, String) {
    let strip = |s: &str| s.replace(['\'', '"'], "").trim().to_string();
    let (key, value) = entry.split_once(':').unwrap_or((entry, ""));
    (strip(key), strip(value).replacen(';', "", 1))
}

/// Build a style map from a list of `key: value` entries
pub fn build_map_from_list<'a>(entries: impl IntoIterator<Item = &'a str>) -> StyleMap {
    entries.into_iter()
        .map(key_value)
        .filter(|(key, _)| !key.is_empty())
        .collect()
}

/// Style map of any style expression
pub fn build_style_map(value: &InputValue) -> StyleMap {
    match value {
        InputValue::Text(text) => build_map_from_list(build_raw_list(text)),
        InputValue::List(entries) => build_map_from_list(entries.iter().map(String::as_str)),
        InputValue::Map(entries) => {
            let joined: Vec<String> = entries.iter().map(|(k, v)| format!("{}:{}", k, v)).collect();
            build_map_from_list(joined.iter().map(String::as_str))
        }
        InputValue::Bool(_) | InputValue::Flags(_) => StyleMap::new(),
    }
}

/// Property and value to write for a map entry; `width.px` appends the unit
fn resolve_entry(key: &str, value: &str) -> (String, String) {
    match key.split_once('.') {
        Some((property, unit)) if !value.is_empty() => (property.to_string(), format!("{}{}", value, unit)),
        Some((property, _)) => (property.to_string(), String::new()),
        None => (key.to_string(), value.to_string()),
    }
}

/// Inline style primitive: writes a map and removes stale properties
#[derive(Debug, Clone, Default)]
pub struct NgStyle {
    applied: StyleMap,
}

impl NgStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn applied(&self) -> &StyleMap {
        &self.applied
    }

    pub fn apply(&mut self, dom: &mut DomTree, element: NodeId, styles: &StyleMap) {
        let resolved: StyleMap = styles.iter().map(|(k, v)| resolve_entry(k, v)).collect();
        for property in self.applied.keys() {
            if !resolved.contains_key(property) {
                dom.set_style_property(element, property, "");
            }
        }
        for (property, value) in &resolved {
            if self.applied.get(property) != Some(value) {
                dom.set_style_property(element, property, value);
            }
        }
        self.applied = resolved;
    }
}

#[derive(Debug)]
pub struct StyleDirective {
    element: NodeId,
    ng_style: NgStyle,
    fallback: StyleMap,
    /// Styles also go to the server stylesheet
    is_server: bool,
}

impl StyleDirective {
    pub fn new(element: NodeId) -> Self {
        Self {
            element,
            ng_style: NgStyle::new(),
            fallback: StyleMap::new(),
            is_server: false,
        }
    }

    pub fn fallback(&self) -> &StyleMap {
        &self.fallback
    }
}

impl ResponsiveDirective for StyleDirective {
    fn key(&self) -> DirectiveKey {
        keys::NG_STYLE
    }

    fn element(&self) -> NodeId {
        self.element
    }

    fn init(&mut self, ctx: &mut DirectiveContext<'_>) {
        ctx.marshal.init(self.element, keys::NG_STYLE, &[]);
        let original = ctx.styler.lookup_attribute_value(ctx.dom, self.element, "style");
        self.fallback = build_map_from_list(build_raw_list(&original));
        self.ng_style.applied = self.fallback.clone();
        self.is_server = ctx.is_server() && ctx.config().server_loaded;
    }

    fn update_with_value(&mut self, ctx: &mut DirectiveContext<'_>, value: Option<&InputValue>) {
        let styles = value.map(build_style_map).unwrap_or_default();
        if self.is_server {
            let definition: StyleDefinition = styles.iter()
                .map(|(k, v)| resolve_entry(k, v))
                .collect();
            ctx.styler.apply_style_to_element(ctx.dom, &definition, self.element);
        }

        let mut merged = self.fallback.clone();
        merged.extend(styles);
        self.ng_style.apply(ctx.dom, self.element, &merged);
    }

    fn clear_styles(&mut self, ctx: &mut DirectiveContext<'_>) {
        let fallback = self.fallback.clone();
        self.ng_style.apply(ctx.dom, self.element, &fallback);
    }
}

pub fn create(element: NodeId, _config: &LayoutConfig) -> Box<dyn ResponsiveDirective> {
    Box::new(StyleDirective::new(element))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_list() {
        assert_eq!(build_raw_list(" color: red;; width: 10px; "), vec!["color: red", "width: 10px"]);
    }

    #[test]
    fn test_style_map_forms() {
        let text = build_style_map(&InputValue::from("color: 'red'; background: url(a.png)"));
        assert_eq!(text.get("color").map(String::as_str), Some("red"));
        assert_eq!(text.get("background").map(String::as_str), Some("url(a.png)"));

        let list = build_style_map(&InputValue::List(vec!["width: 5px".into(), ": nothing".into()]));
        assert_eq!(list.len(), 1);

        let map = build_style_map(&InputValue::Map(vec![("height.px".into(), "20".into())]));
        assert_eq!(map.get("height.px").map(String::as_str), Some("20"));
    }

    #[test]
    fn test_apply_removes_stale() {
        let mut dom = DomTree::new();
        let div = dom.create_element("div");
        let mut ng_style = NgStyle::new();

        let first: StyleMap = [("color".to_string(), "red".to_string()), ("width.px".to_string(), "20".to_string())]
            .into_iter()
            .collect();
        ng_style.apply(&mut dom, div, &first);
        assert_eq!(dom.style_property(div, "width"), Some("20px"));

        let second: StyleMap = [("color".to_string(), "blue".to_string())].into_iter().collect();
        ng_style.apply(&mut dom, div, &second);
        assert_eq!(dom.style_property(div, "color"), Some("blue"));
        assert_eq!(dom.style_property(div, "width"), None);
    }
}
