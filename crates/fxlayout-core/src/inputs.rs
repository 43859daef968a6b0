//! Input tables
//!
//! Every feature declares its base input names once. The attribute table
//! (`fxFlex`, `fxFlex.xs`, `fxFlex.gt-sm`, ...) is generated from the
//! breakpoint registry, so custom breakpoints get attributes too.

use std::collections::BTreeMap;

use crate::breakpoints::{BreakPointRegistry, PRINT_ALIAS};
use crate::keys::DirectiveKey;

/// Static description of one directive feature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feature {
    pub key: DirectiveKey,
    /// Responsive input names (`fxShow`, `fxHide`)
    pub inputs: &'static [&'static str],
    /// Plain inputs without breakpoint variants (`fxGrow`, `gdInline`)
    pub extra_inputs: &'static [&'static str],
    /// The bare base attribute attaches the directive
    pub base_selects: bool,
    /// Breakpoint-suffixed variants exist
    pub responsive: bool,
    /// A `.print` variant exists
    pub print: bool,
    /// Only elements with this tag
    pub tag: Option<&'static str>,
}

impl Feature {
    pub const fn new(key: DirectiveKey, inputs: &'static [&'static str]) -> Self {
        Self {
            key,
            inputs,
            extra_inputs: &[],
            base_selects: true,
            responsive: true,
            print: false,
            tag: None,
        }
    }

    pub const fn with_extra_inputs(mut self, extra: &'static [&'static str]) -> Self {
        self.extra_inputs = extra;
        self
    }

    pub const fn with_print(mut self) -> Self {
        self.print = true;
        self
    }

    pub const fn for_tag(mut self, tag: &'static str) -> Self {
        self.tag = Some(tag);
        self
    }

    /// Only the base attribute, no breakpoint variants
    pub const fn non_responsive(mut self) -> Self {
        self.responsive = false;
        self
    }

    /// Only suffixed variants attach the directive
    pub const fn suffixed_only(mut self) -> Self {
        self.base_selects = false;
        self
    }

    pub fn matches_tag(&self, tag: &str) -> bool {
        self.tag.is_none_or(|t| t.eq_ignore_ascii_case(tag))
    }
}

/// One attribute name bound to a feature input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputBinding {
    pub key: DirectiveKey,
    /// Full attribute name (`fxFlex.gt-sm`)
    pub attribute: String,
    /// Input without suffix (`fxFlex`)
    pub input: &'static str,
    /// Breakpoint alias; `Some("")` for the base input, None for plain inputs
    pub breakpoint: Option<String>,
    /// Presence of the attribute attaches the directive
    pub selects: bool,
    pub tag: Option<&'static str>,
}

impl InputBinding {
    pub fn matches_tag(&self, tag: &str) -> bool {
        self.tag.is_none_or(|t| t.eq_ignore_ascii_case(tag))
    }

    pub fn is_responsive(&self) -> bool {
        self.breakpoint.is_some()
    }
}

/// Attribute name -> bindings
#[derive(Debug, Clone, Default)]
pub struct InputTable {
    bindings: BTreeMap<String, Vec<InputBinding>>,
}

impl InputTable {
    /// Expand feature declarations against the registered breakpoints
    pub fn build(features: &[Feature], registry: &BreakPointRegistry) -> Self {
        let mut table = Self::default();

        for feature in features {
            for &input in feature.inputs {
                table.add(feature, input, input.to_string(), Some(String::new()), feature.base_selects);
                if !feature.responsive {
                    continue;
                }
                for alias in registry.aliases() {
                    if alias == PRINT_ALIAS && !feature.print {
                        continue;
                    }
                    table.add(feature, input, format!("{}.{}", input, alias), Some(alias.to_string()), true);
                }
            }
            for &extra in feature.extra_inputs {
                table.add(feature, extra, extra.to_string(), None, false);
            }
        }

        tracing::debug!("input table: {} attributes", table.bindings.len());
        table
    }

    fn add(&mut self, feature: &Feature, input: &'static str, attribute: String, breakpoint: Option<String>, selects: bool) {
        let binding = InputBinding {
            key: feature.key,
            attribute: attribute.clone(),
            input,
            breakpoint,
            selects,
            tag: feature.tag,
        };
        self.bindings.entry(attribute).or_default().push(binding);
    }

    /// Bindings of an attribute name
    pub fn lookup(&self, attribute: &str) -> &[InputBinding] {
        self.bindings.get(attribute).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Bindings of an attribute that apply to an element with `tag`
    pub fn lookup_for_tag<'a>(&'a self, attribute: &str, tag: &'a str) -> impl Iterator<Item = &'a InputBinding> + 'a {
        self.lookup(attribute).iter().filter(move |b| b.matches_tag(tag))
    }

    /// Every known attribute name, sorted
    pub fn attribute_names(&self) -> Vec<&str> {
        self.bindings.keys().map(String::as_str).collect()
    }

    /// Attribute names bound to one feature key
    pub fn attributes_for(&self, key: DirectiveKey) -> Vec<&str> {
        self.bindings.iter()
            .filter(|(_, list)| list.iter().any(|b| b.key == key))
            .map(|(name, _)| name.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breakpoints::BreakPoint;
    use crate::config::LayoutConfig;

    const FEATURES: &[Feature] = &[
        Feature::new("flex", &["fxFlex"]).with_extra_inputs(&["fxGrow", "fxShrink"]),
        Feature::new("show-hide", &["fxShow", "fxHide"]).with_print(),
        Feature::new("flex-fill", &["fxFill", "fxFlexFill"]).non_responsive(),
        Feature::new("img-src", &["src"]).suffixed_only().for_tag("img"),
    ];

    fn table(config: &LayoutConfig) -> InputTable {
        InputTable::build(FEATURES, &BreakPointRegistry::from_config(config))
    }

    #[test]
    fn test_generated_names() {
        let table = table(&LayoutConfig::default());
        assert_eq!(table.attributes_for("flex").len(), 1 + 13 + 2);
        assert!(table.lookup("fxFlex.print").is_empty());
        assert_eq!(table.attributes_for("show-hide").len(), 2 * 15);
        assert_eq!(table.attributes_for("flex-fill"), vec!["fxFill", "fxFlexFill"]);

        let binding = &table.lookup("fxFlex.gt-sm")[0];
        assert_eq!(binding.breakpoint.as_deref(), Some("gt-sm"));
        assert_eq!(binding.input, "fxFlex");
        assert!(binding.selects);
    }

    #[test]
    fn test_plain_and_tagged_inputs() {
        let table = table(&LayoutConfig::default());
        let grow = &table.lookup("fxGrow")[0];
        assert_eq!(grow.breakpoint, None);
        assert!(!grow.selects);

        let src = &table.lookup("src")[0];
        assert!(!src.selects);
        assert_eq!(table.lookup_for_tag("src.md", "img").count(), 1);
        assert_eq!(table.lookup_for_tag("src.md", "div").count(), 0);
    }

    #[test]
    fn test_custom_breakpoint_names() {
        let config = LayoutConfig {
            breakpoints: vec![BreakPoint::new("tablet", "screen and (min-width: 700px)", 100, true)],
            ..LayoutConfig::default()
        };
        let table = table(&config);
        assert_eq!(table.lookup("fxFlex.tablet").len(), 1);
    }
}
