//! Layout configuration
//!
//! Options recognised by the runtime and the style builders. Field names
//! follow the camelCase JSON form so configs can be loaded from files.

use serde::{Deserialize, Serialize};

use crate::LayoutError;
use crate::breakpoints::BreakPoint;

/// Unit scaling for gap and offset values written as `<n>x`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Multiplier {
    pub unit: String,
    pub value: f64,
}

/// Platform the runtime renders on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Platform {
    #[default]
    Browser,
    Server,
}

impl Platform {
    pub fn is_server(&self) -> bool {
        matches!(self, Self::Server)
    }
}

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// A flex child forces `display: flex` onto a parent without a layout
    pub add_flex_to_parent: bool,
    /// Skip the built-in breakpoints, keeping only custom ones
    pub disable_default_bps: bool,
    /// Write styles without `-webkit-` alternatives
    pub disable_vendor_prefixes: bool,
    /// Styles go to the server stylesheet instead of the element
    pub server_loaded: bool,
    /// Column flex items get the `0.000000001px` basis instead of `auto`
    pub use_column_basis_zero: bool,
    /// Aliases that stay active while printing
    pub print_with_breakpoints: Vec<String>,
    pub multiplier: Option<Multiplier>,
    /// Unit appended to unitless gap values
    pub default_unit: String,
    /// `fxLayout` keeps an element's existing `display: none`
    pub detect_layout_display: bool,
    /// Custom breakpoints merged over the defaults (same alias replaces)
    pub breakpoints: Vec<BreakPoint>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            add_flex_to_parent: true,
            disable_default_bps: false,
            disable_vendor_prefixes: false,
            server_loaded: false,
            use_column_basis_zero: true,
            print_with_breakpoints: Vec::new(),
            multiplier: None,
            default_unit: "px".to_string(),
            detect_layout_display: false,
            breakpoints: Vec::new(),
        }
    }
}

impl LayoutConfig {
    /// Parse a JSON config; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, LayoutError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LayoutConfig::default();
        assert!(config.add_flex_to_parent);
        assert!(config.use_column_basis_zero);
        assert!(!config.server_loaded);
        assert_eq!(config.default_unit, "px");
        assert!(config.multiplier.is_none());
    }

    #[test]
    fn test_partial_json() {
        let config = LayoutConfig::from_json(
            r#"{ "addFlexToParent": false, "multiplier": { "unit": "em", "value": 0.5 } }"#,
        ).unwrap();
        assert!(!config.add_flex_to_parent);
        assert_eq!(config.multiplier, Some(Multiplier { unit: "em".into(), value: 0.5 }));
        assert_eq!(config.default_unit, "px");
    }

    #[test]
    fn test_invalid_json() {
        assert!(LayoutConfig::from_json("{ nope").is_err());
    }
}
