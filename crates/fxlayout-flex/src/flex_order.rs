//! fxFlexOrder: `order` of a flex item

use fxlayout_core::directive::{ResponsiveDirective, StyleBuilder, ValueDirective};
use fxlayout_core::inputs::Feature;
use fxlayout_core::keys;
use fxlayout_core::{LayoutConfig, StyleDefinition};
use fxlayout_dom::NodeId;

pub const FEATURE: Feature = Feature::new(keys::FLEX_ORDER, &["fxFlexOrder"]);

#[derive(Debug, Clone, Copy, Default)]
pub struct FlexOrderStyleBuilder;

impl StyleBuilder for FlexOrderStyleBuilder {
    type Parent = ();

    fn build_styles(&self, input: &str, _parent: &()) -> StyleDefinition {
        match parse_int_prefix(input) {
            Some(order) if order != 0 => StyleDefinition::new().with("order", order),
            _ => {
                let mut css = StyleDefinition::new();
                css.clear("order");
                css
            }
        }
    }
}

/// Leading integer of `value` (`"3px"` reads as 3)
pub fn parse_int_prefix(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let end = trimmed.char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
        .map(|(i, _)| i)
        .unwrap_or(trimmed.len());
    trimmed[..end].parse().ok()
}

pub fn create(element: NodeId, _config: &LayoutConfig) -> Box<dyn ResponsiveDirective> {
    Box::new(ValueDirective::new(element, keys::FLEX_ORDER, FlexOrderStyleBuilder))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fxlayout_core::StyleValue;

    #[test]
    fn test_parse_int_prefix() {
        assert_eq!(parse_int_prefix("3"), Some(3));
        assert_eq!(parse_int_prefix(" -2"), Some(-2));
        assert_eq!(parse_int_prefix("7abc"), Some(7));
        assert_eq!(parse_int_prefix("abc"), None);
        assert_eq!(parse_int_prefix(""), None);
    }

    #[test]
    fn test_order_values() {
        let b = FlexOrderStyleBuilder;
        assert_eq!(b.build_styles("2", &()).get("order"), Some(&StyleValue::Int(2)));
        assert_eq!(b.build_styles("-1", &()).get("order"), Some(&StyleValue::Int(-1)));
        assert!(b.build_styles("0", &()).is_cleared("order"));
        assert!(b.build_styles("", &()).is_cleared("order"));
        assert!(b.build_styles("first", &()).is_cleared("order"));
    }
}
