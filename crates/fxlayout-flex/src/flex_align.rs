//! fxFlexAlign: `align-self` of a flex item

use fxlayout_core::directive::{ResponsiveDirective, StyleBuilder, ValueDirective};
use fxlayout_core::inputs::Feature;
use fxlayout_core::keys;
use fxlayout_core::{LayoutConfig, StyleDefinition};
use fxlayout_dom::NodeId;

pub const FEATURE: Feature = Feature::new(keys::FLEX_ALIGN, &["fxFlexAlign"]);

#[derive(Debug, Clone, Copy, Default)]
pub struct FlexAlignStyleBuilder;

impl StyleBuilder for FlexAlignStyleBuilder {
    type Parent = ();

    fn build_styles(&self, input: &str, _parent: &()) -> StyleDefinition {
        let align = match input {
            "" => "stretch",
            "start" => "flex-start",
            "end" => "flex-end",
            other => other,
        };
        StyleDefinition::new().with("align-self", align)
    }
}

pub fn create(element: NodeId, _config: &LayoutConfig) -> Box<dyn ResponsiveDirective> {
    Box::new(ValueDirective::new(element, keys::FLEX_ALIGN, FlexAlignStyleBuilder))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_self_values() {
        let b = FlexAlignStyleBuilder;
        let align = |input: &str| b.build_styles(input, &()).text("align-self").unwrap_or_default();
        assert_eq!(align(""), "stretch");
        assert_eq!(align("start"), "flex-start");
        assert_eq!(align("end"), "flex-end");
        assert_eq!(align("baseline"), "baseline");
        assert_eq!(align("center"), "center");
    }
}
