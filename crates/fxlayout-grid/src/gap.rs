//! gdGap: `grid-gap` of a container, multiplier aware

use fxlayout_core::directive::{ResponsiveDirective, StyleBuilder};
use fxlayout_core::inputs::Feature;
use fxlayout_core::keys;
use fxlayout_core::utils::multiply;
use fxlayout_core::{LayoutConfig, Multiplier, StyleDefinition};
use fxlayout_dom::NodeId;

use crate::grid::{GridDirective, GridParent, INLINE_INPUT};

pub const FEATURE: Feature = Feature::new(keys::GRID_GAP, &["gdGap"]).with_extra_inputs(&[INLINE_INPUT]);

#[derive(Debug, Clone, Default)]
pub struct GridGapStyleBuilder {
    multiplier: Option<Multiplier>,
}

impl GridGapStyleBuilder {
    pub fn new(config: &LayoutConfig) -> Self {
        Self { multiplier: config.multiplier.clone() }
    }
}

impl StyleBuilder for GridGapStyleBuilder {
    type Parent = GridParent;

    fn build_styles(&self, input: &str, parent: &GridParent) -> StyleDefinition {
        StyleDefinition::new()
            .with("display", parent.display())
            .with("grid-gap", multiply(input, self.multiplier.as_ref()))
    }
}

pub fn create(element: NodeId, config: &LayoutConfig) -> Box<dyn ResponsiveDirective> {
    Box::new(GridDirective::new(element, keys::GRID_GAP, GridGapStyleBuilder::new(config)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gap() {
        let css = GridGapStyleBuilder::default().build_styles("10px 5px", &GridParent::default());
        assert_eq!(css.text("grid-gap").as_deref(), Some("10px 5px"));
        assert_eq!(css.text("display").as_deref(), Some("grid"));
    }

    #[test]
    fn test_gap_multiplier() {
        let config = LayoutConfig {
            multiplier: Some(Multiplier { unit: "rem".into(), value: 0.5 }),
            ..LayoutConfig::default()
        };
        let css = GridGapStyleBuilder::new(&config).build_styles("2x 4x", &GridParent::default());
        assert_eq!(css.text("grid-gap").as_deref(), Some("1rem 2rem"));
    }
}
