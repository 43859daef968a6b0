//! gdAuto: `grid-auto-flow` of a container

use fxlayout_core::directive::{ResponsiveDirective, StyleBuilder};
use fxlayout_core::inputs::Feature;
use fxlayout_core::keys;
use fxlayout_core::{LayoutConfig, StyleDefinition};
use fxlayout_dom::NodeId;

use crate::grid::{GridDirective, GridParent, INLINE_INPUT};

pub const FEATURE: Feature = Feature::new(keys::GRID_AUTO, &["gdAuto"]).with_extra_inputs(&[INLINE_INPUT]);

#[derive(Debug, Clone, Copy, Default)]
pub struct GridAutoStyleBuilder;

impl StyleBuilder for GridAutoStyleBuilder {
    type Parent = GridParent;

    fn build_styles(&self, input: &str, parent: &GridParent) -> StyleDefinition {
        let input = if input.is_empty() { "initial" } else { input };
        let mut parts = input.split(' ');
        let direction = match parts.next().unwrap_or_default() {
            d @ ("column" | "row" | "dense") => d,
            _ => "row",
        };
        let dense = parts.next() == Some("dense") && direction != "dense";

        let flow = if dense { format!("{} dense", direction) } else { direction.to_string() };
        StyleDefinition::new()
            .with("display", parent.display())
            .with("grid-auto-flow", flow)
    }
}

pub fn create(element: NodeId, _config: &LayoutConfig) -> Box<dyn ResponsiveDirective> {
    Box::new(GridDirective::new(element, keys::GRID_AUTO, GridAutoStyleBuilder))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flow(input: &str) -> String {
        GridAutoStyleBuilder.build_styles(input, &GridParent::default())
            .text("grid-auto-flow")
            .unwrap_or_default()
    }

    #[test]
    fn test_auto_flow() {
        assert_eq!(flow(""), "row");
        assert_eq!(flow("column"), "column");
        assert_eq!(flow("column dense"), "column dense");
        assert_eq!(flow("dense dense"), "dense");
        assert_eq!(flow("diagonal dense"), "row dense");
    }
}
