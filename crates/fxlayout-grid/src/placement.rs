//! Item placement: `gdColumn` and `gdRow`

use fxlayout_core::directive::{ResponsiveDirective, StyleBuilder, ValueDirective};
use fxlayout_core::inputs::Feature;
use fxlayout_core::keys;
use fxlayout_core::{LayoutConfig, StyleDefinition};
use fxlayout_dom::NodeId;

pub const COLUMN_FEATURE: Feature = Feature::new(keys::GRID_COLUMN, &["gdColumn"]);
pub const ROW_FEATURE: Feature = Feature::new(keys::GRID_ROW, &["gdRow"]);

/// Writes one placement property, `auto` when empty
#[derive(Debug, Clone, Copy)]
pub struct GridPlacementStyleBuilder {
    property: &'static str,
}

impl GridPlacementStyleBuilder {
    pub const COLUMN: Self = Self { property: "grid-column" };
    pub const ROW: Self = Self { property: "grid-row" };
}

impl StyleBuilder for GridPlacementStyleBuilder {
    type Parent = ();

    fn build_styles(&self, input: &str, _parent: &()) -> StyleDefinition {
        let value = if input.is_empty() { "auto" } else { input };
        StyleDefinition::new().with(self.property, value)
    }
}

pub fn create_column(element: NodeId, _config: &LayoutConfig) -> Box<dyn ResponsiveDirective> {
    Box::new(ValueDirective::new(element, keys::GRID_COLUMN, GridPlacementStyleBuilder::COLUMN))
}

pub fn create_row(element: NodeId, _config: &LayoutConfig) -> Box<dyn ResponsiveDirective> {
    Box::new(ValueDirective::new(element, keys::GRID_ROW, GridPlacementStyleBuilder::ROW))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placement() {
        let css = GridPlacementStyleBuilder::COLUMN.build_styles("1 / 3", &());
        assert_eq!(css.text("grid-column").as_deref(), Some("1 / 3"));

        let css = GridPlacementStyleBuilder::ROW.build_styles("", &());
        assert_eq!(css.text("grid-row").as_deref(), Some("auto"));
    }
}
