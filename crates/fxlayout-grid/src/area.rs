//! Grid areas: `gdArea` names an item's area, `gdAreas` declares the
//! container's template with `|` between rows.

use fxlayout_core::directive::{ResponsiveDirective, StyleBuilder, ValueDirective};
use fxlayout_core::inputs::Feature;
use fxlayout_core::keys;
use fxlayout_core::{LayoutConfig, StyleDefinition};
use fxlayout_dom::NodeId;

use crate::grid::{GridDirective, GridParent, INLINE_INPUT};

pub const AREA_FEATURE: Feature = Feature::new(keys::GRID_AREA, &["gdArea"]);
pub const AREAS_FEATURE: Feature =
    Feature::new(keys::GRID_AREAS, &["gdAreas"]).with_extra_inputs(&[INLINE_INPUT]);

pub const AREA_DELIMITER: char = '|';

#[derive(Debug, Clone, Copy, Default)]
pub struct GridAreaStyleBuilder;

impl StyleBuilder for GridAreaStyleBuilder {
    type Parent = ();

    fn build_styles(&self, input: &str, _parent: &()) -> StyleDefinition {
        let area = if input.is_empty() { "auto" } else { input };
        StyleDefinition::new().with("grid-area", area)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GridAreasStyleBuilder;

impl StyleBuilder for GridAreasStyleBuilder {
    type Parent = GridParent;

    fn build_styles(&self, input: &str, parent: &GridParent) -> StyleDefinition {
        let input = if input.is_empty() { "none" } else { input };
        let areas = input.split(AREA_DELIMITER)
            .map(|row| format!("\"{}\"", row.trim()))
            .collect::<Vec<_>>()
            .join(" ");
        StyleDefinition::new()
            .with("display", parent.display())
            .with("grid-template-areas", areas)
    }
}

pub fn create_area(element: NodeId, _config: &LayoutConfig) -> Box<dyn ResponsiveDirective> {
    Box::new(ValueDirective::new(element, keys::GRID_AREA, GridAreaStyleBuilder))
}

pub fn create_areas(element: NodeId, _config: &LayoutConfig) -> Box<dyn ResponsiveDirective> {
    Box::new(GridDirective::new(element, keys::GRID_AREAS, GridAreasStyleBuilder))
}
