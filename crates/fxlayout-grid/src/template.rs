//! Track templates: `gdColumns` and `gdRows`
//!
//! A trailing `!` sizes implicit tracks (`grid-auto-*`) instead of
//! declaring explicit ones (`grid-template-*`). The unused property is
//! always emptied.

use fxlayout_core::directive::{ResponsiveDirective, StyleBuilder};
use fxlayout_core::inputs::Feature;
use fxlayout_core::keys;
use fxlayout_core::{LayoutConfig, StyleDefinition};
use fxlayout_dom::NodeId;

use crate::grid::{GridDirective, GridParent, INLINE_INPUT};

pub const COLUMNS_FEATURE: Feature =
    Feature::new(keys::GRID_COLUMNS, &["gdColumns"]).with_extra_inputs(&[INLINE_INPUT]);
pub const ROWS_FEATURE: Feature =
    Feature::new(keys::GRID_ROWS, &["gdRows"]).with_extra_inputs(&[INLINE_INPUT]);

pub const AUTO_SPECIFIER: char = '!';

#[derive(Debug, Clone, Copy)]
pub struct GridTemplateStyleBuilder {
    template: &'static str,
    auto: &'static str,
}

impl GridTemplateStyleBuilder {
    pub const COLUMNS: Self = Self { template: "grid-template-columns", auto: "grid-auto-columns" };
    pub const ROWS: Self = Self { template: "grid-template-rows", auto: "grid-auto-rows" };
}

impl StyleBuilder for GridTemplateStyleBuilder {
    type Parent = GridParent;

    fn build_styles(&self, input: &str, parent: &GridParent) -> StyleDefinition {
        let input = if input.is_empty() { "none" } else { input };
        let (tracks, auto) = match input.strip_suffix(AUTO_SPECIFIER) {
            Some(tracks) => (tracks, true),
            None => (input, false),
        };

        let mut css = StyleDefinition::new().with("display", parent.display());
        css.clear(self.auto);
        css.clear(self.template);
        css.set(if auto { self.auto } else { self.template }, tracks);
        css
    }
}

pub fn create_columns(element: NodeId, _config: &LayoutConfig) -> Box<dyn ResponsiveDirective> {
    Box::new(GridDirective::new(element, keys::GRID_COLUMNS, GridTemplateStyleBuilder::COLUMNS))
}

pub fn create_rows(element: NodeId, _config: &LayoutConfig) -> Box<dyn ResponsiveDirective> {
    Box::new(GridDirective::new(element, keys::GRID_ROWS, GridTemplateStyleBuilder::ROWS))
}
