//! fxlayout grid
//!
//! CSS grid directives. Container features (`gdColumns`, `gdRows`,
//! `gdAreas`, `gdAuto`, `gdGap`, `gdAlignColumns`, `gdAlignRows`) also take
//! `gdInline`; item features (`gdArea`, `gdColumn`, `gdRow`, `gdGridAlign`)
//! style a single cell.

pub mod align;
pub mod area;
pub mod auto;
pub mod gap;
pub mod grid;
pub mod placement;
pub mod template;

pub use align::{GridAlignColumnsStyleBuilder, GridAlignRowsStyleBuilder, GridAlignStyleBuilder};
pub use area::{GridAreaStyleBuilder, GridAreasStyleBuilder};
pub use auto::GridAutoStyleBuilder;
pub use gap::GridGapStyleBuilder;
pub use grid::{GridDirective, GridParent};
pub use placement::GridPlacementStyleBuilder;
pub use template::GridTemplateStyleBuilder;

use fxlayout_core::{FeatureRegistration, LayoutFamily};

/// The grid directive family
#[derive(Debug, Clone, Copy, Default)]
pub struct GridModule;

impl LayoutFamily for GridModule {
    fn name(&self) -> &'static str {
        "grid"
    }

    fn registrations(&self) -> Vec<FeatureRegistration> {
        vec![
            FeatureRegistration::new(align::GRID_ALIGN_FEATURE, align::create_grid_align),
            FeatureRegistration::new(align::ALIGN_COLUMNS_FEATURE, align::create_align_columns),
            FeatureRegistration::new(align::ALIGN_ROWS_FEATURE, align::create_align_rows),
            FeatureRegistration::new(area::AREA_FEATURE, area::create_area),
            FeatureRegistration::new(area::AREAS_FEATURE, area::create_areas),
            FeatureRegistration::new(auto::FEATURE, auto::create),
            FeatureRegistration::new(placement::COLUMN_FEATURE, placement::create_column),
            FeatureRegistration::new(template::COLUMNS_FEATURE, template::create_columns),
            FeatureRegistration::new(gap::FEATURE, gap::create),
            FeatureRegistration::new(placement::ROW_FEATURE, placement::create_row),
            FeatureRegistration::new(template::ROWS_FEATURE, template::create_rows),
        ]
    }
}
