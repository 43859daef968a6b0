//! Grid alignment
//!
//! `gdGridAlign` places one item in its cell; `gdAlignColumns` and
//! `gdAlignRows` align the tracks of a container.

use fxlayout_core::directive::{ResponsiveDirective, StyleBuilder, ValueDirective};
use fxlayout_core::inputs::Feature;
use fxlayout_core::keys;
use fxlayout_core::{LayoutConfig, StyleDefinition};
use fxlayout_dom::NodeId;

use crate::grid::{GridDirective, GridParent, INLINE_INPUT};

pub const GRID_ALIGN_FEATURE: Feature = Feature::new(keys::GRID_ALIGN, &["gdGridAlign"]);
pub const ALIGN_COLUMNS_FEATURE: Feature =
    Feature::new(keys::GRID_ALIGN_COLUMNS, &["gdAlignColumns"]).with_extra_inputs(&[INLINE_INPUT]);
pub const ALIGN_ROWS_FEATURE: Feature =
    Feature::new(keys::GRID_ALIGN_ROWS, &["gdAlignRows"]).with_extra_inputs(&[INLINE_INPUT]);

const SELF_DEFAULT: &str = "stretch";
const TRACK_MAIN_DEFAULT: &str = "start";
const TRACK_CROSS_DEFAULT: &str = "stretch";

fn split_axes(input: &str) -> (&str, &str) {
    let mut parts = input.split(' ');
    (parts.next().unwrap_or_default(), parts.next().unwrap_or_default())
}

fn self_alignment(value: &str) -> &str {
    match value {
        "start" | "center" | "end" | "stretch" => value,
        _ => SELF_DEFAULT,
    }
}

fn track_distribution(value: &str) -> &str {
    match value {
        "center" | "space-around" | "space-between" | "space-evenly" | "end" | "start" | "stretch" => value,
        _ => TRACK_MAIN_DEFAULT,
    }
}

fn track_items(value: &str) -> &str {
    match value {
        "start" | "center" | "end" | "stretch" => value,
        _ => TRACK_CROSS_DEFAULT,
    }
}

/// `justify-self` and `align-self` of a grid item
#[derive(Debug, Clone, Copy, Default)]
pub struct GridAlignStyleBuilder;

impl StyleBuilder for GridAlignStyleBuilder {
    type Parent = ();

    fn build_styles(&self, input: &str, _parent: &()) -> StyleDefinition {
        let input = if input.is_empty() { SELF_DEFAULT } else { input };
        let (row_axis, column_axis) = split_axes(input);
        StyleDefinition::new()
            .with("justify-self", self_alignment(row_axis))
            .with("align-self", self_alignment(column_axis))
    }
}

/// `align-content` and `align-items` of a grid container
#[derive(Debug, Clone, Copy, Default)]
pub struct GridAlignColumnsStyleBuilder;

impl StyleBuilder for GridAlignColumnsStyleBuilder {
    type Parent = GridParent;

    fn build_styles(&self, input: &str, parent: &GridParent) -> StyleDefinition {
        let (main_axis, cross_axis) = split_axes(input);
        StyleDefinition::new()
            .with("align-content", track_distribution(main_axis))
            .with("align-items", track_items(cross_axis))
            .with("display", parent.display())
    }
}

/// `justify-content` and `justify-items` of a grid container
#[derive(Debug, Clone, Copy, Default)]
pub struct GridAlignRowsStyleBuilder;

impl StyleBuilder for GridAlignRowsStyleBuilder {
    type Parent = GridParent;

    fn build_styles(&self, input: &str, parent: &GridParent) -> StyleDefinition {
        let (main_axis, cross_axis) = split_axes(input);
        StyleDefinition::new()
            .with("justify-content", track_distribution(main_axis))
            .with("justify-items", track_items(cross_axis))
            .with("display", parent.display())
    }
}

pub fn create_grid_align(element: NodeId, _config: &LayoutConfig) -> Box<dyn ResponsiveDirective> {
    Box::new(ValueDirective::new(element, keys::GRID_ALIGN, GridAlignStyleBuilder))
}

pub fn create_align_columns(element: NodeId, _config: &LayoutConfig) -> Box<dyn ResponsiveDirective> {
    Box::new(GridDirective::new(element, keys::GRID_ALIGN_COLUMNS, GridAlignColumnsStyleBuilder))
}

pub fn create_align_rows(element: NodeId, _config: &LayoutConfig) -> Box<dyn ResponsiveDirective> {
    Box::new(GridDirective::new(element, keys::GRID_ALIGN_ROWS, GridAlignRowsStyleBuilder))
}
