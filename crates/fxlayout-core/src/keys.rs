//! Directive keys
//!
//! Identify a feature to the marshaller; directives track each other's
//! values through these.

/// Key a directive registers its values under
pub type DirectiveKey = &'static str;

pub const LAYOUT: DirectiveKey = "layout";
pub const LAYOUT_ALIGN: DirectiveKey = "layout-align";
pub const LAYOUT_GAP: DirectiveKey = "layout-gap";
pub const FLEX: DirectiveKey = "flex";
pub const FLEX_ORDER: DirectiveKey = "flex-order";
pub const FLEX_OFFSET: DirectiveKey = "flex-offset";
pub const FLEX_ALIGN: DirectiveKey = "flex-align";
pub const FLEX_FILL: DirectiveKey = "flex-fill";

pub const SHOW_HIDE: DirectiveKey = "show-hide";
pub const IMG_SRC: DirectiveKey = "img-src";
pub const NG_CLASS: DirectiveKey = "ngClass";
pub const NG_STYLE: DirectiveKey = "ngStyle";

pub const GRID_ALIGN: DirectiveKey = "grid-align";
pub const GRID_ALIGN_COLUMNS: DirectiveKey = "grid-align-columns";
pub const GRID_ALIGN_ROWS: DirectiveKey = "grid-align-rows";
pub const GRID_AREA: DirectiveKey = "grid-area";
pub const GRID_AREAS: DirectiveKey = "grid-areas";
pub const GRID_AUTO: DirectiveKey = "grid-auto";
pub const GRID_COLUMN: DirectiveKey = "grid-column";
pub const GRID_COLUMNS: DirectiveKey = "grid-columns";
pub const GRID_GAP: DirectiveKey = "grid-gap";
pub const GRID_ROW: DirectiveKey = "grid-row";
pub const GRID_ROWS: DirectiveKey = "grid-rows";
