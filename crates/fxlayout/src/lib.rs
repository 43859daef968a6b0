//! fxlayout
//!
//! Responsive layout directives over a DOM tree. Elements carry attributes
//! such as `fxLayout="row"`, `fxFlex.gt-sm="33"` or `gdColumns="1fr 1fr"`;
//! the runtime turns them into inline styles and re-evaluates them whenever
//! the viewport crosses a breakpoint.
//!
//! # Example
//! ```rust,ignore
//! use fxlayout::{LayoutModule, Viewport};
//!
//! let mut runtime = LayoutModule::default().bootstrap(dom)?;
//! runtime.set_viewport(Viewport::screen(1024.0, 768.0));
//! ```

mod module;

pub use module::LayoutModule;

pub use fxlayout_core::{
    BreakPoint, Direction, InputValue, LayoutConfig, LayoutError, LayoutRuntime, Multiplier,
    Platform, StyleDefinition, StyleValue, Viewport,
};
pub use fxlayout_dom::{DomTree, NodeId};

// Re-export sub-crates for advanced usage
pub use fxlayout_core as core;
pub use fxlayout_dom as dom;
#[cfg(feature = "flex")]
pub use fxlayout_flex as flex;
#[cfg(feature = "grid")]
pub use fxlayout_grid as grid;
#[cfg(feature = "extended")]
pub use fxlayout_extended as extended;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
