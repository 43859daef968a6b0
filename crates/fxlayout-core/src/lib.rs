//! fxlayout Core
//!
//! Shared runtime for the responsive layout directives: breakpoint registry,
//! media-query matching, the media marshaller that resolves which
//! breakpoint's value is active per element and key, style application,
//! scoped style caches and the runtime that attaches directives to elements.

pub mod breakpoints;
pub mod cache;
pub mod config;
pub mod directive;
pub mod inputs;
pub mod keys;
pub mod marshaller;
pub mod media;
pub mod prefixer;
pub mod runtime;
pub mod style;
pub mod style_utils;
pub mod utils;

pub use breakpoints::{BreakPoint, BreakPointRegistry, PRINT_ALIAS};
pub use cache::{CacheStats, StyleCache, StyleCaches};
pub use config::{LayoutConfig, Multiplier, Platform};
pub use directive::{
    BaseDirective, Direction, DirectiveContext, ResponsiveDirective, SideEffect, StyleBuilder,
};
pub use inputs::{Feature, InputBinding, InputTable};
pub use keys::DirectiveKey;
pub use marshaller::{ElementMatcher, InputValue, MarshalEvent, MediaMarshaller, Subscriber, Trigger};
pub use media::{MatchMedia, MediaChange, MediaQueryList, MediaType, Viewport};
pub use runtime::{DirectiveFactory, FeatureRegistration, LayoutFamily, LayoutRuntime};
pub use style::{StyleDefinition, StyleValue};
pub use style_utils::{ServerStylesheet, StyleUtils};

pub use fxlayout_dom::{DomError, DomTree, NodeId};

/// Layout runtime error
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("Invalid media query '{query}': {message}")]
    InvalidMediaQuery { query: String, message: String },

    #[error("Unknown input attribute: {0}")]
    UnknownInput(String),

    #[error("No '{key}' directive attached to {element:?}")]
    DirectiveNotAttached { element: NodeId, key: String },

    #[error("DOM error: {0}")]
    Dom(#[from] DomError),

    #[error("Invalid config: {0}")]
    Config(#[from] serde_json::Error),
}
