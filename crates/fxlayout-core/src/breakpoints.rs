//! Breakpoints
//!
//! Named media-query ranges. Each alias also names the suffix of the
//! responsive attribute variants (`fxFlex.gt-sm`).

use serde::{Deserialize, Serialize};

use crate::config::LayoutConfig;

/// Alias of the print breakpoint
pub const PRINT_ALIAS: &str = "print";

/// A named media-query range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakPoint {
    pub alias: String,
    pub media_query: String,
    /// Higher priority wins when several breakpoints are active
    #[serde(default)]
    pub priority: i32,
    /// Range overlaps other breakpoints (lt-*, gt-*)
    #[serde(default)]
    pub overlapping: bool,
}

impl BreakPoint {
    pub fn new(alias: &str, media_query: &str, priority: i32, overlapping: bool) -> Self {
        Self {
            alias: alias.to_string(),
            media_query: media_query.to_string(),
            priority,
            overlapping,
        }
    }
}

const DEFAULT_BREAKPOINTS: &[(&str, &str, i32, bool)] = &[
    ("xs", "screen and (min-width: 0px) and (max-width: 599.98px)", 1000, false),
    ("sm", "screen and (min-width: 600px) and (max-width: 959.98px)", 900, false),
    ("md", "screen and (min-width: 960px) and (max-width: 1279.98px)", 800, false),
    ("lg", "screen and (min-width: 1280px) and (max-width: 1919.98px)", 700, false),
    ("xl", "screen and (min-width: 1920px) and (max-width: 4999.98px)", 600, false),
    ("lt-sm", "screen and (max-width: 599.98px)", 950, true),
    ("lt-md", "screen and (max-width: 959.98px)", 850, true),
    ("lt-lg", "screen and (max-width: 1279.98px)", 750, true),
    ("lt-xl", "screen and (max-width: 1919.98px)", 650, true),
    ("gt-xs", "screen and (min-width: 600px)", -950, true),
    ("gt-sm", "screen and (min-width: 960px)", -850, true),
    ("gt-md", "screen and (min-width: 1280px)", -750, true),
    ("gt-lg", "screen and (min-width: 1920px)", -650, true),
];

/// Print outranks every screen alias
const PRINT_PRIORITY: i32 = 2000;

/// The built-in screen breakpoints
pub fn default_breakpoints() -> Vec<BreakPoint> {
    DEFAULT_BREAKPOINTS.iter()
        .map(|(alias, query, priority, overlapping)| BreakPoint::new(alias, query, *priority, *overlapping))
        .collect()
}

/// The print breakpoint
pub fn print_breakpoint() -> BreakPoint {
    BreakPoint::new(PRINT_ALIAS, "print", PRINT_PRIORITY, false)
}

/// Order by descending priority (activation order)
pub fn sort_descending_priority(a: &BreakPoint, b: &BreakPoint) -> std::cmp::Ordering {
    b.priority.cmp(&a.priority)
}

/// Order by ascending priority (registry order)
pub fn sort_ascending_priority(a: &BreakPoint, b: &BreakPoint) -> std::cmp::Ordering {
    a.priority.cmp(&b.priority)
}

/// All breakpoints known to a runtime
#[derive(Debug, Clone, Default)]
pub struct BreakPointRegistry {
    items: Vec<BreakPoint>,
}

impl BreakPointRegistry {
    pub fn new(mut items: Vec<BreakPoint>) -> Self {
        items.sort_by(sort_ascending_priority);
        Self { items }
    }

    /// Defaults (unless disabled), print, then custom breakpoints merged in
    pub fn from_config(config: &LayoutConfig) -> Self {
        let mut items = if config.disable_default_bps {
            Vec::new()
        } else {
            default_breakpoints()
        };
        items.push(print_breakpoint());

        for custom in &config.breakpoints {
            match items.iter_mut().find(|bp| bp.alias == custom.alias) {
                Some(existing) => *existing = custom.clone(),
                None => items.push(custom.clone()),
            }
        }

        Self::new(items)
    }

    pub fn items(&self) -> &[BreakPoint] {
        &self.items
    }

    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|bp| bp.alias.as_str())
    }

    pub fn find_by_alias(&self, alias: &str) -> Option<&BreakPoint> {
        self.items.iter().find(|bp| bp.alias == alias)
    }

    pub fn find_by_query(&self, query: &str) -> Option<&BreakPoint> {
        self.items.iter().find(|bp| bp.media_query == query)
    }

    /// Breakpoints whose ranges overlap others
    pub fn overlappings(&self) -> impl Iterator<Item = &BreakPoint> {
        self.items.iter().filter(|bp| bp.overlapping)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
