//! Style caches
//!
//! Memoizes builder output per input string. Each scope names one builder
//! together with every piece of context its output depends on (parent
//! direction, wrap, rtl, inline), so a hit always equals a fresh build.

use std::collections::HashMap;

use fxlayout_dom::NodeId;

use crate::style::StyleDefinition;

/// One scope's input -> styles memo
#[derive(Debug, Default)]
pub struct StyleCache {
    cache: HashMap<String, StyleDefinition>,
    /// Cache hits counter
    hits: u64,
    /// Cache misses counter
    misses: u64,
}

impl StyleCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up cached styles
    pub fn get(&mut self, input: &str) -> Option<StyleDefinition> {
        if let Some(styles) = self.cache.get(input) {
            self.hits += 1;
            Some(styles.clone())
        } else {
            self.misses += 1;
            None
        }
    }

    pub fn insert(&mut self, input: &str, styles: StyleDefinition) {
        self.cache.insert(input.to_string(), styles);
    }

    /// Get or compute styles
    pub fn get_or_insert_with<F>(&mut self, input: &str, compute: F) -> StyleDefinition
    where
        F: FnOnce() -> StyleDefinition,
    {
        if let Some(cached) = self.get(input) {
            return cached;
        }

        let styles = compute();
        self.insert(input, styles.clone());
        styles
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.cache.len(),
            hits: self.hits,
            misses: self.misses,
            hit_rate: if self.hits + self.misses > 0 {
                self.hits as f64 / (self.hits + self.misses) as f64
            } else {
                0.0
            },
        }
    }

    /// Clear the cache
    pub fn clear(&mut self) {
        self.cache.clear();
        self.hits = 0;
        self.misses = 0;
    }
}

/// Cache statistics
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheStats {
    pub size: usize,
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
}

/// All style caches of a runtime, plus the original display of elements
/// seen by show/hide
#[derive(Debug, Default)]
pub struct StyleCaches {
    scopes: HashMap<String, StyleCache>,
    display_map: HashMap<NodeId, String>,
}

impl StyleCaches {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cache for a scope, created on first use
    pub fn scope(&mut self, name: &str) -> &mut StyleCache {
        self.scopes.entry(name.to_string()).or_default()
    }

    pub fn stats(&self, name: &str) -> Option<CacheStats> {
        self.scopes.get(name).map(StyleCache::stats)
    }

    /// Names of the scopes created so far
    pub fn scope_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.scopes.keys().map(String::as_str).collect();
        names.sort();
        names
    }

    /// Original display of an element, if recorded
    pub fn display_of(&self, element: NodeId) -> Option<&str> {
        self.display_map.get(&element).map(String::as_str)
    }

    /// Record the original display; the first recording sticks
    pub fn record_display(&mut self, element: NodeId, display: &str) {
        self.display_map.entry(element).or_insert_with(|| display.to_string());
    }

    pub fn forget_element(&mut self, element: NodeId) {
        self.display_map.remove(&element);
    }

    /// Drop every scope and the display map
    pub fn clear(&mut self) {
        self.scopes.clear();
        self.display_map.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_or_insert_counts() {
        let mut cache = StyleCache::new();
        let mut builds = 0;
        for _ in 0..3 {
            cache.get_or_insert_with("1 1 100%", || {
                builds += 1;
                StyleDefinition::new().with("flex", "1 1 100%")
            });
        }
        assert_eq!(builds, 1);
        let stats = cache.stats();
        assert_eq!(stats.size, 1);
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn test_scopes_are_separate() {
        let mut caches = StyleCaches::new();
        caches.scope("flex-row-nowrap").insert("50", StyleDefinition::new().with("max-width", "50%"));
        caches.scope("flex-column-nowrap").insert("50", StyleDefinition::new().with("max-height", "50%"));

        let row = caches.scope("flex-row-nowrap").get("50").unwrap();
        assert!(row.contains("max-width"));
        assert_eq!(caches.scope_names(), vec!["flex-column-nowrap", "flex-row-nowrap"]);
    }

    #[test]
    fn test_display_map_keeps_first() {
        let mut caches = StyleCaches::new();
        let id = fxlayout_dom::DomTree::new().root();
        caches.record_display(id, "flex");
        caches.record_display(id, "block");
        assert_eq!(caches.display_of(id), Some("flex"));

        caches.clear();
        assert_eq!(caches.display_of(id), None);
    }
}
