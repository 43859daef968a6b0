//! Media Queries
//!
//! Just enough media-query support to evaluate breakpoint ranges against a
//! viewport: a media type plus width/height/orientation features joined by
//! `and`, with comma-separated alternatives.

use std::collections::HashSet;

use crate::LayoutError;
use crate::breakpoints::BreakPointRegistry;

/// Media type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MediaType {
    #[default]
    All,
    Screen,
    Print,
}

/// Orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

/// One media feature test
#[derive(Debug, Clone, PartialEq)]
pub enum MediaFeature {
    MinWidth(f32),
    MaxWidth(f32),
    MinHeight(f32),
    MaxHeight(f32),
    Orientation(Orientation),
}

/// A single media query (`screen and (min-width: 600px)`)
#[derive(Debug, Clone, PartialEq)]
pub struct MediaQuery {
    pub media_type: MediaType,
    pub features: Vec<MediaFeature>,
}

/// Comma-separated alternatives; matches when any query matches
#[derive(Debug, Clone, PartialEq)]
pub struct MediaQueryList {
    pub queries: Vec<MediaQuery>,
}

/// The rendering surface queries are evaluated against
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub media_type: MediaType,
}

impl Viewport {
    pub fn screen(width: f32, height: f32) -> Self {
        Self { width, height, media_type: MediaType::Screen }
    }

    pub fn print(width: f32, height: f32) -> Self {
        Self { width, height, media_type: MediaType::Print }
    }

    pub fn orientation(&self) -> Orientation {
        if self.width > self.height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }

    fn as_screen(&self) -> Self {
        Self { media_type: MediaType::Screen, ..*self }
    }
}

fn invalid(query: &str, message: impl Into<String>) -> LayoutError {
    LayoutError::InvalidMediaQuery {
        query: query.to_string(),
        message: message.into(),
    }
}

fn parse_length(query: &str, value: &str) -> Result<f32, LayoutError> {
    let value = value.trim();
    let (number, scale) = if let Some(n) = value.strip_suffix("px") {
        (n, 1.0)
    } else if let Some(n) = value.strip_suffix("rem") {
        (n, 16.0)
    } else if let Some(n) = value.strip_suffix("em") {
        (n, 16.0)
    } else {
        (value, 1.0)
    };
    number.trim()
        .parse::<f32>()
        .map(|n| n * scale)
        .map_err(|_| invalid(query, format!("bad length '{}'", value)))
}

impl MediaFeature {
    fn parse(query: &str, text: &str) -> Result<Self, LayoutError> {
        let inner = text.trim()
            .strip_prefix('(')
            .and_then(|t| t.strip_suffix(')'))
            .ok_or_else(|| invalid(query, format!("expected '(feature: value)', got '{}'", text)))?;
        let (name, value) = inner.split_once(':')
            .ok_or_else(|| invalid(query, format!("missing ':' in '{}'", inner)))?;

        Ok(match name.trim() {
            "min-width" => Self::MinWidth(parse_length(query, value)?),
            "max-width" => Self::MaxWidth(parse_length(query, value)?),
            "min-height" => Self::MinHeight(parse_length(query, value)?),
            "max-height" => Self::MaxHeight(parse_length(query, value)?),
            "orientation" => match value.trim() {
                "portrait" => Self::Orientation(Orientation::Portrait),
                "landscape" => Self::Orientation(Orientation::Landscape),
                other => return Err(invalid(query, format!("unknown orientation '{}'", other))),
            },
            other => return Err(invalid(query, format!("unsupported feature '{}'", other))),
        })
    }

    fn matches(&self, viewport: &Viewport) -> bool {
        match self {
            Self::MinWidth(w) => viewport.width >= *w,
            Self::MaxWidth(w) => viewport.width <= *w,
            Self::MinHeight(h) => viewport.height >= *h,
            Self::MaxHeight(h) => viewport.height <= *h,
            Self::Orientation(o) => viewport.orientation() == *o,
        }
    }
}

impl MediaQuery {
    fn parse(full: &str, text: &str) -> Result<Self, LayoutError> {
        let mut media_type = MediaType::All;
        let mut features = Vec::new();

        for (i, part) in text.split(" and ").enumerate() {
            let part = part.trim();
            let part = part.strip_prefix("only ").unwrap_or(part).trim();
            if part.starts_with('(') {
                features.push(MediaFeature::parse(full, part)?);
                continue;
            }
            if i > 0 {
                return Err(invalid(full, format!("media type '{}' must come first", part)));
            }
            media_type = match part {
                "all" => MediaType::All,
                "screen" => MediaType::Screen,
                "print" => MediaType::Print,
                other => return Err(invalid(full, format!("unsupported media type '{}'", other))),
            };
        }

        Ok(Self { media_type, features })
    }

    pub fn matches(&self, viewport: &Viewport) -> bool {
        let type_ok = match self.media_type {
            MediaType::All => true,
            other => other == viewport.media_type,
        };
        type_ok && self.features.iter().all(|f| f.matches(viewport))
    }
}

impl MediaQueryList {
    pub fn parse(text: &str) -> Result<Self, LayoutError> {
        let lowered = text.trim().to_ascii_lowercase();
        if lowered.is_empty() {
            return Err(invalid(text, "empty query"));
        }
        let queries = lowered.split(',')
            .map(|q| MediaQuery::parse(text, q))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { queries })
    }

    pub fn matches(&self, viewport: &Viewport) -> bool {
        self.queries.iter().any(|q| q.matches(viewport))
    }
}

/// Activation or deactivation of one breakpoint's media query
#[derive(Debug, Clone, PartialEq)]
pub struct MediaChange {
    pub matches: bool,
    pub media_query: String,
    pub mq_alias: String,
    pub priority: i32,
}

#[derive(Debug)]
struct MediaEntry {
    alias: String,
    media_query: String,
    priority: i32,
    list: MediaQueryList,
    /// Evaluated as screen while printing
    keep_when_printing: bool,
}

/// Tracks which breakpoint queries currently match the viewport
#[derive(Debug)]
pub struct MatchMedia {
    entries: Vec<MediaEntry>,
    active: HashSet<String>,
}

impl MatchMedia {
    pub fn new(registry: &BreakPointRegistry, print_with_breakpoints: &[String]) -> Result<Self, LayoutError> {
        let entries = registry.items().iter()
            .map(|bp| {
                Ok(MediaEntry {
                    alias: bp.alias.clone(),
                    media_query: bp.media_query.clone(),
                    priority: bp.priority,
                    list: MediaQueryList::parse(&bp.media_query)?,
                    keep_when_printing: print_with_breakpoints.contains(&bp.alias),
                })
            })
            .collect::<Result<Vec<_>, LayoutError>>()?;

        Ok(Self { entries, active: HashSet::new() })
    }

    /// Evaluate every query, returning the changes (deactivations first)
    pub fn evaluate(&mut self, viewport: &Viewport) -> Vec<MediaChange> {
        let mut deactivated = Vec::new();
        let mut activated = Vec::new();

        for entry in &self.entries {
            let target = if viewport.media_type == MediaType::Print && entry.keep_when_printing {
                viewport.as_screen()
            } else {
                *viewport
            };
            let matches = entry.list.matches(&target) || (entry.keep_when_printing
                && viewport.media_type == MediaType::Print
                && entry.list.matches(viewport));
            let was_active = self.active.contains(&entry.media_query);

            if matches == was_active {
                continue;
            }
            let change = MediaChange {
                matches,
                media_query: entry.media_query.clone(),
                mq_alias: entry.alias.clone(),
                priority: entry.priority,
            };
            if matches {
                self.active.insert(entry.media_query.clone());
                activated.push(change);
            } else {
                self.active.remove(&entry.media_query);
                deactivated.push(change);
            }
        }

        deactivated.extend(activated);
        deactivated
    }

    /// Whether a media query currently matches
    pub fn is_active(&self, media_query: &str) -> bool {
        self.active.contains(media_query)
    }

    /// Aliases of the currently matching breakpoints
    pub fn active_aliases(&self) -> Vec<&str> {
        self.entries.iter()
            .filter(|e| self.active.contains(&e.media_query))
            .map(|e| e.alias.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;

    #[test]
    fn test_parse_breakpoint_query() {
        let list = MediaQueryList::parse("screen and (min-width: 600px) and (max-width: 959.98px)").unwrap();
        assert_eq!(list.queries.len(), 1);
        assert_eq!(list.queries[0].media_type, MediaType::Screen);
        assert_eq!(list.queries[0].features, vec![
            MediaFeature::MinWidth(600.0),
            MediaFeature::MaxWidth(959.98),
        ]);
    }

    #[test]
    fn test_query_matching() {
        let list = MediaQueryList::parse("screen and (max-width: 599.98px)").unwrap();
        assert!(list.matches(&Viewport::screen(400.0, 800.0)));
        assert!(!list.matches(&Viewport::screen(600.0, 800.0)));
        assert!(!list.matches(&Viewport::print(400.0, 800.0)));
    }

    #[test]
    fn test_orientation_and_alternatives() {
        let list = MediaQueryList::parse("(orientation: landscape), print").unwrap();
        assert!(list.matches(&Viewport::screen(800.0, 600.0)));
        assert!(!list.matches(&Viewport::screen(600.0, 800.0)));
        assert!(list.matches(&Viewport::print(600.0, 800.0)));
    }

    #[test]
    fn test_invalid_queries() {
        assert!(MediaQueryList::parse("").is_err());
        assert!(MediaQueryList::parse("screen and (min-width 600px)").is_err());
        assert!(MediaQueryList::parse("tv").is_err());
        assert!(MediaQueryList::parse("screen and (color: 8)").is_err());
    }

    #[test]
    fn test_match_media_changes() {
        let registry = BreakPointRegistry::from_config(&LayoutConfig::default());
        let mut media = MatchMedia::new(&registry, &[]).unwrap();

        let changes = media.evaluate(&Viewport::screen(1024.0, 768.0));
        let mut aliases: Vec<_> = changes.iter().map(|c| c.mq_alias.as_str()).collect();
        aliases.sort();
        assert_eq!(aliases, vec!["gt-sm", "gt-xs", "lt-lg", "lt-xl", "md"]);
        assert!(changes.iter().all(|c| c.matches));

        // Same viewport again: nothing changes
        assert!(media.evaluate(&Viewport::screen(1024.0, 768.0)).is_empty());

        let changes = media.evaluate(&Viewport::screen(700.0, 768.0));
        let off: Vec<_> = changes.iter().filter(|c| !c.matches).map(|c| c.mq_alias.as_str()).collect();
        let on: Vec<_> = changes.iter().filter(|c| c.matches).map(|c| c.mq_alias.as_str()).collect();
        assert_eq!(off.len(), 2);
        assert!(off.contains(&"md") && off.contains(&"gt-sm"));
        assert!(on.contains(&"sm") && on.contains(&"lt-md"));
        assert!(!changes[0].matches, "deactivations come first");
    }

    #[test]
    fn test_print_keeps_listed_breakpoints() {
        let registry = BreakPointRegistry::from_config(&LayoutConfig::default());
        let mut media = MatchMedia::new(&registry, &["md".to_string()]).unwrap();
        media.evaluate(&Viewport::screen(1024.0, 768.0));

        media.evaluate(&Viewport::print(1024.0, 768.0));
        let active = media.active_aliases();
        assert!(active.contains(&"print"));
        assert!(active.contains(&"md"));
        assert!(!active.contains(&"gt-sm"));
    }
}
