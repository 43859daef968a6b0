//! Layout value validation
//!
//! `fxLayout` values read `<direction> [wrap] [inline]`, with `inline`
//! allowed in the wrap position.

use crate::style::StyleDefinition;

pub const INLINE: &str = "inline";

/// Accepted flex directions; the first is the fallback
pub const LAYOUT_VALUES: &[&str] = &["row", "column", "row-reverse", "column-reverse"];

/// Split a layout value into `(direction, wrap, inline)`
pub fn validate_value(value: &str) -> (String, String, bool) {
    let lowered = value.to_lowercase();
    let mut parts = lowered.split_whitespace();
    let mut direction = parts.next().unwrap_or_default().to_string();
    let mut wrap = parts.next().unwrap_or_default().to_string();
    let mut inline = parts.next().unwrap_or_default().to_string();

    if !LAYOUT_VALUES.contains(&direction.as_str()) {
        direction = LAYOUT_VALUES[0].to_string();
    }

    if wrap == INLINE {
        wrap = if inline != INLINE { inline } else { String::new() };
        inline = INLINE.to_string();
    }

    (direction, validate_wrap_value(&wrap), !inline.is_empty())
}

/// Whether the layout flows horizontally
pub fn is_flow_horizontal(value: &str) -> bool {
    let (flow, _, _) = validate_value(value);
    flow.contains("row")
}

/// Normalise a wrap keyword; anything unrecognised means `wrap`
pub fn validate_wrap_value(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    match value.to_lowercase().as_str() {
        "reverse" | "wrap-reverse" | "reverse-wrap" => "wrap-reverse",
        "no" | "none" | "nowrap" => "nowrap",
        _ => "wrap",
    }
    .to_string()
}

/// Container styles for a layout value
pub fn build_layout_css(value: &str) -> StyleDefinition {
    let (direction, wrap, inline) = validate_value(value);
    let mut css = StyleDefinition::new()
        .with("display", if inline { "inline-flex" } else { "flex" })
        .with("box-sizing", "border-box")
        .with("flex-direction", direction);
    if wrap.is_empty() {
        css.clear("flex-wrap");
    } else {
        css.set("flex-wrap", wrap);
    }
    css
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_value() {
        assert_eq!(validate_value("column wrap"), ("column".into(), "wrap".into(), false));
        assert_eq!(validate_value("diagonal"), ("row".into(), String::new(), false));
        assert_eq!(validate_value("row inline"), ("row".into(), String::new(), true));
        assert_eq!(validate_value("row inline reverse"), ("row".into(), "wrap-reverse".into(), true));
        assert_eq!(validate_value("ROW-REVERSE none"), ("row-reverse".into(), "nowrap".into(), false));
    }

    #[test]
    fn test_flow_horizontal() {
        assert!(is_flow_horizontal("row-reverse"));
        assert!(!is_flow_horizontal("column"));
        assert!(is_flow_horizontal(""));
    }

    #[test]
    fn test_build_layout_css() {
        let css = build_layout_css("column inline");
        assert_eq!(css.text("display").as_deref(), Some("inline-flex"));
        assert_eq!(css.text("flex-direction").as_deref(), Some("column"));
        assert!(css.is_cleared("flex-wrap"));
        assert_eq!(css.text("box-sizing").as_deref(), Some("border-box"));
    }
}
