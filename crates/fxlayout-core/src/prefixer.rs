//! Vendor prefixes
//!
//! Adds the `-webkit-` alternatives older flexbox engines need.

use crate::style::{StyleDefinition, StyleValue};

const WEBKIT_COPIED: &[&str] = &[
    "align-items",
    "align-self",
    "align-content",
    "flex",
    "flex-basis",
    "flex-grow",
    "flex-shrink",
    "flex-wrap",
    "justify-content",
    "flex-direction",
];

/// Add `-webkit-` prefixed alternatives to a style map
pub fn apply_css_prefixes(mut target: StyleDefinition) -> StyleDefinition {
    let keys: Vec<String> = target.keys().map(str::to_string).collect();

    for key in keys {
        let Some(value) = target.get(&key).cloned() else {
            continue;
        };

        match key.as_str() {
            "display" => {
                let prefixed = match value.as_text().as_deref() {
                    Some("flex") => Some(StyleValue::Multi(vec!["-webkit-flex".into(), "flex".into()])),
                    Some("inline-flex") => Some(StyleValue::Multi(vec![
                        "-webkit-inline-flex".into(),
                        "inline-flex".into(),
                    ])),
                    _ => None,
                };
                if let Some(prefixed) = prefixed {
                    target.set("display", prefixed);
                }
            }
            "order" => {
                let order = match value {
                    StyleValue::Text(ref text) if !text.trim().is_empty()
                        && text.trim().parse::<f64>().is_err() => StyleValue::from("0"),
                    other => other,
                };
                target.set("-webkit-order", order.clone());
                target.set("order", order);
            }
            name if WEBKIT_COPIED.contains(&name) => {
                target.set(&format!("-webkit-{}", name), value);
            }
            _ => {}
        }
    }

    target
}
