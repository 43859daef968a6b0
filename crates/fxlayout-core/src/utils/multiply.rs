//! Unit multiplier for `<n>x` values

use crate::config::Multiplier;

const MULTIPLIER_SUFFIX: &str = "x";

/// Replace every `<n>x` part with `n * multiplier` in the multiplier's unit
pub fn multiply(value: &str, multiplier: Option<&Multiplier>) -> String {
    let Some(multiplier) = multiplier else {
        return value.to_string();
    };

    let transform = |part: &str| -> String {
        part.strip_suffix(MULTIPLIER_SUFFIX)
            .and_then(|n| n.parse::<f64>().ok())
            .map(|n| format!("{}{}", n * multiplier.value, multiplier.unit))
            .unwrap_or_else(|| part.to_string())
    };

    value.split(' ').map(transform).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eight_px() -> Multiplier {
        Multiplier { unit: "px".into(), value: 8.0 }
    }

    #[test]
    fn test_without_multiplier() {
        assert_eq!(multiply("2x", None), "2x");
    }

    #[test]
    fn test_multiplied_parts() {
        let m = eight_px();
        assert_eq!(multiply("2x", Some(&m)), "16px");
        assert_eq!(multiply("1.5x 10px", Some(&m)), "12px 10px");
        assert_eq!(multiply("box", Some(&m)), "box");
    }
}
