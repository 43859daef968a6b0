//! Flex basis validation

/// Expand a flex value into `[grow, shrink, basis]`
///
/// A single basis keeps the given grow and shrink; three space-separated
/// parts replace all of them. `calc()` expressions may be preceded by grow
/// and shrink and get their operators spaced out.
pub fn validate_basis(basis: &str, grow: &str, shrink: &str) -> [String; 3] {
    let mut parts = [grow.to_string(), shrink.to_string(), basis.to_string()];

    match basis.find("calc") {
        Some(0) => parts[2] = validate_calc_value(basis.trim()),
        Some(j) => {
            parts[2] = validate_calc_value(basis[j..].trim());
            let prefix: Vec<&str> = basis[..j].trim().split(' ').collect();
            if prefix.len() == 2 {
                parts[0] = prefix[0].to_string();
                parts[1] = prefix[1].to_string();
            }
        }
        None => {
            let matches: Vec<&str> = basis.split(' ').collect();
            if matches.len() == 3 {
                parts = [matches[0].to_string(), matches[1].to_string(), matches[2].to_string()];
            }
        }
    }

    parts
}

/// Strip whitespace and put single spaces around `/ * + -`
fn validate_calc_value(calc: &str) -> String {
    let mut out = String::with_capacity(calc.len() + 8);
    for c in calc.chars().filter(|c| !c.is_whitespace()) {
        if matches!(c, '/' | '*' | '+' | '-') {
            out.push(' ');
            out.push(c);
            out.push(' ');
        } else {
            out.push(c);
        }
    }
    out
}
