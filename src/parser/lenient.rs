//! Split-based coordinate parsing that never fails
//!
//! Square brackets are normalized to round ones and spaces removed, the string
//! is split on `),(`, the first `(` and `)` of every piece is stripped, and
//! each piece is split on `,`. Numbers are read with `parseFloat` semantics:
//! the longest numeric prefix wins, and a piece with no numeric prefix (or a
//! missing second value) becomes NaN.

use super::grammar::RawPair;

/// Parse a coordinate string leniently into raw pairs
pub fn parse_pairs(input: &str) -> Vec<RawPair> {
    let normalized: String = input
        .chars()
        .filter(|c| *c != ' ')
        .map(|c| match c {
            '[' => '(',
            ']' => ')',
            other => other,
        })
        .collect();

    if normalized.is_empty() {
        return Vec::new();
    }

    let mut pieces: Vec<String> = normalized.split("),(").map(str::to_string).collect();

    // The outer ends carry one extra bracket, e.g. "((1,2" or "3,4))"
    if let Some(first) = pieces.first_mut() {
        *first = first.replacen('(', "", 1);
    }
    if let Some(last) = pieces.last_mut() {
        *last = last.replacen(')', "", 1);
    }

    pieces
        .iter()
        .map(|piece| {
            let piece = piece.replacen('(', "", 1).replacen(')', "", 1);
            let mut parts = piece.split(',');
            let first = parts.next().map(parse_float).unwrap_or(f64::NAN);
            let second = parts.next().map(parse_float).unwrap_or(f64::NAN);
            RawPair { first, second }
        })
        .collect()
}

/// Read the longest numeric prefix of `s`, ignoring leading whitespace
///
/// Mirrors `parseFloat`: `"12abc"` is 12, `"abc"` is NaN, `"Infinity"` is
/// infinite.
pub fn parse_float(s: &str) -> f64 {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    if s[end..].starts_with("Infinity") {
        return if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return f64::NAN;
    }

    // Exponent only counts when at least one digit follows it
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(input: &str) -> Vec<(f64, f64)> {
        parse_pairs(input)
            .into_iter()
            .map(|p| (p.first, p.second))
            .collect()
    }

    #[test]
    fn test_both_bracket_styles() {
        assert_eq!(pairs("(1,2),(3,4)"), vec![(1.0, 2.0), (3.0, 4.0)]);
        assert_eq!(pairs("[1,2],[3,4]"), vec![(1.0, 2.0), (3.0, 4.0)]);
    }

    #[test]
    fn test_enclosing_brackets() {
        assert_eq!(pairs("[[1,2],[3,4]]"), vec![(1.0, 2.0), (3.0, 4.0)]);
    }

    #[test]
    fn test_spaces_removed() {
        assert_eq!(pairs("(52.1, 4.3), (52.2, 4.4)").len(), 2);
    }

    #[test]
    fn test_malformed_value_is_nan() {
        let result = pairs("(1,2),(3,x)");
        assert_eq!(result[0], (1.0, 2.0));
        assert_eq!(result[1].0, 3.0);
        assert!(result[1].1.is_nan());
    }

    #[test]
    fn test_missing_second_value_is_nan() {
        let result = pairs("(5)");
        assert_eq!(result[0].0, 5.0);
        assert!(result[0].1.is_nan());
    }

    #[test]
    fn test_empty_input() {
        assert!(pairs("").is_empty());
        assert!(pairs("   ").is_empty());
    }

    #[test]
    fn test_parse_float_prefix() {
        assert_eq!(parse_float("12abc"), 12.0);
        assert_eq!(parse_float("  -3.5"), -3.5);
        assert_eq!(parse_float(".5"), 0.5);
        assert_eq!(parse_float("1e3"), 1000.0);
        assert_eq!(parse_float("1e"), 1.0);
        assert_eq!(parse_float("2."), 2.0);
        assert_eq!(parse_float("-Infinity"), f64::NEG_INFINITY);
        assert!(parse_float("abc").is_nan());
        assert!(parse_float(".").is_nan());
        assert!(parse_float("").is_nan());
    }
}
