//! Display formatting shared by the statistics calculators and table export.

/// Percentage of `part` in `total`, two decimals and a trailing `%`.
///
/// Callers guarantee `total > 0`.
pub(crate) fn percentage(part: usize, total: usize) -> String {
    format!("{:.2}%", 100.0 * part as f64 / total as f64)
}

/// Round to `places` decimals, ties to even on the scaled value.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round_ties_even() / factor
}

/// Float rendered the way a literal list prints it: `2.0`, `0.25`, `-3.5`.
pub(crate) fn float_literal(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// Quoted string literal: single quotes unless the text holds a single
/// quote and no double quote.
pub(crate) fn text_literal(value: &str) -> String {
    let quote = if value.contains('\'') && !value.contains('"') { '"' } else { '\'' };
    let mut out = String::with_capacity(value.len() + 2);
    out.push(quote);
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_two_decimals() {
        assert_eq!(percentage(1, 3), "33.33%");
        assert_eq!(percentage(1, 2), "50.00%");
        assert_eq!(percentage(0, 7), "0.00%");
        assert_eq!(percentage(4, 4), "100.00%");
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(2.346, 2), 2.35);
        assert_eq!(round_to(-1.23456, 4), -1.2346);
        assert_eq!(round_to(7.0, 2), 7.0);
        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(round_to(0.375, 2), 0.38);
        assert_eq!(round_to(-0.125, 2), -0.12);
    }

    #[test]
    fn test_float_literal() {
        assert_eq!(float_literal(2.0), "2.0");
        assert_eq!(float_literal(0.25), "0.25");
        assert_eq!(float_literal(-3.5), "-3.5");
    }

    #[test]
    fn test_text_literal_quoting() {
        assert_eq!(text_literal("abc"), "'abc'");
        assert_eq!(text_literal("it's"), "\"it's\"");
        assert_eq!(text_literal("a'b\"c"), "'a\\'b\"c'");
        assert_eq!(text_literal("x\\y"), "'x\\\\y'");
    }
}
