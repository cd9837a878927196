//! Tolerante getalconversie voor numerieke attributen uit roof-exports.
//!
//! Exports bevatten soms een Unicode minteken (U+2212) of een eenheid achter
//! de waarde (`"6.5ft"`). Alle numerieke velden lopen via deze module zodat de
//! "ongeldig wordt 0"-regel op één plek staat.

const UNICODE_MINUS: char = '\u{2212}';

/// Leest een getal en valt terug op `0.0` als er geen eindig getal in staat.
#[must_use]
pub fn parse_lenient_float(text: &str) -> f64 {
    parse_float(text).unwrap_or(0.0)
}

/// Leest het langste numerieke prefix van `text`.
///
/// Geeft `None` terug wanneer er geen cijfers gevonden worden of het resultaat
/// niet eindig is.
#[must_use]
pub fn parse_float(text: &str) -> Option<f64> {
    let normalized = normalize_minus(text);
    let candidate = numeric_prefix(normalized.trim());
    if candidate.is_empty() {
        return None;
    }
    candidate
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Vervangt het Unicode minteken door een ASCII `-`.
#[must_use]
pub fn normalize_minus(text: &str) -> String {
    text.replace(UNICODE_MINUS, "-")
}

fn numeric_prefix(text: &str) -> &str {
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
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
        return "";
    }

    // Exponent only counts when at least one digit follows it.
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
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

    &text[..end]
}

#[cfg(test)]
mod tests {
    use super::{parse_float, parse_lenient_float};

    #[test]
    fn parses_plain_numbers() {
        assert_eq!(parse_float("12.5"), Some(12.5));
        assert_eq!(parse_float("  -3 "), Some(-3.0));
        assert_eq!(parse_float("+.5"), Some(0.5));
        assert_eq!(parse_float("1e3"), Some(1000.0));
    }

    #[test]
    fn unicode_minus_is_ascii_minus() {
        assert_eq!(parse_float("\u{2212}5"), Some(-5.0));
        assert_eq!(parse_lenient_float("\u{2212}0.25"), -0.25);
    }

    #[test]
    fn trailing_units_are_ignored() {
        assert_eq!(parse_float("6.5ft"), Some(6.5));
        assert_eq!(parse_float("7/12"), Some(7.0));
        assert_eq!(parse_float("2e"), Some(2.0));
    }

    #[test]
    fn garbage_becomes_zero() {
        assert_eq!(parse_float("abc"), None);
        assert_eq!(parse_float(""), None);
        assert_eq!(parse_float("-"), None);
        assert_eq!(parse_float("."), None);
        assert_eq!(parse_lenient_float("n/a"), 0.0);
    }

    #[test]
    fn non_finite_values_are_rejected() {
        assert_eq!(parse_float("1e999"), None);
        assert_eq!(parse_lenient_float("Infinity"), 0.0);
        assert_eq!(parse_lenient_float("NaN"), 0.0);
    }
}
