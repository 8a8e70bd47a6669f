//! Total parsing helpers for spreadsheet cells and free-text form values.
//!
//! Cells are read the way a person types them into a sheet: `"60%"` is 60 and
//! `"6.5 bands"` is 6.5. Anything without a leading number yields `None`, and
//! callers substitute their documented default.

/// Longest leading number in `value`, e.g. `"60%"` -> `60.0`, `".5"` -> `0.5`.
pub(crate) fn leading_number(value: &str) -> Option<f64> {
    numeric_prefix(value.trim(), true).and_then(|prefix| prefix.parse().ok())
}

/// Longest leading integer in `value`; fractional parts are ignored (`"2.5"` -> `2`).
pub(crate) fn leading_integer(value: &str) -> Option<i64> {
    numeric_prefix(value.trim(), false).and_then(|prefix| prefix.parse().ok())
}

pub(crate) fn number_or(value: Option<&str>, default: f64) -> f64 {
    value.and_then(leading_number).unwrap_or(default)
}

pub(crate) fn integer_or(value: Option<&str>, default: i64) -> i64 {
    value.and_then(leading_integer).unwrap_or(default)
}

/// Spreadsheet yes/no cell: only `yes` (any case) and `1` count as accepted.
pub(crate) fn flag(value: Option<&str>) -> bool {
    value
        .map(str::trim)
        .is_some_and(|raw| raw.eq_ignore_ascii_case("yes") || raw == "1")
}

fn numeric_prefix(value: &str, allow_fraction: bool) -> Option<&str> {
    let bytes = value.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let integer_digits = count_digits(&bytes[end..]);
    end += integer_digits;
    let mut digits = integer_digits;

    if allow_fraction && bytes.get(end) == Some(&b'.') {
        let fraction_digits = count_digits(&bytes[end + 1..]);
        if fraction_digits > 0 {
            end += 1 + fraction_digits;
            digits += fraction_digits;
        }
    }

    (digits > 0).then(|| &value[..end])
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|byte| byte.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_number_reads_prefixes() {
        assert_eq!(leading_number("60"), Some(60.0));
        assert_eq!(leading_number(" 6.5 "), Some(6.5));
        assert_eq!(leading_number("60%"), Some(60.0));
        assert_eq!(leading_number("6.5 bands"), Some(6.5));
        assert_eq!(leading_number(".5"), Some(0.5));
        assert_eq!(leading_number("7."), Some(7.0));
        assert_eq!(leading_number("-3"), Some(-3.0));
        assert_eq!(leading_number("0"), Some(0.0));
    }

    #[test]
    fn leading_number_rejects_text() {
        assert_eq!(leading_number(""), None);
        assert_eq!(leading_number("n/a"), None);
        assert_eq!(leading_number("-"), None);
        assert_eq!(leading_number("."), None);
        assert_eq!(leading_number("approx 60"), None);
    }

    #[test]
    fn leading_integer_truncates_fractions() {
        assert_eq!(leading_integer("2"), Some(2));
        assert_eq!(leading_integer("2.5"), Some(2));
        assert_eq!(leading_integer("3+ years"), Some(3));
        assert_eq!(leading_integer("+1"), Some(1));
        assert_eq!(leading_integer("No gap"), None);
        assert_eq!(leading_integer("99999999999999999999"), None);
    }

    #[test]
    fn defaults_apply_to_missing_and_malformed_cells() {
        assert_eq!(number_or(None, 55.0), 55.0);
        assert_eq!(number_or(Some("abc"), 55.0), 55.0);
        assert_eq!(number_or(Some("0"), 55.0), 0.0);
        assert_eq!(integer_or(Some("two"), 2), 2);
        assert_eq!(integer_or(Some("4"), 2), 4);
    }

    #[test]
    fn flag_accepts_yes_and_one_only() {
        assert!(flag(Some("yes")));
        assert!(flag(Some("YES")));
        assert!(flag(Some(" Yes ")));
        assert!(flag(Some("1")));
        assert!(!flag(Some("y")));
        assert!(!flag(Some("true")));
        assert!(!flag(Some("0")));
        assert!(!flag(None));
    }
}
