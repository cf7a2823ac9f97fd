//! Swedish (sv-SE) number formatting
//!
//! Digits are grouped in threes with a no-break space, the decimal separator
//! is a comma and negative numbers use the minus sign U+2212, matching what
//! browsers render for the `sv-SE` locale.

use itertools::Itertools;

/// Digit group separator (no-break space)
pub const GROUP_SEPARATOR: char = '\u{a0}';
/// Decimal separator
pub const DECIMAL_SEPARATOR: char = ',';
const MINUS: char = '\u{2212}';

fn group_digits(digits: &str) -> String {
    let chars: Vec<char> = digits.chars().collect();
    let head = chars.len() % 3;
    let mut groups = Vec::with_capacity(chars.len() / 3 + 1);
    if head > 0 {
        groups.push(chars[..head].iter().collect::<String>());
    }
    groups.extend(chars[head..].chunks(3).map(|c| c.iter().collect::<String>()));
    groups.into_iter().join(&GROUP_SEPARATOR.to_string())
}

/// Format an integer, e.g. `1234567` → `"1 234 567"`
#[must_use]
pub fn format_number(value: u64) -> String {
    group_digits(&value.to_string())
}

/// Format a float with a fixed number of decimals, e.g. `(1234.56, 1)` → `"1 234,6"`
#[must_use]
pub fn format_decimal(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return "–".to_string();
    }

    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = formatted
        .split_once('.')
        .map_or((formatted.as_str(), None), |(i, f)| (i, Some(f)));

    let mut out = String::new();
    let rounds_to_zero = formatted.chars().all(|c| c == '0' || c == '.');
    if value < 0.0 && !rounds_to_zero {
        out.push(MINUS);
    }
    out.push_str(&group_digits(int_part));
    if let Some(frac) = frac_part {
        out.push(DECIMAL_SEPARATOR);
        out.push_str(frac);
    }
    out
}

/// Format an amount in Swedish kronor without decimals, e.g. `45200.0` → `"45 200 kr"`
#[must_use]
pub fn format_currency(value: f64) -> String {
    format!("{}{GROUP_SEPARATOR}kr", format_decimal(value, 0))
}

/// Format a 0-100 value as a percentage with one decimal, e.g. `12.345` → `"12,3 %"`
#[must_use]
pub fn format_percentage(value: f64) -> String {
    format!("{}{GROUP_SEPARATOR}%", format_decimal(value, 1))
}

/// Format an optional score as `"72,5/100"`, or a dash when absent
#[must_use]
pub fn format_score(value: Option<f64>) -> String {
    value.map_or_else(|| "–".to_string(), |v| format!("{}/100", format_decimal(v, 1)))
}
