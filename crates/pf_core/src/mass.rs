//! Package mass parsing.
//!
//! Catalog records carry package size as free text ("2kg", "1.5 kg túi").
//! The numeric prefix is the mass in kilograms; the unit text that follows is
//! ignored. A label without a leading number means "unknown package size".

pub const GRAMS_PER_KG: f64 = 1000.0;

/// Largest purchase mass (2^53 g) that whole-gram arithmetic represents exactly.
pub const MAX_TOTAL_GRAMS: f64 = 9_007_199_254_740_992.0;

/// Extract the leading decimal of `label` after optional leading whitespace.
///
/// Accepted shapes: `12`, `12.5`, `.5`, `12.` (trailing dot ignored).
/// Signs, thousands separators and exponent markers end the number.
pub fn parse_leading_decimal(label: &str) -> Option<f64> {
    let s = label.trim_start();
    let bytes = s.as_bytes();

    let mut end = 0usize;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let int_digits = end;

    let mut frac_digits = 0usize;
    if end < bytes.len() && bytes[end] == b'.' {
        let mut j = end + 1;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        frac_digits = j - end - 1;
        if frac_digits > 0 {
            end = j;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    let token = &s[..end];
    let token = if int_digits == 0 { format!("0{token}") } else { token.to_string() };
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Package mass in grams for a kilogram-denominated label.
#[inline]
pub fn package_grams(label: &str) -> Option<f64> {
    parse_leading_decimal(label).map(|kg| kg * GRAMS_PER_KG)
}
