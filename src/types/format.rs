//! # Locale-Free Text Conversion
//!
//! Symbolic cells are NUL-padded byte fields. These helpers move values
//! between those fields and numbers without consulting any locale.
//!
//! | Function | Direction | Behavior |
//! |----------|-----------|----------|
//! | [`number_text`] | f64 → text | integral values print without a fraction |
//! | [`parse_leading`] | text → f64 | longest numeric prefix, 0 on failure |
//! | [`cell_str`] | field → text | bytes up to the first NUL |
//! | [`write_cell_str`] | text → field | at most `width - 1` bytes, NUL padded |

use std::borrow::Cow;

/// Formats a real number the way symbolic conversions print it.
pub fn number_text(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    if v.is_infinite() {
        return if v < 0.0 { "-inf" } else { "inf" }.to_string();
    }
    if v == v.trunc() && v.abs() < 1e15 {
        return format!("{}", v as i64);
    }
    format!("{}", v)
}

/// Parses the leading numeric content of `s`, ignoring leading whitespace.
/// Returns 0.0 when there is none.
pub fn parse_leading(s: &str) -> f64 {
    leading_number(s).unwrap_or(0.0)
}

/// Parses the leading numeric content of `s`, if any.
pub fn leading_number(s: &str) -> Option<f64> {
    let t = s.trim_start();
    let bytes = t.as_bytes();
    let mut end = 0;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }

    for special in ["infinity", "inf", "nan"] {
        let word = bytes.get(end..end + special.len());
        if word.is_some_and(|w| w.eq_ignore_ascii_case(special.as_bytes())) {
            let magnitude = if special == "nan" {
                f64::NAN
            } else {
                f64::INFINITY
            };
            return Some(if bytes.first() == Some(&b'-') {
                -magnitude
            } else {
                magnitude
            });
        }
    }

    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - digits_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }

    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    t[..end].parse::<f64>().ok()
}

/// Bytes of a symbolic field up to the first NUL.
#[inline]
pub fn cell_bytes(field: &[u8]) -> &[u8] {
    match field.iter().position(|&b| b == 0) {
        Some(n) => &field[..n],
        None => field,
    }
}

/// Text of a symbolic field up to the first NUL.
pub fn cell_str(field: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(cell_bytes(field))
}

/// Writes `s` into a symbolic field, truncating to `field.len() - 1` bytes
/// and NUL padding the rest.
pub fn write_cell_str(field: &mut [u8], s: &[u8]) {
    if field.is_empty() {
        return;
    }
    let s = cell_bytes(s);
    let n = s.len().min(field.len() - 1);
    field[..n].copy_from_slice(&s[..n]);
    field[n..].fill(0);
}
