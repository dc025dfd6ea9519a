//! Number formatting for attribute values and path data.
//!
//! The reference panel was authored in a browser, so plain attribute numbers follow JavaScript
//! `Number#toString` (`15`, not `15.0`). Arc and sector path data use fixed three decimals.

use std::fmt::Write as _;

/// Formats a number the way JS `String(n)` does, without `-0` and non-finite values.
pub fn fmt(v: f64) -> String {
    let mut out = String::new();
    fmt_into(&mut out, v);
    out
}

pub fn fmt_into(out: &mut String, mut v: f64) {
    if !v.is_finite() {
        out.push('0');
        return;
    }
    if v == -0.0 {
        v = 0.0;
    }
    let mut buf = ryu_js::Buffer::new();
    out.push_str(buf.format_finite(v));
}

/// Fixed three-decimal form used for arc endpoints (`12.000`, `-3.142`).
pub fn fmt_fixed3(v: f64) -> String {
    let mut out = String::new();
    fmt_fixed3_into(&mut out, v);
    out
}

pub fn fmt_fixed3_into(out: &mut String, v: f64) {
    if !v.is_finite() {
        out.push_str("0.000");
        return;
    }
    let _ = write!(out, "{v:.3}");
}

/// Three decimals with trailing zeros (and a bare dot) trimmed: `21.732`, `22`.
pub fn fmt_trim3(v: f64) -> String {
    if !v.is_finite() || v.abs() < 0.0005 {
        return "0".to_string();
    }
    let mut out = format!("{v:.3}");
    while out.ends_with('0') {
        out.pop();
    }
    if out.ends_with('.') {
        out.pop();
    }
    if out == "-0" {
        out = "0".to_string();
    }
    out
}
