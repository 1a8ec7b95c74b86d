//! printf-style template substitution for explanation messages.
//!
//! Supported placeholders: `%s` (text), `%d` (number), `%j` (JSON) and `%%`
//! (a literal percent). Placeholders without a matching argument are left
//! as-is; arguments without a matching placeholder are appended, separated
//! by spaces.

use crate::explanation::FormatArg;

/// Substitutes `args` into `template`.
pub fn format(template: &str, args: &[FormatArg]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut remaining = args.iter();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        let Some(&spec) = chars.peek() else {
            out.push(c);
            break;
        };
        if !matches!(spec, 's' | 'd' | 'j' | '%') {
            out.push(c);
            continue;
        }
        chars.next();

        if spec == '%' {
            out.push('%');
            continue;
        }
        match remaining.next() {
            Some(arg) => match spec {
                's' => out.push_str(&arg.to_text()),
                'd' => out.push_str(&number_to_string(arg.to_number())),
                _ => match arg.to_json() {
                    Some(json) => out.push_str(&json),
                    None => out.push_str("[Circular]"),
                },
            },
            None => {
                out.push('%');
                out.push(spec);
            }
        }
    }

    for arg in remaining {
        out.push(' ');
        if arg.is_structured() {
            out.push_str(&arg.to_json().unwrap_or_else(|| "[Circular]".to_string()));
        } else {
            out.push_str(&arg.to_text());
        }
    }
    out
}

/// Renders a number the way message templates expect: integral values
/// without a fractional part, `NaN` and `Infinity` spelled out.
pub fn number_to_string(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        let sign = if value > 0.0 { "" } else { "-" };
        format!("{}Infinity", sign)
    } else if value == 0.0 {
        "0".to_string()
    } else if value.fract() == 0.0 && value.abs() < 1e21 {
        format!("{}", value as i128)
    } else {
        format!("{}", value)
    }
}
