use rhai::Dynamic;

/// Format a script result for display.
pub fn format_dynamic(value: &Dynamic) -> String {
    if value.is_unit() {
        String::new()
    } else if let Ok(n) = value.as_float() {
        format_number(n)
    } else if let Ok(n) = value.as_int() {
        n.to_string()
    } else if let Ok(b) = value.as_bool() {
        b.to_string()
    } else if let Ok(s) = value.clone().into_string() {
        s
    } else {
        value.to_string()
    }
}

/// Format a number as its shortest round-trip decimal.
///
/// Non-finite values come out as `inf`, `-inf` and `NaN`, which `f64::from_str`
/// accepts, so a referencing formula sees the same value again.
pub fn format_number(n: f64) -> String {
    n.to_string()
}
