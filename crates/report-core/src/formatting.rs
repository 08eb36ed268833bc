/// Format a floating-point number with thousands separators and a fixed number
/// of decimal places.
///
/// # Examples
///
/// ```
/// use report_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5, 1), "1,234.5");
/// assert_eq!(format_number(1234567.0, 0), "1,234,567");
/// assert_eq!(format_number(0.0, 2), "0.00");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    let negative = value < 0.0;
    let abs_value = value.abs();

    // Round to the requested decimal places before splitting integer and
    // fractional digits. A half-ULP epsilon keeps exact midpoints from
    // rounding down due to their binary representation.
    let factor = 10_f64.powi(decimals as i32);
    let epsilon = f64::EPSILON * abs_value * factor;
    let rounded = ((abs_value * factor) + epsilon).round() / factor;

    let integer_part = rounded.trunc() as u64;
    let frac_part = rounded - rounded.trunc();

    let grouped = group_thousands(&integer_part.to_string());

    let result = if decimals == 0 {
        grouped
    } else {
        let frac_str = format!("{:.prec$}", frac_part, prec = decimals as usize);
        // `frac_str` starts with "0.", e.g. "0.50". Keep only the ".50" part.
        format!("{}{}", grouped, &frac_str[1..])
    };

    if negative {
        format!("-{}", result)
    } else {
        result
    }
}

/// Format a duration in hours as `"Nh"` or `"Nh MMm"`.
///
/// # Examples
///
/// ```
/// use report_core::formatting::format_hours_minutes;
///
/// assert_eq!(format_hours_minutes(2.0), "2h");
/// assert_eq!(format_hours_minutes(2.5), "2h 30m");
/// assert_eq!(format_hours_minutes(0.25), "0h 15m");
/// ```
pub fn format_hours_minutes(hours: f64) -> String {
    let whole_hours = hours.trunc() as u64;
    let minutes = ((hours - hours.trunc()) * 60.0).round() as u64;
    if minutes == 0 {
        format!("{}h", whole_hours)
    } else {
        format!("{}h {}m", whole_hours, minutes)
    }
}

/// Insert a comma every three digits, right to left.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
