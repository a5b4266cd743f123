//! Parsing of `ipmitool sensor` tabular output.
//!
//! Lines look like:
//!
//! ```text
//! CPU Temp         | 45.000     | degrees C  | ok    | na        | ...
//! ```

/// First temperature-like value from a sensor table.
///
/// Only lines mentioning `CPU` or `TEMP` (case-insensitive) are considered;
/// the second `|`-separated field must be a plain non-negative decimal.
/// Readings of `na` or negative values are skipped.
pub fn parse_cpu_temperature(output: &str) -> Option<f64> {
    output
        .lines()
        .filter(|line| {
            let upper = line.to_uppercase();
            upper.contains("CPU") || upper.contains("TEMP")
        })
        .find_map(|line| {
            let value = line.split('|').nth(1)?.trim();
            if is_plain_decimal(value) {
                value.parse().ok()
            } else {
                None
            }
        })
}

/// Digits with at most one `.` and at least one digit
fn is_plain_decimal(value: &str) -> bool {
    let mut digits = 0;
    let mut dots = 0;
    for c in value.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => dots += 1,
            _ => return false,
        }
    }
    digits > 0 && dots <= 1
}
