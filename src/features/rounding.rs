//! Decimal rounding and float display

/// Round to `decimals` places, ties to even on the scaled value
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round_ties_even() / scale
}

/// Shortest round-trip text that always keeps a fractional part
/// (`27.0`, `26.35`)
pub fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(33.333333, 1), 33.3);
        assert_eq!(round_to(62.195121, 1), 62.2);
        assert_eq!(round_to(51.166666, 2), 51.17);
        assert_eq!(round_to(-1.234, 2), -1.23);
        // 6.25 is exact in binary, so the tie goes to the even digit
        assert_eq!(round_to(6.25, 1), 6.2);
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(27.0), "27.0");
        assert_eq!(format_float(26.3), "26.3");
        assert_eq!(format_float(-0.58), "-0.58");
        assert_eq!(format_float(100.0), "100.0");
    }
}
