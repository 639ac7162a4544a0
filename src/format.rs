/// Renders a value the way it appears in evaluation steps.
///
/// The value is rounded to two decimal places, then trailing zeros and a
/// dangling decimal point are dropped. Sub-results are spliced back into the
/// expression in this form, so anything past the second decimal is lost
/// between bracket levels.
///
/// # Examples
/// ```
/// use stepcalc::format_number;
///
/// assert_eq!(format_number(4.0), "4");
/// assert_eq!(format_number(4.5), "4.5");
/// assert_eq!(format_number(1.0 / 3.0), "0.33");
/// ```
#[must_use]
pub fn format_number(value: f64) -> String {
    let fixed = format!("{value:.2}");
    if !value.is_finite() {
        return fixed;
    }

    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    // -0.001 rounds to "-0.00"
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_numbers() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(4.0), "4");
        assert_eq!(format_number(100.0), "100");
        assert_eq!(format_number(-20.0), "-20");
    }

    #[test]
    fn test_fractional_digits_trimmed() {
        assert_eq!(format_number(4.5), "4.5");
        assert_eq!(format_number(4.25), "4.25");
        assert_eq!(format_number(-0.5), "-0.5");
    }

    #[test]
    fn test_rounds_to_two_places() {
        assert_eq!(format_number(1.0 / 3.0), "0.33");
        assert_eq!(format_number(2.0 / 3.0), "0.67");
        assert_eq!(format_number(1.999), "2");
        assert_eq!(format_number(0.004), "0");
    }

    #[test]
    fn test_negative_zero() {
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(-0.001), "0");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(format_number(f64::INFINITY), "inf");
        assert_eq!(format_number(f64::NEG_INFINITY), "-inf");
        assert_eq!(format_number(f64::NAN), "NaN");
    }
}
