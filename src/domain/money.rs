//! Helpers for amounts stored in minor currency units.

/// Converts an amount in minor units into decimal currency units.
pub fn cents_to_units(cents: i64) -> f64 {
    cents as f64 / 100.0
}

/// Largest price accepted from admins and catalog files, in currency units.
pub const MAX_AMOUNT_UNITS: f64 = 1_000_000_000.0;

/// Converts a decimal amount into minor units, rounding to the nearest cent.
///
/// Returns `None` for negative, non-finite or out-of-range input.
pub fn units_to_cents(units: f64) -> Option<i64> {
    if !units.is_finite() || !(0.0..=MAX_AMOUNT_UNITS).contains(&units) {
        return None;
    }
    Some((units * 100.0).round() as i64)
}

/// Parses a textual price such as `"45000"`, `"12.34"` or `"12,5"` into minor units.
pub fn parse_amount(input: &str) -> Option<i64> {
    let normalized = input.trim().replace(',', ".");
    if normalized.is_empty() {
        return None;
    }
    normalized.parse::<f64>().ok().and_then(units_to_cents)
}

/// Renders an amount as whole currency units with `,` thousands separators.
///
/// Cents are rounded half up, so `123_450` becomes `"1,235"`.
pub fn format_amount(cents: i64) -> String {
    let negative = cents < 0;
    let units = (cents.unsigned_abs() + 50) / 100;
    let digits = units.to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if negative && units > 0 {
        grouped.push('-');
    }
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_amount_groups_thousands() {
        assert_eq!(format_amount(0), "0");
        assert_eq!(format_amount(99_900), "999");
        assert_eq!(format_amount(100_000), "1,000");
        assert_eq!(format_amount(4_500_000), "45,000");
        assert_eq!(format_amount(123_456_789_00), "123,456,789");
    }

    #[test]
    fn format_amount_rounds_half_up() {
        assert_eq!(format_amount(149), "1");
        assert_eq!(format_amount(150), "2");
    }

    #[test]
    fn parse_amount_accepts_decimal_separators() {
        assert_eq!(parse_amount("45000"), Some(4_500_000));
        assert_eq!(parse_amount(" 12.34 "), Some(1234));
        assert_eq!(parse_amount("12,5"), Some(1250));
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("-3"), None);
        assert_eq!(parse_amount("abc"), None);
    }

    #[test]
    fn units_to_cents_rejects_amounts_above_limit() {
        assert_eq!(units_to_cents(MAX_AMOUNT_UNITS), Some(100_000_000_000));
        assert_eq!(units_to_cents(1e17), None);
        assert_eq!(parse_amount("100000000000000000"), None);
    }
}
