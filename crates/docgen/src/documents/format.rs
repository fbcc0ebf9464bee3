use chrono::NaiveDate;

/// Two-decimal amount without a currency symbol, e.g. `1500.00`.
pub fn currency(amount: f64) -> String {
    format!("{amount:.2}")
}

/// Two-decimal amount with a leading dollar sign, e.g. `$1500.00`.
pub fn usd(amount: f64) -> String {
    format!("${amount:.2}")
}

/// `MM/DD/YYYY`, or empty when the date is absent.
pub fn date(value: Option<NaiveDate>) -> String {
    value
        .map(|date| date.format("%m/%d/%Y").to_string())
        .unwrap_or_default()
}

/// `(xxx) xxx-xxxx` for ten-digit numbers (a leading 1 on eleven digits is
/// dropped). Anything else passes through unchanged.
pub fn phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    let digits = match digits.len() {
        10 => digits.as_str(),
        11 if digits.starts_with('1') => &digits[1..],
        _ => return raw.to_string(),
    };
    format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_renders_two_decimals() {
        assert_eq!(currency(1500.0), "1500.00");
        assert_eq!(currency(0.5), "0.50");
        assert_eq!(usd(200.0), "$200.00");
    }

    #[test]
    fn date_renders_us_order_or_empty() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 7).expect("valid date");
        assert_eq!(date(Some(day)), "03/07/2025");
        assert_eq!(date(None), "");
    }

    #[test]
    fn phone_formats_ten_and_eleven_digit_numbers() {
        assert_eq!(phone("5155551234"), "(515) 555-1234");
        assert_eq!(phone("1-515-555-1234"), "(515) 555-1234");
        assert_eq!(phone("515.555.1234"), "(515) 555-1234");
    }

    #[test]
    fn phone_passes_through_malformed_values() {
        assert_eq!(phone("ext. 42"), "ext. 42");
        assert_eq!(phone(""), "");
    }
}
