// Stay length and price normalization
// Nothing here fails: unparseable input falls back to a default or None.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

const DATE_FORMAT: &str = "%Y-%m-%d";

// First run of digits and thousands separators; the fractional part is not captured
static PRICE_DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d[\d,]*").unwrap());

/// Whole nights between two `YYYY-MM-DD` dates, never less than one.
pub fn nights_between(checkin: &str, checkout: &str) -> u32 {
    let parse = |date: &str| NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).ok();

    match (parse(checkin), parse(checkout)) {
        (Some(start), Some(end)) => {
            let days = (end - start).num_days();
            u32::try_from(days).unwrap_or(0).max(1)
        }
        _ => 1,
    }
}

pub fn parse_price(text: &str) -> Option<f64> {
    let digits = PRICE_DIGITS.find(text)?.as_str().replace(',', "");
    digits.parse().ok()
}

pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

pub fn total_price(price_per_night: Option<f64>, nights: u32) -> Option<f64> {
    price_per_night
        .filter(|price| price.is_finite())
        .map(|price| round_cents(price * f64::from(nights)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("2025-12-05", "2025-12-08", 3; "#1 three nights")]
    #[test_case("2025-12-30", "2026-01-02", 3; "#2 across year end")]
    #[test_case("2024-02-28", "2024-03-01", 2; "#3 leap year")]
    #[test_case("2025-12-05", "2025-12-05", 1; "#4 same day")]
    #[test_case("2025-12-08", "2025-12-05", 1; "#5 checkout before checkin")]
    #[test_case("12/05/2025", "2025-12-08", 1; "#6 wrong format")]
    #[test_case("", "", 1; "#7 empty dates")]
    #[test_case("2025-02-30", "2025-03-02", 1; "#8 impossible date")]
    fn test_nights_between(checkin: &str, checkout: &str, expected: u32) {
        assert_eq!(nights_between(checkin, checkout), expected);
    }

    #[test_case("$123.45 per night", Some(123.0); "#1 fraction dropped")]
    #[test_case("$1,299", Some(1299.0); "#2 thousands separator")]
    #[test_case("From €85 to €120", Some(85.0); "#3 first run wins")]
    #[test_case("100", Some(100.0); "#4 bare number")]
    #[test_case("N/A", None; "#5 no digits")]
    #[test_case("", None; "#6 empty")]
    fn test_parse_price(text: &str, expected: Option<f64>) {
        assert_eq!(parse_price(text), expected);
    }

    #[test]
    fn test_total_price() {
        assert_eq!(total_price(Some(100.0), 3), Some(300.0));
        assert_eq!(total_price(Some(33.333), 3), Some(100.0));
        assert_eq!(total_price(Some(19.99), 2), Some(39.98));
        assert_eq!(total_price(Some(0.0), 4), Some(0.0));
        assert_eq!(total_price(None, 3), None);
        assert_eq!(total_price(Some(f64::NAN), 3), None);
    }
}
