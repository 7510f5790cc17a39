//! Request-shape business rules shared by the HTTP handlers.
//!
//! These checks are deterministic and run before any I/O, so a rejected
//! request never touches the database or the holiday feed.

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// A CPF is exactly 11 digits and not a run of a single repeated digit.
///
/// Check-digit verification is intentionally not performed; uniqueness is
/// enforced by the accounts table.
pub fn is_valid_cpf(cpf: &str) -> bool {
    if cpf.len() != 11 || !cpf.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    // All-identical sequences like "11111111111" pass the shape check but
    // are not assignable CPFs.
    let first = cpf.as_bytes()[0];
    !cpf.bytes().all(|b| b == first)
}

/// Monetary values must lie in [0.01, 999999999.99].
pub fn is_valid_monetary_value(value: Decimal) -> bool {
    value >= Decimal::new(1, 2) && value <= Decimal::new(99_999_999_999, 2)
}

/// A statement range must be well-ordered and span at most 365 days.
pub fn is_valid_date_range(start: NaiveDate, end: NaiveDate) -> bool {
    if start > end {
        return false;
    }
    end.signed_duration_since(start).num_days() <= 365
}

/// Account holder names: letters (accents included) and spaces, at least
/// two characters after trimming.
pub fn is_valid_name(name: &str) -> bool {
    let trimmed = name.trim();
    trimmed.chars().count() >= 2
        && trimmed
            .chars()
            .all(|c| c.is_alphabetic() || c.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpf_requires_eleven_digits() {
        assert!(is_valid_cpf("12345678901"));
        assert!(!is_valid_cpf("1234567890"));
        assert!(!is_valid_cpf("123456789012"));
        assert!(!is_valid_cpf("1234567890a"));
        assert!(!is_valid_cpf(""));
    }

    #[test]
    fn cpf_rejects_repeated_digits() {
        assert!(!is_valid_cpf("11111111111"));
        assert!(!is_valid_cpf("00000000000"));
        assert!(is_valid_cpf("11111111112"));
    }

    #[test]
    fn monetary_value_bounds() {
        assert!(is_valid_monetary_value(Decimal::new(1, 2))); // 0.01
        assert!(is_valid_monetary_value(Decimal::new(4000, 2))); // 40.00
        assert!(is_valid_monetary_value(Decimal::new(99_999_999_999, 2)));
        assert!(!is_valid_monetary_value(Decimal::ZERO));
        assert!(!is_valid_monetary_value(Decimal::new(-100, 2)));
        assert!(!is_valid_monetary_value(Decimal::new(100_000_000_000, 2)));
    }

    #[test]
    fn date_range_must_be_ordered_and_bounded() {
        let day = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        assert!(is_valid_date_range(day, day));
        assert!(is_valid_date_range(
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()
        ));
        assert!(!is_valid_date_range(
            NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
        ));
        assert!(!is_valid_date_range(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
        ));
    }

    #[test]
    fn names_allow_letters_and_spaces_only() {
        assert!(is_valid_name("Maria Silva"));
        assert!(is_valid_name("João"));
        assert!(is_valid_name("  Ana  "));
        assert!(!is_valid_name("J"));
        assert!(!is_valid_name("R2D2"));
        assert!(!is_valid_name("   "));
        assert!(!is_valid_name(""));
    }
}
