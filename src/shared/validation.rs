use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Reporting period in `YYYY-MM` form with a zero-padded month 01-12
    /// - Valid: "2026-01", "1999-12"
    /// - Invalid: "2026-1", "2026-13", "2026-00", "26-01", "2026/01"
    pub static ref PERIOD_REGEX: Regex = Regex::new(r"^(\d{4})-(0[1-9]|1[0-2])$").unwrap();

    /// Anything that is not a digit, stripped from phone numbers
    pub static ref NON_DIGIT_REGEX: Regex = Regex::new(r"\D").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_regex_valid() {
        assert!(PERIOD_REGEX.is_match("2026-01"));
        assert!(PERIOD_REGEX.is_match("2026-12"));
        assert!(PERIOD_REGEX.is_match("0001-06"));
    }

    #[test]
    fn test_period_regex_invalid() {
        assert!(!PERIOD_REGEX.is_match("2026-1")); // month not padded
        assert!(!PERIOD_REGEX.is_match("2026-13")); // month out of range
        assert!(!PERIOD_REGEX.is_match("2026-00"));
        assert!(!PERIOD_REGEX.is_match("26-01"));
        assert!(!PERIOD_REGEX.is_match("2026/01"));
        assert!(!PERIOD_REGEX.is_match("2026-01-05"));
        assert!(!PERIOD_REGEX.is_match(""));
    }

    #[test]
    fn test_non_digit_regex_strips_formatting() {
        assert_eq!(NON_DIGIT_REGEX.replace_all("(55) 99999-8888", ""), "55999998888");
    }
}
