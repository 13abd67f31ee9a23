//! Field-level validation for the login and entry forms. Each check returns
//! the message to show under the field, or `None` when the value passes.

pub fn username_error(username: &str) -> Option<&'static str> {
    if username.trim().is_empty() {
        return Some("Username is required");
    }
    None
}

pub fn password_error(password: &str) -> Option<&'static str> {
    if password.len() < 8 {
        return Some("Password must be at least 8 characters");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Some("Password must contain an uppercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Some("Password must contain a lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Some("Password must contain a digit");
    }
    None
}

/// Character filter for phone-number and installment-count inputs. Empty is
/// accepted so the field can be cleared.
pub fn is_digits(value: &str) -> bool {
    value.chars().all(|c| c.is_ascii_digit())
}

/// Character filter for the total-amount input: digits with at most one
/// decimal separator.
pub fn is_decimal(value: &str) -> bool {
    let mut seen_dot = false;
    for c in value.chars() {
        match c {
            '0'..='9' => {}
            '.' if !seen_dot => seen_dot = true,
            _ => return false,
        }
    }
    true
}

pub fn payment_amount_error(value: &str) -> Option<&'static str> {
    match value.trim().parse::<f64>() {
        Ok(amount) if amount > 0.0 => None,
        Ok(_) => Some("Amount must be greater than zero"),
        Err(_) => Some("Enter a valid amount"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_must_not_be_blank() {
        assert!(username_error("").is_some());
        assert!(username_error("   ").is_some());
        assert!(username_error("ragab").is_none());
    }

    #[test]
    fn password_rules_report_first_failure() {
        assert_eq!(
            password_error("short1A"),
            Some("Password must be at least 8 characters")
        );
        assert_eq!(
            password_error("alllowercase1"),
            Some("Password must contain an uppercase letter")
        );
        assert_eq!(
            password_error("ALLUPPERCASE1"),
            Some("Password must contain a lowercase letter")
        );
        assert_eq!(
            password_error("NoDigitsHere"),
            Some("Password must contain a digit")
        );
        assert_eq!(password_error("Valid1Pass"), None);
    }

    #[test]
    fn digit_filter_accepts_digits_and_empty_only() {
        assert!(is_digits(""));
        assert!(is_digits("0123456789"));
        assert!(!is_digits("12a"));
        assert!(!is_digits("12 "));
        assert!(!is_digits("+20100"));
    }

    #[test]
    fn decimal_filter_allows_a_single_separator() {
        assert!(is_decimal(""));
        assert!(is_decimal("1500"));
        assert!(is_decimal("1500.75"));
        assert!(is_decimal(".5"));
        assert!(!is_decimal("1.2.3"));
        assert!(!is_decimal("1,200"));
        assert!(!is_decimal("-100"));
    }

    #[test]
    fn payment_amount_must_be_a_positive_number() {
        assert_eq!(payment_amount_error("250"), None);
        assert_eq!(payment_amount_error(" 99.5 "), None);
        assert!(payment_amount_error("0").is_some());
        assert!(payment_amount_error("-5").is_some());
        assert!(payment_amount_error("abc").is_some());
        assert!(payment_amount_error("").is_some());
    }
}
