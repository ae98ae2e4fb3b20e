use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::Serialize;
use validator::{ValidateEmail, ValidationError, ValidationErrors};

/// Field name → first error message, as shown next to the input.
pub type FieldErrors = BTreeMap<String, String>;

pub const MOBILE_DIGITS: usize = 10;

/// Keeps only ASCII digits and truncates to ten of them.
pub fn sanitize_mobile(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(MOBILE_DIGITS)
        .collect()
}

pub fn is_valid_mobile(mobile: &str) -> bool {
    mobile.len() == MOBILE_DIGITS && mobile.chars().all(|c| c.is_ascii_digit())
}

pub fn is_valid_email(email: &str) -> bool {
    email.validate_email()
}

/// `validator` custom hook for the mobile field.
pub fn validate_mobile(mobile: &str) -> Result<(), ValidationError> {
    if is_valid_mobile(mobile) {
        return Ok(());
    }
    let mut err = ValidationError::new("mobile");
    err.message = Some(Cow::Borrowed("Mobile number must be exactly 10 digits"));
    Err(err)
}

pub fn collect_errors(errors: &ValidationErrors) -> FieldErrors {
    let mut out = FieldErrors::new();
    for (field, errs) in errors.field_errors() {
        if let Some(first) = errs.first() {
            let message = first
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("Invalid {field}"));
            out.insert(field.to_string(), message);
        }
    }
    out
}

/// Records a "required" error when the trimmed value is empty. Overrides any
/// format error already recorded for the same field.
pub fn require(errors: &mut FieldErrors, field: &str, value: &str, label: &str) {
    if value.trim().is_empty() {
        errors.insert(field.to_string(), format!("{label} is required"));
    }
}

pub fn check_password_match(errors: &mut FieldErrors, password: &str, confirm: &str) {
    if password != confirm {
        errors.insert(
            "confirm_password".to_string(),
            "Passwords do not match".to_string(),
        );
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StrengthTier {
    Weak,
    Medium,
    Strong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StrengthCriteria {
    pub min_length: bool,
    pub long_length: bool,
    pub lowercase: bool,
    pub uppercase: bool,
    pub digit: bool,
    pub symbol: bool,
}

impl StrengthCriteria {
    pub fn of(password: &str) -> Self {
        let len = password.chars().count();
        Self {
            min_length: len >= 8,
            long_length: len >= 12,
            lowercase: password.chars().any(|c| c.is_lowercase()),
            uppercase: password.chars().any(|c| c.is_uppercase()),
            digit: password.chars().any(|c| c.is_ascii_digit()),
            symbol: password
                .chars()
                .any(|c| !c.is_alphanumeric() && !c.is_whitespace()),
        }
    }

    pub fn score(&self) -> u8 {
        [
            self.min_length,
            self.long_length,
            self.lowercase,
            self.uppercase,
            self.digit,
            self.symbol,
        ]
        .iter()
        .filter(|met| **met)
        .count() as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PasswordStrength {
    pub score: u8,
    pub tier: StrengthTier,
    pub criteria: StrengthCriteria,
}

/// Tier depends only on how many criteria are met, so it never drops as more
/// criteria are satisfied.
pub fn tier_for_score(score: u8) -> StrengthTier {
    match score {
        0..=2 => StrengthTier::Weak,
        3..=4 => StrengthTier::Medium,
        _ => StrengthTier::Strong,
    }
}

pub fn password_strength(password: &str) -> PasswordStrength {
    let criteria = StrengthCriteria::of(password);
    let score = criteria.score();
    PasswordStrength {
        score,
        tier: tier_for_score(score),
        criteria,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_mobile() {
        assert_eq!(sanitize_mobile("98-76 543a210X"), "9876543210");
        assert_eq!(sanitize_mobile("+1 (555) 123-4567 ext 89"), "1555123456");
        assert_eq!(sanitize_mobile("abc"), "");
        assert_eq!(sanitize_mobile("١٢٣"), "");
    }

    #[test]
    fn test_sanitized_mobile_never_exceeds_ten_digits() {
        for input in ["", "1", "12345678901234567890", "9-9-9-9-9-9-9-9-9-9-9-9"] {
            let out = sanitize_mobile(input);
            assert!(out.len() <= MOBILE_DIGITS);
            assert!(out.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_mobile_and_email_checks() {
        assert!(is_valid_mobile("9876543210"));
        assert!(!is_valid_mobile("987654321"));
        assert!(validate_mobile("12345").is_err());

        assert!(is_valid_email("ops@example.com"));
        assert!(!is_valid_email("ops@"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_require_and_match() {
        let mut errors = FieldErrors::new();
        require(&mut errors, "first_name", "   ", "First name");
        check_password_match(&mut errors, "secret-1", "secret-2");
        assert_eq!(errors["first_name"], "First name is required");
        assert_eq!(errors["confirm_password"], "Passwords do not match");
    }

    #[test]
    fn test_password_tiers() {
        assert_eq!(password_strength("abc").tier, StrengthTier::Weak);
        assert_eq!(password_strength("abcdefgh").tier, StrengthTier::Weak);
        assert_eq!(password_strength("abcdefG1").tier, StrengthTier::Medium);
        assert_eq!(password_strength("abcdefgH1!").tier, StrengthTier::Strong);
        assert_eq!(password_strength("abcdefghijK1!x").score, 6);
    }

    #[test]
    fn test_strength_is_monotonic_in_criteria() {
        let samples = [
            "", "a", "A", "1", "!", "aA", "aA1", "aA1!", "abcdefgh", "ABCDEFGH1",
            "abcdefghijkl", "abcdefghijK1", "abcdefghijK1!", "Passw0rd!", "p@ss",
        ];
        for a in samples {
            for b in samples {
                let sa = password_strength(a);
                let sb = password_strength(b);
                if sa.score > sb.score {
                    assert!(sa.tier >= sb.tier, "{a:?} ranked below {b:?}");
                }
            }
        }
        for score in 0..6 {
            assert!(tier_for_score(score + 1) >= tier_for_score(score));
        }
    }
}
