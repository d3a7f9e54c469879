use crate::error::AppError;
use lazy_static::lazy_static;
use regex::Regex;

/// Uniform validation contract for inbound requests.
///
/// Every request DTO implements this and handlers invoke it before any
/// business logic runs.
pub trait Validate {
    fn validate(&self) -> Result<(), AppError>;
}

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[\w.-]+@([\w-]+\.)+[\w-]{2,4}$").unwrap();
}

pub fn is_email_valid(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Password rule: at least 8 chars with a lowercase, an uppercase and a digit.
// The regex crate has no lookahead, so the rule is spelled out per part.
pub fn is_password_valid(password: &str) -> bool {
    password.chars().count() >= 8
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
}
