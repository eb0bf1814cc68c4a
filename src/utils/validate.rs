use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::SchoolError;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.-]+$").expect("Invalid username regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

pub fn validate_username(username: &str) -> Result<(), &'static str> {
    // 用户名长度校验：3 <= x <= 32
    if username.len() < 3 || username.len() > 32 {
        return Err("Username length must be between 3 and 32 characters");
    }
    if !USERNAME_RE.is_match(username) {
        return Err("Username must contain only letters, numbers, dots, underscores or hyphens");
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 去除首尾空白后不能为空
pub fn require_non_empty(value: Option<&str>, field: &str) -> Result<String, SchoolError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(SchoolError::validation(format!("{field} is required"))),
    }
}

/// 可选文本字段，空白视为未提供
pub fn optional_trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email() {
        assert!(validate_email("jane.doe@school.edu").is_ok());
        assert!(validate_email("jane.doe@school").is_err());
        assert!(validate_email("not an email").is_err());
    }

    #[test]
    fn test_username() {
        assert!(validate_username("admin").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_username("has space").is_err());
    }

    #[test]
    fn test_require_non_empty_trims() {
        assert_eq!(require_non_empty(Some("  Jane "), "name").unwrap(), "Jane");
        assert!(require_non_empty(Some("   "), "name").is_err());
        assert!(require_non_empty(None, "name").is_err());
    }

    #[test]
    fn test_optional_trimmed() {
        assert_eq!(optional_trimmed(Some(" x ".into())), Some("x".into()));
        assert_eq!(optional_trimmed(Some("  ".into())), None);
    }
}
