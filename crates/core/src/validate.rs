//! Input validation for signup, login, and blog creation.
//!
//! Each check returns `Ok(())` or a user-facing message. Validation
//! failures are always locally recoverable; they are surfaced to the client
//! and never logged as server errors.

use std::sync::LazyLock;

use regex::Regex;

/// Minimum password length accepted at signup.
pub const MIN_PASSWORD_LEN: usize = 12;

/// Maximum net id length (exclusive bound is 36, matching blog names).
pub const MAX_NET_ID_LEN: usize = 35;

/// Blog names: lowercase ASCII letters only.
static BLOG_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[a-z]+$").expect("blog name regex must compile"));

/// Inclusive year range accepted for blog subdomains.
pub const BLOG_YEAR_RANGE: std::ops::RangeInclusive<i32> = 24..=30;

/// Validate an institutional net id: 1-35 characters, each in `[0-9a-z]`.
pub fn validate_net_id(net_id: &str) -> Result<(), String> {
    if net_id.is_empty() || net_id.len() > MAX_NET_ID_LEN {
        return Err("Please provide a valid net id (1 - 35 characters in length).".into());
    }

    if !net_id
        .chars()
        .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
    {
        return Err("Please provide a valid net id (0-9, a-z).".into());
    }

    Ok(())
}

/// Validate the full signup request: net id, display name, password length,
/// and password confirmation.
pub fn validate_signup(
    net_id: &str,
    name: &str,
    password: &str,
    password_confirm: &str,
) -> Result<(), String> {
    validate_net_id(net_id)?;

    if name.is_empty() {
        return Err("Please provide a name.".into());
    }

    if password.len() < MIN_PASSWORD_LEN {
        return Err(format!(
            "Please provide a password of length {MIN_PASSWORD_LEN} or greater."
        ));
    }

    if password != password_confirm {
        return Err("Password and password confirmation must match.".into());
    }

    Ok(())
}

/// Validate a login request: both fields non-empty. Everything else is
/// decided against the stored user row.
pub fn validate_login(net_id: &str, password: &str) -> Result<(), String> {
    if net_id.is_empty() {
        return Err("Please provide a net id.".into());
    }

    if password.is_empty() {
        return Err("Please provide a password.".into());
    }

    Ok(())
}

/// Validate a blog name: `^[a-z]+$`, length in `[1, 35)`.
pub fn validate_blog_name(name: &str) -> Result<(), String> {
    if name.is_empty() || name.len() >= 35 {
        return Err("Please submit a valid name (1 - 35 characters in length).".into());
    }

    if !BLOG_NAME_RE.is_match(name) {
        return Err("Please submit a valid name (a-z).".into());
    }

    Ok(())
}

/// Validate a blog year: integer in `[24, 30]`.
pub fn validate_blog_year(year: i32) -> Result<(), String> {
    if !BLOG_YEAR_RANGE.contains(&year) {
        return Err("Please submit a valid year (24 - 30).".into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_net_id_boundaries() {
        assert!(validate_net_id("a").is_ok());
        assert!(validate_net_id(&"a".repeat(35)).is_ok());
        assert!(validate_net_id("").is_err());
        assert!(validate_net_id(&"a".repeat(36)).is_err());
    }

    #[test]
    fn test_net_id_charset() {
        assert!(validate_net_id("jdoe42").is_ok());
        assert!(validate_net_id("JDoe").is_err(), "uppercase rejected");
        assert!(validate_net_id("j.doe").is_err(), "punctuation rejected");
        assert!(validate_net_id("j doe").is_err(), "whitespace rejected");
    }

    #[test]
    fn test_signup_password_rules() {
        let ok = validate_signup("jdoe", "Jane Doe", "a-dozen-chars", "a-dozen-chars");
        assert!(ok.is_ok());

        // Exactly one under the minimum length.
        let short = validate_signup("jdoe", "Jane Doe", "elevenchars", "elevenchars");
        assert!(short.is_err());

        let mismatch = validate_signup("jdoe", "Jane Doe", "a-dozen-chars", "a-dozen-charz");
        assert!(mismatch.is_err());

        let nameless = validate_signup("jdoe", "", "a-dozen-chars", "a-dozen-chars");
        assert!(nameless.is_err());
    }

    #[test]
    fn test_login_requires_both_fields() {
        assert!(validate_login("jdoe", "pw").is_ok());
        assert!(validate_login("", "pw").is_err());
        assert!(validate_login("jdoe", "").is_err());
    }

    #[test]
    fn test_blog_name_rules() {
        assert!(validate_blog_name("zach").is_ok());
        assert!(validate_blog_name(&"z".repeat(34)).is_ok());
        assert!(validate_blog_name("").is_err());
        assert!(validate_blog_name(&"z".repeat(35)).is_err());
        assert!(validate_blog_name("Zach").is_err());
        assert!(validate_blog_name("zach7").is_err());
        assert!(validate_blog_name("za-ch").is_err());
    }

    #[test]
    fn test_blog_year_rules() {
        assert!(validate_blog_year(24).is_ok());
        assert!(validate_blog_year(30).is_ok());
        assert!(validate_blog_year(23).is_err());
        assert!(validate_blog_year(31).is_err());
    }
}
