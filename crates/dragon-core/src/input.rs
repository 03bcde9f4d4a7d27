//! # Input Validators
//!
//! Single-value checks used when collecting answers one field at a time,
//! before a full document exists. Each returns `Ok(())` or the message to
//! show the user.

use std::sync::OnceLock;

use regex::Regex;
use url::Url;

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
const VERSION_PATTERN: &str = r"^[0-9]+\.[0-9]+\.[0-9]+$";
const INTEGRATION_NAME_PATTERN: &str = r"^[a-zA-Z0-9][a-zA-Z0-9\s\-_.]*[a-zA-Z0-9]$";

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static VERSION_RE: OnceLock<Regex> = OnceLock::new();
static INTEGRATION_NAME_RE: OnceLock<Regex> = OnceLock::new();

/// Compile a constant pattern on first use.
fn pattern(cell: &'static OnceLock<Regex>, source: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(source).expect("constant pattern compiles"))
}

pub fn required_field(value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err("This field is required".to_string());
    }
    Ok(())
}

pub fn validate_email(value: &str) -> Result<(), String> {
    required_field(value)?;
    if !pattern(&EMAIL_RE, EMAIL_PATTERN).is_match(value) {
        return Err("Please enter a valid email address".to_string());
    }
    Ok(())
}

pub fn validate_url(value: &str) -> Result<(), String> {
    required_field(value)?;
    Url::parse(value)
        .map(|_| ())
        .map_err(|_| "Please enter a valid URL (e.g., https://example.com)".to_string())
}

/// `x.y.z` with decimal digits only.
pub fn validate_version(value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err("Version is required".to_string());
    }
    if !is_semver_triplet(value) {
        return Err("Version must be in format x.y.z (e.g., 1.0.0)".to_string());
    }
    Ok(())
}

pub fn is_semver_triplet(value: &str) -> bool {
    pattern(&VERSION_RE, VERSION_PATTERN).is_match(value)
}

/// Integration display names: 3 to 50 characters after trimming,
/// alphanumeric at both ends, with whitespace, hyphens, underscores and
/// periods allowed inside.
pub fn validate_integration_name(value: &str) -> Result<(), String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("Integration name is required".to_string());
    }
    let len = trimmed.chars().count();
    if len < 3 {
        return Err("Integration name must be at least 3 characters long".to_string());
    }
    if len > 50 {
        return Err("Integration name must be less than 50 characters".to_string());
    }
    if !pattern(&INTEGRATION_NAME_RE, INTEGRATION_NAME_PATTERN).is_match(trimmed) {
        return Err(
            "Integration name must start and end with alphanumeric characters and can contain spaces, hyphens, underscores, and periods"
                .to_string(),
        );
    }
    Ok(())
}
