//! Rules shared by the form validators that `validator` does not ship.

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;

use std::sync::LazyLock;

use regex::Regex;
use validator::ValidationError;

/// Characters of which a password must contain at least one.
pub const PASSWORD_SPECIALS: &str = "!@#$%^&*";

/// Stricter companion to `#[validate(email)]`: dot-separated local part of
/// letters, digits and `_'+-` (no leading, trailing or doubled dots) and an
/// alphabetic TLD of two or more letters.
pub static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:[A-Za-z0-9_'+-]+\.)*[A-Za-z0-9_'+-]*[A-Za-z0-9_+-]@(?:[A-Za-z0-9][A-Za-z0-9-]*\.)+[A-Za-z]{2,}$",
    )
    .expect("email shape pattern compiles")
});

/// `#[validate(custom)]` rule: at least one of `PASSWORD_SPECIALS`.
///
/// # Errors
///
/// `password_special` when no special character is present.
pub fn password_has_special(password: &str) -> Result<(), ValidationError> {
    if password.chars().any(|c| PASSWORD_SPECIALS.contains(c)) {
        return Ok(());
    }
    Err(ValidationError::new("password_special"))
}
