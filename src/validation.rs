//! Password rules for the signup and login forms.
//!
//! A password is accepted when it is 8 to 20 characters long, contains no
//! whitespace, and has at least one letter, one digit and one special
//! character.
//!
//! ```
//! use ledger_navigator::validation::{validate_password, PasswordError};
//!
//! assert!(validate_password("ledger#2024").is_ok());
//! assert_eq!(validate_password("short1!"), Err(PasswordError::TooShort { min: 8 }));
//! ```

use thiserror::Error;

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PASSWORD_LEN: usize = 20;

/// First rule a password breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PasswordError {
    #[error("password must be at least {min} characters")]
    TooShort { min: usize },
    #[error("password must be at most {max} characters")]
    TooLong { max: usize },
    #[error("password must not contain spaces")]
    Whitespace,
    #[error("password must contain a letter")]
    MissingLetter,
    #[error("password must contain a number")]
    MissingDigit,
    #[error("password must contain a special character")]
    MissingSpecial,
}

/// Check a password against the signup rules.
pub fn validate_password(password: &str) -> Result<(), PasswordError> {
    let len = password.chars().count();
    if len < MIN_PASSWORD_LEN {
        return Err(PasswordError::TooShort {
            min: MIN_PASSWORD_LEN,
        });
    }
    if len > MAX_PASSWORD_LEN {
        return Err(PasswordError::TooLong {
            max: MAX_PASSWORD_LEN,
        });
    }
    if password.chars().any(char::is_whitespace) {
        return Err(PasswordError::Whitespace);
    }
    if !password.chars().any(char::is_alphabetic) {
        return Err(PasswordError::MissingLetter);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(PasswordError::MissingDigit);
    }
    if !password.chars().any(is_special) {
        return Err(PasswordError::MissingSpecial);
    }
    Ok(())
}

fn is_special(c: char) -> bool {
    c.is_ascii_punctuation()
}

/// Rough strength shown under the password field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PasswordStrength {
    Weak,
    Medium,
    Strong,
}

/// Score a password by length and character variety.
pub fn password_strength(password: &str) -> PasswordStrength {
    let classes = [
        password.chars().any(|c| c.is_ascii_lowercase()),
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(is_special),
    ]
    .into_iter()
    .filter(|present| *present)
    .count();
    let len = password.chars().count();

    if validate_password(password).is_err() || classes < 3 {
        PasswordStrength::Weak
    } else if classes == 4 && len >= 12 {
        PasswordStrength::Strong
    } else {
        PasswordStrength::Medium
    }
}

/// Confirmation field must match exactly.
pub fn passwords_match(password: &str, confirm: &str) -> bool {
    !password.is_empty() && password == confirm
}
