//! Credential format checks run before any form is submitted

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// Symbols a password must draw at least one character from
pub const PASSWORD_SYMBOLS: &[char] = &['@', '$', '!', '%', '*', '?', '&'];

/// Why a form was refused; the message is what the user sees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in all fields.")]
    MissingFields,

    #[error(
        "Username must be 6 to 30 characters long, start with an alphabetic character, and contain only alphanumeric characters and underscores."
    )]
    Username,

    #[error("Please enter a valid email address.")]
    Email,

    #[error(
        "Password must be at least 8 characters long, contain at least one uppercase letter, one lowercase letter, one number, one special symbol (@, $, !, %, *, ?, &)."
    )]
    Password,
}

/// Fail with [`ValidationError::MissingFields`] if any field is empty
pub fn require_filled(fields: &[&str]) -> Result<(), ValidationError> {
    if fields.iter().any(|field| field.is_empty()) {
        return Err(ValidationError::MissingFields);
    }

    Ok(())
}

/// Validate username
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    static USERNAME_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = USERNAME_REGEX.get_or_init(|| {
        Regex::new(r"^[A-Za-z][A-Za-z0-9_]{5,29}$").expect("Failed to compile username regex")
    });

    if !regex.is_match(username) {
        return Err(ValidationError::Username);
    }

    Ok(())
}

/// Validate email
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err(ValidationError::Email);
    }

    Ok(())
}

/// Validate password
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < 8 {
        return Err(ValidationError::Password);
    }

    let mut has_upper = false;
    let mut has_lower = false;
    let mut has_digit = false;
    let mut has_symbol = false;

    for c in password.chars() {
        if c.is_ascii_uppercase() {
            has_upper = true;
        } else if c.is_ascii_lowercase() {
            has_lower = true;
        } else if c.is_ascii_digit() {
            has_digit = true;
        } else if PASSWORD_SYMBOLS.contains(&c) {
            has_symbol = true;
        }
    }

    if !(has_upper && has_lower && has_digit && has_symbol) {
        return Err(ValidationError::Password);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usernames_matching_the_pattern_pass() {
        for username in ["alice01", "Bob_the_builder", "abcdef", "a_________", &"x".repeat(30)] {
            assert_eq!(validate_username(username), Ok(()), "{username}");
        }
    }

    #[test]
    fn usernames_breaking_one_rule_fail() {
        let too_long = "a".repeat(31);
        for username in ["alice", "1alice01", "alice 01", "_alice01", "alice-01", "", &too_long] {
            assert_eq!(
                validate_username(username),
                Err(ValidationError::Username),
                "{username:?}"
            );
        }
    }

    #[test]
    fn email_needs_at_and_dot_after_it() {
        assert_eq!(validate_email("a@example.com"), Ok(()));
        assert_eq!(validate_email("first.last@mail.co.uk"), Ok(()));

        for email in ["a.example.com", "a@example", "a b@example.com", "@example.com", "a@@b.c"] {
            assert_eq!(validate_email(email), Err(ValidationError::Email), "{email:?}");
        }
    }

    #[test]
    fn password_with_every_class_passes() {
        for password in ["Abcdef1!", "xY9@xxxx", "Passw0rd&", "Zz1?Zz1?Zz1?"] {
            assert_eq!(validate_password(password), Ok(()), "{password}");
        }
    }

    #[test]
    fn removing_any_class_fails() {
        // Each case drops exactly one requirement from "Abcdef1!".
        for password in ["Abcdefg!", "Abcdefg1", "abcdef1!", "ABCDEF1!", "Abcde1!"] {
            assert_eq!(
                validate_password(password),
                Err(ValidationError::Password),
                "{password}"
            );
        }
    }

    #[test]
    fn only_listed_symbols_count() {
        assert_eq!(validate_password("Abcdef1#"), Err(ValidationError::Password));
    }

    #[test]
    fn extra_characters_are_allowed_once_every_class_is_present() {
        for password in ["Abcdef1! ", "Abcdef1!#", "Abcdéf1!"] {
            assert_eq!(validate_password(password), Ok(()), "{password:?}");
        }
    }

    #[test]
    fn empty_fields_are_reported_first() {
        assert_eq!(require_filled(&["alice01", ""]), Err(ValidationError::MissingFields));
        assert_eq!(require_filled(&["alice01", "x"]), Ok(()));
    }
}
