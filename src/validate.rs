use crate::error::ApiError;
use regex::Regex;
use std::sync::OnceLock;

/// Field validation for the account prompts.
///
/// These run before anything touches the network. A failed check produces
/// `ApiError::Validation` with the same wording the web forms used, and the
/// request is never sent.

/// One non-whitespace run, `@`, one non-whitespace run, `.`, one more.
/// Deliberately loose—the server does the real verification.
pub fn email(value: &str) -> Result<(), ApiError> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

    if re.is_match(value) {
        Ok(())
    } else {
        Err(ApiError::validation("email", "Введіть коректний email"))
    }
}

pub fn password(value: &str) -> Result<(), ApiError> {
    if value.chars().count() >= 6 {
        Ok(())
    } else {
        Err(ApiError::validation(
            "password",
            "Пароль повинен містити щонайменше 6 символів",
        ))
    }
}

pub fn passwords_match(password: &str, confirmation: &str) -> Result<(), ApiError> {
    if password == confirmation {
        Ok(())
    } else {
        Err(ApiError::validation("confirm-password", "Паролі не збігаються"))
    }
}

/// Display name, after trimming.
pub fn name(value: &str) -> Result<(), ApiError> {
    if value.trim().chars().count() >= 2 {
        Ok(())
    } else {
        Err(ApiError::validation(
            "name",
            "Ім'я повинно містити щонайменше 2 символи",
        ))
    }
}

/// Inclusive on both ends: 13 and 120 are fine.
pub fn age(value: u32) -> Result<(), ApiError> {
    if (13..=120).contains(&value) {
        Ok(())
    } else {
        Err(ApiError::validation(
            "age",
            "Вік повинен бути від 13 до 120 років",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_accepts_minimal_address() {
        assert!(email("a@b.co").is_ok());
    }

    #[test]
    fn email_rejects_missing_parts() {
        assert!(email("a@b").is_err());
        assert!(email("ab.co").is_err());
        assert!(email("").is_err());
        assert!(email("a b@c.co").is_err());
    }

    #[test]
    fn password_boundary_is_six_chars() {
        assert!(password("12345").is_err());
        assert!(password("123456").is_ok());
    }

    #[test]
    fn password_counts_chars_not_bytes() {
        // Six Cyrillic letters is a valid password even though it's 12 bytes.
        assert!(password("пароль").is_ok());
    }

    #[test]
    fn confirmation_must_match() {
        assert!(passwords_match("secret1", "secret1").is_ok());
        assert!(passwords_match("secret1", "secret2").is_err());
    }

    #[test]
    fn name_is_trimmed_before_the_length_check() {
        assert!(name("Ян").is_ok());
        assert!(name("  а  ").is_err());
        assert!(name("").is_err());
    }

    #[test]
    fn age_boundaries_are_inclusive() {
        assert!(age(12).is_err());
        assert!(age(13).is_ok());
        assert!(age(120).is_ok());
        assert!(age(121).is_err());
    }

    #[test]
    fn validation_failures_carry_the_field_name() {
        let err = email("nope").unwrap_err();
        assert!(matches!(err, ApiError::Validation { field: "email", .. }));
    }
}
