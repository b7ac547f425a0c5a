use std::fmt;

use secrecy::{ExposeSecret, Secret};

/// Minimum number of characters a new password must have.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// A plaintext password as supplied by a caller.
///
/// Construction never fails: old passwords must be comparable even when they
/// predate the current policy. Length rules are applied by the
/// [`CredentialPolicy`](crate::CredentialPolicy) when a password is set.
#[derive(Clone)]
pub struct Password(Secret<String>);

impl Password {
    pub fn new(raw: Secret<String>) -> Self {
        Self(raw)
    }

    /// Counts characters, not bytes.
    pub fn meets_minimum_length(&self) -> bool {
        self.0.expose_secret().chars().count() >= MIN_PASSWORD_LENGTH
    }
}

impl From<Secret<String>> for Password {
    fn from(raw: Secret<String>) -> Self {
        Self(raw)
    }
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password([REDACTED])")
    }
}

/// One-way hash of a password in PHC string format.
#[derive(Clone)]
pub struct PasswordHash(Secret<String>);

impl PasswordHash {
    pub fn new(phc: Secret<String>) -> Self {
        Self(phc)
    }
}

impl AsRef<Secret<String>> for PasswordHash {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    fn password(raw: &str) -> Password {
        Password::new(Secret::new(raw.to_owned()))
    }

    #[test]
    fn eight_characters_is_enough() {
        assert!(password("password").meets_minimum_length());
        assert!(!password("passwor").meets_minimum_length());
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // 7 characters, 14 bytes
        assert!(!password("пароль1").meets_minimum_length());
        assert!(password("пароль12").meets_minimum_length());
    }

    #[quickcheck]
    fn minimum_length_matches_char_count(raw: String) -> bool {
        password(&raw).meets_minimum_length() == (raw.chars().count() >= MIN_PASSWORD_LENGTH)
    }
}
