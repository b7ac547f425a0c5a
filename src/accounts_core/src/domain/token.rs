use std::fmt;

use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

/// Discriminator restricting which transition a lifecycle token may authorize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenPurpose {
    AccountConfirmation,
    PasswordReset,
}

impl TokenPurpose {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AccountConfirmation => "account_confirmation",
            Self::PasswordReset => "password_reset",
        }
    }
}

impl fmt::Display for TokenPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signed, self-contained lifecycle token as delivered to the account owner.
#[derive(Clone)]
pub struct LifecycleToken(Secret<String>);

impl LifecycleToken {
    pub fn new(token: Secret<String>) -> Self {
        Self(token)
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl From<String> for LifecycleToken {
    fn from(token: String) -> Self {
        Self(Secret::new(token))
    }
}

impl From<Secret<String>> for LifecycleToken {
    fn from(token: Secret<String>) -> Self {
        Self(token)
    }
}

impl fmt::Debug for LifecycleToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LifecycleToken([REDACTED])")
    }
}
