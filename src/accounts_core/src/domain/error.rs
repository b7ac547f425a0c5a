use thiserror::Error;

use super::account_id::AccountId;
use crate::ports::services::{BearerValidationError, CredentialError, TokenCodecError};

/// Closed set of errors returned by lifecycle operations.
#[derive(Debug, Clone, Error)]
pub enum AccountError {
    #[error("email already exists")]
    EmailExists,
    #[error("username already exists")]
    UsernameExists,
    #[error("user not found")]
    UserNotFound,
    #[error("invalid password")]
    InvalidPassword,
    #[error("password is too short")]
    PasswordTooShort,
    #[error("invalid email")]
    InvalidEmail,
    #[error("invalid username")]
    InvalidUsername,
    #[error("invalid identifier format")]
    InvalidIdentifierFormat,
    #[error("numeric value out of range")]
    NumericOverflow,
    #[error("token invalid or expired")]
    TokenInvalidOrExpired,
    #[error("account is already active")]
    AccountAlreadyActive,
    /// The state transition was persisted but the notification was not handed
    /// off. Callers must treat this as a partial success.
    #[error("account {account_id} updated but notification failed: {reason}")]
    NotificationFailed {
        account_id: AccountId,
        reason: String,
    },
    #[error("internal error: {0}")]
    Internal(String),
}

impl PartialEq for AccountError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::NotificationFailed { account_id: a, .. },
                Self::NotificationFailed { account_id: b, .. },
            ) => a == b,
            (Self::Internal(_), Self::Internal(_)) => true,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

impl From<CredentialError> for AccountError {
    fn from(error: CredentialError) -> Self {
        match error {
            CredentialError::PasswordTooShort => Self::PasswordTooShort,
            CredentialError::HashingFailed(e) => Self::Internal(e),
        }
    }
}

impl From<TokenCodecError> for AccountError {
    fn from(error: TokenCodecError) -> Self {
        match error {
            TokenCodecError::InvalidOrExpired => Self::TokenInvalidOrExpired,
            TokenCodecError::Signing(e) => Self::Internal(e),
        }
    }
}

impl From<BearerValidationError> for AccountError {
    fn from(error: BearerValidationError) -> Self {
        match error {
            BearerValidationError::PermissionDenied => Self::TokenInvalidOrExpired,
            BearerValidationError::Upstream(e) => Self::Internal(e),
        }
    }
}
