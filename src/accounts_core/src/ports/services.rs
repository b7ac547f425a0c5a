use async_trait::async_trait;
use chrono::Duration;
use secrecy::Secret;
use thiserror::Error;

use crate::domain::{
    account_id::AccountId,
    event::LifecycleEvent,
    password::{Password, PasswordHash},
    token::{LifecycleToken, TokenPurpose},
};

#[derive(Debug, Clone, Error)]
pub enum CredentialError {
    #[error("password is too short")]
    PasswordTooShort,
    #[error("failed to hash password: {0}")]
    HashingFailed(String),
}

/// Port for password rules and hashing.
#[async_trait]
pub trait CredentialPolicy: Send + Sync {
    /// Rejects passwords that may not be set. The default rule is the minimum
    /// length; there is no upper bound and no complexity rule.
    fn validate(&self, password: &Password) -> Result<(), CredentialError> {
        if password.meets_minimum_length() {
            Ok(())
        } else {
            Err(CredentialError::PasswordTooShort)
        }
    }

    async fn hash(&self, password: Password) -> Result<PasswordHash, CredentialError>;

    /// Returns `false` on mismatch and on unreadable hashes.
    async fn compare(&self, hash: &PasswordHash, candidate: &Password) -> bool;
}

#[derive(Debug, Clone, Error)]
pub enum TokenCodecError {
    #[error("token invalid or expired")]
    InvalidOrExpired,
    #[error("failed to sign token: {0}")]
    Signing(String),
}

/// Port for issuing and verifying lifecycle tokens.
pub trait TokenCodec: Send + Sync {
    fn issue(
        &self,
        subject: &AccountId,
        purpose: TokenPurpose,
        ttl: Duration,
    ) -> Result<LifecycleToken, TokenCodecError>;

    fn verify(
        &self,
        token: &LifecycleToken,
        expected_purpose: TokenPurpose,
    ) -> Result<AccountId, TokenCodecError>;
}

#[derive(Debug, Clone, Error)]
pub enum DispatchError {
    #[error("failed to serialize event: {0}")]
    Serialization(String),
    #[error("message producer is closed")]
    ProducerClosed,
    #[error("failed to deliver event: {0}")]
    Delivery(String),
}

/// Port for handing lifecycle events to the notification channel.
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    async fn dispatch(&self, event: &LifecycleEvent) -> Result<(), DispatchError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerClaims {
    pub subject: AccountId,
}

#[derive(Debug, Clone, Error)]
pub enum BearerValidationError {
    #[error("permission denied")]
    PermissionDenied,
    #[error("token validation failed: {0}")]
    Upstream(String),
}

/// Port for the upstream service that validates session bearer tokens.
#[async_trait]
pub trait BearerTokenValidator: Send + Sync {
    async fn validate(&self, bearer: &Secret<String>)
    -> Result<BearerClaims, BearerValidationError>;
}
