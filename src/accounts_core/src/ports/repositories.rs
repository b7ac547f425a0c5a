use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    account::{Account, AccountChanges, NewAccount},
    account_id::AccountId,
    email::Email,
    password::PasswordHash,
    username::Username,
};

/// Failure reported by a repository. `code` is the vendor error code when the
/// storage engine supplied one, `constraint` the name of the violated
/// constraint for integrity errors.
#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    #[error("storage failure (code {}): {message}", .code.as_deref().unwrap_or("none"))]
    Storage {
        code: Option<String>,
        constraint: Option<String>,
        message: String,
    },
}

impl RepositoryError {
    pub fn storage(code: Option<&str>, message: impl Into<String>) -> Self {
        Self::Storage {
            code: code.map(str::to_owned),
            constraint: None,
            message: message.into(),
        }
    }

    pub fn with_constraint(self, name: impl Into<String>) -> Self {
        match self {
            Self::Storage { code, message, .. } => Self::Storage {
                code,
                constraint: Some(name.into()),
                message,
            },
        }
    }

    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Storage { code, .. } => code.as_deref(),
        }
    }

    pub fn constraint(&self) -> Option<&str> {
        match self {
            Self::Storage { constraint, .. } => constraint.as_deref(),
        }
    }
}

/// Account storage port.
///
/// Lookups return `Ok(None)` when nothing matches; "not found" is never an
/// error at this level. Mutations return whether a row was affected.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, RepositoryError>;
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Account>, RepositoryError>;
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, RepositoryError>;
    async fn exists(&self, id: &AccountId) -> Result<bool, RepositoryError>;
    async fn create(&self, account: NewAccount) -> Result<Account, RepositoryError>;
    async fn update_fields(
        &self,
        id: &AccountId,
        changes: AccountChanges,
    ) -> Result<Option<Account>, RepositoryError>;
    async fn set_active(&self, id: &AccountId, active: bool) -> Result<bool, RepositoryError>;
    async fn set_password_hash(
        &self,
        id: &AccountId,
        password_hash: &PasswordHash,
    ) -> Result<bool, RepositoryError>;
    /// Flips the active flag atomically and returns the new value.
    async fn toggle_active(&self, id: &AccountId) -> Result<Option<bool>, RepositoryError>;
    /// Adds `delta` to the rating atomically and returns the new value.
    async fn adjust_rating(&self, id: &AccountId, delta: i32)
    -> Result<Option<i32>, RepositoryError>;
}
