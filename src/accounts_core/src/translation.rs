//! Translation of storage failures into the account error taxonomy.
//!
//! Repositories report failures with the vendor error code attached (SQLSTATE
//! for Postgres) and, for integrity errors, the violated constraint. Use cases
//! pass every repository error that may stem from caller input through
//! [`translate_storage_error`] right where the call returns.

use crate::{AccountError, RepositoryError};

/// SQLSTATE `invalid_text_representation`, raised for malformed uuids.
pub const INVALID_TEXT_REPRESENTATION: &str = "22P02";
/// SQLSTATE `numeric_value_out_of_range`, raised when arithmetic overflows a column.
pub const NUMERIC_VALUE_OUT_OF_RANGE: &str = "22003";
/// SQLSTATE `unique_violation`.
pub const UNIQUE_VIOLATION: &str = "23505";

pub const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";
pub const USERNAME_UNIQUE_CONSTRAINT: &str = "users_username_key";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageErrorClass {
    InvalidIdentifierFormat,
    NumericOverflow,
    EmailTaken,
    UsernameTaken,
    Unclassified,
}

pub fn classify_storage_code(code: Option<&str>, constraint: Option<&str>) -> StorageErrorClass {
    match (code, constraint) {
        (Some(INVALID_TEXT_REPRESENTATION), _) => StorageErrorClass::InvalidIdentifierFormat,
        (Some(NUMERIC_VALUE_OUT_OF_RANGE), _) => StorageErrorClass::NumericOverflow,
        (Some(UNIQUE_VIOLATION), Some(EMAIL_UNIQUE_CONSTRAINT)) => StorageErrorClass::EmailTaken,
        (Some(UNIQUE_VIOLATION), Some(USERNAME_UNIQUE_CONSTRAINT)) => {
            StorageErrorClass::UsernameTaken
        }
        _ => StorageErrorClass::Unclassified,
    }
}

pub fn translate_storage_error(error: RepositoryError) -> AccountError {
    match classify_storage_code(error.code(), error.constraint()) {
        StorageErrorClass::InvalidIdentifierFormat => AccountError::InvalidIdentifierFormat,
        StorageErrorClass::NumericOverflow => AccountError::NumericOverflow,
        StorageErrorClass::EmailTaken => AccountError::EmailExists,
        StorageErrorClass::UsernameTaken => AccountError::UsernameExists,
        StorageErrorClass::Unclassified => AccountError::Internal(error.to_string()),
    }
}
