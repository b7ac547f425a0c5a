use chrono::{DateTime, Utc};

use super::{
    account_id::AccountId,
    email::Email,
    password::{Password, PasswordHash},
    role::Role,
    username::Username,
};

/// A persisted user account.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    pub username: Username,
    pub email: Email,
    pub password_hash: PasswordHash,
    pub role: Role,
    pub rating: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row handed to the repository on registration. The repository assigns the
/// id and timestamps.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: Username,
    pub email: Email,
    pub password_hash: PasswordHash,
    pub role: Role,
    pub is_active: bool,
}

/// Partial update requested by a caller. Only fields that are `Some` change.
#[derive(Debug, Clone, Default)]
pub struct AccountUpdate {
    pub username: Option<Username>,
    pub email: Option<Email>,
    pub password: Option<Password>,
    pub role: Option<Role>,
    pub rating: Option<i32>,
    pub is_active: Option<bool>,
}

impl AccountUpdate {
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.role.is_none()
            && self.rating.is_none()
            && self.is_active.is_none()
    }
}

/// Partial update as written to storage: the password has already been hashed.
#[derive(Debug, Clone, Default)]
pub struct AccountChanges {
    pub username: Option<Username>,
    pub email: Option<Email>,
    pub password_hash: Option<PasswordHash>,
    pub role: Option<Role>,
    pub rating: Option<i32>,
    pub is_active: Option<bool>,
}

impl Account {
    /// Applies each present field of `changes` to this account in place.
    pub fn apply(&mut self, changes: AccountChanges, now: DateTime<Utc>) {
        if let Some(username) = changes.username {
            self.username = username;
        }
        if let Some(email) = changes.email {
            self.email = email;
        }
        if let Some(password_hash) = changes.password_hash {
            self.password_hash = password_hash;
        }
        if let Some(role) = changes.role {
            self.role = role;
        }
        if let Some(rating) = changes.rating {
            self.rating = rating;
        }
        if let Some(is_active) = changes.is_active {
            self.is_active = is_active;
        }
        self.updated_at = now;
    }
}
