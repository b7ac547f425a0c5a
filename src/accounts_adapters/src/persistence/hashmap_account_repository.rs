use std::collections::HashMap;
use std::sync::Arc;

use accounts_core::{
    Account, AccountChanges, AccountId, AccountRepository, Email, NewAccount, PasswordHash,
    RepositoryError, Username,
    translation::{INVALID_TEXT_REPRESENTATION, NUMERIC_VALUE_OUT_OF_RANGE, UNIQUE_VIOLATION},
};
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory account store. Ids are uuids and failures carry the same
/// SQLSTATE codes Postgres would raise, so error translation behaves the same
/// against either store.
#[derive(Default, Clone)]
pub struct HashMapAccountRepository {
    accounts: Arc<RwLock<HashMap<Uuid, Account>>>,
}

impl HashMapAccountRepository {
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

fn parse_id(id: &AccountId) -> Result<Uuid, RepositoryError> {
    Uuid::parse_str(id.as_str()).map_err(|_| {
        RepositoryError::storage(
            Some(INVALID_TEXT_REPRESENTATION),
            format!("invalid input syntax for type uuid: \"{id}\""),
        )
    })
}

fn unique_violation(column: &str) -> RepositoryError {
    let constraint = format!("users_{column}_key");
    RepositoryError::storage(
        Some(UNIQUE_VIOLATION),
        format!("duplicate key value violates unique constraint \"{constraint}\""),
    )
    .with_constraint(constraint)
}

fn check_unique(
    accounts: &HashMap<Uuid, Account>,
    owner: Option<Uuid>,
    username: Option<&Username>,
    email: Option<&Email>,
) -> Result<(), RepositoryError> {
    for (id, account) in accounts {
        if Some(*id) == owner {
            continue;
        }
        if username.is_some_and(|u| *u == account.username) {
            return Err(unique_violation("username"));
        }
        if email.is_some_and(|e| *e == account.email) {
            return Err(unique_violation("email"));
        }
    }
    Ok(())
}

#[async_trait::async_trait]
impl AccountRepository for HashMapAccountRepository {
    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, RepositoryError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| &a.email == email).cloned())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Account>, RepositoryError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| &a.username == username).cloned())
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, RepositoryError> {
        let id = parse_id(id)?;
        Ok(self.accounts.read().await.get(&id).cloned())
    }

    async fn exists(&self, id: &AccountId) -> Result<bool, RepositoryError> {
        let id = parse_id(id)?;
        Ok(self.accounts.read().await.contains_key(&id))
    }

    async fn create(&self, account: NewAccount) -> Result<Account, RepositoryError> {
        let mut accounts = self.accounts.write().await;
        check_unique(
            &accounts,
            None,
            Some(&account.username),
            Some(&account.email),
        )?;

        let id = Uuid::new_v4();
        let now = Utc::now();
        let created = Account {
            id: AccountId::new(id.to_string()),
            username: account.username,
            email: account.email,
            password_hash: account.password_hash,
            role: account.role,
            rating: 0,
            is_active: account.is_active,
            created_at: now,
            updated_at: now,
        };
        accounts.insert(id, created.clone());
        Ok(created)
    }

    async fn update_fields(
        &self,
        id: &AccountId,
        changes: AccountChanges,
    ) -> Result<Option<Account>, RepositoryError> {
        let id = parse_id(id)?;
        let mut accounts = self.accounts.write().await;
        if !accounts.contains_key(&id) {
            return Ok(None);
        }
        check_unique(
            &accounts,
            Some(id),
            changes.username.as_ref(),
            changes.email.as_ref(),
        )?;

        Ok(accounts.get_mut(&id).map(|account| {
            account.apply(changes, Utc::now());
            account.clone()
        }))
    }

    async fn set_active(&self, id: &AccountId, active: bool) -> Result<bool, RepositoryError> {
        let id = parse_id(id)?;
        let mut accounts = self.accounts.write().await;
        let Some(account) = accounts.get_mut(&id) else {
            return Ok(false);
        };
        account.is_active = active;
        account.updated_at = Utc::now();
        Ok(true)
    }

    async fn set_password_hash(
        &self,
        id: &AccountId,
        password_hash: &PasswordHash,
    ) -> Result<bool, RepositoryError> {
        let id = parse_id(id)?;
        let mut accounts = self.accounts.write().await;
        let Some(account) = accounts.get_mut(&id) else {
            return Ok(false);
        };
        account.password_hash = password_hash.clone();
        account.updated_at = Utc::now();
        Ok(true)
    }

    async fn toggle_active(&self, id: &AccountId) -> Result<Option<bool>, RepositoryError> {
        let id = parse_id(id)?;
        let mut accounts = self.accounts.write().await;
        Ok(accounts.get_mut(&id).map(|account| {
            account.is_active = !account.is_active;
            account.updated_at = Utc::now();
            account.is_active
        }))
    }

    async fn adjust_rating(
        &self,
        id: &AccountId,
        delta: i32,
    ) -> Result<Option<i32>, RepositoryError> {
        let id = parse_id(id)?;
        let mut accounts = self.accounts.write().await;
        let Some(account) = accounts.get_mut(&id) else {
            return Ok(None);
        };
        let rating = account.rating.checked_add(delta).ok_or_else(|| {
            RepositoryError::storage(Some(NUMERIC_VALUE_OUT_OF_RANGE), "integer out of range")
        })?;
        account.rating = rating;
        account.updated_at = Utc::now();
        Ok(Some(rating))
    }
}
