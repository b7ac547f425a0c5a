//! In-memory port doubles shared by the use case tests.

use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use accounts_core::{
    Account, AccountChanges, AccountId, AccountRepository, CredentialError, CredentialPolicy,
    DispatchError, Email, LifecycleEvent, LifecycleLinks, LifecycleToken, NewAccount,
    NotificationDispatcher, Password, PasswordHash, RepositoryError, Role, TokenCodec,
    TokenCodecError, TokenPurpose, Username,
};
use chrono::{Duration, Utc};
use secrecy::{ExposeSecret, Secret};
use tokio::sync::RwLock;

pub fn email(raw: &str) -> Email {
    Email::parse(Secret::new(raw.to_owned())).unwrap()
}

pub fn username(raw: &str) -> Username {
    Username::parse(raw).unwrap()
}

pub fn password(raw: &str) -> Password {
    Password::new(Secret::new(raw.to_owned()))
}

pub fn links() -> LifecycleLinks {
    LifecycleLinks {
        confirmation_url: "http://localhost:8080/confirm".to_owned(),
        password_reset_url: "http://localhost:8080/reset-password".to_owned(),
    }
}

/// Repository double mimicking Postgres: ids are numeric strings, anything
/// else is rejected with SQLSTATE 22P02, and rating overflow raises 22003.
#[derive(Clone, Default)]
pub struct MockAccountRepository {
    accounts: Arc<RwLock<HashMap<String, Account>>>,
    next_id: Arc<AtomicUsize>,
    writes: Arc<AtomicUsize>,
    failure: Arc<RwLock<Option<RepositoryError>>>,
}

impl MockAccountRepository {
    pub async fn insert(&self, name: &str, mail: &str, hash: &str, active: bool) -> Account {
        let account = self
            .create(NewAccount {
                username: username(name),
                email: email(mail),
                password_hash: PasswordHash::new(Secret::new(hash.to_owned())),
                role: Role::User,
                is_active: active,
            })
            .await
            .unwrap();
        self.writes.store(0, Ordering::SeqCst);
        account
    }

    pub async fn get(&self, id: &AccountId) -> Option<Account> {
        self.accounts.read().await.get(id.as_str()).cloned()
    }

    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub async fn fail_with(&self, error: RepositoryError) {
        *self.failure.write().await = Some(error);
    }

    async fn check(&self, id: Option<&AccountId>) -> Result<(), RepositoryError> {
        if let Some(error) = self.failure.read().await.clone() {
            return Err(error);
        }
        if let Some(id) = id {
            if id.as_str().is_empty() || !id.as_str().chars().all(|c| c.is_ascii_digit()) {
                return Err(RepositoryError::storage(
                    Some("22P02"),
                    format!("invalid input syntax for type uuid: \"{id}\""),
                ));
            }
        }
        Ok(())
    }

    fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl AccountRepository for MockAccountRepository {
    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, RepositoryError> {
        self.check(None).await?;
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| &a.email == email).cloned())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Account>, RepositoryError> {
        self.check(None).await?;
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| &a.username == username).cloned())
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, RepositoryError> {
        self.check(Some(id)).await?;
        Ok(self.accounts.read().await.get(id.as_str()).cloned())
    }

    async fn exists(&self, id: &AccountId) -> Result<bool, RepositoryError> {
        self.check(Some(id)).await?;
        Ok(self.accounts.read().await.contains_key(id.as_str()))
    }

    async fn create(&self, account: NewAccount) -> Result<Account, RepositoryError> {
        self.check(None).await?;
        self.record_write();
        let id = (self.next_id.fetch_add(1, Ordering::SeqCst) + 1).to_string();
        let now = Utc::now();
        let created = Account {
            id: AccountId::new(id.clone()),
            username: account.username,
            email: account.email,
            password_hash: account.password_hash,
            role: account.role,
            rating: 0,
            is_active: account.is_active,
            created_at: now,
            updated_at: now,
        };
        self.accounts.write().await.insert(id, created.clone());
        Ok(created)
    }

    async fn update_fields(
        &self,
        id: &AccountId,
        changes: AccountChanges,
    ) -> Result<Option<Account>, RepositoryError> {
        self.check(Some(id)).await?;
        self.record_write();
        let mut accounts = self.accounts.write().await;
        Ok(accounts.get_mut(id.as_str()).map(|account| {
            account.apply(changes, Utc::now());
            account.clone()
        }))
    }

    async fn set_active(&self, id: &AccountId, active: bool) -> Result<bool, RepositoryError> {
        self.update_fields(
            id,
            AccountChanges {
                is_active: Some(active),
                ..Default::default()
            },
        )
        .await
        .map(|updated| updated.is_some())
    }

    async fn set_password_hash(
        &self,
        id: &AccountId,
        password_hash: &PasswordHash,
    ) -> Result<bool, RepositoryError> {
        self.update_fields(
            id,
            AccountChanges {
                password_hash: Some(password_hash.clone()),
                ..Default::default()
            },
        )
        .await
        .map(|updated| updated.is_some())
    }

    async fn toggle_active(&self, id: &AccountId) -> Result<Option<bool>, RepositoryError> {
        self.check(Some(id)).await?;
        self.record_write();
        let mut accounts = self.accounts.write().await;
        Ok(accounts.get_mut(id.as_str()).map(|account| {
            account.is_active = !account.is_active;
            account.is_active
        }))
    }

    async fn adjust_rating(
        &self,
        id: &AccountId,
        delta: i32,
    ) -> Result<Option<i32>, RepositoryError> {
        self.check(Some(id)).await?;
        self.record_write();
        let mut accounts = self.accounts.write().await;
        let Some(account) = accounts.get_mut(id.as_str()) else {
            return Ok(None);
        };
        let rating = account
            .rating
            .checked_add(delta)
            .ok_or_else(|| RepositoryError::storage(Some("22003"), "integer out of range"))?;
        account.rating = rating;
        Ok(Some(rating))
    }
}

/// Stores passwords as `hashed:<plaintext>` so tests stay fast.
#[derive(Clone, Default)]
pub struct MockCredentialPolicy;

#[async_trait::async_trait]
impl CredentialPolicy for MockCredentialPolicy {
    async fn hash(&self, password: Password) -> Result<PasswordHash, CredentialError> {
        Ok(PasswordHash::new(Secret::new(format!(
            "hashed:{}",
            password.as_ref().expose_secret()
        ))))
    }

    async fn compare(&self, hash: &PasswordHash, candidate: &Password) -> bool {
        hash.as_ref().expose_secret() == &format!("hashed:{}", candidate.as_ref().expose_secret())
    }
}

/// Tokens look like `<purpose>:<subject>`; anything else fails to verify.
#[derive(Clone, Default)]
pub struct MockTokenCodec {
    pub fail_signing: bool,
}

impl TokenCodec for MockTokenCodec {
    fn issue(
        &self,
        subject: &AccountId,
        purpose: TokenPurpose,
        _ttl: Duration,
    ) -> Result<LifecycleToken, TokenCodecError> {
        if self.fail_signing {
            return Err(TokenCodecError::Signing("no key".to_owned()));
        }
        Ok(LifecycleToken::from(format!("{purpose}:{subject}")))
    }

    fn verify(
        &self,
        token: &LifecycleToken,
        expected_purpose: TokenPurpose,
    ) -> Result<AccountId, TokenCodecError> {
        token
            .expose()
            .strip_prefix(&format!("{expected_purpose}:"))
            .map(AccountId::from)
            .ok_or(TokenCodecError::InvalidOrExpired)
    }
}

#[derive(Clone, Default)]
pub struct RecordingDispatcher {
    events: Arc<RwLock<Vec<LifecycleEvent>>>,
    attempts: Arc<AtomicUsize>,
    closed: bool,
}

impl RecordingDispatcher {
    pub fn closed() -> Self {
        Self {
            closed: true,
            ..Default::default()
        }
    }

    pub async fn events(&self) -> Vec<LifecycleEvent> {
        self.events.read().await.clone()
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl NotificationDispatcher for RecordingDispatcher {
    async fn dispatch(&self, event: &LifecycleEvent) -> Result<(), DispatchError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.closed {
            return Err(DispatchError::ProducerClosed);
        }
        self.events.write().await.push(event.clone());
        Ok(())
    }
}
