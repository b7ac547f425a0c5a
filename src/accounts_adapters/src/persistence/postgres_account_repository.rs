use accounts_core::{
    Account, AccountChanges, AccountId, AccountRepository, Email, NewAccount, PasswordHash,
    RepositoryError, Role, Username,
};
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};
use sqlx::{PgPool, Pool, Postgres};

// Ids are bound as text and cast in SQL so a malformed id fails inside
// Postgres with SQLSTATE 22P02 instead of being rejected client side.
const ACCOUNT_COLUMNS: &str =
    "id::text AS id, username, email, password, role, rating, is_active, created_at, updated_at";

pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresAccountRepository { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: String,
    username: String,
    email: String,
    password: String,
    role: i16,
    rating: i32,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = RepositoryError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let corrupt = |e: &dyn std::fmt::Display| {
            RepositoryError::storage(None, format!("corrupt account row {}: {e}", row.id))
        };
        let username = Username::parse(row.username.as_str()).map_err(|e| corrupt(&e))?;
        let email = Email::parse(Secret::new(row.email.clone())).map_err(|e| corrupt(&e))?;
        let role = Role::from_code(row.role)
            .ok_or_else(|| corrupt(&format!("unknown role code {}", row.role)))?;

        Ok(Account {
            id: AccountId::new(row.id),
            username,
            email,
            password_hash: PasswordHash::new(Secret::new(row.password)),
            role,
            rating: row.rating,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn storage_error(error: sqlx::Error) -> RepositoryError {
    let db_err = error.as_database_error();
    let code = db_err
        .and_then(|db_err| db_err.code())
        .map(|code| code.into_owned());
    let constraint = db_err
        .and_then(|db_err| db_err.constraint())
        .map(str::to_owned);
    RepositoryError::Storage {
        code,
        constraint,
        message: error.to_string(),
    }
}

impl PostgresAccountRepository {
    async fn find_one(
        &self,
        filter: &str,
        value: &str,
    ) -> Result<Option<Account>, RepositoryError> {
        let sql = format!("SELECT {ACCOUNT_COLUMNS} FROM users WHERE {filter}");
        sqlx::query_as::<_, AccountRow>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?
            .map(Account::try_from)
            .transpose()
    }
}

#[async_trait::async_trait]
impl AccountRepository for PostgresAccountRepository {
    #[tracing::instrument(name = "Finding account by email in PostgreSQL", skip_all)]
    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, RepositoryError> {
        self.find_one("email = $1", email.as_ref().expose_secret())
            .await
    }

    #[tracing::instrument(name = "Finding account by username in PostgreSQL", skip_all)]
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Account>, RepositoryError> {
        self.find_one("username = $1", username.as_str()).await
    }

    #[tracing::instrument(name = "Finding account by id in PostgreSQL", skip(self))]
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, RepositoryError> {
        self.find_one("id = $1::uuid", id.as_str()).await
    }

    #[tracing::instrument(name = "Checking account existence in PostgreSQL", skip(self))]
    async fn exists(&self, id: &AccountId) -> Result<bool, RepositoryError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM users WHERE id = $1::uuid)")
            .bind(id.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(storage_error)
    }

    #[tracing::instrument(name = "Adding account to PostgreSQL", skip_all)]
    async fn create(&self, account: NewAccount) -> Result<Account, RepositoryError> {
        let sql = format!(
            r#"
                INSERT INTO users (username, email, password, role, is_active)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING {ACCOUNT_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(account.username.as_str())
            .bind(account.email.as_ref().expose_secret())
            .bind(account.password_hash.as_ref().expose_secret())
            .bind(account.role.code())
            .bind(account.is_active)
            .fetch_one(&self.pool)
            .await
            .map_err(storage_error)?;

        Account::try_from(row)
    }

    #[tracing::instrument(name = "Updating account fields in PostgreSQL", skip(self, changes))]
    async fn update_fields(
        &self,
        id: &AccountId,
        changes: AccountChanges,
    ) -> Result<Option<Account>, RepositoryError> {
        let sql = format!(
            r#"
                UPDATE users
                SET username = COALESCE($2, username),
                    email = COALESCE($3, email),
                    password = COALESCE($4, password),
                    role = COALESCE($5, role),
                    rating = COALESCE($6, rating),
                    is_active = COALESCE($7, is_active),
                    updated_at = now()
                WHERE id = $1::uuid
                RETURNING {ACCOUNT_COLUMNS}
            "#
        );

        sqlx::query_as::<_, AccountRow>(&sql)
            .bind(id.as_str())
            .bind(changes.username.as_ref().map(Username::as_str))
            .bind(changes.email.as_ref().map(|e| e.as_ref().expose_secret().clone()))
            .bind(
                changes
                    .password_hash
                    .as_ref()
                    .map(|h| h.as_ref().expose_secret().clone()),
            )
            .bind(changes.role.map(Role::code))
            .bind(changes.rating)
            .bind(changes.is_active)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?
            .map(Account::try_from)
            .transpose()
    }

    #[tracing::instrument(name = "Setting account active flag in PostgreSQL", skip(self))]
    async fn set_active(&self, id: &AccountId, active: bool) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r#"
                UPDATE users
                SET is_active = $2, updated_at = now()
                WHERE id = $1::uuid
            "#,
        )
        .bind(id.as_str())
        .bind(active)
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[tracing::instrument(name = "Set new password hash", skip(self, password_hash))]
    async fn set_password_hash(
        &self,
        id: &AccountId,
        password_hash: &PasswordHash,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r#"
                UPDATE users
                SET password = $2, updated_at = now()
                WHERE id = $1::uuid
            "#,
        )
        .bind(id.as_str())
        .bind(password_hash.as_ref().expose_secret())
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[tracing::instrument(name = "Toggling account active flag in PostgreSQL", skip(self))]
    async fn toggle_active(&self, id: &AccountId) -> Result<Option<bool>, RepositoryError> {
        sqlx::query_scalar::<_, bool>(
            r#"
                UPDATE users
                SET is_active = NOT is_active, updated_at = now()
                WHERE id = $1::uuid
                RETURNING is_active
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)
    }

    #[tracing::instrument(name = "Adjusting account rating in PostgreSQL", skip(self))]
    async fn adjust_rating(
        &self,
        id: &AccountId,
        delta: i32,
    ) -> Result<Option<i32>, RepositoryError> {
        sqlx::query_scalar::<_, i32>(
            r#"
                UPDATE users
                SET rating = rating + $2, updated_at = now()
                WHERE id = $1::uuid
                RETURNING rating
            "#,
        )
        .bind(id.as_str())
        .bind(delta)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)
    }
}
