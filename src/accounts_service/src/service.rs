use std::time::Duration;

use accounts_adapters::{
    Argon2CredentialPolicy, JwtTokenCodec, PostgresAccountRepository, ProducerError,
    ProducerNotificationDispatcher, RedisStreamProducer, RemoteTokenValidator, config::Settings,
};
use accounts_application::{AccountLifecycle, LifecycleConfig, ResolveBearerSubjectUseCase};
use accounts_core::{AccountError, AccountId, CredentialError};
use secrecy::Secret;
use thiserror::Error;

use crate::helpers::{configure_postgresql, get_redis_client};

pub type ProductionLifecycle = AccountLifecycle<
    PostgresAccountRepository,
    Argon2CredentialPolicy,
    JwtTokenCodec,
    ProducerNotificationDispatcher<RedisStreamProducer>,
>;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),
    #[error("credential policy error: {0}")]
    Credentials(#[from] CredentialError),
    #[error("http client error: {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error("message producer error: {0}")]
    Producer(#[from] ProducerError),
}

/// Fully wired account lifecycle backed by Postgres, Argon2, JWT and Redis
/// Streams, plus the optional upstream bearer-token validator.
pub struct AccountsService {
    lifecycle: ProductionLifecycle,
    bearer_validator: Option<RemoteTokenValidator>,
}

impl AccountsService {
    /// Connects to every backing service named in `settings` and runs
    /// pending migrations.
    #[tracing::instrument(name = "AccountsService::build", skip_all)]
    pub async fn build(settings: &Settings) -> Result<Self, ServiceError> {
        let pg_pool = configure_postgresql(settings).await?;
        let repository = PostgresAccountRepository::new(pg_pool);

        let credentials = Argon2CredentialPolicy::new(
            settings.credentials.memory_cost_kib,
            settings.credentials.iterations,
            settings.credentials.parallelism,
        )?;

        let tokens = JwtTokenCodec::new(settings.tokens.secret.clone());

        let redis_client = get_redis_client(&settings.redis.host_name)?;
        let producer =
            RedisStreamProducer::connect(&redis_client, settings.stream_producer_config()).await?;
        let dispatcher =
            ProducerNotificationDispatcher::new(producer, settings.notifications.topic.clone());

        let bearer_validator = match &settings.upstream_auth {
            Some(upstream) => {
                let http_client = reqwest::Client::builder()
                    .timeout(Duration::from_millis(upstream.timeout_in_millis))
                    .build()?;
                Some(RemoteTokenValidator::new(
                    upstream.verify_token_url.clone(),
                    http_client,
                ))
            }
            None => None,
        };

        let lifecycle = AccountLifecycle::new(
            repository,
            credentials,
            tokens,
            dispatcher,
            LifecycleConfig {
                links: settings.lifecycle_links(),
                confirmation_ttl: settings.confirmation_ttl(),
                password_reset_ttl: settings.password_reset_ttl(),
            },
        );

        Ok(Self {
            lifecycle,
            bearer_validator,
        })
    }

    pub fn lifecycle(&self) -> &ProductionLifecycle {
        &self.lifecycle
    }

    /// Resolves the account behind a session bearer token through the
    /// upstream auth service.
    pub async fn resolve_bearer_subject(
        &self,
        bearer: &Secret<String>,
    ) -> Result<AccountId, AccountError> {
        let validator = self.bearer_validator.as_ref().ok_or_else(|| {
            AccountError::Internal("upstream auth validation is not configured".to_owned())
        })?;
        ResolveBearerSubjectUseCase::new(validator)
            .execute(bearer)
            .await
    }

    /// Stops the message producer. Operations that need to notify fail with
    /// `NotificationFailed` afterwards.
    pub async fn shutdown(&self) -> Result<(), ServiceError> {
        self.lifecycle.dispatcher().close().await?;
        tracing::info!("Accounts service shut down");
        Ok(())
    }
}
