use accounts_core::LifecycleLinks;
use config::{Config, ConfigBuilder, Environment, File, builder::DefaultState};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use thiserror::Error;

use super::constants::{
    BASE_CONFIG_FILE, CONFIG_DIR, DEFAULT_ENVIRONMENT, MAX_CONFIRMATION_TTL_IN_SECONDS,
    MIN_CONFIRMATION_TTL_IN_SECONDS, defaults, env,
};
use crate::messaging::{ReplicaAcks, StreamProducerConfig};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to load settings: {0}")]
    Load(#[from] config::ConfigError),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub postgres: PostgresSettings,
    #[serde(default)]
    pub redis: RedisSettings,
    pub tokens: TokenSettings,
    #[serde(default)]
    pub credentials: CredentialsSettings,
    #[serde(default)]
    pub notifications: NotificationSettings,
    pub links: LinksSettings,
    pub upstream_auth: Option<UpstreamAuthSettings>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostgresSettings {
    pub url: Secret<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedisSettings {
    pub host_name: String,
}

impl Default for RedisSettings {
    fn default() -> Self {
        Self {
            host_name: defaults::REDIS_HOST_NAME.to_owned(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenSettings {
    pub secret: Secret<String>,
    #[serde(default = "default_token_ttl")]
    pub confirmation_ttl_in_seconds: i64,
    #[serde(default = "default_token_ttl")]
    pub password_reset_ttl_in_seconds: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CredentialsSettings {
    pub memory_cost_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for CredentialsSettings {
    fn default() -> Self {
        Self {
            memory_cost_kib: defaults::ARGON2_MEMORY_COST_KIB,
            iterations: defaults::ARGON2_ITERATIONS,
            parallelism: defaults::ARGON2_PARALLELISM,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    pub topic: String,
    pub max_retries: u32,
    /// Unset waits for every replica connected to the primary.
    pub min_replicas: Option<usize>,
    pub replica_timeout_in_millis: u64,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            topic: defaults::NOTIFICATIONS_TOPIC.to_owned(),
            max_retries: defaults::NOTIFICATIONS_MAX_RETRIES,
            min_replicas: None,
            replica_timeout_in_millis: defaults::REPLICA_TIMEOUT_IN_MILLIS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LinksSettings {
    pub confirmation_url: String,
    pub password_reset_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamAuthSettings {
    pub verify_token_url: String,
    #[serde(default = "default_upstream_timeout")]
    pub timeout_in_millis: u64,
}

fn default_max_connections() -> u32 {
    defaults::POSTGRES_MAX_CONNECTIONS
}

fn default_token_ttl() -> i64 {
    defaults::TOKEN_TTL_IN_SECONDS
}

fn default_upstream_timeout() -> u64 {
    defaults::UPSTREAM_AUTH_TIMEOUT_IN_MILLIS
}

impl Settings {
    /// Loads settings from `config/base.json`, then
    /// `config/{APP_ENVIRONMENT}.json`, then `ACCOUNTS__*` environment
    /// variables, each layer overriding the previous one. A `.env` file is
    /// read first when present.
    pub fn load() -> Result<Self, SettingsError> {
        dotenvy::dotenv().ok();

        let environment = std::env::var(env::APP_ENVIRONMENT_ENV_VAR)
            .unwrap_or_else(|_| DEFAULT_ENVIRONMENT.to_owned());

        let base_file = format!("{CONFIG_DIR}/{BASE_CONFIG_FILE}");
        let environment_file = format!("{CONFIG_DIR}/{environment}");
        let builder = Config::builder()
            .add_source(File::with_name(&base_file).required(false))
            .add_source(File::with_name(&environment_file).required(false))
            .add_source(Self::environment());

        Self::from_builder(builder)
    }

    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, SettingsError> {
        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn environment() -> Environment {
        Environment::with_prefix(env::ENV_PREFIX)
            .separator(env::ENV_SEPARATOR)
            .try_parsing(true)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let ttl = self.tokens.confirmation_ttl_in_seconds;
        if !(MIN_CONFIRMATION_TTL_IN_SECONDS..=MAX_CONFIRMATION_TTL_IN_SECONDS).contains(&ttl) {
            return Err(SettingsError::Invalid(format!(
                "tokens.confirmation_ttl_in_seconds must be between {MIN_CONFIRMATION_TTL_IN_SECONDS} and {MAX_CONFIRMATION_TTL_IN_SECONDS}, got {ttl}"
            )));
        }
        if self.tokens.password_reset_ttl_in_seconds <= 0 {
            return Err(SettingsError::Invalid(
                "tokens.password_reset_ttl_in_seconds must be positive".to_owned(),
            ));
        }
        if self.tokens.secret.expose_secret().is_empty() {
            return Err(SettingsError::Invalid("tokens.secret is empty".to_owned()));
        }
        if self.notifications.min_replicas == Some(0) {
            return Err(SettingsError::Invalid(
                "notifications.min_replicas must be at least 1 when set".to_owned(),
            ));
        }
        if self.links.confirmation_url.is_empty() || self.links.password_reset_url.is_empty() {
            return Err(SettingsError::Invalid("links must not be empty".to_owned()));
        }
        Ok(())
    }

    pub fn confirmation_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.tokens.confirmation_ttl_in_seconds)
    }

    pub fn password_reset_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.tokens.password_reset_ttl_in_seconds)
    }

    pub fn lifecycle_links(&self) -> LifecycleLinks {
        LifecycleLinks {
            confirmation_url: self.links.confirmation_url.clone(),
            password_reset_url: self.links.password_reset_url.clone(),
        }
    }

    pub fn stream_producer_config(&self) -> StreamProducerConfig {
        StreamProducerConfig {
            max_retries: self.notifications.max_retries,
            replica_acks: match self.notifications.min_replicas {
                Some(replicas) => ReplicaAcks::AtLeast(replicas),
                None => ReplicaAcks::AllConnected,
            },
            replica_timeout_in_millis: self.notifications.replica_timeout_in_millis,
        }
    }
}
