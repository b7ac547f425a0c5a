pub mod env {
    pub const APP_ENVIRONMENT_ENV_VAR: &str = "APP_ENVIRONMENT";
    pub const ENV_PREFIX: &str = "ACCOUNTS";
    pub const ENV_SEPARATOR: &str = "__";
}

pub const CONFIG_DIR: &str = "config";
pub const BASE_CONFIG_FILE: &str = "base";
pub const DEFAULT_ENVIRONMENT: &str = "local";

pub mod defaults {
    pub const POSTGRES_MAX_CONNECTIONS: u32 = 5;
    pub const REDIS_HOST_NAME: &str = "127.0.0.1";
    pub const TOKEN_TTL_IN_SECONDS: i64 = 30 * 60;
    pub const ARGON2_MEMORY_COST_KIB: u32 = 15000;
    pub const ARGON2_ITERATIONS: u32 = 2;
    pub const ARGON2_PARALLELISM: u32 = 1;
    pub const NOTIFICATIONS_TOPIC: &str = "notifications";
    pub const NOTIFICATIONS_MAX_RETRIES: u32 = 5;
    pub const REPLICA_TIMEOUT_IN_MILLIS: u64 = 1000;
    pub const UPSTREAM_AUTH_TIMEOUT_IN_MILLIS: u64 = 2000;
}

/// Confirmation links must stay valid for at least this long.
pub const MIN_CONFIRMATION_TTL_IN_SECONDS: i64 = 15 * 60;
/// Confirmation links must expire within this long.
pub const MAX_CONFIRMATION_TTL_IN_SECONDS: i64 = 30 * 60;
