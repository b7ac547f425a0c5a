pub mod helpers;
pub mod service;
pub mod telemetry;

pub use helpers::{configure_postgresql, get_postgres_pool, get_redis_client};
pub use service::{AccountsService, ProductionLifecycle, ServiceError};
pub use telemetry::init_tracing;
