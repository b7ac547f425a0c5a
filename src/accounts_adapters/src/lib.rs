pub mod auth_validation;
pub mod config;
pub mod credentials;
pub mod messaging;
pub mod persistence;
pub mod tokens;

pub use auth_validation::RemoteTokenValidator;
pub use credentials::Argon2CredentialPolicy;
pub use messaging::{
    InMemoryProducer, MessageProducer, ProducerError, ProducerNotificationDispatcher,
    RedisStreamProducer,
};
pub use persistence::{HashMapAccountRepository, PostgresAccountRepository};
pub use tokens::JwtTokenCodec;
