//! # Accounts - Account Lifecycle Library
//!
//! Facade crate re-exporting the public APIs of the account lifecycle
//! components: registration, confirmation, password change and reset, rating
//! and activation management.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! accounts = { path = "../accounts" }
//! ```
//!
//! ## Structure
//!
//! - **Core domain types**: `Account`, `Email`, `Username`, `Password`, `AccountError`, etc.
//! - **Ports**: `AccountRepository`, `CredentialPolicy`, `TokenCodec`, `NotificationDispatcher`
//! - **Use cases**: `RegisterUseCase`, `ConfirmAccountUseCase`, etc., composed by
//!   `AccountLifecycle`
//! - **Adapters**: `PostgresAccountRepository`, `JwtTokenCodec`, `RedisStreamProducer`, etc.
//! - **Service**: `AccountsService` - the wired production lifecycle

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use accounts_core::*;
}

// Re-export most commonly used core types at the root level
pub use accounts_core::{
    Account, AccountError, AccountId, AccountUpdate, Email, LifecycleEvent, LifecycleEventKind,
    LifecycleLinks, LifecycleToken, Password, PasswordHash, Role, TokenPurpose, Username,
};

// ============================================================================
// Ports
// ============================================================================

/// Port trait definitions
pub mod ports {
    pub use accounts_core::{
        AccountRepository, BearerTokenValidator, Clock, CredentialPolicy, NotificationDispatcher,
        RepositoryError, TokenCodec,
    };
}

pub use accounts_core::{
    AccountRepository, BearerTokenValidator, Clock, CredentialPolicy, NotificationDispatcher,
    TokenCodec,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use accounts_application::use_cases::*;
}

pub use accounts_application::{AccountLifecycle, LifecycleConfig};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// Persistence implementations
    pub mod persistence {
        pub use accounts_adapters::persistence::*;
    }

    /// Lifecycle token codec
    pub mod tokens {
        pub use accounts_adapters::tokens::*;
    }

    /// Message producers and the notification dispatcher
    pub mod messaging {
        pub use accounts_adapters::messaging::*;
    }

    /// Upstream bearer-token validation
    pub mod auth {
        pub use accounts_adapters::auth_validation::*;
    }

    /// Configuration
    pub mod config {
        pub use accounts_adapters::config::*;
    }
}

// Re-export commonly used adapters at root level
pub use accounts_adapters::{
    Argon2CredentialPolicy, HashMapAccountRepository, InMemoryProducer, JwtTokenCodec,
    PostgresAccountRepository, ProducerNotificationDispatcher, RedisStreamProducer,
    RemoteTokenValidator,
};

// ============================================================================
// Accounts Service (Main Entry Point)
// ============================================================================

pub use accounts_service::{
    AccountsService, configure_postgresql, get_postgres_pool, get_redis_client, init_tracing,
};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing port traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};
