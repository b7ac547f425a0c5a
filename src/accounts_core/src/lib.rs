pub mod clock;
pub mod domain;
pub mod ports;
pub mod translation;

// Re-export commonly used types for convenience
pub use domain::{
    account::{Account, AccountChanges, AccountUpdate, NewAccount},
    account_id::AccountId,
    email::Email,
    error::AccountError,
    event::{LifecycleEvent, LifecycleEventKind, LifecycleLinks},
    password::{MIN_PASSWORD_LENGTH, Password, PasswordHash},
    role::Role,
    token::{LifecycleToken, TokenPurpose},
    username::Username,
};

pub use ports::{
    repositories::{AccountRepository, RepositoryError},
    services::{
        BearerClaims, BearerTokenValidator, BearerValidationError, CredentialError,
        CredentialPolicy, DispatchError, NotificationDispatcher, TokenCodec, TokenCodecError,
    },
};

pub use clock::{Clock, SystemClock};
pub use translation::{StorageErrorClass, classify_storage_code, translate_storage_error};
