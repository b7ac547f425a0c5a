pub mod argon2_credential_policy;

pub use argon2_credential_policy::Argon2CredentialPolicy;
