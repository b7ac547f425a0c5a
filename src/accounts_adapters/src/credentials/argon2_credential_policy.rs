use accounts_core::{CredentialError, CredentialPolicy, Password, PasswordHash};
use argon2::{
    Algorithm, Argon2, Params, PasswordVerifier, Version,
    password_hash::{self, PasswordHasher, SaltString, rand_core},
};
use secrecy::{ExposeSecret, Secret};

/// Argon2id hashing with configurable cost. Hashes are PHC strings, so the
/// parameters used at hashing time travel with the hash.
#[derive(Debug, Clone)]
pub struct Argon2CredentialPolicy {
    params: Params,
}

impl Argon2CredentialPolicy {
    pub fn new(
        memory_cost_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, CredentialError> {
        let params = Params::new(memory_cost_kib, iterations, parallelism, None)
            .map_err(|e| CredentialError::HashingFailed(e.to_string()))?;
        Ok(Self { params })
    }

    fn hasher(params: Params) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
    }
}

impl Default for Argon2CredentialPolicy {
    fn default() -> Self {
        Self {
            params: Params::new(15000, 2, 1, None).unwrap_or_default(),
        }
    }
}

#[async_trait::async_trait]
impl CredentialPolicy for Argon2CredentialPolicy {
    #[tracing::instrument(name = "Computing password hash", skip_all)]
    async fn hash(&self, password: Password) -> Result<PasswordHash, CredentialError> {
        let current_span: tracing::Span = tracing::Span::current();
        let params = self.params.clone();

        let result = tokio::task::spawn_blocking(move || {
            current_span.in_scope(move || {
                let salt: SaltString = SaltString::generate(rand_core::OsRng);
                Self::hasher(params)
                    .hash_password(password.as_ref().expose_secret().as_bytes(), &salt)
                    .map(|h| PasswordHash::new(Secret::new(h.to_string())))
                    .map_err(|e| CredentialError::HashingFailed(e.to_string()))
            })
        })
        .await
        .map_err(|e| CredentialError::HashingFailed(e.to_string()))?;

        result
    }

    #[tracing::instrument(name = "Verify password hash", skip_all)]
    async fn compare(&self, hash: &PasswordHash, candidate: &Password) -> bool {
        let current_span: tracing::Span = tracing::Span::current();
        let params = self.params.clone();
        let expected = hash.clone();
        let candidate = candidate.clone();

        tokio::task::spawn_blocking(move || {
            current_span.in_scope(|| {
                let encoded = expected.as_ref().expose_secret();
                let Ok(expected) = password_hash::PasswordHash::new(encoded) else {
                    return false;
                };
                Self::hasher(params)
                    .verify_password(candidate.as_ref().expose_secret().as_bytes(), &expected)
                    .is_ok()
            })
        })
        .await
        .unwrap_or(false)
    }
}
