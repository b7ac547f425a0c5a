use accounts_core::{AccountError, AccountId, BearerTokenValidator};
use secrecy::Secret;

/// Resolve bearer subject use case - asks the upstream auth service which
/// account a session bearer token belongs to
pub struct ResolveBearerSubjectUseCase<'a, V> {
    validator: &'a V,
}

impl<'a, V> ResolveBearerSubjectUseCase<'a, V>
where
    V: BearerTokenValidator,
{
    pub fn new(validator: &'a V) -> Self {
        Self { validator }
    }

    /// A rejected token maps to `TokenInvalidOrExpired`; any other upstream
    /// failure is reported as internal.
    #[tracing::instrument(name = "ResolveBearerSubjectUseCase::execute", skip_all)]
    pub async fn execute(&self, bearer: &Secret<String>) -> Result<AccountId, AccountError> {
        let claims = self.validator.validate(bearer).await?;
        Ok(claims.subject)
    }
}
