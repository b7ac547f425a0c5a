use accounts_core::{
    AccountError, AccountId, AccountRepository, CredentialPolicy, Password,
    translate_storage_error,
};

/// Reset password use case - sets a new password for an account without
/// checking the old one. Callers must have verified a password reset token
/// for `id` first.
pub struct ResetPasswordUseCase<'a, R, C> {
    repository: &'a R,
    credentials: &'a C,
}

impl<'a, R, C> ResetPasswordUseCase<'a, R, C>
where
    R: AccountRepository,
    C: CredentialPolicy,
{
    pub fn new(repository: &'a R, credentials: &'a C) -> Self {
        Self {
            repository,
            credentials,
        }
    }

    #[tracing::instrument(name = "ResetPasswordUseCase::execute", skip(self, new_password))]
    pub async fn execute(
        &self,
        id: &AccountId,
        new_password: Password,
    ) -> Result<(), AccountError> {
        self.credentials.validate(&new_password)?;
        let password_hash = self.credentials.hash(new_password).await?;

        let updated = self
            .repository
            .set_password_hash(id, &password_hash)
            .await
            .map_err(translate_storage_error)?;

        if !updated {
            return Err(AccountError::UserNotFound);
        }

        tracing::info!("Password reset");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockAccountRepository, MockCredentialPolicy, password};

    #[tokio::test]
    async fn test_reset_password_overwrites_hash() {
        let repository = MockAccountRepository::default();
        let credentials = MockCredentialPolicy;
        let account = repository
            .insert("alice", "alice@example.com", "hashed:forgotten", true)
            .await;

        ResetPasswordUseCase::new(&repository, &credentials)
            .execute(&account.id, password("brand-new-pass"))
            .await
            .unwrap();

        let stored = repository.get(&account.id).await.unwrap();
        assert!(
            credentials
                .compare(&stored.password_hash, &password("brand-new-pass"))
                .await
        );
    }

    #[tokio::test]
    async fn test_reset_password_too_short() {
        let repository = MockAccountRepository::default();
        let credentials = MockCredentialPolicy;
        let account = repository
            .insert("alice", "alice@example.com", "hashed:forgotten", true)
            .await;

        let result = ResetPasswordUseCase::new(&repository, &credentials)
            .execute(&account.id, password("1234567"))
            .await;

        assert_eq!(result.unwrap_err(), AccountError::PasswordTooShort);
        assert_eq!(repository.writes(), 0);
    }

    #[tokio::test]
    async fn test_reset_password_malformed_id() {
        let repository = MockAccountRepository::default();
        let credentials = MockCredentialPolicy;

        let result = ResetPasswordUseCase::new(&repository, &credentials)
            .execute(&AccountId::new("zzz"), password("brand-new-pass"))
            .await;

        assert_eq!(result.unwrap_err(), AccountError::InvalidIdentifierFormat);
    }

    #[tokio::test]
    async fn test_reset_password_unknown_account() {
        let repository = MockAccountRepository::default();
        let credentials = MockCredentialPolicy;

        let result = ResetPasswordUseCase::new(&repository, &credentials)
            .execute(&AccountId::new("77"), password("brand-new-pass"))
            .await;

        assert_eq!(result.unwrap_err(), AccountError::UserNotFound);
    }
}
