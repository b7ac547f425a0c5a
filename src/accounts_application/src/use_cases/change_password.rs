use accounts_core::{
    AccountError, AccountId, AccountRepository, CredentialPolicy, Password,
    translate_storage_error,
};

/// Change password use case - replaces the password after checking the
/// current one
pub struct ChangePasswordUseCase<'a, R, C> {
    repository: &'a R,
    credentials: &'a C,
}

impl<'a, R, C> ChangePasswordUseCase<'a, R, C>
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

    /// Execute the change password use case
    ///
    /// # Arguments
    /// * `id` - Account whose password changes
    /// * `old_password` - Current password, compared against the stored hash
    /// * `new_password` - Replacement, checked against the credential policy
    ///
    /// # Returns
    /// Ok(()) on success. Nothing is written when the old password does not match.
    #[tracing::instrument(
        name = "ChangePasswordUseCase::execute",
        skip(self, old_password, new_password)
    )]
    pub async fn execute(
        &self,
        id: &AccountId,
        old_password: Password,
        new_password: Password,
    ) -> Result<(), AccountError> {
        let account = self
            .repository
            .find_by_id(id)
            .await
            .map_err(translate_storage_error)?
            .ok_or(AccountError::UserNotFound)?;

        self.credentials.validate(&new_password)?;

        if !self
            .credentials
            .compare(&account.password_hash, &old_password)
            .await
        {
            return Err(AccountError::InvalidPassword);
        }

        let password_hash = self.credentials.hash(new_password).await?;

        let updated = self
            .repository
            .set_password_hash(id, &password_hash)
            .await
            .map_err(translate_storage_error)?;

        if !updated {
            return Err(AccountError::UserNotFound);
        }

        tracing::info!("Password changed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockAccountRepository, MockCredentialPolicy, password};

    #[tokio::test]
    async fn test_change_password_success() {
        let repository = MockAccountRepository::default();
        let credentials = MockCredentialPolicy;
        let account = repository
            .insert("alice", "alice@example.com", "hashed:password1", true)
            .await;

        ChangePasswordUseCase::new(&repository, &credentials)
            .execute(&account.id, password("password1"), password("newpass2"))
            .await
            .unwrap();

        let stored = repository.get(&account.id).await.unwrap();
        assert!(
            credentials
                .compare(&stored.password_hash, &password("newpass2"))
                .await
        );
        assert!(
            !credentials
                .compare(&stored.password_hash, &password("password1"))
                .await
        );
    }

    #[tokio::test]
    async fn test_change_password_wrong_old_password() {
        let repository = MockAccountRepository::default();
        let credentials = MockCredentialPolicy;
        let account = repository
            .insert("alice", "alice@example.com", "hashed:password1", true)
            .await;

        let result = ChangePasswordUseCase::new(&repository, &credentials)
            .execute(&account.id, password("wrong-password"), password("newpass2"))
            .await;

        assert_eq!(result.unwrap_err(), AccountError::InvalidPassword);
        assert_eq!(repository.writes(), 0);
    }

    #[tokio::test]
    async fn test_change_password_new_password_too_short() {
        let repository = MockAccountRepository::default();
        let credentials = MockCredentialPolicy;
        let account = repository
            .insert("alice", "alice@example.com", "hashed:password1", true)
            .await;

        let result = ChangePasswordUseCase::new(&repository, &credentials)
            .execute(&account.id, password("password1"), password("short"))
            .await;

        assert_eq!(result.unwrap_err(), AccountError::PasswordTooShort);
        assert_eq!(repository.writes(), 0);
    }

    #[tokio::test]
    async fn test_change_password_user_not_found() {
        let repository = MockAccountRepository::default();
        let credentials = MockCredentialPolicy;

        let result = ChangePasswordUseCase::new(&repository, &credentials)
            .execute(&AccountId::new("9"), password("password1"), password("newpass2"))
            .await;

        assert_eq!(result.unwrap_err(), AccountError::UserNotFound);
    }
}
