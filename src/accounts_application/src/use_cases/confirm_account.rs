use accounts_core::{AccountError, AccountId, AccountRepository, translate_storage_error};

/// Confirm account use case - activates an account whose confirmation token
/// has already been verified
pub struct ConfirmAccountUseCase<'a, R> {
    repository: &'a R,
}

impl<'a, R> ConfirmAccountUseCase<'a, R>
where
    R: AccountRepository,
{
    pub fn new(repository: &'a R) -> Self {
        Self { repository }
    }

    /// Confirming an account that is already active succeeds without writing.
    #[tracing::instrument(name = "ConfirmAccountUseCase::execute", skip(self))]
    pub async fn execute(&self, id: &AccountId) -> Result<(), AccountError> {
        let account = self
            .repository
            .find_by_id(id)
            .await
            .map_err(translate_storage_error)?
            .ok_or(AccountError::UserNotFound)?;

        if account.is_active {
            tracing::debug!("Account already active");
            return Ok(());
        }

        let updated = self
            .repository
            .set_active(id, true)
            .await
            .map_err(translate_storage_error)?;

        if !updated {
            return Err(AccountError::UserNotFound);
        }

        tracing::info!("Account confirmed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockAccountRepository;

    #[tokio::test]
    async fn test_confirm_account_activates() {
        let repository = MockAccountRepository::default();
        let account = repository
            .insert("alice", "alice@example.com", "hashed:password1", false)
            .await;

        ConfirmAccountUseCase::new(&repository)
            .execute(&account.id)
            .await
            .unwrap();

        assert!(repository.get(&account.id).await.unwrap().is_active);
    }

    #[tokio::test]
    async fn test_confirm_already_active_account_is_noop() {
        let repository = MockAccountRepository::default();
        let account = repository
            .insert("alice", "alice@example.com", "hashed:password1", true)
            .await;

        let result = ConfirmAccountUseCase::new(&repository)
            .execute(&account.id)
            .await;

        assert!(result.is_ok());
        assert_eq!(repository.writes(), 0);
    }

    #[tokio::test]
    async fn test_confirm_missing_account() {
        let repository = MockAccountRepository::default();

        let result = ConfirmAccountUseCase::new(&repository)
            .execute(&AccountId::new("42"))
            .await;

        assert_eq!(result.unwrap_err(), AccountError::UserNotFound);
    }

    #[tokio::test]
    async fn test_confirm_malformed_id() {
        let repository = MockAccountRepository::default();

        let result = ConfirmAccountUseCase::new(&repository)
            .execute(&AccountId::new("not-a-uuid"))
            .await;

        assert_eq!(result.unwrap_err(), AccountError::InvalidIdentifierFormat);
    }
}
