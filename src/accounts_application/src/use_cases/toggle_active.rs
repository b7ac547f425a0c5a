use accounts_core::{AccountError, AccountId, AccountRepository, translate_storage_error};

/// Toggle active use case - deactivates an active account or reactivates an
/// inactive one
pub struct ToggleActiveUseCase<'a, R> {
    repository: &'a R,
}

impl<'a, R> ToggleActiveUseCase<'a, R>
where
    R: AccountRepository,
{
    pub fn new(repository: &'a R) -> Self {
        Self { repository }
    }

    /// Returns the new value of the active flag.
    #[tracing::instrument(name = "ToggleActiveUseCase::execute", skip(self))]
    pub async fn execute(&self, id: &AccountId) -> Result<bool, AccountError> {
        if !self
            .repository
            .exists(id)
            .await
            .map_err(translate_storage_error)?
        {
            return Err(AccountError::UserNotFound);
        }

        self.repository
            .toggle_active(id)
            .await
            .map_err(translate_storage_error)?
            .ok_or(AccountError::UserNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockAccountRepository;

    #[tokio::test]
    async fn test_toggle_active_flips_both_ways() {
        let repository = MockAccountRepository::default();
        let account = repository
            .insert("alice", "alice@example.com", "hashed:password1", true)
            .await;
        let use_case = ToggleActiveUseCase::new(&repository);

        assert!(!use_case.execute(&account.id).await.unwrap());
        assert!(use_case.execute(&account.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_toggle_active_distinguishes_missing_from_malformed() {
        let repository = MockAccountRepository::default();
        let use_case = ToggleActiveUseCase::new(&repository);

        assert_eq!(
            use_case.execute(&AccountId::new("5")).await.unwrap_err(),
            AccountError::UserNotFound
        );
        assert_eq!(
            use_case.execute(&AccountId::new("5-x")).await.unwrap_err(),
            AccountError::InvalidIdentifierFormat
        );
        assert_eq!(repository.writes(), 0);
    }
}
