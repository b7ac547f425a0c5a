use accounts_core::{
    Account, AccountError, AccountId, AccountRepository, Email, translate_storage_error,
};

/// Get account use case - reads a single account by id or email
pub struct GetAccountUseCase<'a, R> {
    repository: &'a R,
}

impl<'a, R> GetAccountUseCase<'a, R>
where
    R: AccountRepository,
{
    pub fn new(repository: &'a R) -> Self {
        Self { repository }
    }

    #[tracing::instrument(name = "GetAccountUseCase::by_id", skip(self))]
    pub async fn by_id(&self, id: &AccountId) -> Result<Account, AccountError> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(translate_storage_error)?
            .ok_or(AccountError::UserNotFound)
    }

    #[tracing::instrument(name = "GetAccountUseCase::by_email", skip(self))]
    pub async fn by_email(&self, email: &Email) -> Result<Account, AccountError> {
        self.repository
            .find_by_email(email)
            .await
            .map_err(translate_storage_error)?
            .ok_or(AccountError::UserNotFound)
    }
}
