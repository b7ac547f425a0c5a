use accounts_core::{AccountError, AccountId, AccountRepository, translate_storage_error};

/// Update rating use case - adds a signed delta to an account's rating
pub struct UpdateRatingUseCase<'a, R> {
    repository: &'a R,
}

impl<'a, R> UpdateRatingUseCase<'a, R>
where
    R: AccountRepository,
{
    pub fn new(repository: &'a R) -> Self {
        Self { repository }
    }

    /// Returns the rating after the update.
    #[tracing::instrument(name = "UpdateRatingUseCase::execute", skip(self))]
    pub async fn execute(&self, id: &AccountId, delta: i32) -> Result<i32, AccountError> {
        if !self
            .repository
            .exists(id)
            .await
            .map_err(translate_storage_error)?
        {
            return Err(AccountError::UserNotFound);
        }

        self.repository
            .adjust_rating(id, delta)
            .await
            .map_err(translate_storage_error)?
            .ok_or(AccountError::UserNotFound)
    }
}

/// Get rating use case
pub struct GetRatingUseCase<'a, R> {
    repository: &'a R,
}

impl<'a, R> GetRatingUseCase<'a, R>
where
    R: AccountRepository,
{
    pub fn new(repository: &'a R) -> Self {
        Self { repository }
    }

    #[tracing::instrument(name = "GetRatingUseCase::execute", skip(self))]
    pub async fn execute(&self, id: &AccountId) -> Result<i32, AccountError> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(translate_storage_error)?
            .map(|account| account.rating)
            .ok_or(AccountError::UserNotFound)
    }
}
