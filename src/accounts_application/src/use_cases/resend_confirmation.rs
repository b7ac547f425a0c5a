use accounts_core::{
    AccountError, AccountRepository, Email, LifecycleLinks, NotificationDispatcher, TokenCodec,
    TokenPurpose, translate_storage_error,
};
use chrono::Duration;

use super::notify::issue_and_dispatch;

/// Resend confirmation use case - issues a fresh confirmation link for an
/// account that has not been confirmed yet
pub struct ResendConfirmationUseCase<'a, R, T, N> {
    repository: &'a R,
    tokens: &'a T,
    dispatcher: &'a N,
    links: &'a LifecycleLinks,
    confirmation_ttl: Duration,
}

impl<'a, R, T, N> ResendConfirmationUseCase<'a, R, T, N>
where
    R: AccountRepository,
    T: TokenCodec,
    N: NotificationDispatcher,
{
    pub fn new(
        repository: &'a R,
        tokens: &'a T,
        dispatcher: &'a N,
        links: &'a LifecycleLinks,
        confirmation_ttl: Duration,
    ) -> Self {
        Self {
            repository,
            tokens,
            dispatcher,
            links,
            confirmation_ttl,
        }
    }

    #[tracing::instrument(name = "ResendConfirmationUseCase::execute", skip(self))]
    pub async fn execute(&self, email: &Email) -> Result<(), AccountError> {
        let account = self
            .repository
            .find_by_email(email)
            .await
            .map_err(translate_storage_error)?
            .ok_or(AccountError::UserNotFound)?;

        if account.is_active {
            return Err(AccountError::AccountAlreadyActive);
        }

        issue_and_dispatch(
            self.tokens,
            self.dispatcher,
            self.links,
            &account,
            TokenPurpose::AccountConfirmation,
            self.confirmation_ttl,
        )
        .await
    }
}
