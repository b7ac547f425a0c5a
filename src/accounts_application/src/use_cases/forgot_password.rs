use accounts_core::{
    AccountError, AccountRepository, Email, LifecycleLinks, NotificationDispatcher, TokenCodec,
    TokenPurpose, translate_storage_error,
};
use chrono::Duration;

use super::notify::issue_and_dispatch;

/// Forgot password use case - sends a password reset link
pub struct ForgotPasswordUseCase<'a, R, T, N> {
    repository: &'a R,
    tokens: &'a T,
    dispatcher: &'a N,
    links: &'a LifecycleLinks,
    reset_ttl: Duration,
}

impl<'a, R, T, N> ForgotPasswordUseCase<'a, R, T, N>
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
        reset_ttl: Duration,
    ) -> Self {
        Self {
            repository,
            tokens,
            dispatcher,
            links,
            reset_ttl,
        }
    }

    #[tracing::instrument(name = "ForgotPasswordUseCase::execute", skip(self))]
    pub async fn execute(&self, email: &Email) -> Result<(), AccountError> {
        let account = self
            .repository
            .find_by_email(email)
            .await
            .map_err(translate_storage_error)?
            .ok_or(AccountError::UserNotFound)?;

        issue_and_dispatch(
            self.tokens,
            self.dispatcher,
            self.links,
            &account,
            TokenPurpose::PasswordReset,
            self.reset_ttl,
        )
        .await
    }
}
