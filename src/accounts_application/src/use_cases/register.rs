use accounts_core::{
    Account, AccountError, AccountRepository, CredentialPolicy, Email, LifecycleLinks, NewAccount,
    NotificationDispatcher, Password, Role, TokenCodec, TokenPurpose, Username,
    translate_storage_error,
};
use chrono::Duration;

use super::notify::issue_and_dispatch;

/// Register use case - creates an unconfirmed account and sends the
/// confirmation link
pub struct RegisterUseCase<'a, R, C, T, N> {
    repository: &'a R,
    credentials: &'a C,
    tokens: &'a T,
    dispatcher: &'a N,
    links: &'a LifecycleLinks,
    confirmation_ttl: Duration,
}

impl<'a, R, C, T, N> RegisterUseCase<'a, R, C, T, N>
where
    R: AccountRepository,
    C: CredentialPolicy,
    T: TokenCodec,
    N: NotificationDispatcher,
{
    pub fn new(
        repository: &'a R,
        credentials: &'a C,
        tokens: &'a T,
        dispatcher: &'a N,
        links: &'a LifecycleLinks,
        confirmation_ttl: Duration,
    ) -> Self {
        Self {
            repository,
            credentials,
            tokens,
            dispatcher,
            links,
            confirmation_ttl,
        }
    }

    /// Execute the register use case
    ///
    /// # Arguments
    /// * `username` - Requested display name, must be unique
    /// * `email` - Email address, must be unique
    /// * `password` - Plaintext password, checked against the credential policy
    ///
    /// # Returns
    /// The created (inactive) account. When the account was stored but the
    /// confirmation could not be dispatched, returns
    /// `AccountError::NotificationFailed` carrying the new account id.
    #[tracing::instrument(name = "RegisterUseCase::execute", skip(self, password))]
    pub async fn execute(
        &self,
        username: Username,
        email: Email,
        password: Password,
    ) -> Result<Account, AccountError> {
        // Email is checked first so it wins when both conflict
        if self
            .repository
            .find_by_email(&email)
            .await
            .map_err(translate_storage_error)?
            .is_some()
        {
            return Err(AccountError::EmailExists);
        }

        if self
            .repository
            .find_by_username(&username)
            .await
            .map_err(translate_storage_error)?
            .is_some()
        {
            return Err(AccountError::UsernameExists);
        }

        self.credentials.validate(&password)?;
        let password_hash = self.credentials.hash(password).await?;

        let account = self
            .repository
            .create(NewAccount {
                username,
                email,
                password_hash,
                role: Role::User,
                is_active: false,
            })
            .await
            .map_err(translate_storage_error)?;

        tracing::info!(account_id = %account.id, "Account registered");

        issue_and_dispatch(
            self.tokens,
            self.dispatcher,
            self.links,
            &account,
            TokenPurpose::AccountConfirmation,
            self.confirmation_ttl,
        )
        .await?;

        Ok(account)
    }
}
