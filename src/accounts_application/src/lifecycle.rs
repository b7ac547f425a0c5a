use accounts_core::{
    Account, AccountError, AccountId, AccountRepository, AccountUpdate, CredentialPolicy, Email,
    LifecycleLinks, LifecycleToken, NotificationDispatcher, Password, TokenCodec, TokenPurpose,
    Username,
};
use chrono::Duration;

use crate::use_cases::{
    ChangePasswordUseCase, ConfirmAccountUseCase, ForgotPasswordUseCase, GetAccountUseCase,
    GetRatingUseCase, RegisterUseCase, ResendConfirmationUseCase, ResetPasswordUseCase,
    ToggleActiveUseCase, UpdateInfoUseCase, UpdateRatingUseCase,
};

/// Values the orchestrator needs besides its ports.
#[derive(Debug, Clone)]
pub struct LifecycleConfig {
    pub links: LifecycleLinks,
    pub confirmation_ttl: Duration,
    pub password_reset_ttl: Duration,
}

/// Owns the lifecycle ports and exposes one method per account operation.
///
/// Each method builds the matching use case over borrowed ports, so the
/// orchestrator itself holds no per-request state and can be shared behind an
/// `Arc` across tasks.
pub struct AccountLifecycle<R, C, T, N> {
    repository: R,
    credentials: C,
    tokens: T,
    dispatcher: N,
    config: LifecycleConfig,
}

impl<R, C, T, N> AccountLifecycle<R, C, T, N>
where
    R: AccountRepository,
    C: CredentialPolicy,
    T: TokenCodec,
    N: NotificationDispatcher,
{
    pub fn new(
        repository: R,
        credentials: C,
        tokens: T,
        dispatcher: N,
        config: LifecycleConfig,
    ) -> Self {
        Self {
            repository,
            credentials,
            tokens,
            dispatcher,
            config,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn dispatcher(&self) -> &N {
        &self.dispatcher
    }

    pub fn tokens(&self) -> &T {
        &self.tokens
    }

    pub fn config(&self) -> &LifecycleConfig {
        &self.config
    }

    pub async fn register(
        &self,
        username: Username,
        email: Email,
        password: Password,
    ) -> Result<Account, AccountError> {
        RegisterUseCase::new(
            &self.repository,
            &self.credentials,
            &self.tokens,
            &self.dispatcher,
            &self.config.links,
            self.config.confirmation_ttl,
        )
        .execute(username, email, password)
        .await
    }

    pub async fn confirm_account(&self, id: &AccountId) -> Result<(), AccountError> {
        ConfirmAccountUseCase::new(&self.repository).execute(id).await
    }

    /// Verifies an account-confirmation token and activates its subject.
    pub async fn confirm_account_with_token(
        &self,
        token: &LifecycleToken,
    ) -> Result<AccountId, AccountError> {
        let id = self
            .tokens
            .verify(token, TokenPurpose::AccountConfirmation)?;
        self.confirm_account(&id).await?;
        Ok(id)
    }

    pub async fn resend_confirmation(&self, email: &Email) -> Result<(), AccountError> {
        ResendConfirmationUseCase::new(
            &self.repository,
            &self.tokens,
            &self.dispatcher,
            &self.config.links,
            self.config.confirmation_ttl,
        )
        .execute(email)
        .await
    }

    pub async fn change_password(
        &self,
        id: &AccountId,
        old_password: Password,
        new_password: Password,
    ) -> Result<(), AccountError> {
        ChangePasswordUseCase::new(&self.repository, &self.credentials)
            .execute(id, old_password, new_password)
            .await
    }

    pub async fn forgot_password(&self, email: &Email) -> Result<(), AccountError> {
        ForgotPasswordUseCase::new(
            &self.repository,
            &self.tokens,
            &self.dispatcher,
            &self.config.links,
            self.config.password_reset_ttl,
        )
        .execute(email)
        .await
    }

    /// Sets a new password without checking the old one. Callers must have
    /// verified a password-reset token for `id` first.
    pub async fn update_password_by_id(
        &self,
        id: &AccountId,
        new_password: Password,
    ) -> Result<(), AccountError> {
        ResetPasswordUseCase::new(&self.repository, &self.credentials)
            .execute(id, new_password)
            .await
    }

    pub async fn reset_password_with_token(
        &self,
        token: &LifecycleToken,
        new_password: Password,
    ) -> Result<AccountId, AccountError> {
        let id = self.tokens.verify(token, TokenPurpose::PasswordReset)?;
        self.update_password_by_id(&id, new_password).await?;
        Ok(id)
    }

    pub async fn toggle_active(&self, id: &AccountId) -> Result<bool, AccountError> {
        ToggleActiveUseCase::new(&self.repository).execute(id).await
    }

    pub async fn update_rating(&self, id: &AccountId, delta: i32) -> Result<i32, AccountError> {
        UpdateRatingUseCase::new(&self.repository)
            .execute(id, delta)
            .await
    }

    pub async fn get_rating(&self, id: &AccountId) -> Result<i32, AccountError> {
        GetRatingUseCase::new(&self.repository).execute(id).await
    }

    pub async fn update_info(
        &self,
        id: &AccountId,
        update: AccountUpdate,
    ) -> Result<Account, AccountError> {
        UpdateInfoUseCase::new(&self.repository, &self.credentials)
            .execute(id, update)
            .await
    }

    pub async fn get_by_id(&self, id: &AccountId) -> Result<Account, AccountError> {
        GetAccountUseCase::new(&self.repository).by_id(id).await
    }

    pub async fn get_by_email(&self, email: &Email) -> Result<Account, AccountError> {
        GetAccountUseCase::new(&self.repository)
            .by_email(email)
            .await
    }
}
