use accounts_core::{
    Account, AccountChanges, AccountError, AccountId, AccountRepository, AccountUpdate,
    CredentialPolicy, translate_storage_error,
};

/// Update info use case - applies a partial update to an account
pub struct UpdateInfoUseCase<'a, R, C> {
    repository: &'a R,
    credentials: &'a C,
}

impl<'a, R, C> UpdateInfoUseCase<'a, R, C>
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

    /// Execute the update info use case
    ///
    /// Only fields present in `update` change. A new email or username must
    /// not belong to another account (email is checked first). A new password
    /// goes through the credential policy and is stored hashed.
    ///
    /// # Returns
    /// The account as stored after the update
    #[tracing::instrument(name = "UpdateInfoUseCase::execute", skip(self, update))]
    pub async fn execute(
        &self,
        id: &AccountId,
        update: AccountUpdate,
    ) -> Result<Account, AccountError> {
        let current = self
            .repository
            .find_by_id(id)
            .await
            .map_err(translate_storage_error)?
            .ok_or(AccountError::UserNotFound)?;

        if update.is_empty() {
            return Ok(current);
        }

        if let Some(email) = update.email.as_ref().filter(|e| **e != current.email) {
            let owner = self
                .repository
                .find_by_email(email)
                .await
                .map_err(translate_storage_error)?;
            if owner.is_some_and(|owner| owner.id != current.id) {
                return Err(AccountError::EmailExists);
            }
        }

        if let Some(username) = update.username.as_ref().filter(|u| **u != current.username) {
            let owner = self
                .repository
                .find_by_username(username)
                .await
                .map_err(translate_storage_error)?;
            if owner.is_some_and(|owner| owner.id != current.id) {
                return Err(AccountError::UsernameExists);
            }
        }

        let password_hash = match update.password {
            Some(password) => {
                self.credentials.validate(&password)?;
                Some(self.credentials.hash(password).await?)
            }
            None => None,
        };

        let changes = AccountChanges {
            username: update.username,
            email: update.email,
            password_hash,
            role: update.role,
            rating: update.rating,
            is_active: update.is_active,
        };

        self.repository
            .update_fields(id, changes)
            .await
            .map_err(translate_storage_error)?
            .ok_or(AccountError::UserNotFound)
    }
}
