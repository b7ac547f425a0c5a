use std::sync::Arc;

use accounts_core::{
    AccountId, Clock, LifecycleToken, SystemClock, TokenCodec, TokenCodecError, TokenPurpose,
};
use chrono::Duration;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

/// Claims carried by a lifecycle token. `expires_at` is in milliseconds since
/// the Unix epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleClaims {
    pub user_id: String,
    pub token_type: TokenPurpose,
    pub expires_at: i64,
}

/// HS256 lifecycle tokens signed with a process-wide secret.
///
/// Expiry is checked against the injected [`Clock`] rather than by
/// `jsonwebtoken`, whose `exp` handling works in whole seconds and allows
/// leeway. A token is valid strictly before its `expires_at`.
#[derive(Clone)]
pub struct JwtTokenCodec {
    secret: Secret<String>,
    clock: Arc<dyn Clock>,
}

impl JwtTokenCodec {
    pub fn new(secret: Secret<String>) -> Self {
        Self::with_clock(secret, Arc::new(SystemClock))
    }

    pub fn with_clock(secret: Secret<String>, clock: Arc<dyn Clock>) -> Self {
        Self { secret, clock }
    }

    fn as_bytes(&self) -> &[u8] {
        self.secret.expose_secret().as_bytes()
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();
        validation
    }
}

impl TokenCodec for JwtTokenCodec {
    fn issue(
        &self,
        subject: &AccountId,
        purpose: TokenPurpose,
        ttl: Duration,
    ) -> Result<LifecycleToken, TokenCodecError> {
        let expires_at = self
            .clock
            .now()
            .checked_add_signed(ttl)
            .ok_or_else(|| TokenCodecError::Signing("Duration out of range".to_string()))?
            .timestamp_millis();

        let claims = LifecycleClaims {
            user_id: subject.as_str().to_owned(),
            token_type: purpose,
            expires_at,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.as_bytes()),
        )
        .map(LifecycleToken::from)
        .map_err(|e| TokenCodecError::Signing(e.to_string()))
    }

    fn verify(
        &self,
        token: &LifecycleToken,
        expected_purpose: TokenPurpose,
    ) -> Result<AccountId, TokenCodecError> {
        let claims = decode::<LifecycleClaims>(
            token.expose(),
            &DecodingKey::from_secret(self.as_bytes()),
            &Self::validation(),
        )
        .map(|data| data.claims)
        .map_err(|e| {
            tracing::debug!(error = %e, "Rejected lifecycle token");
            TokenCodecError::InvalidOrExpired
        })?;

        if claims.token_type != expected_purpose {
            return Err(TokenCodecError::InvalidOrExpired);
        }

        if self.clock.now().timestamp_millis() >= claims.expires_at {
            return Err(TokenCodecError::InvalidOrExpired);
        }

        Ok(AccountId::new(claims.user_id))
    }
}
