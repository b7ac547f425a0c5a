use accounts_core::{AccountId, BearerClaims, BearerTokenValidator, BearerValidationError};
use reqwest::{Client, StatusCode, Url};
use secrecy::{ExposeSecret, Secret};

/// Validates session bearer tokens against the upstream auth service.
///
/// The token is sent as `Authorization: Bearer <token>`; a 200 answer carries
/// `{"user_id": "<id>"}`. 401 and 403 mean the token was rejected.
pub struct RemoteTokenValidator {
    http_client: Client,
    verify_token_url: String,
}

impl RemoteTokenValidator {
    pub fn new(verify_token_url: String, http_client: Client) -> Self {
        Self {
            http_client,
            verify_token_url,
        }
    }
}

#[derive(serde::Deserialize, Debug)]
struct VerifyTokenResponse {
    user_id: String,
}

#[async_trait::async_trait]
impl BearerTokenValidator for RemoteTokenValidator {
    #[tracing::instrument(name = "Validating bearer token upstream", skip_all)]
    async fn validate(
        &self,
        bearer: &Secret<String>,
    ) -> Result<BearerClaims, BearerValidationError> {
        let url = Url::parse(&self.verify_token_url)
            .map_err(|e| BearerValidationError::Upstream(e.to_string()))?;

        let response = self
            .http_client
            .post(url)
            .bearer_auth(bearer.expose_secret())
            .send()
            .await
            .map_err(|e| BearerValidationError::Upstream(e.to_string()))?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(BearerValidationError::PermissionDenied);
            }
            status if !status.is_success() => {
                return Err(BearerValidationError::Upstream(format!(
                    "token validation returned {status}"
                )));
            }
            _ => {}
        }

        let body: VerifyTokenResponse = response
            .json()
            .await
            .map_err(|e| BearerValidationError::Upstream(e.to_string()))?;

        Ok(BearerClaims {
            subject: AccountId::new(body.user_id),
        })
    }
}
