use std::collections::BTreeMap;

use secrecy::ExposeSecret;
use serde::{Serialize, ser::SerializeStruct};

use super::{
    email::Email,
    token::{LifecycleToken, TokenPurpose},
    username::Username,
};

pub const LINK_KEY: &str = "link";
pub const USERNAME_KEY: &str = "username";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LifecycleEventKind {
    #[serde(rename = "user_registration")]
    AccountConfirmation,
    #[serde(rename = "password_reset_request")]
    PasswordReset,
}

impl LifecycleEventKind {
    pub fn purpose(self) -> TokenPurpose {
        match self {
            Self::AccountConfirmation => TokenPurpose::AccountConfirmation,
            Self::PasswordReset => TokenPurpose::PasswordReset,
        }
    }
}

impl From<TokenPurpose> for LifecycleEventKind {
    fn from(purpose: TokenPurpose) -> Self {
        match purpose {
            TokenPurpose::AccountConfirmation => Self::AccountConfirmation,
            TokenPurpose::PasswordReset => Self::PasswordReset,
        }
    }
}

/// Notification request produced by a lifecycle transition.
///
/// Serialized as `{"Type": .., "Email": .., "Payload": {"link": .., "username": ..}}`,
/// the shape downstream mail workers consume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleEvent {
    kind: LifecycleEventKind,
    email: Email,
    payload: BTreeMap<String, String>,
}

impl LifecycleEvent {
    pub fn new(kind: LifecycleEventKind, email: Email, username: &Username, link: String) -> Self {
        let payload = BTreeMap::from([
            (LINK_KEY.to_owned(), link),
            (USERNAME_KEY.to_owned(), username.as_str().to_owned()),
        ]);
        Self {
            kind,
            email,
            payload,
        }
    }

    pub fn kind(&self) -> LifecycleEventKind {
        self.kind
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn payload(&self) -> &BTreeMap<String, String> {
        &self.payload
    }

    pub fn link(&self) -> Option<&str> {
        self.payload.get(LINK_KEY).map(String::as_str)
    }

    pub fn username(&self) -> Option<&str> {
        self.payload.get(USERNAME_KEY).map(String::as_str)
    }
}

impl Serialize for LifecycleEvent {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("Event", 3)?;
        state.serialize_field("Type", &self.kind)?;
        state.serialize_field("Email", self.email.as_ref().expose_secret())?;
        state.serialize_field("Payload", &self.payload)?;
        state.end()
    }
}

/// Base URLs of the pages that redeem lifecycle tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleLinks {
    pub confirmation_url: String,
    pub password_reset_url: String,
}

impl LifecycleLinks {
    pub fn link_for(&self, purpose: TokenPurpose, token: &LifecycleToken) -> String {
        let base = match purpose {
            TokenPurpose::AccountConfirmation => &self.confirmation_url,
            TokenPurpose::PasswordReset => &self.password_reset_url,
        };
        let separator = if base.contains('?') { '&' } else { '?' };
        format!("{base}{separator}token={}", token.expose())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::Secret;

    fn links() -> LifecycleLinks {
        LifecycleLinks {
            confirmation_url: "http://localhost:8080/confirm".to_owned(),
            password_reset_url: "https://localhost:8080/reset-password?lang=en".to_owned(),
        }
    }

    #[test]
    fn links_append_token_query_parameter() {
        let token = LifecycleToken::from("abc.def.ghi".to_owned());
        assert_eq!(
            links().link_for(TokenPurpose::AccountConfirmation, &token),
            "http://localhost:8080/confirm?token=abc.def.ghi"
        );
        assert_eq!(
            links().link_for(TokenPurpose::PasswordReset, &token),
            "https://localhost:8080/reset-password?lang=en&token=abc.def.ghi"
        );
    }

    #[test]
    fn event_serializes_to_consumer_shape() {
        let email = Email::parse(Secret::new("alice@example.com".to_owned())).unwrap();
        let username = Username::parse("alice").unwrap();
        let event = LifecycleEvent::new(
            LifecycleEventKind::AccountConfirmation,
            email,
            &username,
            "http://localhost:8080/confirm?token=t".to_owned(),
        );

        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "Type": "user_registration",
                "Email": "alice@example.com",
                "Payload": {
                    "link": "http://localhost:8080/confirm?token=t",
                    "username": "alice"
                }
            })
        );
    }

    #[test]
    fn kind_maps_to_token_purpose() {
        assert_eq!(
            LifecycleEventKind::from(TokenPurpose::PasswordReset).purpose(),
            TokenPurpose::PasswordReset
        );
        assert_eq!(
            LifecycleEventKind::AccountConfirmation.purpose(),
            TokenPurpose::AccountConfirmation
        );
    }
}
