pub mod constants;
pub mod settings;

pub use constants::*;
pub use settings::{
    CredentialsSettings, LinksSettings, NotificationSettings, PostgresSettings, RedisSettings,
    Settings, SettingsError, TokenSettings, UpstreamAuthSettings,
};
