pub mod remote_token_validator;

pub use remote_token_validator::RemoteTokenValidator;
