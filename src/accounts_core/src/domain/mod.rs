pub mod account;
pub mod account_id;
pub mod email;
pub mod error;
pub mod event;
pub mod password;
pub mod role;
pub mod token;
pub mod username;
