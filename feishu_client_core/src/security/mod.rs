//! Credential handling for the Feishu open platform

pub mod credentials;
pub mod secure_string;

pub use credentials::{APP_ID_ENV, APP_SECRET_ENV, AppCredentials};
pub use secure_string::SecureString;
