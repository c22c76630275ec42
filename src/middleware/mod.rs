pub mod auth;

pub use auth::{ApiKey, RequireApiKey};
