use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://items.db";

/// Process configuration, read once at startup.
///
/// Sources, later ones win:
/// - built-in defaults
/// - `DATABASE_URL`, `LISTEN_ADDR`, `STATIC_DIR`, `LOGLEVEL`
/// - `MY_API_KEY` (mapped to `api_key`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api_key: String,
    pub database_url: String,
    pub listen_addr: String,
    pub static_dir: PathBuf,
    pub loglevel: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: "secret123".to_string(),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            listen_addr: "0.0.0.0:8000".to_string(),
            static_dir: PathBuf::from("static"),
            loglevel: "info".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    /// Environment values are merged as raw strings. `Env` as a provider
    /// would parse `MY_API_KEY=12345` into an integer and fail extraction.
    pub fn figment() -> Figment {
        let plain = Env::raw().only(&["database_url", "listen_addr", "static_dir", "loglevel"]);
        let api_key = Env::raw().only(&["my_api_key"]).map(|_| "api_key".into());

        plain.iter().chain(api_key.iter()).fold(
            Figment::from(Serialized::defaults(Config::default())),
            |figment, (key, value)| figment.merge(Serialized::default(key.as_str(), value)),
        )
    }
}
