use std::env;

use auth::JwtError;
use auth::JwtHandler;
use auth::SigningSecret;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Environment variable holding the token signing secret.
pub const JWT_SECRET_ENV: &str = "JWT_SECRET_KEY";

/// Upper bounds accepted for token lifetimes.
pub const MAX_ACCESS_TOKEN_MINUTES: i64 = 24 * 60;
pub const MAX_REFRESH_TOKEN_DAYS: i64 = 365;

/// `database.url` value selecting the in-process store.
pub const MEMORY_DATABASE_URL: &str = "memory";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

impl DatabaseConfig {
    pub fn is_memory(&self) -> bool {
        self.url == MEMORY_DATABASE_URL
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
    pub grpc_port: u16,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    #[serde(default)]
    pub secret: String,
    #[serde(default = "default_access_token_minutes")]
    pub access_token_minutes: i64,
    #[serde(default = "default_refresh_token_days")]
    pub refresh_token_days: i64,
}

fn default_access_token_minutes() -> i64 {
    auth::jwt::ACCESS_TOKEN_TTL_MINUTES
}

fn default_refresh_token_days() -> i64 {
    auth::jwt::REFRESH_TOKEN_TTL_DAYS
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("access_token_minutes", &self.access_token_minutes)
            .field("refresh_token_days", &self.refresh_token_days)
            .finish()
    }
}

impl JwtConfig {
    pub fn signing_secret(&self) -> Result<SigningSecret, JwtError> {
        SigningSecret::new(self.secret.as_bytes())
    }

    /// Token codec configured with this secret and these lifetimes.
    pub fn handler(&self) -> Result<JwtHandler, JwtError> {
        let out_of_range = || {
            JwtError::EncodingFailed(format!(
                "token lifetimes out of range: {} minutes / {} days",
                self.access_token_minutes, self.refresh_token_days
            ))
        };
        let access_ttl =
            chrono::TimeDelta::try_minutes(self.access_token_minutes).ok_or_else(out_of_range)?;
        let refresh_ttl =
            chrono::TimeDelta::try_days(self.refresh_token_days).ok_or_else(out_of_range)?;

        Ok(JwtHandler::new(&self.signing_secret()?).with_lifetimes(access_ttl, refresh_ttl))
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. `JWT_SECRET_KEY` for the signing secret
    /// 2. Environment variables (DATABASE__URL, SERVER__HTTP_PORT, JWT__SECRET, etc.)
    /// 3. Environment-specific config file (config/{environment}.toml)
    /// 4. Default config file (config/default.toml)
    ///
    /// Fails when no usable signing secret is configured.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: DATABASE__URL=postgres://... overrides database.url
            .add_source(Environment::with_prefix("").separator("__"))
            .set_override_option("jwt.secret", env::var(JWT_SECRET_ENV).ok())?
            .build()?;

        Self::from_settings(configuration)
    }

    fn from_settings(configuration: ConfigBuilder) -> Result<Self, ConfigError> {
        let config: Config = configuration.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.is_empty() {
            return Err(ConfigError::Message(format!(
                "JWT signing secret is not set (use {} or jwt.secret)",
                JWT_SECRET_ENV
            )));
        }
        if !(1..=MAX_ACCESS_TOKEN_MINUTES).contains(&self.jwt.access_token_minutes) {
            return Err(ConfigError::Message(format!(
                "jwt.access_token_minutes must be between 1 and {}",
                MAX_ACCESS_TOKEN_MINUTES
            )));
        }
        if !(1..=MAX_REFRESH_TOKEN_DAYS).contains(&self.jwt.refresh_token_days) {
            return Err(ConfigError::Message(format!(
                "jwt.refresh_token_days must be between 1 and {}",
                MAX_REFRESH_TOKEN_DAYS
            )));
        }
        Ok(())
    }
}
