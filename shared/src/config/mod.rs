//! Configuration module with business-specific sub-modules
//!
//! - `auth` - Token signing and expiry configuration
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server configuration
//!
//! [`AppConfig::load`] layers the sources in increasing priority: built-in
//! defaults for the detected environment, an optional `config.<env>.toml`
//! file, `IG__`-prefixed environment variables (`IG__AUTH__JWT__SECRET`), and
//! finally the well-known variables `JWT_SECRET`, `JWT_ACCESS_TOKEN_EXPIRY`,
//! `SERVER_HOST` and `SERVER_PORT`.

pub mod auth;
pub mod environment;
pub mod server;

use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};

pub use auth::{AuthConfig, JwtConfig};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::ServerConfig;

/// Prefix for structured environment overrides
const ENV_PREFIX: &str = "IG";

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl AppConfig {
    /// Built-in defaults for the given environment
    pub fn for_environment(environment: Environment) -> Self {
        let server = match environment {
            Environment::Development => ServerConfig::default(),
            Environment::Staging | Environment::Production => ServerConfig::new("0.0.0.0", 8080),
        };

        Self {
            environment,
            server,
            auth: AuthConfig::default(),
            logging: LoggingConfig::for_environment(environment),
        }
    }

    /// Load configuration from defaults, optional file and environment
    ///
    /// A `.env` file in the working directory is read first when present.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let environment = Environment::from_env();
        Self::load_for(environment)
    }

    /// Load configuration for an explicit environment
    pub fn load_for(environment: Environment) -> Result<Self, ConfigError> {
        let defaults = Config::try_from(&Self::for_environment(environment))?;

        Config::builder()
            .add_source(defaults)
            .add_source(File::with_name(environment.config_file()).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("auth.jwt.secret", std::env::var("JWT_SECRET").ok())?
            .set_override_option(
                "auth.jwt.access_token_expiry",
                std::env::var("JWT_ACCESS_TOKEN_EXPIRY").ok(),
            )?
            .set_override_option("server.host", std::env::var("SERVER_HOST").ok())?
            .set_override_option("server.port", std::env::var("SERVER_PORT").ok())?
            .build()?
            .try_deserialize()
    }
}
