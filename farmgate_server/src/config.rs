use std::env;

use chrono::Duration;
use fg_common::Secret;
use log::*;
use rand::{distributions::Alphanumeric, Rng};

use crate::errors::ServerError;

const DEFAULT_FGM_HOST: &str = "127.0.0.1";
const DEFAULT_FGM_PORT: u16 = 8380;
const DEFAULT_TOKEN_EXPIRY_HOURS: i64 = 24;
const MIN_SECRET_LEN: usize = 32;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub auth: AuthConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_FGM_HOST.to_string(),
            port: DEFAULT_FGM_PORT,
            database_url: String::default(),
            auth: AuthConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("FGM_HOST").ok().unwrap_or_else(|| DEFAULT_FGM_HOST.into());
        let port = env::var("FGM_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for FGM_PORT. {e} Using the default, {DEFAULT_FGM_PORT}, instead."
                    );
                    DEFAULT_FGM_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_FGM_PORT);
        let database_url = env::var("FGM_DATABASE_URL").ok().unwrap_or_else(|| {
            error!("🪛️ FGM_DATABASE_URL is not set. Please set it to the URL for the marketplace database.");
            String::default()
        });
        let auth = AuthConfig::try_from_env().unwrap_or_else(|e| {
            warn!(
                "🪛️ Could not load the authentication configuration from environment variables. {e}. Reverting to \
                 the default configuration."
            );
            AuthConfig::default()
        });
        Self { host, port, database_url, auth }
    }
}

//-------------------------------------------------  AuthConfig  -------------------------------------------------------
#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// The HS256 secret used to sign and verify access tokens. Must be at least 32 bytes.
    pub jwt_secret: Secret<String>,
    /// How long issued tokens stay valid.
    pub token_expiry: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        warn!(
            "🚨️🚨️🚨️ The JWT secret has not been set. I'm using a random value for this session. DO NOT operate on \
             production like this since every issued token dies with the process. Set FGM_JWT_SECRET instead. 🚨️🚨️🚨️"
        );
        let secret: String = rand::thread_rng().sample_iter(&Alphanumeric).take(64).map(char::from).collect();
        Self { jwt_secret: Secret::new(secret), token_expiry: Duration::hours(DEFAULT_TOKEN_EXPIRY_HOURS) }
    }
}

impl AuthConfig {
    pub fn try_from_env() -> Result<Self, ServerError> {
        let secret =
            env::var("FGM_JWT_SECRET").map_err(|e| ServerError::ConfigurationError(format!("{e} [FGM_JWT_SECRET]")))?;
        if secret.len() < MIN_SECRET_LEN {
            return Err(ServerError::ConfigurationError(format!(
                "FGM_JWT_SECRET must be at least {MIN_SECRET_LEN} characters long"
            )));
        }
        let token_expiry = env::var("FGM_TOKEN_EXPIRY_HOURS")
            .map_err(|_| {
                info!(
                    "🪛️ FGM_TOKEN_EXPIRY_HOURS is not set. Using the default value of {DEFAULT_TOKEN_EXPIRY_HOURS} \
                     hrs."
                )
            })
            .and_then(|s| {
                s.parse::<i64>()
                    .map(Duration::hours)
                    .map_err(|e| warn!("🪛️ Invalid configuration value for FGM_TOKEN_EXPIRY_HOURS. {e}"))
            })
            .ok()
            .unwrap_or_else(|| Duration::hours(DEFAULT_TOKEN_EXPIRY_HOURS));
        Ok(Self { jwt_secret: Secret::new(secret), token_expiry })
    }
}
