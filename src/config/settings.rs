use std::path::PathBuf;
use thiserror::Error;

/// Uploads are capped at 5 MB
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required environment variable is not set
    #[error("Missing environment variable: {0}")]
    MissingVar(String),

    /// An environment variable could not be parsed
    #[error("Invalid value for {name}: {message}")]
    InvalidVar { name: String, message: String },
}

/// Application settings, loaded from the environment (a .env file is read
/// first when present).
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: String,
    pub jwt_secret: String,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://forum.db?mode=rwc".to_string());
        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let jwt_secret = std::env::var("JWT_SECRET")
            .map_err(|_| ConfigError::MissingVar("JWT_SECRET".to_string()))?;
        if jwt_secret.len() < 32 {
            return Err(ConfigError::InvalidVar {
                name: "JWT_SECRET".to_string(),
                message: "must be at least 32 bytes".to_string(),
            });
        }
        let upload_dir = std::env::var("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("uploads"));
        let max_upload_bytes = match std::env::var("MAX_UPLOAD_BYTES") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidVar {
                name: "MAX_UPLOAD_BYTES".to_string(),
                message: format!("'{raw}' is not a byte count"),
            })?,
            Err(_) => DEFAULT_MAX_UPLOAD_BYTES,
        };

        Ok(Self {
            database_url,
            bind_addr,
            jwt_secret,
            upload_dir,
            max_upload_bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jwt_secret_is_required() {
        // isolate from any ambient environment
        std::env::remove_var("JWT_SECRET");
        assert!(matches!(
            Settings::from_env(),
            Err(ConfigError::MissingVar(_))
        ));
    }
}
