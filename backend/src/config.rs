//! Process configuration, read once from the environment at startup and
//! shared immutably through the application state.

use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Path of the SQLite database file.
    pub database_path: String,
    /// Directory the media store keeps template assets in.
    pub media_root: String,
    /// Maximum width of a preview rendition in pixels.
    pub preview_max_width: u32,
    pub jwt: JwtConfig,
}

/// Signing parameters for issued bearer tokens.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    /// Token lifetime in seconds.
    pub ttl_secs: u64,
}

impl AppConfig {
    /// Builds the configuration from environment variables, falling back to
    /// development defaults for anything unset.
    pub fn from_env() -> AppConfig {
        AppConfig {
            host: env_or("APP_HOST", "127.0.0.1"),
            port: env_or("APP_PORT", "8080").parse().unwrap_or(8080),
            database_path: env_or("APP_DB_PATH", "alltemplates.sqlite"),
            media_root: env_or("APP_MEDIA_ROOT", "media/templates"),
            preview_max_width: env_or("APP_PREVIEW_MAX_WIDTH", "400")
                .parse()
                .unwrap_or(400),
            jwt: JwtConfig {
                secret: env_or("APP_JWT_SECRET", "mysupersecret_secretsecretsecretkey!123"),
                issuer: env_or("APP_JWT_ISSUER", "alltemplates"),
                audience: env_or("APP_JWT_AUDIENCE", "alltemplates"),
                ttl_secs: 24 * 60 * 60,
            },
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
impl AppConfig {
    /// Configuration pointing at throwaway paths, for tests.
    pub fn for_tests(media_root: &str) -> AppConfig {
        AppConfig {
            host: "127.0.0.1".into(),
            port: 0,
            database_path: ":memory:".into(),
            media_root: media_root.into(),
            preview_max_width: 400,
            jwt: JwtConfig {
                secret: "test-secret".into(),
                issuer: "alltemplates".into(),
                audience: "alltemplates".into(),
                ttl_secs: 3600,
            },
        }
    }
}
