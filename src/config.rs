use anyhow::Context;
use serde::Deserialize;

/// Tokens live for 7 days.
pub const TOKEN_TTL_MINUTES: i64 = 60 * 24 * 7;

/// Token signing settings. The secret has no default; startup fails without it.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any variable source.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let secret = var("JWT_SECRET").context("JWT_SECRET must be set")?;
        anyhow::ensure!(!secret.trim().is_empty(), "JWT_SECRET must not be empty");

        let jwt = JwtConfig {
            secret,
            issuer: var("JWT_ISSUER").unwrap_or_else(|| "minilink".into()),
            audience: var("JWT_AUDIENCE").unwrap_or_else(|| "minilink-users".into()),
            ttl_minutes: TOKEN_TTL_MINUTES,
        };
        Ok(Self { database_url, jwt })
    }
}
