// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use std::env;
use std::fmt::Display;
use std::ops::RangeInclusive;
use std::path::PathBuf;

/// Minimum accepted length of the session signing key.
pub const MIN_SIGNING_KEY_LEN: usize = 32;

/// Accepted session lifetimes, one hour up to a year.
pub const SESSION_TTL_HOURS_RANGE: RangeInclusive<i64> = 1..=24 * 365;

/// Work factors the bcrypt crate accepts.
pub const BCRYPT_COST_RANGE: RangeInclusive<u32> = 4..=31;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database file
    pub database_path: PathBuf,
    /// Listen host
    pub bind_address: String,
    /// Listen port
    pub port: u16,
    /// HS256 key for session tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,
    /// Session lifetime in hours
    pub session_ttl_hours: i64,
    /// Mark cookies `Secure` (enable behind HTTPS)
    pub secure_cookies: bool,
    /// bcrypt work factor for password hashes
    pub bcrypt_cost: u32,
}

impl Config {
    /// Deterministic settings for tests: in-memory friendly, cheap hashing.
    pub fn test_default() -> Self {
        Self {
            database_path: PathBuf::from(":memory:"),
            bind_address: "127.0.0.1".to_string(),
            port: 5000,
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!!".to_vec(),
            session_ttl_hours: 24,
            secure_cookies: false,
            bcrypt_cost: 4,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is read first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let jwt_signing_key = env::var("JWT_SIGNING_KEY")
            .map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?
            .into_bytes();
        if jwt_signing_key.len() < MIN_SIGNING_KEY_LEN {
            return Err(ConfigError::Invalid {
                name: "JWT_SIGNING_KEY",
                reason: format!("must be at least {MIN_SIGNING_KEY_LEN} bytes"),
            });
        }

        Ok(Self {
            database_path: env::var("DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/ecotrack.db")),
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("PORT", 5000)?,
            jwt_signing_key,
            session_ttl_hours: in_range(
                "SESSION_TTL_HOURS",
                parse_var("SESSION_TTL_HOURS", 24 * 7)?,
                SESSION_TTL_HOURS_RANGE,
            )?,
            secure_cookies: parse_var("SECURE_COOKIES", false)?,
            bcrypt_cost: in_range(
                "BCRYPT_COST",
                parse_var("BCRYPT_COST", bcrypt::DEFAULT_COST)?,
                BCRYPT_COST_RANGE,
            )?,
        })
    }

    /// `host:port` string for the listener.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            reason: format!("cannot parse {raw:?}"),
        }),
        Err(_) => Ok(default),
    }
}

fn in_range<T: PartialOrd + Display>(
    name: &'static str,
    value: T,
    range: RangeInclusive<T>,
) -> Result<T, ConfigError> {
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::Invalid {
            name,
            reason: format!(
                "{value} is outside {}..={}",
                range.start(),
                range.end()
            ),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}
