//! Centralized server configuration.
//!
//! This module provides strongly-typed configuration for the server,
//! loaded via the `config` crate from an optional `etalase.toml` file and
//! environment variables.
//!
//! See [`RoutePolicy`](etalase_access::RoutePolicy) for the route-access
//! policy configuration.

use etalase_access::{AccountDirectory, RoutePolicy};
use serde::Deserialize;

/// Server configuration composed from library configs.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address the server listens on.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Authentication configuration.
    pub auth: AuthConfig,

    /// Route-access policy.
    #[serde(default)]
    pub policy: RoutePolicy,
}

/// Authentication-related configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared secret used to sign session tokens.
    pub token_secret: String,

    /// Session token lifetime in minutes.
    /// Stateless tokens cannot be revoked; the TTL bounds how long a
    /// stale role claim stays usable.
    #[serde(default = "default_token_ttl_minutes")]
    pub token_ttl_minutes: i64,

    /// Whether to set the Secure flag on cookies (requires HTTPS).
    /// Defaults to true for production safety; set to false for local
    /// HTTP development.
    #[serde(default = "default_secure_cookies")]
    pub secure_cookies: bool,

    /// Accounts permitted to sign in.
    #[serde(default)]
    pub accounts: AccountDirectory,
}

fn default_listen_addr() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_token_ttl_minutes() -> i64 {
    60
}

fn default_secure_cookies() -> bool {
    true
}

impl ServerConfig {
    /// Loads configuration from `etalase.toml` (if present) and
    /// environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required configuration is missing or invalid.
    pub fn load() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name("etalase").required(false))
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_configuration_applies_defaults() {
        let config: ServerConfig = serde_json::from_value(serde_json::json!({
            "auth": { "token_secret": "secret" }
        }))
        .expect("deserialize");

        assert_eq!(config.listen_addr, "127.0.0.1:3000");
        assert_eq!(config.auth.token_ttl_minutes, 60);
        assert!(config.auth.secure_cookies);
        assert!(config.auth.accounts.is_empty());
        config.policy.validate().expect("default policy is valid");
    }

    #[test]
    fn accounts_deserialize_from_configuration() {
        let config: ServerConfig = serde_json::from_value(serde_json::json!({
            "auth": {
                "token_secret": "secret",
                "secure_cookies": false,
                "accounts": [
                    {
                        "username": "admin",
                        "password_hash": "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$x",
                        "role": "admin"
                    }
                ]
            }
        }))
        .expect("deserialize");

        assert_eq!(config.auth.accounts.len(), 1);
        assert!(!config.auth.secure_cookies);
    }
}
