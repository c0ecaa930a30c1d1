// ABOUTME: Configuration loading and validation for the mockapi server.
// ABOUTME: Reads MOCKAPI_* environment variables, applies CLI overrides, and refuses remote binds unless allowed.

use std::net::SocketAddr;

use thiserror::Error;

pub const DEFAULT_BIND: &str = "127.0.0.1:3002";

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("bind address from MOCKAPI_BIND or --bind is not a valid socket address: {0}")]
    InvalidBind(String),

    #[error("bind address {0} is not loopback; set MOCKAPI_ALLOW_REMOTE=true to expose the mock server")]
    RemoteNotAllowed(SocketAddr),
}

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockConfig {
    pub bind: SocketAddr,
    pub allow_remote: bool,
}

impl MockConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - MOCKAPI_BIND: socket address to bind (default: 127.0.0.1:3002)
    /// - MOCKAPI_ALLOW_REMOTE: allow non-loopback bind addresses (default: false)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(None, None)
    }

    /// Load configuration from the environment with command-line overrides on top.
    /// A `--bind` value replaces MOCKAPI_BIND entirely, so a bad environment value
    /// does not matter once the CLI supplies one.
    pub fn load(cli_bind: Option<&str>, cli_port: Option<u16>) -> Result<Self, ConfigError> {
        let env_bind = std::env::var("MOCKAPI_BIND").ok();
        let allow_remote = std::env::var("MOCKAPI_ALLOW_REMOTE").ok();
        let bind = cli_bind.or(env_bind.as_deref());
        Self::resolve(bind, cli_port, allow_remote.as_deref())
    }

    pub fn from_values(bind: Option<&str>, allow_remote: Option<&str>) -> Result<Self, ConfigError> {
        Self::resolve(bind, None, allow_remote)
    }

    /// Build and validate a config from the winning bind address, an optional port
    /// applied on top of it, and the remote opt-in flag.
    fn resolve(
        bind: Option<&str>,
        port: Option<u16>,
        allow_remote: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let bind_str = bind.filter(|b| !b.is_empty()).unwrap_or(DEFAULT_BIND);
        let mut bind: SocketAddr = bind_str
            .parse()
            .map_err(|_| ConfigError::InvalidBind(bind_str.to_string()))?;
        if let Some(port) = port {
            bind.set_port(port);
        }

        let allow_remote = allow_remote
            .map(|v| v == "true" || v == "1" || v == "yes")
            .unwrap_or(false);

        let config = Self { bind, allow_remote };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.allow_remote && !self.bind.ip().is_loopback() {
            return Err(ConfigError::RemoteNotAllowed(self.bind));
        }
        Ok(())
    }
}
