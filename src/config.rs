/*
 * Responsibility
 * - 環境変数の読み込み (HYDRA_BASE_URL, PORT)
 * - 設定値のバリデーション (不足なら起動失敗)
 */
use std::fmt;
use std::net::{Ipv4Addr, SocketAddr};

use url::Url;

const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    /// Base URL of the identity provider (the `/oauth2/introspect` endpoint lives under it).
    pub hydra_base_url: Url,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup, so tests never touch the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid("PORT"))?,
            None => DEFAULT_PORT,
        };
        let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));

        let raw_base_url = lookup("HYDRA_BASE_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("HYDRA_BASE_URL"))?;

        let hydra_base_url =
            Url::parse(&raw_base_url).map_err(|_| ConfigError::Invalid("HYDRA_BASE_URL"))?;
        if hydra_base_url.cannot_be_a_base() {
            return Err(ConfigError::Invalid("HYDRA_BASE_URL"));
        }

        Ok(Self {
            addr,
            hydra_base_url,
        })
    }
}
