use std::{env, fs, path::{Path, PathBuf}};
use log::{info, debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_MERCHANT_PROFILE_PATH: &str = "merchant_profile.json";

const FALLBACK_PAYEE_NAME: &str = "Loja";
const FALLBACK_PAYEE_CITY: &str = "Cidade";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("SERVER_PORT must be a number, got {0:?}")]
    InvalidPort(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid merchant profile in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("SERVER_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match lookup("SERVER_PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };
        let log_level = lookup("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        Ok(ServerConfig { host, port, log_level })
    }
}

/// The store record behind the payment codes. Every field is optional, the
/// payee name and city fall back as the printed coupons expect.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MerchantProfile {
    #[serde(default)]
    pub pix_key: Option<String>,
    #[serde(default)]
    pub pix_city: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default, alias = "razao_social")]
    pub legal_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

impl MerchantProfile {
    /// Loads the profile from `PIX_KEY` and friends, falling back to the JSON
    /// file named by `MERCHANT_PROFILE_PATH`.
    pub fn load() -> Result<Self, ConfigError> {
        if let Some(profile) = Self::from_lookup(|name| env::var(name).ok()) {
            info!("Loading merchant profile from environment variables");
            return Ok(profile);
        }

        let path = env::var("MERCHANT_PROFILE_PATH")
            .unwrap_or_else(|_| DEFAULT_MERCHANT_PROFILE_PATH.to_string());
        info!("PIX_KEY not found, falling back to JSON file: {}", path);
        Self::from_json_file(&path)
    }

    /// `None` unless `PIX_KEY` is set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let pix_key = lookup("PIX_KEY")?;
        Some(MerchantProfile {
            pix_key: Some(pix_key),
            pix_city: lookup("PIX_CITY"),
            city: lookup("STORE_CITY"),
            legal_name: lookup("STORE_LEGAL_NAME"),
            name: lookup("STORE_NAME"),
        })
    }

    /// A missing file is an empty profile; an unreadable or malformed one is an error.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            warn!("Merchant profile {} not found, payment codes are disabled", path.display());
            return Ok(MerchantProfile::default());
        }

        debug!("Reading merchant profile from JSON file: {}", path.display());
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let profile = serde_json::from_str(&raw).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;

        info!("Successfully loaded merchant profile from {}", path.display());
        Ok(profile)
    }

    /// Codes are only produced when this is `Some`.
    pub fn pix_key(&self) -> Option<&str> {
        non_blank(&self.pix_key)
    }

    pub fn payee_name(&self) -> &str {
        non_blank(&self.legal_name)
            .or_else(|| non_blank(&self.name))
            .unwrap_or(FALLBACK_PAYEE_NAME)
    }

    pub fn payee_city(&self) -> &str {
        non_blank(&self.pix_city)
            .or_else(|| non_blank(&self.city))
            .unwrap_or(FALLBACK_PAYEE_CITY)
    }
}
