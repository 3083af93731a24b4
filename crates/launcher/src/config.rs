//! Launcher configuration
//!
//! Settings are read from an optional `launcher.toml` in the working
//! directory. When the file is absent every field takes its default.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{LaunchError, LaunchResult};

/// Config file looked up relative to the working directory
pub const CONFIG_FILE: &str = "launcher.toml";

/// Wallet file looked up relative to the working directory
pub const DEFAULT_WALLET_PATH: &str = "wallet.json";

pub const DEFAULT_UPLOAD_URL: &str = "https://pump.fun/api/ipfs";
pub const DEFAULT_CREATED_ON: &str = "https://pump.fun";
pub const MAINNET_RPC_URL: &str = "https://api.mainnet-beta.solana.com";
pub const DEVNET_RPC_URL: &str = "https://api.devnet.solana.com";

/// Minimum wallet balance before the launch may proceed (0.1 SOL)
pub const MIN_BALANCE_LAMPORTS: u64 = 100_000_000;

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LaunchConfig {
    /// Path of the JSON keypair file
    pub wallet_path: PathBuf,

    /// Multipart endpoint that pins the image and metadata document
    pub upload_url: String,

    /// Provenance value sent as `createdOn`
    pub created_on: String,

    pub mainnet_rpc_url: String,
    pub devnet_rpc_url: String,

    /// Default tracing filter level when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            wallet_path: PathBuf::from(DEFAULT_WALLET_PATH),
            upload_url: DEFAULT_UPLOAD_URL.to_string(),
            created_on: DEFAULT_CREATED_ON.to_string(),
            mainnet_rpc_url: MAINNET_RPC_URL.to_string(),
            devnet_rpc_url: DEVNET_RPC_URL.to_string(),
            log_level: "warn".to_string(),
        }
    }
}

impl LaunchConfig {
    /// Load from `path` if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> LaunchResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::from_file(path)
    }

    pub fn from_file(path: impl AsRef<Path>) -> LaunchResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            LaunchError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: LaunchConfig = toml::from_str(&content).map_err(|e| {
            LaunchError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> LaunchResult<()> {
        if self.wallet_path.as_os_str().is_empty() {
            return Err(LaunchError::Config("wallet_path must not be empty".to_string()));
        }

        for (field, url) in [
            ("upload_url", &self.upload_url),
            ("mainnet_rpc_url", &self.mainnet_rpc_url),
            ("devnet_rpc_url", &self.devnet_rpc_url),
        ] {
            if !has_http_scheme(url) {
                return Err(LaunchError::Config(format!(
                    "{} must start with http:// or https://, got '{}'",
                    field, url
                )));
            }
        }

        Ok(())
    }
}

/// Cluster the token is launched on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Network {
    Mainnet,
    Devnet,
    Custom(String),
}

impl Network {
    pub fn rpc_url(&self, config: &LaunchConfig) -> String {
        match self {
            Network::Mainnet => config.mainnet_rpc_url.clone(),
            Network::Devnet => config.devnet_rpc_url.clone(),
            Network::Custom(url) => url.clone(),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Network::Mainnet => "mainnet-beta",
            Network::Devnet => "devnet",
            Network::Custom(_) => "custom",
        }
    }
}

/// True when `url` carries an http(s) scheme prefix
pub fn has_http_scheme(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}
