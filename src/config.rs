use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub explorer: ExplorerConfig,
    pub polling: PollingConfig,
    pub wallet: WalletConfig,
    pub ui: UiConfig,
    pub notifications: NotificationConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Base URL of the Esplora-style REST API.
    pub api_url: String,
    /// Base URL for human-facing transaction links.
    pub link_base: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PollingConfig {
    /// Interval between payment status checks while a deposit is watched.
    pub payment_interval_ms: u64,
    /// Interval between wallet balance/history refreshes.
    pub balance_interval_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct WalletConfig {
    /// BIP32 path for the session deposit key.
    pub derivation_path: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct UiConfig {
    pub max_history_entries: usize,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct NotificationConfig {
    pub enabled: bool,
    pub cooldown_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            explorer: ExplorerConfig::default(),
            polling: PollingConfig::default(),
            wallet: WalletConfig::default(),
            ui: UiConfig::default(),
            notifications: NotificationConfig::default(),
        }
    }
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            api_url: "https://blockstream.info/testnet/api".into(),
            link_base: "https://blockstream.info/testnet".into(),
        }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            payment_interval_ms: 5_000,
            balance_interval_ms: 5_000,
        }
    }
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            // BIP44, coin type 1 (testnet)
            derivation_path: "m/44'/1'/0'/0/0".into(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            max_history_entries: 50,
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cooldown_seconds: 30,
        }
    }
}

impl Config {
    /// Load config from a TOML file. Falls back to defaults if file doesn't exist.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!("Config file {} not found, using defaults", path.display());
            return Self::default();
        }
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    tracing::info!("Config loaded from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {e}, using defaults", path.display());
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read {}: {e}, using defaults", path.display());
                Self::default()
            }
        }
    }
}
