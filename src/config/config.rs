use config::{ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;
const DEFAULT_RECEIPT_TIMEOUT_SECS: u64 = 600;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub ethereum: EthereumConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EthereumConfig {
    /// HTTP RPC 地址
    pub rpc_url: String,
    /// 等待收据的超时秒数，0 表示一直等待
    #[serde(default = "default_receipt_timeout_secs")]
    pub receipt_timeout_secs: u64,
    /// 收据轮询间隔（毫秒）
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_receipt_timeout_secs() -> u64 {
    DEFAULT_RECEIPT_TIMEOUT_SECS
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

impl EthereumConfig {
    pub fn receipt_timeout(&self) -> Duration {
        Duration::from_secs(self.receipt_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Config {
    /// 依次叠加 `config/default`、`config/<APP_ENVIRONMENT>`、`APP__*` 环境变量
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".into());
        Self::load_from("config", &environment)
    }

    pub fn load_from(dir: &str, environment: &str) -> Result<Self, ConfigError> {
        config::Config::builder()
            .add_source(File::with_name(&format!("{}/default", dir)))
            .add_source(File::with_name(&format!("{}/{}", dir, environment)).required(false))
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn config_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "eth-chain-client-config-{}-{}",
            name,
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn defaults_fill_optional_fields() {
        let dir = config_dir("defaults");
        fs::write(
            dir.join("default.toml"),
            "[ethereum]\nrpc_url = \"http://127.0.0.1:8545\"\n",
        )
        .unwrap();

        let config = Config::load_from(dir.to_str().unwrap(), "test").unwrap();
        assert_eq!(config.ethereum.rpc_url, "http://127.0.0.1:8545");
        assert_eq!(config.ethereum.receipt_timeout(), Duration::from_secs(600));
        assert_eq!(config.ethereum.poll_interval(), Duration::from_millis(1000));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn environment_file_overrides_default() {
        let dir = config_dir("layered");
        fs::write(
            dir.join("default.toml"),
            "[ethereum]\nrpc_url = \"http://127.0.0.1:8545\"\nreceipt_timeout_secs = 60\n",
        )
        .unwrap();
        fs::write(
            dir.join("staging.toml"),
            "[ethereum]\nrpc_url = \"https://rpc.example.org\"\nreceipt_timeout_secs = 0\n",
        )
        .unwrap();

        let config = Config::load_from(dir.to_str().unwrap(), "staging").unwrap();
        assert_eq!(config.ethereum.rpc_url, "https://rpc.example.org");
        assert!(config.ethereum.receipt_timeout().is_zero());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_default_file_is_an_error() {
        let dir = config_dir("missing");
        assert!(Config::load_from(dir.to_str().unwrap(), "test").is_err());
        fs::remove_dir_all(&dir).unwrap();
    }
}
