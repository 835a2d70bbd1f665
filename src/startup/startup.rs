use std::sync::Arc;

use crate::config::Config;
use crate::errors::error::AppError;
use crate::services::ChainClient;
use crate::services::network::is_mainnet_name;
use crate::utils::is_test_rpc_version;
use crate::utils::format::{format_block_number, receipt_to_json, yes_no};
use crate::{log_info, log_warn};

pub type Result<T> = std::result::Result<T, AppError>;

/// 应用实例：持有配置和已初始化的 ChainClient
pub struct Application {
    pub config: Config,
    pub chain: Arc<ChainClient>,
}

/// 启动时打印的链状态摘要
#[derive(Debug, Clone)]
pub struct ChainReport {
    pub network_name: String,
    pub is_mainnet: bool,
    pub node_version: String,
    pub is_test_rpc: bool,
    pub latest_block: u64,
    pub accounts: usize,
}

impl Application {
    /// 构建应用实例（只记录 provider，不发起网络请求）
    pub fn build(config: Config) -> Self {
        let chain = ChainClient::with_poll_interval(config.ethereum.poll_interval());
        chain.initialize(config.ethereum.rpc_url.as_str());
        log_info!(
            "ChainClient 已初始化 | rpc: {} | 轮询间隔: {:?}",
            config.ethereum.rpc_url,
            config.ethereum.poll_interval()
        );
        Self {
            config,
            chain: Arc::new(chain),
        }
    }

    pub async fn report(&self) -> Result<ChainReport> {
        let network_name = self.chain.get_network_name().await?;
        let node_version = self.chain.get_node().await?;
        let latest_block = self.chain.get_latest_block_number().await?;
        let accounts = self.chain.accounts().await?.len();

        Ok(ChainReport {
            is_mainnet: is_mainnet_name(&network_name),
            is_test_rpc: is_test_rpc_version(&node_version),
            network_name,
            node_version,
            latest_block,
            accounts,
        })
    }

    /// 打印链摘要；给出交易哈希时等待其收据并以 JSON 输出
    pub async fn run(self, tx_hash: Option<String>) -> anyhow::Result<()> {
        let report = self.report().await?;
        log_info!(
            "网络: {} (mainnet: {}) | 节点: {} (TestRPC: {}) | 最新区块: {} | 账户数: {}",
            report.network_name,
            yes_no(report.is_mainnet),
            report.node_version,
            yes_no(report.is_test_rpc),
            format_block_number(report.latest_block),
            report.accounts
        );

        let Some(tx_hash) = tx_hash else {
            return Ok(());
        };

        let timeout = self.config.ethereum.receipt_timeout();
        if timeout.is_zero() {
            log_warn!("receipt_timeout_secs = 0，将一直等待交易 {}", tx_hash);
        }
        let receipt = self.chain.wait_for_receipt(&tx_hash, timeout).await?;
        println!("{}", receipt_to_json(&receipt)?);
        Ok(())
    }
}
