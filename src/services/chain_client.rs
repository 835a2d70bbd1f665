// services/chain_client.rs

use crate::errors::error::AppError;
use crate::infrastructure::provider::{ProviderSource, ProviderTrait};
use crate::services::network::{is_mainnet_name, network_name};
use crate::services::receipt_service::{DEFAULT_POLL_INTERVAL, ReceiptWaiter};
use crate::utils::{
    has_bytecode_hex, is_test_rpc_version, parse_address, parse_block_filter,
    parse_storage_position, parse_tx_hash, u256_to_bigdecimal,
};
use crate::{log_debug, log_info};
use arc_swap::ArcSwapOption;
use bigdecimal::BigDecimal;
use ethers_core::types::transaction::eip2718::TypedTransaction;
use ethers_core::types::{
    Address, Block, BlockId, BlockNumber, Bytes, H256, Transaction, TransactionReceipt, U256,
};
use ethers_core::utils::keccak256;
use std::sync::Arc;
use std::time::Duration;

/// 以太坊节点访问的上下文对象
///
/// 创建后需先 `initialize` 一个 provider，之后所有查询都经由同一个客户端发出。
/// 重复 `initialize` 时以最后一次为准。
pub struct ChainClient {
    source: ArcSwapOption<ProviderSource>,
    poll_interval: Duration,
}

impl Default for ChainClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ChainClient {
    pub fn new() -> Self {
        Self::with_poll_interval(DEFAULT_POLL_INTERVAL)
    }

    pub fn with_poll_interval(poll_interval: Duration) -> Self {
        Self {
            source: ArcSwapOption::empty(),
            poll_interval,
        }
    }

    /// 设置 provider；字符串视为 HTTP RPC 地址，此处不做校验
    pub fn initialize(&self, source: impl Into<ProviderSource>) {
        let source = source.into();
        log_debug!("ChainClient provider 设置为 {:?}", source);
        self.source.store(Some(Arc::new(source)));
    }

    pub fn is_initialized(&self) -> bool {
        self.source.load().is_some()
    }

    /// 取得当前 provider
    ///
    /// 以 URL 初始化时在首次调用时构造 HTTP 客户端，并替换掉槽位中的 URL
    pub fn provider(&self) -> Result<Arc<dyn ProviderTrait>, AppError> {
        let current = self.source.load_full().ok_or(AppError::NotInitialized)?;
        let provider = current.resolve()?;

        if current.is_url() {
            // 期间若有新的 initialize，保留新值
            let resolved = Some(Arc::new(ProviderSource::Handle(provider.clone())));
            let _ = self.source.compare_and_swap(&Some(current), resolved);
        }
        Ok(provider)
    }

    pub fn receipt_waiter(&self) -> Result<ReceiptWaiter, AppError> {
        Ok(ReceiptWaiter::new(self.provider()?, self.poll_interval))
    }

    // ==================== 本地工具 ====================

    /// keccak-256（对字符串的 UTF-8 字节），返回 `0x` 前缀的十六进制
    pub fn sha3(value: &str) -> String {
        format!("0x{}", hex::encode(keccak256(value.as_bytes())))
    }

    pub fn is_address(value: &str) -> bool {
        crate::utils::is_address(value)
    }

    // ==================== 账户 ====================

    pub async fn accounts(&self) -> Result<Vec<Address>, AppError> {
        self.provider()?.get_accounts().await
    }

    /// 节点托管的第一个账户
    pub async fn default_account(&self) -> Result<Address, AppError> {
        self.accounts()
            .await?
            .first()
            .copied()
            .ok_or_else(|| AppError::NotFound("节点未托管任何账户".to_string()))
    }

    /// 余额（wei）
    pub async fn get_balance(&self, address: &str) -> Result<BigDecimal, AppError> {
        let provider = self.provider()?;
        let wei = provider.get_balance(parse_address(address)?).await?;
        u256_to_bigdecimal(wei)
    }

    // ==================== 合约代码 / 存储 ====================

    pub async fn get_code(&self, address: &str) -> Result<Bytes, AppError> {
        let provider = self.provider()?;
        provider.get_code(parse_address(address)?).await
    }

    pub async fn has_bytecode(&self, address: &str) -> Result<bool, AppError> {
        let code = self.get_code(address).await?;
        Ok(has_bytecode_hex(&code.to_string()))
    }

    pub async fn get_storage_at(&self, address: &str, position: &str) -> Result<H256, AppError> {
        let provider = self.provider()?;
        let address = parse_address(address)?;
        let position = parse_storage_position(position)?;
        provider.get_storage_at(address, position).await
    }

    // ==================== 区块 ====================

    /// `filter` 支持 `latest` / `earliest` / `pending`、区块号和区块哈希
    pub async fn get_block(&self, filter: &str) -> Result<Option<Block<H256>>, AppError> {
        let provider = self.provider()?;
        provider.get_block(parse_block_filter(filter)?).await
    }

    pub async fn get_block_by_id(&self, block: BlockId) -> Result<Option<Block<H256>>, AppError> {
        self.provider()?.get_block(block).await
    }

    pub async fn get_latest_block(&self) -> Result<Block<H256>, AppError> {
        self.get_block_by_id(BlockNumber::Latest.into())
            .await?
            .ok_or_else(|| AppError::NotFound("latest block".to_string()))
    }

    pub async fn get_latest_block_number(&self) -> Result<u64, AppError> {
        Ok(self.provider()?.get_last_block_number().await?.as_u64())
    }

    // ==================== 交易 ====================

    pub async fn get_transaction(&self, tx_hash: &str) -> Result<Option<Transaction>, AppError> {
        let provider = self.provider()?;
        provider.get_transaction(parse_tx_hash(tx_hash)?).await
    }

    pub async fn get_transaction_receipt(
        &self,
        tx_hash: &str,
    ) -> Result<Option<TransactionReceipt>, AppError> {
        let provider = self.provider()?;
        provider.get_transaction_receipt(parse_tx_hash(tx_hash)?).await
    }

    /// 轮询直到收据出现；`timeout` 为 0 时不超时
    pub async fn wait_for_receipt(
        &self,
        tx_hash: &str,
        timeout: Duration,
    ) -> Result<TransactionReceipt, AppError> {
        let waiter = self.receipt_waiter()?;
        let tx_hash = parse_tx_hash(tx_hash)?;
        log_info!("等待交易收据: hash={:#x}, timeout={:?}", tx_hash, timeout);
        waiter.wait(tx_hash, timeout).await
    }

    pub async fn estimate_gas(&self, tx: &TypedTransaction) -> Result<U256, AppError> {
        self.provider()?.estimate_gas(tx).await
    }

    pub async fn send_transaction(&self, tx: TypedTransaction) -> Result<H256, AppError> {
        let tx_hash = self.provider()?.send_transaction(tx).await?;
        log_info!("交易已广播: hash={:#x}", tx_hash);
        Ok(tx_hash)
    }

    // ==================== 网络 / 节点 ====================

    /// net_version 原始值
    pub async fn get_network(&self) -> Result<String, AppError> {
        self.provider()?.get_net_version().await
    }

    pub async fn get_network_name(&self) -> Result<String, AppError> {
        Ok(network_name(&self.get_network().await?))
    }

    pub async fn is_mainnet(&self) -> Result<bool, AppError> {
        Ok(is_mainnet_name(&self.get_network_name().await?))
    }

    /// web3_clientVersion
    pub async fn get_node(&self) -> Result<String, AppError> {
        self.provider()?.client_version().await
    }

    pub async fn is_test_rpc_node(&self) -> Result<bool, AppError> {
        Ok(is_test_rpc_version(&self.get_node().await?))
    }
}
