use ethers_core::types::H256;
use ethers_providers::ProviderError;
use thiserror::Error;

/// 远程节点在交易尚未被打包时返回的错误片段
pub const UNKNOWN_TRANSACTION_MARKER: &str = "unknown transaction";

#[derive(Error, Debug)]
pub enum AppError {
    /// 未调用 initialize 就访问 provider
    #[error("ChainClient must be initialized with a web3 provider")]
    NotInitialized,

    /// RPC 层错误，原样透传
    #[error("区块链RPC错误: {0}")]
    ProviderError(String),

    #[error("Transaction: {tx_hash:#x} exited with an error (status 0).")]
    TransactionFailed { tx_hash: H256 },

    #[error("Transaction {tx_hash:#x} wasn't processed in {timeout_secs} seconds!")]
    TransactionTimeout { tx_hash: H256, timeout_secs: f64 },

    #[error("无效的URL: {0}")]
    InvalidUrl(String),

    #[error("无效的地址: {0}")]
    InvalidAddress(String),

    #[error("无效的tx_hash: {0}")]
    InvalidTxHash(String),

    #[error("无效的区块号: {0}")]
    InvalidBlockNumber(String),

    /// 资源未找到
    #[error("资源未找到: {0}")]
    NotFound(String),

    /// 类型转换错误（U256→BigDecimal 等）
    #[error("类型转换错误: {0}")]
    Conversion(String),
}

impl AppError {
    /// 节点还不认识这笔交易（未广播到该节点或尚未打包），轮询时按"未上链"处理
    pub fn is_unknown_transaction(&self) -> bool {
        matches!(self, AppError::ProviderError(msg) if msg.contains(UNKNOWN_TRANSACTION_MARKER))
    }
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        AppError::ProviderError(err.to_string())
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::InvalidUrl(err.to_string())
    }
}
