use crate::errors::error::AppError;
use crate::log_info;
use async_trait::async_trait;
use ethers_core::types::transaction::eip2718::TypedTransaction;
use ethers_core::types::{
    Address, Block, BlockId, Bytes, H256, Transaction, TransactionReceipt, U64, U256,
};
use ethers_providers::{Http, JsonRpcClient, Middleware, Provider};
use std::sync::Arc;
use url::Url;

/// 节点 RPC 调用的统一入口，每个方法对应一次 JSON-RPC 请求，不做重试和缓存
#[async_trait]
pub trait ProviderTrait: Send + Sync {
    async fn get_accounts(&self) -> Result<Vec<Address>, AppError>;
    async fn get_balance(&self, address: Address) -> Result<U256, AppError>;
    async fn get_code(&self, address: Address) -> Result<Bytes, AppError>;
    async fn get_storage_at(&self, address: Address, position: H256) -> Result<H256, AppError>;
    async fn get_block(&self, block: BlockId) -> Result<Option<Block<H256>>, AppError>;
    async fn get_last_block_number(&self) -> Result<U64, AppError>;
    async fn get_transaction(&self, tx_hash: H256) -> Result<Option<Transaction>, AppError>;
    async fn get_transaction_receipt(
        &self,
        tx_hash: H256,
    ) -> Result<Option<TransactionReceipt>, AppError>;
    async fn estimate_gas(&self, tx: &TypedTransaction) -> Result<U256, AppError>;
    /// eth_sendTransaction，由节点托管账户签名，返回交易哈希
    async fn send_transaction(&self, tx: TypedTransaction) -> Result<H256, AppError>;
    /// net_version
    async fn get_net_version(&self) -> Result<String, AppError>;
    /// web3_clientVersion
    async fn client_version(&self) -> Result<String, AppError>;
}

/// 基于 ethers `Provider` 的实现，`P` 为底层传输（默认 HTTP）
#[derive(Debug)]
pub struct EthereumProvider<P = Http> {
    provider: Arc<Provider<P>>,
}

impl EthereumProvider<Http> {
    /// 由 RPC URL 构造 HTTP provider，仅校验 URL 格式，不发起连接
    pub fn connect(rpc_url: &str) -> Result<Self, AppError> {
        let url = Url::parse(rpc_url)?;
        log_info!("初始化 HTTP Provider: {}", url);
        Ok(Self::new(Provider::new(Http::new(url))))
    }
}

impl<P: JsonRpcClient> EthereumProvider<P> {
    pub fn new(provider: Provider<P>) -> Self {
        Self {
            provider: Arc::new(provider),
        }
    }
}

#[async_trait]
impl<P: JsonRpcClient + 'static> ProviderTrait for EthereumProvider<P> {
    async fn get_accounts(&self) -> Result<Vec<Address>, AppError> {
        self.provider.get_accounts().await.map_err(AppError::from)
    }

    async fn get_balance(&self, address: Address) -> Result<U256, AppError> {
        self.provider
            .get_balance(address, None)
            .await
            .map_err(AppError::from)
    }

    async fn get_code(&self, address: Address) -> Result<Bytes, AppError> {
        self.provider
            .get_code(address, None)
            .await
            .map_err(AppError::from)
    }

    async fn get_storage_at(&self, address: Address, position: H256) -> Result<H256, AppError> {
        self.provider
            .get_storage_at(address, position, None)
            .await
            .map_err(AppError::from)
    }

    async fn get_block(&self, block: BlockId) -> Result<Option<Block<H256>>, AppError> {
        self.provider.get_block(block).await.map_err(AppError::from)
    }

    async fn get_last_block_number(&self) -> Result<U64, AppError> {
        self.provider
            .get_block_number()
            .await
            .map_err(AppError::from)
    }

    async fn get_transaction(&self, tx_hash: H256) -> Result<Option<Transaction>, AppError> {
        self.provider
            .get_transaction(tx_hash)
            .await
            .map_err(AppError::from)
    }

    async fn get_transaction_receipt(
        &self,
        tx_hash: H256,
    ) -> Result<Option<TransactionReceipt>, AppError> {
        self.provider
            .get_transaction_receipt(tx_hash)
            .await
            .map_err(AppError::from)
    }

    async fn estimate_gas(&self, tx: &TypedTransaction) -> Result<U256, AppError> {
        self.provider
            .estimate_gas(tx, None)
            .await
            .map_err(AppError::from)
    }

    async fn send_transaction(&self, tx: TypedTransaction) -> Result<H256, AppError> {
        let pending_tx = self
            .provider
            .send_transaction(tx, None)
            .await
            .map_err(AppError::from)?;
        Ok(*pending_tx)
    }

    async fn get_net_version(&self) -> Result<String, AppError> {
        self.provider
            .get_net_version()
            .await
            .map_err(AppError::from)
    }

    async fn client_version(&self) -> Result<String, AppError> {
        self.provider.client_version().await.map_err(AppError::from)
    }
}
