//! 测试用 provider：固定的查询结果 + 按脚本逐次返回的收据
use super::ethereum_provider::ProviderTrait;
use crate::errors::error::AppError;
use async_trait::async_trait;
use ethers_core::types::transaction::eip2718::TypedTransaction;
use ethers_core::types::{
    Address, Block, BlockId, Bytes, H256, Transaction, TransactionReceipt, U64, U256,
};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Clone)]
pub enum ReceiptStep {
    Pending,
    Mined(TransactionReceipt),
    Error(String),
}

pub fn receipt_with_status(tx_hash: H256, status: u64) -> TransactionReceipt {
    TransactionReceipt {
        transaction_hash: tx_hash,
        status: Some(U64::from(status)),
        block_number: Some(U64::from(100)),
        ..Default::default()
    }
}

#[derive(Debug)]
pub struct MockChain {
    pub net_version: String,
    pub client_version: String,
    pub code: Bytes,
    pub accounts: Vec<Address>,
    pub balance: U256,
    pub block_number: u64,
    pub(crate) receipts: Mutex<VecDeque<ReceiptStep>>,
    pub(crate) when_exhausted: ReceiptStep,
    pub(crate) receipt_calls: AtomicUsize,
}

impl Default for MockChain {
    fn default() -> Self {
        Self {
            net_version: "1".to_string(),
            client_version: "Geth/v1.13.5-stable/linux-amd64/go1.21.4".to_string(),
            code: Bytes::default(),
            accounts: Vec::new(),
            balance: U256::zero(),
            block_number: 0,
            receipts: Mutex::new(VecDeque::new()),
            when_exhausted: ReceiptStep::Pending,
            receipt_calls: AtomicUsize::new(0),
        }
    }
}

impl MockChain {
    /// 依次返回 `steps`，用完后一直返回 `when_exhausted`
    pub fn with_receipts(steps: Vec<ReceiptStep>, when_exhausted: ReceiptStep) -> Self {
        Self {
            receipts: Mutex::new(steps.into()),
            when_exhausted,
            ..Default::default()
        }
    }

    pub fn receipt_calls(&self) -> usize {
        self.receipt_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProviderTrait for MockChain {
    async fn get_accounts(&self) -> Result<Vec<Address>, AppError> {
        Ok(self.accounts.clone())
    }

    async fn get_balance(&self, _address: Address) -> Result<U256, AppError> {
        Ok(self.balance)
    }

    async fn get_code(&self, _address: Address) -> Result<Bytes, AppError> {
        Ok(self.code.clone())
    }

    async fn get_storage_at(&self, _address: Address, position: H256) -> Result<H256, AppError> {
        Ok(position)
    }

    async fn get_block(&self, _block: BlockId) -> Result<Option<Block<H256>>, AppError> {
        Ok(Some(Block {
            number: Some(U64::from(self.block_number)),
            ..Default::default()
        }))
    }

    async fn get_last_block_number(&self) -> Result<U64, AppError> {
        Ok(U64::from(self.block_number))
    }

    async fn get_transaction(&self, _tx_hash: H256) -> Result<Option<Transaction>, AppError> {
        Ok(None)
    }

    async fn get_transaction_receipt(
        &self,
        _tx_hash: H256,
    ) -> Result<Option<TransactionReceipt>, AppError> {
        self.receipt_calls.fetch_add(1, Ordering::SeqCst);
        let step = self
            .receipts
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.when_exhausted.clone());
        match step {
            ReceiptStep::Pending => Ok(None),
            ReceiptStep::Mined(receipt) => Ok(Some(receipt)),
            ReceiptStep::Error(msg) => Err(AppError::ProviderError(msg)),
        }
    }

    async fn estimate_gas(&self, _tx: &TypedTransaction) -> Result<U256, AppError> {
        Ok(U256::from(21_000))
    }

    async fn send_transaction(&self, _tx: TypedTransaction) -> Result<H256, AppError> {
        Ok(H256::repeat_byte(0x77))
    }

    async fn get_net_version(&self) -> Result<String, AppError> {
        Ok(self.net_version.clone())
    }

    async fn client_version(&self) -> Result<String, AppError> {
        Ok(self.client_version.clone())
    }
}
