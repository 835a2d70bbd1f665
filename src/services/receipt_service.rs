// services/receipt_service.rs

use crate::errors::error::AppError;
use crate::infrastructure::provider::ProviderTrait;
use crate::{log_debug, log_info};
use ethers_core::types::{H256, TransactionReceipt};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{Instant, sleep};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// 轮询交易收据直到上链、失败或超时
pub struct ReceiptWaiter {
    provider: Arc<dyn ProviderTrait>,
    poll_interval: Duration,
}

impl ReceiptWaiter {
    pub fn new(provider: Arc<dyn ProviderTrait>, poll_interval: Duration) -> Self {
        Self {
            provider,
            poll_interval,
        }
    }

    /// 等待交易收据
    ///
    /// - 收据 status 为 0：立即返回 `TransactionFailed`
    /// - 尚无收据：等待一个轮询间隔后重试，累计耗时超过 `timeout` 返回 `TransactionTimeout`
    /// - `timeout` 为 0 表示不设超时，一直轮询
    /// - `unknown transaction` 视为尚未上链，其余 RPC 错误直接返回
    pub async fn wait(
        &self,
        tx_hash: H256,
        timeout: Duration,
    ) -> Result<TransactionReceipt, AppError> {
        let started = Instant::now();
        let mut attempt: u64 = 0;

        loop {
            attempt += 1;
            if let Some(receipt) = self.try_get_receipt(tx_hash).await? {
                return check_receipt_status(tx_hash, receipt);
            }

            log_debug!(
                "交易 {:#x} 尚未上链 (第 {} 次查询)，{:?} 后重试",
                tx_hash,
                attempt,
                self.poll_interval
            );
            sleep(self.poll_interval).await;

            let timed_out = !timeout.is_zero() && started.elapsed() > timeout;
            if timed_out {
                return Err(AppError::TransactionTimeout {
                    tx_hash,
                    timeout_secs: timeout.as_secs_f64(),
                });
            }
        }
    }

    async fn try_get_receipt(&self, tx_hash: H256) -> Result<Option<TransactionReceipt>, AppError> {
        match self.provider.get_transaction_receipt(tx_hash).await {
            Ok(receipt) => Ok(receipt),
            Err(e) if e.is_unknown_transaction() => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// status 缺失（拜占庭分叉前的收据）按成功处理
fn check_receipt_status(
    tx_hash: H256,
    receipt: TransactionReceipt,
) -> Result<TransactionReceipt, AppError> {
    if receipt.status.is_some_and(|status| status.is_zero()) {
        return Err(AppError::TransactionFailed { tx_hash });
    }
    log_info!(
        "交易已确认: hash={:#x}, block={:?}",
        tx_hash,
        receipt.block_number
    );
    Ok(receipt)
}
