use crate::errors::error::AppError;
use ethers_core::types::TransactionReceipt;
use num_format::{Locale, ToFormattedString};

/// 区块号千分位展示，例如 `19,000,000`
pub fn format_block_number(number: u64) -> String {
    number.to_formatted_string(&Locale::en)
}

pub fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

/// 收据按 RPC 原始字段结构输出
pub fn receipt_to_json(receipt: &TransactionReceipt) -> Result<String, AppError> {
    serde_json::to_string_pretty(receipt)
        .map_err(|e| AppError::Conversion(format!("收据序列化失败: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers_core::types::{H256, U64};

    #[test]
    fn block_numbers_get_thousands_separators() {
        assert_eq!(format_block_number(0), "0");
        assert_eq!(format_block_number(19_000_000), "19,000,000");
    }

    #[test]
    fn receipt_json_keeps_rpc_field_names() {
        let receipt = TransactionReceipt {
            transaction_hash: H256::repeat_byte(0x01),
            status: Some(U64::from(1)),
            ..Default::default()
        };
        let json = receipt_to_json(&receipt).unwrap();
        assert!(json.contains("\"transactionHash\""));
        assert!(json.contains("\"status\": \"0x1\""));
    }
}
