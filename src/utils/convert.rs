use crate::errors::error::AppError;
use bigdecimal::BigDecimal;
use ethers_core::types::{Address, BlockId, BlockNumber, H256, U256};
use std::str::FromStr;

pub fn parse_address(address: &str) -> Result<Address, AppError> {
    address
        .parse::<Address>()
        .map_err(|_| AppError::InvalidAddress(address.to_string()))
}

pub fn parse_tx_hash(tx_hash: &str) -> Result<H256, AppError> {
    tx_hash
        .parse::<H256>()
        .map_err(|_| AppError::InvalidTxHash(tx_hash.to_string()))
}

/// 存储槽位置：十进制或 `0x` 十六进制，转换为 32 字节 key
pub fn parse_storage_position(position: &str) -> Result<H256, AppError> {
    let slot = match position.strip_prefix("0x") {
        Some("") => None,
        Some(hex_part) => U256::from_str_radix(hex_part, 16).ok(),
        None if position.is_empty() => None,
        None => U256::from_dec_str(position).ok(),
    }
    .ok_or_else(|| AppError::Conversion(format!("无效的存储槽位置: {}", position)))?;

    let mut key = [0u8; 32];
    slot.to_big_endian(&mut key);
    Ok(H256::from(key))
}

/// 区块过滤条件：`latest` / `earliest` / `pending` / 十进制或十六进制区块号 / 区块哈希
pub fn parse_block_filter(filter: &str) -> Result<BlockId, AppError> {
    match filter {
        "latest" => return Ok(BlockNumber::Latest.into()),
        "earliest" => return Ok(BlockNumber::Earliest.into()),
        "pending" => return Ok(BlockNumber::Pending.into()),
        _ => {}
    }

    if let Some(hex_part) = filter.strip_prefix("0x") {
        // 66 个字符的是区块哈希，其余按区块号处理
        if hex_part.len() == 64 {
            return filter
                .parse::<H256>()
                .map(BlockId::Hash)
                .map_err(|_| AppError::InvalidBlockNumber(filter.to_string()));
        }
        return u64::from_str_radix(hex_part, 16)
            .map(BlockId::from)
            .map_err(|_| AppError::InvalidBlockNumber(filter.to_string()));
    }

    filter
        .parse::<u64>()
        .map(BlockId::from)
        .map_err(|_| AppError::InvalidBlockNumber(filter.to_string()))
}

/// 将U256 转为 BigDecimal（wei 精度，不丢位）
pub fn u256_to_bigdecimal(value: U256) -> Result<BigDecimal, AppError> {
    BigDecimal::from_str(&value.to_string())
        .map_err(|e| AppError::Conversion(format!("U256({}) 转 BigDecimal 失败: {}", value, e)))
}
