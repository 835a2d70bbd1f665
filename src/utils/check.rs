use ethers_core::types::Address;
use ethers_core::utils::to_checksum;

/// 空合约代码 `0x` 的长度
pub const EMPTY_CODE_LEN: usize = 2;

/// 本地测试节点（ganache / testrpc）的 clientVersion 标记
pub const TEST_RPC_MARKER: &str = "TestRPC";

/// 代码字符串是否包含实际字节码（长度超过 `0x`）
pub fn has_bytecode_hex(code: &str) -> bool {
    code.len() > EMPTY_CODE_LEN
}

/// clientVersion 是否来自本地测试节点
pub fn is_test_rpc_version(node_version: &str) -> bool {
    node_version.contains(TEST_RPC_MARKER)
}

/// 检查字符串是否为合法以太坊地址
///
/// 接受带或不带 `0x` 前缀的 40 位十六进制；全小写或全大写直接通过，
/// 大小写混合时必须满足 EIP-55 校验和。
pub fn is_address(value: &str) -> bool {
    let body = value.strip_prefix("0x").unwrap_or(value);
    if body.len() != 40 {
        return false;
    }
    let Ok(bytes) = hex::decode(body) else {
        return false;
    };

    let lower = body.to_ascii_lowercase();
    let upper = body.to_ascii_uppercase();
    if body == lower || body == upper {
        return true;
    }

    // 混合大小写：与校验和格式逐字比对
    let address = Address::from_slice(&bytes);
    to_checksum(&address, None)[2..] == *body
}
