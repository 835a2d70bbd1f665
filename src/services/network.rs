use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const MAINNET: &str = "mainnet";

// 参考 EIP-155 的 chain id 列表
static NETWORKS: Lazy<HashMap<u64, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (1, MAINNET),
        (2, "morden"),
        (3, "ropsten"),
        (4, "rinkeby"),
        (42, "kovan"),
    ])
});

/// 按 net_version 返回的网络 id 查名称，未知 id 统一命名为 `dev-<id>`
pub fn network_name(network_id: &str) -> String {
    network_id
        .trim()
        .parse::<u64>()
        .ok()
        .and_then(|id| NETWORKS.get(&id))
        .map(|name| name.to_string())
        .unwrap_or_else(|| format!("dev-{}", network_id))
}

pub fn is_mainnet_name(name: &str) -> bool {
    name == MAINNET
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_ids_resolve_to_table_names() {
        assert_eq!(network_name("1"), "mainnet");
        assert_eq!(network_name("2"), "morden");
        assert_eq!(network_name("3"), "ropsten");
        assert_eq!(network_name("4"), "rinkeby");
        assert_eq!(network_name("42"), "kovan");
    }

    #[test]
    fn unknown_ids_fall_back_to_dev_prefix() {
        for id in ["0", "5", "1337", "5777", "11155111"] {
            assert_eq!(network_name(id), format!("dev-{}", id));
        }
        assert_eq!(network_name("local"), "dev-local");
    }

    #[test]
    fn only_mainnet_name_is_mainnet() {
        assert!(is_mainnet_name("mainnet"));
        assert!(!is_mainnet_name("dev-1"));
        assert!(!is_mainnet_name("kovan"));
    }
}
