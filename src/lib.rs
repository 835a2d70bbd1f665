//! 以太坊 JSON-RPC 客户端门面：统一管理 provider，提供链上查询与交易收据等待
pub mod config;
pub mod errors;
pub mod infrastructure;
pub mod services;
pub mod startup;
pub mod utils;

pub use errors::error::AppError;
pub use infrastructure::provider::{EthereumProvider, ProviderSource, ProviderTrait};
pub use services::ChainClient;
