pub mod chain_client;
pub mod network;
pub mod receipt_service;

pub use chain_client::ChainClient;
pub use receipt_service::ReceiptWaiter;
