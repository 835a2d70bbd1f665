pub mod ethereum_provider;
pub mod source;
#[cfg(test)]
pub mod mock;

pub use ethereum_provider::{EthereumProvider, ProviderTrait};
pub use source::ProviderSource;
