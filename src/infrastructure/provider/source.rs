use super::ethereum_provider::{EthereumProvider, ProviderTrait};
use crate::errors::error::AppError;
use std::fmt;
use std::sync::Arc;

/// 传给 `ChainClient::initialize` 的 provider：RPC 地址或已构造好的客户端
#[derive(Clone)]
pub enum ProviderSource {
    /// HTTP RPC 地址，首次使用时才构造客户端
    Url(String),
    Handle(Arc<dyn ProviderTrait>),
}

impl ProviderSource {
    /// 取得可用的客户端；URL 在这里才被解析
    pub fn resolve(&self) -> Result<Arc<dyn ProviderTrait>, AppError> {
        match self {
            ProviderSource::Url(rpc_url) => {
                Ok(Arc::new(EthereumProvider::connect(rpc_url)?) as Arc<dyn ProviderTrait>)
            }
            ProviderSource::Handle(provider) => Ok(provider.clone()),
        }
    }

    pub fn is_url(&self) -> bool {
        matches!(self, ProviderSource::Url(_))
    }
}

impl fmt::Debug for ProviderSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderSource::Url(url) => f.debug_tuple("Url").field(url).finish(),
            ProviderSource::Handle(_) => f.write_str("Handle(..)"),
        }
    }
}

impl From<&str> for ProviderSource {
    fn from(url: &str) -> Self {
        ProviderSource::Url(url.to_string())
    }
}

impl From<String> for ProviderSource {
    fn from(url: String) -> Self {
        ProviderSource::Url(url)
    }
}

impl From<Arc<dyn ProviderTrait>> for ProviderSource {
    fn from(provider: Arc<dyn ProviderTrait>) -> Self {
        ProviderSource::Handle(provider)
    }
}
