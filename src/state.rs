use crate::config::RelayConfig;
use crate::error::RelayError;
use crate::proxy::UpstreamClient;
use std::sync::Arc;

/// Web 应用状态
///
/// 请求之间只共享只读配置与上游客户端
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RelayConfig>,
    pub upstream: Arc<UpstreamClient>,
}

impl AppState {
    pub fn new(config: RelayConfig) -> Result<Self, RelayError> {
        let upstream = UpstreamClient::new(&config)?;
        Ok(Self {
            config: Arc::new(config),
            upstream: Arc::new(upstream),
        })
    }
}
