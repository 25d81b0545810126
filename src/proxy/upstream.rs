// 上游客户端 - 调用 chat completions 接口
use reqwest::{header, Client};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::{RelayConfig, UpstreamProxyConfig};
use crate::error::RelayError;
use crate::models::CompletionRequest;

pub struct UpstreamClient {
    http_client: Client,
    endpoint: String,
}

impl UpstreamClient {
    pub fn new(config: &RelayConfig) -> Result<Self, RelayError> {
        let mut builder = Client::builder();

        if let Some(secs) = config.request_timeout {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        if let Some(proxy) = Self::build_proxy(&config.upstream_proxy)? {
            info!("Upstream requests go through proxy {}", config.upstream_proxy.url);
            builder = builder.proxy(proxy);
        }

        Ok(Self {
            http_client: builder.build()?,
            endpoint: config.upstream_url.clone(),
        })
    }

    fn build_proxy(config: &UpstreamProxyConfig) -> Result<Option<reqwest::Proxy>, RelayError> {
        if !config.enabled || config.url.is_empty() {
            return Ok(None);
        }
        Ok(Some(reqwest::Proxy::all(&config.url)?))
    }

    /// 发送一次请求, 不做重试
    ///
    /// 成功时原样返回上游 JSON; 非 2xx 状态携带上游状态码与响应文本返回错误
    pub async fn chat_completions(
        &self,
        api_key: &str,
        body: &CompletionRequest,
    ) -> Result<Value, RelayError> {
        debug!(
            "Forwarding chat request to {} (model: {}, messages: {})",
            self.endpoint,
            body.model,
            body.messages.len()
        );

        let response = self
            .http_client
            .post(&self.endpoint)
            .header(header::AUTHORIZATION, format!("Bearer {}", api_key))
            .header(header::CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RelayError::Upstream {
                status,
                body: read_error_body(response).await,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice::<Value>(&bytes).map_err(|e| RelayError::Decode(e.to_string()))
    }
}

/// 读取上游错误响应体; 读取失败时把失败原因作为诊断信息返回
async fn read_error_body(response: reqwest::Response) -> String {
    let status = response.status();
    match response.text().await {
        Ok(text) => text,
        Err(e) => {
            warn!("Failed to read upstream error body ({}): {}", status, e);
            format!("failed to read upstream error body: {}", e)
        }
    }
}
