//! 中继服务配置
//!
//! 优先级: 命令行 / 环境变量 > JSON 配置文件 > 默认值。
//! API 密钥只从环境变量读取, 不会写入配置文件。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

pub const DEFAULT_UPSTREAM_URL: &str = "https://integrate.api.nvidia.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "minimaxai/minimax-m2";
pub const DEFAULT_API_KEY_ENV: &str = "NVIDIA_API_KEY";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid {field} url: {source}")]
    InvalidUrl {
        field: &'static str,
        #[source]
        source: url::ParseError,
    },
}

/// 中继服务配置
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// 监听端口
    pub port: u16,

    /// 监听地址
    pub bind_address: String,

    /// 上游 chat completions 地址
    pub upstream_url: String,

    /// 上游模型名称
    pub model: String,

    pub temperature: f64,

    pub top_p: f64,

    pub max_tokens: u32,

    /// 固定的 system 提示词, 调用方无法覆盖
    pub system_prompt: Option<String>,

    /// GET 请求返回在线状态 (关闭时返回 405)
    pub status_probe: bool,

    /// 缺少 API 密钥时在错误信息中写出环境变量名
    pub verbose_config_errors: bool,

    /// 保存 API 密钥的环境变量名
    pub api_key_env: String,

    /// 上游请求超时时间(秒), 不设置则不限制
    pub request_timeout: Option<u64>,

    /// 上游代理配置
    pub upstream_proxy: UpstreamProxyConfig,

    /// 启动时从环境变量解析, 不参与序列化
    #[serde(skip)]
    pub api_key: Option<String>,
}

/// 上游代理配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpstreamProxyConfig {
    /// 是否启用
    #[serde(default)]
    pub enabled: bool,
    /// 代理地址 (http://, https://, socks5://)
    #[serde(default)]
    pub url: String,
}

impl RelayConfig {
    pub fn new() -> Self {
        Self {
            port: 3000,
            bind_address: "0.0.0.0".to_string(),
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 1.0,
            top_p: 0.95,
            max_tokens: 8192,
            system_prompt: None,
            status_probe: true,
            verbose_config_errors: true,
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            request_timeout: None,
            upstream_proxy: UpstreamProxyConfig::default(),
            api_key: None,
        }
    }

    /// 从 JSON 文件加载, 缺失的字段使用默认值
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config: RelayConfig =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        tracing::debug!("Loaded relay config from {}", path.display());
        Ok(config)
    }

    /// 从 `api_key_env` 指向的环境变量读取密钥, 空字符串视为未设置
    pub fn resolve_api_key_from_env(&mut self) {
        self.api_key = std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.is_empty());
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        url::Url::parse(&self.upstream_url).map_err(|source| ConfigError::InvalidUrl {
            field: "upstream",
            source,
        })?;
        if self.upstream_proxy.enabled {
            url::Url::parse(&self.upstream_proxy.url).map_err(|source| {
                ConfigError::InvalidUrl {
                    field: "upstream proxy",
                    source,
                }
            })?;
        }
        Ok(())
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayConfig")
            .field("port", &self.port)
            .field("bind_address", &self.bind_address)
            .field("upstream_url", &self.upstream_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("top_p", &self.top_p)
            .field("max_tokens", &self.max_tokens)
            .field("system_prompt", &self.system_prompt)
            .field("status_probe", &self.status_probe)
            .field("verbose_config_errors", &self.verbose_config_errors)
            .field("api_key_env", &self.api_key_env)
            .field("request_timeout", &self.request_timeout)
            .field("upstream_proxy", &self.upstream_proxy)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
