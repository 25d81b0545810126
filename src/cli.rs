//! Command-line arguments.

use clap::Parser;
use std::path::PathBuf;

use crate::config::{ConfigError, RelayConfig, UpstreamProxyConfig};

/// Relay chat messages from a browser front-end to an LLM completions API
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// JSON config file; flags and environment variables take precedence over it
    #[arg(short, long, env = "CHAT_RELAY_CONFIG")]
    pub config: Option<PathBuf>,

    #[arg(short, long, env = "CHAT_RELAY_PORT")]
    pub port: Option<u16>,

    #[arg(long, env = "CHAT_RELAY_BIND_ADDRESS")]
    pub bind_address: Option<String>,

    /// Upstream chat completions endpoint
    #[arg(long, env = "CHAT_RELAY_UPSTREAM_URL")]
    pub upstream_url: Option<String>,

    #[arg(long, env = "CHAT_RELAY_MODEL")]
    pub model: Option<String>,

    #[arg(long)]
    pub temperature: Option<f64>,

    #[arg(long)]
    pub top_p: Option<f64>,

    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Fixed system prompt sent ahead of every user message
    #[arg(long, env = "CHAT_RELAY_SYSTEM_PROMPT")]
    pub system_prompt: Option<String>,

    /// Answer GET with 405 instead of the online status payload
    #[arg(long)]
    pub disable_status_probe: bool,

    /// Report a generic message when the API key is missing
    #[arg(long)]
    pub quiet_config_errors: bool,

    /// Name of the environment variable holding the upstream API key
    #[arg(long)]
    pub api_key_env: Option<String>,

    /// Upstream request timeout in seconds
    #[arg(long, env = "CHAT_RELAY_REQUEST_TIMEOUT")]
    pub request_timeout: Option<u64>,

    /// Proxy for upstream requests (http://, https://, socks5://)
    #[arg(long, env = "CHAT_RELAY_UPSTREAM_PROXY")]
    pub upstream_proxy: Option<String>,

    /// Also write logs to a daily rolling file in this directory
    #[arg(long, env = "CHAT_RELAY_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

impl Args {
    /// Layer flags over the config file, then resolve the API key from the environment.
    pub fn into_config(self) -> Result<RelayConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => RelayConfig::load(path)?,
            None => RelayConfig::default(),
        };

        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(bind_address) = self.bind_address {
            config.bind_address = bind_address;
        }
        if let Some(upstream_url) = self.upstream_url {
            config.upstream_url = upstream_url;
        }
        if let Some(model) = self.model {
            config.model = model;
        }
        if let Some(temperature) = self.temperature {
            config.temperature = temperature;
        }
        if let Some(top_p) = self.top_p {
            config.top_p = top_p;
        }
        if let Some(max_tokens) = self.max_tokens {
            config.max_tokens = max_tokens;
        }
        if self.system_prompt.is_some() {
            config.system_prompt = self.system_prompt;
        }
        if self.disable_status_probe {
            config.status_probe = false;
        }
        if self.quiet_config_errors {
            config.verbose_config_errors = false;
        }
        if let Some(api_key_env) = self.api_key_env {
            config.api_key_env = api_key_env;
        }
        if self.request_timeout.is_some() {
            config.request_timeout = self.request_timeout;
        }
        if let Some(url) = self.upstream_proxy {
            config.upstream_proxy = UpstreamProxyConfig { enabled: true, url };
        }

        config.validate()?;
        config.resolve_api_key_from_env();
        Ok(config)
    }
}
