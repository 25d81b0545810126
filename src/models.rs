//! 请求 / 响应数据模型

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::RelayConfig;

/// 前端发来的请求体
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    System,
    User,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

/// 发往上游 chat completions 接口的请求体
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
    pub top_p: f64,
    pub max_tokens: u32,
    pub stream: bool,
}

impl CompletionRequest {
    /// 模型与采样参数只取自配置, 调用方只能提供用户消息
    pub fn from_config(config: &RelayConfig, message: String) -> Self {
        let mut messages = Vec::with_capacity(2);
        if let Some(prompt) = &config.system_prompt {
            messages.push(ChatMessage {
                role: MessageRole::System,
                content: prompt.clone(),
            });
        }
        messages.push(ChatMessage {
            role: MessageRole::User,
            content: message,
        });

        Self {
            model: config.model.clone(),
            messages,
            temperature: config.temperature,
            top_p: config.top_p,
            max_tokens: config.max_tokens,
            stream: false,
        }
    }
}

/// 错误响应体
#[derive(Debug, Serialize)]
pub struct ErrorPayload {
    pub error: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorPayload {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: Value::String(error.into()),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// GET 探活响应
#[derive(Debug, Serialize)]
pub struct StatusProbe {
    pub status: &'static str,
    pub message: &'static str,
}

impl StatusProbe {
    pub fn online() -> Self {
        Self {
            status: "Online",
            message: "API is running. Go back to the home page (index.html) and send messages \
                      from the chat box (POST) instead of opening this link directly.",
        }
    }
}
