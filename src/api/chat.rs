// Chat 中继处理器
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use crate::error::RelayError;
use crate::models::{ChatRequest, CompletionRequest, StatusProbe};
use crate::state::AppState;

/// 单一入口: OPTIONS 预检 / GET 探活 / POST 转发, 其它方法返回 405
pub async fn handle_chat(
    State(state): State<AppState>,
    method: Method,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    match method {
        Method::OPTIONS => StatusCode::OK.into_response(),
        Method::GET if state.config.status_probe => Json(StatusProbe::online()).into_response(),
        Method::POST => {
            let relayed = match read_body(body) {
                Ok(body) => relay_chat(&state, &body).await,
                Err(e) => Err(e),
            };
            match relayed {
                Ok(completion) => (StatusCode::OK, Json(completion)).into_response(),
                Err(e) => e.into_response(),
            }
        }
        _ => RelayError::MethodNotAllowed.into_response(),
    }
}

/// 请求体读取失败 (例如超过大小限制) 时保留原状态码, 以 JSON 返回
fn read_body(body: Result<Bytes, BytesRejection>) -> Result<Bytes, RelayError> {
    body.map_err(|rejection| RelayError::BodyRejected {
        status: rejection.status(),
        detail: rejection.body_text(),
    })
}

async fn relay_chat(state: &AppState, body: &[u8]) -> Result<Value, RelayError> {
    let message = parse_message(body)?;

    let config = &state.config;
    let api_key = config
        .api_key
        .as_deref()
        .ok_or_else(|| RelayError::MissingApiKey {
            env_var: config.api_key_env.clone(),
            verbose: config.verbose_config_errors,
        })?;

    let completion = CompletionRequest::from_config(config, message);
    state.upstream.chat_completions(api_key, &completion).await
}

fn parse_message(body: &[u8]) -> Result<String, RelayError> {
    if body.is_empty() {
        return Err(RelayError::MessageRequired);
    }

    let value: Value =
        serde_json::from_slice(body).map_err(|e| RelayError::InvalidBody(e.to_string()))?;
    // 只接受 JSON 对象, 数组等形式不算合法请求
    if !value.is_object() {
        return Err(RelayError::InvalidBody(
            "request body must be a JSON object".to_string(),
        ));
    }
    let request: ChatRequest =
        serde_json::from_value(value).map_err(|e| RelayError::InvalidBody(e.to_string()))?;

    match request.message {
        Some(message) if !message.is_empty() => Ok(message),
        _ => Err(RelayError::MessageRequired),
    }
}
