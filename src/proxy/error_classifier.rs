// 错误分类模块 - 将 reqwest 传输层错误转换为可读的诊断信息
use reqwest::Error;

/// 分类上游传输错误
///
/// 返回值: (错误类型, 英文诊断信息)
/// - 错误类型: 用于日志字段
/// - 诊断信息: 写入错误响应的 `details` 字段
pub fn classify_upstream_error(error: &Error) -> (&'static str, &'static str) {
    if error.is_timeout() {
        (
            "timeout_error",
            "Upstream request timed out, please check your network connection",
        )
    } else if error.is_connect() {
        (
            "connection_error",
            "Could not connect to the upstream API, please check your network or proxy settings",
        )
    } else if error.is_decode() {
        (
            "decode_error",
            "Upstream response could not be decoded",
        )
    } else if error.is_body() {
        (
            "body_error",
            "Upstream response body was interrupted, please retry later",
        )
    } else if error.is_builder() {
        (
            "request_error",
            "Upstream request could not be built, please check the relay configuration",
        )
    } else {
        ("unknown_error", "Unknown upstream error occurred")
    }
}
