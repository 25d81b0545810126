// proxy 模块 - 上游转发

pub mod error_classifier;
pub mod upstream;

pub use upstream::UpstreamClient;
