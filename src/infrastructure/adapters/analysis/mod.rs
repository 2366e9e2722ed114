//! Analysis Adapter - 远程评分服务客户端实现

mod fake_analysis_client;
mod http_analysis_client;

pub use fake_analysis_client::{FakeAnalysisClient, FakeAnalysisClientConfig, RecordedCall};
pub use http_analysis_client::*;
