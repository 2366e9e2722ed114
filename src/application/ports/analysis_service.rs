//! Analysis Service Port - 远程评分服务抽象
//!
//! 定义对远程简历分析服务的调用接口，具体实现在 infrastructure/adapters 层。
//! 每次调用只尝试一次，不自动重试。

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::ranking::{AnalysisResult, BatchResult};
use crate::domain::submission::ResumeFile;

pub const SERVER_ERROR_MESSAGE: &str = "Server returned an error";
pub const BATCH_FAILED_MESSAGE: &str = "An error occurred while processing resumes";
pub const ANALYSIS_FAILED_MESSAGE: &str = "Analysis failed";
pub const CREDENTIAL_FAILED_MESSAGE: &str = "Failed to update API key";
pub const UPLOAD_FAILED_MESSAGE: &str = "Upload failed!";

/// 分析服务错误
///
/// 消息原样展示给用户
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("{0}")]
    AnalysisFailed(String),

    #[error("{0}")]
    CredentialRejected(String),

    #[error("{0}")]
    UploadFailed(String),
}

impl AnalysisError {
    pub fn message(&self) -> &str {
        match self {
            AnalysisError::AnalysisFailed(message)
            | AnalysisError::CredentialRejected(message)
            | AnalysisError::UploadFailed(message) => message,
        }
    }
}

/// 单份简历分析请求
#[derive(Debug, Clone)]
pub struct SingleAnalysisRequest {
    pub file: ResumeFile,
    pub job_description: Option<String>,
    pub credential: Option<String>,
}

/// 批量排名请求
#[derive(Debug, Clone)]
pub struct BatchAnalysisRequest {
    pub files: Vec<ResumeFile>,
    pub job_description: String,
    pub credential: Option<String>,
}

/// Analysis Service Port
#[async_trait]
pub trait AnalysisServicePort: Send + Sync {
    /// POST /analyze - 返回技能和修改建议
    async fn analyze_single(
        &self,
        request: SingleAnalysisRequest,
    ) -> Result<AnalysisResult, AnalysisError>;

    /// POST /batch-analyze - 返回服务端排序的候选人列表
    async fn analyze_batch(&self, request: BatchAnalysisRequest)
        -> Result<BatchResult, AnalysisError>;

    /// POST /set-api-key - 独立于分析请求向服务端注册凭证
    async fn set_credential(&self, value: &str) -> Result<(), AnalysisError>;

    /// POST /upload - 仅上传文件，返回服务端消息
    async fn upload(&self, file: ResumeFile) -> Result<String, AnalysisError>;
}
