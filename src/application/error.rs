//! 应用层错误定义
//!
//! 工作流控制器对外暴露的统一错误类型

use thiserror::Error;

use crate::application::ports::{AnalysisError, CredentialError};
use crate::domain::submission::ValidationError;

/// 应用层错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplicationError {
    /// 提交校验失败，未触达网络
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// 网络不可达或服务返回非成功状态
    #[error("{0}")]
    Transport(String),

    /// 服务端拒绝凭证，与分析错误分开展示
    #[error("{0}")]
    CredentialRejected(String),

    /// 确认凭证时输入为空
    #[error("Please enter an API key")]
    MissingCredential,

    /// 本地凭证存储错误
    #[error("Credential store error: {0}")]
    CredentialStore(String),

    /// 当前状态不允许该操作
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl ApplicationError {
    /// 创建状态无效错误
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }

    /// 是否属于凭证相关错误
    pub fn is_credential_error(&self) -> bool {
        matches!(
            self,
            Self::CredentialRejected(_) | Self::MissingCredential | Self::CredentialStore(_)
        )
    }
}

impl From<AnalysisError> for ApplicationError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::CredentialRejected(message) => Self::CredentialRejected(message),
            AnalysisError::AnalysisFailed(message) | AnalysisError::UploadFailed(message) => {
                Self::Transport(message)
            }
        }
    }
}

impl From<CredentialError> for ApplicationError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::EmptyCredential => Self::MissingCredential,
            other => Self::CredentialStore(other.to_string()),
        }
    }
}
