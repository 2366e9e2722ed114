//! Submission Context - Errors

use thiserror::Error;

/// 提交校验错误
///
/// 消息文本直接展示给用户
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select at least one resume file")]
    NoFilesSelected,

    #[error("Job description is required for accurate analysis")]
    MissingJobDescription,

    #[error("Please upload a resume file")]
    NoFileSelected,

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),
}
