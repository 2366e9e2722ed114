//! Submission Context - 简历提交上下文
//!
//! 职责:
//! - 简历文件与提交的值对象
//! - 发送前的校验（文件数量、职位描述、文件类型）

mod errors;
mod validator;
mod value_objects;

pub use errors::ValidationError;
pub use validator::{SubmissionValidator, DEFAULT_ALLOWED_EXTENSIONS};
pub use value_objects::{AnalysisMode, ResumeFile, Submission};
