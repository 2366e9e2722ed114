//! Application Layer - 应用层
//!
//! - Ports: 端口定义（AnalysisService, CredentialStore）
//! - Workflow: 提交 → 校验 → 请求 → 展示 的状态机与控制器

pub mod error;
pub mod ports;
pub mod workflow;

pub use error::ApplicationError;
pub use workflow::{UserAction, WorkflowController, WorkflowState};
