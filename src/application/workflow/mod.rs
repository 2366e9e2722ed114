//! Workflow - 提交到排名的工作流
//!
//! - state: 请求生命周期状态机（纯函数迁移）
//! - credential: 凭证表单子状态
//! - controller: 有状态协调者，按顺序调用校验、分析服务和展示派生

mod controller;
mod credential;
mod state;

pub use controller::{UserAction, WorkflowConfig, WorkflowController};
pub use credential::CredentialState;
pub use state::{transition, AnalysisOutcome, WorkflowEvent, WorkflowState};
