//! cvrank - 简历分析与排名客户端
//!
//! 架构设计: DDD + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Submission Context: 简历提交与发送前校验
//! - Ranking Context: 分析结果、排名行视图、展开状态
//!
//! 应用层 (application/):
//! - Ports: AnalysisServicePort, CredentialStorePort
//! - Workflow: 请求生命周期状态机 + 凭证子状态
//!
//! 基础设施层 (infrastructure/):
//! - Adapters: HTTP 分析服务客户端, Fake 客户端
//! - Persistence: Sled 凭证存储
//! - Memory: 内存凭证存储
//! - Terminal: 结果渲染

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
