//! Infrastructure Layer - 基础设施层
//!
//! 提供所有端口的具体实现以及终端渲染

pub mod adapters;
pub mod memory;
pub mod persistence;
pub mod terminal;

pub use adapters::{HttpAnalysisClient, HttpAnalysisClientConfig};
pub use memory::InMemoryCredentialStore;
pub use persistence::sled::SledCredentialStore;
