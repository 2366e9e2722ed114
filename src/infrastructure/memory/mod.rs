//! Memory Layer - In-Memory State Management
//!
//! 进程内的凭证存储实现

mod credential_store;

pub use credential_store::InMemoryCredentialStore;
