//! Sled Persistence - 本地嵌入式存储

mod credential_store;

pub use credential_store::{SledCredentialConfig, SledCredentialStore};
