//! In-Memory Credential Store Implementation
//!
//! 进程内凭证存储，用于测试和不落盘的会话

use std::sync::RwLock;

use crate::application::ports::{CredentialError, CredentialStorePort};

/// 内存凭证存储
#[derive(Default)]
pub struct InMemoryCredentialStore {
    value: RwLock<Option<String>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 预置一个已保存的凭证
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: RwLock::new(Some(value.into())),
        }
    }
}

impl CredentialStorePort for InMemoryCredentialStore {
    fn load(&self) -> Result<Option<String>, CredentialError> {
        self.value
            .read()
            .map(|value| value.clone())
            .map_err(|e| CredentialError::DatabaseError(e.to_string()))
    }

    fn save(&self, value: &str) -> Result<(), CredentialError> {
        if value.is_empty() {
            return Err(CredentialError::EmptyCredential);
        }
        let mut slot = self
            .value
            .write()
            .map_err(|e| CredentialError::DatabaseError(e.to_string()))?;
        *slot = Some(value.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), CredentialError> {
        let mut slot = self
            .value
            .write()
            .map_err(|e| CredentialError::DatabaseError(e.to_string()))?;
        *slot = None;
        Ok(())
    }
}
