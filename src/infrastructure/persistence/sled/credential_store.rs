//! Sled-based Credential Store Implementation
//!
//! 单个 key 下保存凭证及保存时间，跨进程/会话保留

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use sled::Db;
use std::path::Path;

use crate::application::ports::{CredentialError, CredentialStorePort};

/// Sled 凭证存储配置
#[derive(Debug, Clone)]
pub struct SledCredentialConfig {
    /// 数据库路径
    pub db_path: String,
    /// 凭证所在的固定 key
    pub key: String,
}

impl Default for SledCredentialConfig {
    fn default() -> Self {
        Self {
            db_path: "data/credentials.sled".to_string(),
            key: "hf_api_key".to_string(),
        }
    }
}

/// 持久化条目
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredCredential {
    value: String,
    saved_at: i64,
}

/// Sled 凭证存储
pub struct SledCredentialStore {
    db: Db,
    key: String,
}

impl SledCredentialStore {
    /// 创建新的存储实例
    pub fn new(config: &SledCredentialConfig) -> Result<Self, CredentialError> {
        let db = sled::open(&config.db_path)
            .map_err(|e| CredentialError::DatabaseError(e.to_string()))?;

        tracing::debug!(db_path = %config.db_path, key = %config.key, "SledCredentialStore initialized");

        Ok(Self {
            db,
            key: config.key.clone(),
        })
    }

    /// 打开现有存储
    pub fn open<P: AsRef<Path>>(path: P, key: impl Into<String>) -> Result<Self, CredentialError> {
        let config = SledCredentialConfig {
            db_path: path.as_ref().to_string_lossy().to_string(),
            key: key.into(),
        };
        Self::new(&config)
    }

    /// 凭证最近一次保存的时间
    pub fn saved_at(&self) -> Result<Option<DateTime<Utc>>, CredentialError> {
        Ok(self
            .read()?
            .and_then(|entry| Utc.timestamp_opt(entry.saved_at, 0).single()))
    }

    fn read(&self) -> Result<Option<StoredCredential>, CredentialError> {
        match self.db.get(&self.key) {
            Ok(Some(data)) => {
                let entry: StoredCredential = bincode::deserialize(&data)
                    .map_err(|e| CredentialError::SerializationError(e.to_string()))?;
                Ok(Some(entry))
            }
            Ok(None) => Ok(None),
            Err(e) => Err(CredentialError::DatabaseError(e.to_string())),
        }
    }

    /// 刷新数据库
    fn flush(&self) -> Result<(), CredentialError> {
        self.db
            .flush()
            .map_err(|e| CredentialError::DatabaseError(e.to_string()))?;
        Ok(())
    }
}

impl CredentialStorePort for SledCredentialStore {
    fn load(&self) -> Result<Option<String>, CredentialError> {
        Ok(self.read()?.map(|entry| entry.value))
    }

    fn save(&self, value: &str) -> Result<(), CredentialError> {
        if value.is_empty() {
            return Err(CredentialError::EmptyCredential);
        }

        let entry = StoredCredential {
            value: value.to_string(),
            saved_at: Utc::now().timestamp(),
        };
        let entry_bytes = bincode::serialize(&entry)
            .map_err(|e| CredentialError::SerializationError(e.to_string()))?;

        self.db
            .insert(&self.key, entry_bytes)
            .map_err(|e| CredentialError::DatabaseError(e.to_string()))?;
        self.flush()?;

        tracing::debug!(key = %self.key, "Credential persisted");
        Ok(())
    }

    fn clear(&self) -> Result<(), CredentialError> {
        self.db
            .remove(&self.key)
            .map_err(|e| CredentialError::DatabaseError(e.to_string()))?;
        self.flush()?;

        tracing::debug!(key = %self.key, "Credential removed");
        Ok(())
    }
}
