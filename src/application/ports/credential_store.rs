//! Credential Store Port - 凭证持久化
//!
//! 单个不透明凭证字符串的本地持久化，具体实现在 infrastructure 层
//! (sled / memory)

use thiserror::Error;

/// Credential Store 错误
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Credential must not be empty")]
    EmptyCredential,

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Credential Store Port
///
/// 保存只发生在本地，与向服务端注册凭证是两个独立动作。
/// 凭证没有过期时间，只会被下一次保存覆盖或被显式清除。
pub trait CredentialStorePort: Send + Sync {
    /// 读取已保存的凭证，不存在时返回 None
    fn load(&self) -> Result<Option<String>, CredentialError>;

    /// 保存凭证，覆盖旧值（调用方保证非空）
    fn save(&self, value: &str) -> Result<(), CredentialError>;

    /// 删除已保存的凭证
    fn clear(&self) -> Result<(), CredentialError>;
}
