//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

use crate::domain::submission::DEFAULT_ALLOWED_EXTENSIONS;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 远程分析服务配置
    #[serde(default)]
    pub service: ServiceConfig,

    /// 凭证存储配置
    #[serde(default)]
    pub credential: CredentialConfig,

    /// 提交校验配置
    #[serde(default)]
    pub submission: SubmissionConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 远程分析服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// 服务基础 URL
    #[serde(default = "default_service_url")]
    pub url: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_service_timeout")]
    pub timeout_secs: u64,
}

fn default_service_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_service_timeout() -> u64 {
    120
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            url: default_service_url(),
            timeout_secs: default_service_timeout(),
        }
    }
}

/// 凭证存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialConfig {
    /// Sled 数据库路径
    #[serde(default = "default_credential_db_path")]
    pub db_path: String,

    /// 凭证保存的固定 key
    #[serde(default = "default_credential_key")]
    pub key: String,

    /// 确认凭证时是否先向服务端注册
    #[serde(default = "default_register_remotely")]
    pub register_remotely: bool,
}

fn default_credential_db_path() -> String {
    "data/credentials.sled".to_string()
}

fn default_credential_key() -> String {
    "hf_api_key".to_string()
}

fn default_register_remotely() -> bool {
    true
}

impl Default for CredentialConfig {
    fn default() -> Self {
        Self {
            db_path: default_credential_db_path(),
            key: default_credential_key(),
            register_remotely: default_register_remotely(),
        }
    }
}

/// 提交校验配置
#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionConfig {
    /// 允许的简历扩展名，空列表表示不限制
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
}

fn default_allowed_extensions() -> Vec<String> {
    DEFAULT_ALLOWED_EXTENSIONS
        .iter()
        .map(|ext| ext.to_string())
        .collect()
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            allowed_extensions: default_allowed_extensions(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.service.url, "http://localhost:5000");
        assert_eq!(config.service.timeout_secs, 120);
        assert_eq!(config.credential.key, "hf_api_key");
        assert!(config.credential.register_remotely);
        assert_eq!(
            config.submission.allowed_extensions,
            vec!["pdf", "docx", "txt"]
        );
        assert_eq!(config.log.level, "info");
    }
}
