//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（cvrank.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["cvrank", "cvrank.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `CVRANK_`，层级分隔符 `__`）
/// 2. 配置文件（cvrank.toml 或 cvrank.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `CVRANK_SERVICE__URL=http://scoring:5000`
/// - `CVRANK_SERVICE__TIMEOUT_SECS=60`
/// - `CVRANK_CREDENTIAL__DB_PATH=/var/lib/cvrank/credentials.sled`
/// - `CVRANK_SUBMISSION__ALLOWED_EXTENSIONS=pdf,docx`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，指定时文件必须存在
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("service.url", "http://localhost:5000")?
        .set_default("service.timeout_secs", 120)?
        .set_default("credential.db_path", "data/credentials.sled")?
        .set_default("credential.key", "hf_api_key")?
        .set_default("credential.register_remotely", true)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    builder = builder.add_source(
        Environment::with_prefix("CVRANK")
            .prefix_separator("_")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("submission.allowed_extensions")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.service.url.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "Service URL cannot be empty".to_string(),
        ));
    }

    if config.service.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Service timeout cannot be 0".to_string(),
        ));
    }

    if config.credential.db_path.is_empty() {
        return Err(ConfigError::ValidationError(
            "Credential database path cannot be empty".to_string(),
        ));
    }

    if config.credential.key.is_empty() {
        return Err(ConfigError::ValidationError(
            "Credential key cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::debug!("=== Application Configuration ===");
    tracing::debug!("Service URL: {}", config.service.url);
    tracing::debug!("Service Timeout: {}s", config.service.timeout_secs);
    tracing::debug!("Credential Store: {}", config.credential.db_path);
    tracing::debug!("Register Credential Remotely: {}", config.credential.register_remotely);
    tracing::debug!(
        "Allowed Extensions: {}",
        config.submission.allowed_extensions.join(", ")
    );
    tracing::debug!("Log Level: {}", config.log.level);
    tracing::debug!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_passes_for_valid_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_empty_service_url() {
        let mut config = AppConfig::default();
        config.service.url = "  ".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_zero_timeout() {
        let mut config = AppConfig::default();
        config.service.timeout_secs = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_credential_key() {
        let mut config = AppConfig::default();
        config.credential.key = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cvrank.toml");
        std::fs::write(
            &path,
            r#"
[service]
url = "http://scoring.internal:5000"

[credential]
register_remotely = false

[submission]
allowed_extensions = ["pdf"]
"#,
        )
        .unwrap();

        let config = load_config_from_path(Some(&path)).unwrap();
        assert_eq!(config.service.url, "http://scoring.internal:5000");
        assert_eq!(config.service.timeout_secs, 120);
        assert!(!config.credential.register_remotely);
        assert_eq!(config.credential.key, "hf_api_key");
        assert_eq!(config.submission.allowed_extensions, vec!["pdf"]);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(load_config_from_path(Some(&path)).is_err());
    }
}
