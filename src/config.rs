//! 进程配置，全部来自环境变量

use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_DB_PATH: &str = "db.json";
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("无效的端口号: {0}")]
    InvalidPort(String),
}

/// 服务配置
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// HTTP 服务端口 (`PORT`)
    pub port: u16,
    /// 绑定地址 (`HOST`)
    pub host: String,
    /// 存储文件路径 (`DB_PATH`)
    pub db_path: PathBuf,
    /// `RUST_LOG` 未设置时的日志级别 (`LOG_LEVEL`)
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            host: DEFAULT_HOST.to_string(),
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 通过任意查找函数读取配置，空值视为未设置
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(port) = get("PORT") {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(port.clone()))?;
        }
        if let Some(host) = get("HOST") {
            config.host = host;
        }
        if let Some(path) = get("DB_PATH") {
            config.db_path = PathBuf::from(path);
        }
        if let Some(level) = get("LOG_LEVEL") {
            config.log_level = level;
        }

        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.port, 3000);
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("PORT", "8080"),
            ("HOST", "127.0.0.1"),
            ("DB_PATH", "/tmp/produtos.json"),
            ("LOG_LEVEL", "debug"),
        ]))
        .unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.db_path, PathBuf::from("/tmp/produtos.json"));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_empty_port_uses_default() {
        let config = AppConfig::from_lookup(lookup(&[("PORT", "")])).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn test_invalid_port() {
        assert_eq!(
            AppConfig::from_lookup(lookup(&[("PORT", "abc")])),
            Err(ConfigError::InvalidPort("abc".to_string()))
        );
    }
}
