// src/config.rs

pub mod file;

use self::file::load_or_create_external_config;
use crate::{cli::Cli, constants, error::AppResult};
use log::debug;
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, time::Duration};
use url::Url;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NetworkConfig {
    pub base_url: Option<String>,
    pub static_base_url: Option<String>,
    pub connect_timeout_secs: Option<u64>,
    pub timeout_secs: Option<u64>,
}

/// 配置文件 `~/.radioid-finder/config.json` 的内容，所有字段都可省略
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ExternalConfig {
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_size: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encode_values: Option<bool>,
}

impl ExternalConfig {
    pub(crate) fn default_app_config() -> Self {
        Self {
            network: NetworkConfig {
                base_url: Some(constants::DEFAULT_BASE_URL.into()),
                static_base_url: Some(constants::DEFAULT_STATIC_BASE_URL.into()),
                connect_timeout_secs: Some(constants::DEFAULT_CONNECT_TIMEOUT_SECS),
                timeout_secs: Some(constants::DEFAULT_TIMEOUT_SECS),
            },
            data_dir: Some(PathBuf::from(constants::DEFAULT_DATA_DIR)),
            chunk_size: Some(constants::DEFAULT_CHUNK_SIZE),
            encode_values: Some(false),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub base_url: String,
    pub static_base_url: String,
    pub user_agent: String,
    pub connect_timeout: Duration,
    pub timeout: Duration,
    pub data_dir: PathBuf,
    pub chunk_size: usize,
    pub encode_values: bool,
}

/// 保证基础地址以 `/` 结尾，方便直接拼接模式路径
fn normalize_base_url(url: &str) -> String {
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{}/", url)
    }
}

impl AppConfig {
    /// 命令行参数优先于配置文件，配置文件优先于内置默认值
    pub fn new(args: &Cli) -> AppResult<Self> {
        let external_config = load_or_create_external_config()?;
        let config = Self::merge(args, external_config);
        config.check_urls()?;
        debug!("合并后的配置: {:?}", config);
        Ok(config)
    }

    /// 基础地址必须是合法的绝对 URL
    fn check_urls(&self) -> AppResult<()> {
        Url::parse(&self.base_url)?;
        Url::parse(&self.static_base_url)?;
        Ok(())
    }

    pub(crate) fn merge(args: &Cli, external: ExternalConfig) -> Self {
        let base_url = args
            .base_url
            .clone()
            .or(external.network.base_url)
            .unwrap_or_else(|| constants::DEFAULT_BASE_URL.to_string());
        Self {
            base_url: normalize_base_url(&base_url),
            static_base_url: normalize_base_url(
                external
                    .network
                    .static_base_url
                    .as_deref()
                    .unwrap_or(constants::DEFAULT_STATIC_BASE_URL),
            ),
            user_agent: constants::USER_AGENT.into(),
            connect_timeout: Duration::from_secs(
                external
                    .network
                    .connect_timeout_secs
                    .unwrap_or(constants::DEFAULT_CONNECT_TIMEOUT_SECS),
            ),
            timeout: Duration::from_secs(
                external
                    .network
                    .timeout_secs
                    .unwrap_or(constants::DEFAULT_TIMEOUT_SECS),
            ),
            data_dir: args
                .data_dir
                .clone()
                .or(external.data_dir)
                .unwrap_or_else(|| PathBuf::from(constants::DEFAULT_DATA_DIR)),
            chunk_size: external
                .chunk_size
                .filter(|&size| size > 0)
                .unwrap_or(constants::DEFAULT_CHUNK_SIZE),
            encode_values: args.encode_values || external.encode_values.unwrap_or(false),
        }
    }
}

#[cfg(feature = "testing")]
impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: constants::DEFAULT_BASE_URL.to_string(),
            static_base_url: constants::DEFAULT_STATIC_BASE_URL.to_string(),
            user_agent: "test-agent/1.0".to_string(),
            connect_timeout: Duration::from_secs(5),
            timeout: Duration::from_secs(15),
            data_dir: PathBuf::from(constants::DEFAULT_DATA_DIR),
            chunk_size: constants::DEFAULT_CHUNK_SIZE,
            encode_values: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_overrides_file() {
        let args = Cli::parse_from([
            "radioid-finder",
            "-s",
            "-f",
            "id=3021",
            "--base-url",
            "http://127.0.0.1:8080/api",
            "--encode-values",
        ]);
        let mut external = ExternalConfig::default_app_config();
        external.chunk_size = Some(4096);
        let config = AppConfig::merge(&args, external);
        assert_eq!(config.base_url, "http://127.0.0.1:8080/api/");
        assert_eq!(config.chunk_size, 4096);
        assert!(config.encode_values);
        assert_eq!(config.data_dir, PathBuf::from("data_files"));
    }

    #[test]
    fn test_empty_file_falls_back_to_defaults() {
        let args = Cli::parse_from(["radioid-finder", "--list-assets"]);
        let external: ExternalConfig = serde_json::from_str("{}").unwrap();
        let config = AppConfig::merge(&args, external);
        assert_eq!(config.base_url, constants::DEFAULT_BASE_URL);
        assert_eq!(config.chunk_size, constants::DEFAULT_CHUNK_SIZE);
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert!(!config.encode_values);
    }

    #[test]
    fn test_relative_base_url_is_rejected() {
        let args = Cli::parse_from([
            "radioid-finder",
            "-s",
            "-f",
            "id=1",
            "--base-url",
            "radioid.net/api",
        ]);
        let config = AppConfig::merge(&args, ExternalConfig::default());
        assert!(matches!(
            config.check_urls(),
            Err(crate::error::AppError::Url(_))
        ));
        let args = Cli::parse_from(["radioid-finder", "--list-assets"]);
        assert!(AppConfig::merge(&args, ExternalConfig::default()).check_urls().is_ok());
    }
}
