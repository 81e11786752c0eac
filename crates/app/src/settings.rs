use config::{Config, ConfigError, Environment, File};
use herald_core::config::AppConfig;
use std::path::Path;

/// 未通过 `--config` 指定时尝试加载的配置文件 (可缺省)
const DEFAULT_CONFIG_FILE: &str = "herald";
/// 环境变量前缀，例如 `HERALD__NOTIFY__TOKEN`
const ENV_PREFIX: &str = "HERALD";

/// # Summary
/// 加载应用配置。
///
/// # Logic
/// 1. 读取配置文件：显式路径必须存在，默认的 `herald.*` 可缺省。
/// 2. 叠加 `HERALD__` 前缀的环境变量，后者优先。
///
/// # Arguments
/// * `path` - 可选的配置文件路径。
///
/// # Returns
/// * 反序列化后的 `AppConfig`，缺失字段取默认值。
pub fn load(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let file = match path {
        Some(path) => File::from(path).required(true),
        None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    Config::builder()
        .add_source(file)
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?
        .try_deserialize()
}
