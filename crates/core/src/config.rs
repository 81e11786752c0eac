use serde::{Deserialize, Serialize};

/// 全局应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub notify: NotifyConfig,
    pub log: LogConfig,
}

/// # Summary
/// 扁平的通知配置，包含所有平台可能用到的字段。
///
/// # Invariants
/// - 只读取所选平台需要的字段，其余字段忽略且不校验。
/// - 交给分发器后不再修改。
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NotifyConfig {
    // 平台名称，例如 "Slack"、"AwsEmail"
    pub platform: String,
    pub token: String,
    pub channel: String,
    pub source: String,
    pub severity: String,
    pub user: String,
    pub password: String,
    pub host: String,
    pub key: String,
    pub secret: String,
    pub area: String,
    pub sender: String,
    #[serde(alias = "to")]
    pub to_email: String,
    pub priority: i32,
    // 覆盖邮件适配器默认的黑名单策略
    pub deny_list: Option<bool>,
}

impl NotifyConfig {
    /// 创建只指定平台的配置，其余字段为空
    pub fn for_platform(platform: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    // 未设置 RUST_LOG 时使用的过滤级别
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
