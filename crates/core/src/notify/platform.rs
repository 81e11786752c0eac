use crate::notify::error::NotifyError;
use std::str::FromStr;

/// # Summary
/// 推送平台枚举，决定构建哪个适配器以及读取哪些配置字段。
///
/// # Invariants
/// - `Email` 是历史遗留的别名平台，默认解析到 `AwsEmail`，注册表中不直接注册。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Slack,
    Discord,
    Telegram,
    DingTalk,
    Pagerduty,
    Pushover,
    // 通用邮件，经别名表转发
    Email,
    // AWS SES
    AwsEmail,
    // 普通 SMTP 邮件
    Smtp,
    // 飞书
    Lark,
}

impl Platform {
    /// 所有已知平台，包括别名
    pub const ALL: [Platform; 10] = [
        Platform::Slack,
        Platform::Discord,
        Platform::Telegram,
        Platform::DingTalk,
        Platform::Pagerduty,
        Platform::Pushover,
        Platform::Email,
        Platform::AwsEmail,
        Platform::Smtp,
        Platform::Lark,
    ];

    /// 配置中使用的规范名称
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Slack => "Slack",
            Platform::Discord => "Discord",
            Platform::Telegram => "Telegram",
            Platform::DingTalk => "DingTalk",
            Platform::Pagerduty => "Pagerduty",
            Platform::Pushover => "Pushover",
            Platform::Email => "Email",
            Platform::AwsEmail => "AwsEmail",
            Platform::Smtp => "Smtp",
            Platform::Lark => "Lark",
        }
    }
}

impl FromStr for Platform {
    type Err = NotifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "slack" => Ok(Platform::Slack),
            "discord" => Ok(Platform::Discord),
            "telegram" => Ok(Platform::Telegram),
            "dingtalk" => Ok(Platform::DingTalk),
            "pagerduty" => Ok(Platform::Pagerduty),
            "pushover" => Ok(Platform::Pushover),
            "email" => Ok(Platform::Email),
            "awsemail" | "aws-email" | "ses" => Ok(Platform::AwsEmail),
            "smtp" => Ok(Platform::Smtp),
            "lark" => Ok(Platform::Lark),
            _ => Err(NotifyError::Unsupported(s.to_string())),
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_names() {
        for platform in Platform::ALL {
            assert_eq!(platform.as_str().parse::<Platform>(), Ok(platform));
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("pushover".parse::<Platform>(), Ok(Platform::Pushover));
        assert_eq!("DINGTALK".parse::<Platform>(), Ok(Platform::DingTalk));
        assert_eq!("ses".parse::<Platform>(), Ok(Platform::AwsEmail));
    }

    #[test]
    fn test_parse_unknown() {
        for name in ["Argus", "", "sms", "Slack2"] {
            assert!(matches!(
                name.parse::<Platform>(),
                Err(NotifyError::Unsupported(_))
            ));
        }
    }
}
