use crate::notify::platform::Platform;

/// Slack Web API 选项
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlackOptions {
    pub token: String,
    pub channel: String,
}

/// Discord Bot 选项
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscordOptions {
    pub token: String,
    pub channel: String,
}

/// # Summary
/// Telegram Bot 选项。
///
/// # Invariants
/// - `chat_name` 非空时优先使用公开频道名，否则使用数字 `channel`。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TelegramOptions {
    pub token: String,
    // 数字 Chat ID，无法解析时为 0
    pub channel: i64,
    // 公开频道名 (如 "@mychannel")
    pub chat_name: String,
}

/// 钉钉自定义机器人选项
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DingTalkOptions {
    pub webhook_url: String,
    // 加签密钥，为空时不签名
    pub secret: String,
}

/// PagerDuty Events API v2 选项
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PagerdutyOptions {
    // Integration routing key
    pub token: String,
    pub source: String,
    pub severity: String,
}

/// Pushover 选项
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PushoverOptions {
    pub token: String,
    pub user: String,
    pub priority: i32,
}

/// 飞书自定义机器人选项
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LarkOptions {
    pub webhook_url: String,
}

/// SMTP 邮件选项
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SmtpOptions {
    pub to_email: String,
    pub user: String,
    pub password: String,
    pub host: String,
    pub sender: String,
    // 是否启用收件域名黑名单
    pub deny_list: bool,
}

/// AWS SES 邮件选项
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SesOptions {
    pub to_email: String,
    // IAM access key id
    pub key: String,
    // IAM secret access key
    pub secret: String,
    // AWS 区域，例如 "us-east-1"
    pub area: String,
    pub sender: String,
    pub deny_list: bool,
}

/// # Summary
/// 按平台区分的适配器选项，每个变体只携带该平台需要的字段。
///
/// # Invariants
/// - 在分发时由扁平配置切分得到，不做持久保存。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelOptions {
    Slack(SlackOptions),
    Discord(DiscordOptions),
    Telegram(TelegramOptions),
    DingTalk(DingTalkOptions),
    Pagerduty(PagerdutyOptions),
    Pushover(PushoverOptions),
    Lark(LarkOptions),
    Smtp(SmtpOptions),
    Ses(SesOptions),
}

impl ChannelOptions {
    /// 选项对应的具体平台 (别名平台不会出现在这里)
    pub fn platform(&self) -> Platform {
        match self {
            ChannelOptions::Slack(_) => Platform::Slack,
            ChannelOptions::Discord(_) => Platform::Discord,
            ChannelOptions::Telegram(_) => Platform::Telegram,
            ChannelOptions::DingTalk(_) => Platform::DingTalk,
            ChannelOptions::Pagerduty(_) => Platform::Pagerduty,
            ChannelOptions::Pushover(_) => Platform::Pushover,
            ChannelOptions::Lark(_) => Platform::Lark,
            ChannelOptions::Smtp(_) => Platform::Smtp,
            ChannelOptions::Ses(_) => Platform::AwsEmail,
        }
    }
}
