//! # 平台选项切分与归一化
//!
//! 从扁平的 `NotifyConfig` 中挑出目标平台需要的字段，并应用各平台的归一化规则。

use herald_core::config::NotifyConfig;
use herald_core::notify::error::NotifyError;
use herald_core::notify::options::{
    ChannelOptions, DingTalkOptions, DiscordOptions, LarkOptions, PagerdutyOptions,
    PushoverOptions, SesOptions, SlackOptions, SmtpOptions, TelegramOptions,
};
use herald_core::notify::platform::Platform;

/// SES 默认启用收件域名黑名单
pub const SES_DENY_LIST_DEFAULT: bool = true;
/// SMTP 默认不启用
pub const SMTP_DENY_LIST_DEFAULT: bool = false;

/// # Summary
/// Telegram 聊天目标，数字 ID 与公开频道名二选一。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTarget {
    pub id: i64,
    pub name: String,
}

/// # Summary
/// 区分公开频道名与数字 Chat ID。
///
/// # Logic
/// 1. 含有 `@` 时视为频道名，ID 置 0。
/// 2. 否则按十进制整数解析，解析失败时静默为 0，频道名为空。
pub fn chat_target(channel: &str) -> ChatTarget {
    if channel.contains('@') {
        ChatTarget {
            id: 0,
            name: channel.to_string(),
        }
    } else {
        ChatTarget {
            id: channel.parse().unwrap_or(0),
            name: String::new(),
        }
    }
}

/// 收件人优先取 `to_email`，为空时回退到 `token`
pub fn recipient(config: &NotifyConfig) -> String {
    if config.to_email.is_empty() {
        config.token.clone()
    } else {
        config.to_email.clone()
    }
}

/// # Summary
/// 把扁平配置切分为具体平台的选项。
///
/// # Arguments
/// * `platform` - 别名解析后的具体平台。
/// * `config` - 调用方提供的扁平配置，只读取该平台相关的字段。
///
/// # Returns
/// * 平台选项；对未解析的别名平台返回 `NotifyError::Unsupported`。
pub fn channel_options(
    platform: Platform,
    config: &NotifyConfig,
) -> Result<ChannelOptions, NotifyError> {
    let options = match platform {
        Platform::Slack => ChannelOptions::Slack(SlackOptions {
            token: config.token.clone(),
            channel: config.channel.clone(),
        }),
        Platform::Discord => ChannelOptions::Discord(DiscordOptions {
            token: config.token.clone(),
            channel: config.channel.clone(),
        }),
        Platform::Telegram => {
            let target = chat_target(&config.channel);
            ChannelOptions::Telegram(TelegramOptions {
                token: config.token.clone(),
                channel: target.id,
                chat_name: target.name,
            })
        }
        Platform::DingTalk => ChannelOptions::DingTalk(DingTalkOptions {
            webhook_url: config.channel.clone(),
            secret: config.token.clone(),
        }),
        Platform::Pagerduty => ChannelOptions::Pagerduty(PagerdutyOptions {
            token: config.token.clone(),
            source: config.source.clone(),
            severity: config.severity.clone(),
        }),
        Platform::Pushover => ChannelOptions::Pushover(PushoverOptions {
            token: config.token.clone(),
            user: config.channel.clone(),
            priority: config.priority,
        }),
        Platform::Lark => ChannelOptions::Lark(LarkOptions {
            webhook_url: config.token.clone(),
        }),
        Platform::Smtp => ChannelOptions::Smtp(SmtpOptions {
            to_email: recipient(config),
            user: config.user.clone(),
            password: config.password.clone(),
            host: config.host.clone(),
            sender: config.sender.clone(),
            deny_list: config.deny_list.unwrap_or(SMTP_DENY_LIST_DEFAULT),
        }),
        Platform::AwsEmail => ChannelOptions::Ses(SesOptions {
            to_email: recipient(config),
            key: config.key.clone(),
            secret: config.secret.clone(),
            area: config.area.clone(),
            sender: config.sender.clone(),
            deny_list: config.deny_list.unwrap_or(SES_DENY_LIST_DEFAULT),
        }),
        // 别名平台必须先经过别名表解析
        Platform::Email => return Err(NotifyError::Unsupported(platform.to_string())),
    };
    Ok(options)
}
