use herald_core::notify::error::NotifyError;
use herald_core::notify::options::ChannelOptions;
use herald_core::notify::platform::Platform;
use herald_core::notify::port::{Notifier, NotifierBuilder};
use herald_notify::dingtalk::DingTalkNotifier;
use herald_notify::discord::DiscordNotifier;
use herald_notify::email::EmailNotifier;
use herald_notify::lark::LarkNotifier;
use herald_notify::pagerduty::PagerdutyNotifier;
use herald_notify::pushover::PushoverNotifier;
use herald_notify::ses::SesNotifier;
use herald_notify::slack::SlackNotifier;
use herald_notify::telegram::TelegramNotifier;
use std::collections::HashMap;
use std::sync::Arc;

/// # Summary
/// 平台别名表，把一个平台值转发到另一个平台的适配器。
///
/// # Invariants
/// - 只解析一层，不做链式转发。
/// - 默认表包含历史规则 `Email → AwsEmail`。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasTable {
    entries: HashMap<Platform, Platform>,
}

impl AliasTable {
    /// 空别名表
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// 新增或覆盖一条别名
    pub fn alias(mut self, from: Platform, to: Platform) -> Self {
        self.entries.insert(from, to);
        self
    }

    /// 返回别名指向的平台，无别名时返回自身
    pub fn resolve(&self, platform: Platform) -> Platform {
        self.entries.get(&platform).copied().unwrap_or(platform)
    }
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::new().alias(Platform::Email, Platform::AwsEmail)
    }
}

/// # Summary
/// 平台到适配器构建器的注册表。
///
/// # Invariants
/// - 构造完成后只读，可在多个任务间共享。
/// - 默认注册表覆盖除别名 `Email` 之外的全部平台。
#[derive(Clone)]
pub struct Registry {
    builders: HashMap<Platform, Arc<dyn NotifierBuilder>>,
}

impl Registry {
    /// 空注册表，任何平台都不受支持
    pub fn empty() -> Self {
        Self {
            builders: HashMap::new(),
        }
    }

    /// # Summary
    /// 注册或替换一个平台的构建器。
    ///
    /// # Arguments
    /// * `platform` - 具体平台。
    /// * `builder` - 构建器；闭包 `Fn(ChannelOptions) -> Result<Box<dyn Notifier>, NotifyError>` 亦可。
    pub fn register(mut self, platform: Platform, builder: impl NotifierBuilder + 'static) -> Self {
        self.builders.insert(platform, Arc::new(builder));
        self
    }

    pub fn get(&self, platform: Platform) -> Option<Arc<dyn NotifierBuilder>> {
        self.builders.get(&platform).cloned()
    }

    pub fn contains(&self, platform: Platform) -> bool {
        self.builders.contains_key(&platform)
    }
}

impl Default for Registry {
    fn default() -> Self {
        [
            Platform::Slack,
            Platform::Discord,
            Platform::Telegram,
            Platform::DingTalk,
            Platform::Pagerduty,
            Platform::Pushover,
            Platform::Lark,
            Platform::Smtp,
            Platform::AwsEmail,
        ]
        .into_iter()
        .fold(Self::empty(), |registry, platform| {
            registry.register(platform, build_builtin)
        })
    }
}

/// # Summary
/// 内置适配器构建函数，按选项变体选择具体实现。
pub fn build_builtin(options: ChannelOptions) -> Result<Box<dyn Notifier>, NotifyError> {
    let notifier: Box<dyn Notifier> = match options {
        ChannelOptions::Slack(options) => Box::new(SlackNotifier::new(options)?),
        ChannelOptions::Discord(options) => Box::new(DiscordNotifier::new(options)?),
        ChannelOptions::Telegram(options) => Box::new(TelegramNotifier::new(options)?),
        ChannelOptions::DingTalk(options) => Box::new(DingTalkNotifier::new(options)?),
        ChannelOptions::Pagerduty(options) => Box::new(PagerdutyNotifier::new(options)?),
        ChannelOptions::Pushover(options) => Box::new(PushoverNotifier::new(options)?),
        ChannelOptions::Lark(options) => Box::new(LarkNotifier::new(options)?),
        ChannelOptions::Smtp(options) => Box::new(EmailNotifier::new(options)),
        ChannelOptions::Ses(options) => Box::new(SesNotifier::new(options)),
    };
    Ok(notifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_aliases() {
        let aliases = AliasTable::default();
        assert_eq!(aliases.resolve(Platform::Email), Platform::AwsEmail);
        assert_eq!(aliases.resolve(Platform::AwsEmail), Platform::AwsEmail);
        assert_eq!(aliases.resolve(Platform::Slack), Platform::Slack);
    }

    #[test]
    fn test_alias_override() {
        let aliases = AliasTable::default().alias(Platform::Email, Platform::Smtp);
        assert_eq!(aliases.resolve(Platform::Email), Platform::Smtp);
        assert_eq!(AliasTable::new().resolve(Platform::Email), Platform::Email);
    }

    #[test]
    fn test_default_registry_coverage() {
        let registry = Registry::default();
        for platform in Platform::ALL {
            assert_eq!(
                registry.contains(platform),
                platform != Platform::Email,
                "{}",
                platform
            );
        }
        assert!(!Registry::empty().contains(Platform::Slack));
    }
}
