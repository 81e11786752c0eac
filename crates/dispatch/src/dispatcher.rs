use crate::normalize::channel_options;
use crate::registry::{AliasTable, Registry};
use herald_core::config::NotifyConfig;
use herald_core::notify::error::NotifyError;
use herald_core::notify::message::Message;
use herald_core::notify::platform::Platform;
use tracing::{debug, info, warn};

/// # Summary
/// 通知分发器，系统对调用方暴露的门面 (Facade)。
/// 根据配置中的平台选择适配器，切分配置并归一化消息后委托发送。
///
/// # Invariants
/// - 除不可变的配置、注册表与别名表外不持有任何状态，可跨任务共享。
/// - 每次 `send` 都构建新的适配器，最多发起一次外部请求。
/// - 适配器返回的错误原样向上传递，不包装、不重试、不切换平台。
pub struct Dispatcher {
    // 调用方提供的扁平配置
    config: NotifyConfig,
    // 平台到构建器的注册表
    registry: Registry,
    // 平台别名表
    aliases: AliasTable,
}

impl Dispatcher {
    /// # Summary
    /// 使用内置适配器和默认别名表创建分发器。
    pub fn new(config: NotifyConfig) -> Self {
        Self::with_registry(config, Registry::default(), AliasTable::default())
    }

    /// # Summary
    /// 使用注入的注册表与别名表创建分发器。
    ///
    /// # Arguments
    /// * `config` - 扁平通知配置。
    /// * `registry` - 平台构建器注册表，测试中可注入记录型构建器。
    /// * `aliases` - 平台别名表。
    pub fn with_registry(config: NotifyConfig, registry: Registry, aliases: AliasTable) -> Self {
        Self {
            config,
            registry,
            aliases,
        }
    }

    pub fn config(&self) -> &NotifyConfig {
        &self.config
    }

    /// # Summary
    /// 解析配置中的平台并应用别名表。
    ///
    /// # Returns
    /// * 已注册的具体平台，否则返回 `NotifyError::Unsupported`。
    pub fn route(&self) -> Result<Platform, NotifyError> {
        let requested: Platform = self.config.platform.parse()?;
        let resolved = self.aliases.resolve(requested);
        if !self.registry.contains(resolved) {
            return Err(NotifyError::Unsupported(self.config.platform.clone()));
        }
        if resolved != requested {
            debug!(requested = %requested, resolved = %resolved, "Platform alias applied");
        }
        Ok(resolved)
    }

    /// # Summary
    /// 发送一条通知。
    ///
    /// # Logic
    /// 1. 解析平台并应用别名，不支持的平台立即返回错误，不产生副作用。
    /// 2. 从扁平配置切分出该平台的选项并归一化。
    /// 3. 消息在此解析一次 (结构化或纯文本)。
    /// 4. 构建适配器并调用其 `send`，结果原样返回。
    ///
    /// # Arguments
    /// * `message` - 原始消息文本，可能是 `{"subject","content"}` JSON。
    ///
    /// # Returns
    /// * 成功返回 `Ok(())`，否则返回适配器或本地校验产生的 `NotifyError`。
    pub async fn send(&self, message: &str) -> Result<(), NotifyError> {
        let platform = self.route()?;
        let builder = self
            .registry
            .get(platform)
            .ok_or_else(|| NotifyError::Unsupported(self.config.platform.clone()))?;

        let options = channel_options(platform, &self.config)?;
        let message = Message::parse(message);
        debug!(
            platform = %platform,
            structured = message.is_structured(),
            "Dispatching notification"
        );

        let notifier = builder.build(options)?;
        match notifier.send(&message).await {
            Ok(()) => {
                info!(platform = %platform, "Notification sent");
                Ok(())
            }
            Err(e) => {
                warn!(platform = %platform, error = %e, "Notification failed");
                Err(e)
            }
        }
    }
}
