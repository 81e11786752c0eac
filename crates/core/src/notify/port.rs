use crate::notify::error::NotifyError;
use crate::notify::message::Message;
use crate::notify::options::ChannelOptions;
use async_trait::async_trait;

/// # Summary
/// 发送通知到外部系统的接口定义。
///
/// # Invariants
/// - 实现必须是 `Send` 和 `Sync` 以支持并发调用。
/// - 每次调用最多发起一次外部请求，不做重试。
#[async_trait]
pub trait Notifier: Send + Sync {
    /// # Summary
    /// 发送一条通知。
    ///
    /// # Logic
    /// 1. 校验必填字段，缺失时立即返回 `NotifyError::Missing`。
    /// 2. 根据目标平台要求格式化消息。
    /// 3. 通过底层传输协议发送消息并解析响应。
    ///
    /// # Arguments
    /// * `message` - 分发边界解析过一次的消息。
    ///
    /// # Returns
    /// * 成功返回 `Ok(())`。
    /// * 失败返回 `Err(NotifyError)`。
    async fn send(&self, message: &Message) -> Result<(), NotifyError>;
}

/// # Summary
/// 通知适配器构建接口。
/// 由 `crates/notify` 提供内置实现，通过 `crates/dispatch` 的注册表按平台选取，
/// 测试中可替换为记录调用的假实现。
///
/// # Invariants
/// - 实现类必须保证线程安全 (`Send` + `Sync`)。
/// - 每次调用构建一个全新的适配器，不缓存任何状态。
pub trait NotifierBuilder: Send + Sync {
    /// # Summary
    /// 根据平台选项构建适配器。
    ///
    /// # Arguments
    /// * `options` - 从扁平配置中切分并归一化后的平台选项。
    ///
    /// # Returns
    /// * 适配器实例，或选项与平台不匹配时的 `NotifyError::Config`。
    fn build(&self, options: ChannelOptions) -> Result<Box<dyn Notifier>, NotifyError>;
}

impl<F> NotifierBuilder for F
where
    F: Fn(ChannelOptions) -> Result<Box<dyn Notifier>, NotifyError> + Send + Sync,
{
    fn build(&self, options: ChannelOptions) -> Result<Box<dyn Notifier>, NotifyError> {
        self(options)
    }
}
