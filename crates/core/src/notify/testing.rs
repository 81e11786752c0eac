use crate::notify::error::NotifyError;
use crate::notify::message::Message;
use crate::notify::options::ChannelOptions;
use crate::notify::port::{Notifier, NotifierBuilder};
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;

/// 一次被记录的调用
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedSend {
    pub options: ChannelOptions,
    pub message: Message,
}

/// # Summary
/// 测试用的记录型构建器，替代真实适配器注入注册表。
///
/// # Invariants
/// - 克隆后共享同一份记录，便于在注入后继续断言。
/// - 设置了 `fail_with` 时，`send` 返回该错误但仍计入调用次数。
#[derive(Clone, Default)]
pub struct RecordingBuilder {
    builds: Arc<AtomicUsize>,
    sends: Arc<Mutex<Vec<RecordedSend>>>,
    failure: Option<NotifyError>,
}

impl RecordingBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 让每次发送都返回指定错误
    pub fn fail_with(mut self, error: NotifyError) -> Self {
        self.failure = Some(error);
        self
    }

    /// 构建适配器的次数
    pub fn build_count(&self) -> usize {
        self.builds.load(Ordering::SeqCst)
    }

    /// 已记录的发送调用
    pub async fn sends(&self) -> Vec<RecordedSend> {
        self.sends.lock().await.clone()
    }
}

impl NotifierBuilder for RecordingBuilder {
    fn build(&self, options: ChannelOptions) -> Result<Box<dyn Notifier>, NotifyError> {
        self.builds.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(RecordingNotifier {
            options,
            sends: self.sends.clone(),
            failure: self.failure.clone(),
        }))
    }
}

/// 记录型适配器，由 `RecordingBuilder` 构建
pub struct RecordingNotifier {
    options: ChannelOptions,
    sends: Arc<Mutex<Vec<RecordedSend>>>,
    failure: Option<NotifyError>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, message: &Message) -> Result<(), NotifyError> {
        self.sends.lock().await.push(RecordedSend {
            options: self.options.clone(),
            message: message.clone(),
        });
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}
