use thiserror::Error;

/// # Summary
/// 通知服务错误枚举。
///
/// # Invariants
/// - 必须通过 `thiserror` 派生 `Error` trait。
/// - 分发器原样向上传递适配器返回的错误，不做包装或替换。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    /// 未识别或未注册的推送平台
    #[error("not supported notify platform: {0}")]
    Unsupported(String),

    /// 配置错误 (如不支持的区域、非法的优先级)
    #[error("Configuration error: {0}")]
    Config(String),

    /// 必填字段为空，在任何网络请求之前返回
    #[error("missing {0}")]
    Missing(&'static str),

    /// 收件地址命中域名黑名单
    #[error("email {0} is blocked")]
    Blocked(String),

    /// 请求体序列化失败
    #[error("Payload error: {0}")]
    Payload(String),

    /// 网络连接或传输错误
    #[error("Network error: {0}")]
    Network(String),

    /// 推送平台返回的错误 (如 Telegram API Error)
    #[error("Platform error: {0}")]
    Platform(String),
}

impl NotifyError {
    /// # Summary
    /// 判断错误是否在发起任何网络请求之前产生。
    ///
    /// # Returns
    /// * `true` - 配置、校验、策略拦截或序列化错误。
    /// * `false` - 传输层或推送平台返回的错误。
    pub fn is_local(&self) -> bool {
        !matches!(self, NotifyError::Network(_) | NotifyError::Platform(_))
    }
}
