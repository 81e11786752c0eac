use serde::de::{self, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::Deserialize;
use std::fmt;

/// # Summary
/// 出站消息，在分发边界解析一次。
///
/// # Invariants
/// - `text()` 始终返回调用方传入的原始文本。
/// - 只有能解码为 `{subject, content}` 信封的文本才是 `Structured`，缺失字段视为空字符串。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// `{"subject": ..., "content": ...}` 形式的结构化消息
    Structured {
        raw: String,
        subject: String,
        content: String,
    },
    /// 纯文本消息，主题与正文都使用原文
    Plain(String),
}

/// 邮件信封 `{subject, content}`
///
/// 键名不区分大小写，重复键以最后出现的为准；`null` 不覆盖已有值，
/// 其它类型的值使整体解码失败。顶层 `null` 视为空信封。
#[derive(Default)]
struct Envelope {
    subject: String,
    content: String,
}

impl<'de> Deserialize<'de> for Envelope {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(EnvelopeVisitor)
    }
}

struct EnvelopeVisitor;

impl<'de> Visitor<'de> for EnvelopeVisitor {
    type Value = Envelope;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an object with subject and content")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Envelope, E> {
        Ok(Envelope::default())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Envelope, A::Error> {
        let mut envelope = Envelope::default();
        while let Some(key) = map.next_key::<String>()? {
            let field = if key.eq_ignore_ascii_case("subject") {
                &mut envelope.subject
            } else if key.eq_ignore_ascii_case("content") {
                &mut envelope.content
            } else {
                map.next_value::<IgnoredAny>()?;
                continue;
            };
            if let Some(value) = map.next_value::<Option<String>>()? {
                *field = value;
            }
        }
        Ok(envelope)
    }
}

impl Message {
    /// # Summary
    /// 解析原始文本。
    ///
    /// # Logic
    /// 1. 尝试将整段文本解码为 `{subject, content}` 信封。
    /// 2. 成功则为 `Structured`，失败 (非 JSON、数组、标量、字段类型不符) 则为 `Plain`。
    /// 3. 解析失败不是错误。
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        match serde_json::from_str::<Envelope>(&raw) {
            Ok(envelope) => Message::Structured {
                raw,
                subject: envelope.subject,
                content: envelope.content,
            },
            Err(_) => Message::Plain(raw),
        }
    }

    /// 原始文本，聊天类平台直接发送该内容
    pub fn text(&self) -> &str {
        match self {
            Message::Structured { raw, .. } => raw,
            Message::Plain(raw) => raw,
        }
    }

    pub fn subject(&self) -> &str {
        match self {
            Message::Structured { subject, .. } => subject,
            Message::Plain(raw) => raw,
        }
    }

    pub fn body(&self) -> &str {
        match self {
            Message::Structured { content, .. } => content,
            Message::Plain(raw) => raw,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text().is_empty()
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, Message::Structured { .. })
    }
}
