use herald_core::config::NotifyConfig;
use herald_core::notify::error::NotifyError;
use herald_core::notify::message::Message;
use herald_core::notify::options::{ChannelOptions, SesOptions, SmtpOptions, TelegramOptions};
use herald_core::notify::platform::Platform;
use herald_core::notify::port::Notifier;
use herald_core::notify::testing::RecordingBuilder;
use herald_dispatch::{AliasTable, Dispatcher, Registry};

/// 为所有具体平台注册同一个记录型构建器
fn spy_registry(spy: &RecordingBuilder) -> Registry {
    Platform::ALL
        .into_iter()
        .filter(|platform| *platform != Platform::Email)
        .fold(Registry::empty(), |registry, platform| {
            registry.register(platform, spy.clone())
        })
}

fn spy_dispatcher(config: NotifyConfig, spy: &RecordingBuilder) -> Dispatcher {
    Dispatcher::with_registry(config, spy_registry(spy), AliasTable::default())
}

#[tokio::test]
async fn test_unrecognized_platform_makes_no_call() {
    let spy = RecordingBuilder::new();
    for name in ["Argus", "", "sms", "Telegramm"] {
        let dispatcher = spy_dispatcher(NotifyConfig::for_platform(name), &spy);
        let result = dispatcher.send("hello").await;
        assert_eq!(result, Err(NotifyError::Unsupported(name.to_string())));
    }
    assert_eq!(spy.build_count(), 0);
    assert!(spy.sends().await.is_empty());
}

#[tokio::test]
async fn test_unregistered_platform_is_unsupported() {
    let spy = RecordingBuilder::new();
    let registry = Registry::empty().register(Platform::Slack, spy.clone());
    let dispatcher = Dispatcher::with_registry(
        NotifyConfig::for_platform("Discord"),
        registry,
        AliasTable::default(),
    );

    let result = dispatcher.send("hello").await;
    assert!(matches!(result, Err(NotifyError::Unsupported(_))));
    assert_eq!(spy.build_count(), 0);
}

#[tokio::test]
async fn test_telegram_channel_name_end_to_end() {
    let spy = RecordingBuilder::new();
    let config = NotifyConfig {
        platform: "Telegram".to_string(),
        token: "T".to_string(),
        channel: "@mychannel".to_string(),
        ..NotifyConfig::default()
    };

    spy_dispatcher(config, &spy).send("hello").await.unwrap();

    let sends = spy.sends().await;
    assert_eq!(sends.len(), 1);
    assert_eq!(
        sends[0].options,
        ChannelOptions::Telegram(TelegramOptions {
            token: "T".to_string(),
            channel: 0,
            chat_name: "@mychannel".to_string(),
        })
    );
    assert_eq!(sends[0].message.text(), "hello");
}

#[tokio::test]
async fn test_telegram_numeric_and_invalid_channel() {
    let spy = RecordingBuilder::new();
    for (channel, expected_id) in [("12345", 12345), ("not-a-number", 0)] {
        let config = NotifyConfig {
            platform: "Telegram".to_string(),
            token: "T".to_string(),
            channel: channel.to_string(),
            ..NotifyConfig::default()
        };
        spy_dispatcher(config, &spy).send("hi").await.unwrap();

        let sends = spy.sends().await;
        let last = sends.last().unwrap();
        assert_eq!(
            last.options,
            ChannelOptions::Telegram(TelegramOptions {
                token: "T".to_string(),
                channel: expected_id,
                chat_name: String::new(),
            })
        );
    }
}

#[tokio::test]
async fn test_email_alias_routes_to_ses_end_to_end() {
    let spy = RecordingBuilder::new();
    let config = NotifyConfig {
        platform: "Email".to_string(),
        token: "a@example.com".to_string(),
        sender: "no-reply@x.com".to_string(),
        key: "k".to_string(),
        secret: "s".to_string(),
        area: "us-east-1".to_string(),
        ..NotifyConfig::default()
    };

    spy_dispatcher(config, &spy)
        .send(r#"{"subject":"Hi","content":"Body"}"#)
        .await
        .unwrap();

    let sends = spy.sends().await;
    assert_eq!(sends.len(), 1);
    assert_eq!(
        sends[0].options,
        ChannelOptions::Ses(SesOptions {
            to_email: "a@example.com".to_string(),
            key: "k".to_string(),
            secret: "s".to_string(),
            area: "us-east-1".to_string(),
            sender: "no-reply@x.com".to_string(),
            deny_list: true,
        })
    );
    assert_eq!(sends[0].message.subject(), "Hi");
    assert_eq!(sends[0].message.body(), "Body");
}

#[tokio::test]
async fn test_plain_email_uses_text_for_subject_and_body() {
    let spy = RecordingBuilder::new();
    let mut config = NotifyConfig::for_platform("AwsEmail");
    config.to_email = "ops@example.com".to_string();

    spy_dispatcher(config, &spy).send("plain text").await.unwrap();

    let sends = spy.sends().await;
    assert_eq!(sends[0].message, Message::Plain("plain text".to_string()));
    assert_eq!(sends[0].message.subject(), "plain text");
    assert_eq!(sends[0].message.body(), "plain text");
}

#[tokio::test]
async fn test_email_alias_can_point_to_smtp() {
    let spy = RecordingBuilder::new();
    let config = NotifyConfig {
        platform: "Email".to_string(),
        token: "a@example.com".to_string(),
        user: "bot@example.com".to_string(),
        password: "pw".to_string(),
        host: "smtp.example.com".to_string(),
        ..NotifyConfig::default()
    };
    let dispatcher = Dispatcher::with_registry(
        config,
        spy_registry(&spy),
        AliasTable::default().alias(Platform::Email, Platform::Smtp),
    );

    dispatcher.send("x").await.unwrap();

    let sends = spy.sends().await;
    assert_eq!(
        sends[0].options,
        ChannelOptions::Smtp(SmtpOptions {
            to_email: "a@example.com".to_string(),
            user: "bot@example.com".to_string(),
            password: "pw".to_string(),
            host: "smtp.example.com".to_string(),
            sender: String::new(),
            deny_list: false,
        })
    );
}

#[tokio::test]
async fn test_repeated_sends_are_independent() {
    let spy = RecordingBuilder::new();
    let config = NotifyConfig {
        platform: "Slack".to_string(),
        token: "xoxb".to_string(),
        channel: "#ops".to_string(),
        ..NotifyConfig::default()
    };
    let dispatcher = spy_dispatcher(config, &spy);

    dispatcher.send("same").await.unwrap();
    dispatcher.send("same").await.unwrap();

    assert_eq!(spy.build_count(), 2);
    let sends = spy.sends().await;
    assert_eq!(sends.len(), 2);
    assert_eq!(sends[0], sends[1]);
}

#[tokio::test]
async fn test_adapter_error_is_propagated_unchanged() {
    let failure = NotifyError::Platform("Slack API error: invalid_auth".to_string());
    let spy = RecordingBuilder::new().fail_with(failure.clone());
    let config = NotifyConfig {
        platform: "Slack".to_string(),
        token: "bad".to_string(),
        channel: "#ops".to_string(),
        ..NotifyConfig::default()
    };

    let result = spy_dispatcher(config, &spy).send("hello").await;
    assert_eq!(result, Err(failure));
    assert_eq!(spy.sends().await.len(), 1);
}

#[tokio::test]
async fn test_closure_builder_can_be_registered() {
    let registry = Registry::empty().register(
        Platform::Lark,
        |_options: ChannelOptions| -> Result<Box<dyn Notifier>, NotifyError> {
            Err(NotifyError::Config("lark disabled".to_string()))
        },
    );
    let dispatcher = Dispatcher::with_registry(
        NotifyConfig::for_platform("Lark"),
        registry,
        AliasTable::new(),
    );

    assert_eq!(
        dispatcher.send("x").await,
        Err(NotifyError::Config("lark disabled".to_string()))
    );
}

#[tokio::test]
async fn test_builtin_ses_blocks_consumer_domains() {
    for to in ["u@qq.com", "u@foxmail.com", "u@126.com", "u@163.com"] {
        let config = NotifyConfig {
            platform: "Email".to_string(),
            token: to.to_string(),
            sender: "no-reply@x.com".to_string(),
            key: "k".to_string(),
            secret: "s".to_string(),
            area: "us-east-1".to_string(),
            ..NotifyConfig::default()
        };
        let result = Dispatcher::new(config).send("alert").await;
        assert_eq!(result, Err(NotifyError::Blocked(to.to_string())));
    }
}

#[tokio::test]
async fn test_builtin_adapters_validate_before_network() {
    let result = Dispatcher::new(NotifyConfig::for_platform("Slack"))
        .send("hello")
        .await;
    assert_eq!(result, Err(NotifyError::Missing("slack token")));

    let result = Dispatcher::new(NotifyConfig::for_platform("AwsEmail"))
        .send("hello")
        .await;
    assert_eq!(result, Err(NotifyError::Missing("email address")));

    let mut config = NotifyConfig::for_platform("Lark");
    config.token = "http://127.0.0.1:9/hook".to_string();
    let result = Dispatcher::new(config).send("").await;
    assert_eq!(result, Err(NotifyError::Missing("message")));
}

#[tokio::test]
async fn test_dispatcher_exposes_caller_config() {
    let spy = RecordingBuilder::new();
    let mut config = NotifyConfig::for_platform("Pushover");
    config.token = "app".to_string();
    let dispatcher = spy_dispatcher(config.clone(), &spy);

    assert_eq!(dispatcher.config(), &config);
    assert_eq!(dispatcher.route(), Ok(Platform::Pushover));
}
