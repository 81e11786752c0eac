mod settings;

use anyhow::Context;
use clap::Parser;
use herald_dispatch::Dispatcher;
use std::io::Read;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Send one notification to the configured platform.
#[derive(Parser, Debug)]
#[command(name = "herald", version, about)]
struct Cli {
    /// Configuration file (defaults to ./herald.toml when present)
    #[arg(short, long, env = "HERALD_CONFIG")]
    config: Option<PathBuf>,

    /// Override the platform from the configuration
    #[arg(short, long)]
    platform: Option<String>,

    /// Message text; read from stdin when empty or "-"
    message: Vec<String>,
}

impl Cli {
    fn message(&self) -> anyhow::Result<String> {
        if self.message.is_empty() || self.message == ["-"] {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read message from stdin")?;
            return Ok(buffer.trim_end_matches(['\r', '\n']).to_string());
        }
        Ok(self.message.join(" "))
    }
}

/// # Summary
/// CLI 入口。
///
/// # Logic
/// 1. 加载配置 (文件 + 环境变量)，命令行参数覆盖平台。
/// 2. 初始化日志：`RUST_LOG` 优先，否则使用配置中的级别。
/// 3. 构造分发器并发送一条消息，失败时以非零状态退出。
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = settings::load(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(platform) = &cli.platform {
        config.notify.platform = platform.clone();
    }

    let (writer, _guard) = tracing_appender::non_blocking(std::io::stderr());
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log.level))
        .context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .init();

    let message = cli.message()?;
    let dispatcher = Dispatcher::new(config.notify);
    info!(platform = %dispatcher.config().platform, "Herald starting...");

    dispatcher
        .send(&message)
        .await
        .with_context(|| format!("failed to send {} notification", dispatcher.config().platform))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_joins_message_words() {
        let cli = Cli::parse_from(["herald", "--platform", "Slack", "disk", "is", "full"]);
        assert_eq!(cli.platform.as_deref(), Some("Slack"));
        assert_eq!(cli.message().unwrap(), "disk is full");
    }

    #[test]
    fn test_cli_config_path() {
        let cli = Cli::parse_from(["herald", "-c", "/etc/herald.toml", "hi"]);
        assert_eq!(cli.config, Some(PathBuf::from("/etc/herald.toml")));
    }
}
