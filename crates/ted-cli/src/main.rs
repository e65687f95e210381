//! # ted-cli
//!
//! Binary entry point for the `ted` Bot API client.
//!
//! Each subcommand issues one API call with the configured token and prints
//! the decoded result as pretty JSON on stdout. Logs go to stderr.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};

use ted_client::{Bot, BotConfig, EditMessageText, GetUpdates, SendMessage};
use ted_proto::{ChatId, ForceReply, ParseMode, UpdateKind};

/// ted - Typed Telegram Bot API client
#[derive(Parser, Debug)]
#[command(name = "ted", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a YAML configuration file (defaults to TED_* environment variables)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the bot's own user (getMe)
    Me,

    /// Show the current webhook status (getWebhookInfo)
    WebhookInfo,

    /// Fetch pending updates (getUpdates)
    Updates(UpdatesArgs),

    /// Send a text message (sendMessage)
    Send(SendArgs),

    /// Replace the text of a sent message (editMessageText)
    EditText(EditTextArgs),
}

#[derive(Args, Debug)]
struct UpdatesArgs {
    /// Identifier of the first update to return
    #[arg(long, allow_hyphen_values = true)]
    offset: Option<i64>,

    /// Maximum number of updates (1-100)
    #[arg(long)]
    limit: Option<u32>,

    /// Long-polling timeout in seconds
    #[arg(long)]
    timeout: Option<u32>,
}

#[derive(Args, Debug)]
struct SendArgs {
    /// Numeric chat id or @channel handle
    #[arg(value_parser = parse_chat_id, allow_hyphen_values = true)]
    chat_id: ChatId,

    /// Message text
    text: String,

    /// Markdown, MarkdownV2 or HTML
    #[arg(long, value_name = "MODE")]
    parse_mode: Option<ParseMode>,

    /// Ask the recipient's client to open a reply interface
    #[arg(long)]
    force_reply: bool,

    /// Deliver without sound
    #[arg(long)]
    silent: bool,

    /// Send as a reply to this message
    #[arg(long, value_name = "MESSAGE_ID")]
    reply_to: Option<i64>,
}

#[derive(Args, Debug)]
struct EditTextArgs {
    /// Numeric chat id or @channel handle
    #[arg(value_parser = parse_chat_id, allow_hyphen_values = true)]
    chat_id: ChatId,

    /// Identifier of the message to edit
    message_id: i64,

    /// New message text
    text: String,

    /// Markdown, MarkdownV2 or HTML
    #[arg(long, value_name = "MODE")]
    parse_mode: Option<ParseMode>,
}

fn parse_chat_id(raw: &str) -> Result<ChatId, String> {
    if raw.trim().is_empty() {
        return Err("chat id must not be empty".to_string());
    }
    Ok(ChatId::parse(raw))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_deref())?;
    debug!(?config, "loaded configuration");
    let bot = Bot::from_config(config).context("failed to create bot")?;

    match cli.command {
        Commands::Me => print_json(&bot.get_me().await?),
        Commands::WebhookInfo => print_json(&bot.get_webhook_info().await?),
        Commands::Updates(args) => updates_command(&bot, args).await,
        Commands::Send(args) => send_command(&bot, args).await,
        Commands::EditText(args) => edit_text_command(&bot, args).await,
    }
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&std::path::Path>) -> Result<BotConfig> {
    match path {
        Some(path) => BotConfig::from_yaml_file(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => BotConfig::from_env().context("failed to load config from environment"),
    }
}

async fn updates_command(bot: &Bot, args: UpdatesArgs) -> Result<()> {
    let request = GetUpdates {
        offset: args.offset,
        limit: args.limit,
        timeout: args.timeout,
    };
    let updates = bot.get_updates(&request).await?;
    info!(count = updates.len(), "fetched updates");

    for update in &updates {
        if let UpdateKind::Message(message) = update.kind() {
            let (command, arguments) = message.command_and_args();
            if !command.is_empty() {
                info!(
                    update_id = update.update_id,
                    command,
                    args = arguments,
                    "command received"
                );
            }
        }
    }

    print_json(&updates)
}

async fn send_command(bot: &Bot, args: SendArgs) -> Result<()> {
    let request = build_send_message(args);
    let message = bot.call(&request).await?;
    info!(message_id = message.message_id, "message sent");
    print_json(&message)
}

fn build_send_message(args: SendArgs) -> SendMessage {
    SendMessage {
        parse_mode: args.parse_mode,
        disable_notification: args.silent,
        reply_to_message_id: args.reply_to,
        reply_markup: args.force_reply.then(|| ForceReply::default().into()),
        ..SendMessage::new(args.chat_id, args.text)
    }
}

async fn edit_text_command(bot: &Bot, args: EditTextArgs) -> Result<()> {
    let request = EditMessageText {
        parse_mode: args.parse_mode,
        ..EditMessageText::new(args.chat_id, args.message_id, args.text)
    };
    match bot.call(&request).await {
        Ok(edited) => print_json(&edited),
        Err(err) if ted_client::is_message_not_modified(&err) => {
            info!("message already has this content");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to render result")?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_send_with_flags() {
        let cli = Cli::try_parse_from([
            "ted",
            "send",
            "-1001234",
            "hello",
            "--parse-mode",
            "html",
            "--force-reply",
            "--silent",
        ])
        .unwrap();

        let Commands::Send(args) = cli.command else {
            panic!("expected send command");
        };
        assert_eq!(args.chat_id, ChatId::Id(-1_001_234));
        assert_eq!(args.parse_mode, Some(ParseMode::Html));

        let request = build_send_message(args);
        assert!(request.disable_notification);
        assert!(request.reply_markup.is_some());
        assert_eq!(request.text, "hello");
    }

    #[test]
    fn channel_handles_are_kept() {
        let cli = Cli::try_parse_from(["ted", "send", "@news", "hi"]).unwrap();
        let Commands::Send(args) = cli.command else {
            panic!("expected send command");
        };
        assert_eq!(args.chat_id, ChatId::Username("@news".to_string()));
        assert!(build_send_message(args).reply_markup.is_none());
    }

    #[test]
    fn global_options_after_subcommand() {
        let cli = Cli::try_parse_from(["ted", "me", "-v", "--config", "bot.yml"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("bot.yml")));
        assert!(matches!(cli.command, Commands::Me));
    }

    #[test]
    fn rejects_unknown_parse_mode() {
        let result = Cli::try_parse_from(["ted", "send", "1", "hi", "--parse-mode", "rtf"]);
        assert!(result.is_err());
    }

    #[test]
    fn updates_options() {
        let cli =
            Cli::try_parse_from(["ted", "updates", "--offset", "-1", "--limit", "10"]).unwrap();
        let Commands::Updates(args) = cli.command else {
            panic!("expected updates command");
        };
        assert_eq!(args.offset, Some(-1));
        assert_eq!(args.limit, Some(10));
        assert_eq!(args.timeout, None);
    }

    #[test]
    fn edit_text_requires_message_id() {
        assert!(Cli::try_parse_from(["ted", "edit-text", "1", "hi"]).is_err());
        let cli = Cli::try_parse_from(["ted", "edit-text", "1", "5", "hi"]).unwrap();
        assert!(matches!(cli.command, Commands::EditText(_)));
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
