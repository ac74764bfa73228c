// support-widget: terminal front end for the support chat widget.

mod render;

use clap::{Parser, Subcommand};
use log::debug;
use render::TerminalView;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;
use support_widget::{
    ChatTransport, ChatView, ChatWidget, HttpTransport, SubmitOutcome, WidgetConfig, WidgetError,
    WidgetResult,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

#[derive(Parser)]
#[command(
    name = "support-widget",
    version,
    about = "Chat with the customer-support bot from the terminal"
)]
struct Cli {
    /// Config file (TOML). Defaults to <config dir>/support-widget/config.toml.
    #[arg(long, global = true, env = "SUPPORT_WIDGET_CONFIG")]
    config: Option<PathBuf>,

    /// Support server base URL; overrides the config file and CSB_* variables.
    #[arg(long, global = true)]
    endpoint: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive chat. `/session` shows the session id, `/quit` exits.
    Chat,
    /// Send one message and print the reply.
    Send {
        #[arg(required = true)]
        message: Vec<String>,
        /// Continue an existing conversation.
        #[arg(long)]
        session: Option<String>,
        /// Print the raw reply as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Check the server's /health endpoint.
    Health,
    /// Upload document files to the server's knowledge base.
    Ingest {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Ask the server to ingest a directory under its project root.
    IngestPath { path: Option<String> },
}

#[tokio::main]
async fn main() {
    // Failures are reported once on stderr below; library warnings need RUST_LOG.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("error")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> WidgetResult<()> {
    let mut config = WidgetConfig::load(cli.config.as_deref())?;
    if let Some(endpoint) = cli.endpoint {
        config.endpoint = endpoint;
        config.validate()?;
    }
    let transport = HttpTransport::new(config)?;
    debug!("[cli] Using endpoint {}", transport.config().endpoint);

    let mut stdout = std::io::stdout();
    match cli.command {
        Command::Chat => {
            let widget = ChatWidget::new(transport, TerminalView::interactive());
            chat_loop(&widget, BufReader::new(tokio::io::stdin()), &mut stdout).await
        }
        Command::Send { message, session, json } => {
            let widget = widget_for(transport, TerminalView::one_shot(), session);
            send_once(&widget, &message.join(" "), json, &mut stdout).await
        }
        Command::Health => {
            let report = transport.health().await?;
            writeln!(stdout, "{}", report.status)?;
            if report.is_ok() {
                Ok(())
            } else {
                Err(WidgetError::Other(format!("server unhealthy: {}", report.status)))
            }
        }
        Command::Ingest { files } => {
            let mut documents = Vec::with_capacity(files.len());
            for file in &files {
                documents.push(tokio::fs::read_to_string(file).await?);
            }
            let ingested = transport.ingest(documents).await?;
            writeln!(stdout, "ingested {}", ingested)?;
            Ok(())
        }
        Command::IngestPath { path } => {
            let reply = transport.ingest_path(path).await?;
            writeln!(stdout, "ingested {}", reply.ingested.unwrap_or(0))?;
            for file in &reply.files {
                writeln!(stdout, "  {}", file)?;
            }
            Ok(())
        }
    }
}

fn widget_for<T: ChatTransport, V: ChatView>(
    transport: T,
    view: V,
    session: Option<String>,
) -> ChatWidget<T, V> {
    match session {
        Some(id) => ChatWidget::with_session(transport, view, id),
        None => ChatWidget::new(transport, view),
    }
}

/// Submit every input line until EOF, `/quit` or `/exit`.
/// `/session` writes the cached session id to `out`.
async fn chat_loop<T, V, R, W>(
    widget: &ChatWidget<T, V>,
    input: R,
    out: &mut W,
) -> WidgetResult<()>
where
    T: ChatTransport,
    V: ChatView,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "/quit" | "/exit" => break,
            "/session" => {
                let id = widget.session_id().unwrap_or_else(|| "(none)".into());
                writeln!(out, "{}", id)?;
                continue;
            }
            _ => {}
        }
        widget.submit(&line).await;
    }
    Ok(())
}

/// One submission; the reply summary (or raw JSON) goes to `out`.
async fn send_once<T, V, W>(
    widget: &ChatWidget<T, V>,
    message: &str,
    json: bool,
    out: &mut W,
) -> WidgetResult<()>
where
    T: ChatTransport,
    V: ChatView,
    W: Write,
{
    let start = Instant::now();
    let outcome = widget.submit(message).await;
    let elapsed_ms = start.elapsed().as_millis();

    match outcome {
        SubmitOutcome::Ignored => Err(WidgetError::Other("message is empty".into())),
        SubmitOutcome::Failed(e) => Err(e),
        SubmitOutcome::Answered(reply) => {
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&reply)?)?;
                return Ok(());
            }
            writeln!(out, "{}", reply.status())?;
            if let Some(confidence) = reply.confidence {
                writeln!(out, "Confidence: {:.2}", confidence)?;
            }
            writeln!(out, "Session: {}", reply.session_id)?;
            writeln!(out, "Latency: {}ms", elapsed_ms)?;
            Ok(())
        }
    }
}
