use anyhow::Result;
use clap::{Parser, Subcommand};
use opencode_notify::events::{self, hook_input};
use opencode_notify::platform::notifier::TerminalNotifier;
use opencode_notify::platform::SystemCommandRunner;
use opencode_notify::router::{Collaborators, NotifyPlugin};
use opencode_notify::session::client::{HttpSessionSource, DEFAULT_SERVER_URL};
use opencode_notify::config;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;

#[derive(Parser, Debug)]
#[command(name = "opencode-notify")]
#[command(about = "Desktop notifications for OpenCode sessions")]
#[command(version)]
struct Args {
    /// Path to config file
    #[arg(long, short, global = true, env = "OPENCODE_NOTIFY_CONFIG")]
    config: Option<PathBuf>,

    /// OpenCode server URL
    #[arg(long, global = true, env = "OPENCODE_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    server: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Subscribe to the server event stream and notify (default)
    Listen,

    /// Handle one event or tool invocation read from stdin as JSON
    Hook,

    /// Print the resolved configuration
    Config,

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn collaborators(server: &str) -> Collaborators {
    let runner = Arc::new(SystemCommandRunner);
    Collaborators {
        sessions: Arc::new(HttpSessionSource::new(server)),
        runner: runner.clone(),
        notifier: Arc::new(TerminalNotifier::new(runner)),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let command = args.command.unwrap_or(Command::Listen);

    // Hook runs once per host event; skip logging setup for speed
    if !matches!(command, Command::Hook) {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::from_default_env()
                    .add_directive("opencode_notify=info".parse()?),
            )
            .init();
    }

    match command {
        Command::Hook => run_hook(args.config.as_deref(), &args.server).await,
        Command::Config => {
            let config = config::load(args.config.as_deref());
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
        Command::Init { force } => {
            let path = match args.config {
                Some(p) => p,
                None => config::config_path()
                    .ok_or_else(|| anyhow::anyhow!("Could not find home directory"))?,
            };
            if config::write_defaults(&path, force)? {
                println!("Config saved to {}", path.display());
            } else {
                println!(
                    "Config already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            Ok(())
        }
        Command::Listen => {
            let config = config::load(args.config.as_deref());
            let plugin = NotifyPlugin::init(config, collaborators(&args.server)).await;
            listen(&args.server, plugin).await
        }
    }
}

/// Handle a single payload from stdin and wait for its delivery
async fn run_hook(config_path: Option<&Path>, server: &str) -> Result<()> {
    let Some(payload) = hook_input::from_stdin() else {
        return Ok(());
    };
    let config = config::load(config_path);
    let plugin = NotifyPlugin::init(config, collaborators(server)).await;
    plugin.on_hook_payload(&payload).await;
    plugin.flush().await;
    Ok(())
}

/// Subscribe to the event stream and handle each event on its own task
async fn listen(server: &str, plugin: NotifyPlugin) -> Result<()> {
    let Some(router) = plugin.router().cloned() else {
        return Ok(());
    };

    let (tx, mut rx) = mpsc::channel(64);
    let server = server.to_string();
    let mut reader = tokio::spawn(async move { events::stream::subscribe(&server, tx).await });

    loop {
        tokio::select! {
            Some(event) = rx.recv() => {
                let router = Arc::clone(&router);
                tokio::spawn(async move {
                    router.handle_event(&event).await;
                });
            }
            result = &mut reader => {
                match result {
                    Ok(Ok(())) => tracing::info!("Event stream closed"),
                    Ok(Err(e)) => tracing::error!("Event stream error: {}", e),
                    Err(e) => tracing::error!("Event stream task failed: {}", e),
                }
                return Ok(());
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutting down");
                break;
            }
        }
    }

    reader.abort();
    Ok(())
}
