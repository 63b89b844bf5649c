//! TokClone terminal client.
//!
//! A rustyline REPL over the application shell. Every command mutates state
//! on this loop; caption requests run on spawned tasks and their results are
//! collected between commands.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use tokclone_application::{AppServices, AppShell, AuthMode, SubmitOutcome};
use tokclone_core::AppContext;
use tokclone_core::config::AppConfig;
use tokclone_core::navigation::View;
use tokclone_core::video::{VideoCatalog, VideoRecord};
use tokclone_infrastructure::{
    AutoplayPolicy, ConfigStorage, MockAuthService, SecretStorage, SimulatedMedia,
    StaticVideoCatalog, TokPaths,
};
use tokclone_interaction::GeminiCaptionAssistant;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

mod commands;
mod helper;
mod render;

use commands::{Command, HELP};
use helper::CliHelper;

#[derive(Parser, Debug)]
#[command(name = "tokclone")]
#[command(version, long_about = None)]
#[command(about = "TokClone - short-form video feed with an AI caption assistant")]
struct Cli {
    /// Path to config.toml (defaults to the platform config dir)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Gemini API key. API_KEY is accepted as well.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// TOML file with [[video]] tables to use instead of the built-in feed
    #[arg(long, value_name = "PATH")]
    catalog: Option<PathBuf>,

    /// Simulated login/register latency in milliseconds
    #[arg(long, value_name = "MS")]
    latency_ms: Option<u64>,

    /// Start with sound off
    #[arg(long)]
    muted: bool,

    /// Reject unmuted autoplay like a browser would
    #[arg(long)]
    block_autoplay: bool,

    /// Log filter, e.g. "debug" or "tokclone_application=trace"
    #[arg(long, value_name = "FILTER")]
    log_level: Option<String>,
}

fn init_logging(filter: Option<&str>) -> Result<WorkerGuard> {
    let log_dir =
        TokPaths::log_dir().unwrap_or_else(|_| std::env::temp_dir().join("tokclone/logs"));
    let file_appender = tracing_appender::rolling::daily(&log_dir, "tokclone.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = match filter {
        Some(directives) => EnvFilter::try_new(directives)
            .with_context(|| format!("invalid log filter '{directives}'"))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();
    Ok(guard)
}

fn load_config(path: Option<PathBuf>) -> Result<AppConfig> {
    let storage = match path {
        Some(path) => ConfigStorage::with_path(path),
        None => ConfigStorage::new().context("failed to locate config directory")?,
    };
    storage
        .load()
        .with_context(|| format!("failed to read {}", storage.path().display()))
}

/// Resolves the API key: CLI flag or environment first, then secret.json.
fn resolve_api_key(cli_key: Option<String>, config: &mut AppConfig) -> Option<String> {
    let from_env = cli_key
        .or_else(|| std::env::var("API_KEY").ok())
        .filter(|key| !key.trim().is_empty());
    if from_env.is_some() {
        return from_env;
    }

    let secrets = match SecretStorage::new().and_then(|storage| storage.load_or_default()) {
        Ok(secrets) => secrets,
        Err(err) => {
            warn!(error = %err, "Ignoring unreadable secret.json");
            return None;
        }
    };
    if let Some(model) = secrets.gemini.as_ref().and_then(|g| g.model_name.clone()) {
        config.ai.model = model;
    }
    secrets.gemini_api_key().map(str::to_string)
}

fn load_catalog(path: Option<PathBuf>) -> Result<StaticVideoCatalog> {
    match path {
        Some(path) => StaticVideoCatalog::from_toml_file(&path)
            .with_context(|| format!("failed to load catalog {}", path.display())),
        None => Ok(StaticVideoCatalog::builtin()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging(cli.log_level.as_deref())?;

    let mut config = load_config(cli.config)?;
    let api_key = resolve_api_key(cli.api_key, &mut config);
    let catalog = load_catalog(cli.catalog)?;
    info!(videos = catalog.videos().len(), ai_enabled = api_key.is_some(), "Starting TokClone");

    let latency = cli
        .latency_ms
        .unwrap_or(config.auth.simulated_latency_ms);
    let services = AppServices {
        catalog: Arc::new(catalog),
        auth: Arc::new(MockAuthService::new(Duration::from_millis(latency))),
        captions: Arc::new(GeminiCaptionAssistant::from_settings(
            api_key.as_deref(),
            &config.ai,
        )),
    };
    let policy = if cli.block_autoplay {
        AutoplayPolicy::BlockUnmuted
    } else {
        AutoplayPolicy::Allow
    };
    let context = Arc::new(AppContext::with_muted(cli.muted || config.feed.start_muted));
    let media_factory = Box::new(move |video: &VideoRecord| {
        SimulatedMedia::new(&video.url).with_policy(policy)
    });

    let mut shell = AppShell::start(context, services, config.feed.clone(), media_factory).await?;

    let mut rl: Editor<CliHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!("{}", "=== TokClone ===".bright_magenta().bold());
    println!("{}", "Type 'help' for commands, 'quit' to exit.".bright_black());
    render::render(&shell);

    loop {
        let readline = rl.readline(">> ");
        if shell.collect_captions() > 0 {
            println!("{}", "AI caption ready.".bright_magenta());
        }

        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                let command = match trimmed.parse::<Command>() {
                    Ok(command) => command,
                    Err(err) => {
                        println!("{}", err.to_string().yellow());
                        continue;
                    }
                };
                if command == Command::Quit {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }
                if let Err(err) = execute(&mut shell, command).await {
                    eprintln!("{}", format!("Error: {err:#}").red());
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {err:?}").red());
                break;
            }
        }
    }

    Ok(())
}

async fn execute(shell: &mut AppShell<SimulatedMedia>, command: Command) -> Result<()> {
    match command {
        Command::Next | Command::Prev | Command::Scroll(_) | Command::Resize(_) => {
            let Some(feed) = shell.feed_mut() else {
                println!("{}", "Switch to the feed first ('tab feed').".yellow());
                return Ok(());
            };
            match command {
                Command::Next => feed.next().await,
                Command::Prev => feed.prev().await,
                Command::Scroll(delta) => feed.scroll_by(delta).await,
                Command::Resize(height) => feed.resize(height).await,
                _ => None,
            };
        }
        Command::Tap => {
            if let Some(feed) = shell.feed_mut() {
                feed.tap_active().await;
            }
        }
        Command::Like => {
            if let Some(feed) = shell.feed_mut() {
                feed.toggle_like_active();
            }
        }
        Command::Mute => {
            shell.toggle_mute();
        }
        Command::Assistant => {
            if shell.feed().is_none() {
                println!("{}", "The AI assistant lives on the feed.".yellow());
                return Ok(());
            }
            shell.open_assistant();
        }
        Command::CloseAssistant => shell.close_assistant(),
        Command::Tick(elapsed) => {
            if let Some(feed) = shell.feed_mut() {
                feed.tick(elapsed);
            }
        }
        Command::Tab(tab) => shell.select_tab(tab).await?,
        Command::Login { email, password } => {
            if !auth_view_open(shell) {
                return Ok(());
            }
            let form = shell.auth_form_mut();
            form.mode = AuthMode::Login;
            form.email = email;
            form.password = password;
            submit(shell).await;
        }
        Command::Register {
            username,
            email,
            password,
        } => {
            if !auth_view_open(shell) {
                return Ok(());
            }
            let form = shell.auth_form_mut();
            form.mode = AuthMode::Register;
            form.username = username;
            form.email = email;
            form.password = password;
            submit(shell).await;
        }
        Command::Logout => {
            if shell.context().is_authenticated() {
                shell.logout();
            } else {
                println!("{}", "Not signed in.".yellow());
            }
        }
        Command::Show => {}
        Command::Help => {
            println!("{}", HELP.bright_black());
            return Ok(());
        }
        Command::Quit => return Ok(()),
    }

    render::render(shell);
    Ok(())
}

fn auth_view_open(shell: &AppShell<SimulatedMedia>) -> bool {
    let open = shell.view() == View::Auth;
    if !open {
        println!("{}", "Open Inbox or Profile while signed out to use the auth form.".yellow());
    }
    open
}

async fn submit(shell: &mut AppShell<SimulatedMedia>) {
    println!("{}", "Please wait...".bright_black());
    if shell.submit_auth().await == SubmitOutcome::SignedIn {
        println!("{}", "Signed in.".bright_green());
    }
}
