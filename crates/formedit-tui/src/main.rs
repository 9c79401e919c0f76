//! formedit - edit a form in the terminal
//!
//! # Usage
//!
//! ```bash
//! # Edit a form; the saved form is printed on stdout
//! formedit forms/general_message.json
//!
//! # Write the result to a file and log to another
//! formedit forms/general_message.json --output saved.json --log-file formedit.log
//!
//! # Without mouse capture (keeps the terminal's own selection working)
//! formedit forms/general_message.json --no-mouse
//! ```

use anyhow::Context;
use clap::Parser;
use formedit_forms::{load_form, SaveStatus, ValidatorRegistry};
use formedit_tui::{Capabilities, ColorDepth, Editor, EditorConfig, Outcome, RunOptions, Theme};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "formedit")]
#[command(author, version, about = "Terminal editor for structured forms")]
struct Args {
    /// Form definition (JSON)
    form: PathBuf,

    /// Write the saved form here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Config file (default: <config dir>/formedit/config.yaml)
    #[arg(short, long, env = "FORMEDIT_CONFIG")]
    config: Option<PathBuf>,

    /// Append logs to this file
    #[arg(long, env = "FORMEDIT_LOG")]
    log_file: Option<PathBuf>,

    /// Do not capture the mouse
    #[arg(long)]
    no_mouse: bool,

    /// Tick interval in milliseconds
    #[arg(long, default_value = "250")]
    tick_ms: u64,
}

/// Log to a file; the terminal belongs to the editor.
fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let config = EditorConfig::resolve(args.config.as_deref())?;
    let depth = ColorDepth::detect();
    let theme = config
        .theme
        .clone()
        .unwrap_or_else(|| Theme::for_depth(depth));

    let registry = ValidatorRegistry::with_builtins();
    let form = load_form(&args.form, &registry)?;
    let title = form.title().to_string();

    let options = RunOptions {
        tick_rate: Duration::from_millis(args.tick_ms.max(10)),
        capabilities: Capabilities {
            mouse: config.mouse && !args.no_mouse,
            color_depth: depth,
        },
    };
    let mut editor = Editor::new(form, &title, theme, &config);
    formedit_tui::run(&mut editor, &options).await?;

    let status = match editor.outcome() {
        Some(Outcome::Send) => SaveStatus::Ready,
        Some(Outcome::Draft) | None => SaveStatus::Draft,
    };
    let saved = editor.into_message().to_saved(status);
    let json = serde_json::to_string_pretty(&saved)?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, json + "\n")
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), status = status.label(), "saved form");
        }
        None => println!("{json}"),
    }
    Ok(())
}
