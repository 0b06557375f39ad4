use anyhow::Context;
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn, Level};
use vf_core::{Error, SelectedFile, Service};
use vf_ui::view::plain::render_panel;
use vf_ui::{Controller, ResultPanel};
use vf_web::AppState;

mod duration;

use duration::HumanDuration;

#[derive(Parser, Debug)]
#[command(author, version, about = "Check text and images against the VerifAI detection services", long_about = None)]
pub struct Cli {
    /// Base URL of the text detection service.
    #[arg(long, global = true)]
    text_url: Option<String>,
    /// Base URL of the image detection service.
    #[arg(long, global = true)]
    image_url: Option<String>,
    /// Give up on a backend after this long (e.g. 30s, 1m30s). Waits indefinitely when unset.
    #[arg(long, global = true)]
    timeout: Option<HumanDuration>,
    /// Where the theme preference is kept: memory or file.
    #[arg(long, global = true, default_value = "file")]
    prefs: String,
    #[arg(long, global = true)]
    prefs_path: Option<PathBuf>,
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Verify a piece of text.
    Text { text: String },
    /// Verify an image file.
    Image { path: PathBuf },
    /// Print the saved theme, or save a new one.
    Theme { name: Option<String> },
    /// Probe both detection services.
    Health,
    /// Serve the web page.
    Serve {
        #[arg(long, default_value = "127.0.0.1:8080")]
        addr: SocketAddr,
    },
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn client_config(cli: &Cli) -> vf_client::Config {
    let defaults = vf_client::Config::default();
    vf_client::Config {
        text_url: cli.text_url.clone().unwrap_or(defaults.text_url),
        image_url: cli.image_url.clone().unwrap_or(defaults.image_url),
        timeout: cli.timeout.map(|t| t.0),
    }
}

/// Prints a finished panel. Returns false for a failed one.
fn report(panel: &ResultPanel) -> bool {
    println!("{}", render_panel(panel));
    !matches!(panel, ResultPanel::Failed(_))
}

/// Validation errors have already become the page alert; print it instead of bailing.
async fn settle(controller: &Controller, outcome: vf_core::Result<ResultPanel>) -> anyhow::Result<bool> {
    match outcome {
        Ok(panel) => Ok(report(&panel)),
        Err(Error::Validation(message)) => {
            eprintln!("⚠️ {}", message);
            controller.dismiss_alert().await;
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}

async fn run(cli: Cli) -> anyhow::Result<bool> {
    let verifier = vf_client::create_verifier(&client_config(&cli))
        .context("Invalid detection service URL")?;
    let preferences = vf_storage::create_store(&cli.prefs, cli.prefs_path.as_deref())
        .context("Could not open preference store")?;

    match cli.command {
        Commands::Text { text } => {
            let controller = Controller::new(verifier, preferences);
            settle(&controller, controller.verify_text(&text).await).await
        }
        Commands::Image { path } => {
            let controller = Controller::new(verifier, preferences);
            let file = SelectedFile::read(&path)
                .await
                .with_context(|| format!("Could not read {}", path.display()))?;
            controller.on_file_selected(file).await?;
            settle(&controller, controller.verify_image().await).await
        }
        Commands::Theme { name } => {
            let controller = Controller::new(verifier, preferences);
            let theme = match name {
                Some(name) => {
                    controller.set_theme(name.as_str()).await?;
                    controller.snapshot().await.theme
                }
                None => controller.load_theme().await?,
            };
            if !theme.is_builtin() {
                warn!("⚠️ {} is not one of the built-in themes", theme);
            }
            println!("{}", theme);
            Ok(true)
        }
        Commands::Health => {
            let statuses = vf_client::probe_all(verifier.as_ref()).await;
            for status in &statuses {
                let mark = if status.reachable { "✅" } else { "❌" };
                let detail = match (&status.http_status, &status.error) {
                    (_, Some(error)) => error.clone(),
                    (Some(code), None) => format!("HTTP {}", code),
                    (None, None) => String::new(),
                };
                println!("{} {} ({}) {}", mark, status.service, status.endpoint, detail);
            }
            info!("🩺 {}", serde_json::to_string(&statuses)?);
            Ok(statuses.iter().all(|s| s.reachable))
        }
        Commands::Serve { addr } => {
            let state = AppState::new(verifier, preferences);
            let theme = state.controller.load_theme().await?;
            info!("🎨 Restored theme {}", theme);
            for service in Service::ALL {
                info!("🔗 {} at {}", service, state.controller.verifier().endpoint(service));
            }
            vf_web::serve(addr, state).await?;
            Ok(true)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
