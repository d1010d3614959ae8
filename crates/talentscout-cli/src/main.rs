use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use talentscout_cli::{app, Theme};
use talentscout_core::Settings;

#[derive(Parser)]
#[command(name = "talentscout")]
#[command(about = "TalentScout - hiring assistant chat in the terminal")]
#[command(version)]
struct Cli {
    /// Send a single message and exit
    #[arg(short, long)]
    prompt: Option<String>,

    /// Gemini model to use
    #[arg(short, long)]
    model: Option<String>,

    /// Color theme (scout, paper, contrast)
    #[arg(long)]
    theme: Option<String>,

    /// Settings file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; the key may already be in the environment.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut settings = match cli.config {
        Some(ref path) => Settings::load_from(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => Settings::load(),
    };

    if let Some(ref model) = cli.model {
        settings.llm.model = model.clone();
    }
    if let Some(ref theme) = cli.theme {
        if !Theme::exists(theme) {
            tracing::warn!("unknown theme '{theme}', using dark");
        }
        settings.ui.theme = theme.clone();
    }

    let persona = settings.persona()?;
    let client = settings.build_llm_client()?;

    if let Some(prompt) = cli.prompt {
        app::run_single_prompt(client, persona, &prompt).await?;
    } else {
        app::run_tui(client, persona, &settings.ui.theme).await?;
    }

    Ok(())
}
