use anyhow::{Context, Result};
use clap::Parser;
use std::{net::SocketAddr, path::PathBuf};
use talentscout_core::{constants::ui, ChatSession, Settings};
use talentscout_web::{app, AppState};

#[derive(Parser)]
#[command(name = "talentscout-web")]
#[command(about = "TalentScout - hiring assistant chat in the browser")]
#[command(version)]
struct Cli {
    /// Address to bind the HTTP server
    #[arg(long, default_value = ui::DEFAULT_WEB_ADDR)]
    addr: String,

    /// Gemini model to use
    #[arg(short, long)]
    model: Option<String>,

    /// Settings file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut settings = match cli.config {
        Some(ref path) => Settings::load_from(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => Settings::load(),
    };
    if let Some(model) = cli.model {
        settings.llm.model = model;
    }

    let client = settings.build_llm_client()?;
    let session = ChatSession::new(client, settings.persona()?);
    let app = app(AppState::new(session));

    let addr: SocketAddr = cli.addr.parse()?;
    tracing::info!("{} listening on http://{addr}", ui::TITLE);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
