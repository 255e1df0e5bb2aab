// Mood Journal - client entry point
// Loads settings, mounts the journal and prints it; `analyze` also requests AI insights.

use anyhow::Context;
use moodjournal::app::{self, AppState};
use moodjournal::config::{API_URL_ENV, CONFIG_DIR_ENV};
use moodjournal::services::SettingsService;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "moodjournal=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting Mood Journal client");

    let config_dir = std::env::var_os(CONFIG_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    let mut settings = SettingsService::new(config_dir)
        .load()
        .await
        .context("Failed to load settings")?;

    if let Ok(api_url) = std::env::var(API_URL_ENV) {
        settings.api_url = api_url;
        settings = settings.validated()?;
    }

    let state = app::setup(&settings).await?;

    print_entries(&state).await;

    if std::env::args().nth(1).as_deref() == Some("analyze") {
        print_analysis(&state).await?;
    }

    Ok(())
}

async fn print_entries(state: &AppState) {
    let entries = state.entries.list().await;

    if entries.is_empty() {
        println!("No moods yet. Add your first one!");
        return;
    }

    for entry in entries {
        let label = entry.option().map(|o| o.label).unwrap_or(entry.mood.as_str());
        let date = entry.created_at.format("%Y-%m-%d");
        if entry.note.is_empty() {
            println!("{}  {} {}", date, entry.emoji(), label);
        } else {
            println!("{}  {} {}  {}", date, entry.emoji(), label, entry.note);
        }
    }
}

async fn print_analysis(state: &AppState) -> anyhow::Result<()> {
    if !state.can_request_analysis().await {
        println!("Nothing to analyze yet.");
        return Ok(());
    }

    let outcome = state.analysis.request_analysis().await?;

    if let Some(text) = outcome.display_text() {
        println!();
        println!("{}", text);
    }
    if let Some(label) = outcome.model_label() {
        println!("Powered by {}", label);
    }

    Ok(())
}
