use std::path::PathBuf;

mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use client_core::load_settings;
use crossbeam_channel::bounded;
use eframe::egui;
use shared::domain::EventId;
use tracing_subscriber::EnvFilter;

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;
use ui::EventPageApp;

#[derive(Parser, Debug, Clone)]
#[command(about = "Event details editor")]
struct StartupConfig {
    #[arg(long)]
    event_id: String,
    /// Settings file; defaults to ./editor.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overrides the configured GraphQL endpoint.
    #[arg(long)]
    graphql_url: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let startup = StartupConfig::parse();

    let mut settings = load_settings(startup.config.as_deref())?;
    if let Some(url) = startup.graphql_url {
        settings.graphql_url = url;
    }
    let saved_affordance = settings.saved_affordance();

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(1024);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, EventId::new(startup.event_id), settings);
    // Queued before the window exists so the fetch starts with the page.
    cmd_tx
        .try_send(BackendCommand::LoadEvent)
        .map_err(|err| anyhow::anyhow!("failed to queue initial load: {err}"))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Event Details")
            .with_inner_size([960.0, 720.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Event Details",
        options,
        Box::new(move |_cc| Ok(Box::new(EventPageApp::new(cmd_tx, ui_rx, saved_affordance)))),
    )
    .map_err(|err| anyhow::anyhow!("failed to run event editor window: {err}"))
}
