use std::{path::PathBuf, sync::Arc};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    encode_image_file, load_settings, EventGateway, EventPage, EventStore, GraphqlEventGateway,
    InMemoryEventStore, Notifier, PageView, SubmitOutcome, TracingNotifier,
};
use shared::{document::Document, domain::EventId, domain::Occurrence};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Load, edit and save an event's details")]
struct Args {
    #[arg(long)]
    event_id: String,
    /// Settings file; defaults to ./editor.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overrides the configured GraphQL endpoint.
    #[arg(long)]
    graphql_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the event as the details page shows it.
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Stage edits locally, then submit them in one update.
    Edit {
        #[arg(long)]
        title: Option<String>,
        /// Plain text; each line becomes a paragraph.
        #[arg(long)]
        description: Option<String>,
        /// Local image to upload as the new banner.
        #[arg(long)]
        banner: Option<PathBuf>,
        /// Replaces all dates. Repeat for several: `YYYY-MM-DD,HH:MM,HH:MM`.
        #[arg(long = "date")]
        dates: Vec<String>,
        /// Print the mutation input instead of sending it.
        #[arg(long)]
        dry_run: bool,
    },
}

fn parse_date_arg(raw: &str) -> Result<Occurrence> {
    let parts: Vec<&str> = raw.split(',').collect();
    let [date, start, end] = parts.as_slice() else {
        bail!("expected YYYY-MM-DD,HH:MM,HH:MM but got '{raw}'");
    };
    Occurrence::parse(date, start, end).with_context(|| format!("invalid date '{raw}'"))
}

fn print_view(view: &PageView) {
    println!("{}", view.title);
    if view.is_live {
        println!("  [live]");
    }
    for line in &view.dates {
        println!("  {line}");
    }
    if !view.location.is_empty() {
        println!("  at {}", view.location);
    }
    println!("  organized by {}", view.organizer);
    if let Some(banner) = &view.banner {
        let shown: String = banner.chars().take(80).collect();
        println!("  banner {shown}");
    }
    println!();
    println!("{}", view.description);
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref()).context("failed to load settings")?;
    if let Some(url) = args.graphql_url {
        settings.graphql_url = url;
    }

    let gateway = GraphqlEventGateway::from_settings(&settings)?;
    let store = Arc::new(InMemoryEventStore::new());
    let page = EventPage::new(
        EventId::new(args.event_id),
        Arc::new(gateway) as Arc<dyn EventGateway>,
        Arc::clone(&store) as Arc<dyn EventStore>,
        Arc::new(TracingNotifier) as Arc<dyn Notifier>,
    );
    page.load().await.context("failed to load event")?;

    match args.command {
        Command::Show { json } => {
            if json {
                let event = store.selected_event().context("event missing after load")?;
                println!("{}", serde_json::to_string_pretty(&event)?);
            } else {
                print_view(&page.view().await);
            }
        }
        Command::Edit {
            title,
            description,
            banner,
            dates,
            dry_run,
        } => {
            let banner = match banner {
                Some(path) => Some(encode_image_file(&path).await?),
                None => None,
            };
            let dates = dates
                .iter()
                .map(|raw| parse_date_arg(raw))
                .collect::<Result<Vec<_>>>()?;

            let staged = page
                .with_session(|session| {
                    if let Some(title) = title {
                        session.set_title(Document::heading(title));
                    }
                    if let Some(description) = description {
                        session.set_description(Document::from_plain_lines(&description));
                    }
                    if let Some(image) = banner {
                        session.attach_images(vec![image]);
                    }
                    if !dates.is_empty() {
                        session.apply_date_edits(dates)?;
                    }
                    Ok::<_, anyhow::Error>(session.is_dirty())
                })
                .await?;

            if !staged {
                println!("No changes to save.");
                return Ok(());
            }

            if dry_run {
                let input = page
                    .with_session(|session| session.build_update_input())
                    .await?;
                println!("{}", serde_json::to_string_pretty(&input)?);
                return Ok(());
            }

            match page.submit().await? {
                SubmitOutcome::Saved => print_view(&page.view().await),
                SubmitOutcome::Failed => bail!("update was rejected by the server"),
                SubmitOutcome::Ignored => bail!("another update is still in flight"),
            }
        }
    }

    Ok(())
}
