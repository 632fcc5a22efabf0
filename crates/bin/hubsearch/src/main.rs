//! # hubsearch — interactive entity search
//!
//! Composition root that wires a host source to the entity index service
//! and drives one search card from stdin.
//!
//! ## Responsibilities
//! - Parse configuration (env vars, config file)
//! - Initialize tracing
//! - Construct the source adapter (virtual home or JSON snapshot)
//! - Construct the index service and the card, injecting adapters via port traits
//! - Forward live state changes to the index
//! - Debounce typed text, run queries and print the card
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod command;
mod config;
mod render;

use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{broadcast, mpsc};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tracing_subscriber::EnvFilter;

use hubsearch_adapter_json::JsonRegistry;
use hubsearch_adapter_virtual::{StateChanged, VirtualHome};
use hubsearch_app::debounce::debounce;
use hubsearch_app::event_bus::InProcessEventBus;
use hubsearch_app::ports::{LiveStateSource, RegistrySource};
use hubsearch_app::services::{EntityIndexService, SearchCard};
use hubsearch_app::usage_cache::InMemoryUsageCache;
use hubsearch_domain::config::CardConfig;
use hubsearch_domain::selection::EntitySelected;

use command::Command;
use config::{Config, SourceKind};

/// The concrete host behind the source, for commands that act on it.
enum Host {
    Virtual(Arc<VirtualHome>),
    Json(Arc<JsonRegistry>),
}

type Service<S> = EntityIndexService<Arc<S>, Arc<S>, InMemoryUsageCache, Arc<InProcessEventBus>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .with_writer(std::io::stderr)
        .init();

    let card = config.card_config()?;

    match config.source.kind {
        SourceKind::Virtual => {
            let home = Arc::new(VirtualHome::default());
            let changes = home.subscribe();
            tracing::info!("using the virtual demo home");
            run(Arc::clone(&home), Host::Virtual(home), Some(changes), card).await
        }
        SourceKind::Json => {
            let path = config
                .source
                .path
                .context("source.path is required for the json source")?;
            let text = tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("failed to read snapshot {}", path.display()))?;
            let registry = Arc::new(JsonRegistry::from_json(&text));
            tracing::info!(path = %path.display(), "using json snapshot");
            run(Arc::clone(&registry), Host::Json(registry), None, card).await
        }
    }
}

async fn run<S>(
    source: Arc<S>,
    host: Host,
    changes: Option<broadcast::Receiver<StateChanged>>,
    card_config: CardConfig,
) -> anyhow::Result<()>
where
    S: RegistrySource + LiveStateSource + Send + Sync + 'static,
{
    let bus = Arc::new(InProcessEventBus::new(64));
    let selections = bus.subscribe();
    let window = card_config.debounce();

    let service: Arc<Service<S>> = Arc::new(EntityIndexService::new(
        card_config,
        Arc::clone(&source),
        source,
        InMemoryUsageCache::default(),
        Arc::clone(&bus),
    ));

    let status = service.load().await;
    tracing::info!(?status, "index ready");

    if let Some(changes) = changes {
        tokio::spawn(forward_changes(Arc::clone(&service), changes));
    }
    tokio::spawn(print_selections(selections));

    let index = Arc::clone(&service);
    let mut card = SearchCard::new(service);
    print!("{}", render::view(&card.refresh().await));

    let (typed_tx, typed_rx) = mpsc::unbounded_channel();
    let mut settled = debounce(window, typed_rx);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read stdin")? else {
                    break;
                };
                match Command::parse(&line) {
                    Command::Search(text) => {
                        let generation = card.input(text);
                        let _ = typed_tx.send(generation);
                    }
                    Command::Domain(domain) => {
                        card.toggle_domain(domain);
                        print!("{}", render::view(&card.refresh().await));
                    }
                    Command::Area(area) => {
                        card.toggle_area(area);
                        print!("{}", render::view(&card.refresh().await));
                    }
                    Command::More => {
                        if card.load_more() {
                            print!("{}", render::view(&card.refresh().await));
                        }
                    }
                    Command::Clear => {
                        card.clear();
                        print!("{}", render::view(&card.view()));
                    }
                    Command::Open(entity_id) => {
                        if card.click(&entity_id).await.is_none() {
                            tracing::warn!(%entity_id, "no such entity in the index");
                        }
                    }
                    Command::Call { service, entity_id } => {
                        call_service(&host, &service, &entity_id);
                    }
                    Command::States(document) => {
                        if apply_states(&host, &document) && index.on_state_changed().await {
                            print!("{}", render::view(&card.refresh().await));
                        }
                    }
                    Command::Quit => break,
                    Command::Unknown(line) => tracing::warn!(%line, "unknown command"),
                }
            }
            Some(generation) = settled.recv() => {
                if generation == card.session().generation() {
                    print!("{}", render::view(&card.refresh().await));
                }
            }
        }
    }

    drop(typed_tx);
    while let Some(generation) = settled.recv().await {
        if generation == card.session().generation() {
            print!("{}", render::view(&card.refresh().await));
        }
    }
    Ok(())
}

fn call_service(host: &Host, service: &str, entity_id: &str) {
    let Host::Virtual(home) = host else {
        tracing::warn!("service calls are only available on the virtual home");
        return;
    };
    if let Err(err) = home.call_service(entity_id, service) {
        tracing::warn!(error = %err, "service call failed");
    }
}

/// Merge a `states` document into the snapshot. Returns `true` when applied.
fn apply_states(host: &Host, document: &str) -> bool {
    let Host::Json(registry) = host else {
        tracing::warn!("state updates are only available on a json snapshot");
        return false;
    };
    let document: serde_json::Value = match serde_json::from_str(document) {
        Ok(document) => document,
        Err(err) => {
            tracing::warn!(error = %err, "state update is not valid json");
            return false;
        }
    };
    match registry.apply_states(&document) {
        Ok(count) => {
            tracing::debug!(count, "states applied");
            true
        }
        Err(err) => {
            tracing::warn!(error = %err, "state update rejected");
            false
        }
    }
}

async fn forward_changes<S>(service: Arc<Service<S>>, changes: broadcast::Receiver<StateChanged>)
where
    S: RegistrySource + LiveStateSource + Send + Sync + 'static,
{
    let mut stream = BroadcastStream::new(changes);
    while let Some(change) = stream.next().await {
        match change {
            Ok(change) => {
                tracing::debug!(entity_id = %change.entity_id, state = %change.state, "state changed");
            }
            Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "state change notifications lagged");
            }
        }
        if service.on_state_changed().await {
            tracing::debug!("index refreshed from live state");
        }
    }
}

async fn print_selections(selections: broadcast::Receiver<EntitySelected>) {
    let mut stream = BroadcastStream::new(selections);
    while let Some(selected) = stream.next().await {
        let Ok(selected) = selected else {
            continue;
        };
        match render::selection(&selected) {
            Ok(line) => println!("{line}"),
            Err(err) => tracing::error!(error = %err, "failed to serialize selection"),
        }
    }
}
