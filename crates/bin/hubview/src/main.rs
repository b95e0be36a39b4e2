//! # hubview: render the detail views of a registry snapshot
//!
//! Composition root that wires the built-in view modules into the lazy
//! loader and renders the configured entities.
//!
//! ## Responsibilities
//! - Parse configuration (env vars, config file)
//! - Install the `tracing` subscriber (stderr, so stdout stays clean)
//! - Load the registry snapshot into the snapshot store
//! - Construct the module importer adapter and the view loader
//! - Render each entity's more-info view (group content for groups),
//!   wait for pending imports to settle, re-render, and print the result
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer: no domain logic belongs here.

mod config;

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;
use serde::Serialize;
use tokio::sync::broadcast::error::TryRecvError;
use tracing_subscriber::EnvFilter;

use hubview_adapter_builtin::BuiltinModules;
use hubview_app::container::Container;
use hubview_app::element_registry::ElementRegistry;
use hubview_app::group_content::GroupContent;
use hubview_app::loader::ViewLoader;
use hubview_app::more_info::MoreInfoContent;
use hubview_app::snapshot_store::SnapshotStore;
use hubview_domain::classify::domain_of;
use hubview_domain::registry::RegistrySnapshot;
use hubview_domain::render::RenderNode;

use crate::config::{Config, OutputFormat};

const GROUP_DOMAIN: &str = "group";

type Loader = ViewLoader<BuiltinModules>;

#[derive(Serialize)]
struct RenderedView {
    entity_id: String,
    view: RenderNode,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;
    init_tracing(&config.logging.filter);

    let snapshot = load_snapshot(Path::new(&config.snapshot.path))?;
    tracing::info!(
        path = %config.snapshot.path,
        entities = snapshot.len(),
        "registry snapshot loaded"
    );
    let store = SnapshotStore::new(snapshot);

    let importer = BuiltinModules::new()
        .with_import_delay(config.import_delay())
        .with_disabled(config.loader.disabled_views.iter().cloned());
    let loader = Arc::new(ViewLoader::new(importer, ElementRegistry::new()));

    let entities: Vec<String> = if config.render.entities.is_empty() {
        store
            .current()
            .entity_ids()
            .into_iter()
            .map(String::from)
            .collect()
    } else {
        config.render.entities.clone()
    };

    let mut rendered = Vec::with_capacity(entities.len());
    for entity_id in entities {
        let view = if domain_of(&entity_id) == GROUP_DOMAIN {
            let content = GroupContent::new(Arc::clone(&loader), entity_id.as_str());
            render_settled(content, &loader, &store, &config).await
        } else {
            let content = MoreInfoContent::new(Arc::clone(&loader), entity_id.as_str());
            render_settled(content, &loader, &store, &config).await
        };
        rendered.push(RenderedView { entity_id, view });
    }

    print(&rendered, config.render.format).context("failed to write output")
}

fn init_tracing(filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_snapshot(path: &Path) -> anyhow::Result<RegistrySnapshot> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse snapshot {}", path.display()))
}

/// Render once, wait for the imports that render started, then render again
/// if any of them produced a module the container was waiting for.
#[tracing::instrument(skip_all)]
async fn render_settled<C: Container>(
    mut container: C,
    loader: &Loader,
    store: &SnapshotStore,
    config: &Config,
) -> RenderNode {
    let edit_mode = config.render.edit_mode;
    let mut events = loader.subscribe();
    let tree = container.render(&store.current(), edit_mode);

    if tokio::time::timeout(config.settle_timeout(), loader.settled())
        .await
        .is_err()
    {
        tracing::warn!(
            timeout_ms = config.render.settle_timeout_ms,
            "imports still pending, printing inert views"
        );
    }

    let mut rerender = false;
    loop {
        match events.try_recv() {
            Ok(event) => rerender |= container.wants_rerender(&event),
            Err(TryRecvError::Lagged(_)) => rerender = true,
            Err(TryRecvError::Empty | TryRecvError::Closed) => break,
        }
    }
    if rerender {
        container.render(&store.current(), edit_mode)
    } else {
        tree
    }
}

fn print(rendered: &[RenderedView], format: OutputFormat) -> anyhow::Result<()> {
    let mut out = std::io::stdout().lock();
    match format {
        OutputFormat::Outline => {
            for view in rendered {
                writeln!(out, "# {}", view.entity_id)?;
                write!(out, "{}", view.view)?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, rendered)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
