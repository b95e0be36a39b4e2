//! Container views and the loop that keeps them rendered.
//!
//! A container re-runs its classify → resolve → load → instantiate sequence
//! whenever the registry snapshot changes *and* whenever the loader reports
//! that a module it rendered inert has become available.

use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, mpsc, watch};

use hubview_domain::registry::RegistrySnapshot;
use hubview_domain::render::RenderNode;

use crate::loader::LoaderEvent;

/// A view that renders from a registry snapshot.
pub trait Container {
    /// Render the full subtree for `registry`.
    fn render(&mut self, registry: &Arc<RegistrySnapshot>, edit_mode: bool) -> RenderNode;

    /// Whether `event` should trigger a re-render.
    fn wants_rerender(&self, event: &LoaderEvent) -> bool;
}

/// Keep `container` rendered until the snapshot sender or the sink goes away.
///
/// `loader_events` must be subscribed before the first render so an import
/// completing in between is not missed.
pub async fn run_container<C: Container>(
    mut container: C,
    mut loader_events: broadcast::Receiver<LoaderEvent>,
    mut snapshots: watch::Receiver<Arc<RegistrySnapshot>>,
    edit_mode: bool,
    sink: mpsc::Sender<RenderNode>,
) {
    let mut loader_open = true;
    loop {
        let registry = Arc::clone(&snapshots.borrow_and_update());
        let tree = container.render(&registry, edit_mode);
        if sink.send(tree).await.is_err() {
            tracing::debug!("render sink closed, stopping container");
            return;
        }

        loop {
            tokio::select! {
                changed = snapshots.changed() => {
                    if changed.is_err() {
                        tracing::debug!("snapshot store dropped, stopping container");
                        return;
                    }
                    break;
                }
                event = loader_events.recv(), if loader_open => match event {
                    Ok(event) if container.wants_rerender(&event) => break,
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "container lagged behind loader, re-rendering");
                        break;
                    }
                    Err(RecvError::Closed) => loader_open = false,
                },
            }
        }
    }
}
