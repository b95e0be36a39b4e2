//! Lazy loader: import each view module at most once, in the background.
//!
//! [`ViewLoader::ensure_loaded`] is a fire-and-forget "warm the cache"
//! operation: the first call for a view type spawns the import, every later
//! call is a no-op whatever the outcome. Callers render optimistically and
//! re-render when a [`LoaderEvent`] reports the module as available.
//!
//! Per view type the loader moves `NotRequested → Requested →
//! (ModuleAvailable | ImportFailed)` and never goes back. Import failures
//! are swallowed here, including an importer that panics: the tag simply
//! stays undefined and renders inert.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{broadcast, watch};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::{Stream, StreamExt};

use crate::element_registry::ElementRegistry;
use crate::ports::ModuleImporter;

/// Outcome notifications published by the loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoaderEvent {
    /// The module for this view type is imported and its elements defined.
    ModuleAvailable(String),
    /// The import for this view type failed; its elements stay inert.
    ImportFailed(String),
}

impl LoaderEvent {
    #[must_use]
    pub fn view_type(&self) -> &str {
        match self {
            Self::ModuleAvailable(view) | Self::ImportFailed(view) => view,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadState {
    Requested,
    ModuleAvailable,
    ImportFailed,
}

type LoadStates = Arc<Mutex<HashMap<String, LoadState>>>;

/// Memoizing, non-blocking importer of view modules.
pub struct ViewLoader<I> {
    importer: Arc<I>,
    elements: ElementRegistry,
    states: LoadStates,
    events: broadcast::Sender<LoaderEvent>,
    in_flight: Arc<watch::Sender<usize>>,
}

impl<I: ModuleImporter> ViewLoader<I> {
    /// Create a loader registering imported elements into `elements`.
    pub fn new(importer: I, elements: ElementRegistry) -> Self {
        let (events, _) = broadcast::channel(64);
        let (in_flight, _) = watch::channel(0);
        Self {
            importer: Arc::new(importer),
            elements,
            states: Arc::default(),
            events,
            in_flight: Arc::new(in_flight),
        }
    }

    /// The registry imported elements are defined into.
    #[must_use]
    pub fn elements(&self) -> &ElementRegistry {
        &self.elements
    }

    /// Start importing the module for `view_type` unless it was already
    /// requested. Returns immediately.
    pub fn ensure_loaded(&self, view_type: &str) {
        {
            let mut states = self.states.lock().unwrap_or_else(PoisonError::into_inner);
            if states.contains_key(view_type) {
                return;
            }
            states.insert(view_type.to_string(), LoadState::Requested);
        }

        let view_type = view_type.to_string();
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::error!(%view_type, "no async runtime available, view module cannot be imported");
            settle(&self.states, &self.events, view_type, LoadState::ImportFailed);
            return;
        };

        tracing::debug!(%view_type, "importing view module");
        self.in_flight.send_modify(|count| *count += 1);

        let importer = Arc::clone(&self.importer);
        let elements = self.elements.clone();
        let states = Arc::clone(&self.states);
        let events = self.events.clone();
        let in_flight = Arc::clone(&self.in_flight);
        let import = {
            let view_type = view_type.clone();
            runtime.spawn(async move { importer.import(&view_type).await })
        };
        runtime.spawn(async move {
            let outcome = match import.await {
                Ok(Ok(module)) => {
                    let tags = module.tags().join(",");
                    for (tag, factory) in module.into_definitions() {
                        elements.define(tag, factory);
                    }
                    tracing::info!(%view_type, %tags, "view module available");
                    LoadState::ModuleAvailable
                }
                Ok(Err(err)) => {
                    tracing::warn!(%view_type, error = %err, "view module import failed, rendering inert");
                    LoadState::ImportFailed
                }
                Err(err) => {
                    tracing::error!(%view_type, error = %err, "view module import aborted, rendering inert");
                    LoadState::ImportFailed
                }
            };
            settle(&states, &events, view_type, outcome);
            in_flight.send_modify(|count| *count -= 1);
        });
    }

    /// Subscribe to load outcomes published after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<LoaderEvent> {
        self.events.subscribe()
    }

    /// Load outcomes as a stream; lagged notifications are skipped.
    pub fn events(&self) -> impl Stream<Item = LoaderEvent> + Send + 'static {
        BroadcastStream::new(self.events.subscribe()).filter_map(|result| match result {
            Ok(event) => Some(event),
            Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "loader subscriber lagged, some notifications were dropped");
                None
            }
        })
    }

    /// Wait until no import is in flight.
    pub async fn settled(&self) {
        let mut rx = self.in_flight.subscribe();
        // The sender lives in `self`, so the channel cannot close while we wait.
        let _ = rx.wait_for(|count| *count == 0).await;
    }

    #[cfg(test)]
    fn state(&self, view_type: &str) -> Option<LoadState> {
        self.states
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(view_type)
            .copied()
    }
}

fn settle(
    states: &LoadStates,
    events: &broadcast::Sender<LoaderEvent>,
    view_type: String,
    outcome: LoadState,
) {
    states
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(view_type.clone(), outcome);
    let event = match outcome {
        LoadState::ModuleAvailable => LoaderEvent::ModuleAvailable(view_type),
        LoadState::Requested | LoadState::ImportFailed => LoaderEvent::ImportFailed(view_type),
    };
    // No subscriber is fine: nobody is waiting to re-render.
    let _ = events.send(event);
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use hubview_domain::error::ImportError;
    use hubview_domain::render::{Props, RenderNode};

    use super::*;
    use crate::instantiator::instantiate;
    use crate::ports::ViewModule;

    /// Importer counting calls; knows `light` and `climate` only.
    #[derive(Default)]
    struct CountingImporter {
        calls: AtomicUsize,
    }

    impl ModuleImporter for CountingImporter {
        async fn import(&self, view_type: &str) -> Result<ViewModule, ImportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(5)).await;
            match view_type {
                "light" | "climate" => Ok(ViewModule::new().define(
                    format!("more-info-{view_type}"),
                    Arc::new(|_: &Props| vec![RenderNode::text("span", "loaded")]),
                )),
                other => Err(ImportError::ModuleNotFound(other.to_string())),
            }
        }
    }

    fn make_loader() -> (ViewLoader<Arc<CountingImporter>>, Arc<CountingImporter>) {
        let importer = Arc::new(CountingImporter::default());
        let loader = ViewLoader::new(Arc::clone(&importer), ElementRegistry::new());
        (loader, importer)
    }

    #[tokio::test]
    async fn should_import_once_for_repeated_requests() {
        let (loader, importer) = make_loader();

        for _ in 0..10 {
            loader.ensure_loaded("light");
        }
        loader.settled().await;
        loader.ensure_loaded("light");
        loader.settled().await;

        assert_eq!(importer.calls.load(Ordering::SeqCst), 1);
        assert!(loader.elements().is_defined("more-info-light"));
        assert_eq!(loader.state("light"), Some(LoadState::ModuleAvailable));
    }

    #[tokio::test]
    async fn should_coalesce_requests_from_two_consumers_in_same_task() {
        let (loader, importer) = make_loader();
        let loader = Arc::new(loader);
        let first = Arc::clone(&loader);
        let second = Arc::clone(&loader);

        first.ensure_loaded("climate");
        second.ensure_loaded("climate");
        loader.settled().await;

        assert_eq!(importer.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn should_not_block_the_caller() {
        let (loader, _) = make_loader();
        loader.ensure_loaded("light");
        assert_eq!(loader.state("light"), Some(LoadState::Requested));
        assert!(!loader.elements().is_defined("more-info-light"));
        loader.settled().await;
        assert!(loader.elements().is_defined("more-info-light"));
    }

    #[tokio::test]
    async fn should_publish_module_available() {
        let (loader, _) = make_loader();
        let mut rx = loader.subscribe();

        loader.ensure_loaded("light");

        assert_eq!(
            rx.recv().await.unwrap(),
            LoaderEvent::ModuleAvailable("light".to_string())
        );
    }

    #[tokio::test]
    async fn should_swallow_failed_import_and_render_inert() {
        let (loader, importer) = make_loader();
        let mut rx = loader.subscribe();

        loader.ensure_loaded("nonexistent_type");
        let event = rx.recv().await.unwrap();
        assert_eq!(event, LoaderEvent::ImportFailed("nonexistent_type".to_string()));
        assert_eq!(event.view_type(), "nonexistent_type");

        let node = instantiate(
            loader.elements(),
            "more-info-nonexistent_type",
            Props::new(),
        );
        assert!(!node.upgraded);

        loader.ensure_loaded("nonexistent_type");
        loader.settled().await;
        assert_eq!(importer.calls.load(Ordering::SeqCst), 1);
        assert_eq!(loader.state("nonexistent_type"), Some(LoadState::ImportFailed));
    }

    #[tokio::test]
    async fn should_stream_events() {
        let (loader, _) = make_loader();
        let mut events = Box::pin(loader.events());

        loader.ensure_loaded("climate");

        assert_eq!(
            events.next().await,
            Some(LoaderEvent::ModuleAvailable("climate".to_string()))
        );
    }

    #[test]
    fn should_fail_gracefully_without_runtime() {
        let (loader, importer) = make_loader();
        let mut rx = loader.subscribe();

        loader.ensure_loaded("light");

        assert_eq!(
            rx.try_recv().unwrap(),
            LoaderEvent::ImportFailed("light".to_string())
        );
        assert_eq!(importer.calls.load(Ordering::SeqCst), 0);
    }

    struct PanickingImporter;

    impl ModuleImporter for PanickingImporter {
        async fn import(&self, view_type: &str) -> Result<ViewModule, ImportError> {
            panic!("importer crashed on {view_type}");
        }
    }

    #[tokio::test]
    async fn should_settle_as_failed_when_importer_panics() {
        let loader = ViewLoader::new(PanickingImporter, ElementRegistry::new());
        let mut rx = loader.subscribe();

        loader.ensure_loaded("light");

        tokio::time::timeout(Duration::from_secs(1), loader.settled())
            .await
            .expect("loader should settle after a panicking import");
        assert_eq!(
            rx.try_recv().unwrap(),
            LoaderEvent::ImportFailed("light".to_string())
        );
        assert_eq!(loader.state("light"), Some(LoadState::ImportFailed));
        assert!(!loader.elements().is_defined("more-info-light"));
    }

    #[tokio::test]
    async fn should_return_immediately_when_nothing_in_flight() {
        let (loader, _) = make_loader();
        loader.settled().await;
    }
}
