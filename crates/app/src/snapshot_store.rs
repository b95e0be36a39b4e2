//! Snapshot store: the single writer of the registry snapshot.
//!
//! Backed by a tokio [`watch`] channel: every update swaps in a whole new
//! `Arc<RegistrySnapshot>`, readers always observe a complete snapshot and
//! are woken when a newer one is published.

use std::sync::Arc;

use tokio::sync::watch;

use hubview_domain::entity::EntityState;
use hubview_domain::registry::RegistrySnapshot;

/// Owner of the live registry snapshot.
pub struct SnapshotStore {
    sender: watch::Sender<Arc<RegistrySnapshot>>,
}

impl SnapshotStore {
    /// Create a store holding `initial`.
    #[must_use]
    pub fn new(initial: RegistrySnapshot) -> Self {
        let (sender, _) = watch::channel(Arc::new(initial));
        Self { sender }
    }

    /// The latest snapshot.
    #[must_use]
    pub fn current(&self) -> Arc<RegistrySnapshot> {
        Arc::clone(&self.sender.borrow())
    }

    /// A read-only handle notified on every replacement.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Arc<RegistrySnapshot>> {
        self.sender.subscribe()
    }

    /// Replace the states in `batch` and publish the new snapshot.
    ///
    /// The read-modify-write happens under the channel's write lock, so
    /// concurrent writers never drop each other's batches.
    #[tracing::instrument(skip_all)]
    pub fn apply<I>(&self, batch: I) -> Arc<RegistrySnapshot>
    where
        I: IntoIterator<Item = EntityState>,
    {
        let next = self.update(|current| current.with_states(batch));
        tracing::debug!(entities = next.len(), "published registry snapshot");
        next
    }

    /// Remove entities and publish the new snapshot.
    pub fn remove<I, S>(&self, entity_ids: I) -> Arc<RegistrySnapshot>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.update(|current| current.without(entity_ids))
    }

    /// Publish a wholly new snapshot.
    pub fn replace(&self, snapshot: RegistrySnapshot) {
        // `send_replace` succeeds even when nobody is subscribed.
        self.sender.send_replace(Arc::new(snapshot));
    }

    fn update<F>(&self, derive: F) -> Arc<RegistrySnapshot>
    where
        F: FnOnce(&RegistrySnapshot) -> RegistrySnapshot,
    {
        let mut published = None;
        self.sender.send_modify(|snapshot| {
            let next = Arc::new(derive(&**snapshot));
            published = Some(Arc::clone(&next));
            *snapshot = next;
        });
        published.unwrap_or_else(|| self.current())
    }
}
