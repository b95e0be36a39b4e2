//! Registry snapshot: every known entity state at one moment.
//!
//! Snapshots are values: updating one produces a new snapshot and leaves the
//! old one untouched, so a view holding an `Arc<RegistrySnapshot>` never sees
//! a half-applied batch.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::entity::EntityState;

/// Immutable map of entity id → [`EntityState`], plus the set of backend
/// components that are loaded (`history`, `logbook`, …).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrySnapshot {
    states: HashMap<String, Arc<EntityState>>,
    components: BTreeSet<String>,
}

impl RegistrySnapshot {
    /// Build a snapshot from a list of states and loaded components.
    ///
    /// Later states win when the same id appears twice.
    #[must_use]
    pub fn from_states<S, C>(states: S, components: C) -> Self
    where
        S: IntoIterator<Item = EntityState>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            states: states
                .into_iter()
                .map(|state| (state.entity_id.to_string(), Arc::new(state)))
                .collect(),
            components: components.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn get(&self, entity_id: &str) -> Option<&Arc<EntityState>> {
        self.states.get(entity_id)
    }

    #[must_use]
    pub fn contains(&self, entity_id: &str) -> bool {
        self.states.contains_key(entity_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Iterate over all states in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<EntityState>> {
        self.states.values()
    }

    /// Entity ids in sorted order.
    #[must_use]
    pub fn entity_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.states.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Whether the backend reports `component` as loaded.
    #[must_use]
    pub fn is_component_loaded(&self, component: &str) -> bool {
        self.components.contains(component)
    }

    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.components.iter().map(String::as_str)
    }

    /// Return a new snapshot where every state in `batch` replaces the
    /// previous state with the same id.
    #[must_use]
    pub fn with_states<I>(&self, batch: I) -> Self
    where
        I: IntoIterator<Item = EntityState>,
    {
        let mut next = self.clone();
        for state in batch {
            next.states
                .insert(state.entity_id.to_string(), Arc::new(state));
        }
        next
    }

    /// Return a new snapshot without the given entities.
    #[must_use]
    pub fn without<I, S>(&self, entity_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut next = self.clone();
        for id in entity_ids {
            next.states.remove(id.as_ref());
        }
        next
    }

    /// Return a new snapshot with a different set of loaded components.
    #[must_use]
    pub fn with_components<C>(&self, components: C) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            states: self.states.clone(),
            components: components.into_iter().map(Into::into).collect(),
        }
    }
}

/// Serialized shape: `{ "states": [...], "components": [...] }`.
#[derive(Serialize, Deserialize)]
struct SnapshotDocument<S> {
    #[serde(default = "Vec::new")]
    states: Vec<S>,
    #[serde(default)]
    components: BTreeSet<String>,
}

impl Serialize for RegistrySnapshot {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        let mut states: Vec<&EntityState> = self.states.values().map(AsRef::as_ref).collect();
        states.sort_by(|a, b| a.entity_id.cmp(&b.entity_id));
        SnapshotDocument {
            states,
            components: self.components.clone(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RegistrySnapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let doc = SnapshotDocument::<EntityState>::deserialize(deserializer)?;
        Ok(Self::from_states(doc.states, doc.components))
    }
}
