//! Entity state snapshot as pushed by the backend.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::entity::{AttributeValue, EntityId};
use crate::error::HubViewError;
use crate::id::ContextId;
use crate::time::{Timestamp, now};

/// State value reported for entities the backend cannot reach.
pub const STATE_UNAVAILABLE: &str = "unavailable";
/// State value reported before the backend knows anything.
pub const STATE_UNKNOWN: &str = "unknown";

/// Origin of a state change.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Context {
    pub id: ContextId,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// One observed device or service at a point in time.
///
/// Read-only from the UI's point of view: a new snapshot replaces the old
/// one wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityState {
    pub entity_id: EntityId,
    pub state: String,
    #[serde(default)]
    pub attributes: HashMap<String, AttributeValue>,
    #[serde(default = "now")]
    pub last_changed: Timestamp,
    #[serde(default = "now")]
    pub last_updated: Timestamp,
    #[serde(default)]
    pub context: Context,
}

impl EntityState {
    /// Create a builder for constructing an [`EntityState`].
    #[must_use]
    pub fn builder() -> EntityStateBuilder {
        EntityStateBuilder::default()
    }

    #[must_use]
    pub fn domain(&self) -> &str {
        self.entity_id.domain()
    }

    #[must_use]
    pub fn object_id(&self) -> &str {
        self.entity_id.object_id()
    }

    /// Look up an attribute by key.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key)
    }

    /// The `friendly_name` attribute, or the object id with `_` turned into spaces.
    #[must_use]
    pub fn friendly_name(&self) -> String {
        match self.attribute("friendly_name").and_then(AttributeValue::as_str) {
            Some(name) => name.to_string(),
            None => self.object_id().replace('_', " "),
        }
    }

    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        self.state == STATE_UNAVAILABLE
    }

    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.state == STATE_UNKNOWN
    }
}

/// Step-by-step builder for [`EntityState`].
#[derive(Debug, Default)]
pub struct EntityStateBuilder {
    entity_id: Option<String>,
    state: Option<String>,
    attributes: HashMap<String, AttributeValue>,
    last_changed: Option<Timestamp>,
    last_updated: Option<Timestamp>,
    context: Option<Context>,
}

impl EntityStateBuilder {
    #[must_use]
    pub fn entity_id(mut self, entity_id: impl Into<String>) -> Self {
        self.entity_id = Some(entity_id.into());
        self
    }

    #[must_use]
    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    #[must_use]
    pub fn attribute(mut self, key: impl Into<String>, value: AttributeValue) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    #[must_use]
    pub fn attributes(mut self, attributes: HashMap<String, AttributeValue>) -> Self {
        self.attributes = attributes;
        self
    }

    #[must_use]
    pub fn last_changed(mut self, ts: Timestamp) -> Self {
        self.last_changed = Some(ts);
        self
    }

    #[must_use]
    pub fn last_updated(mut self, ts: Timestamp) -> Self {
        self.last_updated = Some(ts);
        self
    }

    #[must_use]
    pub fn context(mut self, context: Context) -> Self {
        self.context = Some(context);
        self
    }

    /// Consume the builder, validate, and return an [`EntityState`].
    ///
    /// A missing state defaults to `unknown`; `last_updated` defaults to
    /// `last_changed`, which defaults to now.
    ///
    /// # Errors
    ///
    /// Returns [`HubViewError::Validation`] if the entity id is missing or
    /// malformed.
    pub fn build(self) -> Result<EntityState, HubViewError> {
        let entity_id = EntityId::parse(self.entity_id.as_deref().unwrap_or_default())?;
        let last_changed = self.last_changed.unwrap_or_else(now);
        Ok(EntityState {
            entity_id,
            state: self.state.unwrap_or_else(|| STATE_UNKNOWN.to_string()),
            attributes: self.attributes,
            last_changed,
            last_updated: self.last_updated.unwrap_or(last_changed),
            context: self.context.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    #[test]
    fn should_build_valid_state() {
        let state = EntityState::builder()
            .entity_id("light.kitchen_lights")
            .state("on")
            .attribute("brightness", AttributeValue::Int(180))
            .build()
            .unwrap();

        assert_eq!(state.domain(), "light");
        assert_eq!(state.object_id(), "kitchen_lights");
        assert_eq!(
            state.attribute("brightness"),
            Some(&AttributeValue::Int(180))
        );
        assert_eq!(state.last_changed, state.last_updated);
    }

    #[test]
    fn should_default_state_to_unknown() {
        let state = EntityState::builder().entity_id("sun.sun").build().unwrap();
        assert!(state.is_unknown());
        assert!(!state.is_unavailable());
    }

    #[test]
    fn should_return_validation_error_when_entity_id_missing() {
        let result = EntityState::builder().state("on").build();
        assert!(matches!(
            result,
            Err(HubViewError::Validation(ValidationError::EmptyEntityId))
        ));
    }

    #[test]
    fn should_prefer_friendly_name_attribute() {
        let state = EntityState::builder()
            .entity_id("light.kitchen_lights")
            .attribute(
                "friendly_name",
                AttributeValue::String("Kitchen".to_string()),
            )
            .build()
            .unwrap();
        assert_eq!(state.friendly_name(), "Kitchen");
    }

    #[test]
    fn should_derive_friendly_name_from_object_id() {
        let state = EntityState::builder()
            .entity_id("light.kitchen_lights")
            .build()
            .unwrap();
        assert_eq!(state.friendly_name(), "kitchen lights");
    }

    #[test]
    fn should_deserialize_backend_state_shape() {
        let json = r#"{
            "entity_id": "sensor.outside_temperature",
            "state": "12.4",
            "attributes": {"unit_of_measurement": "°C", "device_class": "temperature"},
            "last_changed": "2026-10-01T08:00:00Z",
            "last_updated": "2026-10-01T08:05:00Z",
            "context": {"id": "4f8a4c2e-7a34-4c1b-9d7e-2f9f3e1a5b6c", "parent_id": null, "user_id": null}
        }"#;
        let state: EntityState = serde_json::from_str(json).unwrap();
        assert_eq!(state.entity_id.as_str(), "sensor.outside_temperature");
        assert_eq!(state.state, "12.4");
        assert!(state.last_updated > state.last_changed);
        assert_eq!(
            state
                .attribute("unit_of_measurement")
                .and_then(AttributeValue::as_str),
            Some("°C")
        );
    }

    #[test]
    fn should_fill_defaults_for_minimal_json() {
        let state: EntityState =
            serde_json::from_str(r#"{"entity_id": "sun.sun", "state": "above_horizon"}"#).unwrap();
        assert!(state.attributes.is_empty());
        assert!(state.context.parent_id.is_none());
    }
}
