//! Predicates deciding which auxiliary panels accompany a more-info view.
//!
//! Pure functions of the registry snapshot and the static tables below.

use crate::classify::domain_of;
use crate::entity::AttributeValue;
use crate::registry::RegistrySnapshot;

/// Backend component providing the history panel.
pub const HISTORY_COMPONENT: &str = "history";
/// Backend component providing the logbook panel.
pub const LOGBOOK_COMPONENT: &str = "logbook";

/// Domains whose state is a continuous value; a logbook of those is noise.
pub const CONTINUOUS_DOMAINS: &[&str] = &[
    "counter",
    "input_number",
    "number",
    "proximity",
    "zone",
];

/// Domains whose more-info view never shows history.
pub const DOMAINS_MORE_INFO_NO_HISTORY: &[&str] = &["camera", "configurator"];

/// Sensor device classes reporting numeric measurements.
pub const SENSOR_NUMERIC_DEVICE_CLASSES: &[&str] = &[
    "battery",
    "current",
    "energy",
    "humidity",
    "illuminance",
    "power",
    "pressure",
    "temperature",
    "voltage",
];

#[must_use]
pub fn is_continuous_domain(domain: &str) -> bool {
    CONTINUOUS_DOMAINS.contains(&domain)
}

/// Whether the history panel should be shown for `entity_id`.
#[must_use]
pub fn show_history(registry: &RegistrySnapshot, entity_id: &str) -> bool {
    registry.is_component_loaded(HISTORY_COMPONENT)
        && registry.contains(entity_id)
        && !DOMAINS_MORE_INFO_NO_HISTORY.contains(&domain_of(entity_id))
}

/// Whether the logbook panel should be shown for `entity_id`.
///
/// Entities carrying a unit of measurement, continuous domains and numeric
/// sensors are excluded.
#[must_use]
pub fn show_logbook(registry: &RegistrySnapshot, entity_id: &str) -> bool {
    if !registry.is_component_loaded(LOGBOOK_COMPONENT) {
        return false;
    }
    let Some(state) = registry.get(entity_id) else {
        return false;
    };
    if state.attribute("unit_of_measurement").is_some() {
        return false;
    }
    let domain = domain_of(entity_id);
    if is_continuous_domain(domain) {
        return false;
    }
    let numeric_sensor = domain == "sensor"
        && state
            .attribute("device_class")
            .and_then(AttributeValue::as_str)
            .is_some_and(|class| SENSOR_NUMERIC_DEVICE_CLASSES.contains(&class));
    !numeric_sensor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityState;

    fn snapshot(components: &[&str]) -> RegistrySnapshot {
        let states = [
            EntityState::builder()
                .entity_id("light.kitchen")
                .state("on")
                .build()
                .unwrap(),
            EntityState::builder()
                .entity_id("camera.porch")
                .state("idle")
                .build()
                .unwrap(),
            EntityState::builder()
                .entity_id("sensor.outside_temperature")
                .state("12.4")
                .attribute(
                    "unit_of_measurement",
                    AttributeValue::String("°C".to_string()),
                )
                .build()
                .unwrap(),
            EntityState::builder()
                .entity_id("switch.pump")
                .state("off")
                .attribute("unit_of_measurement", AttributeValue::String("W".to_string()))
                .build()
                .unwrap(),
        ];
        RegistrySnapshot::from_states(states, components.iter().copied())
    }

    #[test]
    fn should_show_history_when_component_loaded() {
        let registry = snapshot(&["history"]);
        assert!(show_history(&registry, "light.kitchen"));
        assert!(show_history(&registry, "sensor.outside_temperature"));
    }

    #[test]
    fn should_hide_history_when_component_missing() {
        let registry = snapshot(&["logbook"]);
        assert!(!show_history(&registry, "light.kitchen"));
    }

    #[test]
    fn should_hide_history_for_no_history_domains() {
        let registry = snapshot(&["history"]);
        assert!(!show_history(&registry, "camera.porch"));
    }

    #[test]
    fn should_hide_history_for_unknown_entity() {
        let registry = snapshot(&["history"]);
        assert!(!show_history(&registry, "light.nowhere"));
    }

    #[test]
    fn should_show_logbook_for_discrete_entity() {
        let registry = snapshot(&["logbook"]);
        assert!(show_logbook(&registry, "light.kitchen"));
    }

    #[test]
    fn should_hide_logbook_when_component_missing() {
        let registry = snapshot(&["history"]);
        assert!(!show_logbook(&registry, "light.kitchen"));
    }

    #[test]
    fn should_hide_logbook_for_entities_with_unit() {
        let registry = snapshot(&["logbook"]);
        assert!(!show_logbook(&registry, "switch.pump"));
        assert!(!show_logbook(&registry, "sensor.outside_temperature"));
    }

    #[test]
    fn should_hide_logbook_for_continuous_domain() {
        let registry = snapshot(&["logbook"]).with_states([EntityState::builder()
            .entity_id("counter.visits")
            .state("3")
            .build()
            .unwrap()]);
        assert!(!show_logbook(&registry, "counter.visits"));
    }

    #[test]
    fn should_hide_logbook_for_numeric_sensor_without_unit() {
        let registry = snapshot(&["logbook"]).with_states([EntityState::builder()
            .entity_id("sensor.attic")
            .state("31")
            .attribute(
                "device_class",
                AttributeValue::String("temperature".to_string()),
            )
            .build()
            .unwrap()]);
        assert!(!show_logbook(&registry, "sensor.attic"));
    }

    #[test]
    fn should_show_logbook_for_enum_sensor() {
        let registry = snapshot(&["logbook"]).with_states([EntityState::builder()
            .entity_id("sensor.washer_status")
            .state("rinsing")
            .attribute("device_class", AttributeValue::String("enum".to_string()))
            .build()
            .unwrap()]);
        assert!(show_logbook(&registry, "sensor.washer_status"));
    }

    #[test]
    fn should_classify_continuous_domains() {
        assert!(is_continuous_domain("counter"));
        assert!(!is_continuous_domain("binary_sensor"));
    }
}
