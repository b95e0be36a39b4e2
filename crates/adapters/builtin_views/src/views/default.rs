//! Default view: a table of the entity's attributes.

use hubview_domain::entity::{AttributeValue, EntityState};
use hubview_domain::render::{Props, RenderNode};

use super::format_key;

/// Attributes every entity may carry that say nothing about its state.
const FILTERED_ATTRIBUTES: &[&str] = &[
    "assumed_state",
    "attribution",
    "device_class",
    "editable",
    "entity_id",
    "entity_picture",
    "friendly_name",
    "icon",
    "id",
    "restored",
    "state_class",
    "supported_features",
    "unit_of_measurement",
];

pub(super) fn render(props: &Props) -> Vec<RenderNode> {
    let Some(state) = props.state_obj() else {
        return Vec::new();
    };
    let mut nodes = vec![attributes(state)];
    if let Some(attribution) = state
        .attribute("attribution")
        .and_then(AttributeValue::as_str)
    {
        nodes.push(RenderNode::text("ha-attribution", attribution));
    }
    nodes
}

/// `ha-attributes` with one row per displayable attribute, sorted by key.
pub(super) fn attributes(state: &EntityState) -> RenderNode {
    let mut keys: Vec<&String> = state
        .attributes
        .keys()
        .filter(|key| !FILTERED_ATTRIBUTES.contains(&key.as_str()))
        .collect();
    keys.sort();
    RenderNode::element("ha-attributes").with_children(keys.into_iter().map(|key| {
        let value = state.attributes[key.as_str()].display();
        RenderNode::text("ha-attribute-row", format!("{}: {value}", format_key(key)))
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use hubview_domain::render::PROP_STATE_OBJ;

    use super::*;

    #[test]
    fn should_list_attributes_sorted_without_standard_ones() {
        let state = EntityState::builder()
            .entity_id("sensor.power")
            .state("120")
            .attribute("voltage", AttributeValue::Int(230))
            .attribute("friendly_name", AttributeValue::String("Power".to_string()))
            .attribute("current", AttributeValue::Float(0.5))
            .attribute(
                "attribution",
                AttributeValue::String("Data by Acme".to_string()),
            )
            .build()
            .unwrap();

        let nodes = render(&Props::new().with(PROP_STATE_OBJ, Arc::new(state)));

        let rows: Vec<_> = nodes[0]
            .children
            .iter()
            .filter_map(|row| row.text.as_deref())
            .collect();
        assert_eq!(rows, vec!["Current: 0.5", "Voltage: 230"]);
        assert_eq!(nodes[1].text.as_deref(), Some("Data by Acme"));
    }

    #[test]
    fn should_render_nothing_without_state() {
        assert!(render(&Props::new()).is_empty());
    }
}
