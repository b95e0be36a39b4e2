//! Climate view: temperatures, current action and mode selectors.

use hubview_domain::entity::{AttributeValue, EntityState};
use hubview_domain::render::{Props, RenderNode};

use super::select;

pub(super) fn render(props: &Props) -> Vec<RenderNode> {
    let Some(state) = props.state_obj() else {
        return Vec::new();
    };
    let mut nodes = Vec::new();

    if let Some(current) = temperature(state, "current_temperature") {
        nodes.push(RenderNode::text(
            "ha-more-info-climate-current",
            format!("Currently {current}"),
        ));
    }
    if let Some(target) = target(state) {
        nodes.push(RenderNode::text("ha-more-info-climate-target", target));
    }
    if let Some(action) = state
        .attribute("hvac_action")
        .and_then(AttributeValue::as_str)
    {
        nodes.push(RenderNode::text("ha-more-info-climate-action", action));
    }

    let modes = state
        .attribute("hvac_modes")
        .map(AttributeValue::string_list)
        .unwrap_or_default();
    if !modes.is_empty() {
        nodes.push(select("Mode", Some(state.state.as_str()), &modes));
    }
    for (key, label, list) in [
        ("preset_mode", "Preset", "preset_modes"),
        ("fan_mode", "Fan mode", "fan_modes"),
    ] {
        let options = state
            .attribute(list)
            .map(AttributeValue::string_list)
            .unwrap_or_default();
        if !options.is_empty() {
            let current = state.attribute(key).and_then(AttributeValue::as_str);
            nodes.push(select(label, current, &options));
        }
    }
    nodes
}

fn temperature(state: &EntityState, key: &str) -> Option<String> {
    state
        .attribute(key)
        .and_then(AttributeValue::as_f64)
        .map(|value| format!("{value:.1} °"))
}

/// Single target, or a low to high range for heat/cool modes.
fn target(state: &EntityState) -> Option<String> {
    if let Some(single) = temperature(state, "temperature") {
        return Some(format!("Target {single}"));
    }
    let low = temperature(state, "target_temp_low")?;
    let high = temperature(state, "target_temp_high")?;
    Some(format!("Target {low} - {high}"))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use hubview_domain::render::PROP_STATE_OBJ;

    use super::*;

    fn render_tree(state: EntityState) -> RenderNode {
        RenderNode::element("root").with_children(render(
            &Props::new().with(PROP_STATE_OBJ, Arc::new(state)),
        ))
    }

    #[test]
    fn should_render_single_target_and_modes() {
        let tree = render_tree(
            EntityState::builder()
                .entity_id("climate.hallway")
                .state("heat")
                .attribute("current_temperature", AttributeValue::Float(19.5))
                .attribute("temperature", AttributeValue::Int(21))
                .attribute(
                    "hvac_modes",
                    AttributeValue::Json(serde_json::json!(["off", "heat", "auto"])),
                )
                .build()
                .unwrap(),
        );

        assert_eq!(tree.children[0].text.as_deref(), Some("Currently 19.5 °"));
        assert_eq!(tree.children[1].text.as_deref(), Some("Target 21.0 °"));
        let modes = tree.find("ha-select").unwrap();
        assert_eq!(modes.children.len(), 3);
    }

    #[test]
    fn should_render_target_range() {
        let state = EntityState::builder()
            .entity_id("climate.ecobee")
            .state("heat_cool")
            .attribute("target_temp_low", AttributeValue::Int(20))
            .attribute("target_temp_high", AttributeValue::Int(24))
            .build()
            .unwrap();
        assert_eq!(target(&state).as_deref(), Some("Target 20.0 ° - 24.0 °"));
    }

    #[test]
    fn should_skip_target_when_unknown() {
        let state = EntityState::builder()
            .entity_id("climate.ecobee")
            .state("off")
            .build()
            .unwrap();
        assert_eq!(target(&state), None);
    }
}
