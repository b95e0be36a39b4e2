//! Light view: on/off toggle, brightness, colour temperature and effects.

use hubview_domain::entity::AttributeValue;
use hubview_domain::render::{Props, RenderNode};

use super::{button, select};

pub(super) fn render(props: &Props) -> Vec<RenderNode> {
    let Some(state) = props.state_obj() else {
        return Vec::new();
    };
    let is_on = state.state == "on";
    let mut nodes = vec![
        RenderNode::element("ha-state-control-toggle")
            .with_props(Props::new().with("checked", is_on))
            .with_child(button(
                if is_on { "Turn off" } else { "Turn on" },
                if is_on { "light.turn_off" } else { "light.turn_on" },
                state.is_unavailable(),
            )),
    ];

    if is_on {
        if let Some(brightness) = state
            .attribute("brightness")
            .and_then(AttributeValue::as_f64)
        {
            nodes.push(RenderNode::text(
                "ha-more-info-light-brightness",
                format!("{}%", brightness_percent(brightness)),
            ));
        }
        if let Some(kelvin) = state
            .attribute("color_temp_kelvin")
            .and_then(AttributeValue::as_f64)
        {
            nodes.push(RenderNode::text(
                "ha-more-info-light-color-temp",
                format!("{kelvin:.0} K"),
            ));
        }
    }

    let effects = state
        .attribute("effect_list")
        .map(AttributeValue::string_list)
        .unwrap_or_default();
    if !effects.is_empty() {
        let current = state.attribute("effect").and_then(AttributeValue::as_str);
        nodes.push(select("Effect", current, &effects));
    }
    nodes
}

/// Backend brightness is 0..=255.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn brightness_percent(raw: f64) -> u8 {
    (raw / 255.0 * 100.0).round().clamp(0.0, 100.0) as u8
}
