//! State cards: the one-line rows shown for each member of a group.
//!
//! Every card starts with the entity's name; what follows depends on the
//! card type.

use std::sync::Arc;

use hubview_app::ports::ViewModule;
use hubview_domain::entity::{AttributeValue, EntityState};
use hubview_domain::render::{Props, RenderNode};
use hubview_domain::view::{DOMAINS_WITH_CARD, STATE_CARD_TAG_PREFIX};

use super::{button, select, state_info, state_text};

/// The module defining `state-card-<card>`.
pub(super) fn module(card: &str) -> Option<ViewModule> {
    let tag = format!("{STATE_CARD_TAG_PREFIX}{card}");
    let module = ViewModule::new();
    let module = match card {
        "toggle" => module.define(tag, Arc::new(toggle)),
        "display" => module.define(tag, Arc::new(display)),
        other => {
            let domain = DOMAINS_WITH_CARD
                .iter()
                .copied()
                .find(|domain| *domain == other)?;
            module.define(tag, Arc::new(move |props: &Props| dedicated(domain, props)))
        }
    };
    Some(module)
}

fn toggle(props: &Props) -> Vec<RenderNode> {
    let Some(state) = props.state_obj() else {
        return Vec::new();
    };
    vec![
        state_info(state),
        RenderNode::element("ha-entity-toggle").with_props(
            Props::new()
                .with("checked", state.state == "on")
                .with("disabled", state.is_unavailable()),
        ),
    ]
}

fn display(props: &Props) -> Vec<RenderNode> {
    let Some(state) = props.state_obj() else {
        return Vec::new();
    };
    vec![
        state_info(state),
        RenderNode::text("ha-state-value", state_text(state)),
    ]
}

fn dedicated(domain: &str, props: &Props) -> Vec<RenderNode> {
    let Some(state) = props.state_obj() else {
        return Vec::new();
    };
    vec![state_info(state), control(domain, state)]
}

fn control(domain: &str, state: &EntityState) -> RenderNode {
    match domain {
        "input_select" | "select" => {
            let options = state
                .attribute("options")
                .map(AttributeValue::string_list)
                .unwrap_or_default();
            select(&state.friendly_name(), Some(state.state.as_str()), &options)
        }
        "input_number" | "number" => {
            let mut props = Props::new().with("value", state.state.as_str());
            for key in ["min", "max", "step"] {
                if let Some(value) = state.attribute(key).and_then(AttributeValue::as_f64) {
                    props.set(key, serde_json::json!(value));
                }
            }
            RenderNode::element("ha-slider").with_props(props)
        }
        "input_text" | "text" => RenderNode::element("ha-textfield")
            .with_props(Props::new().with("value", state.state.as_str())),
        "scene" => button("Activate", "scene.turn_on", state.is_unavailable()),
        "script" => button("Run", "script.turn_on", state.is_unavailable()),
        "lock" if state.state == "locked" => button("Unlock", "lock.unlock", false),
        "lock" => button("Lock", "lock.lock", false),
        _ => RenderNode::text("ha-state-value", state_text(state)),
    }
}
