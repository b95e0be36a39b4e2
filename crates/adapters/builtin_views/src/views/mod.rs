//! The built-in view catalog and the small render helpers views share.

mod climate;
mod cover;
mod default;
mod generic;
mod light;
mod lock;
mod state_cards;

use std::sync::Arc;

use hubview_app::ports::ViewModule;
use hubview_domain::entity::{AttributeValue, EntityState};
use hubview_domain::render::{Props, RenderNode};
use hubview_domain::view::{DOMAINS_WITH_MORE_INFO, MORE_INFO_TAG_PREFIX, STATE_CARD_TAG_PREFIX};

/// The module implementing `view_type`, if one is built in.
pub fn catalog(view_type: &str) -> Option<ViewModule> {
    if let Some(card) = view_type.strip_prefix(STATE_CARD_TAG_PREFIX) {
        return state_cards::module(card);
    }

    let tag = format!("{MORE_INFO_TAG_PREFIX}{view_type}");
    let module = ViewModule::new();
    let module = match view_type {
        "light" => module.define(tag, Arc::new(light::render)),
        "climate" => module.define(tag, Arc::new(climate::render)),
        "cover" => module.define(tag, Arc::new(cover::render)),
        "lock" => module.define(tag, Arc::new(lock::render)),
        "default" => module.define(tag, Arc::new(default::render)),
        other => {
            let domain = DOMAINS_WITH_MORE_INFO
                .iter()
                .copied()
                .find(|domain| *domain == other)?;
            module.define(
                tag,
                Arc::new(move |props: &Props| generic::render(domain, props)),
            )
        }
    };
    Some(module)
}

/// The state with its unit, e.g. `12.4 °C`.
fn state_text(state: &EntityState) -> String {
    match state
        .attribute("unit_of_measurement")
        .and_then(AttributeValue::as_str)
    {
        Some(unit) => format!("{} {unit}", state.state),
        None => state.state.clone(),
    }
}

/// `hvac_modes` → `Hvac modes`.
fn format_key(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn state_info(state: &EntityState) -> RenderNode {
    RenderNode::text("state-info", state.friendly_name())
}

fn button(label: &str, service: &str, disabled: bool) -> RenderNode {
    RenderNode::text("ha-button", label).with_props(
        Props::new()
            .with("service", service)
            .with("disabled", disabled),
    )
}

fn select(label: &str, current: Option<&str>, options: &[&str]) -> RenderNode {
    let mut props = Props::new().with("label", label);
    if let Some(current) = current {
        props.set("value", current);
    }
    RenderNode::element("ha-select")
        .with_props(props)
        .with_children(
            options
                .iter()
                .map(|option| RenderNode::text("ha-list-item", *option)),
        )
}
