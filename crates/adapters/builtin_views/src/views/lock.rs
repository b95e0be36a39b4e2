//! Lock view.

use hubview_domain::entity::AttributeValue;
use hubview_domain::render::{Props, RenderNode};

use super::button;

pub(super) fn render(props: &Props) -> Vec<RenderNode> {
    let Some(state) = props.state_obj() else {
        return Vec::new();
    };
    let mut nodes = vec![RenderNode::text("ha-more-info-lock-state", state.state.clone())];
    if state
        .attribute("code_format")
        .and_then(AttributeValue::as_str)
        .is_some()
    {
        nodes.push(RenderNode::element("ha-textfield").with_props(
            Props::new()
                .with("label", "Code")
                .with("type", "password"),
        ));
    }
    let unavailable = state.is_unavailable();
    nodes.push(if state.state == "locked" {
        button("Unlock", "lock.unlock", unavailable)
    } else {
        button("Lock", "lock.lock", unavailable)
    });
    nodes
}
