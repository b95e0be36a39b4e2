//! Dedicated domains without a hand-written view: state header over the
//! attribute table.

use hubview_domain::render::{Props, RenderNode};

use super::{default, state_text};

pub(super) fn render(domain: &str, props: &Props) -> Vec<RenderNode> {
    let Some(state) = props.state_obj() else {
        return Vec::new();
    };
    let header = RenderNode::text("ha-more-info-state-header", state_text(state))
        .with_props(Props::new().with("domain", domain));
    vec![header, default::attributes(state)]
}
