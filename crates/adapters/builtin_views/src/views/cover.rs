//! Cover view: position and open/stop/close controls.

use hubview_domain::entity::AttributeValue;
use hubview_domain::render::{Props, RenderNode};

use super::button;

pub(super) fn render(props: &Props) -> Vec<RenderNode> {
    let Some(state) = props.state_obj() else {
        return Vec::new();
    };
    let mut nodes = Vec::new();
    if let Some(position) = state
        .attribute("current_position")
        .and_then(AttributeValue::as_f64)
    {
        nodes.push(RenderNode::text(
            "ha-more-info-cover-position",
            format!("{position:.0}%"),
        ));
    }

    let unavailable = state.is_unavailable();
    let fully_open = state.state == "open"
        && state
            .attribute("current_position")
            .and_then(AttributeValue::as_f64)
            .is_none_or(|position| position >= 100.0);
    let fully_closed = state.state == "closed";
    nodes.push(RenderNode::element("ha-cover-controls").with_children([
        button("Open", "cover.open_cover", unavailable || fully_open || state.state == "opening"),
        button("Stop", "cover.stop_cover", unavailable),
        button("Close", "cover.close_cover", unavailable || fully_closed || state.state == "closing"),
    ]));
    nodes
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use hubview_domain::entity::EntityState;
    use hubview_domain::render::PROP_STATE_OBJ;

    use super::*;

    fn controls(state: EntityState) -> Vec<(String, bool)> {
        let nodes = render(&Props::new().with(PROP_STATE_OBJ, Arc::new(state)));
        nodes
            .last()
            .unwrap()
            .children
            .iter()
            .map(|b| (b.text.clone().unwrap(), b.props.flag("disabled")))
            .collect()
    }

    #[test]
    fn should_disable_close_when_closed() {
        let state = EntityState::builder()
            .entity_id("cover.garage_door")
            .state("closed")
            .build()
            .unwrap();
        assert_eq!(
            controls(state),
            vec![
                ("Open".to_string(), false),
                ("Stop".to_string(), false),
                ("Close".to_string(), true),
            ]
        );
    }

    #[test]
    fn should_allow_opening_partially_open_cover() {
        let state = EntityState::builder()
            .entity_id("cover.kitchen_window")
            .state("open")
            .attribute("current_position", AttributeValue::Int(40))
            .build()
            .unwrap();
        let nodes = render(&Props::new().with(PROP_STATE_OBJ, Arc::new(state.clone())));
        assert_eq!(nodes[0].text.as_deref(), Some("40%"));
        assert!(!controls(state)[0].1);
    }
}
