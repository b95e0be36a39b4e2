//! Dynamic instantiator: create an element by tag name and bind props.
//!
//! Works uniformly for every tag: callers never switch over concrete view
//! types. Instantiation cannot fail; an undefined tag yields an inert node
//! that still carries its props, so a slow or failed import never breaks
//! rendering.

use hubview_domain::id::NodeId;
use hubview_domain::render::{Props, RenderNode};

use crate::element_registry::ElementRegistry;

/// Create a fresh element for `tag` with `props` assigned.
#[must_use]
pub fn instantiate(registry: &ElementRegistry, tag: &str, props: Props) -> RenderNode {
    match registry.get(tag) {
        Some(factory) => {
            let children = factory.render(&props);
            RenderNode {
                children,
                ..RenderNode::element(tag).with_props(props)
            }
        }
        None => RenderNode::inert(tag, props),
    }
}

/// A position in the render tree that reuses its element across renders.
///
/// Rendering the same tag again keeps the node identity and re-assigns the
/// props; an inert node is upgraded in place once its tag becomes defined;
/// a different tag replaces the node.
#[derive(Debug, Default)]
pub struct DynamicSlot {
    node: Option<RenderNode>,
}

impl DynamicSlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Render `tag` into this slot and return the resulting node.
    pub fn render(&mut self, registry: &ElementRegistry, tag: &str, props: Props) -> &RenderNode {
        let node = match self.node.take() {
            Some(existing) if existing.tag == tag => Self::update(existing, registry, props),
            _ => instantiate(registry, tag, props),
        };
        self.node.insert(node)
    }

    fn update(mut node: RenderNode, registry: &ElementRegistry, props: Props) -> RenderNode {
        node.props.assign(&props);
        match registry.get(&node.tag) {
            Some(factory) => {
                node.upgraded = true;
                node.children = factory.render(&node.props);
            }
            None => node.children.clear(),
        }
        node
    }

    /// The node currently held, if any.
    #[must_use]
    pub fn current(&self) -> Option<&RenderNode> {
        self.node.as_ref()
    }

    #[must_use]
    pub fn node_id(&self) -> Option<NodeId> {
        self.node.as_ref().map(|node| node.id)
    }

    /// Drop the held node.
    pub fn clear(&mut self) {
        self.node = None;
    }
}
