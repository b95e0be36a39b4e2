//! More-info content: the detail view of a single entity.
//!
//! On every render: classify the entity's domain, resolve the view type,
//! warm the loader for it, and instantiate `more-info-<type>` in a slot that
//! keeps its element across renders. History and logbook panels follow when
//! their gating predicates allow.

use std::sync::Arc;

use hubview_domain::classify::domain_of;
use hubview_domain::gating::{show_history, show_logbook};
use hubview_domain::id::NodeId;
use hubview_domain::registry::RegistrySnapshot;
use hubview_domain::render::{PROP_EDIT_MODE, PROP_HASS, PROP_STATE_OBJ, Props, RenderNode};
use hubview_domain::view::{MoreInfoType, resolve_type};

use crate::container::Container;
use crate::instantiator::DynamicSlot;
use crate::loader::{LoaderEvent, ViewLoader};
use crate::ports::ModuleImporter;

/// Tag of the container element.
pub const CONTENT_TAG: &str = "more-info-content";
/// Tag of the history panel.
pub const HISTORY_TAG: &str = "ha-more-info-history";
/// Tag of the logbook panel.
pub const LOGBOOK_TAG: &str = "ha-more-info-logbook";
/// Tag of the alert shown for unknown entities.
pub const ALERT_TAG: &str = "ha-alert";

/// Detail view of one entity.
pub struct MoreInfoContent<I> {
    loader: Arc<ViewLoader<I>>,
    entity_id: String,
    root_id: NodeId,
    slot: DynamicSlot,
}

impl<I: ModuleImporter> MoreInfoContent<I> {
    pub fn new(loader: Arc<ViewLoader<I>>, entity_id: impl Into<String>) -> Self {
        Self {
            loader,
            entity_id: entity_id.into(),
            root_id: NodeId::new(),
            slot: DynamicSlot::new(),
        }
    }

    #[must_use]
    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    /// The view type resolved for the displayed entity.
    #[must_use]
    pub fn view_type(&self) -> MoreInfoType {
        resolve_type(domain_of(&self.entity_id))
    }

    #[tracing::instrument(skip(self, registry), fields(entity_id = %self.entity_id))]
    fn render_content(&mut self, registry: &Arc<RegistrySnapshot>, edit_mode: bool) -> RenderNode {
        let mut root = RenderNode::element(CONTENT_TAG);
        root.id = self.root_id;

        let Some(state) = registry.get(&self.entity_id) else {
            self.slot.clear();
            return root.with_child(RenderNode::text(
                ALERT_TAG,
                format!("Entity not available: {}", self.entity_id),
            ));
        };

        let view_type = self.view_type();
        match view_type.tag() {
            Some(tag) => {
                self.loader.ensure_loaded(view_type.as_str());
                let props = Props::new()
                    .with(PROP_STATE_OBJ, Arc::clone(state))
                    .with(PROP_HASS, Arc::clone(registry))
                    .with(PROP_EDIT_MODE, edit_mode);
                let node = self.slot.render(self.loader.elements(), &tag, props);
                root.children.push(node.clone());
            }
            None => {
                tracing::trace!("view hidden for domain");
                self.slot.clear();
            }
        }

        if show_history(registry, &self.entity_id) {
            root.children.push(panel(HISTORY_TAG, &self.entity_id));
        }
        if show_logbook(registry, &self.entity_id) {
            root.children.push(panel(LOGBOOK_TAG, &self.entity_id));
        }
        root
    }
}

fn panel(tag: &str, entity_id: &str) -> RenderNode {
    RenderNode::element(tag).with_props(Props::new().with("entityId", entity_id))
}

impl<I: ModuleImporter> Container for MoreInfoContent<I> {
    fn render(&mut self, registry: &Arc<RegistrySnapshot>, edit_mode: bool) -> RenderNode {
        self.render_content(registry, edit_mode)
    }

    fn wants_rerender(&self, event: &LoaderEvent) -> bool {
        matches!(event, LoaderEvent::ModuleAvailable(view) if view == self.view_type().as_str())
    }
}
