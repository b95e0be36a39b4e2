//! Group content: a group entity shown as its members.
//!
//! When every member shares one domain with a dedicated view, that view is
//! rendered once for a synthetic "base" state standing for the whole group.
//! Each member then gets a state card row. Both go through the same
//! classify → resolve → load → instantiate sequence as the more-info view.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use hubview_domain::entity::{AttributeValue, EntityId, EntityState};
use hubview_domain::id::NodeId;
use hubview_domain::registry::RegistrySnapshot;
use hubview_domain::render::{PROP_EDIT_MODE, PROP_HASS, PROP_STATE_OBJ, Props, RenderNode};
use hubview_domain::view::{MoreInfoType, resolve_type, state_card_type};

use crate::container::Container;
use crate::instantiator::DynamicSlot;
use crate::loader::{LoaderEvent, ViewLoader};
use crate::more_info::ALERT_TAG;
use crate::ports::ModuleImporter;

/// Tag of the group container element.
pub const GROUP_CONTENT_TAG: &str = "more-info-group-content";
/// Attribute listing the members of a group.
pub const MEMBERS_ATTRIBUTE: &str = "entity_id";

/// Detail view of a group entity.
pub struct GroupContent<I> {
    loader: Arc<ViewLoader<I>>,
    group_id: String,
    root_id: NodeId,
    base_slot: DynamicSlot,
    rows: HashMap<String, DynamicSlot>,
    rendered_types: BTreeSet<String>,
}

impl<I: ModuleImporter> GroupContent<I> {
    pub fn new(loader: Arc<ViewLoader<I>>, group_id: impl Into<String>) -> Self {
        Self {
            loader,
            group_id: group_id.into(),
            root_id: NodeId::new(),
            base_slot: DynamicSlot::new(),
            rows: HashMap::new(),
            rendered_types: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    #[tracing::instrument(skip(self, registry), fields(group_id = %self.group_id))]
    fn render_content(&mut self, registry: &Arc<RegistrySnapshot>, edit_mode: bool) -> RenderNode {
        let mut root = RenderNode::element(GROUP_CONTENT_TAG);
        root.id = self.root_id;
        self.rendered_types.clear();

        let Some(group) = registry.get(&self.group_id) else {
            self.base_slot.clear();
            self.rows.clear();
            return root.with_child(RenderNode::text(
                ALERT_TAG,
                format!("Entity not available: {}", self.group_id),
            ));
        };

        let members = members(group, registry);
        tracing::debug!(members = members.len(), "rendering group");

        match base_state(group, &members) {
            Some((view_type, base)) => {
                let props = view_props(Arc::new(base), registry, edit_mode);
                let node = self.load_and_render_base(view_type, props);
                root.children.push(node);
            }
            None => self.base_slot.clear(),
        }

        self.rows
            .retain(|id, _| members.iter().any(|m| m.entity_id.as_str() == id));
        for member in &members {
            let card = state_card_type(member).tag();
            self.loader.ensure_loaded(&card);
            self.rendered_types.insert(card.clone());
            let props = view_props(Arc::clone(member), registry, edit_mode);
            let slot = self
                .rows
                .entry(member.entity_id.to_string())
                .or_default();
            root.children
                .push(slot.render(self.loader.elements(), &card, props).clone());
        }
        root
    }

    fn load_and_render_base(&mut self, view_type: MoreInfoType, props: Props) -> RenderNode {
        self.loader.ensure_loaded(view_type.as_str());
        self.rendered_types.insert(view_type.as_str().to_string());
        let tag = view_type.tag().unwrap_or_default();
        self.base_slot
            .render(self.loader.elements(), &tag, props)
            .clone()
    }
}

fn view_props(state: Arc<EntityState>, registry: &Arc<RegistrySnapshot>, edit_mode: bool) -> Props {
    Props::new()
        .with(PROP_STATE_OBJ, state)
        .with(PROP_HASS, Arc::clone(registry))
        .with(PROP_EDIT_MODE, edit_mode)
}

/// Members listed by the group that exist in the snapshot, in listed order.
fn members(group: &EntityState, registry: &RegistrySnapshot) -> Vec<Arc<EntityState>> {
    group
        .attribute(MEMBERS_ATTRIBUTE)
        .map(AttributeValue::string_list)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|id| registry.get(id).cloned())
        .collect()
}

/// Synthetic state standing for the whole group, when all members share a
/// domain that has a dedicated view.
fn base_state(
    group: &EntityState,
    members: &[Arc<EntityState>],
) -> Option<(MoreInfoType, EntityState)> {
    let first = members.first()?;
    let domain = first.domain();
    if members.iter().any(|member| member.domain() != domain) {
        return None;
    }
    let view_type = resolve_type(domain);
    if !matches!(view_type, MoreInfoType::Dedicated(_)) {
        return None;
    }

    let mut attributes = first.attributes.clone();
    attributes.insert(
        "friendly_name".to_string(),
        AttributeValue::String(group.friendly_name()),
    );
    let base = EntityState {
        entity_id: EntityId::new_unchecked(format!("{domain}.{}", group.object_id())),
        state: first.state.clone(),
        attributes,
        last_changed: group.last_changed,
        last_updated: group.last_updated,
        context: group.context.clone(),
    };
    Some((view_type, base))
}

impl<I: ModuleImporter> Container for GroupContent<I> {
    fn render(&mut self, registry: &Arc<RegistrySnapshot>, edit_mode: bool) -> RenderNode {
        self.render_content(registry, edit_mode)
    }

    fn wants_rerender(&self, event: &LoaderEvent) -> bool {
        matches!(event, LoaderEvent::ModuleAvailable(view) if self.rendered_types.contains(view))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use hubview_domain::error::ImportError;

    use super::*;
    use crate::element_registry::ElementRegistry;
    use crate::ports::ViewModule;

    #[derive(Default)]
    struct EchoImporter {
        calls: AtomicUsize,
    }

    impl ModuleImporter for EchoImporter {
        async fn import(&self, view_type: &str) -> Result<ViewModule, ImportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let tag = if view_type.starts_with("state-card-") {
                view_type.to_string()
            } else {
                format!("more-info-{view_type}")
            };
            Ok(ViewModule::new().define(
                tag,
                Arc::new(|props: &Props| {
                    let name = props.state_obj().map(|s| s.friendly_name()).unwrap_or_default();
                    vec![RenderNode::text("span", name)]
                }),
            ))
        }
    }

    fn state(id: &str, value: &str) -> EntityState {
        EntityState::builder()
            .entity_id(id)
            .state(value)
            .build()
            .unwrap()
    }

    fn group(id: &str, members: &[&str]) -> EntityState {
        EntityState::builder()
            .entity_id(id)
            .state("on")
            .attribute(
                MEMBERS_ATTRIBUTE,
                AttributeValue::Json(serde_json::json!(members)),
            )
            .attribute(
                "friendly_name",
                AttributeValue::String("Downstairs".to_string()),
            )
            .build()
            .unwrap()
    }

    fn make_loader() -> (Arc<ViewLoader<Arc<EchoImporter>>>, Arc<EchoImporter>) {
        let importer = Arc::new(EchoImporter::default());
        let loader = Arc::new(ViewLoader::new(
            Arc::clone(&importer),
            ElementRegistry::new(),
        ));
        (loader, importer)
    }

    #[tokio::test]
    async fn should_render_base_view_for_homogeneous_group() {
        let (loader, _) = make_loader();
        let registry = Arc::new(RegistrySnapshot::from_states(
            [
                group("group.downstairs", &["light.hall", "light.kitchen"]),
                state("light.hall", "on"),
                state("light.kitchen", "off"),
            ],
            Vec::<String>::new(),
        ));
        let mut content = GroupContent::new(Arc::clone(&loader), "group.downstairs");

        content.render(&registry, false);
        loader.settled().await;
        let tree = content.render(&registry, false);

        let base = tree.find("more-info-light").unwrap();
        assert!(base.upgraded);
        let base_state = base.props.state_obj().unwrap();
        assert_eq!(base_state.entity_id.as_str(), "light.downstairs");
        assert_eq!(base_state.state, "on");
        assert_eq!(base.text_content(), "Downstairs");

        let rows: Vec<_> = tree
            .children
            .iter()
            .filter(|c| c.tag == "state-card-toggle")
            .collect();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|row| row.upgraded));
    }

    #[tokio::test]
    async fn should_skip_base_view_for_mixed_group() {
        let (loader, _) = make_loader();
        let registry = Arc::new(RegistrySnapshot::from_states(
            [
                group("group.mixed", &["light.hall", "sensor.outside", "lock.door"]),
                state("light.hall", "on"),
                state("sensor.outside", "12"),
                state("lock.door", "locked"),
            ],
            Vec::<String>::new(),
        ));
        let mut content = GroupContent::new(Arc::clone(&loader), "group.mixed");

        let tree = content.render(&registry, false);

        assert!(tree.find("more-info-light").is_none());
        let tags: Vec<&str> = tree.children.iter().map(|c| c.tag.as_str()).collect();
        assert_eq!(
            tags,
            vec!["state-card-toggle", "state-card-display", "state-card-lock"]
        );
    }

    #[tokio::test]
    async fn should_skip_members_missing_from_snapshot() {
        let (loader, _) = make_loader();
        let registry = Arc::new(RegistrySnapshot::from_states(
            [
                group("group.partial", &["switch.a", "switch.gone"]),
                state("switch.a", "on"),
            ],
            Vec::<String>::new(),
        ));
        let mut content = GroupContent::new(loader, "group.partial");

        let tree = content.render(&registry, false);

        assert_eq!(tree.children.len(), 1);
        assert_eq!(
            tree.children[0].props.state_obj().unwrap().entity_id.as_str(),
            "switch.a"
        );
    }

    #[tokio::test]
    async fn should_reuse_row_elements_across_renders() {
        let (loader, importer) = make_loader();
        let registry = Arc::new(RegistrySnapshot::from_states(
            [group("group.g", &["switch.a"]), state("switch.a", "on")],
            Vec::<String>::new(),
        ));
        let mut content = GroupContent::new(Arc::clone(&loader), "group.g");

        let first = content.render(&registry, false).children[0].id;
        loader.settled().await;
        let second = content.render(&registry, false);

        assert_eq!(second.children[0].id, first);
        assert!(second.children[0].upgraded);
        assert_eq!(importer.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn should_rerender_for_types_it_rendered() {
        let (loader, _) = make_loader();
        let registry = Arc::new(RegistrySnapshot::from_states(
            [group("group.g", &["switch.a"]), state("switch.a", "on")],
            Vec::<String>::new(),
        ));
        let mut content = GroupContent::new(loader, "group.g");
        content.render(&registry, false);

        assert!(content.wants_rerender(&LoaderEvent::ModuleAvailable(
            "state-card-toggle".to_string()
        )));
        assert!(!content.wants_rerender(&LoaderEvent::ModuleAvailable("light".to_string())));
    }

    #[tokio::test]
    async fn should_show_alert_for_unknown_group() {
        let (loader, _) = make_loader();
        let mut content = GroupContent::new(loader, "group.nowhere");
        let tree = content.render(&Arc::new(RegistrySnapshot::default()), false);
        assert_eq!(tree.children[0].tag, ALERT_TAG);
    }
}
