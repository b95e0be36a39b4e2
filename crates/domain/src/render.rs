//! Render tree: the output of instantiating views.
//!
//! A [`RenderNode`] is an element identified by its tag name, carrying the
//! property bag that was assigned to it and the children its view produced.
//! Nodes whose tag had no registered view are *inert*: they keep their tag
//! and props but render no children.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::entity::EntityState;
use crate::id::NodeId;
use crate::registry::RegistrySnapshot;

/// Property carrying the entity state being presented.
pub const PROP_STATE_OBJ: &str = "stateObj";
/// Property carrying the registry snapshot.
pub const PROP_HASS: &str = "hass";
/// Ambient flag telling views they are shown in edit mode.
pub const PROP_EDIT_MODE: &str = "editMode";

/// A single property value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    Entity(Arc<EntityState>),
    Registry(Arc<RegistrySnapshot>),
    Flag(bool),
    Json(serde_json::Value),
}

impl From<Arc<EntityState>> for PropValue {
    fn from(value: Arc<EntityState>) -> Self {
        Self::Entity(value)
    }
}

impl From<Arc<RegistrySnapshot>> for PropValue {
    fn from(value: Arc<RegistrySnapshot>) -> Self {
        Self::Registry(value)
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<serde_json::Value> for PropValue {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        Self::Json(serde_json::Value::String(value.to_string()))
    }
}

impl fmt::Display for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entity(state) => f.write_str(state.entity_id.as_str()),
            Self::Registry(registry) => write!(f, "<{} entities>", registry.len()),
            Self::Flag(flag) => write!(f, "{flag}"),
            Self::Json(serde_json::Value::String(text)) => f.write_str(text),
            Self::Json(value) => write!(f, "{value}"),
        }
    }
}

impl Serialize for PropValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Entity(state) => serializer.serialize_str(state.entity_id.as_str()),
            Self::Registry(registry) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("entities", &registry.len())?;
                map.end()
            }
            Self::Flag(flag) => serializer.serialize_bool(*flag),
            Self::Json(value) => value.serialize(serializer),
        }
    }
}

/// Ordered, string-keyed property bag assigned onto elements.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Props(BTreeMap<String, PropValue>);

impl Props {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<PropValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Overwrite every key present in `other`, keeping the rest.
    pub fn assign(&mut self, other: &Props) {
        for (key, value) in &other.0 {
            self.0.insert(key.clone(), value.clone());
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&PropValue> {
        self.0.get(key)
    }

    /// The `stateObj` property.
    #[must_use]
    pub fn state_obj(&self) -> Option<&Arc<EntityState>> {
        match self.0.get(PROP_STATE_OBJ) {
            Some(PropValue::Entity(state)) => Some(state),
            _ => None,
        }
    }

    /// The `hass` property.
    #[must_use]
    pub fn registry(&self) -> Option<&Arc<RegistrySnapshot>> {
        match self.0.get(PROP_HASS) {
            Some(PropValue::Registry(registry)) => Some(registry),
            _ => None,
        }
    }

    /// A boolean flag; absent or non-boolean values read as `false`.
    #[must_use]
    pub fn flag(&self, key: &str) -> bool {
        matches!(self.0.get(key), Some(PropValue::Flag(true)))
    }

    #[must_use]
    pub fn json(&self, key: &str) -> Option<&serde_json::Value> {
        match self.0.get(key) {
            Some(PropValue::Json(value)) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }
}

/// One element of the render tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderNode {
    pub id: NodeId,
    pub tag: String,
    /// `false` while no view is registered for `tag`.
    pub upgraded: bool,
    #[serde(skip_serializing_if = "Props::is_empty")]
    pub props: Props,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RenderNode>,
}

impl RenderNode {
    /// A structural element that needs no registered view (containers,
    /// labels, rows produced by views themselves).
    #[must_use]
    pub fn element(tag: impl Into<String>) -> Self {
        Self {
            id: NodeId::new(),
            tag: tag.into(),
            upgraded: true,
            props: Props::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// A placeholder for a tag that has no registered view.
    #[must_use]
    pub fn inert(tag: impl Into<String>, props: Props) -> Self {
        Self {
            upgraded: false,
            props,
            ..Self::element(tag)
        }
    }

    /// A text leaf.
    #[must_use]
    pub fn text(tag: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::element(tag)
        }
    }

    #[must_use]
    pub fn with_child(mut self, child: RenderNode) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = RenderNode>) -> Self {
        self.children.extend(children);
        self
    }

    #[must_use]
    pub fn with_props(mut self, props: Props) -> Self {
        self.props = props;
        self
    }

    /// Depth-first search for the first node with `tag`, including `self`.
    #[must_use]
    pub fn find(&self, tag: &str) -> Option<&RenderNode> {
        if self.tag == tag {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(tag))
    }

    /// Concatenated text of this node and all descendants.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let Some(text) = &self.text {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(text);
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }

    fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        write!(f, "{:width$}<{}", "", self.tag, width = depth * 2)?;
        for (key, value) in self.props.iter() {
            if key == PROP_HASS {
                continue;
            }
            write!(f, " {key}={value}")?;
        }
        f.write_str(">")?;
        if !self.upgraded {
            f.write_str(" (inert)")?;
        }
        if let Some(text) = &self.text {
            write!(f, " {text:?}")?;
        }
        writeln!(f)?;
        for child in &self.children {
            child.fmt_indented(f, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for RenderNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}
