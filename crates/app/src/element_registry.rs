//! Element registry: process-wide map from tag name to view factory.
//!
//! Modules register their views here once imported; the instantiator looks
//! tags up here at render time. Like a custom-element registry, the first
//! definition of a tag wins.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use hubview_domain::render::{Props, RenderNode};

/// Renders the children of an element from its assigned props.
pub trait ElementFactory: Send + Sync {
    fn render(&self, props: &Props) -> Vec<RenderNode>;
}

impl<F> ElementFactory for F
where
    F: Fn(&Props) -> Vec<RenderNode> + Send + Sync,
{
    fn render(&self, props: &Props) -> Vec<RenderNode> {
        self(props)
    }
}

/// Shared, cheaply cloneable registry of element factories.
#[derive(Clone, Default)]
pub struct ElementRegistry {
    factories: Arc<RwLock<HashMap<String, Arc<dyn ElementFactory>>>>,
}

impl ElementRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `factory` under `tag`.
    ///
    /// Returns `false` (and keeps the existing factory) when the tag is
    /// already defined.
    pub fn define(&self, tag: impl Into<String>, factory: Arc<dyn ElementFactory>) -> bool {
        let tag = tag.into();
        let mut factories = self
            .factories
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if factories.contains_key(&tag) {
            tracing::debug!(%tag, "element already defined, keeping first definition");
            return false;
        }
        factories.insert(tag, factory);
        true
    }

    #[must_use]
    pub fn get(&self, tag: &str) -> Option<Arc<dyn ElementFactory>> {
        self.factories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(tag)
            .cloned()
    }

    #[must_use]
    pub fn is_defined(&self, tag: &str) -> bool {
        self.factories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(tag)
    }

    /// Defined tags in sorted order.
    #[must_use]
    pub fn tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self
            .factories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        tags.sort_unstable();
        tags
    }
}

impl fmt::Debug for ElementRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementRegistry")
            .field("tags", &self.tags())
            .finish()
    }
}
