//! Module importer port: asynchronously fetch the module backing a view type.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use hubview_domain::error::ImportError;

use crate::element_registry::ElementFactory;

/// The result of importing a view module: the elements it defines.
///
/// Importing a module does not render anything; the loader registers the
/// definitions into the shared element registry.
#[derive(Default, Clone)]
pub struct ViewModule {
    definitions: Vec<(String, Arc<dyn ElementFactory>)>,
}

impl ViewModule {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element definition to the module.
    #[must_use]
    pub fn define(mut self, tag: impl Into<String>, factory: Arc<dyn ElementFactory>) -> Self {
        self.definitions.push((tag.into(), factory));
        self
    }

    #[must_use]
    pub fn tags(&self) -> Vec<&str> {
        self.definitions.iter().map(|(tag, _)| tag.as_str()).collect()
    }

    pub fn into_definitions(self) -> impl Iterator<Item = (String, Arc<dyn ElementFactory>)> {
        self.definitions.into_iter()
    }
}

impl fmt::Debug for ViewModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewModule")
            .field("tags", &self.tags())
            .finish()
    }
}

/// Imports the module implementing a resolved view type.
///
/// `view_type` is what the resolvers produce: a domain (`"light"`),
/// `"default"`, or a state-card type (`"state-card-toggle"`).
pub trait ModuleImporter: Send + Sync + 'static {
    /// Import the module for `view_type`.
    fn import(
        &self,
        view_type: &str,
    ) -> impl Future<Output = Result<ViewModule, ImportError>> + Send;
}

impl<T: ModuleImporter> ModuleImporter for Arc<T> {
    fn import(
        &self,
        view_type: &str,
    ) -> impl Future<Output = Result<ViewModule, ImportError>> + Send {
        (**self).import(view_type)
    }
}
