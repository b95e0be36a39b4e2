//! # hubview-adapter-builtin
//!
//! View modules shipped with hubview, served through the
//! [`ModuleImporter`] port as if they were fetched on demand.
//!
//! ## Provided modules
//!
//! | View type | Defines | Renders |
//! |-----------|---------|---------|
//! | `light` | `more-info-light` | Toggle, brightness, colour temperature, effects |
//! | `climate` | `more-info-climate` | Current/target temperature, HVAC modes |
//! | `cover` | `more-info-cover` | Position and open/stop/close controls |
//! | `lock` | `more-info-lock` | Lock/unlock control and code field |
//! | other dedicated domains | `more-info-<domain>` | State header plus attributes |
//! | `default` | `more-info-default` | Attribute table |
//! | `state-card-<type>` | `state-card-<type>` | One-line rows for group content |
//!
//! An optional delay simulates network latency, and individual view types
//! can be disabled to exercise the inert fallback.
//!
//! ## Dependency rule
//!
//! Depends on `hubview-app` (port traits) and `hubview-domain` only.

mod views;

use std::collections::HashSet;
use std::time::Duration;

use hubview_app::ports::{ModuleImporter, ViewModule};
use hubview_domain::error::ImportError;

/// Errors raised by the built-in importer before a module is served.
#[derive(Debug, thiserror::Error)]
pub enum BuiltinError {
    #[error("view {0:?} is disabled by configuration")]
    Disabled(String),
}

impl From<BuiltinError> for ImportError {
    fn from(err: BuiltinError) -> Self {
        let view = match &err {
            BuiltinError::Disabled(view) => view.clone(),
        };
        Self::Failed {
            view,
            source: Box::new(err),
        }
    }
}

/// Importer serving the built-in view modules.
#[derive(Debug, Default)]
pub struct BuiltinModules {
    import_delay: Duration,
    disabled: HashSet<String>,
}

impl BuiltinModules {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait `delay` before serving each module.
    #[must_use]
    pub fn with_import_delay(mut self, delay: Duration) -> Self {
        self.import_delay = delay;
        self
    }

    /// Fail imports of the given view types.
    #[must_use]
    pub fn with_disabled<I, S>(mut self, views: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.disabled.extend(views.into_iter().map(Into::into));
        self
    }

    /// Whether a module exists for `view_type` and is not disabled.
    #[must_use]
    pub fn provides(&self, view_type: &str) -> bool {
        !self.disabled.contains(view_type) && views::catalog(view_type).is_some()
    }
}

impl ModuleImporter for BuiltinModules {
    #[tracing::instrument(skip(self))]
    async fn import(&self, view_type: &str) -> Result<ViewModule, ImportError> {
        if !self.import_delay.is_zero() {
            tokio::time::sleep(self.import_delay).await;
        }
        if self.disabled.contains(view_type) {
            return Err(BuiltinError::Disabled(view_type.to_string()).into());
        }
        let module = views::catalog(view_type)
            .ok_or_else(|| ImportError::ModuleNotFound(view_type.to_string()))?;
        tracing::debug!(tags = ?module.tags(), "serving builtin module");
        Ok(module)
    }
}
