//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`HubViewError`]
//! via `#[from]` (no `String` catch-all variants).

/// Top-level error for hubview operations.
#[derive(Debug, thiserror::Error)]
pub enum HubViewError {
    #[error("validation error")]
    Validation(#[from] ValidationError),
}

/// Invariant violations detected while building domain values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("entity id must not be empty")]
    EmptyEntityId,

    #[error("entity id {0:?} has no domain separator")]
    MissingSeparator(String),

    #[error("entity id {0:?} is malformed")]
    InvalidEntityId(String),
}

/// Failure to import the module backing a view type.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("no module provides view {0:?}")]
    ModuleNotFound(String),

    #[error("module for view {view:?} failed to load")]
    Failed {
        view: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ImportError {
    /// The view type whose import failed.
    #[must_use]
    pub fn view(&self) -> &str {
        match self {
            Self::ModuleNotFound(view) | Self::Failed { view, .. } => view,
        }
    }
}
