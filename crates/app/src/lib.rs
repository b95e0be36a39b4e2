//! # hubview-app
//!
//! Application layer: the lazy-loading dispatcher and **port definitions**.
//!
//! ## Responsibilities
//! - Define the **port trait** adapters implement:
//!   - `ModuleImporter`: fetch the view module for a view type
//! - Hold the **element registry** and instantiate elements by tag
//! - Run the **lazy loader**: each view module imported at most once,
//!   off the render path, with outcomes broadcast to containers
//! - Own the live **registry snapshot** and notify readers of replacements
//! - Provide the **containers** (`MoreInfoContent`, `GroupContent`) that run
//!   classify → resolve → load → instantiate on every render
//!
//! ## Dependency rule
//! Depends on `hubview-domain` only (plus `tokio::sync` for channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod container;
pub mod element_registry;
pub mod group_content;
pub mod instantiator;
pub mod loader;
pub mod more_info;
pub mod ports;
pub mod snapshot_store;
