//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside
//! world. The loader only knows *that* a view module can be imported, not
//! where it comes from.

pub mod module_importer;

pub use module_importer::{ModuleImporter, ViewModule};
