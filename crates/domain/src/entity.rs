//! Entity state: the central value the views render.
//!
//! An entity is a tracked device or service exposed by the backend,
//! identified by a `<domain>.<object_id>` string. The UI only ever sees
//! whole [`EntityState`] snapshots pushed by the backend; it never patches
//! one in place.

mod attribute_value;
mod entity_id;
mod state;

pub use attribute_value::AttributeValue;
pub use entity_id::EntityId;
pub use state::{Context, EntityState, EntityStateBuilder, STATE_UNAVAILABLE, STATE_UNKNOWN};
