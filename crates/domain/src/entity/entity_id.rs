//! Entity identifier: a `<domain>.<object_id>` string.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::classify::{domain_of, object_id_of};
use crate::error::ValidationError;

/// Globally unique identifier of an entity, e.g. `light.kitchen_lights`.
///
/// Deserialization never rejects an id: snapshot data coming from the
/// backend is rendered as-is. Use [`EntityId::parse`] where user input
/// must be validated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Parse and validate an entity id.
    ///
    /// Both halves must be non-empty, use only `[a-z0-9_]`, and must not
    /// start or end with `_`. The domain must not contain `__`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] describing the first violated rule.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        if value.is_empty() {
            return Err(ValidationError::EmptyEntityId);
        }
        let Some((domain, object_id)) = value.split_once('.') else {
            return Err(ValidationError::MissingSeparator(value.to_string()));
        };
        if !is_valid_slug(domain) || domain.contains("__") || !is_valid_slug(object_id) {
            return Err(ValidationError::InvalidEntityId(value.to_string()));
        }
        Ok(Self(value.to_string()))
    }

    /// Wrap a string without validating it.
    #[must_use]
    pub fn new_unchecked(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The domain prefix, see [`domain_of`].
    #[must_use]
    pub fn domain(&self) -> &str {
        domain_of(&self.0)
    }

    /// The part after the domain, see [`object_id_of`].
    #[must_use]
    pub fn object_id(&self) -> &str {
        object_id_of(&self.0)
    }
}

fn is_valid_slug(part: &str) -> bool {
    !part.is_empty()
        && !part.starts_with('_')
        && !part.ends_with('_')
        && part
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for EntityId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for EntityId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
