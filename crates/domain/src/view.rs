//! Type resolver: maps an entity domain to the view that presents it.
//!
//! The tables below are configuration data. Lookups go through hash sets
//! built once on first use, so resolution is O(1) regardless of table size.

use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

use crate::classify::domain_of;
use crate::entity::EntityState;

/// Domains that have a dedicated more-info view.
pub const DOMAINS_WITH_MORE_INFO: &[&str] = &[
    "alarm_control_panel",
    "automation",
    "camera",
    "climate",
    "configurator",
    "counter",
    "cover",
    "fan",
    "group",
    "humidifier",
    "input_datetime",
    "light",
    "lock",
    "media_player",
    "person",
    "remote",
    "script",
    "siren",
    "sun",
    "timer",
    "update",
    "vacuum",
    "water_heater",
    "weather",
];

/// Domains whose generic more-info view is suppressed; their row control
/// already shows everything there is.
pub const DOMAINS_HIDE_DEFAULT_MORE_INFO: &[&str] = &[
    "button",
    "input_button",
    "input_number",
    "input_select",
    "input_text",
    "number",
    "scene",
    "select",
    "text",
];

/// Domains that have a dedicated state card.
pub const DOMAINS_WITH_CARD: &[&str] = &[
    "climate",
    "configurator",
    "cover",
    "input_number",
    "input_select",
    "input_text",
    "lock",
    "media_player",
    "number",
    "scene",
    "script",
    "select",
    "text",
    "timer",
    "vacuum",
    "water_heater",
];

/// Domains whose state card is a plain on/off toggle.
pub const DOMAINS_TOGGLE: &[&str] = &[
    "automation",
    "fan",
    "group",
    "humidifier",
    "input_boolean",
    "light",
    "remote",
    "siren",
    "switch",
];

/// Prefix of every more-info element tag.
pub const MORE_INFO_TAG_PREFIX: &str = "more-info-";
/// Prefix of every state card element tag.
pub const STATE_CARD_TAG_PREFIX: &str = "state-card-";

fn lookup(table: &'static [&'static str]) -> HashSet<&'static str> {
    table.iter().copied().collect()
}

static WITH_MORE_INFO: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| lookup(DOMAINS_WITH_MORE_INFO));
static HIDE_DEFAULT_MORE_INFO: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| lookup(DOMAINS_HIDE_DEFAULT_MORE_INFO));
static WITH_CARD: LazyLock<HashSet<&'static str>> = LazyLock::new(|| lookup(DOMAINS_WITH_CARD));
static TOGGLE: LazyLock<HashSet<&'static str>> = LazyLock::new(|| lookup(DOMAINS_TOGGLE));

/// Outcome of resolving a domain to a more-info view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoreInfoType {
    /// Render the view dedicated to this domain.
    Dedicated(&'static str),
    /// Render nothing beyond the base content.
    Hidden,
    /// Render the generic attribute view.
    Default,
}

impl MoreInfoType {
    /// The type name: the domain itself, `"hidden"` or `"default"`.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dedicated(domain) => *domain,
            Self::Hidden => "hidden",
            Self::Default => "default",
        }
    }

    /// Element tag rendering this type; `None` for [`Hidden`](Self::Hidden).
    #[must_use]
    pub fn tag(&self) -> Option<String> {
        match self {
            Self::Hidden => None,
            other => Some(format!("{MORE_INFO_TAG_PREFIX}{}", other.as_str())),
        }
    }
}

impl fmt::Display for MoreInfoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve a domain to its more-info type.
#[must_use]
pub fn resolve_type(domain: &str) -> MoreInfoType {
    if let Some(&dedicated) = WITH_MORE_INFO.get(domain) {
        MoreInfoType::Dedicated(dedicated)
    } else if HIDE_DEFAULT_MORE_INFO.contains(domain) {
        MoreInfoType::Hidden
    } else {
        MoreInfoType::Default
    }
}

/// Resolve the more-info type of an entity.
#[must_use]
pub fn more_info_type(state: &EntityState) -> MoreInfoType {
    resolve_type(domain_of(state.entity_id.as_str()))
}

/// Outcome of resolving an entity to a state card (the one-line row view).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateCardType {
    Dedicated(&'static str),
    Toggle,
    Display,
}

impl StateCardType {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dedicated(domain) => *domain,
            Self::Toggle => "toggle",
            Self::Display => "display",
        }
    }

    #[must_use]
    pub fn tag(&self) -> String {
        format!("{STATE_CARD_TAG_PREFIX}{}", self.as_str())
    }
}

impl fmt::Display for StateCardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve the state card for an entity. Unavailable entities always get
/// the read-only display card.
#[must_use]
pub fn state_card_type(state: &EntityState) -> StateCardType {
    if state.is_unavailable() {
        return StateCardType::Display;
    }
    let domain = domain_of(state.entity_id.as_str());
    if let Some(&dedicated) = WITH_CARD.get(domain) {
        StateCardType::Dedicated(dedicated)
    } else if TOGGLE.contains(domain) {
        StateCardType::Toggle
    } else {
        StateCardType::Display
    }
}
