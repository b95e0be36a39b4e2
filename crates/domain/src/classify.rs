//! Domain classifier: splits an entity id into its domain and object id.
//!
//! Both functions are total: an id without a `.` separator is its own domain
//! and has an empty object id.

/// Separator between the domain and the object id.
pub const DOMAIN_SEPARATOR: char = '.';

/// Return the domain of an entity id (everything before the first `.`).
#[must_use]
pub fn domain_of(entity_id: &str) -> &str {
    entity_id
        .split_once(DOMAIN_SEPARATOR)
        .map_or(entity_id, |(domain, _)| domain)
}

/// Return the object id of an entity id (everything after the first `.`).
#[must_use]
pub fn object_id_of(entity_id: &str) -> &str {
    entity_id
        .split_once(DOMAIN_SEPARATOR)
        .map_or("", |(_, object_id)| object_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_return_prefix_before_separator() {
        assert_eq!(domain_of("light.kitchen_lights"), "light");
        assert_eq!(domain_of("input_select.who_cooks"), "input_select");
        assert_eq!(domain_of("sensor.outside_temperature"), "sensor");
    }

    #[test]
    fn should_split_on_first_separator_only() {
        assert_eq!(domain_of("sensor.a.b.c"), "sensor");
        assert_eq!(object_id_of("sensor.a.b.c"), "a.b.c");
    }

    #[test]
    fn should_return_whole_string_when_separator_missing() {
        assert_eq!(domain_of("sun"), "sun");
        assert_eq!(object_id_of("sun"), "");
    }

    #[test]
    fn should_return_domain_for_every_well_formed_id() {
        for (domain, rest) in [
            ("climate", "hallway"),
            ("media_player", "living_room_tv"),
            ("x", "y"),
            ("zone", "home"),
        ] {
            let id = format!("{domain}.{rest}");
            assert_eq!(domain_of(&id), domain);
            assert_eq!(object_id_of(&id), rest);
        }
    }

    #[test]
    fn should_handle_empty_input() {
        assert_eq!(domain_of(""), "");
        assert_eq!(object_id_of(""), "");
    }
}
