//! Group keys that decide which labels exclude each other.
//!
//! Labels that share a [`GroupKey::Name`] or [`GroupKey::Index`] are mutually
//! exclusive: enabling one disables the rest. Labels in the default group or
//! with no group never exclude anything.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Marker used in schema files for the default group.
pub const DEFAULT_GROUP: &str = "default";

/// The group a schema label belongs to.
///
/// A string key and an integer key never compare equal, so `"1"` and `1`
/// are distinct groups.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GroupKey {
    /// Labels enabled automatically when a binding is acquired.
    Default,
    /// No group. Written as `null` in schema files.
    Ungrouped,
    /// A named exclusive group.
    Name(String),
    /// A numbered exclusive group.
    Index(i64),
}

impl GroupKey {
    pub fn name(value: impl Into<String>) -> Self {
        let value = value.into();
        if value == DEFAULT_GROUP {
            GroupKey::Default
        } else {
            GroupKey::Name(value)
        }
    }

    pub fn ungrouped() -> Self {
        GroupKey::Ungrouped
    }

    /// Returns true if labels sharing this key exclude each other.
    pub fn is_exclusive(&self) -> bool {
        matches!(self, GroupKey::Name(_) | GroupKey::Index(_))
    }

    pub fn is_default(&self) -> bool {
        matches!(self, GroupKey::Default)
    }
}

impl From<&str> for GroupKey {
    fn from(value: &str) -> Self {
        GroupKey::name(value)
    }
}

impl From<String> for GroupKey {
    fn from(value: String) -> Self {
        GroupKey::name(value)
    }
}

impl From<i64> for GroupKey {
    fn from(value: i64) -> Self {
        GroupKey::Index(value)
    }
}

impl<T: Into<GroupKey>> From<Option<T>> for GroupKey {
    fn from(value: Option<T>) -> Self {
        value.map_or(GroupKey::Ungrouped, Into::into)
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Default => f.write_str(DEFAULT_GROUP),
            GroupKey::Ungrouped => f.write_str("null"),
            GroupKey::Name(name) => f.write_str(name),
            GroupKey::Index(index) => write!(f, "{index}"),
        }
    }
}

impl Serialize for GroupKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            GroupKey::Default => serializer.serialize_str(DEFAULT_GROUP),
            GroupKey::Ungrouped => serializer.serialize_none(),
            GroupKey::Name(name) => serializer.serialize_str(name),
            GroupKey::Index(index) => serializer.serialize_i64(*index),
        }
    }
}

impl<'de> Deserialize<'de> for GroupKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(GroupKeyVisitor)
    }
}

struct GroupKeyVisitor;

impl<'de> Visitor<'de> for GroupKeyVisitor {
    type Value = GroupKey;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("null, a string, or an integer group key")
    }

    fn visit_unit<E: de::Error>(self) -> Result<GroupKey, E> {
        Ok(GroupKey::Ungrouped)
    }

    fn visit_none<E: de::Error>(self) -> Result<GroupKey, E> {
        Ok(GroupKey::Ungrouped)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<GroupKey, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<GroupKey, E> {
        Ok(GroupKey::name(value))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<GroupKey, E> {
        Ok(GroupKey::name(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<GroupKey, E> {
        Ok(GroupKey::Index(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<GroupKey, E> {
        i64::try_from(value)
            .map(GroupKey::Index)
            .map_err(|_| E::custom(format!("group index {value} is out of range")))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<GroupKey, E> {
        Err(E::invalid_type(de::Unexpected::Float(value), &self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_marker_string_is_default_group() {
        assert_eq!(GroupKey::name("default"), GroupKey::Default);
        assert_eq!(GroupKey::from("size"), GroupKey::Name("size".to_string()));
    }

    #[test]
    fn only_named_and_numbered_groups_are_exclusive() {
        assert!(!GroupKey::Default.is_exclusive());
        assert!(!GroupKey::Ungrouped.is_exclusive());
        assert!(GroupKey::Index(1).is_exclusive());
        assert!(GroupKey::name("tone").is_exclusive());
    }

    #[test]
    fn string_and_integer_keys_differ() {
        assert_ne!(GroupKey::name("1"), GroupKey::Index(1));
    }

    #[test]
    fn deserializes_json_group_values() {
        let keys: Vec<GroupKey> =
            serde_json::from_str(r#"["default", null, 1, "size"]"#).expect("parse keys");
        assert_eq!(
            keys,
            vec![
                GroupKey::Default,
                GroupKey::Ungrouped,
                GroupKey::Index(1),
                GroupKey::Name("size".to_string()),
            ]
        );
    }

    #[test]
    fn rejects_fractional_group_values() {
        let result: Result<GroupKey, _> = serde_json::from_str("1.5");
        assert!(result.is_err());
    }

    #[test]
    fn serializes_back_to_schema_values() {
        let json = serde_json::to_string(&vec![
            GroupKey::Default,
            GroupKey::Ungrouped,
            GroupKey::Index(2),
        ])
        .expect("serialize keys");
        assert_eq!(json, r#"["default",null,2]"#);
    }
}
