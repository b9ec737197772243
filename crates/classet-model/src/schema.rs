//! Schema input: the ordered list of labels and their groups.
//!
//! Two JSON shapes are accepted:
//!
//! ```text
//! [{"name": "a", "group": "default"}, {"name": "d", "group": 1}]
//! {"a": "default", "d": 1}
//! ```
//!
//! The sequence shape keeps declaration order, which is the order labels are
//! serialized in. JSON objects are read into a map sorted by label, so the
//! mapping shape yields alphabetical precedence.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Result;
use crate::group::GroupKey;
use crate::label::Label;

/// One schema declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaEntry {
    pub name: Label,
    #[serde(default = "GroupKey::ungrouped")]
    pub group: GroupKey,
}

impl SchemaEntry {
    pub fn new(name: impl Into<Label>, group: impl Into<GroupKey>) -> Self {
        Self {
            name: name.into(),
            group: group.into(),
        }
    }
}

/// Ordered schema declarations. May contain duplicate labels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    entries: Vec<SchemaEntry>,
}

impl<'de> Deserialize<'de> for Schema {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(SchemaVisitor)
    }
}

/// Dispatches on the JSON shape so entry errors surface unchanged.
struct SchemaVisitor;

impl<'de> Visitor<'de> for SchemaVisitor {
    type Value = Schema;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a list of {name, group} records or an object of label to group")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Schema, A::Error> {
        let mut entries = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(entry) = seq.next_element::<SchemaEntry>()? {
            entries.push(entry);
        }
        Ok(Schema { entries })
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Schema, A::Error> {
        let mut sorted = BTreeMap::new();
        while let Some((label, group)) = map.next_entry::<Label, GroupKey>()? {
            sorted.insert(label, group);
        }
        Ok(sorted.into_iter().collect())
    }
}

impl Serialize for Schema {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a declaration.
    #[must_use]
    pub fn with(mut self, name: impl Into<Label>, group: impl Into<GroupKey>) -> Self {
        self.push(name, group);
        self
    }

    pub fn push(&mut self, name: impl Into<Label>, group: impl Into<GroupKey>) {
        self.entries.push(SchemaEntry::new(name, group));
    }

    pub fn entries(&self) -> &[SchemaEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse either schema shape from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON schema file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

impl FromIterator<SchemaEntry> for Schema {
    fn from_iter<I: IntoIterator<Item = SchemaEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<L: Into<Label>, G: Into<GroupKey>> FromIterator<(L, G)> for Schema {
    fn from_iter<I: IntoIterator<Item = (L, G)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(name, group)| SchemaEntry::new(name, group))
            .collect()
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a SchemaEntry;
    type IntoIter = std::slice::Iter<'a, SchemaEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
