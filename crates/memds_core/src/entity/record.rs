//! Entities and their properties.

use crate::entity::{Key, Value};
use serde::{Deserialize, Serialize};

/// A named property value attached to an entity.
///
/// A list property is stored as several properties sharing one name, each
/// with `multiple` set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// Property name.
    pub name: String,
    /// Property value.
    pub value: Value,
    /// Whether this value is one element of a list property.
    #[serde(default)]
    pub multiple: bool,
}

impl Property {
    /// Creates a single-valued property.
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            multiple: false,
        }
    }

    /// Creates one element of a list property.
    pub fn list_item(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            multiple: true,
        }
    }
}

/// A stored entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Key identifying the entity.
    pub key: Key,
    /// Properties in insertion order.
    #[serde(default)]
    pub properties: Vec<Property>,
    /// Root of the entity group owning this entity.
    ///
    /// Entities without a group root never match an ancestor filter.
    #[serde(default)]
    pub entity_group: Option<Key>,
}

impl Entity {
    /// Creates an entity with no properties.
    ///
    /// The entity group is derived from the key's root element.
    #[must_use]
    pub fn new(key: Key) -> Self {
        let entity_group = Some(key.group_root());
        Self {
            key,
            properties: Vec::new(),
            entity_group,
        }
    }

    /// Adds a single-valued property.
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.push(Property::new(name, value));
        self
    }

    /// Adds a list property, one element per value.
    #[must_use]
    pub fn with_list<V: Into<Value>>(
        mut self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        let name = name.into();
        self.properties.extend(
            values
                .into_iter()
                .map(|value| Property::list_item(name.clone(), value)),
        );
        self
    }

    /// Sets or clears the entity group root.
    #[must_use]
    pub fn with_entity_group(mut self, group: Option<Key>) -> Self {
        self.entity_group = group;
        self
    }

    /// Returns the first value of the named property.
    #[must_use]
    pub fn first_value(&self, name: &str) -> Option<&Value> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| &p.value)
    }

    /// Returns every value of the named property, in stored order.
    pub fn values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.properties
            .iter()
            .filter(move |p| p.name == name)
            .map(|p| &p.value)
    }

    /// Returns true if the entity carries the named property.
    #[must_use]
    pub fn has_property(&self, name: &str) -> bool {
        self.properties.iter().any(|p| p.name == name)
    }

    /// Returns true if the named property is a list property.
    #[must_use]
    pub fn is_multi_valued(&self, name: &str) -> bool {
        self.properties
            .iter()
            .any(|p| p.name == name && p.multiple)
    }
}
