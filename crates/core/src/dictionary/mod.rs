//! Census metadata dictionary: entities, their variables and the value
//! categories of each variable.
//!
//! Construction runs in two passes:
//!
//! 1. [`build_dictionary`] groups metadata rows into entities and classifies
//!    each entity as geographic or data.
//! 2. [`attach_categories`] takes the pass-1 dictionary by value, fills the
//!    category lists from the category text feed and hands it back.
//!
//! [`build_catalog`] runs both passes against a [`MetadataSource`].

pub mod categories;
pub mod request;
pub mod rows;
pub mod source;

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

pub use categories::{attach_categories, AttachReport};
pub use request::CategoryRequest;
pub use rows::{build_dictionary, MetadataRow};
pub use source::{build_catalog, MetadataSource};

// ──────────────────────────────────────────────
// Layout of the source feeds
// ──────────────────────────────────────────────

/// How the last entity of the metadata table is classified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrailingEntity {
    /// The last entity is a data entity. This is a fixed property of the
    /// CPV2010 dictionary table; a trailing entity with geographic
    /// variables contradicts the layout and fails the build.
    #[default]
    AlwaysData,
    /// Classify the last entity by its type tags like every other entity.
    Classify,
}

/// What happens to a variable's existing categories when the category feed
/// lists it again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryMode {
    /// The first category line for a variable in one feed clears the list,
    /// so replaying a feed leaves the dictionary unchanged.
    #[default]
    Replace,
    /// Always append; replaying a feed duplicates entries.
    Append,
}

/// Format conventions of the metadata table and the category text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DictionaryLayout {
    /// Type tag marking a geographic code variable.
    pub geo_type_tag: String,
    pub trailing_entity: TrailingEntity,
    /// Field label introducing a variable name in the category text.
    pub name_label: String,
    /// Field label introducing an entity name in the category text.
    pub entity_label: String,
    pub category_mode: CategoryMode,
}

impl Default for DictionaryLayout {
    fn default() -> Self {
        DictionaryLayout {
            geo_type_tag: "C".to_string(),
            trailing_entity: TrailingEntity::AlwaysData,
            name_label: "Nombre".to_string(),
            entity_label: "Entidad".to_string(),
            category_mode: CategoryMode::Replace,
        }
    }
}

// ──────────────────────────────────────────────
// Dictionary
// ──────────────────────────────────────────────

/// One valid value of a variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub code: String,
    pub label: String,
}

impl Category {
    pub fn new(code: impl Into<String>, label: impl Into<String>) -> Self {
        Category {
            code: code.into(),
            label: label.into(),
        }
    }
}

// Serialized as a `[code, label]` pair.
impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (&self.code, &self.label).serialize(serializer)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub name: String,
    pub type_tag: String,
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// Has at least one geographic code variable; an area level.
    Geographic,
    /// Carries queryable attributes.
    Data,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub code: String,
    pub name: String,
    pub kind: EntityKind,
    pub variables: Vec<Variable>,
}

impl Entity {
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name == name)
    }

    pub(crate) fn variable_mut(&mut self, name: &str) -> Option<&mut Variable> {
        self.variables.iter_mut().find(|v| v.name == name)
    }
}

/// Ordered entity → variable → categories lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    entities: Vec<Entity>,
}

impl Dictionary {
    pub(crate) fn from_entities(entities: Vec<Entity>) -> Self {
        Dictionary { entities }
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.name == name)
    }

    pub(crate) fn entity_mut(&mut self, name: &str) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.name == name)
    }

    /// Categories of `entity.variable`, if both exist.
    pub fn categories(&self, entity: &str, variable: &str) -> Option<&[Category]> {
        self.entity(entity)
            .and_then(|e| e.variable(variable))
            .map(|v| v.categories.as_slice())
    }

    /// Names of geographic entities, in dictionary order.
    pub fn geo_entities(&self) -> Vec<String> {
        self.names_of(EntityKind::Geographic)
    }

    /// Names of data entities, in dictionary order.
    pub fn data_entities(&self) -> Vec<String> {
        self.names_of(EntityKind::Data)
    }

    /// Every `ENTITY.VARIABLE` identifier of the data entities. Geographic
    /// entities are area levels, not queryable attributes.
    pub fn queryable_variables(&self) -> Vec<String> {
        self.entities
            .iter()
            .filter(|e| e.kind == EntityKind::Data)
            .flat_map(|e| {
                e.variables
                    .iter()
                    .map(move |v| format!("{}.{}", e.name, v.name))
            })
            .collect()
    }

    fn names_of(&self, kind: EntityKind) -> Vec<String> {
        self.entities
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| e.name.clone())
            .collect()
    }
}

struct VariableMap<'a>(&'a [Variable]);

impl Serialize for VariableMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for variable in self.0 {
            map.serialize_entry(&variable.name, &variable.categories)?;
        }
        map.end()
    }
}

// Written entry by entry so the output keeps dictionary order.
impl Serialize for Dictionary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entities.len()))?;
        for entity in &self.entities {
            map.serialize_entry(&entity.name, &VariableMap(&entity.variables))?;
        }
        map.end()
    }
}

/// Result of a dictionary build: the dictionary plus its entity classes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DictionaryBuild {
    pub dictionary: Dictionary,
    pub geo_entities: Vec<String>,
    pub data_entities: Vec<String>,
}

impl DictionaryBuild {
    pub fn new(dictionary: Dictionary) -> Self {
        let geo_entities = dictionary.geo_entities();
        let data_entities = dictionary.data_entities();
        DictionaryBuild {
            dictionary,
            geo_entities,
            data_entities,
        }
    }
}
