//! Pass 1: group metadata rows into entities and classify them.
//!
//! The metadata table lists one header row per entity followed by that
//! entity's variable rows. All rows of an entity share the entity part of
//! the `#` code, so a change of entity code starts a new entity.

use serde::{Deserialize, Serialize};

use super::{
    Dictionary, DictionaryBuild, DictionaryLayout, Entity, EntityKind, TrailingEntity, Variable,
};
use crate::error::DictionaryError;

/// One row of the metadata table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataRow {
    /// The `#` column: `<entity code>.<variable index>`.
    pub code: String,
    /// Entity display name.
    pub entity: String,
    /// Variable display name; unused on entity header rows.
    #[serde(default)]
    pub variable: String,
    #[serde(rename = "type", default)]
    pub type_tag: String,
}

impl MetadataRow {
    pub fn new(
        code: impl Into<String>,
        entity: impl Into<String>,
        variable: impl Into<String>,
        type_tag: impl Into<String>,
    ) -> Self {
        MetadataRow {
            code: code.into(),
            entity: entity.into(),
            variable: variable.into(),
            type_tag: type_tag.into(),
        }
    }

    /// The entity part of the code: text before the first `.`.
    pub fn entity_code(&self) -> &str {
        let code = self.code.trim();
        code.split_once('.').map_or(code, |(entity, _)| entity.trim())
    }
}

struct OpenEntity {
    code: String,
    name: String,
    geographic: bool,
    variables: Vec<Variable>,
}

impl OpenEntity {
    fn finish(self, kind: EntityKind) -> Entity {
        Entity {
            code: self.code,
            name: self.name,
            kind,
            variables: self.variables,
        }
    }

    fn classified(self) -> Entity {
        let kind = if self.geographic {
            EntityKind::Geographic
        } else {
            EntityKind::Data
        };
        self.finish(kind)
    }
}

/// Build the pass-1 dictionary from metadata rows.
///
/// Category lists start empty; see
/// [`attach_categories`](super::attach_categories).
pub fn build_dictionary<I>(
    rows: I,
    layout: &DictionaryLayout,
) -> Result<DictionaryBuild, DictionaryError>
where
    I: IntoIterator<Item = MetadataRow>,
{
    let mut entities: Vec<Entity> = Vec::new();
    let mut open: Option<OpenEntity> = None;

    for (idx, row) in rows.into_iter().enumerate() {
        let row_no = idx + 1;
        let code = row.entity_code().to_string();
        if code.is_empty() {
            return Err(DictionaryError::MissingEntityCode { row: row_no });
        }

        let continues = open.as_ref().is_some_and(|e| e.code == code);
        if !continues {
            // Header row of a new entity.
            if let Some(previous) = open.take() {
                entities.push(previous.classified());
            }
            let name = row.entity.trim().to_string();
            if entities.iter().any(|e| e.name == name) {
                return Err(DictionaryError::DuplicateEntity { name, row: row_no });
            }
            tracing::trace!(entity = %name, code = %code, "entity header");
            open = Some(OpenEntity {
                code,
                name,
                geographic: false,
                variables: Vec::new(),
            });
            continue;
        }

        let Some(current) = open.as_mut() else {
            continue;
        };
        let variable = row.variable.trim();
        if variable.is_empty() {
            tracing::debug!(
                row = row_no,
                entity = %current.name,
                "skipping row without variable name"
            );
            continue;
        }
        if current.variables.iter().any(|v| v.name == variable) {
            return Err(DictionaryError::DuplicateVariable {
                entity: current.name.clone(),
                variable: variable.to_string(),
                row: row_no,
            });
        }
        let type_tag = row.type_tag.trim();
        if type_tag == layout.geo_type_tag {
            current.geographic = true;
        }
        current.variables.push(Variable {
            name: variable.to_string(),
            type_tag: type_tag.to_string(),
            categories: Vec::new(),
        });
    }

    if let Some(last) = open {
        let entity = match layout.trailing_entity {
            TrailingEntity::AlwaysData if last.geographic => {
                return Err(DictionaryError::TrailingEntityGeographic { name: last.name });
            }
            TrailingEntity::AlwaysData => last.finish(EntityKind::Data),
            TrailingEntity::Classify => last.classified(),
        };
        entities.push(entity);
    }

    let build = DictionaryBuild::new(Dictionary::from_entities(entities));
    tracing::debug!(
        entities = build.dictionary.len(),
        geographic = build.geo_entities.len(),
        data = build.data_entities.len(),
        "built metadata dictionary"
    );
    Ok(build)
}
