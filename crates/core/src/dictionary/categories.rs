//! Pass 2: attach value categories from the category text feed.
//!
//! The feed is a sequence of blocks. Each block names a variable and its
//! entity through labeled field lines (`Nombre : P02`, `Entidad : PERSONA`)
//! and then lists `<code>.<label>` category lines:
//!
//! ```text
//! Nombre   : P02
//! Etiqueta : Sexo
//! Entidad  : PERSONA
//! Categorías:
//!  1. Varón
//!  2. Mujer
//! ```

use std::collections::HashSet;

use super::{Category, CategoryMode, Dictionary, DictionaryLayout};
use crate::error::DictionaryError;

/// Shape of one line of category text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Line<'a> {
    /// `label : value`, with the `:` ahead of any `.`.
    Field { label: &'a str, value: &'a str },
    /// `code.label`
    Category { code: &'a str, label: &'a str },
    /// Category-shaped but with a blank code, e.g. `. sin código`.
    Malformed,
    /// Blank or unrecognized.
    Other,
}

pub(crate) fn classify(line: &str) -> Line<'_> {
    let colon = line.find(':');
    let dot = line.find('.');
    match (colon, dot) {
        (Some(c), d) if d.is_none_or(|d| c < d) => {
            let (label, value) = line.split_at(c);
            Line::Field {
                label: label.trim(),
                value: value[1..].trim(),
            }
        }
        (_, Some(d)) => {
            let (code, label) = line.split_at(d);
            let code = code.trim();
            if code.is_empty() {
                Line::Malformed
            } else {
                Line::Category {
                    code,
                    label: label[1..].trim(),
                }
            }
        }
        _ => Line::Other,
    }
}

#[derive(Debug)]
enum State {
    /// Variable or entity not known yet; category lines are skipped.
    AwaitingHeader {
        entity: Option<String>,
        variable: Option<String>,
    },
    /// Category lines attach to `entity.variable`.
    InBlock { entity: String, variable: String },
}

impl State {
    /// A header field inside a block opens a new header, so the other half
    /// of the previous block's pair is forgotten.
    fn with_field(self, is_entity: bool, value: &str) -> State {
        let (mut entity, mut variable) = match self {
            State::AwaitingHeader { entity, variable } => (entity, variable),
            State::InBlock { .. } => (None, None),
        };
        if is_entity {
            entity = Some(value.to_string());
        } else {
            variable = Some(value.to_string());
        }
        match (entity, variable) {
            (Some(entity), Some(variable)) => State::InBlock { entity, variable },
            (entity, variable) => State::AwaitingHeader { entity, variable },
        }
    }
}

/// Counts of category lines handled by [`attach_categories`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttachReport {
    /// Category lines attached to a variable.
    pub attached: usize,
    /// Category lines seen outside a complete block header, plus
    /// category-shaped lines with a blank code.
    pub skipped: usize,
}

/// Attach the categories described by `text` to the pass-1 `dictionary`.
///
/// A block that names an entity or variable missing from the dictionary
/// means the two feeds are out of sync and fails with
/// [`DictionaryError::UnknownEntity`] or [`DictionaryError::UnknownVariable`].
/// Unrecognized lines are skipped.
pub fn attach_categories(
    mut dictionary: Dictionary,
    text: &str,
    layout: &DictionaryLayout,
) -> Result<(Dictionary, AttachReport), DictionaryError> {
    let mut state = State::AwaitingHeader {
        entity: None,
        variable: None,
    };
    let mut report = AttachReport::default();
    let mut cleared: HashSet<(String, String)> = HashSet::new();

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        match classify(raw) {
            Line::Field { label, value } => {
                if label == layout.name_label {
                    state = state.with_field(false, value);
                } else if label == layout.entity_label {
                    state = state.with_field(true, value);
                }
            }
            Line::Category { code, label } => {
                let State::InBlock { entity, variable } = &state else {
                    tracing::debug!(line = line_no, "category line outside a block, skipped");
                    report.skipped += 1;
                    continue;
                };
                let target = dictionary
                    .entity_mut(entity)
                    .ok_or_else(|| DictionaryError::UnknownEntity {
                        entity: entity.clone(),
                        line: line_no,
                    })?
                    .variable_mut(variable)
                    .ok_or_else(|| DictionaryError::UnknownVariable {
                        entity: entity.clone(),
                        variable: variable.clone(),
                        line: line_no,
                    })?;
                if layout.category_mode == CategoryMode::Replace
                    && cleared.insert((entity.clone(), variable.clone()))
                {
                    target.categories.clear();
                }
                tracing::trace!(%entity, %variable, code, "category");
                target.categories.push(Category::new(code, label));
                report.attached += 1;
            }
            Line::Malformed => {
                tracing::debug!(line = line_no, "category line without code, skipped");
                report.skipped += 1;
            }
            Line::Other => {}
        }
    }

    tracing::debug!(
        attached = report.attached,
        skipped = report.skipped,
        variables = cleared.len(),
        "attached categories"
    );
    Ok((dictionary, report))
}
