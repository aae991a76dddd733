//! Boundary to whatever retrieves the raw metadata (HTTP scraper, files,
//! fixtures) and the full two-pass catalog build on top of it.

use super::{attach_categories, build_dictionary, DictionaryBuild, DictionaryLayout, MetadataRow};
use crate::error::DictionaryError;

/// Supplier of the two metadata feeds.
pub trait MetadataSource {
    /// Rows of the metadata table, in table order.
    fn rows(&self) -> Result<Vec<MetadataRow>, DictionaryError>;

    /// Category text covering `variables` (`ENTITY.VARIABLE` identifiers).
    fn category_text(&self, variables: &[String]) -> Result<String, DictionaryError>;
}

/// Build the full catalog: entities and classes from the row feed, then
/// categories for every queryable variable from the category feed.
pub fn build_catalog<S>(
    source: &S,
    layout: &DictionaryLayout,
) -> Result<DictionaryBuild, DictionaryError>
where
    S: MetadataSource + ?Sized,
{
    let pass1 = build_dictionary(source.rows()?, layout)?;
    let variables = pass1.dictionary.queryable_variables();
    let text = source.category_text(&variables)?;
    let (dictionary, report) = attach_categories(pass1.dictionary, &text, layout)?;
    tracing::info!(
        entities = dictionary.len(),
        variables = variables.len(),
        categories = report.attached,
        "metadata catalog ready"
    );
    Ok(DictionaryBuild::new(dictionary))
}
