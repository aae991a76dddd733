//! File-backed metadata source: the metadata table as a JSON array of rows
//! and the category feed as plain text, both fetched beforehand.

use std::path::{Path, PathBuf};

use redatam_core::{DictionaryError, MetadataRow, MetadataSource};

pub(crate) struct FileSource {
    rows: PathBuf,
    categories: Option<PathBuf>,
}

impl FileSource {
    pub(crate) fn new(rows: &Path, categories: Option<&Path>) -> Self {
        FileSource {
            rows: rows.to_path_buf(),
            categories: categories.map(Path::to_path_buf),
        }
    }
}

fn read(path: &Path) -> Result<String, DictionaryError> {
    std::fs::read_to_string(path).map_err(|e| {
        DictionaryError::Source(format!("error reading '{}': {}", path.display(), e))
    })
}

impl MetadataSource for FileSource {
    fn rows(&self) -> Result<Vec<MetadataRow>, DictionaryError> {
        let content = read(&self.rows)?;
        serde_json::from_str(&content).map_err(|e| {
            DictionaryError::Source(format!(
                "error parsing rows in '{}': {}",
                self.rows.display(),
                e
            ))
        })
    }

    /// The file already holds the feed; `variables` only matters to a live
    /// endpoint.
    fn category_text(&self, variables: &[String]) -> Result<String, DictionaryError> {
        match &self.categories {
            Some(path) => {
                tracing::debug!(
                    path = %path.display(),
                    variables = variables.len(),
                    "reading category feed"
                );
                read(path)
            }
            None => Ok(String::new()),
        }
    }
}
