//! Tool configuration read from `redatam.toml`.
//!
//! # Example
//!
//! ```toml
//! [database]
//! base = "CPV2010B"
//!
//! [dictionary]
//! geo_type_tag = "C"
//! trailing_entity = "always-data"   # or "classify"
//! name_label = "Nombre"
//! entity_label = "Entidad"
//! category_mode = "replace"         # or "append"
//! ```
//!
//! Every section and key is optional; missing ones take the CPV2010
//! defaults.

use std::path::Path;

use redatam_core::{CategoryRequest, DictionaryLayout};
use serde::{Deserialize, Serialize};

/// Config file looked up in the working directory when `--config` is absent.
pub(crate) const DEFAULT_CONFIG_FILE: &str = "redatam.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct RedatamConfig {
    /// `[database]` -- parameters of the category request form.
    pub database: CategoryRequest,
    /// `[dictionary]` -- layout of the metadata feeds.
    pub dictionary: DictionaryLayout,
}

/// Read and parse a config TOML file from `path`.
///
/// Returns a human-readable error string on failure.
pub(crate) fn read_config(path: &Path) -> Result<RedatamConfig, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("could not read '{}': {}", path.display(), e))?;

    toml::from_str(&content).map_err(|e| format!("could not parse '{}': {}", path.display(), e))
}

/// Resolve the effective config: the explicit `--config` file, else
/// `redatam.toml` in the working directory, else built-in defaults.
pub(crate) fn load_config(explicit: Option<&Path>) -> Result<RedatamConfig, String> {
    if let Some(path) = explicit {
        return read_config(path);
    }
    let implicit = Path::new(DEFAULT_CONFIG_FILE);
    if implicit.is_file() {
        tracing::debug!(path = %implicit.display(), "using config from working directory");
        read_config(implicit)
    } else {
        Ok(RedatamConfig::default())
    }
}
