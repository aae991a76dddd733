//! Form payload for the dictionary endpoint that lists variable categories.
//!
//! The endpoint answers with the category text consumed by
//! [`attach_categories`](super::attach_categories). Only the form is built
//! here; sending it is up to the caller.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryRequest {
    /// Database name, e.g. `CPV2010B`.
    pub base: String,
    /// Server-side page template.
    pub main: String,
    pub user_code: String,
}

impl Default for CategoryRequest {
    fn default() -> Self {
        CategoryRequest {
            base: "CPV2010B".to_string(),
            main: "WebServerMain.inl".to_string(),
            user_code: "xxUsuarioxx".to_string(),
        }
    }
}

impl CategoryRequest {
    /// Form fields asking for the categories of `variables`
    /// (`ENTITY.VARIABLE` identifiers). `VARIABLE` repeats once per variable.
    pub fn form_fields(&self, variables: &[String]) -> Vec<(String, String)> {
        let mut fields = vec![
            ("MAIN".to_string(), self.main.clone()),
            ("BASE".to_string(), self.base.clone()),
            ("CODIGO".to_string(), self.user_code.clone()),
            ("ITEM".to_string(), "DICCATVIV".to_string()),
            ("MODE".to_string(), "LISTVAR".to_string()),
            ("DICTIONARY".to_string(), "HTML".to_string()),
        ];
        fields.extend(
            variables
                .iter()
                .map(|v| ("VARIABLE".to_string(), v.clone())),
        );
        fields.push(("SUBMIT".to_string(), "Ejecutar".to_string()));
        fields
    }
}
