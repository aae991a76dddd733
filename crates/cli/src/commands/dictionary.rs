use std::path::Path;
use std::process;

use redatam_core::{
    build_catalog, build_dictionary, CategoryMode, DictionaryBuild, DictionaryLayout,
    MetadataSource,
};

use crate::config::RedatamConfig;
use crate::source::FileSource;
use crate::{report_error, OutputFormat};

pub(crate) fn cmd_dictionary(
    config: &RedatamConfig,
    rows: &Path,
    categories: Option<&Path>,
    append: bool,
    output: OutputFormat,
    quiet: bool,
) {
    let layout = DictionaryLayout {
        category_mode: if append {
            CategoryMode::Append
        } else {
            config.dictionary.category_mode
        },
        ..config.dictionary.clone()
    };
    let source = FileSource::new(rows, categories);

    let build = match build_catalog(&source, &layout) {
        Ok(b) => b,
        Err(e) => {
            report_error(&format!("dictionary error: {}", e), output, quiet);
            process::exit(1);
        }
    };

    match output {
        OutputFormat::Json => {
            let pretty = serde_json::to_string_pretty(&build)
                .unwrap_or_else(|e| format!("serialization error: {}", e));
            println!("{}", pretty);
        }
        OutputFormat::Text => print_summary(&build),
    }
}

fn print_summary(build: &DictionaryBuild) {
    println!("geographic: {}", build.geo_entities.join(", "));
    println!("data: {}", build.data_entities.join(", "));
    for entity in build.dictionary.entities() {
        println!();
        println!("{} ({} variables)", entity.name, entity.variables.len());
        for variable in &entity.variables {
            if variable.categories.is_empty() {
                println!("  {}", variable.name);
            } else {
                println!(
                    "  {} ({} categories)",
                    variable.name,
                    variable.categories.len()
                );
            }
        }
    }
}

/// Pass 1 only: the category feed is not needed to list variables.
fn pass1(
    config: &RedatamConfig,
    rows: &Path,
    output: OutputFormat,
    quiet: bool,
) -> DictionaryBuild {
    let source = FileSource::new(rows, None);
    let result = source
        .rows()
        .and_then(|rows| build_dictionary(rows, &config.dictionary));
    match result {
        Ok(b) => b,
        Err(e) => {
            report_error(&format!("dictionary error: {}", e), output, quiet);
            process::exit(1);
        }
    }
}

pub(crate) fn cmd_variables(
    config: &RedatamConfig,
    rows: &Path,
    output: OutputFormat,
    quiet: bool,
) {
    let variables = pass1(config, rows, output, quiet)
        .dictionary
        .queryable_variables();
    match output {
        OutputFormat::Text => {
            for variable in &variables {
                println!("{}", variable);
            }
        }
        OutputFormat::Json => {
            let pretty = serde_json::to_string_pretty(&variables)
                .unwrap_or_else(|e| format!("serialization error: {}", e));
            println!("{}", pretty);
        }
    }
}

pub(crate) fn cmd_category_form(
    config: &RedatamConfig,
    rows: &Path,
    output: OutputFormat,
    quiet: bool,
) {
    let variables = pass1(config, rows, output, quiet)
        .dictionary
        .queryable_variables();
    let fields = config.database.form_fields(&variables);
    match output {
        OutputFormat::Text => {
            for (key, value) in &fields {
                println!("{}={}", key, value);
            }
        }
        OutputFormat::Json => {
            let pretty = serde_json::to_string_pretty(&fields)
                .unwrap_or_else(|e| format!("serialization error: {}", e));
            println!("{}", pretty);
        }
    }
}
