use std::path::Path;
use std::process;

use redatam_core::{
    build_query, AreaFilter, AreaListQuery, CounterQuery, MedianQuery, QueryKind, QueryRequest,
};

use crate::{report_error, FilterArgs, OutputFormat, QueryCommands};

pub(crate) fn cmd_query(command: QueryCommands, output: OutputFormat, quiet: bool) {
    let request = match request_from_command(command) {
        Ok(r) => r,
        Err(msg) => {
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let kind = request.kind();
    match build_query(&request) {
        Ok(text) => print_query(kind, &text, output),
        Err(e) => {
            report_error(&e.to_string(), output, quiet);
            process::exit(1);
        }
    }
}

fn print_query(kind: QueryKind, text: &str, output: OutputFormat) {
    match output {
        OutputFormat::Text => println!("{}", text),
        OutputFormat::Json => {
            let value = serde_json::json!({
                "kind": kind.name(),
                "query": text,
            });
            let pretty = serde_json::to_string_pretty(&value)
                .unwrap_or_else(|e| format!("serialization error: {}", e));
            println!("{}", pretty);
        }
    }
}

struct Filters {
    area_filter: Option<AreaFilter>,
    universe_filter: Option<String>,
    title: Option<String>,
}

fn split_filters(filters: FilterArgs) -> Result<Filters, String> {
    let area_filter = match filters.area_type {
        Some(area_type) => {
            Some(AreaFilter::new(area_type, filters.areas).map_err(|e| e.to_string())?)
        }
        None => None,
    };
    Ok(Filters {
        area_filter,
        universe_filter: filters.universe,
        title: filters.title,
    })
}

fn request_from_command(command: QueryCommands) -> Result<QueryRequest, String> {
    match command {
        QueryCommands::Arealist {
            area_level,
            variables,
            filters,
            area_name,
        } => {
            let f = split_filters(filters)?;
            Ok(QueryRequest::AreaList(AreaListQuery {
                area_filter: f.area_filter,
                universe_filter: f.universe_filter,
                title: f.title,
                include_area_name: area_name,
                ..AreaListQuery::new(area_level, variables)
            }))
        }
        QueryCommands::Counter {
            area_level,
            counted_entity,
            filters,
            area_name,
            total,
        } => {
            let f = split_filters(filters)?;
            Ok(QueryRequest::Counter(CounterQuery {
                area_filter: f.area_filter,
                universe_filter: f.universe_filter,
                title: f.title,
                include_area_name: area_name,
                include_total: total,
                ..CounterQuery::new(area_level, counted_entity)
            }))
        }
        QueryCommands::Median {
            variable,
            by,
            complete_names,
            area_break,
            filters,
        } => {
            if by.len() > 2 {
                return Err(format!(
                    "median accepts at most two --by variables, got {}",
                    by.len()
                ));
            }
            let f = split_filters(filters)?;
            let mut by = by.into_iter();
            Ok(QueryRequest::Median(MedianQuery {
                by_var1: by.next(),
                by_var2: by.next(),
                include_full_names: complete_names,
                area_break,
                area_filter: f.area_filter,
                universe_filter: f.universe_filter,
                title: f.title,
                ..MedianQuery::new(variable)
            }))
        }
        QueryCommands::Mean => Ok(QueryRequest::Mean),
        QueryCommands::Cross => Ok(QueryRequest::Cross),
        QueryCommands::Frequencies => Ok(QueryRequest::Frequencies),
        QueryCommands::Stats => Ok(QueryRequest::Stats),
        QueryCommands::File { request } => read_request(&request),
    }
}

fn read_request(path: &Path) -> Result<QueryRequest, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("error reading '{}': {}", path.display(), e))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    match ext {
        "toml" => toml::from_str(&content)
            .map_err(|e| format!("error parsing request in '{}': {}", path.display(), e)),
        "json" => serde_json::from_str(&content)
            .map_err(|e| format!("error parsing request in '{}': {}", path.display(), e)),
        _ => Err(format!(
            "unsupported request file type '{}': expected .toml or .json",
            path.display()
        )),
    }
}
