//! CLI integration tests for all subcommands.
//!
//! Uses `assert_cmd` to spawn the `redatam` binary and verify
//! exit codes, stdout content, and stderr content.
//!
//! All tests set `current_dir` to the workspace root so that relative
//! paths to the core fixtures resolve correctly.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const ROWS: &str = "crates/core/tests/fixtures/cpv2010_rows.json";
const CATEGORIES: &str = "crates/core/tests/fixtures/cpv2010_categories.txt";

/// Locate the workspace root by walking up from CARGO_MANIFEST_DIR.
fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    // crates/cli -> workspace root is two levels up
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("workspace root")
        .to_path_buf()
}

/// Helper: create a Command for the `redatam` binary, rooted at workspace.
fn redatam() -> Command {
    let mut cmd = cargo_bin_cmd!("redatam");
    cmd.current_dir(workspace_root());
    cmd
}

// ──────────────────────────────────────────────
// 1. Help and version
// ──────────────────────────────────────────────

#[test]
fn help_exits_0_with_description() {
    redatam()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("REDATAM query and dictionary toolkit"));
}

#[test]
fn version_exits_0() {
    redatam()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("redatam"));
}

// ──────────────────────────────────────────────
// 2. Query subcommand
// ──────────────────────────────────────────────

#[test]
fn arealist_prints_exact_query() {
    redatam()
        .args([
            "query",
            "arealist",
            "--area-level",
            "FRAC",
            "--var",
            "PERSONA.CONDACT",
            "--area-type",
            "PROV",
            "--area",
            "02",
            "--area",
            "03",
        ])
        .assert()
        .success()
        .stdout(
            "RUNDEF Job\n    SELECTION INLINE,\n     PROV 02, 03\n\n\
             TABLE TABLE1\n    AS AREALIST\n    OF FRAC, PERSONA.CONDACT\n",
        );
}

#[test]
fn counter_with_total_and_area_name() {
    redatam()
        .args([
            "query",
            "counter",
            "--area-level",
            "DPTO",
            "--count",
            "FRAC",
            "--area-type",
            "PROV",
            "--area",
            "02",
            "--universe",
            "1 = 1",
            "--title",
            "T",
            "--area-name",
            "--total",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "DEFINE DPTO.COUNTER\n    AS COUNT FRAC\n    TYPE INTEGER",
        ))
        .stdout(predicate::str::contains("    OF DPTO, DPTO.NOMDPTO, DPTO.COUNTER"))
        .stdout(predicate::str::ends_with("    TOTAL\n"));
}

#[test]
fn median_by_lines_follow_argument_order() {
    redatam()
        .args([
            "query",
            "median",
            "--var",
            "PERSONA.P03",
            "--by",
            "PERSONA.P02",
            "--by",
            "VIVIENDA.URP",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "    OF PERSONA.P03\n        BY PERSONA.P02\n        BY VIVIENDA.URP",
        ));
}

#[test]
fn median_rejects_third_breakdown() {
    redatam()
        .args([
            "query", "median", "--var", "PERSONA.P03", "--by", "A", "--by", "B", "--by", "C",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at most two --by variables"));
}

#[test]
fn area_type_without_codes_is_rejected_by_parser() {
    redatam()
        .args([
            "query",
            "arealist",
            "--area-level",
            "FRAC",
            "--var",
            "PERSONA.CONDACT",
            "--area-type",
            "PROV",
        ])
        .assert()
        .failure();
}

#[test]
fn reserved_kind_exits_1() {
    redatam()
        .args(["query", "mean"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "query kind 'mean' is reserved and not yet implemented",
        ));
}

#[test]
fn reserved_kind_json_error() {
    redatam()
        .args(["--output", "json", "query", "frequencies"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("\"error\""));
}

#[test]
fn query_json_output_carries_kind() {
    let output = redatam()
        .args(["--output", "json", "query", "median", "--var", "PERSONA.P03"])
        .output()
        .expect("run redatam");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json stdout");
    assert_eq!(value["kind"], "median");
    assert_eq!(
        value["query"],
        "RUNDEF Job\n\nTABLE TABLE1\n    AS MEDIAN\n    OF PERSONA.P03"
    );
}

#[test]
fn query_from_toml_request_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("request.toml");
    fs::write(
        &path,
        r#"
kind = "arealist"
area_level = "FRAC"
variables = "PERSONA.CONDACT"
universe_filter = "1 = 1"
title = "El titulo"

[area_filter]
PROV = ["02", "03"]
"#,
    )
    .unwrap();

    redatam()
        .args(["query", "file"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("    UNIVERSE 1 = 1\n\nTABLE TABLE1"))
        .stdout(predicate::str::contains("    TITLE \"El titulo\""));
}

#[test]
fn query_file_with_misspelled_key_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("request.toml");
    fs::write(
        &path,
        "kind = \"counter\"\narea_level = \"DPTO\"\ncounted_entity = \"FRAC\"\nincl_total = true\n",
    )
    .unwrap();

    redatam()
        .args(["query", "file"])
        .arg(&path)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("incl_total"));
}

#[test]
fn query_file_with_unknown_extension_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("request.yaml");
    fs::write(&path, "kind: arealist\n").unwrap();

    redatam()
        .args(["query", "file"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported request file type"));
}

// ──────────────────────────────────────────────
// 3. Dictionary subcommands
// ──────────────────────────────────────────────

#[test]
fn dictionary_json_has_classes_and_categories() {
    let output = redatam()
        .args(["--output", "json", "dictionary", "--rows", ROWS, "--categories", CATEGORIES])
        .output()
        .expect("run redatam");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json stdout");
    assert_eq!(
        value["geo_entities"],
        serde_json::json!(["PAIS", "PROV", "DPTO", "FRAC"])
    );
    assert_eq!(
        value["data_entities"],
        serde_json::json!(["VIVIENDA", "HOGAR", "PERSONA"])
    );
    assert_eq!(
        value["dictionary"]["PERSONA"]["P02"],
        serde_json::json!([["1", "Varón"], ["2", "Mujer"]])
    );
}

#[test]
fn dictionary_text_summary() {
    redatam()
        .args(["dictionary", "--rows", ROWS, "--categories", CATEGORIES])
        .assert()
        .success()
        .stdout(predicate::str::contains("geographic: PAIS, PROV, DPTO, FRAC"))
        .stdout(predicate::str::contains("  CONDACT (4 categories)"));
}

#[test]
fn dictionary_without_categories_has_empty_lists() {
    redatam()
        .args(["--output", "json", "dictionary", "--rows", ROWS])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"CONDACT\": []"));
}

#[test]
fn dictionary_reports_out_of_sync_feeds() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("categories.txt");
    fs::write(&path, "Nombre : P02\nEntidad : INDIVIDUO\n1. Varón\n").unwrap();

    redatam()
        .args(["dictionary", "--rows", ROWS, "--categories"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown entity 'INDIVIDUO'"));
}

#[test]
fn dictionary_missing_rows_file() {
    redatam()
        .args(["dictionary", "--rows", "does/not/exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("metadata source error"));
}

#[test]
fn variables_lists_data_entity_variables() {
    redatam()
        .args(["variables", "--rows", ROWS])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("VIVIENDA.TIPVV\nVIVIENDA.URP\n"))
        .stdout(predicate::str::contains("PROV.").not());
}

#[test]
fn category_form_uses_configured_base() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("redatam.toml");
    fs::write(&config, "[database]\nbase = \"CPV2001ARG\"\n").unwrap();

    redatam()
        .args(["category-form", "--rows", ROWS, "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("BASE=CPV2001ARG\n"))
        .stdout(predicate::str::contains("VARIABLE=PERSONA.CONDACT\n"))
        .stdout(predicate::str::ends_with("SUBMIT=Ejecutar\n"));
}

#[test]
fn implicit_config_in_working_directory() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("redatam.toml"),
        "[dictionary]\ntrailing_entity = \"classify\"\n",
    )
    .unwrap();
    let rows = dir.path().join("rows.json");
    fs::write(
        &rows,
        r#"[
  {"code": "1.0", "entity": "PERSONA"},
  {"code": "1.1", "entity": "PERSONA", "variable": "P02", "type": "I"},
  {"code": "2.0", "entity": "RADIO"},
  {"code": "2.1", "entity": "RADIO", "variable": "RADIO", "type": "C"}
]"#,
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("redatam");
    cmd.current_dir(dir.path())
        .args(["variables", "--rows", "rows.json"])
        .assert()
        .success()
        .stdout("PERSONA.P02\n");

    // Without the config the trailing geographic entity contradicts the layout.
    redatam()
        .args(["variables", "--rows"])
        .arg(&rows)
        .assert()
        .failure()
        .stderr(predicate::str::contains("trailing entity 'RADIO'"));
}

#[test]
fn bad_config_file_exits_1() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("redatam.toml");
    fs::write(&config, "[dictionary]\ncategory_mode = \"merge\"\n").unwrap();

    redatam()
        .args(["variables", "--rows", ROWS, "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not parse"));
}
