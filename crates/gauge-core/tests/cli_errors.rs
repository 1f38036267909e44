//! CLI tests for error exit codes, structured errors, and the
//! introspection commands (`table`, `schema`, `config show`, `version`).

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::time::Duration;
use tempfile::TempDir;

fn gauge(home: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("gauge");
    cmd.timeout(Duration::from_secs(30))
        .env_remove("GAUGE_CONFIG")
        .env_remove("GAUGE_FORMAT")
        .env_remove("GAUGE_LOG")
        .env_remove("GAUGE_LOG_FORMAT")
        .env_remove("RUST_LOG")
        .env("XDG_CONFIG_HOME", home.path())
        .env("HOME", home.path());
    cmd
}

fn stderr_error(cmd: &mut Command, code: i32) -> Value {
    let output = cmd.assert().code(code).get_output().stderr.clone();
    let stderr = String::from_utf8(output).expect("stderr should be utf-8");
    let line = stderr
        .lines()
        .rev()
        .find(|l| l.trim_start().starts_with('{'))
        .expect("stderr should contain a JSON error");
    serde_json::from_str(line).expect("error line should be JSON")
}

// ============================================================================
// Argument errors
// ============================================================================

mod args {
    use super::*;

    #[test]
    fn unknown_flag_exits_10() {
        let home = TempDir::new().unwrap();
        gauge(&home)
            .args(["classify", "--bogus"])
            .assert()
            .code(10)
            .stderr(predicate::str::contains("--bogus"));
    }

    #[test]
    fn missing_subcommand_exits_10() {
        let home = TempDir::new().unwrap();
        gauge(&home).assert().code(10);
    }

    #[test]
    fn labels_and_input_conflict() {
        let home = TempDir::new().unwrap();
        gauge(&home)
            .args(["classify", "benign", "--input", "x.json"])
            .assert()
            .code(10);
    }

    #[test]
    fn help_exits_0() {
        let home = TempDir::new().unwrap();
        gauge(&home)
            .arg("--help")
            .assert()
            .code(0)
            .stdout(predicate::str::contains("classify"));
    }

    #[test]
    fn unknown_schema_exits_10() {
        let home = TempDir::new().unwrap();
        let err = stderr_error(gauge(&home).args(["schema", "Nope"]), 10);
        assert_eq!(err["code"], 40);
        assert_eq!(err["category"], "usage");
        assert_eq!(err["context"]["exit_code"], 10);
        assert_eq!(err["context"]["exit_code_name"], "ERR_ARGS");
    }
}

// ============================================================================
// Input errors
// ============================================================================

mod input {
    use super::*;

    #[test]
    fn non_string_element_exits_11() {
        let home = TempDir::new().unwrap();
        let err = stderr_error(
            gauge(&home)
                .args(["classify", "--input", "-"])
                .write_stdin("[\"benign\", 1]"),
            11,
        );
        assert_eq!(err["code"], 10);
        assert!(err["message"]
            .as_str()
            .unwrap()
            .contains("invalid input kind at labels[1]"));
    }

    #[test]
    fn malformed_json_exits_11() {
        let home = TempDir::new().unwrap();
        let err = stderr_error(
            gauge(&home)
                .args(["classify", "--input", "-"])
                .write_stdin("[\"benign\""),
            11,
        );
        assert_eq!(err["code"], 11);
    }

    #[test]
    fn scalar_document_rejected() {
        let home = TempDir::new().unwrap();
        gauge(&home)
            .args(["classify", "--input", "-"])
            .write_stdin("\"benign\"")
            .assert()
            .code(11);
    }

    #[test]
    fn batch_group_without_name() {
        let home = TempDir::new().unwrap();
        let err = stderr_error(
            gauge(&home)
                .args(["batch", "--input", "-"])
                .write_stdin(r#"[{"labels": ["benign"]}]"#),
            11,
        );
        assert!(err["message"].as_str().unwrap().contains("groups[0].name"));
    }

    #[test]
    fn human_format_error_has_fix_line() {
        let home = TempDir::new().unwrap();
        gauge(&home)
            .args(["-f", "summary", "classify", "--input", "-"])
            .write_stdin("{}")
            .assert()
            .code(11)
            .stderr(predicate::str::contains("Fix:"));
    }

    #[test]
    fn missing_input_file_is_io_error() {
        let home = TempDir::new().unwrap();
        let missing = home.path().join("missing.json");
        let err = stderr_error(gauge(&home).args(["classify", "--input"]).arg(&missing), 21);
        assert_eq!(err["category"], "io");
    }
}

// ============================================================================
// Configuration
// ============================================================================

mod config {
    use super::*;

    #[test]
    fn explicit_missing_config_exits_12() {
        let home = TempDir::new().unwrap();
        let missing = home.path().join("nope.toml");
        gauge(&home)
            .arg("--config")
            .arg(&missing)
            .arg("table")
            .assert()
            .code(12)
            .stderr(predicate::str::contains("nope.toml"));
    }

    #[test]
    fn env_missing_config_exits_12() {
        let home = TempDir::new().unwrap();
        gauge(&home)
            .env("GAUGE_CONFIG", home.path().join("nope.toml"))
            .arg("table")
            .assert()
            .code(12);
    }

    #[test]
    fn invalid_config_exits_12() {
        let home = TempDir::new().unwrap();
        let path = home.path().join("bad.toml");
        std::fs::write(&path, "[output]\nshade = \"blue\"\n").unwrap();
        let err = stderr_error(gauge(&home).arg("--config").arg(&path).arg("table"), 12);
        assert_eq!(err["code"], 21);
        assert!(err["context"]["path"].as_str().unwrap().ends_with("bad.toml"));
        assert_eq!(err["context"]["exit_code_name"], "ERR_CONFIG");
    }

    #[test]
    fn xdg_config_sets_default_format() {
        let home = TempDir::new().unwrap();
        let dir = home.path().join("acmg-gauge");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("config.toml"), "[output]\nformat = \"summary\"\n").unwrap();

        gauge(&home)
            .args(["classify", "benign"])
            .assert()
            .code(0)
            .stdout(predicate::str::starts_with("GREEN severity=0"));
    }

    #[test]
    fn cli_format_beats_config() {
        let home = TempDir::new().unwrap();
        let path = home.path().join("c.toml");
        std::fs::write(&path, "[output]\nformat = \"prose\"\n").unwrap();

        let output = gauge(&home)
            .arg("--config")
            .arg(&path)
            .args(["-f", "json", "classify", "vus"])
            .assert()
            .code(1)
            .get_output()
            .stdout
            .clone();
        let json: Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(json["color"], "yellow");
    }

    #[test]
    fn show_reports_source() {
        let home = TempDir::new().unwrap();
        let path = home.path().join("c.toml");
        std::fs::write(&path, "[log]\nlevel = \"warn\"\n").unwrap();

        let output = gauge(&home)
            .arg("--config")
            .arg(&path)
            .args(["config", "show"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        let json: Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(json["source"], "cli_argument");
        assert_eq!(json["config"]["log"]["level"], "warn");
    }

    #[test]
    fn show_defaults_as_toml() {
        let home = TempDir::new().unwrap();
        gauge(&home)
            .args(["-f", "prose", "config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("# source: builtin default"))
            .stdout(predicate::str::contains("[output]"));
    }
}

// ============================================================================
// Introspection
// ============================================================================

mod introspection {
    use super::*;

    #[test]
    fn table_lists_every_label() {
        let home = TempDir::new().unwrap();
        let output = gauge(&home)
            .arg("table")
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        let rows: Value = serde_json::from_slice(&output).unwrap();
        let rows = rows.as_array().unwrap();
        assert_eq!(rows.len(), 6);
        assert!(rows
            .iter()
            .any(|r| r["label"] == "vus" && r["severity"] == 2 && r["alias"] == true));
    }

    #[test]
    fn schema_list_json() {
        let home = TempDir::new().unwrap();
        let output = gauge(&home)
            .args(["schema", "--list"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        let types: Value = serde_json::from_slice(&output).unwrap();
        assert!(types
            .as_array()
            .unwrap()
            .iter()
            .any(|t| t["name"] == "GaugeResult"));
    }

    #[test]
    fn schema_for_gauge_result() {
        let home = TempDir::new().unwrap();
        gauge(&home)
            .args(["schema", "GaugeResult"])
            .assert()
            .success()
            .stdout(predicate::str::contains("unknown_labels"));
    }

    #[test]
    fn version_json() {
        let home = TempDir::new().unwrap();
        let output = gauge(&home)
            .arg("version")
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        let json: Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(json["name"], "gauge");
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    }
}
