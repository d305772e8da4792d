//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary with a throwaway config file and verify
//! outputs.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// Run a CLI command against `config` and return (stdout, stderr, exit code).
fn run_cli(config: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_shiftcast-cli"))
        .arg("--config")
        .arg(config)
        .args(args)
        .env_remove("SHIFTCAST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn temp_config() -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    (dir, path)
}

#[test]
fn test_series_ramp_table() {
    let (_dir, config) = temp_config();
    let (stdout, _, code) = run_cli(
        &config,
        &["series", "ramp", "0", "4200", "0.08", "--trend", "200"],
    );
    assert_eq!(code, 0, "series ramp failed");
    assert!(stdout.contains("now      10:00 = 2200"), "{stdout}");
    assert!(stdout.contains("horizon  14:00"));
}

#[test]
fn test_series_ramp_negative_trend() {
    let (_dir, config) = temp_config();
    let (stdout, stderr, code) = run_cli(
        &config,
        &["series", "ramp", "62", "88", "0.1", "--trend", "-4", "--seed", "3"],
    );
    assert_eq!(code, 0, "{stderr}");
    assert!(stdout.contains("now"));
}

#[test]
fn test_series_cutoff_json() {
    let (_dir, config) = temp_config();
    let (stdout, _, code) = run_cli(
        &config,
        &["series", "cutoff", "1850", "1247", "156", "14", "--at", "08:00", "--json"],
    );
    assert_eq!(code, 0, "series cutoff failed");

    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["points"].as_array().unwrap().len(), 11);
    assert_eq!(report["reading"]["now"], "10:00");
    assert_eq!(report["reading"]["now_value"], 1247.0);
    assert_eq!(report["reading"]["scrubbed"]["classification"], "past");
    assert_eq!(report["outlook"]["status"], "on_pace");
    assert!(report.get("clear_time").is_none());
}

#[test]
fn test_series_burndown_clear_time() {
    let (_dir, config) = temp_config();
    let (stdout, _, code) = run_cli(&config, &["series", "burndown", "4200", "1890", "520"]);
    assert_eq!(code, 0, "series burndown failed");
    assert!(stdout.contains("now      10:00 = 2310"), "{stdout}");
    assert!(stdout.contains("clears   15:00"));
}

#[test]
fn test_series_invalid_parameters() {
    let (_dir, config) = temp_config();
    let (_, stderr, code) = run_cli(&config, &["series", "cutoff", "0", "10", "5", "13"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:") && stderr.contains("target"), "{stderr}");
}

#[test]
fn test_series_rejects_bad_time() {
    let (_dir, config) = temp_config();
    let (_, _, code) = run_cli(&config, &["series", "burndown", "10", "1", "1", "--at", "25:99"]);
    assert_ne!(code, 0);
}

#[test]
fn test_dashboard_scrubbed() {
    let (_dir, config) = temp_config();
    let (stdout, _, code) = run_cli(&config, &["dashboard", "--at", "12:30", "--seed", "1"]);
    assert_eq!(code, 0, "dashboard failed");
    assert!(stdout.starts_with("Scrubbed to 12:30"));
    assert!(stdout.contains("== UPS Ground (carrier) =="));
    assert!(stdout.contains("== Outbound picks (queue) =="));
    assert_eq!(stdout.matches("at       12:30").count(), 8);
}

#[test]
fn test_dashboard_json_isolates_broken_panel() {
    let (dir, config) = temp_config();
    let fixtures = dir.path().join("fixtures.toml");
    std::fs::write(
        &fixtures,
        r#"
        [[queues]]
        name = "Returns"
        total = 100
        done = 500
        velocity = 10

        [[queues]]
        name = "Replenishment"
        total = 800
        done = 200
        velocity = 90
        "#,
    )
    .unwrap();

    let (stdout, _, code) = run_cli(
        &config,
        &["dashboard", "--fixtures", fixtures.to_str().unwrap(), "--json"],
    );
    assert_eq!(code, 0, "dashboard with a broken panel must still render");

    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(report["scrub"].is_null());
    let panels = report["panels"].as_array().unwrap();
    assert_eq!(panels.len(), 2);
    assert!(panels[0]["reading"].is_null());
    assert!(panels[0]["error"].as_str().unwrap().contains("done"));
    assert_eq!(panels[1]["reading"]["now_value"], 600.0);
}

#[test]
fn test_config_set_get_reset() {
    let (_dir, config) = temp_config();

    let (stdout, _, code) = run_cli(&config, &["config", "get", "horizon.step_minutes"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "60");

    let (_, _, code) = run_cli(&config, &["config", "set", "model.burndown.band_step", "25"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(&config, &["config", "get", "model.burndown.band_step"]);
    assert_eq!(stdout.trim(), "25.0");
    assert!(config.exists());

    let (_, stderr, code) = run_cli(&config, &["config", "set", "horizon.now_index", "50"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("horizon"), "{stderr}");

    let (_, _, code) = run_cli(&config, &["config", "reset"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(&config, &["config", "get", "model.burndown.band_step"]);
    assert_eq!(stdout.trim(), "40.0");
}

#[test]
fn test_config_unknown_key() {
    let (_dir, config) = temp_config();
    let (_, stderr, code) = run_cli(&config, &["config", "get", "horizon.nope"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("horizon.nope"));
}

#[test]
fn test_config_path_and_show() {
    let (_dir, config) = temp_config();
    let (stdout, _, code) = run_cli(&config, &["config", "path"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), config.display().to_string());

    let (stdout, _, code) = run_cli(&config, &["config", "show"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("[horizon]"));
    assert!(stdout.contains("step_minutes = 60"));
}
