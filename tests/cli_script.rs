use assert_cmd::Command;
use predicates::str::contains;
use tempfile::TempDir;

fn write_config(config_dir: &TempDir, json: &str) {
    let dir = config_dir.path().join("rewards_console");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.json"), json).unwrap();
}

fn cli(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("rewards_console_cli").unwrap();
    cmd.env("REWARDS_CONSOLE_CONFIG_DIR", config_dir.path());
    cmd
}

#[test]
fn lists_seed_templates() {
    let dir = TempDir::new().unwrap();
    cli(&dir)
        .arg("templates")
        .assert()
        .success()
        .stdout(contains("tpl-double-points"))
        .stdout(contains("Fast Track to Platinum"));
}

#[test]
fn create_prints_campaign_json() {
    let dir = TempDir::new().unwrap();
    cli(&dir)
        .args([
            "create",
            "tpl-double-points",
            "name=Weekend Boost",
            "startDate=2024-06-07",
        ])
        .assert()
        .success()
        .stdout(contains("Campaign created: Weekend Boost"))
        .stdout(contains("\"end_date\": \"2024-06-10\""));
}

#[test]
fn create_without_start_date_fails() {
    let dir = TempDir::new().unwrap();
    cli(&dir)
        .args(["create", "tpl-referral", "name=Spring Referral"])
        .assert()
        .failure()
        .stderr(contains("Start date is required"));
}

#[test]
fn approve_reports_new_count() {
    let dir = TempDir::new().unwrap();
    cli(&dir)
        .args(["approve", "REQ-002"])
        .assert()
        .success()
        .stdout(contains("Request approved"))
        .stdout(contains("Pending approvals: 2"));
}

#[test]
fn unknown_request_is_a_no_op() {
    let dir = TempDir::new().unwrap();
    cli(&dir)
        .args(["reject", "REQ-404"])
        .assert()
        .success()
        .stdout(contains("No pending request with id REQ-404"));
}

#[test]
fn metrics_from_arguments() {
    let dir = TempDir::new().unwrap();
    cli(&dir)
        .args([
            "metrics",
            "pointsPerAction=10",
            "expectedParticipants=500",
            "budget=10000",
        ])
        .assert()
        .success()
        .stdout(contains("\"budget_utilization\": 50.0"));
}

#[test]
fn unknown_command_prints_usage() {
    let dir = TempDir::new().unwrap();
    cli(&dir)
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(contains("Usage: rewards_console_cli"));
}

#[test]
fn customize_walks_the_wizard_and_creates() {
    let dir = TempDir::new().unwrap();
    cli(&dir)
        .args(["customize", "tpl-referral", "name=Spring Referral"])
        .assert()
        .success()
        .stdout(contains("Step 5/5: review"))
        .stdout(contains("Campaign created"))
        .stdout(contains("\"created_by\": \"Admin User\""));
}

#[test]
fn configured_step_gate_blocks_customize() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, r#"{"step_gate": "required_fields", "operator_name": "Dana"}"#);
    cli(&dir)
        .args(["customize", "tpl-referral"])
        .assert()
        .failure()
        .stdout(contains("Step 1/5: basics"))
        .stderr(contains("Campaign name is required"));
}

#[test]
fn malformed_config_is_reported() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, "{ not json");
    cli(&dir)
        .arg("templates")
        .assert()
        .failure()
        .stderr(contains("Serialization error"));
}
