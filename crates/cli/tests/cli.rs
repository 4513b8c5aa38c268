// End-to-end tests for the `roster` binary.
// Run with: cargo test -p roster-cli --test cli

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn roster() -> Command {
    Command::new(env!("CARGO_BIN_EXE_roster"))
}

const CONFIG: &str = r#"
name = "CLI test"

[script]
schema = "STATS"
table = "TBLPLAYERS"

[output]
sql_file_prefix = "player_updates"
log_file_prefix = "reconcile"
timestamp_format = "%Y%m%d_%H%M%S"

[teams]
KC = 3
DEN = 5

[positions]
QB = 9
RB = 12
"#;

const FEED: &str = "\
gsis_id,first_name,last_name,display_name,latest_team,position,jersey_number
00-1234,Jane,Doe,Jane Doe,KC,QB,15
00-9999,John,Roe,John Roe,DEN,RB,7
";

const STORE: &str = "\
OID,GSIS,FIRSTNAME,LASTNAME,REALTEAMID,POSITIONID,CURRENT_TEAM,CURRENT_POSITION
1,00-1234,Jane,Doe,5,9,DEN,QB
";

struct Fixture {
    _dir: tempfile::TempDir,
    root: PathBuf,
}

fn fixture() -> Fixture {
    fixture_with(CONFIG, FEED, STORE)
}

fn fixture_with(config: &str, feed: &str, store: &str) -> Fixture {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path().to_path_buf();
    fs::write(root.join("roster.toml"), config).unwrap();
    fs::write(root.join("feed.csv"), feed).unwrap();
    fs::write(root.join("store.csv"), store).unwrap();
    Fixture { _dir: dir, root }
}

fn run_args(root: &Path) -> Vec<String> {
    [
        "run",
        "--config",
        root.join("roster.toml").to_str().unwrap(),
        "--feed",
        root.join("feed.csv").to_str().unwrap(),
        "--store",
        root.join("store.csv").to_str().unwrap(),
        "--out-dir",
        root.to_str().unwrap(),
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn files_with_extension(dir: &Path, ext: &str) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|x| x == ext))
        .collect();
    files.sort();
    files
}

#[test]
fn run_generates_sql_script() {
    let fx = fixture();
    let output = roster().args(run_args(&fx.root)).output().expect("run roster");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("RECONCILIATION SUMMARY"));
    assert!(stderr.contains("Team Updates:      1"));
    assert!(stderr.contains("SQL script generated"));

    let scripts = files_with_extension(&fx.root, "sql");
    assert_eq!(scripts.len(), 1);
    let script = fs::read_to_string(&scripts[0]).unwrap();
    assert!(script.contains("UPDATE STATS.TBLPLAYERS"));
    assert!(script.contains("WHERE OID = 1;"));
    assert!(script.contains("INSERT INTO STATS.TBLPLAYERS"));
    assert!(script.contains("-- COMMIT;"));
}

#[test]
fn dry_run_writes_no_script() {
    let fx = fixture();
    let mut args = run_args(&fx.root);
    args.push("--dry-run".into());
    let output = roster().args(&args).output().expect("run roster");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("dry run - no SQL script generated"));
    assert!(files_with_extension(&fx.root, "sql").is_empty());
}

#[test]
fn no_changes_detected_skips_script() {
    let store = "\
OID,GSIS,FIRSTNAME,LASTNAME,REALTEAMID,POSITIONID,CURRENT_TEAM,CURRENT_POSITION
1,00-1234,Jane,Doe,3,9,KC,QB
2,00-9999,John,Roe,5,12,DEN,RB
";
    let fx = fixture_with(CONFIG, FEED, store);
    let output = roster().args(run_args(&fx.root)).output().expect("run roster");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no changes detected"));
    assert!(files_with_extension(&fx.root, "sql").is_empty());
}

#[test]
fn full_reconcile_flag_gates_position_updates() {
    let store = "\
OID,GSIS,FIRSTNAME,LASTNAME,REALTEAMID,POSITIONID,CURRENT_TEAM,CURRENT_POSITION
1,00-1234,Jane,Doe,3,12,KC,RB
";
    let feed = "\
gsis_id,first_name,last_name,display_name,latest_team,position,jersey_number
00-1234,Jane,Doe,Jane Doe,KC,QB,15
";
    let fx = fixture_with(CONFIG, feed, store);

    // Team-only: position drift invisible, nothing to do.
    let output = roster().args(run_args(&fx.root)).output().expect("run roster");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("no changes detected"));

    // Full reconcile: position update surfaces.
    let mut args = run_args(&fx.root);
    args.push("--full-reconcile".into());
    let output = roster().args(&args).output().expect("run roster");
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Position Updates:  1"));

    let scripts = files_with_extension(&fx.root, "sql");
    let script = fs::read_to_string(scripts.last().unwrap()).unwrap();
    assert!(script.contains("SET POSITIONID = 9"));
}

#[test]
fn record_rejections_exit_zero_and_write_error_log() {
    let feed = "\
gsis_id,first_name,last_name,display_name,latest_team,position,jersey_number
00-7777,New,Guy,New Guy,XX,QB,
";
    let store = "\
OID,GSIS,FIRSTNAME,LASTNAME,REALTEAMID,POSITIONID,CURRENT_TEAM,CURRENT_POSITION
1,00-1234,Jane,Doe,5,9,DEN,QB
";
    let fx = fixture_with(CONFIG, feed, store);
    let output = roster().args(run_args(&fx.root)).output().expect("run roster");

    // Per-record rejections do not fail the run.
    assert!(output.status.success());
    let logs = files_with_extension(&fx.root, "log");
    assert_eq!(logs.len(), 1);
    let log = fs::read_to_string(&logs[0]).unwrap();
    assert!(log.contains("ERRORS:"));
    assert!(log.contains("unknown team 'XX'"));
}

#[test]
fn json_report_on_stdout() {
    let fx = fixture();
    let mut args = run_args(&fx.root);
    args.push("--json".into());
    let output = roster().args(&args).output().expect("run roster");

    assert!(output.status.success());
    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is valid JSON");
    assert_eq!(report["meta"]["mode"], "team_only");
    assert_eq!(report["stats"]["team_updates"], 1);
    assert_eq!(report["stats"]["new_players"], 1);
}

#[test]
fn invalid_config_exits_3() {
    let bad_config = r#"
name = "Bad"

[script]
schema = "STATS"

[teams]

[positions]
QB = 9
"#;
    let fx = fixture_with(bad_config, FEED, STORE);
    let output = roster().args(run_args(&fx.root)).output().expect("run roster");

    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stderr).contains("config validation error"));
}

#[test]
fn duplicate_store_key_exits_4() {
    let store = "\
OID,GSIS,FIRSTNAME,LASTNAME,REALTEAMID,POSITIONID,CURRENT_TEAM,CURRENT_POSITION
1,00-1234,Jane,Doe,5,9,DEN,QB
2,00-1234,Jane,Doe,5,9,DEN,QB
";
    let fx = fixture_with(CONFIG, FEED, store);
    let output = roster().args(run_args(&fx.root)).output().expect("run roster");

    assert_eq!(output.status.code(), Some(4));
    assert!(String::from_utf8_lossy(&output.stderr).contains("duplicate external id"));
}

#[test]
fn missing_feed_file_exits_4() {
    let fx = fixture();
    fs::remove_file(fx.root.join("feed.csv")).unwrap();
    let output = roster().args(run_args(&fx.root)).output().expect("run roster");
    assert_eq!(output.status.code(), Some(4));
}

#[test]
fn validate_accepts_good_config() {
    let fx = fixture();
    let output = roster()
        .args(["validate", fx.root.join("roster.toml").to_str().unwrap()])
        .output()
        .expect("run roster");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("valid: 'CLI test'"));
    assert!(stderr.contains("target STATS.TBLPLAYERS"));
}

#[test]
fn validate_rejects_bad_config() {
    let fx = fixture();
    fs::write(fx.root.join("roster.toml"), "name = ").unwrap();
    let output = roster()
        .args(["validate", fx.root.join("roster.toml").to_str().unwrap()])
        .output()
        .expect("run roster");

    assert_eq!(output.status.code(), Some(3));
}
