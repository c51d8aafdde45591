use std::io::Write;
use std::process::Command;

use tempfile::NamedTempFile;

const PROJECTS: &str = "\
ProjectID,Cost_Soles,Benefit_Soles
P1,3000,5000
P2,2000,4500
P3,2500,3000
";

fn climb() -> Command {
    Command::new(env!("CARGO_BIN_EXE_climb"))
}

fn data_file(contents: &str, suffix: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_json_outcome() {
    let data = data_file(PROJECTS, ".csv");

    let output = climb()
        .args(["projects", "--json", "--seed", "7", "--data"])
        .arg(data.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let outcome: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(outcome["problem"], "projects");
    assert_eq!(outcome["seed"], 7);
    assert_eq!(outcome["solution"]["kind"], "bit_vector");
}

#[test]
fn test_missing_data_fails() {
    let output = climb()
        .args(["routes", "--json", "--data", "/no/such/route.csv"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("Error:"));
}

#[test]
fn test_config_file_and_csv_output() {
    let data = data_file(PROJECTS, ".csv");
    let config = data_file("random_seed = 3\nrestarts = 2\n\n[search]\nmax_iterations = 50\n", ".toml");
    let dir = tempfile::tempdir().unwrap();
    let table = dir.path().join("selection.csv");

    let output = climb()
        .arg("projects")
        .arg("--json")
        .arg("--data")
        .arg(data.path())
        .arg("--config")
        .arg(config.path())
        .arg("--output")
        .arg(&table)
        .output()
        .unwrap();

    assert!(output.status.success());
    let outcome: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(outcome["seed"], 3);
    assert_eq!(outcome["restarts"], 2);

    let written = std::fs::read_to_string(&table).unwrap();
    assert!(written.starts_with("ProjectID"));
}

#[test]
fn test_invalid_restarts_rejected() {
    let data = data_file(PROJECTS, ".csv");

    let output = climb()
        .args(["projects", "--json", "--restarts", "0", "--data"])
        .arg(data.path())
        .output()
        .unwrap();

    assert!(!output.status.success());
}
