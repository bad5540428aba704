//! Integration tests for the `auditor audit` command.

use assert_cmd::Command;
use mockito::{Matcher, Server};
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn auditor(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("auditor").unwrap();
    cmd.current_dir(temp_dir.path())
        .env("HOME", temp_dir.path())
        .env("NO_COLOR", "1")
        .env_remove("AUDITOR_BASE_URL")
        .env_remove("AUDITOR_API_KEY");
    cmd
}

fn write_inputs(temp_dir: &TempDir) {
    fs::write(temp_dir.path().join("model.pkl"), b"model-bytes").unwrap();
    fs::write(temp_dir.path().join("train.csv"), "f1,label\n1,0\n2,1\n").unwrap();
}

fn mock_endpoint(server: &mut Server, path: &str, body: &str) -> mockito::Mock {
    server
        .mock("POST", path)
        .match_header("x-api-key", "secret-token")
        .match_body(Matcher::Regex(r#"name="file"; filename="model.pkl""#.to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create()
}

#[test]
fn test_audit_requires_both_files() {
    let temp_dir = TempDir::new().unwrap();
    write_inputs(&temp_dir);
    let mut server = Server::new();
    let any = server.mock("POST", Matcher::Any).expect(0).create();

    auditor(&temp_dir)
        .args(["--base-url", &server.url(), "audit", "--model", "model.pkl"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Please select both a model file and a training file."));

    auditor(&temp_dir)
        .args(["--base-url", &server.url(), "audit", "--train", "train.csv"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Please select both a model file and a training file."));

    any.assert();
}

#[test]
fn test_audit_renders_heatmap_explanations_and_gauge() {
    let temp_dir = TempDir::new().unwrap();
    write_inputs(&temp_dir);
    let mut server = Server::new();

    let model = mock_endpoint(&mut server, "/analyze/model", r#"{"confusion_matrix": [[5, 1], [2, 7]]}"#);
    let shap = mock_endpoint(&mut server, "/explain/shap", r#"{"top_features": ["f1"]}"#);
    let lime = mock_endpoint(&mut server, "/explain/lime", r#"{"weights": {"f1": 0.4}}"#);
    let privacy = server
        .mock("POST", "/analyze/privacy")
        .match_header("x-api-key", "secret-token")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="model"; filename="model.pkl""#.to_string()),
            Matcher::Regex(r#"name="train"; filename="train.csv""#.to_string()),
        ]))
        .with_status(200)
        .with_body(r#"{"differential_privacy_epsilon": 3.2}"#)
        .create();

    auditor(&temp_dir)
        .args(["--base-url", &server.url(), "audit", "--model", "model.pkl", "--train", "train.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Model Analysis"))
        .stdout(predicate::str::contains("Confusion Matrix"))
        .stdout(predicate::str::contains("Explanations"))
        .stdout(predicate::str::contains("\"SHAP\""))
        .stdout(predicate::str::contains("\"LIME\""))
        .stdout(predicate::str::contains("Privacy Analysis"))
        .stdout(predicate::str::contains("value: 3.2 (yellow band)"));

    model.assert();
    shap.assert();
    lime.assert();
    privacy.assert();
}

#[test]
fn test_audit_json_output_contains_failures() {
    let temp_dir = TempDir::new().unwrap();
    write_inputs(&temp_dir);
    let mut server = Server::new();

    let _model = mock_endpoint(&mut server, "/analyze/model", r#"{"error": "Unsupported model format"}"#);
    let _shap = mock_endpoint(&mut server, "/explain/shap", r#"{"values": [0.1]}"#);
    let _lime = mock_endpoint(&mut server, "/explain/lime", r#"{"values": [0.2]}"#);
    let _privacy = server
        .mock("POST", "/analyze/privacy")
        .with_status(500)
        .with_body("Internal Server Error")
        .create();

    let assert = auditor(&temp_dir)
        .args(["--json", "--base-url", &server.url(), "audit", "--model", "model.pkl", "--train", "train.csv"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("audit JSON output should be valid JSON");

    assert_eq!(json["model"]["error"], "Unsupported model format");
    assert_eq!(json["shap"]["values"][0], 0.1);
    assert_eq!(json["lime"]["values"][0], 0.2);
    assert!(json["privacy"]["error"].is_string());

    assert_eq!(json["explanation"]["SHAP"]["values"][0], 0.1);
    assert_eq!(json["explanation"]["LIME"]["values"][0], 0.2);
    assert!(json["charts"].get("confusion_matrix").is_none());
    assert!(json["charts"].get("privacy_gauge").is_none());
}

#[test]
fn test_audit_json_output_includes_charts() {
    let temp_dir = TempDir::new().unwrap();
    write_inputs(&temp_dir);
    let mut server = Server::new();

    let _model = mock_endpoint(&mut server, "/analyze/model", r#"{"confusion_matrix": [[5, 1], [2, 7]]}"#);
    let _shap = mock_endpoint(&mut server, "/explain/shap", r#"{"top_features": ["f1"]}"#);
    let _lime = mock_endpoint(&mut server, "/explain/lime", r#"{"weights": {"f1": 0.4}}"#);
    let _privacy = server
        .mock("POST", "/analyze/privacy")
        .with_status(200)
        .with_body(r#"{"differential_privacy_epsilon": 3.2}"#)
        .create();

    let assert = auditor(&temp_dir)
        .args(["--json", "--base-url", &server.url(), "audit", "--model", "model.pkl", "--train", "train.csv"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("audit JSON output should be valid JSON");

    assert_eq!(json["charts"]["confusion_matrix"]["kind"], "heatmap");
    assert_eq!(json["charts"]["confusion_matrix"]["cells"][1][1], 7.0);
    assert_eq!(json["charts"]["privacy_gauge"]["kind"], "gauge");
    assert_eq!(json["charts"]["privacy_gauge"]["value"], 3.2);
    assert_eq!(json["explanation"]["SHAP"]["top_features"][0], "f1");
}
