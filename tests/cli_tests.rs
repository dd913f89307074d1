use assert_cmd::prelude::*;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::process::Command;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SALES_PATH: &str = "/api/proFormaInvoice/getAll";
const TELECALLER_PATH: &str = "/api/telecaller/proFormaInvoice/getAll";

fn proforma_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("proforma"));
    cmd.env_remove("PROFORMA_API_BASE_URL").env_remove("RUST_LOG");
    cmd
}

fn sales_records() -> Value {
    json!([
        {
            "date": "2024-01-01",
            "empId": "E1",
            "proFormaNumber": "PF-0001",
            "partyName": "Acme",
            "grandTotal": 1500.0,
            "status": "confirm",
            "billingAddress": "12 MG Road"
        },
        {
            "date": "2024-06-01",
            "empId": "E2",
            "proFormaNumber": "PF-0002",
            "partyName": "Zeta",
            "grandTotal": 320.5,
            "status": "pending"
        },
        {
            "date": "2024-06-14",
            "empId": "E3",
            "proFormaNumber": "PF-0003",
            "partyName": "Orbit Traders",
            "grandTotal": 99.0,
            "status": "pending"
        }
    ])
}

fn telecaller_records() -> Value {
    json!([
        {
            "date": "2024-06-10",
            "empId": "T7",
            "proFormaNumber": "TPF-0042",
            "partyName": "Kappa Solar",
            "grandTotal": 2000.0,
            "status": "confirm"
        }
    ])
}

async fn backend() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SALES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(sales_records()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(TELECALLER_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(telecaller_records()))
        .mount(&server)
        .await;
    server
}

/// Config dir that does not exist yet, so only --base-url configures the run
fn scratch_dir() -> (TempDir, String) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("proforma-config");
    let config_path = config_path.to_str().unwrap().to_string();
    (temp_dir, config_path)
}

#[test]
fn test_help() {
    proforma_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "List sales and telecaller proforma invoices",
        ));
}

#[test]
fn test_version() {
    proforma_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("proforma"));
}

#[test]
fn test_init_creates_config() {
    let (_temp, config_path) = scratch_dir();

    proforma_cmd()
        .args(["-C", &config_path, "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized proforma config"));

    let content = fs::read_to_string(format!("{config_path}/config.toml")).unwrap();
    assert!(content.contains("base_url"));
}

#[test]
fn test_init_fails_if_exists() {
    let (_temp, config_path) = scratch_dir();

    proforma_cmd()
        .args(["-C", &config_path, "init"])
        .assert()
        .success();

    proforma_cmd()
        .args(["-C", &config_path, "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_status_without_init() {
    let (_temp, config_path) = scratch_dir();

    proforma_cmd()
        .args(["-C", &config_path, "status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_list_without_base_url() {
    let (_temp, config_path) = scratch_dir();

    proforma_cmd()
        .args(["-C", &config_path, "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No API base URL configured"));
}

#[test]
fn test_rejects_unsupported_rows_per_page() {
    let (_temp, config_path) = scratch_dir();

    proforma_cmd()
        .args([
            "-C",
            &config_path,
            "--base-url",
            "http://127.0.0.1:9",
            "list",
            "--rows-per-page",
            "7",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid rows per page"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_sales_table() {
    let server = backend().await;
    let (_temp, config_path) = scratch_dir();

    proforma_cmd()
        .args(["-C", &config_path, "--base-url", &server.uri(), "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sales Proforma List"))
        .stdout(predicate::str::contains("PROFORMA NUMBER"))
        .stdout(predicate::str::contains("PF-0001"))
        .stdout(predicate::str::contains("1,500.00"))
        .stdout(predicate::str::contains("CLOSED"))
        .stdout(predicate::str::contains("OPEN"))
        .stdout(predicate::str::contains("1–3 of 3"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_base_url_from_config_file() {
    let server = backend().await;
    let (_temp, config_path) = scratch_dir();

    proforma_cmd()
        .args(["-C", &config_path, "init"])
        .assert()
        .success();
    fs::write(
        format!("{config_path}/config.toml"),
        format!(
            "[api]\nbase_url = \"{}/\"\n\n[list]\nrows_per_page = 10\n",
            server.uri()
        ),
    )
    .unwrap();

    proforma_cmd()
        .args(["-C", &config_path, "list", "--tab", "telecaller"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Telecaller Proforma List"))
        .stdout(predicate::str::contains("TPF-0042"))
        .stdout(predicate::str::contains("Rows per page: 10"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_base_url_from_environment() {
    let server = backend().await;
    let (_temp, config_path) = scratch_dir();

    proforma_cmd()
        .env("PROFORMA_API_BASE_URL", server.uri())
        .args(["-C", &config_path, "list", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"proFormaNumber\": \"PF-0002\""));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_last_month_filter() {
    let server = backend().await;
    let (_temp, config_path) = scratch_dir();

    let output = proforma_cmd()
        .args([
            "-C",
            &config_path,
            "--base-url",
            &server.uri(),
            "list",
            "--range",
            "last-month",
            "--as-of",
            "2024-06-15",
            "--json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let rows: Vec<Value> = serde_json::from_slice(&output.stdout).unwrap();
    let numbers: Vec<&str> = rows
        .iter()
        .map(|r| r["proFormaNumber"].as_str().unwrap())
        .collect();
    assert_eq!(numbers, vec!["PF-0002", "PF-0003"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_is_case_insensitive() {
    let server = backend().await;
    let (_temp, config_path) = scratch_dir();

    let output = proforma_cmd()
        .args([
            "-C",
            &config_path,
            "--base-url",
            &server.uri(),
            "list",
            "--search",
            "ACME",
            "--json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let rows: Vec<Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["empId"], json!("E1"));
    assert_eq!(rows[0]["billingAddress"], json!("12 MG Road"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_page_past_end_is_empty() {
    let server = backend().await;
    let (_temp, config_path) = scratch_dir();

    proforma_cmd()
        .args([
            "-C",
            &config_path,
            "--base-url",
            &server.uri(),
            "list",
            "--rows-per-page",
            "5",
            "--page",
            "2",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Page 2 is past the end"))
        .stdout(predicate::str::contains("11–3 of 3"))
        .stdout(predicate::str::contains("PF-0001").not());

    proforma_cmd()
        .args([
            "-C",
            &config_path,
            "--base-url",
            &server.uri(),
            "list",
            "-n",
            "5",
            "-p",
            "2",
            "--json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("[]"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_open_sales_row() {
    let server = backend().await;
    let (_temp, config_path) = scratch_dir();

    let output = proforma_cmd()
        .args([
            "-C",
            &config_path,
            "--base-url",
            &server.uri(),
            "open",
            "2",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let handoff: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(handoff["destination"], json!("AccountsProformaTemplate"));
    assert_eq!(handoff["path"], json!("/AccountsProformaTemplate"));
    assert_eq!(
        handoff["state"]["profarmaData"]["proFormaNumber"],
        json!("PF-0002")
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_open_telecaller_row_to_file() {
    let server = backend().await;
    let (temp, config_path) = scratch_dir();
    let handoff_path = temp.path().join("handoff.json");

    proforma_cmd()
        .args([
            "-C",
            &config_path,
            "--base-url",
            &server.uri(),
            "open",
            "1",
            "--tab",
            "telecaller",
            "--output",
            handoff_path.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Opened TPF-0042 in AccountsTelecallerProformaTemplate",
        ));

    let handoff: Value = serde_json::from_str(&fs::read_to_string(&handoff_path).unwrap()).unwrap();
    assert_eq!(
        handoff["destination"],
        json!("AccountsTelecallerProformaTemplate")
    );
    assert_eq!(handoff["state"]["profarmaData"]["partyName"], json!("Kappa Solar"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_open_row_not_on_page() {
    let server = backend().await;
    let (_temp, config_path) = scratch_dir();

    proforma_cmd()
        .args([
            "-C",
            &config_path,
            "--base-url",
            &server.uri(),
            "open",
            "4",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No row 4 on page 0"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_failed_endpoint_is_logged_and_other_tab_still_loads() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SALES_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(TELECALLER_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(telecaller_records()))
        .mount(&server)
        .await;
    let (_temp, config_path) = scratch_dir();

    proforma_cmd()
        .args(["-C", &config_path, "--base-url", &server.uri(), "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No proformas found."))
        .stderr(predicate::str::contains("error fetching proformas"));

    proforma_cmd()
        .args([
            "-C",
            &config_path,
            "--base-url",
            &server.uri(),
            "list",
            "--tab",
            "telecaller",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("TPF-0042"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_malformed_body_is_treated_as_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SALES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;
    let (_temp, config_path) = scratch_dir();

    proforma_cmd()
        .args(["-C", &config_path, "--base-url", &server.uri(), "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No proformas found."))
        .stderr(predicate::str::contains("not a proforma list"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_status_reports_counts() {
    let server = backend().await;
    let (_temp, config_path) = scratch_dir();

    proforma_cmd()
        .args(["-C", &config_path, "--base-url", &server.uri(), "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Proforma Status"))
        .stdout(predicate::str::contains("Sales proformas:      3"))
        .stdout(predicate::str::contains("Telecaller proformas: 1"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_null_fields_do_not_drop_the_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SALES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "date": "2024-06-01",
                "empId": "E1",
                "proFormaNumber": "PF-0001",
                "partyName": "Acme",
                "grandTotal": 1500.0,
                "status": "confirm"
            },
            {
                "date": null,
                "empId": "E2",
                "proFormaNumber": null,
                "partyName": null,
                "grandTotal": null,
                "status": null
            }
        ])))
        .mount(&server)
        .await;
    let (_temp, config_path) = scratch_dir();

    proforma_cmd()
        .args(["-C", &config_path, "--base-url", &server.uri(), "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PF-0001"))
        .stdout(predicate::str::contains("E2"))
        .stdout(predicate::str::contains("1–2 of 2"))
        .stderr(predicate::str::contains("not a proforma list").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_status_lists_tabs_in_order_when_one_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SALES_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(TELECALLER_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(telecaller_records()))
        .mount(&server)
        .await;
    let (_temp, config_path) = scratch_dir();

    let output = proforma_cmd()
        .args(["-C", &config_path, "--base-url", &server.uri(), "status"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let sales = stdout.find("Sales proformas:      unavailable").unwrap();
    let telecaller = stdout.find("Telecaller proformas: 1").unwrap();
    assert!(sales < telecaller);
}

#[test]
fn test_status_shows_disabled_timeout() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().to_str().unwrap();
    fs::write(
        temp_dir.path().join("config.toml"),
        "[api]\nbase_url = \"http://127.0.0.1:9\"\ntimeout_secs = 0\n",
    )
    .unwrap();

    proforma_cmd()
        .args(["-C", config_path, "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Timeout:          none"));
}
