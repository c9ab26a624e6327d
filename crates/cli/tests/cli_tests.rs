//! CLI integration tests
use predicates::prelude::*;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::cargo::cargo_bin_cmd!("seoscope")
}

fn get_fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

/// Serves `fixture` at `/` with robots.txt present and sitemap.xml missing.
fn serve_fixture(fixture: &str) -> (mockito::ServerGuard, Vec<mockito::Mock>) {
    let mut server = mockito::Server::new();
    let html = std::fs::read_to_string(get_fixture_path(fixture)).unwrap();
    let mocks = vec![
        server
            .mock("GET", "/")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body(html)
            .create(),
        server.mock("GET", "/robots.txt").with_status(200).with_body("User-agent: *").create(),
        server.mock("GET", "/sitemap.xml").with_status(404).create(),
    ];
    (server, mocks)
}

#[test]
fn test_cli_text_report() {
    let (server, _mocks) = serve_fixture("complete.html");

    cmd()
        .arg(server.url())
        .assert()
        .success()
        .stdout(predicate::str::contains("Title Tag:"))
        .stdout(predicate::str::contains("Fresh Coffee Roasters"))
        .stdout(predicate::str::contains("Verdict:"));
}

#[test]
fn test_cli_json_report() {
    let (server, _mocks) = serve_fixture("complete.html");

    let output = cmd()
        .args(["-f", "json", "-k", "coffee", &server.url()])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["Keyword"], "coffee");
    assert_eq!(json["robots.txt Found"], "Yes");
    assert_eq!(json["Sitemap Found"], "No");
    assert_eq!(json["HTTPS Enabled"], "No");
    // keyword 80 + title, description, viewport, robots, alt coverage
    assert_eq!(json["SEO Score (0–100)"], 100);
}

#[test]
fn test_cli_report_matches_library_audit() {
    let (server, _mocks) = serve_fixture("scenario_a.html");

    let output = cmd()
        .args(["-f", "json", "-k", "  Welcome ", &server.url()])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["URL"], format!("{}/", server.url()));
    assert_eq!(json["Keyword"], "Welcome");
    assert_eq!(json["Keyword Found In"], "H1, First 200 Characters");
    // title + robots + alt coverage
    assert_eq!(json["Technical Score"], 15);
}

#[test]
fn test_cli_output_file() {
    let (server, _mocks) = serve_fixture("scenario_a.html");
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("report.txt");

    cmd()
        .args(["-o", output.to_str().unwrap(), &server.url()])
        .assert()
        .success();

    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.contains("Home"));
}

#[test]
fn test_cli_verbose() {
    let (server, _mocks) = serve_fixture("scenario_a.html");

    cmd()
        .args(["-v", &server.url()])
        .assert()
        .success()
        .stderr(predicate::str::contains("Seoscope"))
        .stderr(predicate::str::contains("sitemap.xml not found"));
}

#[test]
fn test_cli_primary_fetch_failure() {
    let mut server = mockito::Server::new();
    let _page = server.mock("GET", "/").with_status(500).create();

    cmd()
        .arg(server.url())
        .assert()
        .failure()
        .stderr(predicate::str::contains("HTTP status 500"));
}

#[test]
fn test_cli_empty_url() {
    cmd()
        .arg("   ")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid input"));
}

#[test]
fn test_cli_invalid_format() {
    cmd().args(["-f", "yaml", "example.com"]).assert().failure();
}
