use assert_cmd::Command;
use pagegrade_core::PerformanceGrade;
use predicates::prelude::*;
use std::path::PathBuf;

#[allow(deprecated)]
fn get_pagegrade_bin() -> PathBuf {
    assert_cmd::cargo::cargo_bin("pagegrade")
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Test that a saved snapshot is analyzed into the expected report
#[test]
fn test_load_and_analyze_two_domains() {
    let (snapshot, report) =
        pagegrade_cli::commands::report::load_and_analyze(&fixture("two-domains.json"))
            .expect("Should analyze snapshot");

    assert_eq!(snapshot.url.as_deref(), Some("https://a.com/"));
    assert_eq!(report.page_size, 800_000);
    assert_eq!(report.number_of_requests, 2);
    assert_eq!(report.load_time, "120.00ms");
    assert_eq!(report.content_size_by_domain["a.com"], 500_000);
    assert_eq!(report.content_size_by_domain["b.com"], 300_000);
    assert_eq!(report.performance_grade, PerformanceGrade::A);
}

/// Test that totals and duplicate URLs behave on a realistic page
#[test]
fn test_load_and_analyze_heavy_page() {
    let (_, report) =
        pagegrade_cli::commands::report::load_and_analyze(&fixture("heavy-page.json"))
            .expect("Should analyze snapshot");

    assert_eq!(report.page_size, 5_000_000);
    assert_eq!(report.number_of_requests, 10);
    assert_eq!(report.requests_by_file.len(), 9);
    assert_eq!(report.requests_by_domain["cdn.example.net"], 4);
    assert_eq!(report.content_size_by_type["script"], 3_200_000);
    assert_eq!(report.content_size_by_type.values().sum::<u64>(), 5_000_000);
    assert_eq!(report.performance_grade, PerformanceGrade::D);
}

#[test]
fn test_report_pretty_output() {
    let mut cmd = Command::new(get_pagegrade_bin());
    cmd.arg("report").arg(fixture("two-domains.json"));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Page Analysis Report"))
        .stdout(predicate::str::contains("Performance grade"))
        .stdout(predicate::str::contains("781.25 KB"))
        .stdout(predicate::str::contains("120.00ms"))
        .stdout(predicate::str::contains("Content Size by Domain:"))
        .stdout(predicate::str::contains("Requests by File:"))
        .stdout(predicate::str::contains("https://b.com/y.png"));
}

#[test]
fn test_report_json_output() {
    let mut cmd = Command::new(get_pagegrade_bin());
    cmd.arg("--format")
        .arg("json")
        .arg("report")
        .arg(fixture("heavy-page.json"));

    let output = cmd.assert().success().get_output().stdout.clone();
    let json: serde_json::Value =
        serde_json::from_slice(&output).expect("stdout should be valid JSON");

    assert_eq!(json["url"], "https://shop.example.com/");
    assert_eq!(json["report"]["performanceGrade"], "D");
    assert_eq!(json["report"]["pageSize"], 5_000_000);
    assert_eq!(json["report"]["loadTime"], "9000.00ms");
    assert_eq!(json["report"]["requestsByType"]["img"], 3);
}

#[test]
fn test_report_table_output() {
    let mut cmd = Command::new(get_pagegrade_bin());
    cmd.arg("--format")
        .arg("table")
        .arg("report")
        .arg(fixture("two-domains.json"));

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("Section,Label,Value"))
        .stdout(predicate::str::contains("Summary,Performance grade,A"))
        .stdout(predicate::str::contains("Summary,Page size (bytes),800000"))
        .stdout(predicate::str::contains("Requests by domain,a.com,1"));
}

#[test]
fn test_report_empty_snapshot_grades_a() {
    let mut cmd = Command::new(get_pagegrade_bin());
    cmd.arg("--format")
        .arg("table")
        .arg("report")
        .arg(fixture("empty.json"));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Summary,Performance grade,A"))
        .stdout(predicate::str::contains("Summary,Requests,0"));
}

#[test]
fn test_report_empty_snapshot_warns_once() {
    let mut cmd = Command::new(get_pagegrade_bin());
    cmd.arg("report").arg(fixture("empty.json"));

    cmd.assert()
        .success()
        .stderr(predicate::function(|stderr: &str| {
            stderr.matches("no resources").count() == 1
        }));
}

#[test]
fn test_report_malformed_url_fails() {
    let mut cmd = Command::new(get_pagegrade_bin());
    cmd.arg("report").arg(fixture("malformed-url.json"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Malformed resource URL 'not a url'"));
}

#[test]
fn test_report_missing_file_fails() {
    let mut cmd = Command::new(get_pagegrade_bin());
    cmd.arg("report").arg("/nonexistent/snapshot.json");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read snapshot file"));
}

#[test]
fn test_report_rejects_non_snapshot_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bogus.json");
    std::fs::write(&path, r#"{"log": {"entries": []}}"#).unwrap();

    let mut cmd = Command::new(get_pagegrade_bin());
    cmd.arg("report").arg(&path);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse snapshot file"));
}
