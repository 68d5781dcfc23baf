use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_fs::prelude::*;
use chrono::{Duration, Utc};
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PROJECT: &str = "/api/v4/projects/group%2Fapp";
const COMMITS: &str = "/api/v4/projects/7/repository/commits";
const BRANCHES: &str = "/api/v4/projects/7/repository/branches";
const MERGE_REQUESTS: &str = "/api/v4/projects/7/merge_requests";

/// Run the exporter against `server`, with no local repository.
fn exporter(server: &MockServer, home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("gitlab-audit-export");
    cmd.env_remove("RUST_LOG")
        .env("XDG_CONFIG_HOME", home)
        .env("HOME", home)
        .env("GITLAB_URL", server.uri())
        .env("GITLAB_PRIVATE_TOKEN", "glpat-test")
        .args(["--project", "group/app", "--output-format", "csv"])
        .arg("--repo-path")
        .arg(home.join("no-repo"));
    cmd
}

async fn mount_json(server: &MockServer, route: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn column(path: &Path, name: &str) -> Vec<String> {
    let mut rdr = csv::Reader::from_path(path).unwrap();
    let idx = rdr.headers().unwrap().iter().position(|h| h == name).unwrap();
    rdr.records().map(|r| r.unwrap()[idx].to_string()).collect()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn months_back_drops_old_remote_commits() {
    let server = MockServer::start().await;
    let recent = (Utc::now() - Duration::days(3)).to_rfc3339();
    let old = (Utc::now() - Duration::days(90)).to_rfc3339();

    mount_json(&server, PROJECT, json!({"id": 7, "path_with_namespace": "group/app"})).await;
    mount_json(
        &server,
        COMMITS,
        json!([
            {"id": "recent1", "author_name": "Ada", "created_at": recent, "message": "new"},
            {"id": "old1", "author_name": "Ada", "created_at": old, "message": "old"}
        ]),
    )
    .await;
    mount_json(&server, BRANCHES, json!([])).await;
    mount_json(&server, MERGE_REQUESTS, json!([])).await;

    let dir = assert_fs::TempDir::new().unwrap();
    let out = dir.child("audit.csv");

    exporter(&server, dir.path())
        .args(["--months-back", "1"])
        .arg("--output-file")
        .arg(out.path())
        .assert()
        .success();

    assert_eq!(column(out.path(), "commit_sha"), ["recent1"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn failing_merge_requests_leave_other_listings_intact() {
    let server = MockServer::start().await;

    mount_json(&server, PROJECT, json!({"id": 7})).await;
    mount_json(
        &server,
        COMMITS,
        json!([{"id": "c1", "created_at": "2025-10-01T10:00:00.000+02:00", "message": "a\nb"}]),
    )
    .await;
    mount_json(
        &server,
        BRANCHES,
        json!([{"name": "main", "commit": {"id": "c1", "committed_date": "2025-10-01T10:00:00.000+02:00"}}]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path(MERGE_REQUESTS))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let dir = assert_fs::TempDir::new().unwrap();
    let out = dir.child("audit.csv");

    exporter(&server, dir.path())
        .arg("--output-file")
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "GitLab merge requests fetch error: GitLab API error 500: boom",
        ));

    assert_eq!(column(out.path(), "source"), ["remote-commit", "remote-branch"]);
    assert_eq!(column(out.path(), "message"), ["a b", ""]);
    assert_eq!(column(out.path(), "ref"), ["", "main"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn unresolvable_project_uses_raw_identifier() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PROJECT))
        .respond_with(ResponseTemplate::new(404).set_body_string("404 Project Not Found"))
        .mount(&server)
        .await;
    let raw = "/api/v4/projects/group%2Fapp/merge_requests";
    mount_json(
        &server,
        raw,
        json!([{
            "state": "opened",
            "author": {"name": "Grace"},
            "updated_at": "2025-10-03T08:00:00.000Z",
            "source_branch": "feature",
            "target_branch": "main",
            "title": "Add login"
        }]),
    )
    .await;

    let dir = assert_fs::TempDir::new().unwrap();
    let out = dir.child("audit.csv");

    exporter(&server, dir.path())
        .arg("--output-file")
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Failed to resolve project path"))
        .stdout(predicate::str::contains("GitLab commits fetch error"));

    assert_eq!(column(out.path(), "action_type"), ["merge_request_opened"]);
    assert_eq!(column(out.path(), "ref"), ["feature->main"]);
    assert_eq!(column(out.path(), "user_name"), ["Grace"]);
}
