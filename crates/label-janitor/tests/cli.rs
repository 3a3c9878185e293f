//! Label janitor CLI tests.
//!
//! Run the built binary to pin down the exit code contract.

use assert_cmd::Command;
use assert_fs::TempDir;
use predicates::str::contains;
use serde_json::json;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

type TestResult = Result<(), Box<dyn std::error::Error>>;

const JANITOR_VARS: [&str; 6] = [
    "LINEAR_API_KEY",
    "DRY_RUN",
    "LINEAR_API_URL",
    "LINEAR_TIMEOUT_SECS",
    "LABEL_DELETION_ENABLED",
    "RUST_LOG",
];

/// Binary with a clean janitor environment, run from an empty directory so no
/// `.env` file is picked up.
fn janitor_cmd(
    dir: &TempDir,
    server: &MockServer,
) -> Result<Command, Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("label-janitor")?;
    cmd.current_dir(dir.path()).env("NO_COLOR", "1");
    for var in JANITOR_VARS {
        cmd.env_remove(var);
    }
    cmd.env("LINEAR_API_URL", format!("{}/graphql", server.uri()));
    Ok(cmd)
}

async fn mount_unused_labels(server: &MockServer) {
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "issueLabels": {
                    "pageInfo": { "hasNextPage": false, "endCursor": null },
                    "nodes": [
                        { "id": "a", "name": "stale-a", "isGroup": false, "issues": { "nodes": [] } },
                        { "id": "b", "name": "stale-b", "isGroup": false, "issues": { "nodes": [] } }
                    ]
                }
            }
        })))
        .mount(server)
        .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_api_key_exits_2_without_request() -> TestResult {
    let server = MockServer::start().await;
    let tmp = TempDir::new()?;

    janitor_cmd(&tmp, &server)?
        .env("DRY_RUN", "false")
        .assert()
        .code(2)
        .stderr(contains("LINEAR_API_KEY"));

    assert!(server.received_requests().await.unwrap_or_default().is_empty());
    tmp.close()?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn dry_run_exits_0() -> TestResult {
    let server = MockServer::start().await;
    mount_unused_labels(&server).await;
    let tmp = TempDir::new()?;

    janitor_cmd(&tmp, &server)?
        .env("LINEAR_API_KEY", "lin_api_test")
        .assert()
        .success()
        .stdout(contains("stale-a"))
        .stdout(contains("stale-b"))
        .stdout(contains("no labels will be deleted"));

    tmp.close()?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn uppercase_false_keeps_dry_run() -> TestResult {
    let server = MockServer::start().await;
    mount_unused_labels(&server).await;
    let tmp = TempDir::new()?;

    janitor_cmd(&tmp, &server)?
        .env("LINEAR_API_KEY", "lin_api_test")
        .env("DRY_RUN", "FALSE")
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(contains("no labels will be deleted"));

    let requests = server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 1);
    tmp.close()?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn declined_prompt_exits_0() -> TestResult {
    let server = MockServer::start().await;
    mount_unused_labels(&server).await;
    let tmp = TempDir::new()?;

    janitor_cmd(&tmp, &server)?
        .env("LINEAR_API_KEY", "lin_api_test")
        .env("DRY_RUN", "false")
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("aborted by user"));

    tmp.close()?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn timeout_flag_overrides_malformed_env() -> TestResult {
    let server = MockServer::start().await;
    mount_unused_labels(&server).await;
    let tmp = TempDir::new()?;

    janitor_cmd(&tmp, &server)?
        .env("LINEAR_API_KEY", "lin_api_test")
        .env("LINEAR_TIMEOUT_SECS", "soon")
        .args(["--timeout-secs", "5"])
        .assert()
        .success();

    tmp.close()?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn api_error_exits_1() -> TestResult {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": [{ "message": "Authentication required" }]
        })))
        .mount(&server)
        .await;
    let tmp = TempDir::new()?;

    janitor_cmd(&tmp, &server)?
        .env("LINEAR_API_KEY", "lin_api_test")
        .assert()
        .code(1)
        .stderr(contains("Authentication required"));

    tmp.close()?;
    Ok(())
}
