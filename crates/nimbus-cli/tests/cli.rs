//! End-to-end runs of the `nimbus` binary against a mock API.

use assert_cmd::Command;
use predicates::prelude::*;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENV_VARS: &[&str] = &[
    "NIMBUS_API_URL",
    "NIMBUS_API_TOKEN",
    "NIMBUS_PROJECT_ID",
    "NIMBUS_REGION_ID",
    "NIMBUS_WAIT",
    "NIMBUS_WAIT_SECONDS",
    "RUST_LOG",
];

fn nimbus() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_nimbus"));
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd
}

/// Run the binary off the async runtime so the mock server keeps serving.
async fn run(mut cmd: Command) -> assert_cmd::assert::Assert {
    tokio::task::spawn_blocking(move || cmd.assert())
        .await
        .unwrap()
}

async fn mount_delete(server: &MockServer, tasks: serde_json::Value) {
    Mock::given(method("DELETE"))
        .and(path("/v1/routers/1/76/r-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tasks))
        .mount(server)
        .await;
}

async fn mount_task(server: &MockServer, id: &str, state: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/v1/tasks/{id}")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "id": id, "state": state })),
        )
        .mount(server)
        .await;
}

fn delete_router(server: &MockServer) -> Command {
    let mut cmd = nimbus();
    cmd.args(["resource", "delete", "routers", "r-1"])
        .args(["--api-url", &server.uri()])
        .args(["--project", "1", "--region", "76"]);
    cmd
}

#[test]
fn help_lists_commands() {
    nimbus()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("task"))
        .stdout(predicate::str::contains("resource"))
        .stdout(predicate::str::contains("--wait-seconds"));
}

#[test]
fn unknown_subcommand_is_usage_error() {
    nimbus().arg("frobnicate").assert().code(2);
}

#[test]
fn missing_api_url_fails() {
    nimbus()
        .args(["task", "show", "t-1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("api url is not set"));
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_without_wait_prints_task_ids() {
    let server = MockServer::start().await;
    mount_delete(&server, serde_json::json!({ "tasks": ["t-1"] })).await;

    let mut cmd = delete_router(&server);
    cmd.args(["--wait", "false"]);
    run(cmd)
        .await
        .success()
        .stdout(predicate::eq("tasks: t-1\n"));
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_waits_until_resource_is_gone() {
    let server = MockServer::start().await;
    mount_delete(&server, serde_json::json!({ "tasks": ["t-1"] })).await;
    mount_task(&server, "t-1", "FINISHED").await;
    Mock::given(method("GET"))
        .and(path("/v1/routers/1/76/r-1"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    run(delete_router(&server))
        .await
        .success()
        .stdout(predicate::eq("Task t-1 finished\n"));
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_reports_resource_still_present() {
    let server = MockServer::start().await;
    mount_delete(&server, serde_json::json!({ "tasks": ["t-1"] })).await;
    mount_task(&server, "t-1", "FINISHED").await;
    Mock::given(method("GET"))
        .and(path("/v1/routers/1/76/r-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "r-1" })))
        .mount(&server)
        .await;

    run(delete_router(&server))
        .await
        .code(1)
        .stderr(predicate::str::contains("routers r-1 still exists"));
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_with_no_tasks_fails() {
    let server = MockServer::start().await;
    mount_delete(&server, serde_json::json!({ "tasks": [] })).await;

    run(delete_router(&server))
        .await
        .code(1)
        .stderr(predicate::str::contains("no tasks in response"));
}

#[tokio::test(flavor = "multi_thread")]
async fn task_wait_on_failed_task() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/tasks/t-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "t-1",
            "state": "ERROR",
            "error": "quota exceeded"
        })))
        .mount(&server)
        .await;

    let mut cmd = nimbus();
    cmd.args(["task", "wait", "t-1", "--api-url", &server.uri()]);
    run(cmd)
        .await
        .code(1)
        .stderr(predicate::str::contains("in error state: quota exceeded"));
}

#[tokio::test(flavor = "multi_thread")]
async fn task_show_as_json() {
    let server = MockServer::start().await;
    mount_task(&server, "t-1", "RUNNING").await;

    let mut cmd = nimbus();
    cmd.args(["task", "show", "t-1", "--format", "json", "--api-url", &server.uri()]);
    let assert = run(cmd).await.success();

    let out: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(out["id"], "t-1");
    assert_eq!(out["state"], "RUNNING");
}
