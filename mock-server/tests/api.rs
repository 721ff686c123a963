use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, CLUSTER_TIMESTAMP};
use serde_json::Value;
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn app_id(seq: u32) -> String {
    format!("application_{CLUSTER_TIMESTAMP}_{seq:04}")
}

// --- resource manager ---

#[tokio::test]
async fn cluster_info_reports_started() {
    let resp = app().oneshot(get("/ws/v1/cluster/info")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["clusterInfo"]["state"], "STARTED");
}

#[tokio::test]
async fn cluster_metrics_counts_apps() {
    let resp = app().oneshot(get("/ws/v1/cluster/metrics")).await.unwrap();

    let body = body_json(resp).await;
    assert_eq!(body["clusterMetrics"]["appsSubmitted"], 4);
    assert_eq!(body["clusterMetrics"]["appsRunning"], 2);
    assert_eq!(body["clusterMetrics"]["unhealthyNodes"], 1);
}

#[tokio::test]
async fn apps_filtered_by_state_and_limit() {
    let resp = app()
        .oneshot(get("/ws/v1/cluster/apps?state=RUNNING&limit=1"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    let apps = body["apps"]["app"].as_array().unwrap();
    assert_eq!(apps.len(), 1);
    assert_eq!(apps[0]["id"], app_id(1));
}

#[tokio::test]
async fn apps_filtered_by_final_status_and_queue() {
    let resp = app()
        .oneshot(get("/ws/v1/cluster/apps?finalStatus=SUCCEEDED&queue=etl"))
        .await
        .unwrap();

    let body = body_json(resp).await;
    let apps = body["apps"]["app"].as_array().unwrap();
    assert_eq!(apps.len(), 1);
    assert_eq!(apps[0]["user"], "bob");
}

#[tokio::test]
async fn apps_no_match_is_null() {
    let resp = app()
        .oneshot(get("/ws/v1/cluster/apps?user=nobody"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert!(body["apps"].is_null());
}

#[tokio::test]
async fn apps_bad_limit_returns_400() {
    let resp = app()
        .oneshot(get("/ws/v1/cluster/apps?limit=ten"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["RemoteException"]["exception"], "BadRequestException");
}

#[tokio::test]
async fn app_not_found_returns_remote_exception() {
    let resp = app()
        .oneshot(get("/ws/v1/cluster/apps/application_0_0000"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = body_json(resp).await;
    assert_eq!(body["RemoteException"]["exception"], "NotFoundException");
    assert!(body["RemoteException"]["message"]
        .as_str()
        .unwrap()
        .contains("application_0_0000"));
}

#[tokio::test]
async fn app_attempts_listed() {
    let uri = format!("/ws/v1/cluster/apps/{}/appattempts", app_id(2));
    let resp = app().oneshot(get(&uri)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["appAttempts"]["appAttempt"][0]["id"], 1);
}

#[tokio::test]
async fn nodes_filtered_by_health() {
    let resp = app()
        .oneshot(get("/ws/v1/cluster/nodes?healthy=false"))
        .await
        .unwrap();

    let body = body_json(resp).await;
    let nodes = body["nodes"]["node"].as_array().unwrap();
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0]["state"], "UNHEALTHY");
}

#[tokio::test]
async fn node_by_id() {
    let resp = app()
        .oneshot(get("/ws/v1/cluster/nodes/host1.example.com:8041"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["node"]["nodeHostName"], "host1.example.com");
}

#[tokio::test]
async fn new_application_allocates_sequential_ids() {
    let app = app();
    let request = || {
        Request::builder()
            .method(http::Method::POST)
            .uri("/ws/v1/cluster/apps/new-application")
            .body(String::new())
            .unwrap()
    };

    let first = body_json(app.clone().oneshot(request()).await.unwrap()).await;
    let second = body_json(app.oneshot(request()).await.unwrap()).await;
    assert_eq!(first["application-id"], app_id(5));
    assert_eq!(second["application-id"], app_id(6));
    assert_eq!(first["maximum-resource-capability"]["memory"], 8192);
}

// --- node manager ---

#[tokio::test]
async fn node_apps_group_containers() {
    let resp = app().oneshot(get("/ws/v1/node/apps?user=alice")).await.unwrap();

    let body = body_json(resp).await;
    let apps = body["apps"]["app"].as_array().unwrap();
    assert_eq!(apps.len(), 1);
    assert_eq!(apps[0]["containerids"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn container_log_is_plain_text() {
    let uri = format!(
        "/ws/v1/node/containerlogs/container_{CLUSTER_TIMESTAMP}_0001_01_000001/stdout"
    );
    let resp = app().oneshot(get(&uri)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()[http::header::CONTENT_TYPE],
        "text/plain"
    );
    let body = body_bytes(resp).await;
    let text = std::str::from_utf8(&body).unwrap();
    assert!(text.contains("stdout: started"));
}

#[tokio::test]
async fn unknown_container_returns_404() {
    let resp = app()
        .oneshot(get("/ws/v1/node/containers/container_missing"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- application master proxy ---

#[tokio::test]
async fn proxy_jobs_for_running_app() {
    let uri = format!("/proxy/{}/ws/v1/mapreduce/jobs", app_id(1));
    let resp = app().oneshot(get(&uri)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["jobs"]["job"][0]["state"], "RUNNING");
}

#[tokio::test]
async fn proxy_rejects_finished_app() {
    let uri = format!("/proxy/{}/ws/v1/mapreduce/info", app_id(2));
    let resp = app().oneshot(get(&uri)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- history server ---

#[tokio::test]
async fn history_lists_only_finished_jobs() {
    let resp = app().oneshot(get("/ws/v1/history/mapreduce/jobs")).await.unwrap();

    let body = body_json(resp).await;
    let jobs = body["jobs"]["job"].as_array().unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0]["state"], "SUCCEEDED");
}

#[tokio::test]
async fn history_job_by_id() {
    let uri = format!("/ws/v1/history/mapreduce/jobs/job_{CLUSTER_TIMESTAMP}_0002");
    let resp = app().oneshot(get(&uri)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["job"]["uberized"], true);
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let resp = app().oneshot(get("/ws/v1/unknown")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
