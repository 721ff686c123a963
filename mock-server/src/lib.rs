//! In-memory stand-in for the YARN REST endpoints, used by integration tests.
//!
//! One router serves all four roles under their real base paths, so a single
//! listener can back ResourceManager, NodeManager, ApplicationMaster (proxy),
//! and HistoryServer clients at once. Unknown ids answer 404 with a YARN
//! `RemoteException` body; empty listings answer `{"<key>": null}` like the
//! real servers do.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

pub const CLUSTER_TIMESTAMP: i64 = 1326821518301;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct App {
    pub id: String,
    pub user: String,
    pub name: String,
    pub queue: String,
    pub state: String,
    pub final_status: String,
    pub progress: f64,
    pub application_type: String,
    pub started_time: i64,
    pub finished_time: i64,
    pub elapsed_time: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    pub rack: String,
    pub state: String,
    pub node_host_name: String,
    #[serde(rename = "nodeHTTPAddress")]
    pub node_http_address: String,
    pub health_report: String,
    pub num_containers: i64,
    #[serde(rename = "usedMemoryMB")]
    pub used_memory_mb: i64,
    #[serde(rename = "availMemoryMB")]
    pub avail_memory_mb: i64,
    #[serde(skip)]
    pub healthy: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    pub id: String,
    pub state: String,
    pub exit_code: i64,
    pub diagnostics: String,
    pub user: String,
    #[serde(rename = "totalMemoryNeededMB")]
    pub total_memory_needed_mb: i64,
    pub container_logs_link: String,
    pub node_id: String,
    #[serde(skip)]
    pub application_id: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub name: String,
    pub user: String,
    pub queue: String,
    pub state: String,
    pub start_time: i64,
    pub finish_time: i64,
    pub maps_total: i64,
    pub maps_completed: i64,
    pub reduces_total: i64,
    pub reduces_completed: i64,
    pub uberized: bool,
    #[serde(skip)]
    pub application_id: String,
}

/// Everything the mock knows about its pretend cluster.
#[derive(Clone, Debug)]
pub struct Cluster {
    pub apps: Vec<App>,
    pub nodes: Vec<Node>,
    pub containers: Vec<Container>,
    pub jobs: Vec<Job>,
    pub next_app_seq: u32,
}

impl Cluster {
    pub fn sample() -> Self {
        let app = |seq: u32, user: &str, queue: &str, state: &str, final_status: &str| App {
            id: format!("application_{CLUSTER_TIMESTAMP}_{seq:04}"),
            user: user.to_string(),
            name: format!("job-{seq}"),
            queue: queue.to_string(),
            state: state.to_string(),
            final_status: final_status.to_string(),
            progress: if state == "FINISHED" { 100.0 } else { 42.0 },
            application_type: "MAPREDUCE".to_string(),
            started_time: CLUSTER_TIMESTAMP + i64::from(seq) * 1000,
            finished_time: 0,
            elapsed_time: 5000,
        };
        let node = |host: &str, state: &str, healthy: bool| Node {
            id: format!("{host}:8041"),
            rack: "/default-rack".to_string(),
            state: state.to_string(),
            node_host_name: host.to_string(),
            node_http_address: format!("{host}:8042"),
            health_report: if healthy { String::new() } else { "disk full".to_string() },
            num_containers: 1,
            used_memory_mb: 1024,
            avail_memory_mb: 7168,
            healthy,
        };

        let running = format!("application_{CLUSTER_TIMESTAMP}_0001");
        Self {
            apps: vec![
                app(1, "alice", "default", "RUNNING", "UNDEFINED"),
                app(2, "bob", "etl", "FINISHED", "SUCCEEDED"),
                app(3, "alice", "etl", "FAILED", "FAILED"),
                app(4, "carol", "default", "RUNNING", "UNDEFINED"),
            ],
            nodes: vec![
                node("host1.example.com", "RUNNING", true),
                node("host2.example.com", "UNHEALTHY", false),
            ],
            containers: vec![Container {
                id: format!("container_{CLUSTER_TIMESTAMP}_0001_01_000001"),
                state: "RUNNING".to_string(),
                exit_code: -1000,
                diagnostics: String::new(),
                user: "alice".to_string(),
                total_memory_needed_mb: 2048,
                container_logs_link: format!(
                    "http://host1.example.com:8042/node/containerlogs/container_{CLUSTER_TIMESTAMP}_0001_01_000001/alice"
                ),
                node_id: "host1.example.com:8041".to_string(),
                application_id: running.clone(),
            }],
            jobs: vec![
                Job {
                    id: format!("job_{CLUSTER_TIMESTAMP}_0001"),
                    name: "job-1".to_string(),
                    user: "alice".to_string(),
                    queue: "default".to_string(),
                    state: "RUNNING".to_string(),
                    start_time: CLUSTER_TIMESTAMP + 1000,
                    finish_time: 0,
                    maps_total: 4,
                    maps_completed: 2,
                    reduces_total: 1,
                    reduces_completed: 0,
                    uberized: false,
                    application_id: running,
                },
                Job {
                    id: format!("job_{CLUSTER_TIMESTAMP}_0002"),
                    name: "job-2".to_string(),
                    user: "bob".to_string(),
                    queue: "etl".to_string(),
                    state: "SUCCEEDED".to_string(),
                    start_time: CLUSTER_TIMESTAMP + 2000,
                    finish_time: CLUSTER_TIMESTAMP + 7000,
                    maps_total: 1,
                    maps_completed: 1,
                    reduces_total: 1,
                    reduces_completed: 1,
                    uberized: true,
                    application_id: format!("application_{CLUSTER_TIMESTAMP}_0002"),
                },
            ],
            next_app_seq: 5,
        }
    }
}

pub type Db = Arc<RwLock<Cluster>>;

type Reply = Result<Json<Value>, (StatusCode, Json<Value>)>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Cluster::sample()));
    Router::new()
        .route("/ws/v1/cluster/info", get(cluster_info))
        .route("/ws/v1/cluster/metrics", get(cluster_metrics))
        .route("/ws/v1/cluster/scheduler", get(cluster_scheduler))
        .route("/ws/v1/cluster/apps", get(cluster_apps))
        .route("/ws/v1/cluster/apps/new-application", post(new_application))
        .route("/ws/v1/cluster/apps/{appid}", get(cluster_app))
        .route("/ws/v1/cluster/apps/{appid}/appattempts", get(cluster_app_attempts))
        .route("/ws/v1/cluster/nodes", get(cluster_nodes))
        .route("/ws/v1/cluster/nodes/{nodeid}", get(cluster_node))
        .route("/ws/v1/node/info", get(node_info))
        .route("/ws/v1/node/apps", get(node_apps))
        .route("/ws/v1/node/apps/{appid}", get(node_app))
        .route("/ws/v1/node/containers", get(node_containers))
        .route("/ws/v1/node/containers/{containerid}", get(node_container))
        .route("/ws/v1/node/containerlogs/{containerid}/{filename}", get(container_log))
        .route("/proxy/{appid}/ws/v1/mapreduce/info", get(am_info))
        .route("/proxy/{appid}/ws/v1/mapreduce/jobs", get(am_jobs))
        .route("/proxy/{appid}/ws/v1/mapreduce/jobs/{jobid}", get(am_job))
        .route("/ws/v1/history/info", get(history_info))
        .route("/ws/v1/history/mapreduce/jobs", get(history_jobs))
        .route("/ws/v1/history/mapreduce/jobs/{jobid}", get(history_job))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn remote_exception(status: StatusCode, exception: &str, message: String) -> (StatusCode, Json<Value>) {
    (
        status,
        Json(json!({
            "RemoteException": {
                "exception": exception,
                "message": message,
                "javaClassName": format!("org.apache.hadoop.yarn.webapp.{exception}"),
            }
        })),
    )
}

fn not_found(message: String) -> (StatusCode, Json<Value>) {
    remote_exception(StatusCode::NOT_FOUND, "NotFoundException", message)
}

fn parse_limit(limit: Option<&String>) -> Result<Option<usize>, (StatusCode, Json<Value>)> {
    limit
        .map(|l| {
            l.parse::<usize>().map_err(|_| {
                remote_exception(
                    StatusCode::BAD_REQUEST,
                    "BadRequestException",
                    format!("limit value must be greater then 0: {l}"),
                )
            })
        })
        .transpose()
}

/// `{"key": {"inner": [...]}}`, or `{"key": null}` when empty.
fn listing<T: Serialize>(key: &str, inner: &str, items: Vec<T>) -> Json<Value> {
    if items.is_empty() {
        return Json(json!({ key: null }));
    }
    Json(json!({ key: { inner: items } }))
}

fn matches(filter: Option<&String>, value: &str) -> bool {
    filter.map_or(true, |f| f == value)
}

// --- ResourceManager ---

async fn cluster_info() -> Json<Value> {
    Json(json!({
        "clusterInfo": {
            "id": CLUSTER_TIMESTAMP,
            "startedOn": CLUSTER_TIMESTAMP,
            "state": "STARTED",
            "haState": "ACTIVE",
            "resourceManagerVersion": "3.3.6",
            "hadoopVersion": "3.3.6",
        }
    }))
}

async fn cluster_metrics(State(db): State<Db>) -> Json<Value> {
    let cluster = db.read().await;
    let count = |state: &str| cluster.apps.iter().filter(|a| a.state == state).count();
    Json(json!({
        "clusterMetrics": {
            "appsSubmitted": cluster.apps.len(),
            "appsCompleted": count("FINISHED"),
            "appsPending": 0,
            "appsRunning": count("RUNNING"),
            "appsFailed": count("FAILED"),
            "appsKilled": count("KILLED"),
            "allocatedMB": 2048,
            "availableMB": 14336,
            "totalMB": 16384,
            "containersAllocated": cluster.containers.len(),
            "totalNodes": cluster.nodes.len(),
            "activeNodes": cluster.nodes.iter().filter(|n| n.state == "RUNNING").count(),
            "lostNodes": 0,
            "unhealthyNodes": cluster.nodes.iter().filter(|n| n.state == "UNHEALTHY").count(),
            "decommissionedNodes": 0,
            "rebootedNodes": 0,
        }
    }))
}

async fn cluster_scheduler() -> Json<Value> {
    Json(json!({
        "scheduler": {
            "schedulerInfo": {
                "type": "capacityScheduler",
                "capacity": 100.0,
                "usedCapacity": 12.5,
                "maxCapacity": 100.0,
                "queueName": "root",
                "queues": {
                    "queue": [
                        { "queueName": "default", "capacity": 60.0, "usedCapacity": 10.0 },
                        { "queueName": "etl", "capacity": 40.0, "usedCapacity": 2.5 },
                    ]
                }
            }
        }
    }))
}

async fn cluster_apps(
    State(db): State<Db>,
    Query(filter): Query<HashMap<String, String>>,
) -> Reply {
    let limit = parse_limit(filter.get("limit"))?;
    let cluster = db.read().await;
    let apps: Vec<App> = cluster
        .apps
        .iter()
        .filter(|a| matches(filter.get("state"), &a.state))
        .filter(|a| matches(filter.get("finalStatus"), &a.final_status))
        .filter(|a| matches(filter.get("user"), &a.user))
        .filter(|a| matches(filter.get("queue"), &a.queue))
        .take(limit.unwrap_or(usize::MAX))
        .cloned()
        .collect();
    Ok(listing("apps", "app", apps))
}

async fn cluster_app(State(db): State<Db>, Path(appid): Path<String>) -> Reply {
    let cluster = db.read().await;
    cluster
        .apps
        .iter()
        .find(|a| a.id == appid)
        .map(|a| Json(json!({ "app": a })))
        .ok_or_else(|| not_found(format!("app with id: {appid} not found")))
}

async fn cluster_app_attempts(State(db): State<Db>, Path(appid): Path<String>) -> Reply {
    let cluster = db.read().await;
    let app = cluster
        .apps
        .iter()
        .find(|a| a.id == appid)
        .ok_or_else(|| not_found(format!("app with id: {appid} not found")))?;
    let suffix = app.id.trim_start_matches("application_");
    Ok(Json(json!({
        "appAttempts": {
            "appAttempt": [{
                "id": 1,
                "startTime": app.started_time,
                "containerId": format!("container_{suffix}_01_000001"),
                "nodeHttpAddress": "host1.example.com:8042",
                "nodeId": "host1.example.com:8041",
                "logsLink": format!("http://host1.example.com:8042/node/containerlogs/container_{suffix}_01_000001/{}", app.user),
            }]
        }
    })))
}

async fn cluster_nodes(
    State(db): State<Db>,
    Query(filter): Query<HashMap<String, String>>,
) -> Json<Value> {
    let cluster = db.read().await;
    let nodes: Vec<Node> = cluster
        .nodes
        .iter()
        .filter(|n| matches(filter.get("state"), &n.state))
        .filter(|n| matches(filter.get("healthy"), if n.healthy { "true" } else { "false" }))
        .cloned()
        .collect();
    listing("nodes", "node", nodes)
}

async fn cluster_node(State(db): State<Db>, Path(nodeid): Path<String>) -> Reply {
    let cluster = db.read().await;
    cluster
        .nodes
        .iter()
        .find(|n| n.id == nodeid)
        .map(|n| Json(json!({ "node": n })))
        .ok_or_else(|| not_found(format!("nodeId, {nodeid}, is not found")))
}

async fn new_application(State(db): State<Db>) -> Json<Value> {
    let mut cluster = db.write().await;
    let seq = cluster.next_app_seq;
    cluster.next_app_seq += 1;
    Json(json!({
        "application-id": format!("application_{CLUSTER_TIMESTAMP}_{seq:04}"),
        "maximum-resource-capability": { "memory": 8192, "vCores": 32 },
    }))
}

// --- NodeManager ---

async fn node_info() -> Json<Value> {
    Json(json!({
        "nodeInfo": {
            "id": "host1.example.com:8041",
            "nodeHostName": "host1.example.com",
            "healthReport": "",
            "nodeHealthy": true,
            "lastNodeUpdateTime": CLUSTER_TIMESTAMP + 60000,
            "totalVmemAllocatedContainersMB": 17203,
            "totalPmemAllocatedContainersMB": 16384,
            "nodeManagerVersion": "3.3.6",
            "hadoopVersion": "3.3.6",
        }
    }))
}

#[derive(Serialize)]
struct NodeApp {
    id: String,
    state: &'static str,
    user: String,
    containerids: Vec<String>,
}

fn node_apps_of(cluster: &Cluster) -> Vec<NodeApp> {
    let mut apps: Vec<NodeApp> = Vec::new();
    for container in &cluster.containers {
        match apps.iter_mut().find(|a| a.id == container.application_id) {
            Some(app) => app.containerids.push(container.id.clone()),
            None => apps.push(NodeApp {
                id: container.application_id.clone(),
                state: "RUNNING",
                user: container.user.clone(),
                containerids: vec![container.id.clone()],
            }),
        }
    }
    apps
}

async fn node_apps(
    State(db): State<Db>,
    Query(filter): Query<HashMap<String, String>>,
) -> Json<Value> {
    let cluster = db.read().await;
    let apps: Vec<NodeApp> = node_apps_of(&cluster)
        .into_iter()
        .filter(|a| matches(filter.get("state"), a.state))
        .filter(|a| matches(filter.get("user"), &a.user))
        .collect();
    listing("apps", "app", apps)
}

async fn node_app(State(db): State<Db>, Path(appid): Path<String>) -> Reply {
    let cluster = db.read().await;
    node_apps_of(&cluster)
        .into_iter()
        .find(|a| a.id == appid)
        .map(|a| Json(json!({ "app": a })))
        .ok_or_else(|| not_found(format!("app with id {appid} not found")))
}

async fn node_containers(State(db): State<Db>) -> Json<Value> {
    let cluster = db.read().await;
    listing("containers", "container", cluster.containers.clone())
}

async fn node_container(State(db): State<Db>, Path(containerid): Path<String>) -> Reply {
    let cluster = db.read().await;
    cluster
        .containers
        .iter()
        .find(|c| c.id == containerid)
        .map(|c| Json(json!({ "container": c })))
        .ok_or_else(|| not_found(format!("container with id, {containerid}, not found")))
}

async fn container_log(
    State(db): State<Db>,
    Path((containerid, filename)): Path<(String, String)>,
) -> impl IntoResponse {
    let cluster = db.read().await;
    if !cluster.containers.iter().any(|c| c.id == containerid) {
        return not_found(format!("container with id, {containerid}, not found")).into_response();
    }
    (
        [(header::CONTENT_TYPE, "text/plain")],
        format!("{containerid} {filename}: started\n{containerid} {filename}: running\n"),
    )
        .into_response()
}

// --- MapReduce ApplicationMaster (through the RM proxy) ---

fn running_jobs<'a>(cluster: &'a Cluster, appid: &str) -> Result<Vec<&'a Job>, (StatusCode, Json<Value>)> {
    let app = cluster
        .apps
        .iter()
        .find(|a| a.id == appid)
        .ok_or_else(|| not_found(format!("app with id: {appid} not found")))?;
    if app.state != "RUNNING" {
        return Err(not_found(format!("application {appid} is not running")));
    }
    Ok(cluster.jobs.iter().filter(|j| j.application_id == appid).collect())
}

async fn am_info(State(db): State<Db>, Path(appid): Path<String>) -> Reply {
    let cluster = db.read().await;
    running_jobs(&cluster, &appid)?;
    Ok(Json(json!({
        "info": {
            "appId": appid,
            "name": "job-1",
            "user": "alice",
            "startedOn": CLUSTER_TIMESTAMP + 1000,
            "elapsedTime": 5000,
        }
    })))
}

async fn am_jobs(State(db): State<Db>, Path(appid): Path<String>) -> Reply {
    let cluster = db.read().await;
    let jobs: Vec<Job> = running_jobs(&cluster, &appid)?.into_iter().cloned().collect();
    Ok(listing("jobs", "job", jobs))
}

async fn am_job(State(db): State<Db>, Path((appid, jobid)): Path<(String, String)>) -> Reply {
    let cluster = db.read().await;
    running_jobs(&cluster, &appid)?
        .into_iter()
        .find(|j| j.id == jobid)
        .map(|j| Json(json!({ "job": j })))
        .ok_or_else(|| not_found(format!("job, {jobid}, is not found")))
}

// --- JobHistory Server ---

async fn history_info() -> Json<Value> {
    Json(json!({
        "historyInfo": {
            "startedOn": CLUSTER_TIMESTAMP,
            "hadoopVersion": "3.3.6",
            "hadoopBuildVersion": "3.3.6 from mock",
            "hadoopVersionBuiltOn": "2023-06-18T00:00Z",
        }
    }))
}

async fn history_jobs(
    State(db): State<Db>,
    Query(filter): Query<HashMap<String, String>>,
) -> Reply {
    let limit = parse_limit(filter.get("limit"))?;
    let cluster = db.read().await;
    let jobs: Vec<Job> = cluster
        .jobs
        .iter()
        .filter(|j| j.state != "RUNNING")
        .filter(|j| matches(filter.get("state"), &j.state))
        .filter(|j| matches(filter.get("user"), &j.user))
        .filter(|j| matches(filter.get("queue"), &j.queue))
        .take(limit.unwrap_or(usize::MAX))
        .cloned()
        .collect();
    Ok(listing("jobs", "job", jobs))
}

async fn history_job(State(db): State<Db>, Path(jobid): Path<String>) -> Reply {
    let cluster = db.read().await;
    cluster
        .jobs
        .iter()
        .filter(|j| j.state != "RUNNING")
        .find(|j| j.id == jobid)
        .map(|j| Json(json!({ "job": j })))
        .ok_or_else(|| not_found(format!("job, {jobid}, is not found")))
}
