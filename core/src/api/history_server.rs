//! MapReduce JobHistory Server REST API (`/ws/v1/history`).

use crate::client::{ApiClient, ApiRole, ClientConfig};
use crate::constants::{JobState, TaskType, JOB_STATE, TASK_TYPE};
use crate::error::Result;
use crate::http::{Transport, UreqTransport};
use crate::operation::{OperationDescriptor, ParamSpec};
use crate::request::Params;
use crate::response::Response;

const JOB_ID: ParamSpec = ParamSpec::path("job_id");
const TASK_ID: ParamSpec = ParamSpec::path("task_id");
const ATTEMPT_ID: ParamSpec = ParamSpec::path("attempt_id");

pub static INFORMATION: OperationDescriptor = OperationDescriptor {
    name: "information",
    path: "/info",
    ..OperationDescriptor::GET
};

pub static JOBS: OperationDescriptor = OperationDescriptor {
    name: "jobs",
    path: "/mapreduce/jobs",
    params: &[
        ParamSpec::query("state", "state").one_of(&JOB_STATE),
        ParamSpec::query("user", "user"),
        ParamSpec::query("queue", "queue"),
        ParamSpec::query("limit", "limit"),
        ParamSpec::query("started_time_begin", "startedTimeBegin"),
        ParamSpec::query("started_time_end", "startedTimeEnd"),
        ParamSpec::query("finished_time_begin", "finishedTimeBegin"),
        ParamSpec::query("finished_time_end", "finishedTimeEnd"),
    ],
    ..OperationDescriptor::GET
};

pub static JOB: OperationDescriptor = OperationDescriptor {
    name: "job",
    path: "/mapreduce/jobs/{job_id}",
    params: &[JOB_ID],
    ..OperationDescriptor::GET
};

pub static JOB_ATTEMPTS: OperationDescriptor = OperationDescriptor {
    name: "job_attempts",
    path: "/mapreduce/jobs/{job_id}/jobattempts",
    params: &[JOB_ID],
    ..OperationDescriptor::GET
};

pub static JOB_COUNTERS: OperationDescriptor = OperationDescriptor {
    name: "job_counters",
    path: "/mapreduce/jobs/{job_id}/counters",
    params: &[JOB_ID],
    ..OperationDescriptor::GET
};

pub static JOB_CONF: OperationDescriptor = OperationDescriptor {
    name: "job_conf",
    path: "/mapreduce/jobs/{job_id}/conf",
    params: &[JOB_ID],
    ..OperationDescriptor::GET
};

pub static JOB_TASKS: OperationDescriptor = OperationDescriptor {
    name: "job_tasks",
    path: "/mapreduce/jobs/{job_id}/tasks",
    params: &[JOB_ID, ParamSpec::query("task_type", "type").one_of(&TASK_TYPE)],
    ..OperationDescriptor::GET
};

pub static JOB_TASK: OperationDescriptor = OperationDescriptor {
    name: "job_task",
    path: "/mapreduce/jobs/{job_id}/tasks/{task_id}",
    params: &[JOB_ID, TASK_ID],
    ..OperationDescriptor::GET
};

pub static TASK_COUNTERS: OperationDescriptor = OperationDescriptor {
    name: "task_counters",
    path: "/mapreduce/jobs/{job_id}/tasks/{task_id}/counters",
    params: &[JOB_ID, TASK_ID],
    ..OperationDescriptor::GET
};

pub static TASK_ATTEMPTS: OperationDescriptor = OperationDescriptor {
    name: "task_attempts",
    path: "/mapreduce/jobs/{job_id}/tasks/{task_id}/attempts",
    params: &[JOB_ID, TASK_ID],
    ..OperationDescriptor::GET
};

pub static TASK_ATTEMPT: OperationDescriptor = OperationDescriptor {
    name: "task_attempt",
    path: "/mapreduce/jobs/{job_id}/tasks/{task_id}/attempts/{attempt_id}",
    params: &[JOB_ID, TASK_ID, ATTEMPT_ID],
    ..OperationDescriptor::GET
};

pub static TASK_ATTEMPT_COUNTERS: OperationDescriptor = OperationDescriptor {
    name: "task_attempt_counters",
    path: "/mapreduce/jobs/{job_id}/tasks/{task_id}/attempts/{attempt_id}/counters",
    params: &[JOB_ID, TASK_ID, ATTEMPT_ID],
    ..OperationDescriptor::GET
};

pub static OPERATIONS: &[&OperationDescriptor] = &[
    &INFORMATION,
    &JOBS,
    &JOB,
    &JOB_ATTEMPTS,
    &JOB_COUNTERS,
    &JOB_CONF,
    &JOB_TASKS,
    &JOB_TASK,
    &TASK_COUNTERS,
    &TASK_ATTEMPTS,
    &TASK_ATTEMPT,
    &TASK_ATTEMPT_COUNTERS,
];

/// Filters for finished-job listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobsQuery {
    pub state: Option<JobState>,
    pub user: Option<String>,
    pub queue: Option<String>,
    pub limit: Option<String>,
    pub started_time_begin: Option<String>,
    pub started_time_end: Option<String>,
    pub finished_time_begin: Option<String>,
    pub finished_time_end: Option<String>,
}

impl JobsQuery {
    pub fn to_params(&self) -> Params {
        Params::new()
            .with_opt("state", self.state)
            .with_opt("user", self.user.clone())
            .with_opt("queue", self.queue.clone())
            .with_opt("limit", self.limit.clone())
            .with_opt("started_time_begin", self.started_time_begin.clone())
            .with_opt("started_time_end", self.started_time_end.clone())
            .with_opt("finished_time_begin", self.finished_time_begin.clone())
            .with_opt("finished_time_end", self.finished_time_end.clone())
    }
}

/// Typed handle for the JobHistory Server.
#[derive(Debug, Clone)]
pub struct HistoryServer<T = UreqTransport> {
    client: ApiClient<T>,
}

impl HistoryServer<UreqTransport> {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }
}

impl Default for HistoryServer<UreqTransport> {
    fn default() -> Self {
        Self::new(ClientConfig::for_role(ApiRole::HistoryServer))
    }
}

impl<T: Transport> HistoryServer<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            client: ApiClient::with_transport(ApiRole::HistoryServer, config, transport),
        }
    }

    pub fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    fn task_params(job_id: &str, task_id: &str) -> Params {
        Params::new().with("job_id", job_id).with("task_id", task_id)
    }

    pub fn information(&self) -> Result<Response> {
        self.client.call(&INFORMATION, &Params::new())
    }

    pub fn jobs(&self, query: &JobsQuery) -> Result<Response> {
        self.client.call(&JOBS, &query.to_params())
    }

    pub fn job(&self, job_id: &str) -> Result<Response> {
        self.client.call(&JOB, &Params::new().with("job_id", job_id))
    }

    pub fn job_attempts(&self, job_id: &str) -> Result<Response> {
        self.client
            .call(&JOB_ATTEMPTS, &Params::new().with("job_id", job_id))
    }

    pub fn job_counters(&self, job_id: &str) -> Result<Response> {
        self.client
            .call(&JOB_COUNTERS, &Params::new().with("job_id", job_id))
    }

    pub fn job_conf(&self, job_id: &str) -> Result<Response> {
        self.client.call(&JOB_CONF, &Params::new().with("job_id", job_id))
    }

    pub fn job_tasks(&self, job_id: &str, task_type: Option<TaskType>) -> Result<Response> {
        let params = Params::new()
            .with("job_id", job_id)
            .with_opt("task_type", task_type);
        self.client.call(&JOB_TASKS, &params)
    }

    pub fn job_task(&self, job_id: &str, task_id: &str) -> Result<Response> {
        self.client.call(&JOB_TASK, &Self::task_params(job_id, task_id))
    }

    pub fn task_counters(&self, job_id: &str, task_id: &str) -> Result<Response> {
        self.client
            .call(&TASK_COUNTERS, &Self::task_params(job_id, task_id))
    }

    pub fn task_attempts(&self, job_id: &str, task_id: &str) -> Result<Response> {
        self.client
            .call(&TASK_ATTEMPTS, &Self::task_params(job_id, task_id))
    }

    pub fn task_attempt(&self, job_id: &str, task_id: &str, attempt_id: &str) -> Result<Response> {
        let params = Self::task_params(job_id, task_id).with("attempt_id", attempt_id);
        self.client.call(&TASK_ATTEMPT, &params)
    }

    pub fn task_attempt_counters(
        &self,
        job_id: &str,
        task_id: &str,
        attempt_id: &str,
    ) -> Result<Response> {
        let params = Self::task_params(job_id, task_id).with("attempt_id", attempt_id);
        self.client.call(&TASK_ATTEMPT_COUNTERS, &params)
    }
}
