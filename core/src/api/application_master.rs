//! MapReduce ApplicationMaster REST API, reached through the RM web proxy
//! (`/proxy/{application_id}/ws/v1/mapreduce`).
//!
//! Every path starts with the application id because the proxy routes by it;
//! the id is an ordinary required path parameter.

use crate::client::{ApiClient, ApiRole, ClientConfig};
use crate::constants::{TaskType, TASK_TYPE};
use crate::error::Result;
use crate::http::{Transport, UreqTransport};
use crate::operation::{OperationDescriptor, ParamSpec};
use crate::request::Params;
use crate::response::Response;

const APP_ID: ParamSpec = ParamSpec::path("application_id");
const JOB_ID: ParamSpec = ParamSpec::path("job_id");
const TASK_ID: ParamSpec = ParamSpec::path("task_id");
const ATTEMPT_ID: ParamSpec = ParamSpec::path("attempt_id");

pub static APPLICATION_INFORMATION: OperationDescriptor = OperationDescriptor {
    name: "application_information",
    path: "/{application_id}/ws/v1/mapreduce/info",
    params: &[APP_ID],
    ..OperationDescriptor::GET
};

pub static JOBS: OperationDescriptor = OperationDescriptor {
    name: "jobs",
    path: "/{application_id}/ws/v1/mapreduce/jobs",
    params: &[APP_ID],
    ..OperationDescriptor::GET
};

pub static JOB: OperationDescriptor = OperationDescriptor {
    name: "job",
    path: "/{application_id}/ws/v1/mapreduce/jobs/{job_id}",
    params: &[APP_ID, JOB_ID],
    ..OperationDescriptor::GET
};

pub static JOB_ATTEMPTS: OperationDescriptor = OperationDescriptor {
    name: "job_attempts",
    path: "/{application_id}/ws/v1/mapreduce/jobs/{job_id}/jobattempts",
    params: &[APP_ID, JOB_ID],
    ..OperationDescriptor::GET
};

pub static JOB_COUNTERS: OperationDescriptor = OperationDescriptor {
    name: "job_counters",
    path: "/{application_id}/ws/v1/mapreduce/jobs/{job_id}/counters",
    params: &[APP_ID, JOB_ID],
    ..OperationDescriptor::GET
};

pub static JOB_CONF: OperationDescriptor = OperationDescriptor {
    name: "job_conf",
    path: "/{application_id}/ws/v1/mapreduce/jobs/{job_id}/conf",
    params: &[APP_ID, JOB_ID],
    ..OperationDescriptor::GET
};

pub static JOB_TASKS: OperationDescriptor = OperationDescriptor {
    name: "job_tasks",
    path: "/{application_id}/ws/v1/mapreduce/jobs/{job_id}/tasks",
    params: &[APP_ID, JOB_ID, ParamSpec::query("task_type", "type").one_of(&TASK_TYPE)],
    ..OperationDescriptor::GET
};

pub static JOB_TASK: OperationDescriptor = OperationDescriptor {
    name: "job_task",
    path: "/{application_id}/ws/v1/mapreduce/jobs/{job_id}/tasks/{task_id}",
    params: &[APP_ID, JOB_ID, TASK_ID],
    ..OperationDescriptor::GET
};

pub static TASK_COUNTERS: OperationDescriptor = OperationDescriptor {
    name: "task_counters",
    path: "/{application_id}/ws/v1/mapreduce/jobs/{job_id}/tasks/{task_id}/counters",
    params: &[APP_ID, JOB_ID, TASK_ID],
    ..OperationDescriptor::GET
};

pub static TASK_ATTEMPTS: OperationDescriptor = OperationDescriptor {
    name: "task_attempts",
    path: "/{application_id}/ws/v1/mapreduce/jobs/{job_id}/tasks/{task_id}/attempts",
    params: &[APP_ID, JOB_ID, TASK_ID],
    ..OperationDescriptor::GET
};

pub static TASK_ATTEMPT: OperationDescriptor = OperationDescriptor {
    name: "task_attempt",
    path: "/{application_id}/ws/v1/mapreduce/jobs/{job_id}/tasks/{task_id}/attempts/{attempt_id}",
    params: &[APP_ID, JOB_ID, TASK_ID, ATTEMPT_ID],
    ..OperationDescriptor::GET
};

pub static TASK_ATTEMPT_COUNTERS: OperationDescriptor = OperationDescriptor {
    name: "task_attempt_counters",
    path: "/{application_id}/ws/v1/mapreduce/jobs/{job_id}/tasks/{task_id}/attempts/{attempt_id}/counters",
    params: &[APP_ID, JOB_ID, TASK_ID, ATTEMPT_ID],
    ..OperationDescriptor::GET
};

pub static OPERATIONS: &[&OperationDescriptor] = &[
    &APPLICATION_INFORMATION,
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

/// Typed handle for MapReduce ApplicationMasters behind one RM proxy.
#[derive(Debug, Clone)]
pub struct ApplicationMaster<T = UreqTransport> {
    client: ApiClient<T>,
}

impl ApplicationMaster<UreqTransport> {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }
}

impl Default for ApplicationMaster<UreqTransport> {
    fn default() -> Self {
        Self::new(ClientConfig::for_role(ApiRole::ApplicationMaster))
    }
}

impl<T: Transport> ApplicationMaster<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            client: ApiClient::with_transport(ApiRole::ApplicationMaster, config, transport),
        }
    }

    pub fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    fn job_params(application_id: &str, job_id: &str) -> Params {
        Params::new()
            .with("application_id", application_id)
            .with("job_id", job_id)
    }

    fn task_params(application_id: &str, job_id: &str, task_id: &str) -> Params {
        Self::job_params(application_id, job_id).with("task_id", task_id)
    }

    pub fn application_information(&self, application_id: &str) -> Result<Response> {
        let params = Params::new().with("application_id", application_id);
        self.client.call(&APPLICATION_INFORMATION, &params)
    }

    pub fn jobs(&self, application_id: &str) -> Result<Response> {
        let params = Params::new().with("application_id", application_id);
        self.client.call(&JOBS, &params)
    }

    pub fn job(&self, application_id: &str, job_id: &str) -> Result<Response> {
        self.client.call(&JOB, &Self::job_params(application_id, job_id))
    }

    pub fn job_attempts(&self, application_id: &str, job_id: &str) -> Result<Response> {
        self.client
            .call(&JOB_ATTEMPTS, &Self::job_params(application_id, job_id))
    }

    pub fn job_counters(&self, application_id: &str, job_id: &str) -> Result<Response> {
        self.client
            .call(&JOB_COUNTERS, &Self::job_params(application_id, job_id))
    }

    pub fn job_conf(&self, application_id: &str, job_id: &str) -> Result<Response> {
        self.client.call(&JOB_CONF, &Self::job_params(application_id, job_id))
    }

    pub fn job_tasks(
        &self,
        application_id: &str,
        job_id: &str,
        task_type: Option<TaskType>,
    ) -> Result<Response> {
        let params = Self::job_params(application_id, job_id).with_opt("task_type", task_type);
        self.client.call(&JOB_TASKS, &params)
    }

    pub fn job_task(&self, application_id: &str, job_id: &str, task_id: &str) -> Result<Response> {
        self.client
            .call(&JOB_TASK, &Self::task_params(application_id, job_id, task_id))
    }

    pub fn task_counters(
        &self,
        application_id: &str,
        job_id: &str,
        task_id: &str,
    ) -> Result<Response> {
        self.client
            .call(&TASK_COUNTERS, &Self::task_params(application_id, job_id, task_id))
    }

    pub fn task_attempts(
        &self,
        application_id: &str,
        job_id: &str,
        task_id: &str,
    ) -> Result<Response> {
        self.client
            .call(&TASK_ATTEMPTS, &Self::task_params(application_id, job_id, task_id))
    }

    pub fn task_attempt(
        &self,
        application_id: &str,
        job_id: &str,
        task_id: &str,
        attempt_id: &str,
    ) -> Result<Response> {
        let params = Self::task_params(application_id, job_id, task_id).with("attempt_id", attempt_id);
        self.client.call(&TASK_ATTEMPT, &params)
    }

    pub fn task_attempt_counters(
        &self,
        application_id: &str,
        job_id: &str,
        task_id: &str,
        attempt_id: &str,
    ) -> Result<Response> {
        let params = Self::task_params(application_id, job_id, task_id).with("attempt_id", attempt_id);
        self.client.call(&TASK_ATTEMPT_COUNTERS, &params)
    }
}
