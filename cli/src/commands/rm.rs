//! `rm` subcommands: ResourceManager cluster endpoints.

use clap::{Args, Subcommand};
use yarn_core::{
    ApplicationsQuery, NodesQuery, ResourceManager, Response, Transport, YarnError,
};

use super::parse_flag;

#[derive(Debug, Subcommand)]
pub enum RmCommand {
    /// Cluster information
    Info,
    /// Cluster-wide metrics
    Metrics,
    /// Scheduler state and queues
    Scheduler,
    /// List applications
    Apps(AppsArgs),
    /// One application
    App { application_id: String },
    /// Attempts of one application
    #[command(name = "app_attempts")]
    AppAttempts { application_id: String },
    /// List nodes
    Nodes {
        /// Node state (NEW, RUNNING, UNHEALTHY, DECOMMISSIONED, LOST, REBOOTED, ...)
        #[arg(long)]
        state: Option<String>,
        /// true or false
        #[arg(long)]
        healthy: Option<String>,
    },
    /// One node
    Node { node_id: String },
    /// Ask the ResourceManager for a new application id
    #[command(name = "new_app")]
    NewApp,
}

#[derive(Debug, Args)]
pub struct AppsArgs {
    /// YARN application state (NEW, SUBMITTED, ACCEPTED, RUNNING, FINISHED, ...)
    #[arg(long)]
    pub state: Option<String>,
    /// UNDEFINED, SUCCEEDED, FAILED or KILLED
    #[arg(long)]
    pub final_status: Option<String>,
    #[arg(long)]
    pub user: Option<String>,
    #[arg(long)]
    pub queue: Option<String>,
    /// Maximum number of applications
    #[arg(long)]
    pub limit: Option<u32>,
    /// Epoch milliseconds
    #[arg(long)]
    pub started_time_begin: Option<u64>,
    #[arg(long)]
    pub started_time_end: Option<u64>,
    #[arg(long)]
    pub finished_time_begin: Option<u64>,
    #[arg(long)]
    pub finished_time_end: Option<u64>,
}

impl AppsArgs {
    fn to_query(&self) -> Result<ApplicationsQuery, YarnError> {
        Ok(ApplicationsQuery {
            state: parse_flag(self.state.as_deref())?,
            final_status: parse_flag(self.final_status.as_deref())?,
            user: self.user.clone(),
            queue: self.queue.clone(),
            limit: self.limit.map(|l| l.to_string()),
            started_time_begin: self.started_time_begin.map(|t| t.to_string()),
            started_time_end: self.started_time_end.map(|t| t.to_string()),
            finished_time_begin: self.finished_time_begin.map(|t| t.to_string()),
            finished_time_end: self.finished_time_end.map(|t| t.to_string()),
        })
    }
}

pub fn run<T: Transport>(command: RmCommand, rm: &ResourceManager<T>) -> Result<Response, YarnError> {
    match command {
        RmCommand::Info => rm.cluster_information(),
        RmCommand::Metrics => rm.cluster_metrics(),
        RmCommand::Scheduler => rm.cluster_scheduler(),
        RmCommand::Apps(args) => rm.cluster_applications(&args.to_query()?),
        RmCommand::App { application_id } => rm.cluster_application(&application_id),
        RmCommand::AppAttempts { application_id } => {
            rm.cluster_application_attempts(&application_id)
        }
        RmCommand::Nodes { state, healthy } => {
            let query = NodesQuery {
                state: parse_flag(state.as_deref())?,
                healthy: parse_flag(healthy.as_deref())?,
            };
            rm.cluster_nodes(&query)
        }
        RmCommand::Node { node_id } => rm.cluster_node(&node_id),
        RmCommand::NewApp => rm.cluster_new_application(),
    }
}
