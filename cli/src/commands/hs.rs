//! `hs` subcommands: the MapReduce JobHistory Server.

use clap::{Args, Subcommand};
use yarn_core::{HistoryServer, JobsQuery, Response, Transport, YarnError};

use super::mapreduce::JobCommand;
use super::parse_flag;

#[derive(Debug, Subcommand)]
pub enum HsCommand {
    /// History server information
    Info,
    /// List finished jobs
    Jobs(JobsArgs),
    #[command(flatten)]
    Job(JobCommand),
}

#[derive(Debug, Args)]
pub struct JobsArgs {
    /// Job state (NEW, INITED, RUNNING, SUCCEEDED, FAILED, KILL_WAIT, KILLED, ERROR)
    #[arg(long)]
    pub state: Option<String>,
    #[arg(long)]
    pub user: Option<String>,
    #[arg(long)]
    pub queue: Option<String>,
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

impl JobsArgs {
    fn to_query(&self) -> Result<JobsQuery, YarnError> {
        Ok(JobsQuery {
            state: parse_flag(self.state.as_deref())?,
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

pub fn run<T: Transport>(command: HsCommand, hs: &HistoryServer<T>) -> Result<Response, YarnError> {
    match command {
        HsCommand::Info => hs.information(),
        HsCommand::Jobs(args) => hs.jobs(&args.to_query()?),
        HsCommand::Job(job) => match job {
            JobCommand::Job { job_id } => hs.job(&job_id),
            JobCommand::JobAttempts { job_id } => hs.job_attempts(&job_id),
            JobCommand::JobCounters { job_id } => hs.job_counters(&job_id),
            JobCommand::JobConf { job_id } => hs.job_conf(&job_id),
            JobCommand::Tasks { job_id, task_type } => {
                hs.job_tasks(&job_id, parse_flag(task_type.as_deref())?)
            }
            JobCommand::Task { job_id, task_id } => hs.job_task(&job_id, &task_id),
            JobCommand::TaskCounters { job_id, task_id } => hs.task_counters(&job_id, &task_id),
            JobCommand::TaskAttempts { job_id, task_id } => hs.task_attempts(&job_id, &task_id),
            JobCommand::TaskAttempt {
                job_id,
                task_id,
                attempt_id,
            } => hs.task_attempt(&job_id, &task_id, &attempt_id),
            JobCommand::TaskAttemptCounters {
                job_id,
                task_id,
                attempt_id,
            } => hs.task_attempt_counters(&job_id, &task_id, &attempt_id),
        },
    }
}
