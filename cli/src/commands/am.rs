//! `am` subcommands: a MapReduce ApplicationMaster behind the RM proxy.

use clap::Subcommand;
use yarn_core::{ApplicationMaster, Response, Transport, YarnError};

use super::mapreduce::JobCommand;
use super::parse_flag;

#[derive(Debug, Subcommand)]
pub enum AmCommand {
    /// ApplicationMaster information
    Info,
    /// Jobs run by this ApplicationMaster
    Jobs,
    #[command(flatten)]
    Job(JobCommand),
}

pub fn run<T: Transport>(
    application_id: &str,
    command: AmCommand,
    am: &ApplicationMaster<T>,
) -> Result<Response, YarnError> {
    let app = application_id;
    match command {
        AmCommand::Info => am.application_information(app),
        AmCommand::Jobs => am.jobs(app),
        AmCommand::Job(job) => match job {
            JobCommand::Job { job_id } => am.job(app, &job_id),
            JobCommand::JobAttempts { job_id } => am.job_attempts(app, &job_id),
            JobCommand::JobCounters { job_id } => am.job_counters(app, &job_id),
            JobCommand::JobConf { job_id } => am.job_conf(app, &job_id),
            JobCommand::Tasks { job_id, task_type } => {
                am.job_tasks(app, &job_id, parse_flag(task_type.as_deref())?)
            }
            JobCommand::Task { job_id, task_id } => am.job_task(app, &job_id, &task_id),
            JobCommand::TaskCounters { job_id, task_id } => {
                am.task_counters(app, &job_id, &task_id)
            }
            JobCommand::TaskAttempts { job_id, task_id } => {
                am.task_attempts(app, &job_id, &task_id)
            }
            JobCommand::TaskAttempt {
                job_id,
                task_id,
                attempt_id,
            } => am.task_attempt(app, &job_id, &task_id, &attempt_id),
            JobCommand::TaskAttemptCounters {
                job_id,
                task_id,
                attempt_id,
            } => am.task_attempt_counters(app, &job_id, &task_id, &attempt_id),
        },
    }
}
