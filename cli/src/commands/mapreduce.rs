//! Job and task subcommands shared by `am` and `hs`.

use clap::Subcommand;

#[derive(Debug, Subcommand)]
pub enum JobCommand {
    /// One job
    Job { job_id: String },
    /// Attempts of one job
    #[command(name = "job_attempts")]
    JobAttempts { job_id: String },
    /// Counters of one job
    #[command(name = "job_counters")]
    JobCounters { job_id: String },
    /// Configuration of one job
    #[command(name = "job_conf")]
    JobConf { job_id: String },
    /// Tasks of one job
    Tasks {
        job_id: String,
        /// m (map) or r (reduce)
        #[arg(long = "type")]
        task_type: Option<String>,
    },
    /// One task
    Task { job_id: String, task_id: String },
    /// Counters of one task
    #[command(name = "task_counters")]
    TaskCounters { job_id: String, task_id: String },
    /// Attempts of one task
    #[command(name = "task_attempts")]
    TaskAttempts { job_id: String, task_id: String },
    /// One task attempt
    #[command(name = "task_attempt")]
    TaskAttempt {
        job_id: String,
        task_id: String,
        attempt_id: String,
    },
    /// Counters of one task attempt
    #[command(name = "task_attempt_counters")]
    TaskAttemptCounters {
        job_id: String,
        task_id: String,
        attempt_id: String,
    },
}
