//! `nm` subcommands: one NodeManager.

use clap::Subcommand;
use yarn_core::{NodeApplicationsQuery, NodeManager, Response, Transport, YarnError};

use super::parse_flag;

#[derive(Debug, Subcommand)]
pub enum NmCommand {
    /// Node information
    Info,
    /// Applications with containers on this node
    Apps {
        /// NodeManager application state (NEW, INITING, RUNNING, FINISHED, ...)
        #[arg(long)]
        state: Option<String>,
        #[arg(long)]
        user: Option<String>,
    },
    /// One application on this node
    App { application_id: String },
    /// Containers on this node
    Containers,
    /// One container
    Container { container_id: String },
    /// Plain-text log file of one container
    #[command(name = "container_log")]
    ContainerLog { container_id: String, filename: String },
}

pub fn run<T: Transport>(command: NmCommand, nm: &NodeManager<T>) -> Result<Response, YarnError> {
    match command {
        NmCommand::Info => nm.node_information(),
        NmCommand::Apps { state, user } => {
            let query = NodeApplicationsQuery {
                state: parse_flag(state.as_deref())?,
                user,
            };
            nm.node_applications(&query)
        }
        NmCommand::App { application_id } => nm.node_application(&application_id),
        NmCommand::Containers => nm.node_containers(),
        NmCommand::Container { container_id } => nm.node_container(&container_id),
        NmCommand::ContainerLog {
            container_id,
            filename,
        } => nm.node_container_log(&container_id, &filename),
    }
}
