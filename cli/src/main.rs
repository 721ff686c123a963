//! yarn-api-client - command-line front end for the YARN REST APIs.

mod commands;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use yarn_core::{
    ApiRole, ApplicationMaster, ClientConfig, HistoryServer, NodeManager, ResourceManager,
    Response, Transport, UreqTransport,
};

use commands::{am::AmCommand, hs::HsCommand, nm::NmCommand, rm::RmCommand};

/// Query YARN ResourceManager, NodeManager, MapReduce ApplicationMaster and
/// JobHistory Server REST endpoints.
#[derive(Debug, Parser)]
#[command(name = "yarn-api-client")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Server host
    #[arg(long, global = true, env = "YARN_API_HOST")]
    host: Option<String>,

    /// Server port [default: the role's standard port]
    #[arg(long, global = true, env = "YARN_API_PORT")]
    port: Option<u16>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Role,
}

#[derive(Debug, Subcommand)]
enum Role {
    /// ResourceManager
    Rm {
        #[command(subcommand)]
        command: RmCommand,
    },
    /// NodeManager
    Nm {
        #[command(subcommand)]
        command: NmCommand,
    },
    /// MapReduce ApplicationMaster, through the ResourceManager proxy
    Am {
        /// Application the ApplicationMaster belongs to
        application_id: String,
        #[command(subcommand)]
        command: AmCommand,
    },
    /// MapReduce JobHistory Server
    Hs {
        #[command(subcommand)]
        command: HsCommand,
    },
}

impl Role {
    fn api_role(&self) -> ApiRole {
        match self {
            Role::Rm { .. } => ApiRole::ResourceManager,
            Role::Nm { .. } => ApiRole::NodeManager,
            Role::Am { .. } => ApiRole::ApplicationMaster,
            Role::Hs { .. } => ApiRole::HistoryServer,
        }
    }
}

fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // RUST_LOG wins over -v.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolve the endpoint and run the selected operation over `transport`.
fn execute<T: Transport>(cli: Cli, transport: T) -> Result<Response> {
    let role = cli.command.api_role();
    let config = ClientConfig::resolve(role, cli.host, cli.port);
    debug!(%role, host = %config.host, port = config.port, "dispatching");

    let response = match cli.command {
        Role::Rm { command } => {
            commands::rm::run(command, &ResourceManager::with_transport(config, transport))
        }
        Role::Nm { command } => {
            commands::nm::run(command, &NodeManager::with_transport(config, transport))
        }
        Role::Am {
            application_id,
            command,
        } => commands::am::run(
            &application_id,
            command,
            &ApplicationMaster::with_transport(config, transport),
        ),
        Role::Hs { command } => {
            commands::hs::run(command, &HistoryServer::with_transport(config, transport))
        }
    };
    response.with_context(|| format!("{role} request failed"))
}

/// Text bodies print verbatim, JSON pretty-printed. An error response whose
/// body is not JSON (a proxy's HTML page, say) prints raw.
fn render(response: &Response) -> Result<String> {
    match response.data() {
        Ok(Value::String(text)) => Ok(text.clone()),
        Ok(value) => serde_json::to_string_pretty(value).context("rendering response"),
        Err(_) if !response.is_success() => Ok(response.raw_body().into_owned()),
        Err(err) => Err(err).context("response body"),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let outcome = execute(cli, UreqTransport::new()).and_then(|response| {
        let output = render(&response)?;
        Ok((response.status_code(), response.is_success(), output))
    });

    match outcome {
        Ok((_, true, output)) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Ok((status, false, output)) => {
            println!("{output}");
            debug!(status, "non-success response");
            ExitCode::FAILURE
        }
        Err(err) => {
            debug!(error = ?err, "command failed");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
