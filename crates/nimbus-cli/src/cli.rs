//! Command line surface.

use clap::{ArgAction, Args, Parser, Subcommand};
use nimbus_core::{ResourceId, ResourcePath, TaskId};

use crate::output::OutputFormat;

#[derive(Debug, Parser)]
#[command(
    name = "nimbus",
    version,
    about = "Cloud API client: inspect and wait for asynchronous tasks"
)]
pub struct Cli {
    #[command(flatten)]
    pub api: ApiArgs,

    #[command(flatten)]
    pub wait: WaitFlags,

    /// Output format for results
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// More logging (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Where and as whom to talk to the API.
#[derive(Debug, Clone, Args)]
pub struct ApiArgs {
    /// Base URL of the cloud API
    #[arg(long, global = true, env = "NIMBUS_API_URL")]
    pub api_url: Option<String>,

    /// API token, sent as a bearer token
    #[arg(long, global = true, env = "NIMBUS_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Project id (required for resource commands)
    #[arg(long, global = true, env = "NIMBUS_PROJECT_ID")]
    pub project: Option<u64>,

    /// Region id (required for resource commands)
    #[arg(long, global = true, env = "NIMBUS_REGION_ID")]
    pub region: Option<u64>,
}

/// Flags every mutating command shares.
#[derive(Debug, Clone, Args)]
pub struct WaitFlags {
    /// Wait for spawned tasks to finish (`--wait false` prints task ids and returns)
    #[arg(
        long,
        global = true,
        env = "NIMBUS_WAIT",
        action = ArgAction::Set,
        default_value_t = true
    )]
    pub wait: bool,

    /// How long to wait for each task, in seconds
    #[arg(long, global = true, env = "NIMBUS_WAIT_SECONDS", default_value_t = 3600)]
    pub wait_seconds: u64,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Inspect asynchronous tasks
    #[command(subcommand)]
    Task(TaskCommand),

    /// Show or delete resources
    #[command(subcommand)]
    Resource(ResourceCommand),
}

#[derive(Debug, Subcommand)]
pub enum TaskCommand {
    /// Print the current state of a task
    Show { task_id: TaskId },

    /// Block until a task finishes, then print it
    Wait {
        task_id: TaskId,

        /// Fail as soon as the task reports an error, even before it enters ERROR
        #[arg(long)]
        stop_on_error: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum ResourceCommand {
    /// Print one resource
    Show {
        /// Resource collection, e.g. `routers` or `k8s/clusters`
        path: ResourcePath,
        id: ResourceId,
    },

    /// Delete one resource and (by default) wait until it is gone
    Delete {
        /// Resource collection, e.g. `routers` or `k8s/clusters`
        path: ResourcePath,
        id: ResourceId,

        /// Fail as soon as the task reports an error, even before it enters ERROR
        #[arg(long)]
        stop_on_error: bool,
    },
}
