//! Subcommand handlers. Each one talks to the API and writes its result
//! through the shared [`Printer`].

mod resource;
mod task;

use std::io::Write;

use anyhow::Context;
use nimbus_core::ApiClient;

use crate::cli::{ApiArgs, Cli, Command};
use crate::output::Printer;

pub async fn run<W: Write>(cli: Cli, printer: &mut Printer<W>) -> anyhow::Result<()> {
    let client = build_client(&cli.api)?;
    match cli.command {
        Command::Task(cmd) => task::run(&client, &cli.wait, cmd, printer).await,
        Command::Resource(cmd) => resource::run(&client, &cli.wait, cmd, printer).await,
    }
}

fn build_client(api: &ApiArgs) -> anyhow::Result<ApiClient> {
    let mut builder = ApiClient::builder();
    if let Some(url) = &api.api_url {
        builder = builder.api_url(url);
    }
    if let Some(token) = &api.api_token {
        builder = builder.api_token(token);
    }
    if let Some(project) = api.project {
        builder = builder.project_id(project);
    }
    if let Some(region) = api.region {
        builder = builder.region_id(region);
    }
    builder
        .build()
        .context("failed to configure the API client (see --api-url / NIMBUS_API_URL)")
}
