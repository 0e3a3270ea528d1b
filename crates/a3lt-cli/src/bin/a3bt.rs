//! `a3bt` entry point - the composition root for the build tool.

use std::process::ExitCode;

use a3lt_cli::{BtCli, BuildCommand, CliError, bootstrap, handlers};
use a3lt_core::load_config;
use clap::Parser;
use tracing::debug;

#[tokio::main]
async fn main() -> ExitCode {
    let dotenv = bootstrap::load_environment();
    let cli = BtCli::parse();
    let _guard = bootstrap::init_logging(cli.verbose, None);
    if let Some(path) = dotenv {
        debug!(path = %path.display(), "Loaded environment file");
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => e.report(),
    }
}

async fn run(cli: BtCli) -> Result<(), CliError> {
    let loaded = load_config(cli.config.as_deref())?;
    debug!(source = %loaded.source, "Configuration loaded");
    let tools = &loaded.document.tools;

    match cli.command {
        BuildCommand::Clean => handlers::clean::execute(tools),
        BuildCommand::Pack(args) => handlers::pack::execute(tools, args).await.map(drop),
        BuildCommand::Archive(args) => handlers::archive::execute(tools, args).map(drop),
        BuildCommand::Paths => handlers::paths::execute(&loaded),
    }
}
