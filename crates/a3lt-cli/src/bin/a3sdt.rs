//! `a3sdt` entry point - the composition root for the server tool.

use std::process::ExitCode;

use a3lt_cli::handlers::server::LaunchSource;
use a3lt_cli::{CliError, SERVER_TOOL_LOG, SdtCli, bootstrap, handlers};
use a3lt_core::load_config;
use clap::Parser;
use tracing::debug;

#[tokio::main]
async fn main() -> ExitCode {
    let dotenv = bootstrap::load_environment();
    let cli = SdtCli::parse();

    let loaded = match load_config(cli.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            let _guard = bootstrap::init_logging(cli.verbose, None);
            return CliError::from(e).report();
        }
    };

    let log_file = loaded
        .document
        .server
        .resolved_log_dir()
        .ok()
        .map(|dir| dir.join(SERVER_TOOL_LOG));
    let _guard = bootstrap::init_logging(cli.verbose, log_file.as_deref());
    if let Some(path) = dotenv {
        debug!(path = %path.display(), "Loaded environment file");
    }
    debug!(source = %loaded.source, "Configuration loaded");

    let source = LaunchSource {
        document: &loaded.document,
        manifest: cli.manifest.as_deref(),
    };
    let result = match handlers::server::manager(&loaded.document) {
        Ok(manager) => handlers::server::execute(&manager, source, &cli.command).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => e.report(),
    }
}
