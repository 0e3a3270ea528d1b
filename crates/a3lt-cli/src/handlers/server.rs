//! `a3sdt` command handlers.
//!
//! Each handler derives the server state afresh with
//! [`LifecycleManager::inspect`] and hands it to the transition it runs.
//! Only `start` and `restart` look at the selected manifest.

use a3lt_core::{ControlConfig, LaunchConfig, ProcessControl, ServerState, ToolConfig};
use a3lt_runtime::{LifecycleManager, StartMode, StartedServer, SystemProcessControl};
use tracing::{info, warn};

use crate::commands::ServerCommand;
use crate::error::CliError;

/// Build the lifecycle manager from the `server` section.
pub fn manager(document: &ToolConfig) -> Result<LifecycleManager<SystemProcessControl>, CliError> {
    let config = ControlConfig::from_section(&document.server)?;
    Ok(LifecycleManager::new(config, SystemProcessControl::new()))
}

/// What `start` launches: the document plus the requested manifest name.
#[derive(Debug, Clone, Copy)]
pub struct LaunchSource<'a> {
    pub document: &'a ToolConfig,
    pub manifest: Option<&'a str>,
}

impl LaunchSource<'_> {
    fn resolve(self) -> Result<LaunchConfig, CliError> {
        Ok(LaunchConfig::from_config(self.document, self.manifest)?)
    }
}

/// Dispatch one server command.
pub async fn execute<C: ProcessControl>(
    manager: &LifecycleManager<C>,
    source: LaunchSource<'_>,
    command: &ServerCommand,
) -> Result<(), CliError> {
    match *command {
        ServerCommand::Start { attach } => start(manager, source, attach).await,
        ServerCommand::Stop => stop(manager).await,
        ServerCommand::Restart { attach } => restart(manager, source, attach).await,
        ServerCommand::Status => {
            println!("{}", status(manager)?);
            Ok(())
        }
    }
}

pub async fn start<C: ProcessControl>(
    manager: &LifecycleManager<C>,
    source: LaunchSource<'_>,
    attach: bool,
) -> Result<(), CliError> {
    let state = manager.inspect()?;
    let launch = source.resolve()?;
    let started = manager.start(state, &launch, mode(attach))?;
    if attach {
        supervise(manager, started).await?;
    }
    Ok(())
}

pub async fn stop<C: ProcessControl>(manager: &LifecycleManager<C>) -> Result<(), CliError> {
    let state = manager.inspect()?;
    manager.stop(state).await?;
    Ok(())
}

/// The manifest is resolved before anything is stopped, so a broken
/// manifest leaves the running server alone.
pub async fn restart<C: ProcessControl>(
    manager: &LifecycleManager<C>,
    source: LaunchSource<'_>,
    attach: bool,
) -> Result<(), CliError> {
    let state = manager.inspect()?;
    let launch = source.resolve()?;
    let started = manager.restart(state, &launch, mode(attach)).await?;
    if attach {
        supervise(manager, started).await?;
    }
    Ok(())
}

/// Current state, after orphan cleanup.
pub fn status<C: ProcessControl>(manager: &LifecycleManager<C>) -> Result<ServerState, CliError> {
    Ok(manager.inspect()?)
}

async fn supervise<C: ProcessControl>(
    manager: &LifecycleManager<C>,
    started: StartedServer,
) -> Result<(), CliError> {
    info!("Attached to the server; its output follows");
    match manager.supervise(started).await? {
        Some(0) | None => {}
        Some(code) => warn!(code, "The Arma 3 server exited with a failure status"),
    }
    Ok(())
}

const fn mode(attach: bool) -> StartMode {
    if attach {
        StartMode::Attached
    } else {
        StartMode::Detached
    }
}
