//! `a3bt clean`.

use a3lt_core::ToolsSection;
use a3lt_runtime::clean_build_dir;

use crate::error::CliError;

pub fn execute(tools: &ToolsSection) -> Result<(), CliError> {
    let removed = clean_build_dir(&tools.build_dir).map_err(|source| CliError::Io {
        path: tools.build_dir.clone(),
        source,
    })?;
    if removed {
        println!("Removed {}", tools.build_dir.display());
    } else {
        println!("Nothing to clean in {}", tools.build_dir.display());
    }
    Ok(())
}
