//! `a3bt archive`.

use a3lt_core::ToolsSection;
use a3lt_runtime::{ArchiveBuilder, ArchiveRequest, BuiltArchive};

use crate::commands::ArchiveArgs;
use crate::error::CliError;

pub fn execute(tools: &ToolsSection, args: ArchiveArgs) -> Result<BuiltArchive, CliError> {
    if args.base_name.trim().is_empty() {
        return Err(CliError::Arguments("--base-name must not be empty".to_string()));
    }

    let request = ArchiveRequest {
        base_name: args.base_name,
        includes: args.include,
        output: args.output,
    };
    let built = ArchiveBuilder::new(&tools.build_dir).build(&request)?;
    println!("{}", built.archive.display());
    Ok(built)
}
