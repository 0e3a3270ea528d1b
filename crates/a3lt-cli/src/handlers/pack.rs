//! `a3bt pack`.

use a3lt_core::ToolsSection;
use a3lt_runtime::{PackRequest, PackedPbo, PboBuilder};

use crate::commands::PackArgs;
use crate::error::CliError;

impl From<PackArgs> for PackRequest {
    fn from(args: PackArgs) -> Self {
        Self {
            source_directory: args.source,
            base_name: args.base_name,
            map_type: args.map_type,
            mission_sqm: args.sqm,
            output: args.output,
        }
    }
}

pub async fn execute(tools: &ToolsSection, args: PackArgs) -> Result<PackedPbo, CliError> {
    let builder = PboBuilder::from_tools(tools);
    let packed = builder.pack(&PackRequest::from(args)).await?;
    println!("{}", packed.pbo.display());
    Ok(packed)
}
