use std::process::ExitCode;

use tbl_core::{Config, FlexConfig};

/// Handle `tblmonit config schema`. Always prints JSON.
pub fn handle(flex: bool) -> anyhow::Result<ExitCode> {
    let schema = if flex {
        schemars::schema_for!(FlexConfig)
    } else {
        schemars::schema_for!(Config)
    };
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(ExitCode::SUCCESS)
}
