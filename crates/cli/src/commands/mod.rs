mod build;
mod plan;
mod validate;

pub(crate) use build::cmd_build;
pub(crate) use plan::cmd_plan;
pub(crate) use validate::cmd_validate;

use std::path::Path;
use std::process;

use tokenbake_core::{BuildError, RoutingTable};

use crate::config::{self, Config};
use crate::{report_error, OutputFormat};

/// Load the config and its routing table, exiting on a bad config file.
fn load_config_or_exit(
    path: Option<&Path>,
    output: OutputFormat,
    quiet: bool,
) -> (Config, RoutingTable) {
    match config::load_config(path) {
        Ok(config) => {
            let table = RoutingTable::new(config.collections.clone());
            (config, table)
        }
        Err(msg) => {
            report_error(&format!("error: {}", msg), output, quiet);
            process::exit(1);
        }
    }
}

fn report_build_error(err: &BuildError, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("error: {}", err),
        OutputFormat::Json => eprintln!("{}", serde_json::json!({ "error": err.to_json_value() })),
    }
}
