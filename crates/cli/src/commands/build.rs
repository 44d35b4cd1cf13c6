use std::path::Path;
use std::process;

use super::{load_config_or_exit, report_build_error};
use crate::{report_error, OutputFormat};

pub(crate) fn cmd_build(
    input: Option<&Path>,
    out: Option<&Path>,
    config_path: Option<&Path>,
    output: OutputFormat,
    quiet: bool,
) {
    let (config, table) = load_config_or_exit(config_path, output, quiet);
    let input = config.input_path(input);
    let out_dir = config.out_dir(out);

    let report = match tokenbake_core::build(&input, &out_dir, &table) {
        Ok(r) => r,
        Err(e) => {
            report_build_error(&e, output, quiet);
            process::exit(1);
        }
    };

    if report.stats.skipped.total() > 0 {
        tracing::info!(
            skipped = report.stats.skipped.total(),
            "some values could not be resolved and were left out"
        );
    }

    match output {
        OutputFormat::Text => {
            for failure in &report.failures {
                report_error(&format!("error: {}", failure), output, quiet);
            }
            if !quiet {
                for w in &report.written {
                    println!("Wrote {}", w.path.display());
                }
                println!(
                    "Generated {} token sources in {}",
                    report.written.len(),
                    out_dir.display()
                );
            }
        }
        OutputFormat::Json => {
            let mut json = report.to_json_value();
            json["out_dir"] = serde_json::Value::String(out_dir.display().to_string());
            println!(
                "{}",
                serde_json::to_string_pretty(&json).unwrap_or_default()
            );
        }
    }

    if !report.is_success() {
        process::exit(1);
    }
}
