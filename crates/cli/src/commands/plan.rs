use std::path::Path;
use std::process;

use tokenbake_core::{BuildPlan, SkipCounts};

use super::{load_config_or_exit, report_build_error};
use crate::OutputFormat;

pub(crate) fn cmd_plan(
    input: Option<&Path>,
    config_path: Option<&Path>,
    output: OutputFormat,
    quiet: bool,
) {
    let (config, table) = load_config_or_exit(config_path, output, quiet);
    let input = config.input_path(input);

    let plan = match tokenbake_core::plan(&input, &table) {
        Ok(p) => p,
        Err(e) => {
            report_build_error(&e, output, quiet);
            process::exit(1);
        }
    };

    match output {
        OutputFormat::Text => {
            if !quiet {
                print!("{}", format_plan(&plan));
            }
        }
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&plan.to_json_value()).unwrap_or_default()
            );
        }
    }
}

fn format_plan(plan: &BuildPlan) -> String {
    let width = plan
        .buckets
        .iter()
        .map(|b| b.file_name().len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    let mut tokens = 0;
    for bucket in &plan.buckets {
        let count = bucket.tree.leaf_count();
        tokens += count;
        out.push_str(&format!(
            "{:<width$}  {} tokens\n",
            bucket.file_name(),
            count,
            width = width
        ));
    }

    let skipped = &plan.stats.skipped;
    out.push_str(&format!(
        "\n{} buckets, {} tokens from {} variables, {} skipped{}\n",
        plan.buckets.len(),
        tokens,
        plan.variables,
        skipped.total(),
        skip_breakdown(skipped)
    ));
    if plan.stats.overwritten > 0 {
        out.push_str(&format!(
            "{} values overwritten by later variables\n",
            plan.stats.overwritten
        ));
    }
    if !plan.stats.unrouted_collections.is_empty() {
        out.push_str(&format!(
            "unrouted collections: {}\n",
            plan.stats.unrouted_collections.join(", ")
        ));
    }
    out
}

fn skip_breakdown(skipped: &SkipCounts) -> String {
    let parts: Vec<String> = [
        (skipped.missing_mode_value, "missing mode value"),
        (skipped.dangling_alias, "dangling alias"),
        (skipped.cyclic_alias, "cyclic alias"),
        (skipped.unsupported_value, "unsupported value"),
    ]
    .iter()
    .filter(|(n, _)| *n > 0)
    .map(|(n, label)| format!("{} {}", n, label))
    .collect();

    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}
