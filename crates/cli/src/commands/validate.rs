use std::path::Path;
use std::process;

use serde_json::Value;
use tokenbake_core::read_json;
use tokenbake_core::source::FileSystemProvider;

use super::report_build_error;
use crate::{report_error, OutputFormat};

static EXPORT_SCHEMA_STR: &str = include_str!("../../../../docs/variables-export-schema.json");

/// Schema violations in `doc`, one message per violation.
fn schema_violations(doc: &Value) -> Result<Vec<String>, String> {
    let schema: Value = serde_json::from_str(EXPORT_SCHEMA_STR)
        .map_err(|e| format!("internal error: embedded export schema is not JSON: {}", e))?;
    let validator = jsonschema::validator_for(&schema)
        .map_err(|e| format!("internal error: export schema does not compile: {}", e))?;
    Ok(validator.iter_errors(doc).map(|e| e.to_string()).collect())
}

pub(crate) fn cmd_validate(input: &Path, output: OutputFormat, quiet: bool) {
    let doc = match read_json(input, &FileSystemProvider) {
        Ok(v) => v,
        Err(e) => {
            report_build_error(&e, output, quiet);
            process::exit(1);
        }
    };

    let violations = match schema_violations(&doc) {
        Ok(v) => v,
        Err(msg) => {
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    if violations.is_empty() {
        if !quiet {
            match output {
                OutputFormat::Text => println!("valid"),
                OutputFormat::Json => println!("{}", serde_json::json!({ "valid": true })),
            }
        }
        return;
    }

    match output {
        OutputFormat::Text if !quiet => {
            eprintln!("invalid export: {} violation(s)", violations.len());
            for v in &violations {
                eprintln!("  - {}", v);
            }
        }
        OutputFormat::Text => {}
        OutputFormat::Json => {
            let json = serde_json::json!({ "valid": false, "errors": violations });
            eprintln!("{}", serde_json::to_string_pretty(&json).unwrap_or_default());
        }
    }
    process::exit(1);
}
