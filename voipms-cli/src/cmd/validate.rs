use std::path::Path;

use serde::Serialize;
use voipms_core::{validate_items, InvocationItem, NodeDescription, Violation};

use crate::exit_codes;
use crate::output::{print_result, OutputFormat};
use crate::OutputArgs;

use super::config::load_items;

#[derive(Serialize)]
struct ValidateResult {
    valid: bool,
    items: usize,
    format: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<String>,
}

pub async fn validate_cmd(path: &Path, output: OutputArgs) -> i32 {
    let parsed = match load_items(path, &output) {
        Ok(p) => p,
        Err(code) => return code,
    };

    let errors = match check(&parsed.items) {
        Ok(()) => vec![],
        Err(violations) => violations.iter().map(ToString::to_string).collect(),
    };
    let result = ValidateResult {
        valid: errors.is_empty(),
        items: parsed.items.len(),
        format: format!("{:?}", parsed.format),
        errors,
    };

    if output.format == OutputFormat::Text && !output.quiet {
        if result.valid {
            println!("ok: {} valid item(s) ({})", result.items, result.format);
        } else {
            eprintln!("error: validation failed");
            for e in &result.errors {
                eprintln!("- {e}");
            }
        }
    } else {
        print_result(output.format, output.quiet, &result);
    }

    if result.valid {
        exit_codes::SUCCESS
    } else {
        exit_codes::VALIDATION_FAILED
    }
}

fn check(items: &[InvocationItem]) -> Result<(), Vec<Violation>> {
    validate_items(&NodeDescription::voipms(), items).map_err(|e| e.violations)
}

/// Pre-flight used before a run. Prints the violations and returns the exit
/// code when the batch would be rejected.
pub fn preflight(items: &[InvocationItem], output: &OutputArgs) -> Result<(), i32> {
    let Err(violations) = check(items) else {
        return Ok(());
    };
    if !output.quiet {
        match output.format {
            OutputFormat::Text => {
                eprintln!("error: validation failed");
                for v in &violations {
                    eprintln!("- {v}");
                }
            }
            OutputFormat::Json => {
                let body = serde_json::json!({ "error": "validation failed", "violations": violations });
                eprintln!("{}", serde_json::to_string(&body).unwrap_or_default());
            }
        }
    }
    Err(exit_codes::VALIDATION_FAILED)
}
