use std::path::Path;

use apigw_core::Validate;
use serde::Serialize;

use crate::exit_codes;
use crate::output::{print_result, OutputFormat};
use crate::OutputArgs;

use super::config::load_project;

#[derive(Serialize)]
struct ValidateResult {
    valid: bool,
    name: String,
    format: String,
    endpoints: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<String>,
}

pub async fn validate_cmd(path: &Path, output: OutputArgs) -> i32 {
    let parsed = match load_project(path, &output) {
        Ok(p) => p,
        Err(code) => return code,
    };
    let project = &parsed.project;

    let errors: Vec<String> = match project.validate() {
        Ok(()) => Vec::new(),
        Err(err) => err.violations.iter().map(|v| v.to_string()).collect(),
    };
    let result = ValidateResult {
        valid: errors.is_empty(),
        name: project.name.clone(),
        format: format!("{:?}", parsed.format),
        endpoints: project.endpoints().len(),
        errors,
    };

    if output.format == OutputFormat::Text && !output.quiet {
        if result.valid {
            println!(
                "ok: valid project {} ({} endpoints, {:?})",
                result.name, result.endpoints, parsed.format
            );
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
