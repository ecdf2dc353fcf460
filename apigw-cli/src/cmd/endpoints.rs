use std::path::Path;

use apigw_core::naming::{
    account_number_from_role_arn, lambda_integration_uri, statement_id, STAGE_VARIABLE_ALIAS,
};
use apigw_exec::{ProjectStateProvider, StateProvider};
use serde::Serialize;

use crate::exit_codes;
use crate::output::{print_error, print_result, OutputFormat};
use crate::{OutputArgs, TargetArgs};

use super::config::{load_project, resolve_region};

#[derive(Serialize)]
struct EndpointEntry {
    address: String,
    function: String,
    deployed_name: Option<String>,
    method: String,
    path: String,
    statement_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    rest_api: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    integration_uri: Option<String>,
}

pub async fn endpoints_cmd(path: &Path, target: TargetArgs, output: OutputArgs) -> i32 {
    let parsed = match load_project(path, &output) {
        Ok(p) => p,
        Err(code) => return code,
    };
    let state = ProjectStateProvider::new(parsed.project);

    let region = resolve_region(target.region);
    let stage_region = match (target.stage.as_deref(), region.as_deref()) {
        (Some(stage), Some(region)) => Some((stage, region)),
        (Some(_), None) => {
            print_error(
                output.format,
                output.quiet,
                "--stage needs a region. Set --region, AWS_REGION, or AWS_DEFAULT_REGION",
            );
            return exit_codes::VALIDATION_FAILED;
        }
        _ => None,
    };

    let account = stage_region
        .and_then(|(stage, region)| state.iam_role_arn(stage, region))
        .and_then(|arn| account_number_from_role_arn(&arn).ok());

    let entries: Vec<EndpointEntry> = state
        .endpoints_by_path()
        .into_iter()
        .map(|(address, _)| {
            let deployed_name = state.deployed_function(&address.function);
            let integration_uri = match (stage_region, &account, &deployed_name) {
                (Some((_, region)), Some(account), Some(name)) => Some(lambda_integration_uri(
                    region,
                    account,
                    name,
                    STAGE_VARIABLE_ALIAS,
                )),
                _ => None,
            };
            EndpointEntry {
                address: address.to_string(),
                statement_id: statement_id(&address.path, &address.method),
                rest_api: stage_region
                    .and_then(|(stage, region)| state.rest_api_name(stage, region)),
                function: address.function,
                deployed_name,
                method: address.method,
                path: address.path,
                integration_uri,
            }
        })
        .collect();

    if output.format == OutputFormat::Text && !output.quiet {
        for e in &entries {
            println!("{}\t{}", e.address, e.statement_id);
            if let Some(uri) = &e.integration_uri {
                println!("  -> {uri}");
            }
        }
    } else {
        print_result(output.format, output.quiet, &entries);
    }
    exit_codes::SUCCESS
}
