use std::path::Path;

use apigw_core::{EndpointAddress, Validate};
use apigw_exec::executor::{DeployError, EndpointSelection};
use apigw_exec::{BatchDeployer, DeployReport, EndpointBuilder, ProjectStateProvider};

use crate::exit_codes;
use crate::output::{print_error, print_result, OutputFormat};
use crate::{AwsArgs, ConcurrencyArgs, EventsMode, OutputArgs, RetryArgs, TargetArgs};

use super::config::{build_batch_config, load_project, require_region};

#[allow(clippy::too_many_arguments)]
pub async fn deploy_cmd(
    path: &Path,
    endpoints: &[String],
    alias: Option<&str>,
    events: EventsMode,
    target: TargetArgs,
    output: OutputArgs,
    retry: RetryArgs,
    concurrency: ConcurrencyArgs,
    aws: AwsArgs,
) -> i32 {
    let parsed = match load_project(path, &output) {
        Ok(p) => p,
        Err(code) => return code,
    };
    if let Err(err) = parsed.project.validate() {
        print_error(output.format, output.quiet, &err.to_string());
        if output.format == OutputFormat::Text && !output.quiet {
            for v in &err.violations {
                eprintln!("- {v}");
            }
        }
        return exit_codes::VALIDATION_FAILED;
    }

    let Some(stage) = target.stage else {
        print_error(output.format, output.quiet, "missing --stage");
        return exit_codes::VALIDATION_FAILED;
    };
    let Some(region) = require_region(target.region, &output) else {
        return exit_codes::VALIDATION_FAILED;
    };

    let selection = if endpoints.is_empty() {
        EndpointSelection::All
    } else {
        let mut addresses = Vec::with_capacity(endpoints.len());
        for raw in endpoints {
            match EndpointAddress::parse(raw) {
                Ok(a) => addresses.push(a),
                Err(e) => {
                    print_error(output.format, output.quiet, &e.to_string());
                    return exit_codes::VALIDATION_FAILED;
                }
            }
        }
        EndpointSelection::Only(addresses)
    };

    let builder = match build_endpoint_builder(&region, &aws, &retry, alias, events).await {
        Ok(b) => b,
        Err(message) => {
            print_error(output.format, output.quiet, &message);
            return exit_codes::RUNTIME_ERROR;
        }
    };
    let deployer = BatchDeployer::new(builder, build_batch_config(&concurrency));
    let state = ProjectStateProvider::new(parsed.project);

    let report = match deployer.deploy(&state, &stage, &region, &selection).await {
        Ok(r) => r,
        Err(e @ (DeployError::EndpointNotFound(_) | DeployError::FunctionNotFound(_))) => {
            print_error(output.format, output.quiet, &e.to_string());
            return exit_codes::VALIDATION_FAILED;
        }
    };

    print_report(&output, &report);
    if report.is_success() {
        exit_codes::SUCCESS
    } else {
        exit_codes::RUN_FAILED
    }
}

fn print_report(output: &OutputArgs, report: &DeployReport) {
    if output.format == OutputFormat::Text && !output.quiet {
        for d in &report.deployed {
            println!("deployed {}: {}", d.endpoint, d.url);
        }
        for f in &report.failed {
            match f.step {
                Some(step) => eprintln!("failed {} at {step}: {}", f.endpoint, f.error),
                None => eprintln!("failed {}: {}", f.endpoint, f.error),
            }
        }
    } else {
        print_result(output.format, output.quiet, report);
    }
}

#[cfg(feature = "aws")]
async fn build_endpoint_builder(
    region: &str,
    aws: &AwsArgs,
    retry: &RetryArgs,
    alias: Option<&str>,
    events: EventsMode,
) -> Result<EndpointBuilder, String> {
    use std::sync::Arc;

    use apigw_exec::aws::{load_sdk_config, AwsApiGateway, AwsLambda};

    use super::config::{build_engine_config, build_event_sink};

    let sdk_config = load_sdk_config(Some(region), aws.profile.as_deref()).await;
    Ok(EndpointBuilder::new(
        Arc::new(AwsApiGateway::from_conf(&sdk_config)),
        Arc::new(AwsLambda::from_conf(&sdk_config)),
        build_event_sink(events),
        build_engine_config(retry, alias),
    ))
}

#[cfg(not(feature = "aws"))]
async fn build_endpoint_builder(
    _region: &str,
    _aws: &AwsArgs,
    _retry: &RetryArgs,
    _alias: Option<&str>,
    _events: EventsMode,
) -> Result<EndpointBuilder, String> {
    Err("this build has no AWS support; rebuild with the `aws` feature".to_string())
}
