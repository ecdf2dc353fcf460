use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use apigw_core::{parse_project_str, DocumentFormat, ParsedProject};
use apigw_exec::executor::{EventSink, NoOpEventSink, StdoutEventSink, TracingEventSink};
use apigw_exec::retry::RetryConfig;
use apigw_exec::{BatchConfig, EngineConfig};

use crate::exit_codes;
use crate::output::print_error;
use crate::{ConcurrencyArgs, EventsMode, OutputArgs, RetryArgs};

/// Read and parse a project document. On failure the error is printed and the exit code
/// to use is returned.
pub fn load_project(path: &Path, output: &OutputArgs) -> Result<ParsedProject, i32> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        print_error(
            output.format,
            output.quiet,
            &format!("failed to read {}: {e}", path.display()),
        );
        exit_codes::RUNTIME_ERROR
    })?;

    parse_project_str(&content, DocumentFormat::Auto).map_err(|e| {
        print_error(output.format, output.quiet, &e.to_string());
        exit_codes::VALIDATION_FAILED
    })
}

#[cfg_attr(not(feature = "aws"), allow(dead_code))]
pub fn build_engine_config(retry: &RetryArgs, alias: Option<&str>) -> EngineConfig {
    let defaults = RetryConfig::default();
    EngineConfig {
        retry: RetryConfig {
            max_attempts: retry.retry_max_attempts.unwrap_or(defaults.max_attempts),
            max_delay: retry
                .retry_max_delay
                .map(Duration::from_millis)
                .unwrap_or(defaults.max_delay),
            ..defaults
        },
        alias_override: alias.map(String::from),
    }
}

pub fn build_batch_config(concurrency: &ConcurrencyArgs) -> BatchConfig {
    BatchConfig {
        concurrency: concurrency.max_concurrency.max(1),
    }
}

#[cfg_attr(not(feature = "aws"), allow(dead_code))]
pub fn build_event_sink(mode: EventsMode) -> Arc<dyn EventSink> {
    match mode {
        EventsMode::Stdout => Arc::new(StdoutEventSink),
        EventsMode::Tracing => Arc::new(TracingEventSink),
        EventsMode::None => Arc::new(NoOpEventSink),
    }
}

pub fn resolve_region(region_arg: Option<String>) -> Option<String> {
    region_arg
        .or_else(|| std::env::var("AWS_REGION").ok())
        .or_else(|| std::env::var("AWS_DEFAULT_REGION").ok())
        .filter(|r| !r.trim().is_empty())
}

pub fn require_region(region_arg: Option<String>, output: &OutputArgs) -> Option<String> {
    let region = resolve_region(region_arg);
    if region.is_none() {
        print_error(
            output.format,
            output.quiet,
            "missing region. Set --region, AWS_REGION, or AWS_DEFAULT_REGION",
        );
    }
    region
}
