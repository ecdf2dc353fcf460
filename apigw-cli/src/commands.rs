use std::path::PathBuf;

use clap::Subcommand;

use crate::args::*;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse and validate a project document.
    Validate {
        path: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// List the endpoints of a project without contacting AWS.
    Endpoints {
        path: PathBuf,
        #[command(flatten)]
        target: TargetArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Build endpoints on API Gateway for one stage and region.
    Deploy {
        path: PathBuf,
        /// Only these endpoints (`function@path~METHOD`); all when omitted.
        #[arg(long = "endpoint", value_name = "ADDRESS")]
        endpoints: Vec<String>,
        /// Lambda alias to bake into integrations instead of the stage variable.
        #[arg(long)]
        alias: Option<String>,
        #[arg(long, value_enum, default_value_t = EventsMode::Tracing)]
        events: EventsMode,
        #[command(flatten)]
        target: TargetArgs,
        #[command(flatten)]
        output: OutputArgs,
        #[command(flatten)]
        retry: RetryArgs,
        #[command(flatten)]
        concurrency: ConcurrencyArgs,
        #[command(flatten)]
        aws: AwsArgs,
    },
}
