use clap::Args;

use crate::output::OutputFormat;

#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Args, Clone)]
pub struct TargetArgs {
    #[arg(long)]
    pub stage: Option<String>,
    /// Falls back to AWS_REGION, then AWS_DEFAULT_REGION.
    #[arg(long)]
    pub region: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct ConcurrencyArgs {
    #[arg(long, default_value_t = 4)]
    pub max_concurrency: usize,
}

#[derive(Debug, Args, Clone)]
pub struct RetryArgs {
    #[arg(long)]
    pub retry_max_attempts: Option<usize>,
    /// Milliseconds.
    #[arg(long)]
    pub retry_max_delay: Option<u64>,
}

#[derive(Debug, Args, Clone)]
pub struct AwsArgs {
    /// Named profile from the shared AWS config files.
    #[arg(long)]
    pub profile: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum EventsMode {
    Stdout,
    Tracing,
    None,
}
