use clap::Parser;

mod args;
mod cmd;
mod commands;
mod exit_codes;
mod observability;
mod output;

pub use args::*;
use commands::Command;

#[derive(Debug, Parser)]
#[command(
    name = "apigw",
    version,
    about = "Deploy API Gateway endpoints backed by Lambda functions"
)]
struct Cli {
    /// Log filter used when RUST_LOG is not set.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    observability::init_tracing(&cli.log_level);

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("error: failed to create tokio runtime: {e}");
            std::process::exit(exit_codes::RUNTIME_ERROR);
        }
    };

    let exit_code = rt.block_on(run_command(cli.command));
    std::process::exit(exit_code);
}

async fn run_command(command: Command) -> i32 {
    match command {
        Command::Validate { path, output } => cmd::validate::validate_cmd(&path, output).await,
        Command::Endpoints {
            path,
            target,
            output,
        } => cmd::endpoints::endpoints_cmd(&path, target, output).await,
        Command::Deploy {
            path,
            endpoints,
            alias,
            events,
            target,
            output,
            retry,
            concurrency,
            aws,
        } => {
            cmd::deploy::deploy_cmd(
                &path,
                &endpoints,
                alias.as_deref(),
                events,
                target,
                output,
                retry,
                concurrency,
                aws,
            )
            .await
        }
    }
}
