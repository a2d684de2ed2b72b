use clap::Parser;
use image_labeler_lambda::Settings;
use lambda_runtime::Error;
use std::path::PathBuf;

mod cli;

/// Labels images uploaded to S3 and records the labels in DynamoDB.
#[derive(Debug, Parser)]
#[clap(name = env!("CARGO_PKG_NAME"), version, about)]
struct Cli {
    /// Optional settings file
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,
    #[clap(subcommand)]
    cmd: Option<Cmd>,
}

#[derive(Debug, clap::Subcommand)]
enum Cmd {
    /// Run as the Lambda function (default)
    Serve(cli::serve::Cmd),
    /// Handle a notification read from a file
    Local(cli::local::Cmd),
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let cli = Cli::parse();
    let settings = Settings::new(cli.config.as_ref())?;
    cli::init_tracing(&settings);

    match cli.cmd {
        Some(Cmd::Local(cmd)) => cmd.run(&settings).await,
        Some(Cmd::Serve(cmd)) => cmd.run(&settings).await,
        None => cli::serve::Cmd::default().run(&settings).await,
    }
}
