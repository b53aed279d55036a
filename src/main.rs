mod cli;

use std::process::ExitCode;

use clap::Parser;

use cli::{Cli, handle_command};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    adprobe::telemetry::init();
    let cli = Cli::parse();
    handle_command(cli.command).await
}
