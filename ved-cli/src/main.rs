//! VED CLI - Command line tool for the Valencia environmental dashboard
//! data toolkit.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "ved-cli",
    version,
    about = "Valencia environmental dashboard data toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: ved_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();
    let cli = Cli::parse();
    ved_cmd::run(cli.command).await
}
