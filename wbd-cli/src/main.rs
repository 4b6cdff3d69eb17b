//! WBD CLI - prints the indicator catalog, raw observations and every
//! derived chart table for the ASEAN states to stdout.

use clap::Parser;
use log::debug;

#[derive(Parser)]
#[command(
    name = "wbd-cli",
    version,
    about = "ASEAN World Bank indicator toolkit"
)]
struct Cli {
    #[command(flatten)]
    global: wbd_cmd::GlobalArgs,

    #[command(subcommand)]
    command: wbd_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    debug!("{:?}", cli.command);
    wbd_cmd::run(cli.global, cli.command).await
}
