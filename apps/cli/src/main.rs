//! javadocset CLI: build Dash/Zeal docsets from generated Javadoc.
//!
//! Copies the Javadoc tree into a `.docset` bundle, writes its `Info.plist`,
//! and indexes every symbol listed on the Javadoc index page.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
