use clap::Parser;
use color_eyre::Result;
use segment_creator::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    segment_creator::run(args).await
}
