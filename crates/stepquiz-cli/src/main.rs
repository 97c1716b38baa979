use clap::Parser;
use cli::opt;

mod cli;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let opt = opt::Cli::parse();
    cli::exec(opt.command).await
}
