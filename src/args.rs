use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "icp-lookup",
    about = "Look up ICP registration owners for a list of domains on icp.chinaz.com",
    version,
    long_about = None
)]
pub struct Args {
    /// User-Agent header sent with every lookup
    #[arg(long)]
    pub user_agent: String,

    /// Session cookie sent with every lookup
    #[arg(long)]
    pub cookie: String,

    /// File with one domain or domain/path per line
    #[arg(long)]
    pub file: PathBuf,

    /// CSV file to write results to (overwritten)
    #[arg(long)]
    pub output: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
