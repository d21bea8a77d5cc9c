use anyhow::Result;
use clap::Parser;
use tracing::error;

use icp_lookup::runner::print_run_summary;
use icp_lookup::utils::{missing_credentials, setup_logging};
use icp_lookup::{run, Args};

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);

    if let Some(usage) = missing_credentials(&args) {
        println!("{}", usage);
        return Ok(());
    }

    match run(&args) {
        Ok((output, stats)) => {
            print_run_summary(&output, &stats);
            Ok(())
        }
        Err(e) => {
            error!(error = ?e, "ICP lookup run failed");
            std::process::exit(1);
        }
    }
}
