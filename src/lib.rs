pub mod args;
pub mod domain;
pub mod extract;
pub mod lookup;
pub mod report;
pub mod runner;
pub mod stats;
pub mod utils;

pub use args::Args;
pub use lookup::{FetchError, FetchedPage, LookupClient, LookupConfig, PageFetcher};
pub use report::{ReportRow, ReportWriter};
pub use runner::{run, run_lookups};
pub use stats::{LookupOutcome, RunStats};
