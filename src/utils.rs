use time::macros::format_description;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::EnvFilter;

/// Logs go to stderr; stdout is reserved for per-domain status lines.
/// `RUST_LOG` takes precedence over `--verbose`.
pub fn setup_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let timer = LocalTime::new(format_description!(
        "[hour]:[minute]:[second].[subsecond digits:3]"
    ));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(timer)
        .with_writer(std::io::stderr)
        .init();
}

/// Returns the usage hint to show when a credential flag was passed empty.
pub fn missing_credentials(args: &crate::args::Args) -> Option<String> {
    if !args.user_agent.is_empty() && !args.cookie.is_empty() {
        return None;
    }

    Some(
        [
            "错误: 必须提供User-Agent和Cookie参数。",
            "使用示例:",
            "icp-lookup --user-agent \"your-user-agent\" --cookie \"your-cookie\" --file target.txt --output output.csv",
        ]
        .join("\n"),
    )
}
