use anyhow::Result;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::domain::{is_ip_address, load_tokens};
use crate::extract::extract_timed;
use crate::lookup::{LookupClient, LookupConfig, PageFetcher};
use crate::report::{ReportRow, ReportWriter};
use crate::stats::{LookupOutcome, RunStats};
use crate::Args;

/// Runs one token through filter, fetch and extraction.
pub fn lookup_token<F: PageFetcher>(fetcher: &F, token: &str) -> LookupOutcome {
    if is_ip_address(token) {
        return LookupOutcome::SkippedIp;
    }

    let page = match fetcher.fetch(token) {
        Ok(page) => page,
        Err(e) => {
            warn!(action = "fetch", component = "lookup", token = token, error = %e, "Lookup request failed");
            return e.into();
        }
    };
    let http_seconds = page.elapsed.as_secs_f64();

    match extract_timed(&page.body) {
        (Some(organization), parse_time) => LookupOutcome::Success {
            organization,
            http_seconds,
            parse_seconds: parse_time.as_secs_f64(),
        },
        (None, _) => LookupOutcome::NotFound { http_seconds },
    }
}

/// One-line console message for an outcome.
pub fn status_line(token: &str, outcome: &LookupOutcome) -> String {
    match outcome {
        LookupOutcome::Success {
            organization,
            http_seconds,
            parse_seconds,
        } => format!(
            "{} - 主办单位名称: {} (HTTP响应时间: {:.2}秒 | 解析时间: {:.2}秒)",
            token, organization, http_seconds, parse_seconds
        ),
        LookupOutcome::NotFound { .. } => format!("{} - 未找到主办单位名称信息", token),
        LookupOutcome::Timeout => format!("{} - 请求超时，已放弃", token),
        LookupOutcome::RequestFailed { detail } => format!("{} - 请求失败: {}", token, detail),
        LookupOutcome::SkippedIp => format!("{} - 检测到IP地址，跳过", token),
    }
}

/// Looks up every token in order, writing each row as soon as it is known.
/// Per-token failures become rows; only report I/O errors abort the run.
pub fn run_lookups<F: PageFetcher>(
    fetcher: &F,
    tokens: &[String],
    report: &mut ReportWriter,
) -> Result<RunStats> {
    let start_time = Instant::now();
    let mut stats = RunStats::default();

    for (index, token) in tokens.iter().enumerate() {
        let outcome = lookup_token(fetcher, token);
        debug!(action = "lookup", component = "runner", index = index, token = %token, outcome = ?outcome, "Token processed");

        println!("{}", status_line(token, &outcome));
        if let Some(row) = ReportRow::from_outcome(token, &outcome) {
            report.write_row(&row)?;
        }
        stats.record(&outcome);
    }

    stats.elapsed = start_time.elapsed();
    Ok(stats)
}

/// Full run: load the token list, open the report, look everything up.
pub fn run(args: &Args) -> Result<(PathBuf, RunStats)> {
    let total_start_time = Instant::now();
    info!(action = "start", component = "runner", "Starting ICP lookups");

    let tokens = load_tokens(&args.file)?;
    let config = LookupConfig::new(&args.user_agent, &args.cookie)?;
    let client = LookupClient::new(&config)?;

    let mut report = ReportWriter::create(&args.output)?;
    let stats = run_lookups(&client, &tokens, &mut report)?;
    let output = report.finish()?;

    info!(
        action = "complete",
        component = "runner",
        rows = stats.rows(),
        skipped = stats.skipped,
        duration_ms = total_start_time.elapsed().as_millis(),
        "ICP lookups finished"
    );
    Ok((output, stats))
}

pub fn print_run_summary(output: &std::path::Path, stats: &RunStats) {
    println!("结果已导出至 {}", output.display());
    println!(
        "{} rows written ({} found, {} not found, {} timed out, {} failed), {} IP addresses skipped in {:.1}s",
        stats.rows(),
        stats.found,
        stats.not_found,
        stats.timed_out,
        stats.failed,
        stats.skipped,
        stats.elapsed.as_secs_f64()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::{FetchError, FetchedPage};
    use std::time::Duration;

    struct StaticFetcher(&'static str);

    impl PageFetcher for StaticFetcher {
        fn fetch(&self, _token: &str) -> Result<FetchedPage, FetchError> {
            Ok(FetchedPage {
                body: self.0.to_string(),
                elapsed: Duration::from_millis(1500),
            })
        }
    }

    struct TimeoutFetcher;

    impl PageFetcher for TimeoutFetcher {
        fn fetch(&self, _token: &str) -> Result<FetchedPage, FetchError> {
            Err(FetchError::Timeout)
        }
    }

    #[test]
    fn ip_tokens_never_reach_the_fetcher() {
        struct PanicFetcher;
        impl PageFetcher for PanicFetcher {
            fn fetch(&self, token: &str) -> Result<FetchedPage, FetchError> {
                panic!("unexpected fetch for {}", token);
            }
        }
        assert_eq!(lookup_token(&PanicFetcher, "8.8.8.8"), LookupOutcome::SkippedIp);
    }

    #[test]
    fn found_label_is_success() {
        let fetcher = StaticFetcher(
            "<table><tr><td>主办单位名称</td><td><a> Example Corp </a></td></tr></table>",
        );
        match lookup_token(&fetcher, "example.com") {
            LookupOutcome::Success {
                organization,
                http_seconds,
                ..
            } => {
                assert_eq!(organization, "Example Corp");
                assert_eq!(http_seconds, 1.5);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn missing_label_keeps_http_time() {
        let fetcher = StaticFetcher("<html><body>no record</body></html>");
        assert_eq!(
            lookup_token(&fetcher, "example.com"),
            LookupOutcome::NotFound { http_seconds: 1.5 }
        );
    }

    #[test]
    fn timeout_is_reported() {
        assert_eq!(lookup_token(&TimeoutFetcher, "slow.cn"), LookupOutcome::Timeout);
        assert_eq!(
            status_line("slow.cn", &LookupOutcome::Timeout),
            "slow.cn - 请求超时，已放弃"
        );
    }

    #[test]
    fn status_lines_name_the_token() {
        let success = LookupOutcome::Success {
            organization: "Example Corp".into(),
            http_seconds: 0.25,
            parse_seconds: 0.01,
        };
        assert_eq!(
            status_line("example.com", &success),
            "example.com - 主办单位名称: Example Corp (HTTP响应时间: 0.25秒 | 解析时间: 0.01秒)"
        );
        assert_eq!(
            status_line("1.1.1.1", &LookupOutcome::SkippedIp),
            "1.1.1.1 - 检测到IP地址，跳过"
        );
    }
}
