use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://icp.chinaz.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/png,image/svg+xml,*/*;q=0.8";
const ACCEPT_LANGUAGE: &str = "zh-CN,zh;q=0.8,zh-TW;q=0.7,zh-HK;q=0.5,en-US;q=0.3,en;q=0.2";
const ACCEPT_ENCODING: &str = "gzip, deflate, br, zstd";

/// Settings shared by every lookup in a run. Built once, never mutated.
#[derive(Debug, Clone)]
pub struct LookupConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub headers: HeaderMap,
}

impl LookupConfig {
    pub fn new(user_agent: &str, cookie: &str) -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL, user_agent, cookie)
    }

    pub fn with_base_url(base_url: &str, user_agent: &str, cookie: &str) -> Result<Self> {
        let parsed = Url::parse(base_url).with_context(|| format!("Invalid base URL {}", base_url))?;
        let host = match (parsed.host_str(), parsed.port()) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            (Some(host), None) => host.to_string(),
            (None, _) => anyhow::bail!("Base URL {} has no host", base_url),
        };

        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, header_value(&host, "Host")?);
        headers.insert(header::USER_AGENT, header_value(user_agent, "User-Agent")?);
        headers.insert(header::ACCEPT, HeaderValue::from_static(ACCEPT));
        headers.insert(header::ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE));
        headers.insert(header::ACCEPT_ENCODING, HeaderValue::from_static(ACCEPT_ENCODING));
        headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
        headers.insert(header::COOKIE, header_value(cookie, "Cookie")?);
        headers.insert(header::UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
        for (name, value) in [
            ("sec-fetch-dest", "document"),
            ("sec-fetch-mode", "navigate"),
            ("sec-fetch-site", "none"),
            ("sec-fetch-user", "?1"),
            ("priority", "u=0, i"),
        ] {
            headers.insert(HeaderName::from_static(name), HeaderValue::from_static(value));
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
            headers,
        })
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn header_value(value: &str, name: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).with_context(|| format!("Invalid {} header value", name))
}

/// The token is appended verbatim, so slashes in it become path segments.
pub fn lookup_url(base_url: &str, token: &str) -> String {
    format!("{}/{}", base_url, token)
}

#[derive(Debug)]
pub struct FetchedPage {
    pub body: String,
    pub elapsed: Duration,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,
    #[error("HTTP status {0}")]
    Status(reqwest::StatusCode),
    #[error("{0}")]
    Transport(String),
}

pub trait PageFetcher {
    fn fetch(&self, token: &str) -> Result<FetchedPage, FetchError>;
}

pub struct LookupClient {
    client: Client,
    base_url: String,
}

impl LookupClient {
    pub fn new(config: &LookupConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(config.headers.clone())
            .build()
            .context("Failed to create HTTP client")?;

        info!(
            action = "init",
            component = "lookup_client",
            base_url = %config.base_url,
            timeout_ms = config.timeout.as_millis(),
            "HTTP client ready"
        );
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }
}

impl PageFetcher for LookupClient {
    fn fetch(&self, token: &str) -> Result<FetchedPage, FetchError> {
        let url = lookup_url(&self.base_url, token);
        debug!(action = "request", component = "lookup_client", url = %url, "Sending lookup request");

        let start_time = Instant::now();
        let response = self.client.get(&url).send().map_err(classify)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        let body = response.text().map_err(classify)?;
        let elapsed = start_time.elapsed();

        debug!(
            action = "response",
            component = "lookup_client",
            url = %url,
            status = status.as_u16(),
            body_bytes = body.len(),
            duration_ms = elapsed.as_millis(),
            "Lookup response received"
        );
        Ok(FetchedPage { body, elapsed })
    }
}

fn classify(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Transport(err.to_string())
    }
}
