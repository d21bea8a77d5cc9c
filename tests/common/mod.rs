#![allow(dead_code)]

use icp_lookup::{FetchError, FetchedPage, PageFetcher, ReportRow};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A lookup result page with the organization row filled in.
pub fn organization_page(name: &str) -> String {
    format!(
        r#"<html><body><table class="Tb">
<tr><td>网站名称</td><td>示例网站</td></tr>
<tr><td>主办单位名称</td><td><a href="/company">{}</a></td></tr>
<tr><td>主办单位性质</td><td>企业</td></tr>
</table></body></html>"#,
        name
    )
}

pub const NO_RECORD_PAGE: &str = "<html><body><p>暂无备案信息</p></body></html>";

/// Mounts a 200 HTML response for `/{token}`.
pub async fn mount_page(server: &MockServer, token: &str, html: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/{}", token)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html.to_string())
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

pub async fn mount_status(server: &MockServer, token: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(format!("/{}", token)))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

pub async fn mount_delayed(server: &MockServer, token: &str, delay: Duration) {
    Mock::given(method("GET"))
        .and(path(format!("/{}", token)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(organization_page("Too Late Ltd"))
                .set_delay(delay),
        )
        .mount(server)
        .await;
}

/// Serves canned bodies by token with a fixed elapsed time; unknown tokens time out.
pub struct CannedFetcher {
    pages: HashMap<String, String>,
}

impl CannedFetcher {
    pub fn new(pages: &[(&str, String)]) -> Self {
        Self {
            pages: pages
                .iter()
                .map(|(token, body)| (token.to_string(), body.clone()))
                .collect(),
        }
    }
}

impl PageFetcher for CannedFetcher {
    fn fetch(&self, token: &str) -> Result<FetchedPage, FetchError> {
        match self.pages.get(token) {
            Some(body) => Ok(FetchedPage {
                body: body.clone(),
                elapsed: Duration::from_millis(420),
            }),
            None => Err(FetchError::Timeout),
        }
    }
}

/// Reads a report back, checking the BOM and the header.
pub fn read_report(path: &Path) -> Vec<ReportRow> {
    let bytes = std::fs::read(path).unwrap();
    assert!(bytes.starts_with(b"\xEF\xBB\xBF"), "report must start with a UTF-8 BOM");

    let mut reader = csv::Reader::from_reader(&bytes[3..]);
    let header: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(header, icp_lookup::report::HEADER);

    reader
        .records()
        .map(|record| {
            let record = record.unwrap();
            assert_eq!(record.len(), 4);
            record.deserialize(None).unwrap()
        })
        .collect()
}
