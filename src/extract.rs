use scraper::{ElementRef, Html, Selector};
use std::time::{Duration, Instant};
use tracing::warn;

pub const ORGANIZATION_LABEL: &str = "主办单位名称";

/// Finds the `<td>` labelled 主办单位名称 and returns the trimmed text of the
/// first link in the cell that follows it.
///
/// A label cell without a following `<td>`, or a following cell without a
/// link, yields `None` the same as a page with no label at all.
pub fn extract_organization(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let cell_selector = Selector::parse("td").ok()?;
    let link_selector = Selector::parse("a").ok()?;

    let label = document
        .select(&cell_selector)
        .find(|cell| cell.text().collect::<String>() == ORGANIZATION_LABEL)?;

    let Some(value_cell) = next_sibling_cell(label) else {
        warn!(action = "extract", component = "result_extractor", "Label cell has no following cell");
        return None;
    };
    let Some(link) = value_cell.select(&link_selector).next() else {
        warn!(action = "extract", component = "result_extractor", "Value cell has no link");
        return None;
    };

    Some(link.text().collect::<String>().trim().to_string())
}

fn next_sibling_cell(cell: ElementRef<'_>) -> Option<ElementRef<'_>> {
    cell.next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|sibling| sibling.value().name() == "td")
}

/// Runs [`extract_organization`] and reports how long parsing and lookup took.
pub fn extract_timed(html: &str) -> (Option<String>, Duration) {
    let start_time = Instant::now();
    let organization = extract_organization(html);
    (organization, start_time.elapsed())
}
