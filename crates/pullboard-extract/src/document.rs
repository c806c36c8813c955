use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use pullboard_types::models::Item;

use crate::Source;
use crate::attributes::{item_id_from_url, parse_tokens};
use crate::error::ParseError;

/// Class tokens marking a row as part of the catalog.
const ROW_MARKERS: [&str; 3] = ["ca1", "get1", "get2"];

/// Lazy-load attribute carrying the real image url.
const IMAGE_URL_ATTR: &str = "data-original";

/// Custom row attribute holding the display name.
const NAME_ATTR: &str = "data-col1";

static PRIMARY_CONTAINER: LazyLock<Selector> =
    LazyLock::new(|| parse_selector(Source::Primary.container_selector()));
static SECONDARY_CONTAINER: LazyLock<Selector> =
    LazyLock::new(|| parse_selector(Source::Secondary.container_selector()));
static ROW: LazyLock<Selector> = LazyLock::new(|| parse_selector("tr"));
static IMAGE: LazyLock<Selector> = LazyLock::new(|| parse_selector("img"));

fn parse_selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector is valid")
}

fn container_for(source: Source) -> &'static Selector {
    match source {
        Source::Primary => &PRIMARY_CONTAINER,
        Source::Secondary => &SECONDARY_CONTAINER,
    }
}

fn is_catalog_row(row: &ElementRef<'_>) -> bool {
    row.value().classes().any(|class| ROW_MARKERS.contains(&class))
}

/// Extract every catalog row of `source`'s table from a parsed page.
///
/// All-or-nothing: the first malformed row aborts the document.
pub fn extract(document: &Html, source: Source) -> Result<Vec<Item>, ParseError> {
    let container = document
        .select(container_for(source))
        .next()
        .ok_or(ParseError::MissingContainer {
            table: source,
            selector: source.container_selector(),
        })?;

    let rows: Vec<ElementRef<'_>> = container.select(&ROW).filter(is_catalog_row).collect();
    if rows.is_empty() {
        return Err(ParseError::NoRows(source));
    }

    let category = source.category();
    let mut items = Vec::with_capacity(rows.len());

    for (idx, row) in rows.iter().enumerate() {
        let image = row
            .select(&IMAGE)
            .next()
            .ok_or(ParseError::MissingImage { row: idx })?;
        let image_url = image
            .value()
            .attr(IMAGE_URL_ATTR)
            .ok_or(ParseError::MissingImageUrl { row: idx })?;
        let id = item_id_from_url(image_url).ok_or_else(|| ParseError::BadImageUrl {
            row: idx,
            url: image_url.to_string(),
        })?;

        items.push(Item {
            id: id.to_string(),
            image_url: image_url.to_string(),
            display_name: row.value().attr(NAME_ATTR).map(str::to_string),
            category,
            attributes: parse_tokens(row.value().classes()),
        });
    }

    debug!(%source, rows = items.len(), "extracted table");
    Ok(items)
}

/// Parse raw markup and extract it. The parsed tree never outlives the call.
pub fn extract_html(html: &str, source: Source) -> Result<Vec<Item>, ParseError> {
    let document = Html::parse_document(html);
    extract(&document, source)
}
