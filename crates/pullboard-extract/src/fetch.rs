use std::time::Duration;

use tracing::{info, warn};

use pullboard_types::models::Item;

use crate::Source;
use crate::document::extract_html;
use crate::error::ExtractError;

pub const DEFAULT_PRIMARY_URL: &str =
    "https://xn--bck3aza1a2if6kra4ee0hf.gamewith.jp/article/show/74390";
pub const DEFAULT_SECONDARY_URL: &str =
    "https://xn--bck3aza1a2if6kra4ee0hf.gamewith.jp/article/show/21495";

const USER_AGENT: &str = concat!("pullboard/", env!("CARGO_PKG_VERSION"));

/// Where each source table is published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUrls {
    pub primary: String,
    pub secondary: String,
}

impl SourceUrls {
    pub fn url(&self, source: Source) -> &str {
        match source {
            Source::Primary => &self.primary,
            Source::Secondary => &self.secondary,
        }
    }
}

impl Default for SourceUrls {
    fn default() -> Self {
        Self {
            primary: DEFAULT_PRIMARY_URL.into(),
            secondary: DEFAULT_SECONDARY_URL.into(),
        }
    }
}

/// Both tables, extracted and concatenated, ready for a catalog refresh.
#[derive(Debug, Clone, Default)]
pub struct FetchedCatalog {
    pub items: Vec<Item>,
    pub primary: usize,
    pub secondary: usize,
}

pub fn build_client(timeout: Duration) -> Result<reqwest::Client, ExtractError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(ExtractError::Client)
}

/// GET a page body. Any non-2xx status is a fetch failure; there are no retries.
pub async fn fetch_document(client: &reqwest::Client, url: &str) -> Result<String, ExtractError> {
    let response = client.get(url).send().await.map_err(|source| ExtractError::Http {
        url: url.to_string(),
        source,
    })?;

    let status = response.status();
    if !status.is_success() {
        warn!(url, %status, "source page fetch rejected");
        return Err(ExtractError::Fetch {
            url: url.to_string(),
            status,
        });
    }

    response.text().await.map_err(|source| ExtractError::Http {
        url: url.to_string(),
        source,
    })
}

/// Fetch and extract both tables. Fails as a unit: a caller only ever sees
/// a complete batch or an error.
pub async fn fetch_catalog(
    client: &reqwest::Client,
    urls: &SourceUrls,
) -> Result<FetchedCatalog, ExtractError> {
    let mut catalog = FetchedCatalog::default();

    for source in Source::ALL {
        let url = urls.url(source);
        let body = fetch_document(client, url).await?;
        let items = extract_html(&body, source).map_err(|err| ExtractError::Parse {
            url: url.to_string(),
            source: err,
        })?;

        info!(%source, url, count = items.len(), "source table extracted");
        match source {
            Source::Primary => catalog.primary = items.len(),
            Source::Secondary => catalog.secondary = items.len(),
        }
        catalog.items.extend(items);
    }

    Ok(catalog)
}
