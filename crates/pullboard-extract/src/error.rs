use crate::Source;

/// A page did not have the shape the extractor expects. Aborts the whole
/// document; nothing from it reaches the catalog.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("no `{selector}` container for the {table} table")]
    MissingContainer { table: Source, selector: &'static str },

    #[error("the {0} table has no catalog rows")]
    NoRows(Source),

    #[error("row {row} has no image element")]
    MissingImage { row: usize },

    #[error("row {row} image has no lazy-load url")]
    MissingImageUrl { row: usize },

    #[error("row {row}: image url '{url}' does not end in a .jpg filename")]
    BadImageUrl { row: usize, url: String },
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("GET {url} returned {status}")]
    Fetch { url: String, status: reqwest::StatusCode },

    #[error("GET {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("could not extract {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: ParseError,
    },
}
