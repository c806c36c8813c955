//! Catalog extraction from the upstream listing pages.
//!
//! The upstream site encodes item attributes as CSS class tokens on table
//! rows. Decoding those tokens is pure and lives in `attributes`; `document`
//! is the only module that knows the page layout.

pub mod attributes;
pub mod document;
pub mod error;
pub mod fetch;

use std::fmt;

pub use document::{extract, extract_html};
pub use error::{ExtractError, ParseError};
pub use fetch::{FetchedCatalog, SourceUrls, build_client, fetch_catalog, fetch_document};

use pullboard_types::models::{CATEGORY_PRIMARY, CATEGORY_SECONDARY};

/// The two upstream tables items are scraped from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    Primary,
    Secondary,
}

impl Source {
    pub const ALL: [Source; 2] = [Source::Primary, Source::Secondary];

    /// Category stamped on every item extracted from this table.
    pub fn category(self) -> i64 {
        match self {
            Source::Primary => CATEGORY_PRIMARY,
            Source::Secondary => CATEGORY_SECONDARY,
        }
    }

    /// CSS selector of the container holding this table.
    pub fn container_selector(self) -> &'static str {
        match self {
            Source::Primary => "div.grablu-table-db",
            Source::Secondary => "div.gbf-table_center.gbf-hyouka_table",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Primary => f.write_str("primary"),
            Source::Secondary => f.write_str("secondary"),
        }
    }
}
