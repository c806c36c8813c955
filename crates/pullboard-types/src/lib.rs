//! Shared records for the pullboard workspace.
//!
//! JSON request and response bodies live in `api`; everything else is a
//! persisted record or a date helper.

pub mod api;
pub mod dates;
pub mod models;
