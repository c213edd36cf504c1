//! `gsheets-client` — minimal async client for the Google Sheets v4 REST API.
//!
//! Covers exactly the surface the character-sheet importer needs:
//!
//! ```text
//! SheetsClient
//!     │  open_by_url("https://docs.google.com/spreadsheets/d/…")
//!     ▼
//! Spreadsheet     ← document metadata (title + worksheet list)
//!     │  worksheet("Front")
//!     ▼
//! Worksheet       ← values(ValueRender) fetches one tab as a string grid
//! ```
//!
//! Grids come back row-major. The `UNFORMATTED_VALUE` rendering of a tab is
//! ragged on the wire (trailing empty cells are omitted per row), so callers
//! that need rectangular data should pass it through [`fill_gaps`] — or use
//! [`SheetsClient::fetch_tab`], which does both fetches and the gap fill.
//!
//! Authentication is a plain API key or a pre-issued bearer token; this crate
//! does not implement the service-account JWT flow.

pub mod client;
pub mod error;
pub mod types;

pub use client::{fill_gaps, spreadsheet_id_from_url, SheetsClient, Spreadsheet, Worksheet};
pub use error::SheetsClientError;
pub use types::{SheetsAuth, ValueRender};

/// Convenience `Result` alias for this crate.
pub type Result<T> = std::result::Result<T, SheetsClientError>;
