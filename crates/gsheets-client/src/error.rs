use thiserror::Error;

#[derive(Debug, Error)]
pub enum SheetsClientError {
    #[error("no spreadsheet id found in URL: {0}")]
    InvalidUrl(String),

    #[error("spreadsheet not found: {0}")]
    SpreadsheetNotFound(String),

    #[error("worksheet not found: {0}")]
    WorksheetNotFound(String),

    #[error("Sheets API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}
