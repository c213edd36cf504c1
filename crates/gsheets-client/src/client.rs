use std::sync::OnceLock;

use regex::Regex;

use crate::types::{
    ApiErrorEnvelope, SheetsAuth, SpreadsheetMeta, ValueGrid, ValueRender,
};
use crate::{Result, SheetsClientError};

const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com";

static DOC_ID_RE: OnceLock<Regex> = OnceLock::new();

fn doc_id_re() -> &'static Regex {
    DOC_ID_RE.get_or_init(|| Regex::new(r"/spreadsheets/d/([A-Za-z0-9_-]+)").unwrap())
}

/// Pull the document id out of a sharing URL.
///
/// Accepts any URL containing `/spreadsheets/d/<id>`, which also covers links
/// with trailing `/edit`, `/copy`, query strings, or fragments.
pub fn spreadsheet_id_from_url(url: &str) -> Result<String> {
    doc_id_re()
        .captures(url)
        .map(|c| c[1].to_string())
        .ok_or_else(|| SheetsClientError::InvalidUrl(url.to_string()))
}

/// Pad every row of a ragged grid to the widest row's length.
///
/// The API drops trailing empty cells per row, so an unformatted fetch is
/// rarely rectangular as delivered.
pub fn fill_gaps(mut grid: Vec<Vec<String>>) -> Vec<Vec<String>> {
    let width = grid.iter().map(Vec::len).max().unwrap_or(0);
    for row in &mut grid {
        row.resize(width, String::new());
    }
    grid
}

// ─── SheetsClient ─────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct SheetsClient {
    http: reqwest::Client,
    base_url: String,
    auth: SheetsAuth,
}

impl SheetsClient {
    pub fn new(auth: SheetsAuth) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            auth,
        }
    }

    /// Point the client at a different endpoint (test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn request(&self, url: &str, query: &[(&str, &str)]) -> reqwest::RequestBuilder {
        let mut req = self.http.get(url).query(query);
        match &self.auth {
            SheetsAuth::ApiKey(key) => req = req.query(&[("key", key.as_str())]),
            SheetsAuth::Bearer(token) => req = req.bearer_auth(token),
        }
        req
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
        doc: &str,
    ) -> Result<T> {
        let resp = self.request(url, query).send().await?;
        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(SheetsClientError::SpreadsheetNotFound(doc.to_string()));
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(SheetsClientError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(resp.json().await?)
    }

    /// Open a document by its sharing URL, fetching its worksheet metadata.
    pub async fn open_by_url(&self, url: &str) -> Result<Spreadsheet> {
        let id = spreadsheet_id_from_url(url)?;
        let endpoint = format!("{}/v4/spreadsheets/{id}", self.base_url);
        let meta: SpreadsheetMeta = self
            .get_json(
                &endpoint,
                &[("fields", "properties.title,sheets.properties")],
                &id,
            )
            .await?;
        tracing::debug!(
            doc = %id,
            tabs = meta.sheets.len(),
            "opened spreadsheet"
        );
        Ok(Spreadsheet {
            client: self.clone(),
            id,
            meta,
        })
    }

    /// Fetch one tab's formatted and gap-filled raw grids in a single call.
    pub async fn fetch_tab(
        &self,
        url: &str,
        title: &str,
    ) -> Result<(Vec<Vec<String>>, Vec<Vec<String>>)> {
        let doc = self.open_by_url(url).await?;
        let ws = doc.worksheet(title)?;
        let formatted = ws.values(ValueRender::Formatted).await?;
        let raw = fill_gaps(ws.values(ValueRender::Unformatted).await?);
        Ok((formatted, raw))
    }
}

// ─── Spreadsheet / Worksheet ──────────────────────────────────────────────

/// An opened document: id plus the worksheet list fetched at open time.
#[derive(Debug, Clone)]
pub struct Spreadsheet {
    client: SheetsClient,
    id: String,
    meta: SpreadsheetMeta,
}

impl Spreadsheet {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        self.meta
            .properties
            .as_ref()
            .map(|p| p.title.as_str())
            .unwrap_or("")
    }

    pub fn worksheet_titles(&self) -> Vec<&str> {
        self.meta
            .sheets
            .iter()
            .map(|s| s.properties.title.as_str())
            .collect()
    }

    /// Look up a worksheet tab by its exact title.
    pub fn worksheet(&self, title: &str) -> Result<Worksheet> {
        if !self.meta.sheets.iter().any(|s| s.properties.title == title) {
            return Err(SheetsClientError::WorksheetNotFound(title.to_string()));
        }
        Ok(Worksheet {
            client: self.client.clone(),
            spreadsheet_id: self.id.clone(),
            title: title.to_string(),
        })
    }
}

/// One tab of an opened document.
#[derive(Debug, Clone)]
pub struct Worksheet {
    client: SheetsClient,
    spreadsheet_id: String,
    title: String,
}

impl Worksheet {
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Fetch the whole tab as a row-major string grid.
    pub async fn values(&self, render: ValueRender) -> Result<Vec<Vec<String>>> {
        let endpoint = format!(
            "{}/v4/spreadsheets/{}/values/{}",
            self.client.base_url, self.spreadsheet_id, self.title
        );
        let grid: ValueGrid = self
            .client
            .get_json(
                &endpoint,
                &[("valueRenderOption", render.as_param())],
                &self.spreadsheet_id,
            )
            .await?;
        Ok(grid.into_strings())
    }
}
