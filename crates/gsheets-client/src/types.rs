use serde::Deserialize;

// ─── Auth ─────────────────────────────────────────────────────────────────

/// Credential handed to every request.
///
/// `ApiKey` goes on the query string (read access to link-shared sheets);
/// `Bearer` is a pre-issued OAuth/service-account access token sent in the
/// `Authorization` header. Token acquisition is the operator's problem.
#[derive(Debug, Clone)]
pub enum SheetsAuth {
    ApiKey(String),
    Bearer(String),
}

// ─── Value rendering ──────────────────────────────────────────────────────

/// `valueRenderOption` for a values fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueRender {
    Formatted,
    Unformatted,
}

impl ValueRender {
    pub fn as_param(self) -> &'static str {
        match self {
            ValueRender::Formatted => "FORMATTED_VALUE",
            ValueRender::Unformatted => "UNFORMATTED_VALUE",
        }
    }
}

// ─── Wire types ───────────────────────────────────────────────────────────

/// Response of `GET /v4/spreadsheets/{id}?fields=properties.title,sheets.properties`.
#[derive(Debug, Clone, Deserialize)]
pub struct SpreadsheetMeta {
    #[serde(default)]
    pub properties: Option<SpreadsheetProperties>,
    #[serde(default)]
    pub sheets: Vec<SheetEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpreadsheetProperties {
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SheetEntry {
    pub properties: SheetProperties,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetProperties {
    pub sheet_id: i64,
    pub title: String,
}

/// Response of `GET /v4/spreadsheets/{id}/values/{range}`.
///
/// `values` is omitted entirely for an empty tab, and individual rows drop
/// trailing empty cells. Scalars may arrive as strings, numbers, or booleans
/// depending on the render option, so cells are held as raw JSON values until
/// [`ValueGrid::into_strings`] normalizes them.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueGrid {
    #[serde(default)]
    pub range: String,
    #[serde(default)]
    pub major_dimension: String,
    #[serde(default)]
    pub values: Vec<Vec<serde_json::Value>>,
}

impl ValueGrid {
    /// Collapse JSON scalars to their spreadsheet string forms.
    pub fn into_strings(self) -> Vec<Vec<String>> {
        self.values
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect()
    }
}

fn cell_to_string(v: serde_json::Value) -> String {
    match v {
        serde_json::Value::String(s) => s,
        serde_json::Value::Bool(b) => if b { "TRUE" } else { "FALSE" }.to_string(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Google's error envelope: `{"error": {"code": …, "message": …}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorEnvelope {
    pub error: ApiErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_grid_missing_values_key_is_empty() {
        let grid: ValueGrid = serde_json::from_str(r#"{"range":"Front!A1:B2"}"#).unwrap();
        assert!(grid.into_strings().is_empty());
    }

    #[test]
    fn mixed_scalars_stringified() {
        let grid: ValueGrid = serde_json::from_str(
            r#"{"values":[["Keth",12,true],[3.5,null]]}"#,
        )
        .unwrap();
        let rows = grid.into_strings();
        assert_eq!(rows[0], vec!["Keth", "12", "TRUE"]);
        assert_eq!(rows[1], vec!["3.5", ""]);
    }

    #[test]
    fn error_envelope_parses() {
        let env: ApiErrorEnvelope = serde_json::from_str(
            r#"{"error":{"code":403,"message":"The caller does not have permission","status":"PERMISSION_DENIED"}}"#,
        )
        .unwrap();
        assert_eq!(env.error.code, 403);
        assert!(env.error.message.contains("permission"));
    }
}
