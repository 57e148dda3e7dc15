use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Thin client for the spreadsheet REST API shared by the remote word
/// source and the remote event sink.
#[derive(Debug, Clone)]
pub struct SheetsClient {
    http: reqwest::Client,
    token: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetMeta>,
}

#[derive(Debug, Deserialize)]
struct SheetMeta {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    title: String,
}

/// Cells come back as JSON strings, numbers, or booleans depending on the
/// sheet's formatting; everything is flattened to a string.
fn cell_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl SheetsClient {
    pub fn new(token: String) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("build HTTP client")?;
        Ok(Self {
            http,
            token,
            base_url: SHEETS_API_BASE.to_string(),
        })
    }

    /// Point the client at a different API host. Used by tests.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub async fn get_values(&self, spreadsheet_id: &str, range: &str) -> Result<Vec<Vec<String>>> {
        let url = format!("{}/{}/values/{}", self.base_url, spreadsheet_id, range);
        let value_range: ValueRange = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await
            .with_context(|| format!("read range {}", range))?
            .error_for_status()
            .with_context(|| format!("read range {}", range))?
            .json()
            .await
            .context("decode value range")?;

        Ok(value_range
            .values
            .iter()
            .map(|row| row.iter().map(cell_to_string).collect())
            .collect())
    }

    pub async fn append_row(
        &self,
        spreadsheet_id: &str,
        range: &str,
        row: &[String],
    ) -> Result<()> {
        let url = format!(
            "{}/{}/values/{}:append?valueInputOption=USER_ENTERED",
            self.base_url, spreadsheet_id, range
        );
        self.http
            .post(&url)
            .bearer_auth(&self.token)
            .json(&json!({ "values": [row] }))
            .send()
            .await
            .with_context(|| format!("append to {}", range))?
            .error_for_status()
            .with_context(|| format!("append to {}", range))?;
        Ok(())
    }

    pub async fn update_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        values: &[Vec<String>],
    ) -> Result<()> {
        let url = format!(
            "{}/{}/values/{}?valueInputOption=USER_ENTERED",
            self.base_url, spreadsheet_id, range
        );
        self.http
            .put(&url)
            .bearer_auth(&self.token)
            .json(&json!({ "values": values }))
            .send()
            .await
            .with_context(|| format!("update {}", range))?
            .error_for_status()
            .with_context(|| format!("update {}", range))?;
        Ok(())
    }

    pub async fn add_sheet(&self, spreadsheet_id: &str, title: &str) -> Result<()> {
        let url = format!("{}/{}:batchUpdate", self.base_url, spreadsheet_id);
        self.http
            .post(&url)
            .bearer_auth(&self.token)
            .json(&json!({
                "requests": [
                    { "addSheet": { "properties": { "title": title } } }
                ]
            }))
            .send()
            .await
            .with_context(|| format!("add sheet {}", title))?
            .error_for_status()
            .with_context(|| format!("add sheet {}", title))?;
        Ok(())
    }

    pub async fn sheet_titles(&self, spreadsheet_id: &str) -> Result<Vec<String>> {
        let url = format!(
            "{}/{}?fields=sheets.properties.title",
            self.base_url, spreadsheet_id
        );
        let meta: SpreadsheetMeta = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await
            .context("read spreadsheet metadata")?
            .error_for_status()
            .context("read spreadsheet metadata")?
            .json()
            .await
            .context("decode spreadsheet metadata")?;

        Ok(meta
            .sheets
            .into_iter()
            .map(|sheet| sheet.properties.title)
            .collect())
    }
}
