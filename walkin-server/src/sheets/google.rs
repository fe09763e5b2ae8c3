//! Google Sheets v4 REST backend

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, Url};
use serde::Deserialize;
use serde_json::{Value, json};
use shared::sheet::SheetRange;

use super::{SheetBackend, SheetError, SpreadsheetInfo, TokenProvider};

pub const DEFAULT_API_BASE: &str = "https://sheets.googleapis.com/v4";

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppendResponse {
    updates: Option<AppendUpdates>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppendUpdates {
    updated_range: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetMeta {
    properties: Option<TitleProperties>,
    #[serde(default)]
    sheets: Vec<SheetMeta>,
}

#[derive(Debug, Deserialize)]
struct SheetMeta {
    properties: Option<TitleProperties>,
}

#[derive(Debug, Deserialize)]
struct TitleProperties {
    #[serde(default)]
    title: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: String,
}

/// One worksheet of one spreadsheet, accessed over HTTPS
pub struct GoogleSheets {
    client: reqwest::Client,
    base_url: Url,
    spreadsheet_id: String,
    sheet_name: String,
    tokens: TokenProvider,
}

impl GoogleSheets {
    pub fn new(
        client: reqwest::Client,
        base_url: &str,
        spreadsheet_id: impl Into<String>,
        sheet_name: impl Into<String>,
        tokens: TokenProvider,
    ) -> Result<Self, SheetError> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| SheetError::Config(format!("invalid Sheets API base URL: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(SheetError::Config(format!(
                "Sheets API base URL cannot be a base: {base_url}"
            )));
        }
        Ok(Self {
            client,
            base_url,
            spreadsheet_id: spreadsheet_id.into(),
            sheet_name: sheet_name.into(),
            tokens,
        })
    }

    /// `{base}/spreadsheets/{id}/{segments...}` with each segment percent-encoded
    fn url(&self, segments: &[&str]) -> Result<Url, SheetError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| SheetError::Config("Sheets API base URL cannot be a base".into()))?
            .push("spreadsheets")
            .push(&self.spreadsheet_id)
            .extend(segments);
        Ok(url)
    }

    async fn request(&self, method: Method, url: Url) -> Result<RequestBuilder, SheetError> {
        let token = self.tokens.access_token().await?;
        Ok(self.client.request(method, url).bearer_auth(token))
    }

    async fn send(&self, builder: RequestBuilder, what: &str) -> Result<Response, SheetError> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .map(|b| b.error.message)
            .unwrap_or(body);
        tracing::error!(
            status = status.as_u16(),
            operation = what,
            message = %message,
            "Sheets API request failed"
        );
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(SheetError::Auth(message));
        }
        Err(SheetError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

fn cell_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[async_trait]
impl SheetBackend for GoogleSheets {
    async fn read_range(&self, range: SheetRange) -> Result<Vec<Vec<String>>, SheetError> {
        let a1 = range.qualified(&self.sheet_name);
        let url = self.url(&["values", &a1])?;
        let response = self
            .send(self.request(Method::GET, url).await?, "values.get")
            .await?;
        let body: ValueRange = response
            .json()
            .await
            .map_err(|e| SheetError::InvalidResponse(format!("values.get: {e}")))?;

        Ok(body
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect())
    }

    async fn append_row(&self, range: SheetRange, row: Vec<String>) -> Result<String, SheetError> {
        let a1 = range.qualified(&self.sheet_name);
        let mut url = self.url(&["values", &format!("{a1}:append")])?;
        url.query_pairs_mut()
            .append_pair("valueInputOption", "USER_ENTERED");
        let builder = self
            .request(Method::POST, url)
            .await?
            .json(&json!({ "values": [row] }));
        let response = self.send(builder, "values.append").await?;
        let body: AppendResponse = response
            .json()
            .await
            .map_err(|e| SheetError::InvalidResponse(format!("values.append: {e}")))?;

        body.updates
            .and_then(|u| u.updated_range)
            .ok_or_else(|| SheetError::InvalidResponse("append response has no updatedRange".into()))
    }

    async fn update_row(&self, range: SheetRange, row: Vec<String>) -> Result<(), SheetError> {
        let a1 = range.qualified(&self.sheet_name);
        let mut url = self.url(&["values", &a1])?;
        url.query_pairs_mut()
            .append_pair("valueInputOption", "USER_ENTERED");
        let builder = self.request(Method::PUT, url).await?.json(&json!({
            "range": a1,
            "majorDimension": "ROWS",
            "values": [row],
        }));
        self.send(builder, "values.update").await?;
        Ok(())
    }

    async fn spreadsheet_info(&self) -> Result<SpreadsheetInfo, SheetError> {
        let mut url = self.url(&[])?;
        url.query_pairs_mut()
            .append_pair("fields", "properties.title,sheets.properties.title");
        let response = self
            .send(self.request(Method::GET, url).await?, "spreadsheets.get")
            .await?;
        let meta: SpreadsheetMeta = response
            .json()
            .await
            .map_err(|e| SheetError::InvalidResponse(format!("spreadsheets.get: {e}")))?;

        Ok(SpreadsheetInfo {
            title: meta.properties.map(|p| p.title).unwrap_or_default(),
            sheet_titles: meta
                .sheets
                .into_iter()
                .filter_map(|s| s.properties.map(|p| p.title))
                .collect(),
        })
    }
}
