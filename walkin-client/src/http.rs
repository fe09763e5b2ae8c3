//! HTTP client for the walk-in API

use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::models::{
    ConnectionResponse, CustomerCheckResponse, DropdownOptionsResponse, EntriesResponse,
    HealthResponse, SubmitResponse, UpdateResponse, WalkInForm,
};
use shared::date::DatePolicy;
use shared::sheet::SheetRow;

use crate::{ClientConfig, ClientError, ClientResult};

/// HTTP client for walkin-server
#[derive(Debug, Clone)]
pub struct WalkInClient {
    client: Client,
    base_url: String,
    date_policy: DatePolicy,
}

impl WalkInClient {
    /// Create a new client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout_duration())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            date_policy: config.date_policy,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// How ambiguous dates typed into forms are read before sending
    pub fn date_policy(&self) -> DatePolicy {
        self.date_policy
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.client.get(self.url(path)).send().await?;
        Self::handle_response(response).await
    }

    /// Make a GET request with query parameters
    pub async fn get_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> ClientResult<T> {
        let response = self.client.get(self.url(path)).query(query).send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> ClientResult<T> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            tracing::debug!(status = status.as_u16(), body = %text, "Request failed");
            return Err(ClientError::from_status(status, &text));
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(Into::into)
    }

    // ========== Walk-in API ==========

    pub async fn health(&self) -> ClientResult<HealthResponse> {
        self.get("/api/health").await
    }

    /// Submit a completed form or save a draft
    pub async fn submit(&self, form: &WalkInForm) -> ClientResult<SubmitResponse> {
        self.post("/api/walkin/submit", form).await
    }

    /// Overwrite the record named by the form's running number
    pub async fn update(&self, form: &WalkInForm) -> ClientResult<UpdateResponse> {
        self.post("/api/walkin/update", form).await
    }

    pub async fn check_customer(&self, phone_number: &str) -> ClientResult<CustomerCheckResponse> {
        self.get_with_query(
            "/api/walkin/check-customer",
            &[("phoneNumber", phone_number)],
        )
        .await
    }

    pub async fn dropdown_options(&self) -> ClientResult<DropdownOptionsResponse> {
        self.get("/api/walkin/dropdown-options").await
    }

    /// Every stored record, keyed by header
    pub async fn entries(&self) -> ClientResult<Vec<SheetRow>> {
        let response: EntriesResponse = self.get("/api/walkin/entries").await?;
        if !response.success {
            return Err(ClientError::InvalidResponse(
                "entries response reported failure".to_string(),
            ));
        }
        Ok(response.data)
    }

    pub async fn test_connection(&self) -> ClientResult<ConnectionResponse> {
        self.get("/api/walkin/test-connection").await
    }
}
