//! Shared application state

use std::sync::Arc;
use std::time::Duration;

use crate::config::{Config, SheetBackendKind};
use crate::services::WalkInService;
use crate::sheets::{
    GoogleSheets, MemorySheet, ServiceAccountKey, SheetBackend, SheetError, TokenProvider,
};

/// State handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub walkin: WalkInService,
    pub config: Arc<Config>,
}

impl AppState {
    /// Build the configured sheet backend and the service on top of it
    pub fn new(config: Config) -> Result<Self, SheetError> {
        let backend: Arc<dyn SheetBackend> = match config.backend {
            SheetBackendKind::Memory => {
                tracing::warn!("Using in-memory sheet backend, records are not persisted");
                Arc::new(MemorySheet::with_standard_headers(config.sheet_name.clone()))
            }
            SheetBackendKind::Google => Arc::new(google_backend(&config)?),
        };
        Ok(Self::with_backend(config, backend))
    }

    /// State over an existing backend
    pub fn with_backend(config: Config, backend: Arc<dyn SheetBackend>) -> Self {
        let walkin = WalkInService::new(backend, config.sheet_name.clone(), config.date_policy);
        Self {
            walkin,
            config: Arc::new(config),
        }
    }
}

fn google_backend(config: &Config) -> Result<GoogleSheets, SheetError> {
    let spreadsheet_id = config
        .spreadsheet_id
        .clone()
        .ok_or_else(|| SheetError::Config("SPREADSHEET_ID is not set".into()))?;

    let key = match &config.service_account_json {
        Some(json) => ServiceAccountKey::from_json(json)?,
        None => ServiceAccountKey::from_file(&config.service_account_file)?,
    };
    tracing::info!(
        client_email = %key.client_email,
        sheet_name = %config.sheet_name,
        "Using Google Sheets backend"
    );

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .build()?;
    let tokens = TokenProvider::new(client.clone(), key)?;

    GoogleSheets::new(
        client,
        &config.sheets_api_base,
        spreadsheet_id,
        config.sheet_name.clone(),
        tokens,
    )
}
