//! Server configuration

use std::path::PathBuf;
use std::str::FromStr;

use shared::date::DatePolicy;

use crate::sheets::DEFAULT_API_BASE;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Where walk-in records are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetBackendKind {
    /// Google Sheets v4 REST API
    Google,
    /// In-process grid (local development)
    Memory,
}

impl FromStr for SheetBackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "google" | "sheets" => Ok(Self::Google),
            "memory" | "mem" => Ok(Self::Memory),
            other => Err(format!("unknown SHEET_BACKEND '{other}'")),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP port
    pub port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    pub backend: SheetBackendKind,
    /// Spreadsheet id (required for the Google backend)
    pub spreadsheet_id: Option<String>,
    /// Worksheet holding the walk-in records
    pub sheet_name: String,
    /// Inline service-account JSON (env: GOOGLE_SERVICE_ACCOUNT or GOOGLE_SERVICE_ACCOUNT_KEY)
    pub service_account_json: Option<String>,
    /// Service-account key file, used when no inline JSON is set
    pub service_account_file: PathBuf,
    /// Sheets API base URL
    pub sheets_api_base: String,
    /// Serve the built frontend next to the API
    pub serve_frontend: bool,
    pub frontend_dir: PathBuf,
    /// Daily-rolling log files go here when set
    pub log_dir: Option<PathBuf>,
    pub log_json: bool,
    pub request_timeout_secs: u64,
    /// How ambiguous `a/b/yyyy` dates are read
    pub date_policy: DatePolicy,
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.trim().is_empty())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3001,
            environment: "development".into(),
            backend: SheetBackendKind::Google,
            spreadsheet_id: None,
            sheet_name: "Walk-In".into(),
            service_account_json: None,
            service_account_file: PathBuf::from("service-account-key.json"),
            sheets_api_base: DEFAULT_API_BASE.into(),
            serve_frontend: false,
            frontend_dir: PathBuf::from("frontend/dist"),
            log_dir: None,
            log_json: false,
            request_timeout_secs: 30,
            date_policy: DatePolicy::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let defaults = Self::default();

        let backend = match env_non_empty("SHEET_BACKEND") {
            Some(v) => v.parse::<SheetBackendKind>()?,
            None => defaults.backend,
        };
        let date_policy = match env_non_empty("DATE_POLICY") {
            Some(v) => v.parse::<DatePolicy>()?,
            None => defaults.date_policy,
        };
        let spreadsheet_id = env_non_empty("SPREADSHEET_ID");
        if backend == SheetBackendKind::Google && spreadsheet_id.is_none() {
            return Err("SPREADSHEET_ID must be set for the google sheet backend".into());
        }

        Ok(Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            environment: std::env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            backend,
            spreadsheet_id,
            sheet_name: env_non_empty("SHEET_NAME").unwrap_or(defaults.sheet_name),
            service_account_json: env_non_empty("GOOGLE_SERVICE_ACCOUNT")
                .or_else(|| env_non_empty("GOOGLE_SERVICE_ACCOUNT_KEY")),
            service_account_file: env_non_empty("GOOGLE_SERVICE_ACCOUNT_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.service_account_file),
            sheets_api_base: env_non_empty("SHEETS_API_BASE").unwrap_or(defaults.sheets_api_base),
            serve_frontend: env_flag("SERVE_FRONTEND"),
            frontend_dir: env_non_empty("FRONTEND_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.frontend_dir),
            log_dir: env_non_empty("LOG_DIR").map(PathBuf::from),
            log_json: env_flag("LOG_JSON"),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|s| *s > 0)
                .unwrap_or(defaults.request_timeout_secs),
            date_policy,
        })
    }

    /// Local-only setup: memory backend, no frontend
    pub fn for_memory() -> Self {
        Self {
            backend: SheetBackendKind::Memory,
            ..Self::default()
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_kind_parse() {
        assert_eq!("Google".parse(), Ok(SheetBackendKind::Google));
        assert_eq!(" memory ".parse(), Ok(SheetBackendKind::Memory));
        assert!("postgres".parse::<SheetBackendKind>().is_err());
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 3001);
        assert_eq!(config.sheet_name, "Walk-In");
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.date_policy, DatePolicy::MonthFirst);
        assert!(!config.is_production());
    }
}
