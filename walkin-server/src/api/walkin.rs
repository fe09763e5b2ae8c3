//! Walk-in record API
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | POST | /api/walkin/submit | Submit or save a draft |
//! | POST | /api/walkin/update | Overwrite a record by running number |
//! | GET | /api/walkin/test-connection | Spreadsheet reachability |
//! | GET | /api/walkin/check-customer | Existing customer by phone |
//! | GET | /api/walkin/dropdown-options | Static option catalog |
//! | GET | /api/walkin/entries | All records keyed by header |

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use shared::date::now_iso;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    ConnectionResponse, CustomerCheckResponse, DropdownCatalog, DropdownOptionsResponse,
    EntriesResponse, SubmitData, SubmitResponse, UpdateResponse, WalkInForm,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/api/walkin",
        Router::new()
            .route("/submit", post(submit))
            .route("/update", post(update))
            .route("/test-connection", get(test_connection))
            .route("/check-customer", get(check_customer))
            .route("/dropdown-options", get(dropdown_options))
            .route("/entries", get(entries)),
    )
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload
        .map(|Json(value)| value)
        .map_err(|e| AppError::invalid_request(e.body_text()))
}

async fn submit(
    State(state): State<AppState>,
    payload: Result<Json<WalkInForm>, JsonRejection>,
) -> AppResult<Json<SubmitResponse>> {
    let form = json_body(payload)?;
    let is_draft = form.is_draft();
    tracing::info!(is_draft, "Walk-in form received");

    let failure_code = if is_draft {
        ErrorCode::DraftSaveFailed
    } else {
        ErrorCode::SubmitFailed
    };
    let outcome = state
        .walkin
        .submit(form)
        .await
        .map_err(|e| e.report(failure_code))?;

    let message = if outcome.is_draft {
        "Draft saved successfully"
    } else {
        "Form submitted successfully"
    };
    Ok(Json(SubmitResponse {
        success: true,
        message: message.to_string(),
        data: SubmitData {
            row_number: outcome.appended.row_number,
            existing_customer: outcome.existing_customer,
            is_draft: outcome.is_draft,
        },
    }))
}

async fn update(
    State(state): State<AppState>,
    payload: Result<Json<WalkInForm>, JsonRejection>,
) -> AppResult<Json<UpdateResponse>> {
    let form = json_body(payload)?;
    let row_number = state
        .walkin
        .update(form)
        .await
        .map_err(|e| e.report(ErrorCode::UpdateFailed))?;

    Ok(Json(UpdateResponse {
        success: true,
        message: "Row updated successfully".to_string(),
        row_number,
    }))
}

async fn test_connection(State(state): State<AppState>) -> AppResult<Json<ConnectionResponse>> {
    let info = state.walkin.test_connection().await.map_err(|e| {
        e.report_as(ErrorCode::SheetUnavailable, "Google Sheets connection failed")
    })?;

    Ok(Json(ConnectionResponse {
        success: true,
        message: format!("Connected to spreadsheet '{}'", info.title),
        timestamp: now_iso(),
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CheckCustomerQuery {
    phone_number: Option<String>,
}

async fn check_customer(
    State(state): State<AppState>,
    Query(query): Query<CheckCustomerQuery>,
) -> AppResult<Json<CustomerCheckResponse>> {
    let phone = query
        .phone_number
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| AppError::new(ErrorCode::PhoneNumberMissing))?;

    let customer = state
        .walkin
        .find_by_phone(&phone)
        .await
        .map_err(|e| e.report_as(ErrorCode::SheetUnavailable, "Failed to check customer"))?;

    Ok(Json(CustomerCheckResponse {
        success: true,
        exists: customer.is_some(),
        customer,
    }))
}

async fn dropdown_options() -> Json<DropdownOptionsResponse> {
    Json(DropdownOptionsResponse {
        success: true,
        options: DropdownCatalog::standard(),
        last_updated: now_iso(),
    })
}

async fn entries(State(state): State<AppState>) -> AppResult<Json<EntriesResponse>> {
    let data = state
        .walkin
        .list_all()
        .await
        .map_err(|e| e.report_as(ErrorCode::SheetUnavailable, "Failed to fetch entries"))?;
    tracing::debug!(count = data.len(), "Entries listed");

    Ok(Json(EntriesResponse {
        success: true,
        data,
    }))
}
