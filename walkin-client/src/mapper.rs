//! Conversion between header-keyed sheet rows and the typed form
//!
//! Rows come back from `/api/walkin/entries` keyed by whatever header text the
//! sheet carries. Several columns were renamed over time, so every field is
//! read through a fallback chain of exact header names; blank cells count as
//! absent. Date cells are read day-first, the way the server writes them.

use serde_json::Value;
use shared::date::{DatePolicy, parse_sheet_date, sheet_date_to_iso};
use shared::models::{FollowUp, WalkInForm};
use shared::sheet::columns::{self, MAX_FOLLOW_UPS, standard_headers};
use shared::sheet::{SheetRow, headers as h};
use shared::util::{leading_int, split_list};

use crate::MapperError;

/// Project a sheet row onto the form fields
pub fn row_to_form(row: &SheetRow) -> WalkInForm {
    let text = |chain: &[&str]| row.first_non_blank(chain).map(str::to_string);
    let list = |chain: &[&str]| row.first_non_blank(chain).map(split_list);
    let date = |chain: &[&str]| row.first_non_blank(chain).and_then(sheet_date_to_iso);

    WalkInForm {
        no: row
            .first_non_blank(h::NO)
            .and_then(leading_int)
            .map(|n| n.to_string()),
        month: text(h::MONTH),
        visit_date: date(h::VISIT_DATE),
        sales_queue: text(h::SALES_QUEUE),
        walk_in_type: text(h::WALK_IN_TYPE),
        lead_from_month: text(h::LEAD_FROM_MONTH),
        media_online: text(h::MEDIA_ONLINE),
        media_offline: text(h::MEDIA_OFFLINE),
        pass_site_source: text(h::PASS_SITE_SOURCE),
        full_name: text(h::FULL_NAME),
        phone_number: text(h::PHONE_NUMBER),
        email: text(h::EMAIL),
        line_id: text(h::LINE_ID),
        age: text(h::AGE).map(|a| a.trim().to_string()),
        residence_district: text(h::RESIDENCE_DISTRICT),
        residence_province: text(h::RESIDENCE_PROVINCE),
        work_district: text(h::WORK_DISTRICT),
        work_province: text(h::WORK_PROVINCE),
        company: text(h::COMPANY),
        position: text(h::POSITION),
        occupation: text(h::OCCUPATION),
        monthly_income: text(h::MONTHLY_INCOME).map(Value::String),
        room_type: text(h::ROOM_TYPE),
        budget: text(h::BUDGET),
        decision_timeframe: text(h::DECISION_TIMEFRAME),
        purchase_purpose: text(h::PURCHASE_PURPOSE),
        main_route: text(h::MAIN_ROUTE),
        decision_factors: text(h::DECISION_FACTORS),
        decision_factors2: text(h::DECISION_FACTORS_2),
        interests: list(h::INTERESTS),
        shopping_malls: list(h::SHOPPING_MALLS),
        promotion_interest: list(h::PROMOTION_INTEREST),
        comparison_projects: text(h::COMPARISON_PROJECTS),
        grade: text(h::GRADE),
        latest_status: text(h::LATEST_STATUS),
        customer_details: text(h::CUSTOMER_DETAILS),
        reason_not_booking: text(h::REASON_NOT_BOOKING),
        reason_not_booking_detail: text(h::REASON_NOT_BOOKING_DETAIL),
        follow_ups: follow_ups(row),
        ..WalkInForm::default()
    }
}

/// Parse the follow-up cells back into entries.
///
/// A cell reads `"{date}: {detail}"` or just the detail. The first entry
/// falls back to the separate follow-up date column when its cell has no
/// date of its own.
fn follow_ups(row: &SheetRow) -> Option<Vec<FollowUp>> {
    let fallback_date = row
        .first_non_blank(h::FOLLOW_UP_DATE)
        .and_then(sheet_date_to_iso);

    let entries: Vec<FollowUp> = [h::FOLLOW_UP_1, h::FOLLOW_UP_2]
        .into_iter()
        .take(MAX_FOLLOW_UPS)
        .enumerate()
        .filter_map(|(i, chain)| {
            let cell = row.first_non_blank(chain)?;
            let mut entry = parse_follow_up(cell);
            if i == 0 && entry.date.is_none() {
                entry.date = fallback_date.clone();
            }
            Some(entry)
        })
        .collect();

    (!entries.is_empty()).then_some(entries)
}

/// Split `"{date}: {detail}"`; text without a parseable date prefix is all detail
pub fn parse_follow_up(cell: &str) -> FollowUp {
    let cell = cell.trim();
    if let Some((prefix, detail)) = cell.split_once(':')
        && let Some(date) = parse_sheet_date(prefix)
    {
        return FollowUp {
            date: Some(date.format("%Y-%m-%d").to_string()),
            detail: detail.trim().to_string(),
        };
    }
    FollowUp {
        date: None,
        detail: cell.to_string(),
    }
}

/// Project a form onto the primary header names.
///
/// Uses the same positional layout the server writes, so every header of the
/// standard worksheet is present (blank when the field is absent). `policy`
/// reads ambiguous dates typed into the form.
pub fn form_to_row(form: &WalkInForm, policy: DatePolicy) -> SheetRow {
    let mut cells = columns::build_row(form, policy);
    if let Some(n) = form.resolve_running_number() {
        columns::set_running_number(&mut cells, n);
    }
    cells[columns::MONTH] = form.month.clone().unwrap_or_default();
    SheetRow::from_cells(&standard_headers(), &cells)
}

/// [`row_to_form`] for a raw JSON row object
pub fn value_to_form(value: &Value) -> Result<WalkInForm, MapperError> {
    let kind = match value {
        Value::Object(_) => None,
        Value::Null => Some("null"),
        Value::Bool(_) => Some("a boolean"),
        Value::Number(_) => Some("a number"),
        Value::String(_) => Some("a string"),
        Value::Array(_) => Some("an array"),
    };
    if let Some(kind) = kind {
        return Err(MapperError::NotAnObject(kind));
    }

    let row: SheetRow = serde_json::from_value(value.clone())
        .map_err(|e| MapperError::InvalidForm(e.to_string()))?;
    Ok(row_to_form(&row))
}
