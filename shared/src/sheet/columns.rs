//! Positional column layout of the walk-in worksheet (A..=CF)

use std::ops::Range;

use crate::date::{DatePolicy, format_sheet_date, parse_date};
use crate::models::{FollowUp, WalkInForm};
use crate::util::join_list;

/// Row width: columns A through CF
pub const COLUMN_COUNT: usize = 84;
pub const LAST_COLUMN: usize = COLUMN_COUNT - 1;

/// Column A, legacy running number
pub const RUNNING_NUMBER_A: usize = 0;
/// Columns B..=E, written by the external annotation process
pub const PROTECTED: Range<usize> = 1..5;
/// Column F, current running number ("No.")
pub const RUNNING_NUMBER_F: usize = 5;

/// Column G, English month name of the visit
pub const MONTH: usize = 6;
pub const SALES_QUEUE: usize = 7;
pub const VISIT_DATE: usize = 8;
pub const LEAD_FROM_MONTH: usize = 9;
pub const MEDIA_ONLINE: usize = 10;
pub const MEDIA_OFFLINE: usize = 11;
pub const WALK_IN_TYPE: usize = 12;
pub const PASS_SITE_SOURCE: usize = 13;
pub const LATEST_STATUS: usize = 14;
pub const GRADE: usize = 15;
pub const FULL_NAME: usize = 16;
pub const PHONE_NUMBER: usize = 17;
pub const EMAIL: usize = 18;
pub const LINE_ID: usize = 19;
pub const AGE: usize = 20;
pub const RESIDENCE_DISTRICT: usize = 21;
pub const RESIDENCE_PROVINCE: usize = 22;
pub const WORK_DISTRICT: usize = 23;
pub const WORK_PROVINCE: usize = 24;
pub const COMPANY: usize = 25;
pub const POSITION: usize = 26;
pub const OCCUPATION: usize = 27;
pub const MONTHLY_INCOME: usize = 28;
pub const ROOM_TYPE: usize = 29;
pub const BUDGET: usize = 30;
pub const DECISION_TIMEFRAME: usize = 31;
pub const PURCHASE_PURPOSE: usize = 32;
pub const MAIN_ROUTE: usize = 33;
pub const DECISION_FACTORS: usize = 34;
pub const DECISION_FACTORS_2: usize = 35;
pub const INTERESTS: usize = 36;
pub const SHOPPING_MALLS: usize = 37;
pub const PROMOTION_INTEREST: usize = 38;
pub const COMPARISON_PROJECTS: usize = 39;
pub const CUSTOMER_DETAILS: usize = 40;
pub const REASON_NOT_BOOKING: usize = 41;
pub const REASON_NOT_BOOKING_DETAIL: usize = 42;
/// Column AS, date of the latest follow-up
pub const FOLLOW_UP_DATE: usize = 44;
pub const FOLLOW_UP_1: usize = 45;
pub const FOLLOW_UP_2: usize = 46;

/// Number of follow-ups that have a column
pub const MAX_FOLLOW_UPS: usize = 2;

/// Flatten a form into a full-width row.
///
/// Absent fields become empty cells. Running-number and protected columns are
/// left empty; callers fill them.
pub fn build_row(form: &WalkInForm, policy: DatePolicy) -> Vec<String> {
    let mut row = vec![String::new(); COLUMN_COUNT];
    let text = |v: &Option<String>| v.clone().unwrap_or_default();
    let list = |v: &Option<Vec<String>>| v.as_deref().map(join_list).unwrap_or_default();

    row[SALES_QUEUE] = text(&form.sales_queue);
    row[VISIT_DATE] = form
        .visit_date
        .as_deref()
        .map(|d| sheet_date(d, policy))
        .unwrap_or_default();
    row[LEAD_FROM_MONTH] = text(&form.lead_from_month);
    row[MEDIA_ONLINE] = text(&form.media_online);
    row[MEDIA_OFFLINE] = text(&form.media_offline);
    row[WALK_IN_TYPE] = text(&form.walk_in_type);
    row[PASS_SITE_SOURCE] = text(&form.pass_site_source);
    row[LATEST_STATUS] = text(&form.latest_status);
    row[GRADE] = text(&form.grade);
    row[FULL_NAME] = text(&form.full_name);
    row[PHONE_NUMBER] = text(&form.phone_number);
    row[EMAIL] = text(&form.email);
    row[LINE_ID] = text(&form.line_id);
    row[AGE] = text(&form.age);
    row[RESIDENCE_DISTRICT] = text(&form.residence_district);
    row[RESIDENCE_PROVINCE] = text(&form.residence_province);
    row[WORK_DISTRICT] = text(&form.work_district);
    row[WORK_PROVINCE] = text(&form.work_province);
    row[COMPANY] = text(&form.company);
    row[POSITION] = text(&form.position);
    row[OCCUPATION] = text(&form.occupation);
    row[MONTHLY_INCOME] = form.monthly_income_text();
    row[ROOM_TYPE] = text(&form.room_type);
    row[BUDGET] = text(&form.budget);
    row[DECISION_TIMEFRAME] = text(&form.decision_timeframe);
    row[PURCHASE_PURPOSE] = text(&form.purchase_purpose);
    row[MAIN_ROUTE] = text(&form.main_route);
    row[DECISION_FACTORS] = text(&form.decision_factors);
    row[DECISION_FACTORS_2] = text(&form.decision_factors2);
    row[INTERESTS] = list(&form.interests);
    row[SHOPPING_MALLS] = list(&form.shopping_malls);
    row[PROMOTION_INTEREST] = list(&form.promotion_interest);
    row[COMPARISON_PROJECTS] = text(&form.comparison_projects);
    row[CUSTOMER_DETAILS] = text(&form.customer_details);
    row[REASON_NOT_BOOKING] = text(&form.reason_not_booking);
    row[REASON_NOT_BOOKING_DETAIL] = text(&form.reason_not_booking_detail);

    if let Some(follow_ups) = &form.follow_ups {
        for (slot, follow_up) in [FOLLOW_UP_1, FOLLOW_UP_2].into_iter().zip(follow_ups) {
            row[slot] = follow_up_cell(follow_up, policy);
        }
    }

    row
}

/// Write the running number into both identity columns
pub fn set_running_number(row: &mut [String], running_number: u64) {
    let value = running_number.to_string();
    row[RUNNING_NUMBER_A] = value.clone();
    row[RUNNING_NUMBER_F] = value;
}

/// Copy columns B..=E from `existing` into `row`; missing cells become empty
pub fn preserve_protected(row: &mut [String], existing: &[String]) {
    for index in PROTECTED {
        row[index] = existing.get(index).cloned().unwrap_or_default();
    }
}

/// `d/m/yyyy` for parseable dates; anything else is written as entered
fn sheet_date(input: &str, policy: DatePolicy) -> String {
    match parse_date(input, policy) {
        Some(date) => format_sheet_date(date),
        None => input.trim().to_string(),
    }
}

/// `"{d/m/yyyy}: {detail}"`, or just the detail when there is no date
pub fn follow_up_cell(follow_up: &FollowUp, policy: DatePolicy) -> String {
    match follow_up.date.as_deref().map(str::trim) {
        Some(date) if !date.is_empty() => {
            format!("{}: {}", sheet_date(date, policy), follow_up.detail)
        }
        _ => follow_up.detail.clone(),
    }
}

/// Header row matching the positional column layout
pub fn standard_headers() -> Vec<String> {
    use super::headers as h;

    let mut headers = vec![String::new(); COLUMN_COUNT];
    let mut set = |index: usize, name: &str| headers[index] = name.to_string();

    set(RUNNING_NUMBER_A, "RowId");
    for (index, name) in PROTECTED.zip(h::AI_SUMMARY) {
        set(index, name);
    }
    set(RUNNING_NUMBER_F, h::primary(h::NO));
    set(MONTH, h::primary(h::MONTH));
    set(SALES_QUEUE, h::primary(h::SALES_QUEUE));
    set(VISIT_DATE, h::primary(h::VISIT_DATE));
    set(LEAD_FROM_MONTH, h::primary(h::LEAD_FROM_MONTH));
    set(MEDIA_ONLINE, h::primary(h::MEDIA_ONLINE));
    set(MEDIA_OFFLINE, h::primary(h::MEDIA_OFFLINE));
    set(WALK_IN_TYPE, h::primary(h::WALK_IN_TYPE));
    set(PASS_SITE_SOURCE, h::primary(h::PASS_SITE_SOURCE));
    set(LATEST_STATUS, h::primary(h::LATEST_STATUS));
    set(GRADE, h::primary(h::GRADE));
    set(FULL_NAME, h::primary(h::FULL_NAME));
    set(PHONE_NUMBER, h::primary(h::PHONE_NUMBER));
    set(EMAIL, h::primary(h::EMAIL));
    set(LINE_ID, h::primary(h::LINE_ID));
    set(AGE, h::primary(h::AGE));
    set(RESIDENCE_DISTRICT, h::primary(h::RESIDENCE_DISTRICT));
    set(RESIDENCE_PROVINCE, h::primary(h::RESIDENCE_PROVINCE));
    set(WORK_DISTRICT, h::primary(h::WORK_DISTRICT));
    set(WORK_PROVINCE, h::primary(h::WORK_PROVINCE));
    set(COMPANY, h::primary(h::COMPANY));
    set(POSITION, h::primary(h::POSITION));
    set(OCCUPATION, h::primary(h::OCCUPATION));
    set(MONTHLY_INCOME, h::primary(h::MONTHLY_INCOME));
    set(ROOM_TYPE, h::primary(h::ROOM_TYPE));
    set(BUDGET, h::primary(h::BUDGET));
    set(DECISION_TIMEFRAME, h::primary(h::DECISION_TIMEFRAME));
    set(PURCHASE_PURPOSE, h::primary(h::PURCHASE_PURPOSE));
    set(MAIN_ROUTE, h::primary(h::MAIN_ROUTE));
    set(DECISION_FACTORS, h::primary(h::DECISION_FACTORS));
    set(DECISION_FACTORS_2, h::primary(h::DECISION_FACTORS_2));
    set(INTERESTS, h::primary(h::INTERESTS));
    set(SHOPPING_MALLS, h::primary(h::SHOPPING_MALLS));
    set(PROMOTION_INTEREST, h::primary(h::PROMOTION_INTEREST));
    set(COMPARISON_PROJECTS, h::primary(h::COMPARISON_PROJECTS));
    set(CUSTOMER_DETAILS, h::primary(h::CUSTOMER_DETAILS));
    set(REASON_NOT_BOOKING, h::primary(h::REASON_NOT_BOOKING));
    set(REASON_NOT_BOOKING_DETAIL, h::primary(h::REASON_NOT_BOOKING_DETAIL));
    set(FOLLOW_UP_DATE, h::primary(h::FOLLOW_UP_DATE));
    set(FOLLOW_UP_1, h::primary(h::FOLLOW_UP_1));
    set(FOLLOW_UP_2, h::primary(h::FOLLOW_UP_2));

    headers
}
