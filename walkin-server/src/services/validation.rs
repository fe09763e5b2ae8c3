//! Submission checks for non-draft walk-in forms

use shared::date::{DatePolicy, parse_date};
use shared::error::AppError;
use shared::models::WalkInForm;
use shared::validation::{is_blank, is_valid_email, is_valid_phone};

/// Check required fields and simple formats.
///
/// All failures are collected so the client can show them together.
pub fn validate_submission(form: &WalkInForm, policy: DatePolicy) -> Result<(), AppError> {
    let mut errors = Vec::new();

    if is_blank(&form.sales_queue) {
        errors.push("Sales Queue is required");
    }
    if is_blank(&form.walk_in_type) {
        errors.push("Walk-in Type is required");
    }
    if is_blank(&form.full_name) {
        errors.push("Full Name is required");
    }
    match form.phone_number.as_deref().map(str::trim) {
        None | Some("") => errors.push("Phone Number is required"),
        Some(phone) if !is_valid_phone(phone) => errors.push("Phone Number format is invalid"),
        Some(_) => {}
    }
    if is_blank(&form.grade) {
        errors.push("Grade is required");
    }
    if let Some(email) = form.email.as_deref()
        && !email.is_empty()
        && !is_valid_email(email)
    {
        errors.push("Email format is invalid");
    }
    if let Some(date) = form.visit_date.as_deref()
        && !date.trim().is_empty()
        && parse_date(date, policy).is_none()
    {
        errors.push("Visit Date format is invalid");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::validation_errors(
            errors.into_iter().map(String::from).collect(),
        ))
    }
}
