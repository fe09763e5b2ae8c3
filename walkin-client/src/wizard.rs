//! Multi-step form state
//!
//! Reducers are pure: each takes the state by `&mut` and touches nothing
//! else. Navigation never validates; [`WizardState::prepare_submission`]
//! does, and only for non-draft submissions.

use chrono::{DateTime, Utc};
use shared::date::{DatePolicy, iso_timestamp, parse_date, to_iso_date};
use shared::models::{
    DEFAULT_STATUS, DRAFT_STATUS, DropdownCatalog, NON_BOOKING_REASONS, WalkInForm, has_value,
    parse_running_number,
};
use shared::util::leading_int;
use shared::validation::{
    MAX_AGE, MAX_NAME_LEN, MIN_AGE, MIN_NAME_LEN, is_blank, is_plain_phone, is_valid_email,
};

use crate::http::WalkInClient;
use crate::{ClientError, ClientResult};

/// Number of form steps (visit, customer, location/work, preferences, assessment)
pub const STEP_COUNT: usize = 5;
pub const LAST_STEP: usize = STEP_COUNT - 1;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WizardState {
    pub current_step: usize,
    pub form: WalkInForm,
    pub is_edit_mode: bool,
    pub is_view_mode: bool,
    pub editing_record_id: Option<String>,
}

/// Which endpoint a prepared payload goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Submit,
    Update,
}

/// Validated, normalized payload ready to send
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub endpoint: Endpoint,
    pub form: WalkInForm,
}

/// What the server reported for a sent submission
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitResult {
    Created { row_number: Option<u64>, is_draft: bool },
    Updated { row_number: u64 },
}

impl WizardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to the initial empty state
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Load a stored record for editing
    pub fn enter_edit_mode(&mut self, record_id: Option<String>, form: WalkInForm) {
        self.is_edit_mode = true;
        self.is_view_mode = false;
        self.editing_record_id = record_id;
        self.form = form;
        self.current_step = 0;
    }

    /// Load a stored record read-only
    pub fn enter_view_mode(&mut self, record_id: Option<String>, form: WalkInForm) {
        self.is_edit_mode = false;
        self.is_view_mode = true;
        self.editing_record_id = record_id;
        self.form = form;
        self.current_step = 0;
    }

    /// Shallow merge of edited fields.
    ///
    /// Setting the status to a known non-booking reason also fills in
    /// `reasonNotBooking`.
    pub fn merge_fields(&mut self, patch: WalkInForm) {
        let status = patch.latest_status.clone();
        self.form.merge(patch);
        if let Some(status) = status
            && NON_BOOKING_REASONS.contains(&status.as_str())
        {
            self.form.reason_not_booking = Some(status);
        }
    }

    pub fn set_step(&mut self, step: usize) {
        self.current_step = step.min(LAST_STEP);
    }

    pub fn next_step(&mut self) {
        self.set_step(self.current_step + 1);
    }

    pub fn prev_step(&mut self) {
        self.current_step = self.current_step.saturating_sub(1);
    }

    /// Step-level checks for a final submit; empty when the form is complete
    pub fn validate(&self, catalog: &DropdownCatalog, policy: DatePolicy) -> Vec<String> {
        let form = &self.form;
        let mut errors = Vec::new();

        // Visit
        match form.visit_date.as_deref() {
            Some(d) if !d.trim().is_empty() => {
                if parse_date(d, policy).is_none() {
                    errors.push("Visit date is invalid".to_string());
                }
            }
            _ => errors.push("Visit date is required".to_string()),
        }
        match form.sales_queue.as_deref() {
            Some(v) if !v.trim().is_empty() => {
                if !has_value(&catalog.sales_queue, v) {
                    errors.push(format!("Unknown sales queue '{v}'"));
                }
            }
            _ => errors.push("Sales queue is required".to_string()),
        }
        match form.walk_in_type.as_deref() {
            Some(v) if !v.trim().is_empty() => {
                if !has_value(&catalog.walk_in_type, v) {
                    errors.push(format!("Unknown walk-in type '{v}'"));
                }
            }
            _ => errors.push("Walk-in type is required".to_string()),
        }

        // Customer
        match form.full_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => {
                let len = name.chars().count();
                if len < MIN_NAME_LEN {
                    errors.push(format!("Full name must be at least {MIN_NAME_LEN} characters"));
                } else if len > MAX_NAME_LEN {
                    errors.push(format!("Full name must be at most {MAX_NAME_LEN} characters"));
                }
            }
            _ => errors.push("Full name is required".to_string()),
        }
        match form.phone_number.as_deref().map(str::trim) {
            Some(phone) if !phone.is_empty() => {
                if !is_plain_phone(phone) {
                    errors.push("Phone number must be 9-10 digits".to_string());
                }
            }
            _ => errors.push("Phone number is required".to_string()),
        }
        if let Some(email) = form.email.as_deref()
            && !email.trim().is_empty()
            && !is_valid_email(email.trim())
        {
            errors.push("Email format is invalid".to_string());
        }
        if let Some(age) = form.age.as_deref().map(str::trim)
            && let Ok(age) = age.parse::<u32>()
            && !(MIN_AGE..=MAX_AGE).contains(&age)
        {
            errors.push(format!("Age must be between {MIN_AGE} and {MAX_AGE}"));
        }

        // Assessment
        if is_blank(&form.grade) {
            errors.push("Grade is required".to_string());
        }
        for (i, follow_up) in form.follow_ups.iter().flatten().enumerate() {
            if is_blank(&follow_up.date) || follow_up.detail.trim().is_empty() {
                errors.push(format!("Follow-up {} needs a date and a detail", i + 1));
            }
        }

        errors
    }

    /// Build the payload for a submit or draft save.
    ///
    /// Non-draft payloads must pass [`WizardState::validate`]. In edit mode the
    /// running number comes from `form.no`, then the record id, then
    /// `form.runningNumber`.
    pub fn prepare_submission(
        &self,
        is_draft: bool,
        catalog: &DropdownCatalog,
        policy: DatePolicy,
        now: DateTime<Utc>,
    ) -> ClientResult<Submission> {
        if !is_draft {
            let errors = self.validate(catalog, policy);
            if !errors.is_empty() {
                return Err(ClientError::Incomplete(errors));
            }
        }

        let mut form = self.form.clone();
        form.is_draft = Some(is_draft);
        form.completed_steps = Some(self.current_step as u32 + 1);
        form.last_updated = Some(iso_timestamp(now));
        form.latest_status = if is_draft {
            Some(DRAFT_STATUS.to_string())
        } else {
            Some(
                form.latest_status
                    .take()
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            )
        };
        convert_dates(&mut form, policy);

        if !self.is_edit_mode {
            return Ok(Submission {
                endpoint: Endpoint::Submit,
                form,
            });
        }

        let running_number = [
            form.no.as_deref(),
            self.editing_record_id.as_deref(),
            form.running_number.as_deref(),
        ]
        .into_iter()
        .flatten()
        .find_map(|candidate| {
            parse_running_number(candidate)
                .or_else(|| leading_int(candidate).filter(|n| *n > 0).map(|n| n as u64))
        })
        .ok_or(ClientError::MissingRunningNumber)?;
        form.no = Some(running_number.to_string());

        Ok(Submission {
            endpoint: Endpoint::Update,
            form,
        })
    }
}

/// Dates leave the client as `YYYY-MM-DD`; unparseable text is sent as entered
fn convert_dates(form: &mut WalkInForm, policy: DatePolicy) {
    let convert = |value: &mut Option<String>| {
        if let Some(iso) = value.as_deref().and_then(|d| to_iso_date(d, policy)) {
            *value = Some(iso);
        }
    };
    convert(&mut form.visit_date);
    for follow_up in form.follow_ups.iter_mut().flatten() {
        convert(&mut follow_up.date);
    }
}

/// Prepare and send the wizard's form.
///
/// Ambiguous dates follow the client's configured policy. The state is
/// cleared after a successful non-draft submission; drafts and failures leave
/// it untouched.
pub async fn submit_wizard(
    state: &mut WizardState,
    client: &WalkInClient,
    is_draft: bool,
    catalog: &DropdownCatalog,
) -> ClientResult<SubmitResult> {
    let submission =
        state.prepare_submission(is_draft, catalog, client.date_policy(), Utc::now())?;
    tracing::debug!(endpoint = ?submission.endpoint, is_draft, "Sending walk-in form");

    let result = match submission.endpoint {
        Endpoint::Submit => {
            let response = client.submit(&submission.form).await?;
            if !response.success {
                return Err(ClientError::InvalidResponse(response.message));
            }
            SubmitResult::Created {
                row_number: response.data.row_number,
                is_draft: response.data.is_draft,
            }
        }
        Endpoint::Update => {
            let response = client.update(&submission.form).await?;
            if !response.success {
                return Err(ClientError::InvalidResponse(response.message));
            }
            SubmitResult::Updated {
                row_number: response.row_number,
            }
        }
    };

    if !is_draft {
        state.clear();
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::FollowUp;

    fn catalog() -> DropdownCatalog {
        DropdownCatalog::standard()
    }

    fn complete_form() -> WalkInForm {
        WalkInForm {
            visit_date: Some("13/05/2024".into()),
            sales_queue: Some("Lukpla".into()),
            walk_in_type: Some("Appointment".into()),
            full_name: Some("Somchai Jaidee".into()),
            phone_number: Some("0812345678".into()),
            grade: Some("A".into()),
            ..Default::default()
        }
    }

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-05-14T09:30:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_navigation_is_clamped() {
        let mut state = WizardState::new();
        state.prev_step();
        assert_eq!(state.current_step, 0);
        for _ in 0..10 {
            state.next_step();
        }
        assert_eq!(state.current_step, LAST_STEP);
        state.set_step(99);
        assert_eq!(state.current_step, LAST_STEP);
    }

    #[test]
    fn test_modes_replace_form_and_reset_step() {
        let mut state = WizardState::new();
        state.merge_fields(WalkInForm {
            email: Some("old@example.com".into()),
            ..Default::default()
        });
        state.set_step(3);

        state.enter_edit_mode(Some("12".into()), complete_form());
        assert!(state.is_edit_mode);
        assert!(!state.is_view_mode);
        assert_eq!(state.current_step, 0);
        assert_eq!(state.form.email, None);

        state.enter_view_mode(Some("12".into()), complete_form());
        assert!(!state.is_edit_mode);
        assert!(state.is_view_mode);

        state.clear();
        assert_eq!(state, WizardState::default());
    }

    #[test]
    fn test_merge_fields_is_shallow() {
        let mut state = WizardState::new();
        state.merge_fields(complete_form());
        state.merge_fields(WalkInForm {
            grade: Some("B".into()),
            ..Default::default()
        });
        assert_eq!(state.form.grade.as_deref(), Some("B"));
        assert_eq!(state.form.full_name.as_deref(), Some("Somchai Jaidee"));
    }

    #[test]
    fn test_non_booking_status_fills_reason() {
        let mut state = WizardState::new();
        state.merge_fields(WalkInForm {
            latest_status: Some("Dead - เกินงบ".into()),
            ..Default::default()
        });
        assert_eq!(state.form.reason_not_booking.as_deref(), Some("Dead - เกินงบ"));

        state.merge_fields(WalkInForm {
            latest_status: Some("Booked".into()),
            ..Default::default()
        });
        assert_eq!(state.form.reason_not_booking.as_deref(), Some("Dead - เกินงบ"));
    }

    #[test]
    fn test_incomplete_form_blocks_submit_but_not_draft() {
        let mut state = WizardState::new();
        state.merge_fields(WalkInForm {
            full_name: Some("S".into()),
            phone_number: Some("081-234-5678".into()),
            age: Some("90".into()),
            ..Default::default()
        });

        let err = state
            .prepare_submission(false, &catalog(), DatePolicy::MonthFirst, now())
            .unwrap_err();
        let ClientError::Incomplete(errors) = err else {
            panic!("expected Incomplete");
        };
        assert!(errors.contains(&"Visit date is required".to_string()));
        assert!(errors.contains(&"Full name must be at least 2 characters".to_string()));
        assert!(errors.contains(&"Phone number must be 9-10 digits".to_string()));
        assert!(errors.contains(&"Age must be between 18 and 80".to_string()));

        let draft = state
            .prepare_submission(true, &catalog(), DatePolicy::MonthFirst, now())
            .unwrap();
        assert_eq!(draft.endpoint, Endpoint::Submit);
        assert_eq!(draft.form.is_draft, Some(true));
        assert_eq!(draft.form.latest_status.as_deref(), Some(DRAFT_STATUS));
    }

    #[test]
    fn test_catalog_membership_checked() {
        let mut state = WizardState::new();
        state.merge_fields(WalkInForm {
            sales_queue: Some("Nobody".into()),
            ..complete_form()
        });
        let errors = state.validate(&catalog(), DatePolicy::MonthFirst);
        assert_eq!(errors, vec!["Unknown sales queue 'Nobody'".to_string()]);
    }

    #[test]
    fn test_follow_ups_need_date_and_detail() {
        let mut state = WizardState::new();
        state.merge_fields(WalkInForm {
            follow_ups: Some(vec![
                FollowUp {
                    date: Some("2024-05-20".into()),
                    detail: "Called".into(),
                },
                FollowUp {
                    date: None,
                    detail: "No date".into(),
                },
            ]),
            ..complete_form()
        });
        let errors = state.validate(&catalog(), DatePolicy::MonthFirst);
        assert_eq!(errors, vec!["Follow-up 2 needs a date and a detail".to_string()]);
    }

    #[test]
    fn test_payload_fields() {
        let mut state = WizardState::new();
        state.merge_fields(complete_form());
        state.set_step(2);
        let submission = state
            .prepare_submission(false, &catalog(), DatePolicy::MonthFirst, now())
            .unwrap();
        let form = submission.form;
        assert_eq!(form.is_draft, Some(false));
        assert_eq!(form.completed_steps, Some(3));
        assert_eq!(form.last_updated.as_deref(), Some("2024-05-14T09:30:00.000Z"));
        assert_eq!(form.latest_status.as_deref(), Some(DEFAULT_STATUS));
        assert_eq!(form.visit_date.as_deref(), Some("2024-05-13"));
    }

    #[test]
    fn test_edit_mode_resolves_running_number() {
        let mut state = WizardState::new();
        state.enter_edit_mode(Some("15".into()), complete_form());
        let submission = state
            .prepare_submission(false, &catalog(), DatePolicy::MonthFirst, now())
            .unwrap();
        assert_eq!(submission.endpoint, Endpoint::Update);
        assert_eq!(submission.form.no.as_deref(), Some("15"));

        state.enter_edit_mode(None, complete_form());
        assert!(matches!(
            state.prepare_submission(false, &catalog(), DatePolicy::MonthFirst, now()),
            Err(ClientError::MissingRunningNumber)
        ));
    }
}
