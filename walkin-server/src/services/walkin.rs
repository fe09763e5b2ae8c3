//! Walk-in record service over a [`SheetBackend`]
//!
//! Each call is a plain read-then-write against the sheet. Running-number
//! allocation and update-by-lookup are not serialized across requests.

use std::sync::Arc;

use shared::date::{DatePolicy, iso_timestamp, month_name, now_iso, parse_instant};
use shared::error::{AppError, ErrorCode};
use shared::models::{
    CustomerMatch, DRAFT_GRADE, DRAFT_STATUS, WalkInForm, parse_running_number,
};
use shared::sheet::columns::{self, LAST_COLUMN};
use shared::sheet::{SheetRange, SheetRow, trailing_row_number};
use shared::util::{leading_int, normalize_phone};

use super::validation::validate_submission;
use crate::error::ServiceResult;
use crate::sheets::{SheetBackend, SpreadsheetInfo};

/// Where an appended record landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppendOutcome {
    /// 1-based sheet row, if the backend reported it
    pub row_number: Option<u64>,
    pub running_number: u64,
}

/// Result of a form submission
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    pub appended: AppendOutcome,
    pub existing_customer: Option<CustomerMatch>,
    pub is_draft: bool,
}

#[derive(Clone)]
pub struct WalkInService {
    backend: Arc<dyn SheetBackend>,
    sheet_name: String,
    date_policy: DatePolicy,
}

fn full_width() -> SheetRange {
    SheetRange::columns(0, LAST_COLUMN)
}

impl WalkInService {
    pub fn new(
        backend: Arc<dyn SheetBackend>,
        sheet_name: impl Into<String>,
        date_policy: DatePolicy,
    ) -> Self {
        Self {
            backend,
            sheet_name: sheet_name.into(),
            date_policy,
        }
    }

    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    // ========== Form-level operations ==========

    /// Validate (unless draft), enrich and append a submitted form
    pub async fn submit(&self, mut form: WalkInForm) -> ServiceResult<SubmitOutcome> {
        let is_draft = form.is_draft();
        if is_draft {
            tracing::info!("Saving draft, skipping validation");
        } else {
            validate_submission(&form, self.date_policy)?;
        }

        let existing_customer = match form.phone_number.as_deref().map(str::trim) {
            Some(phone) if !phone.is_empty() => match self.find_by_phone(phone).await {
                Ok(found) => found,
                Err(e) => {
                    tracing::warn!(error = ?e, "Existing customer lookup failed, continuing");
                    None
                }
            },
            _ => None,
        };
        if let Some(customer) = &existing_customer {
            tracing::info!(
                row_number = customer.row_number,
                running_number = %customer.running_number,
                "Submission matches an existing customer"
            );
        }

        self.normalize_visit_date(&mut form, true);
        if is_draft {
            if form.latest_status.as_deref().is_none_or(str::is_empty) {
                form.latest_status = Some(DRAFT_STATUS.to_string());
            }
            if form.grade.as_deref().is_none_or(str::is_empty) {
                form.grade = Some(DRAFT_GRADE.to_string());
            }
        }
        form.normalize_monthly_income();

        let appended = self.append_record(&form).await?;
        Ok(SubmitOutcome {
            appended,
            existing_customer,
            is_draft,
        })
    }

    /// Resolve the running number from the payload and overwrite that record.
    /// Returns the 1-based sheet row that was written.
    pub async fn update(&self, mut form: WalkInForm) -> ServiceResult<u64> {
        let running_number = form
            .resolve_running_number()
            .ok_or_else(|| AppError::new(ErrorCode::RunningNumberMissing))?;

        self.normalize_visit_date(&mut form, false);
        form.normalize_monthly_income();

        self.update_record(running_number, &form).await
    }

    /// Rewrite `visitDate` as an ISO-8601 UTC timestamp and derive `month`.
    /// With `default_now`, a missing date becomes the current time.
    fn normalize_visit_date(&self, form: &mut WalkInForm, default_now: bool) {
        let raw = form
            .visit_date
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty());
        match raw.map(|d| parse_instant(d, self.date_policy)) {
            Some(Some(instant)) => {
                form.month = Some(month_name(instant.date_naive()));
                form.visit_date = Some(iso_timestamp(instant));
            }
            Some(None) => {
                tracing::warn!(visit_date = ?form.visit_date, "Unparseable visit date kept as entered");
            }
            None if default_now => form.visit_date = Some(now_iso()),
            None => {}
        }
    }

    // ========== Sheet operations ==========

    /// Allocate the next running number and append the record as a full-width row
    pub async fn append_record(&self, form: &WalkInForm) -> ServiceResult<AppendOutcome> {
        let running_number = self.next_running_number().await?;

        let mut row = columns::build_row(form, self.date_policy);
        columns::set_running_number(&mut row, running_number);

        let updated_range = self.backend.append_row(full_width(), row).await?;
        let row_number = trailing_row_number(&updated_range);
        tracing::info!(
            running_number,
            updated_range = %updated_range,
            "Walk-in record appended"
        );

        Ok(AppendOutcome {
            row_number,
            running_number,
        })
    }

    /// Overwrite the record whose column F or column A holds `running_number`.
    ///
    /// Columns B..=E keep their stored values. Nothing is written when no row
    /// matches.
    pub async fn update_record(&self, running_number: u64, form: &WalkInForm) -> ServiceResult<u64> {
        let rows = self.backend.read_range(full_width()).await?;

        let found = rows.iter().enumerate().skip(1).find(|(_, row)| {
            [columns::RUNNING_NUMBER_F, columns::RUNNING_NUMBER_A]
                .iter()
                .filter_map(|&i| row.get(i))
                .any(|cell| parse_running_number(cell) == Some(running_number))
        });
        let Some((index, existing)) = found else {
            tracing::warn!(running_number, "Update target not found");
            return Err(AppError::record_not_found(running_number).into());
        };
        let row_number = index as u64 + 1;

        let mut row = columns::build_row(form, self.date_policy);
        columns::preserve_protected(&mut row, existing);
        columns::set_running_number(&mut row, running_number);

        self.backend
            .update_row(SheetRange::row(0, LAST_COLUMN, row_number), row)
            .await?;
        tracing::info!(running_number, row_number, "Walk-in record updated");

        Ok(row_number)
    }

    /// First data row whose phone column matches after normalization
    pub async fn find_by_phone(&self, phone: &str) -> ServiceResult<Option<CustomerMatch>> {
        let wanted = normalize_phone(phone);
        let rows = self.backend.read_range(full_width()).await?;

        let found = rows.iter().enumerate().skip(1).find(|(_, row)| {
            row.get(columns::PHONE_NUMBER)
                .is_some_and(|p| !p.is_empty() && normalize_phone(p) == wanted)
        });

        Ok(found.map(|(index, row)| {
            let cell = |i: usize| row.get(i).cloned().unwrap_or_default();
            let running_number = row
                .get(columns::RUNNING_NUMBER_F)
                .filter(|v| !v.is_empty())
                .or_else(|| row.get(columns::RUNNING_NUMBER_A))
                .cloned()
                .unwrap_or_default();
            CustomerMatch {
                row_number: index as u64 + 1,
                running_number,
                full_name: cell(columns::FULL_NAME),
                phone_number: cell(columns::PHONE_NUMBER),
                email: cell(columns::EMAIL),
                line_id: cell(columns::LINE_ID),
                age: cell(columns::AGE),
            }
        }))
    }

    /// Every data row keyed by the header row
    pub async fn list_all(&self) -> ServiceResult<Vec<SheetRow>> {
        let rows = self.backend.read_range(full_width()).await?;
        let Some((header, data)) = rows.split_first() else {
            return Ok(Vec::new());
        };
        Ok(data
            .iter()
            .map(|cells| SheetRow::from_cells(header, cells))
            .collect())
    }

    /// `max(column A, column F) + 1` over the data rows; 1 for an empty sheet
    pub async fn next_running_number(&self) -> ServiceResult<u64> {
        let (col_a, col_f) = tokio::try_join!(
            self.backend
                .read_range(SheetRange::column(columns::RUNNING_NUMBER_A)),
            self.backend
                .read_range(SheetRange::column(columns::RUNNING_NUMBER_F)),
        )?;

        let max_of = |rows: &[Vec<String>]| -> u64 {
            rows.iter()
                .skip(1)
                .filter_map(|row| row.first())
                .filter_map(|cell| leading_int(cell))
                .filter(|n| *n > 0)
                .map(|n| n as u64)
                .max()
                .unwrap_or(0)
        };
        let (max_a, max_f) = (max_of(&col_a), max_of(&col_f));
        let next = max_a.max(max_f) + 1;
        tracing::debug!(max_a, max_f, next, "Allocated running number");

        Ok(next)
    }

    /// Fetch spreadsheet metadata; warns when the worksheet is missing
    pub async fn test_connection(&self) -> ServiceResult<SpreadsheetInfo> {
        let info = self.backend.spreadsheet_info().await?;
        tracing::info!(
            title = %info.title,
            sheets = %info.sheet_titles.join(", "),
            "Spreadsheet reachable"
        );
        if !info.sheet_titles.iter().any(|t| *t == self.sheet_name) {
            tracing::warn!(
                sheet_name = %self.sheet_name,
                "Configured worksheet not found in spreadsheet"
            );
        }
        Ok(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheets::{MemorySheet, standard_headers};
    use shared::sheet::columns::COLUMN_COUNT;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn service_with(rows: Vec<Vec<String>>) -> (WalkInService, Arc<MemorySheet>) {
        let sheet = Arc::new(MemorySheet::with_rows("Walk-In", rows));
        let service = WalkInService::new(sheet.clone(), "Walk-In", DatePolicy::MonthFirst);
        (service, sheet)
    }

    fn row_with(cells: &[(usize, &str)]) -> Vec<String> {
        let mut row = vec![String::new(); COLUMN_COUNT];
        for (i, v) in cells {
            row[*i] = v.to_string();
        }
        row
    }

    #[tokio::test]
    async fn test_next_running_number_takes_max_of_a_and_f() {
        let (service, _) = service_with(vec![
            standard_headers(),
            row_with(&[(0, "5"), (5, "3")]),
            row_with(&[(0, "2"), (5, "7")]),
            row_with(&[(0, "abc")]),
        ]);
        assert_eq!(service.next_running_number().await.unwrap(), 8);
    }

    #[tokio::test]
    async fn test_next_running_number_empty_sheet() {
        let (service, _) = service_with(vec![]);
        assert_eq!(service.next_running_number().await.unwrap(), 1);
        let (service, _) = service_with(vec![standard_headers()]);
        assert_eq!(service.next_running_number().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_append_writes_running_number_twice() {
        let (service, sheet) = service_with(vec![standard_headers(), row_with(&[(0, "4"), (5, "4")])]);
        let form = WalkInForm {
            full_name: Some("Somchai".into()),
            ..Default::default()
        };
        let outcome = service.append_record(&form).await.unwrap();
        assert_eq!(outcome.running_number, 5);
        assert_eq!(outcome.row_number, Some(3));

        let rows = sheet.rows().await;
        assert_eq!(rows[2][0], "5");
        assert_eq!(rows[2][5], "5");
        assert_eq!(rows[2][columns::FULL_NAME], "Somchai");
        assert_eq!(rows[2].len(), COLUMN_COUNT);
    }

    #[tokio::test]
    async fn test_update_unknown_number_writes_nothing() {
        let (service, sheet) = service_with(vec![standard_headers(), row_with(&[(0, "1"), (5, "1")])]);
        let err = service
            .update_record(99, &WalkInForm::default())
            .await
            .unwrap_err();
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::RecordNotFound);
        assert_eq!(sheet.write_count(), 0);
    }

    #[tokio::test]
    async fn test_update_matches_column_a_when_f_blank() {
        let (service, sheet) = service_with(vec![
            standard_headers(),
            row_with(&[(0, "3"), (1, "ai")]),
        ]);
        let form = WalkInForm {
            grade: Some("C".into()),
            ..Default::default()
        };
        assert_eq!(service.update_record(3, &form).await.unwrap(), 2);
        let rows = sheet.rows().await;
        assert_eq!(rows[1][1], "ai");
        assert_eq!(rows[1][5], "3");
        assert_eq!(rows[1][columns::GRADE], "C");
    }

    #[tokio::test]
    async fn test_find_by_phone_normalizes_both_sides() {
        let (service, _) = service_with(vec![
            standard_headers(),
            row_with(&[(0, "1"), (5, "1"), (columns::PHONE_NUMBER, "02-111-2222")]),
            row_with(&[
                (0, "2"),
                (columns::FULL_NAME, "Somchai"),
                (columns::PHONE_NUMBER, "66812345678"),
            ]),
        ]);
        let found = service.find_by_phone("081-234-5678").await.unwrap().unwrap();
        assert_eq!(found.row_number, 3);
        assert_eq!(found.running_number, "2");
        assert_eq!(found.full_name, "Somchai");
        assert!(service.find_by_phone("0899999999").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_submit_draft_defaults_and_skips_validation() {
        let (service, sheet) = service_with(vec![standard_headers()]);
        let form = WalkInForm {
            is_draft: Some(true),
            full_name: Some("Draft person".into()),
            ..Default::default()
        };
        let outcome = service.submit(form).await.unwrap();
        assert!(outcome.is_draft);
        let rows = sheet.rows().await;
        assert_eq!(rows[1][columns::LATEST_STATUS], DRAFT_STATUS);
        assert_eq!(rows[1][columns::GRADE], DRAFT_GRADE);
        assert!(!rows[1][columns::VISIT_DATE].is_empty());
    }

    #[tokio::test]
    async fn test_submit_tolerates_lookup_failure_only_before_append() {
        let (service, sheet) = service_with(vec![standard_headers()]);
        sheet.set_offline(true);
        let form = WalkInForm {
            is_draft: Some(true),
            phone_number: Some("0812345678".into()),
            ..Default::default()
        };
        let err: AppError = service.submit(form).await.unwrap_err().into();
        assert_eq!(err.code, ErrorCode::SheetUnavailable);
    }

    #[tokio::test]
    async fn test_update_requires_running_number() {
        let (service, _) = service_with(vec![standard_headers()]);
        let err: AppError = service
            .update(WalkInForm::default())
            .await
            .unwrap_err()
            .into();
        assert_eq!(err.code, ErrorCode::RunningNumberMissing);
    }

    #[tokio::test]
    async fn test_list_all_keys_rows_by_header() {
        let (service, _) = service_with(vec![
            strings(&["No.", "Grade"]),
            strings(&["1", "A"]),
            strings(&["2"]),
        ]);
        let rows = service.list_all().await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("Grade"), Some("A"));
        assert_eq!(rows[1].get("Grade"), None);
    }

    #[tokio::test]
    async fn test_connection_reports_title() {
        let (service, _) = service_with(vec![]);
        let info = service.test_connection().await.unwrap();
        assert_eq!(info.sheet_titles, vec!["Walk-In".to_string()]);
    }
}
