//! Walk-in record model and API payloads

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::loose;
use super::options::DropdownCatalog;
use crate::sheet::SheetRow;

/// `latestStatus` given to drafts that carry none
pub const DRAFT_STATUS: &str = "Draft - In Progress";
/// `grade` given to drafts that carry none
pub const DRAFT_GRADE: &str = "Draft";
/// `latestStatus` of a completed submission that carries none
pub const DEFAULT_STATUS: &str = "New";

/// One follow-up contact note
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FollowUp {
    #[serde(deserialize_with = "loose::opt_string")]
    pub date: Option<String>,
    #[serde(deserialize_with = "loose::string")]
    pub detail: String,
}

/// Walk-in customer visit entry as exchanged with the browser form (camelCase JSON)
///
/// Every field is optional on the wire; drafts may carry almost nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WalkInForm {
    // Visit context
    #[serde(deserialize_with = "loose::opt_string", skip_serializing_if = "Option::is_none")]
    pub no: Option<String>,
    #[serde(deserialize_with = "loose::opt_string", skip_serializing_if = "Option::is_none")]
    pub running_number: Option<String>,
    #[serde(deserialize_with = "loose::opt_string", skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
    #[serde(deserialize_with = "loose::opt_string", skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    #[serde(deserialize_with = "loose::opt_string", skip_serializing_if = "Option::is_none")]
    pub visit_date: Option<String>,
    #[serde(deserialize_with = "loose::opt_string", skip_serializing_if = "Option::is_none")]
    pub sales_queue: Option<String>,
    #[serde(deserialize_with = "loose::opt_string", skip_serializing_if = "Option::is_none")]
    pub walk_in_type: Option<String>,
    #[serde(deserialize_with = "loose::opt_string", skip_serializing_if = "Option::is_none")]
    pub lead_from_month: Option<String>,
    #[serde(deserialize_with = "loose::opt_string", skip_serializing_if = "Option::is_none")]
    pub media_online: Option<String>,
    #[serde(deserialize_with = "loose::opt_string", skip_serializing_if = "Option::is_none")]
    pub media_offline: Option<String>,
    #[serde(deserialize_with = "loose::opt_string", skip_serializing_if = "Option::is_none")]
    pub pass_site_source: Option<String>,

    // Identity
    #[serde(deserialize_with = "loose::opt_string", skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(deserialize_with = "loose::opt_string", skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(deserialize_with = "loose::opt_string", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(deserialize_with = "loose::opt_string", skip_serializing_if = "Option::is_none")]
    pub line_id: Option<String>,
    #[serde(deserialize_with = "loose::opt_string", skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,

    // Location / work
    #[serde(deserialize_with = "loose::opt_string", skip_serializing_if = "Option::is_none")]
    pub residence_district: Option<String>,
    #[serde(deserialize_with = "loose::opt_string", skip_serializing_if = "Option::is_none")]
    pub residence_province: Option<String>,
    #[serde(deserialize_with = "loose::opt_string", skip_serializing_if = "Option::is_none")]
    pub work_district: Option<String>,
    #[serde(deserialize_with = "loose::opt_string", skip_serializing_if = "Option::is_none")]
    pub work_province: Option<String>,
    #[serde(deserialize_with = "loose::opt_string", skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(deserialize_with = "loose::opt_string", skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(deserialize_with = "loose::opt_string", skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
    /// Range label, number, or whatever structured value the income picker produced
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_income: Option<Value>,

    // Preference
    #[serde(deserialize_with = "loose::opt_string", skip_serializing_if = "Option::is_none")]
    pub room_type: Option<String>,
    #[serde(deserialize_with = "loose::opt_string", skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
    #[serde(deserialize_with = "loose::opt_string", skip_serializing_if = "Option::is_none")]
    pub decision_timeframe: Option<String>,
    #[serde(deserialize_with = "loose::opt_string", skip_serializing_if = "Option::is_none")]
    pub purchase_purpose: Option<String>,
    #[serde(deserialize_with = "loose::opt_string", skip_serializing_if = "Option::is_none")]
    pub main_route: Option<String>,
    #[serde(deserialize_with = "loose::opt_string", skip_serializing_if = "Option::is_none")]
    pub decision_factors: Option<String>,
    #[serde(deserialize_with = "loose::opt_string", skip_serializing_if = "Option::is_none")]
    pub decision_factors2: Option<String>,
    #[serde(deserialize_with = "loose::opt_list", skip_serializing_if = "Option::is_none")]
    pub interests: Option<Vec<String>>,
    #[serde(deserialize_with = "loose::opt_list", skip_serializing_if = "Option::is_none")]
    pub shopping_malls: Option<Vec<String>>,
    #[serde(deserialize_with = "loose::opt_list", skip_serializing_if = "Option::is_none")]
    pub promotion_interest: Option<Vec<String>>,
    #[serde(deserialize_with = "loose::opt_string", skip_serializing_if = "Option::is_none")]
    pub comparison_projects: Option<String>,

    // Assessment
    #[serde(deserialize_with = "loose::opt_string", skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(deserialize_with = "loose::opt_string", skip_serializing_if = "Option::is_none")]
    pub latest_status: Option<String>,
    #[serde(deserialize_with = "loose::opt_string", skip_serializing_if = "Option::is_none")]
    pub customer_details: Option<String>,
    #[serde(deserialize_with = "loose::opt_string", skip_serializing_if = "Option::is_none")]
    pub reason_not_booking: Option<String>,
    #[serde(deserialize_with = "loose::opt_string", skip_serializing_if = "Option::is_none")]
    pub reason_not_booking_detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_ups: Option<Vec<FollowUp>>,

    // Submission metadata
    #[serde(deserialize_with = "loose::opt_bool", skip_serializing_if = "Option::is_none")]
    pub is_draft: Option<bool>,
    #[serde(deserialize_with = "loose::opt_u32", skip_serializing_if = "Option::is_none")]
    pub completed_steps: Option<u32>,
    #[serde(deserialize_with = "loose::opt_string", skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

macro_rules! merge_present {
    ($target:expr, $patch:expr; $($field:ident),+ $(,)?) => {
        $(
            if $patch.$field.is_some() {
                $target.$field = $patch.$field;
            }
        )+
    };
}

impl WalkInForm {
    pub fn is_draft(&self) -> bool {
        self.is_draft == Some(true)
    }

    /// Shallow merge: every field present in `patch` replaces the current value
    pub fn merge(&mut self, patch: WalkInForm) {
        merge_present!(self, patch;
            no, running_number, record_id, month, visit_date, sales_queue,
            walk_in_type, lead_from_month, media_online, media_offline,
            pass_site_source, full_name, phone_number, email, line_id, age,
            residence_district, residence_province, work_district, work_province,
            company, position, occupation, monthly_income, room_type, budget,
            decision_timeframe, purchase_purpose, main_route, decision_factors,
            decision_factors2, interests, shopping_malls, promotion_interest,
            comparison_projects, grade, latest_status, customer_details,
            reason_not_booking, reason_not_booking_detail, follow_ups, is_draft,
            completed_steps, last_updated,
        );
    }

    /// Cell text for the monthly income column.
    ///
    /// Lists are joined with `,`; objects are written as compact JSON.
    pub fn monthly_income_text(&self) -> String {
        match &self.monthly_income {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(Value::Array(items)) => items
                .iter()
                .map(|v| match v {
                    Value::String(s) => s.clone(),
                    Value::Null => String::new(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(","),
            Some(other) => other.to_string(),
        }
    }

    /// Replace a structured monthly income with its cell text
    pub fn normalize_monthly_income(&mut self) {
        if let Some(value) = &self.monthly_income
            && !value.is_string()
            && !value.is_null()
        {
            self.monthly_income = Some(Value::String(self.monthly_income_text()));
        }
    }

    /// Running number carried by an update payload: `no`, then
    /// `runningNumber`, then `recordId`; the first that is a positive integer.
    pub fn resolve_running_number(&self) -> Option<u64> {
        [&self.no, &self.running_number, &self.record_id]
            .into_iter()
            .flatten()
            .find_map(|s| parse_running_number(s))
    }
}

/// Positive integer, tolerating a trailing `.0` from numeric JSON
pub fn parse_running_number(s: &str) -> Option<u64> {
    let s = s.trim();
    let s = s.strip_suffix(".0").unwrap_or(s);
    s.parse::<u64>().ok().filter(|n| *n > 0)
}

// ========== API payloads ==========

/// Projection of an existing row matched by phone number
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerMatch {
    /// 1-based sheet row
    pub row_number: u64,
    /// Column F, falling back to column A
    pub running_number: String,
    pub full_name: String,
    pub phone_number: String,
    pub email: String,
    pub line_id: String,
    pub age: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitData {
    /// Sheet row written, when the append response reported it
    pub row_number: Option<u64>,
    pub existing_customer: Option<CustomerMatch>,
    pub is_draft: bool,
}

/// `POST /api/walkin/submit` success body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub message: String,
    pub data: SubmitData,
}

/// `POST /api/walkin/update` success body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResponse {
    pub success: bool,
    pub message: String,
    pub row_number: u64,
}

/// `GET /api/walkin/check-customer` body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerCheckResponse {
    pub success: bool,
    pub exists: bool,
    pub customer: Option<CustomerMatch>,
}

/// `GET /api/walkin/entries` body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntriesResponse {
    pub success: bool,
    pub data: Vec<SheetRow>,
}

/// `GET /api/walkin/dropdown-options` body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropdownOptionsResponse {
    pub success: bool,
    pub options: DropdownCatalog,
    pub last_updated: String,
}

/// `GET /api/walkin/test-connection` body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionResponse {
    pub success: bool,
    pub message: String,
    pub timestamp: String,
}

/// `GET /api/health` body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub service: String,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_loose_inputs() {
        let form: WalkInForm = serde_json::from_value(json!({
            "no": 12,
            "age": 35,
            "budget": "3-4M",
            "interests": "Pool, Gym , ",
            "shoppingMalls": ["Terminal 21", " EmQuartier "],
            "promotionInterest": null,
            "isDraft": true,
            "completedSteps": "3",
            "monthlyIncome": {"min": 50000, "max": 80000}
        }))
        .unwrap();
        assert_eq!(form.no.as_deref(), Some("12"));
        assert_eq!(form.age.as_deref(), Some("35"));
        assert_eq!(form.budget.as_deref(), Some("3-4M"));
        assert_eq!(form.interests, Some(vec!["Pool".to_string(), "Gym".to_string()]));
        assert_eq!(
            form.shopping_malls,
            Some(vec!["Terminal 21".to_string(), "EmQuartier".to_string()])
        );
        assert_eq!(form.promotion_interest, None);
        assert!(form.is_draft());
        assert_eq!(form.completed_steps, Some(3));
        assert!(form.monthly_income.as_ref().unwrap().is_object());
    }

    #[test]
    fn test_only_bool_marks_a_draft() {
        for value in [json!("true"), json!(1), json!("yes"), Value::Null] {
            let form: WalkInForm = serde_json::from_value(json!({ "isDraft": value })).unwrap();
            assert!(!form.is_draft(), "{value} should not mark a draft");
        }
        let form: WalkInForm = serde_json::from_value(json!({ "isDraft": true })).unwrap();
        assert!(form.is_draft());
    }

    #[test]
    fn test_serialize_camel_case_and_skips_absent() {
        let form = WalkInForm {
            full_name: Some("Somchai".into()),
            walk_in_type: Some("Appointment".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(&form).unwrap();
        assert_eq!(json, json!({"fullName": "Somchai", "walkInType": "Appointment"}));
    }

    #[test]
    fn test_merge_is_shallow() {
        let mut form = WalkInForm {
            full_name: Some("Somchai".into()),
            grade: Some("B".into()),
            interests: Some(vec!["Pool".into()]),
            ..Default::default()
        };
        form.merge(WalkInForm {
            grade: Some("A (Potential)".into()),
            interests: Some(vec![]),
            ..Default::default()
        });
        assert_eq!(form.full_name.as_deref(), Some("Somchai"));
        assert_eq!(form.grade.as_deref(), Some("A (Potential)"));
        assert_eq!(form.interests, Some(vec![]));
    }

    #[test]
    fn test_monthly_income_text() {
        let mut form = WalkInForm {
            monthly_income: Some(json!(45000)),
            ..Default::default()
        };
        assert_eq!(form.monthly_income_text(), "45000");

        form.monthly_income = Some(json!(["50,001", "80,000"]));
        form.normalize_monthly_income();
        assert_eq!(form.monthly_income, Some(json!("50,001,80,000")));

        form.monthly_income = Some(json!("30,000 - 50,000"));
        form.normalize_monthly_income();
        assert_eq!(form.monthly_income_text(), "30,000 - 50,000");
    }

    #[test]
    fn test_resolve_running_number_order() {
        let form = WalkInForm {
            no: Some("abc".into()),
            running_number: Some("14".into()),
            record_id: Some("9".into()),
            ..Default::default()
        };
        assert_eq!(form.resolve_running_number(), Some(14));

        let form = WalkInForm {
            record_id: Some("9".into()),
            ..Default::default()
        };
        assert_eq!(form.resolve_running_number(), Some(9));
        assert_eq!(WalkInForm::default().resolve_running_number(), None);
    }

    #[test]
    fn test_parse_running_number() {
        assert_eq!(parse_running_number(" 7 "), Some(7));
        assert_eq!(parse_running_number("7.0"), Some(7));
        assert_eq!(parse_running_number("0"), None);
        assert_eq!(parse_running_number("-2"), None);
        assert_eq!(parse_running_number(""), None);
    }

    #[test]
    fn test_check_response_serializes_null_customer() {
        let body = CustomerCheckResponse {
            success: true,
            exists: false,
            customer: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, json!({"success": true, "exists": false, "customer": null}));
    }
}
