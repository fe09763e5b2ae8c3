//! Static dropdown catalog

use serde::{Deserialize, Serialize};

/// One selectable value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropdownOption {
    pub value: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl DropdownOption {
    fn plain(value: &str) -> Self {
        Self::labeled(value, value)
    }

    fn labeled(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
            description: None,
        }
    }

    fn described(value: &str, label: &str, description: &str) -> Self {
        Self {
            description: Some(description.to_string()),
            ..Self::labeled(value, label)
        }
    }
}

/// Option lists for the form's select fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropdownCatalog {
    pub sales_queue: Vec<DropdownOption>,
    pub walk_in_type: Vec<DropdownOption>,
    pub media_online: Vec<DropdownOption>,
    pub media_offline: Vec<DropdownOption>,
    pub pass_site_source: Vec<DropdownOption>,
    pub grade: Vec<DropdownOption>,
}

impl DropdownCatalog {
    /// The catalog served by `GET /api/walkin/dropdown-options`
    pub fn standard() -> Self {
        let plain = |values: &[&str]| -> Vec<DropdownOption> {
            values.iter().map(|v| DropdownOption::plain(v)).collect()
        };
        Self {
            sales_queue: plain(&["A", "Lukpla", "Pare"]),
            walk_in_type: vec![
                DropdownOption::labeled("Appointment", "Appointment (นัดหมาย)"),
                DropdownOption::labeled("Pass site", "Pass Site (มีโอกาสเดินทางผ่านโครงการ)"),
                DropdownOption::labeled("re visit", "Re visit (มาอีกรอบ)"),
            ],
            media_online: plain(&[
                "Website SENA",
                "Facebook",
                "Youtube",
                "Instagram",
                "Google",
                "Line",
                "Blogger",
                "TikTok",
            ]),
            media_offline: plain(&[
                "ป้ายหน้าโครงการ",
                "ป้ายบอกทาง",
                "Billboard",
                "ใบปลิว",
                "SMS",
                "รถ MuvMi",
                "เพื่อนแนะนำ",
                "มีโอกาสเดินทางผ่านโครงการ",
                "ลูกค้าส่วนตัว",
                "ป้ายโฆษณาเอกมัย14",
                "อื่นๆ",
            ]),
            pass_site_source: plain(&[
                "ป้ายหน้าโครงการ",
                "ป้ายบอกทาง",
                "ป้ายโฆษณาเอกมัย14",
                "Blogger",
                "Google",
                "Facebook",
                "Instagram",
                "Google Maps",
            ]),
            grade: vec![
                DropdownOption::described(
                    "A (Potential)",
                    "A (Potential)",
                    "มีศักยภาพสูง พร้อมตัดสินใจ",
                ),
                DropdownOption::described("B", "B (Interested)", "สนใจ แต่ยังไม่พร้อมตัดสินใจ"),
                DropdownOption::described("C", "C (Casual)", "ดูข้อมูลเบื้องต้น"),
                DropdownOption::described("F", "F (Dead)", "ไม่สนใจ หรือไม่มีศักยภาพ"),
            ],
        }
    }
}

/// Whether `value` is one of the option values
pub fn has_value(options: &[DropdownOption], value: &str) -> bool {
    options.iter().any(|o| o.value == value)
}

/// Status values that also count as the customer's reason for not booking
pub const NON_BOOKING_REASONS: &[&str] = &[
    "เทียบโครงการอื่น",
    "ปรึกษาครอบครัว",
    "ชะลอการซื้อ",
    "Dead - เปลี่ยนทำเล",
    "Dead - ไม่สนใจแล้ว",
    "Dead - ไม่ชอบรูปแบบโครงการ/เปลี่ยนใจซื้อบ้าน",
    "Dead - ซื้อที่อื่น",
    "Dead - เกินงบ",
    "Dead - คล้าย Survey",
    "Dead - เบอร์โทรติดต่อไม่ได้แล้ว",
    "Dead - ไม่ชอบ Auto Park",
    "ดูเฉยๆ ยังไม่มีแผนซื้อในปี 2568",
    "ระยะเวลาการก่อสร้างที่นานเกินไป",
    "คาดว่าติดปัญหาทางการเงิน",
    "กังวลเรื่องสินเชื่อ",
    "ดูเฉยๆไม่ได้มีแผนจะซื้อ",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_values() {
        let catalog = DropdownCatalog::standard();
        assert!(has_value(&catalog.sales_queue, "Lukpla"));
        assert!(has_value(&catalog.walk_in_type, "re visit"));
        assert!(!has_value(&catalog.walk_in_type, "Re visit"));
        assert_eq!(catalog.media_online.len(), 8);
        assert_eq!(catalog.media_offline.len(), 11);
        assert_eq!(catalog.grade[1].label, "B (Interested)");
    }

    #[test]
    fn test_catalog_serialization() {
        let json = serde_json::to_value(DropdownCatalog::standard()).unwrap();
        assert_eq!(json["walkInType"][1]["value"], "Pass site");
        assert_eq!(json["grade"][0]["description"], "มีศักยภาพสูง พร้อมตัดสินใจ");
        assert!(json["salesQueue"][0].get("description").is_none());
    }
}
