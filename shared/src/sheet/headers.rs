//! Header names used by the worksheet.
//!
//! Several columns were renamed over the sheet's lifetime; fields with more
//! than one entry list the current name first followed by older variants.
//! Some names carry a trailing space in the live sheet and must match exactly.

pub const NO: &[&str] = &["No.", "No"];
pub const MONTH: &[&str] = &["Month"];
pub const SALES_QUEUE: &[&str] = &["Sales Queue"];
pub const VISIT_DATE: &[&str] = &["DATE ( เข้าชมโครงการ )"];
pub const LEAD_FROM_MONTH: &[&str] = &["Lead จากเดือน ( Detail )"];
pub const MEDIA_ONLINE: &[&str] = &["สื่อ Online (แบบสอบถาม)"];
pub const MEDIA_OFFLINE: &[&str] = &["สื่อ Offline"];
pub const WALK_IN_TYPE: &[&str] = &["Walk-in Type"];
pub const PASS_SITE_SOURCE: &[&str] = &["สื่อ pass site จากไหน"];
pub const LATEST_STATUS: &[&str] = &["Status ล่าสุด ( เหตุผลที่ยังไม่ติดสินใจ )"];
pub const GRADE: &[&str] = &["Grade"];
pub const FULL_NAME: &[&str] = &["ชื่อ นามสกุล"];
pub const PHONE_NUMBER: &[&str] = &["หมายเลขโทรศัพท์"];
pub const EMAIL: &[&str] = &["Email"];
pub const LINE_ID: &[&str] = &["Line ID"];
pub const AGE: &[&str] = &["อายุ ( เลือกอายุ )"];
pub const RESIDENCE_DISTRICT: &[&str] = &["เขตที่อยู่ปัจจุบัน"];
pub const RESIDENCE_PROVINCE: &[&str] = &["จังหวัดที่อยู่"];
pub const WORK_DISTRICT: &[&str] = &["เขตที่ทำงาน"];
pub const WORK_PROVINCE: &[&str] = &["จังหวัดที่ทำงาน"];
pub const COMPANY: &[&str] = &["บริษัทที่ทำงาน"];
pub const POSITION: &[&str] = &["ตำแหน่ง"];
pub const OCCUPATION: &[&str] = &["อาชีพ"];
pub const MONTHLY_INCOME: &[&str] = &["รายได้ต่อเดือน ", "รายได้ต่อเดือน"];
pub const ROOM_TYPE: &[&str] = &["รูปแบบห้องที่ต้องการ "];
pub const BUDGET: &[&str] = &["งบประมาณในการซื้อ"];
pub const DECISION_TIMEFRAME: &[&str] = &["ระยะเวลาในการตัดสินใจ"];
pub const PURCHASE_PURPOSE: &[&str] = &["วัตถุประสงค์ในการซื้อ "];
pub const MAIN_ROUTE: &[&str] = &["เส้นทางหลักในการเดินทางมายังโครงการ"];
pub const DECISION_FACTORS: &[&str] = &["ปัจจัยที่มีผลต่อการตัดสินใจ"];
pub const DECISION_FACTORS_2: &[&str] = &["ปัจจัยที่มีผลต่อการตัดสินใจ 2"];
pub const INTERESTS: &[&str] = &["คุณมีความสนใจเรื่องใด"];
pub const SHOPPING_MALLS: &[&str] = &["ห้างสรรพสินค้าที่ชอปบ่อยๆ"];
pub const PROMOTION_INTEREST: &[&str] = &["โปรโมชั่นที่สนใจ"];
pub const COMPARISON_PROJECTS: &[&str] = &["โครงการเปรียบเทียบ"];
pub const CUSTOMER_DETAILS: &[&str] = &[
    "รายละเอียดลูกค้า",
    "รายละเอียดลูกค้า(AI)",
    "รายละเอียดลูกค้า (AI)",
];
pub const REASON_NOT_BOOKING: &[&str] = &["สรุปเหตุผลลูกค้าไม่จอง"];
pub const REASON_NOT_BOOKING_DETAIL: &[&str] = &["เหตุผลไม่จอง"];
pub const FOLLOW_UP_DATE: &[&str] = &["วันที่ "];
pub const FOLLOW_UP_1: &[&str] = &["Follow"];
pub const FOLLOW_UP_2: &[&str] = &["Follow 2"];

/// Headers the list view tries, in order, to find a row's running number
pub const RUNNING_NUMBER: &[&str] = &["No.", "No", "NO", "no", "Running Number", "RowId"];

/// Headers of the four annotation columns, compared after removing whitespace
/// and upper-casing
pub const AI_SUMMARY: [&str; 4] = ["AI1", "AI2", "AI3", "AI4"];

/// Primary header name (first entry of a fallback chain)
pub fn primary(chain: &'static [&'static str]) -> &'static str {
    chain[0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_is_first_variant() {
        assert_eq!(primary(NO), "No.");
        assert_eq!(primary(MONTHLY_INCOME), "รายได้ต่อเดือน ");
        assert_eq!(primary(CUSTOMER_DETAILS), "รายละเอียดลูกค้า");
    }
}
