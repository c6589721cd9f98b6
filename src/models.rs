use std::fmt;
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_photo: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(alias = "user")]
    pub admin: Admin,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileUpdateResponse {
    pub admin: Admin,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub enrollment_number: String,
    #[serde(default)]
    pub dob: String,
    #[serde(default)]
    pub mobile: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub branch: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub year: String,
    #[serde(default)]
    pub college: String,
    #[serde(default)]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
    pub name: String,
    pub enrollment_number: String,
    pub dob: String,
    pub mobile: String,
    pub email: String,
    pub branch: String,
    pub year: String,
    pub college: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Officer {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mobile: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub designation: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub total_claimed: u64,
}

/// Body of officer create and update. A blank password is left out so an
/// edit keeps the current one.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OfficerForm {
    pub name: String,
    pub mobile: String,
    pub email: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub password: String,
    pub designation: String,
    pub department: String,
}

impl OfficerForm {
    pub fn from_officer(officer: &Officer) -> Self {
        OfficerForm {
            name: officer.name.clone(),
            mobile: officer.mobile.clone(),
            email: officer.email.clone(),
            password: String::new(),
            designation: officer.designation.clone(),
            department: officer.department.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrievanceStatus {
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Resolved,
    Rejected,
}

impl GrievanceStatus {
    pub const ALL: [GrievanceStatus; 4] = [
        GrievanceStatus::Pending,
        GrievanceStatus::InProgress,
        GrievanceStatus::Resolved,
        GrievanceStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GrievanceStatus::Pending => "Pending",
            GrievanceStatus::InProgress => "In Progress",
            GrievanceStatus::Resolved => "Resolved",
            GrievanceStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for GrievanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRef {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub enrollment_number: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct OfficerRef {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub department: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grievance {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub description: String,
    pub status: GrievanceStatus,
    #[serde(default, deserialize_with = "populated_ref")]
    pub student_id: Option<StudentRef>,
    #[serde(default, deserialize_with = "populated_ref")]
    pub handled_by: Option<OfficerRef>,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub attachment: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Grievance {
    /// Last six characters of the id, the way grievances are referred to in
    /// tables.
    pub fn short_id(&self) -> &str {
        let start = self.id.len().saturating_sub(6);
        self.id.get(start..).unwrap_or(&self.id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct ActivityStats {
    #[serde(default)]
    pub active: u64,
    #[serde(default)]
    pub inactive: u64,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrievanceStats {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub pending: u64,
    #[serde(default)]
    pub in_progress: u64,
    #[serde(default)]
    pub resolved: u64,
    #[serde(default)]
    pub rejected: u64,
}

/// Page position as reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub current_page: u32,
    pub total_pages: u32,
}

impl Default for PageInfo {
    fn default() -> Self {
        PageInfo { current_page: 1, total_pages: 1 }
    }
}

impl PageInfo {
    pub fn new(current_page: u32, total_pages: u32) -> Self {
        PageInfo {
            current_page: current_page.max(1),
            total_pages: total_pages.max(1),
        }
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentPage {
    #[serde(default)]
    pub students: Vec<Student>,
    #[serde(default)]
    pub stats: ActivityStats,
    #[serde(default)]
    pub current_page: u32,
    #[serde(default)]
    pub total_pages: u32,
}

impl StudentPage {
    pub fn page_info(&self) -> PageInfo {
        PageInfo::new(self.current_page, self.total_pages)
    }
}

/// Older backends answer the student list with a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum StudentListBody {
    Paged(StudentPage),
    Bare(Vec<Student>),
}

impl From<StudentListBody> for StudentPage {
    fn from(body: StudentListBody) -> Self {
        match body {
            StudentListBody::Paged(page) => page,
            StudentListBody::Bare(students) => StudentPage {
                students,
                ..StudentPage::default()
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfficerPage {
    #[serde(default)]
    pub officers: Vec<Officer>,
    #[serde(default)]
    pub stats: ActivityStats,
    #[serde(default)]
    pub current_page: u32,
    #[serde(default)]
    pub total_pages: u32,
}

impl OfficerPage {
    pub fn page_info(&self) -> PageInfo {
        PageInfo::new(self.current_page, self.total_pages)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfficerStats {
    #[serde(default)]
    pub claimed: u64,
    #[serde(default)]
    pub in_progress: u64,
    #[serde(default)]
    pub resolved: u64,
    #[serde(default)]
    pub rejected: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OfficerDetail {
    pub officer: Officer,
    #[serde(default)]
    pub stats: OfficerStats,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrievancePage {
    #[serde(default)]
    pub grievances: Vec<Grievance>,
    #[serde(default)]
    pub stats: GrievanceStats,
    #[serde(default)]
    pub current_page: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_items: u64,
}

impl GrievancePage {
    pub fn page_info(&self) -> PageInfo {
        PageInfo::new(self.current_page, self.total_pages)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct HeadCount {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub active: u64,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct DashboardTotals {
    #[serde(default)]
    pub students: HeadCount,
    #[serde(default)]
    pub officers: HeadCount,
    #[serde(default)]
    pub grievances: GrievanceStats,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendSeries {
    #[serde(default)]
    pub pending: Vec<u64>,
    #[serde(default)]
    pub in_progress: Vec<u64>,
    #[serde(default)]
    pub resolved: Vec<u64>,
    #[serde(default)]
    pub rejected: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct TrendChart {
    #[serde(default)]
    pub months: Vec<String>,
    #[serde(default)]
    pub series: TrendSeries,
}

/// One month of the trend, all four statuses side by side.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub month: String,
    pub counts: [u64; 4],
}

impl TrendChart {
    /// Zips the parallel series into per-month points. Missing entries count
    /// as zero.
    pub fn points(&self) -> Vec<TrendPoint> {
        let at = |series: &[u64], i: usize| series.get(i).copied().unwrap_or(0);
        self.months
            .iter()
            .enumerate()
            .map(|(i, month)| TrendPoint {
                month: month.clone(),
                counts: [
                    at(&self.series.pending, i),
                    at(&self.series.in_progress, i),
                    at(&self.series.resolved, i),
                    at(&self.series.rejected, i),
                ],
            })
            .collect()
    }

    pub fn peak(&self) -> u64 {
        self.points()
            .iter()
            .flat_map(|p| p.counts)
            .max()
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    #[serde(default)]
    pub stats: DashboardTotals,
    #[serde(default)]
    pub chart: TrendChart,
    #[serde(default)]
    pub recent_grievances: Vec<Grievance>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct ImportCounts {
    #[serde(default)]
    pub imported: u64,
    #[serde(default)]
    pub skipped: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct BulkCreateResponse {
    #[serde(default)]
    pub results: ImportCounts,
}

pub type ImportRecord = Map<String, Value>;

/// ISO timestamp → `19 Oct 2026`. Anything unparsable is shown as is.
pub fn display_date(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%d %b %Y").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%d %b %Y").to_string();
    }
    raw.to_string()
}

fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// References come populated as objects; an unpopulated id string or null is
/// treated as absent.
fn populated_ref<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Object(map) => serde_json::from_value(Value::Object(map))
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pagination_bounds() {
        let first = PageInfo::new(1, 3);
        assert!(!first.has_previous());
        assert!(first.has_next());

        let middle = PageInfo::new(2, 3);
        assert!(middle.has_previous() && middle.has_next());

        let last = PageInfo::new(3, 3);
        assert!(last.has_previous());
        assert!(!last.has_next());

        let only = PageInfo::new(0, 0);
        assert_eq!(only, PageInfo::default());
        assert!(!only.has_previous() && !only.has_next());
    }

    #[test]
    fn grievance_with_populated_refs() {
        let raw = json!({
            "_id": "665f1c2ab81e4a0012345678",
            "subject": "Hostel water supply",
            "description": "No water since Monday",
            "status": "In Progress",
            "studentId": { "_id": "s1", "name": "Abhay", "enrollmentNumber": "EN123456" },
            "handledBy": { "_id": "o1", "name": "R. Sharma", "department": "Hostel" },
            "deadline": "2026-10-25T00:00:00.000Z",
            "createdAt": "2026-10-18T09:30:00.000Z"
        });
        let g: Grievance = serde_json::from_value(raw).unwrap();
        assert_eq!(g.status, GrievanceStatus::InProgress);
        assert_eq!(g.student_id.as_ref().unwrap().enrollment_number, "EN123456");
        assert_eq!(g.handled_by.as_ref().unwrap().department, "Hostel");
        assert_eq!(g.short_id(), "345678");
    }

    #[test]
    fn unassigned_grievance() {
        let raw = json!({
            "_id": "g2",
            "subject": "Library",
            "status": "Pending",
            "studentId": "s9",
            "handledBy": null
        });
        let g: Grievance = serde_json::from_value(raw).unwrap();
        assert!(g.student_id.is_none());
        assert!(g.handled_by.is_none());
        assert_eq!(g.short_id(), "g2");
    }

    #[test]
    fn student_list_accepts_bare_array() {
        let body: StudentListBody = serde_json::from_value(json!([
            { "_id": "a", "name": "One", "isActive": true, "year": 3 },
        ]))
        .unwrap();
        let page = StudentPage::from(body);
        assert_eq!(page.students.len(), 1);
        assert_eq!(page.students[0].year, "3");
        assert_eq!(page.page_info(), PageInfo::default());
    }

    #[test]
    fn student_list_paged() {
        let body: StudentListBody = serde_json::from_value(json!({
            "students": [{ "_id": "a", "name": "One", "isActive": false }],
            "stats": { "active": 10, "inactive": 2, "total": 12 },
            "currentPage": 2,
            "totalPages": 2
        }))
        .unwrap();
        let page = StudentPage::from(body);
        assert_eq!(page.stats.total, 12);
        assert!(!page.page_info().has_next());
    }

    #[test]
    fn officer_form_drops_blank_password() {
        let form = OfficerForm {
            name: "Meera".into(),
            mobile: "9876543210".into(),
            ..OfficerForm::default()
        };
        let body = serde_json::to_value(&form).unwrap();
        assert!(body.get("password").is_none());

        let with_password = OfficerForm { password: "s3cret".into(), ..form };
        let body = serde_json::to_value(&with_password).unwrap();
        assert_eq!(body["password"], "s3cret");
    }

    #[test]
    fn trend_points_fill_missing_values() {
        let chart: TrendChart = serde_json::from_value(json!({
            "months": ["Aug", "Sep", "Oct"],
            "series": { "pending": [1, 2, 3], "inProgress": [0, 4], "resolved": [5], "rejected": [] }
        }))
        .unwrap();
        let points = chart.points();
        assert_eq!(points.len(), 3);
        assert_eq!(points[1].counts, [2, 4, 0, 0]);
        assert_eq!(points[2].counts, [3, 0, 0, 0]);
        assert_eq!(chart.peak(), 5);
    }

    #[test]
    fn dates_for_display() {
        assert_eq!(display_date("2026-10-18T09:30:00.000Z"), "18 Oct 2026");
        assert_eq!(display_date("2026-01-05"), "05 Jan 2026");
        assert_eq!(display_date("soon"), "soon");
    }
}
