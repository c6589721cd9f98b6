use std::fmt;
use std::path::PathBuf;
use iced::Theme;
use iced_aw::date_picker::Date;
use crate::api::admin::PhotoUpload;
use crate::api::ApiClient;
use crate::config::Config;
use crate::debounce::RequestTracker;
use crate::import::ImportPreview;
use crate::models::{
    DashboardData, Grievance, GrievancePage, NewStudent, OfficerDetail, OfficerForm, OfficerPage,
    Student, StudentPage,
};
use crate::session::{AuthSession, SessionStore};

pub const OFFICER_GRIEVANCE_LIMIT: u32 = 5;

pub struct App {
    pub config: Config,
    pub config_path: PathBuf,
    pub theme: Theme,
    pub api: ApiClient,
    pub store: Option<SessionStore>,
    pub session: Option<AuthSession>,
    //
    pub current_screen: Screen,
    pub toasts: Vec<Toast>,
    pub next_toast_id: u64,
    //
    pub login: LoginState,
    pub dashboard: DashboardState,
    pub students: StudentsState,
    pub import: ImportState,
    pub officers: OfficersState,
    pub officer_detail: OfficerDetailState,
    pub grievances: GrievancesState,
    pub grievance_detail: GrievanceDetailState,
    pub profile: ProfileState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Login,
    Dashboard,
    Students,
    StudentImport,
    Officers,
    OfficerDetail,
    Grievances,
    GrievanceDetail,
    Profile,
    Settings,
}

impl Screen {
    pub fn requires_session(&self) -> bool {
        !matches!(self, Screen::Login)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub text: String,
}

/// Entry of a filter dropdown: what the user sees and what goes into the
/// query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOption {
    pub label: &'static str,
    pub value: &'static str,
}

impl fmt::Display for FilterOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

pub const ACTIVITY_FILTERS: [FilterOption; 3] = [
    FilterOption { label: "All Status", value: "" },
    FilterOption { label: "Active Only", value: "true" },
    FilterOption { label: "Inactive Only", value: "false" },
];

pub const GRIEVANCE_FILTERS: [FilterOption; 5] = [
    FilterOption { label: "All Status", value: "" },
    FilterOption { label: "Pending", value: "Pending" },
    FilterOption { label: "In Progress", value: "In Progress" },
    FilterOption { label: "Resolved", value: "Resolved" },
    FilterOption { label: "Rejected", value: "Rejected" },
];

#[derive(Debug, Default)]
pub struct LoginState {
    pub email: String,
    pub password: String,
    pub error: Option<String>,
    pub submitting: bool,
}

#[derive(Debug, Default)]
pub struct DashboardState {
    pub tracker: RequestTracker,
    pub data: Option<DashboardData>,
    pub error: Option<String>,
}

#[derive(Debug)]
pub struct StudentsState {
    pub tracker: RequestTracker,
    pub data: StudentPage,
    pub search: String,
    pub status: FilterOption,
    pub page: u32,
    pub toggling_id: Option<String>,
    pub viewing: Option<Student>,
    pub create_form: Option<StudentFormState>,
    pub uploading: bool,
}

impl Default for StudentsState {
    fn default() -> Self {
        Self {
            tracker: RequestTracker::default(),
            data: StudentPage::default(),
            search: String::new(),
            status: ACTIVITY_FILTERS[0],
            page: 1,
            toggling_id: None,
            viewing: None,
            create_form: None,
            uploading: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentField {
    Name,
    EnrollmentNumber,
    Mobile,
    Email,
    Branch,
    Year,
    College,
}

#[derive(Debug)]
pub struct StudentFormState {
    pub student: NewStudent,
    pub dob: Date,
    pub show_picker: bool,
    pub submitting: bool,
    pub error: Option<String>,
}

impl Default for StudentFormState {
    fn default() -> Self {
        Self {
            student: NewStudent::default(),
            dob: Date::today(),
            show_picker: false,
            submitting: false,
            error: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct ImportState {
    pub preview: ImportPreview,
    pub file_name: Option<String>,
    pub reading: bool,
    pub importing: bool,
}

#[derive(Debug)]
pub struct OfficersState {
    pub tracker: RequestTracker,
    pub data: OfficerPage,
    pub search: String,
    pub status: FilterOption,
    pub page: u32,
    pub toggling_id: Option<String>,
    pub form: Option<OfficerFormState>,
    pub pending_delete: Option<crate::models::Officer>,
    pub deleting: bool,
}

impl Default for OfficersState {
    fn default() -> Self {
        Self {
            tracker: RequestTracker::default(),
            data: OfficerPage::default(),
            search: String::new(),
            status: ACTIVITY_FILTERS[0],
            page: 1,
            toggling_id: None,
            form: None,
            pending_delete: None,
            deleting: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfficerField {
    Name,
    Mobile,
    Email,
    Password,
    Designation,
    Department,
}

#[derive(Debug, Default)]
pub struct OfficerFormState {
    /// Id of the officer being edited; `None` while creating.
    pub editing: Option<String>,
    pub form: OfficerForm,
    pub submitting: bool,
    pub error: Option<String>,
}

#[derive(Debug)]
pub struct OfficerDetailState {
    pub officer_id: Option<String>,
    pub detail: Option<OfficerDetail>,
    pub loading_detail: bool,
    pub tracker: RequestTracker,
    pub grievances: GrievancePage,
    pub status: FilterOption,
    pub page: u32,
}

impl Default for OfficerDetailState {
    fn default() -> Self {
        Self {
            officer_id: None,
            detail: None,
            loading_detail: false,
            tracker: RequestTracker::default(),
            grievances: GrievancePage::default(),
            status: GRIEVANCE_FILTERS[0],
            page: 1,
        }
    }
}

#[derive(Debug)]
pub struct GrievancesState {
    pub tracker: RequestTracker,
    pub data: GrievancePage,
    pub search: String,
    pub status: FilterOption,
    pub page: u32,
}

impl Default for GrievancesState {
    fn default() -> Self {
        Self {
            tracker: RequestTracker::default(),
            data: GrievancePage::default(),
            search: String::new(),
            status: GRIEVANCE_FILTERS[0],
            page: 1,
        }
    }
}

#[derive(Debug, Default)]
pub struct GrievanceDetailState {
    pub grievance: Option<Grievance>,
    pub return_to: Screen,
    pub student: Option<Student>,
    pub officer: Option<OfficerDetail>,
    pub student_modal: bool,
    pub officer_modal: bool,
    pub fetching_student: bool,
    pub fetching_officer: bool,
}

#[derive(Debug, Default)]
pub struct ProfileState {
    pub name: String,
    pub email: String,
    pub password: String,
    pub photo: Option<PhotoUpload>,
    pub current_photo: Option<Vec<u8>>,
    pub saving: bool,
}
