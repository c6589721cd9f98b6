use std::path::PathBuf;
use iced_aw::date_picker::Date;
use crate::api::admin::PhotoUpload;
use crate::app::state::{FilterOption, OfficerField, StudentField};
use crate::debounce::Ticket;
use crate::error::ApiResult;
use crate::import::ImportPreview;
use crate::models::{
    Admin, BulkCreateResponse, DashboardData, Grievance, GrievancePage, LoginResponse,
    MessageResponse, Officer, OfficerDetail, OfficerPage, Student, StudentPage,
};

#[derive(Debug, Clone)]
pub enum Message {
    LoginPressed,
    LoggedIn(ApiResult<LoginResponse>),
    EmailChanged(String),
    PasswordChanged(String),
    //
    GoToDashboard,
    GoToStudents,
    GoToStudentImport,
    GoToOfficers,
    GoToGrievances,
    GoToProfile,
    GoToSettings,
    Logout,
    //
    ThemeSelected(&'static str),
    DismissToast(u64),
    Noop,
    //
    RefreshDashboard,
    DashboardLoaded(Ticket, ApiResult<DashboardData>),
    // Students
    StudentSearchChanged(String),
    StudentStatusFilter(FilterOption),
    StudentPageChanged(u32),
    StudentsDebounced(Ticket),
    StudentsLoaded(Ticket, ApiResult<StudentPage>),
    ToggleStudentStatus(String),
    StudentStatusToggled(String, ApiResult<MessageResponse>),
    ViewStudent(Student),
    CloseStudentView,
    OpenCreateStudent,
    CloseCreateStudent,
    NewStudentField(StudentField, String),
    ChooseStudentDob,
    SubmitStudentDob(Date),
    CancelStudentDob,
    SubmitNewStudent,
    StudentCreated(ApiResult<MessageResponse>),
    DownloadSample,
    SampleSaved(ApiResult<Option<PathBuf>>),
    UploadExcel,
    ExcelUploaded(ApiResult<Option<MessageResponse>>),
    // Import preview
    ChooseImportFile,
    ImportFileRead(ApiResult<Option<(String, ImportPreview)>>),
    TogglePreviewRow(usize),
    TogglePreviewAll,
    SubmitImport,
    ImportFinished(ApiResult<BulkCreateResponse>),
    ImportReturn,
    // Officers
    OfficerSearchChanged(String),
    OfficerStatusFilter(FilterOption),
    OfficerPageChanged(u32),
    OfficersDebounced(Ticket),
    OfficersLoaded(Ticket, ApiResult<OfficerPage>),
    ToggleOfficerStatus(String),
    OfficerStatusToggled(String, ApiResult<MessageResponse>),
    OpenCreateOfficer,
    EditOfficer(Officer),
    CloseOfficerForm,
    OfficerFieldChanged(OfficerField, String),
    SubmitOfficerForm,
    OfficerSaved(ApiResult<MessageResponse>),
    AskDeleteOfficer(Officer),
    CancelDeleteOfficer,
    ConfirmDeleteOfficer,
    OfficerDeleted(ApiResult<MessageResponse>),
    // Officer detail
    OpenOfficer(String),
    OfficerDetailLoaded(String, ApiResult<OfficerDetail>),
    OfficerGrievanceStatus(FilterOption),
    OfficerGrievancePage(u32),
    OfficerGrievancesLoaded(Ticket, ApiResult<GrievancePage>),
    // Grievances
    GrievanceSearchChanged(String),
    GrievanceStatusFilter(FilterOption),
    GrievancePageChanged(u32),
    GrievancesDebounced(Ticket),
    GrievancesLoaded(Ticket, ApiResult<GrievancePage>),
    OpenGrievance(Grievance),
    BackFromGrievance,
    ShowGrievanceStudent,
    GrievanceStudentLoaded(String, ApiResult<Student>),
    ShowGrievanceOfficer,
    GrievanceOfficerLoaded(String, ApiResult<OfficerDetail>),
    CloseGrievanceModals,
    OpenAttachment(String),
    // Profile
    ProfileNameChanged(String),
    ProfileEmailChanged(String),
    ProfilePasswordChanged(String),
    ChooseProfilePhoto,
    ProfilePhotoChosen(ApiResult<Option<PhotoUpload>>),
    SubmitProfile,
    ProfileSaved(ApiResult<Admin>),
    ProfilePhotoFetched(ApiResult<Vec<u8>>),
    AfterProfileSaved,
}
