use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use iced::Task;
use iced_aw::date_picker::Date;
use tokio::task::spawn_blocking;
use crate::api::admin::{self, PhotoUpload, ProfileUpdate};
use crate::api::{officer, student, ListQuery};
use crate::app::state::{
    ImportState, OfficerDetailState, OfficerField, OfficerFormState, Screen, StudentField,
    StudentFormState, ToastKind, OFFICER_GRIEVANCE_LIMIT,
};
use crate::config::{save_config, theme_from_str};
use crate::debounce::{self, Ticket};
use crate::error::{ApiError, ApiResult, Failure};
use crate::import::{read_workbook, write_sample_workbook};
use crate::models::{NewStudent, OfficerForm};
use crate::session::AuthSession;
use crate::validation;
use super::{App, Message};

const IMPORT_RETURN_DELAY: Duration = Duration::from_secs(2);
const PROFILE_RETURN_DELAY: Duration = Duration::from_secs(1);
/// The preview reader only understands `xlsx`; the server also takes `xls`.
const PREVIEW_EXTENSIONS: &[&str] = &["xlsx"];
const UPLOAD_EXTENSIONS: &[&str] = &["xlsx", "xls"];

impl App {
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::EmailChanged(v) => {
                self.login.email = v;
                Task::none()
            }
            Message::PasswordChanged(v) => {
                self.login.password = v;
                Task::none()
            }
            Message::LoginPressed => {
                if self.login.submitting {
                    return Task::none();
                }
                if let Err(msg) = validation::validate_login(&self.login.email, &self.login.password) {
                    self.login.error = Some(msg);
                    return Task::none();
                }
                self.login.error = None;
                self.login.submitting = true;
                let api = self.api.clone();
                let email = self.login.email.clone();
                let password = self.login.password.clone();
                Task::perform(
                    async move { admin::login(&api, &email, &password).await.map_err(Failure::from) },
                    Message::LoggedIn,
                )
            }
            Message::LoggedIn(result) => {
                self.login.submitting = false;
                match result {
                    Ok(response) => {
                        let session = AuthSession { token: response.token, admin: response.admin };
                        if let Some(store) = &self.store {
                            if let Err(err) = store.login(&session) {
                                log::error!("could not persist session: {err}");
                            }
                        }
                        log::info!("{} signed in", session.admin.email);
                        self.start_session(session)
                    }
                    Err(failure) => {
                        log::warn!("login failed: {}", failure.detail);
                        self.login.error = Some(failure.text("Login failed. Please check your credentials."));
                        Task::none()
                    }
                }
            }
            //
            Message::GoToDashboard => self.navigate(Screen::Dashboard),
            Message::GoToStudents => self.navigate(Screen::Students),
            Message::GoToStudentImport => {
                self.import = ImportState::default();
                self.navigate(Screen::StudentImport)
            }
            Message::GoToOfficers => self.navigate(Screen::Officers),
            Message::GoToGrievances => self.navigate(Screen::Grievances),
            Message::GoToProfile => self.navigate(Screen::Profile),
            Message::GoToSettings => self.navigate(Screen::Settings),
            Message::Logout => self.logout(),
            //
            Message::ThemeSelected(name) => {
                let Some(theme) = theme_from_str(name) else {
                    return Task::none();
                };
                self.theme = theme;
                self.config.theme_name = name.to_string();
                match save_config(&self.config_path, &self.config) {
                    Ok(()) => Task::none(),
                    Err(err) => {
                        log::error!("could not save {}: {err}", self.config_path.display());
                        self.toast(ToastKind::Error, "Could not save settings")
                    }
                }
            }
            Message::DismissToast(id) => {
                self.toasts.retain(|t| t.id != id);
                Task::none()
            }
            Message::Noop => Task::none(),
            //
            Message::RefreshDashboard => self.reload_dashboard(),
            Message::DashboardLoaded(ticket, result) => {
                if !self.dashboard.tracker.settle(ticket) {
                    return Task::none();
                }
                match result {
                    Ok(data) => {
                        self.dashboard.data = Some(data);
                        self.dashboard.error = None;
                        Task::none()
                    }
                    Err(failure) if failure.unauthorized => self.fail(&failure, "Failed to load dashboard data."),
                    Err(failure) => {
                        log::error!("dashboard: {}", failure.detail);
                        self.dashboard.error = Some(failure.text("Failed to load dashboard data."));
                        Task::none()
                    }
                }
            }
            // Students
            Message::StudentSearchChanged(search) => {
                self.students.search = search;
                self.students.page = 1;
                self.schedule_students()
            }
            Message::StudentStatusFilter(status) => {
                self.students.status = status;
                self.students.page = 1;
                self.schedule_students()
            }
            Message::StudentPageChanged(page) => {
                self.students.page = page.max(1);
                self.schedule_students()
            }
            Message::StudentsDebounced(ticket) => {
                if self.students.tracker.fire(ticket) {
                    self.fetch_students(ticket)
                } else {
                    Task::none()
                }
            }
            Message::StudentsLoaded(ticket, result) => {
                if !self.students.tracker.settle(ticket) {
                    return Task::none();
                }
                match result {
                    Ok(page) => {
                        self.students.data = page;
                        Task::none()
                    }
                    Err(failure) => self.fail(&failure, "Failed to fetch students"),
                }
            }
            Message::ToggleStudentStatus(id) => {
                if self.students.toggling_id.is_some() {
                    return Task::none();
                }
                self.students.toggling_id = Some(id.clone());
                let api = self.api.clone();
                Task::perform(
                    {
                        let id = id.clone();
                        async move { student::toggle_status(&api, &id).await.map_err(Failure::from) }
                    },
                    move |result| Message::StudentStatusToggled(id.clone(), result),
                )
            }
            Message::StudentStatusToggled(id, result) => {
                if self.students.toggling_id.as_deref() == Some(id.as_str()) {
                    self.students.toggling_id = None;
                }
                match result {
                    Ok(response) => {
                        let note = self.toast(ToastKind::Success, response.message.unwrap_or_else(|| "Status updated".into()));
                        Task::batch([note, self.reload_students()])
                    }
                    Err(failure) => self.fail(&failure, "Failed to update status"),
                }
            }
            Message::ViewStudent(s) => {
                self.students.viewing = Some(s);
                Task::none()
            }
            Message::CloseStudentView => {
                self.students.viewing = None;
                Task::none()
            }
            Message::OpenCreateStudent => {
                self.students.create_form = Some(StudentFormState::default());
                Task::none()
            }
            Message::CloseCreateStudent => {
                if !self.students.create_form.as_ref().is_some_and(|f| f.submitting) {
                    self.students.create_form = None;
                }
                Task::none()
            }
            Message::NewStudentField(field, value) => {
                if let Some(form) = &mut self.students.create_form {
                    set_student_field(&mut form.student, field, value);
                }
                Task::none()
            }
            Message::ChooseStudentDob => {
                if let Some(form) = &mut self.students.create_form {
                    form.show_picker = true;
                }
                Task::none()
            }
            Message::SubmitStudentDob(date) => {
                if let Some(form) = &mut self.students.create_form {
                    form.dob = date;
                    form.student.dob = dob_text(date);
                    form.show_picker = false;
                }
                Task::none()
            }
            Message::CancelStudentDob => {
                if let Some(form) = &mut self.students.create_form {
                    form.show_picker = false;
                }
                Task::none()
            }
            Message::SubmitNewStudent => {
                let Some(form) = &mut self.students.create_form else {
                    return Task::none();
                };
                if form.submitting {
                    return Task::none();
                }
                if let Err(msg) = validation::validate_student(&form.student) {
                    form.error = Some(msg.clone());
                    return self.toast(ToastKind::Error, msg);
                }
                form.error = None;
                form.submitting = true;
                let api = self.api.clone();
                let new_student = form.student.clone();
                Task::perform(
                    async move { student::create(&api, &new_student).await.map_err(Failure::from) },
                    Message::StudentCreated,
                )
            }
            Message::StudentCreated(result) => match result {
                Ok(response) => {
                    self.students.create_form = None;
                    let note = self.toast(ToastKind::Success, response.message.unwrap_or_else(|| "Student created".into()));
                    Task::batch([note, self.reload_students()])
                }
                Err(failure) => {
                    if let Some(form) = &mut self.students.create_form {
                        form.submitting = false;
                        form.error = Some(failure.text("Failed to create student"));
                    }
                    self.fail(&failure, "Failed to create student")
                }
            },
            Message::DownloadSample => Task::perform(
                run_blocking(|| {
                    let Some(path) = rfd::FileDialog::new()
                        .set_file_name("student_sample_format.xlsx")
                        .add_filter("Excel", &["xlsx"])
                        .save_file()
                    else {
                        return Ok(None);
                    };
                    write_sample_workbook(&path)?;
                    Ok(Some(path))
                }),
                Message::SampleSaved,
            ),
            Message::SampleSaved(result) => match result {
                Ok(Some(path)) => {
                    log::info!("sample workbook written to {}", path.display());
                    self.toast(ToastKind::Success, format!("Sample saved to {}", path.display()))
                }
                Ok(None) => Task::none(),
                Err(failure) => self.fail(&failure, "Could not save sample file"),
            },
            Message::UploadExcel => {
                if self.students.uploading {
                    return Task::none();
                }
                self.students.uploading = true;
                let api = self.api.clone();
                Task::perform(
                    async move {
                        let Some(path) = run_blocking(|| pick_workbook(UPLOAD_EXTENSIONS)).await? else {
                            return Ok(None);
                        };
                        student::import_excel(&api, &path).await.map(Some).map_err(Failure::from)
                    },
                    Message::ExcelUploaded,
                )
            }
            Message::ExcelUploaded(result) => {
                self.students.uploading = false;
                match result {
                    Ok(Some(response)) => {
                        let note = self.toast(ToastKind::Success, response.message.unwrap_or_else(|| "Students imported".into()));
                        Task::batch([note, self.reload_students()])
                    }
                    Ok(None) => Task::none(),
                    Err(failure) => self.fail(&failure, "Import failed"),
                }
            }
            // Import preview
            Message::ChooseImportFile => {
                if self.import.reading || self.import.importing {
                    return Task::none();
                }
                self.import.reading = true;
                Task::perform(
                    run_blocking(|| {
                        let Some(path) = pick_workbook(PREVIEW_EXTENSIONS)? else {
                            return Ok(None);
                        };
                        let name = path
                            .file_name()
                            .map(|n| n.to_string_lossy().into_owned())
                            .unwrap_or_default();
                        let preview = read_workbook(&path)?;
                        Ok(Some((name, preview)))
                    }),
                    Message::ImportFileRead,
                )
            }
            Message::ImportFileRead(result) => {
                self.import.reading = false;
                match result {
                    Ok(Some((name, preview))) => {
                        log::info!("{name}: {} rows ready for import", preview.rows().len());
                        self.import.preview = preview;
                        self.import.file_name = Some(name);
                        Task::none()
                    }
                    Ok(None) => Task::none(),
                    Err(failure) => {
                        self.import.preview = Default::default();
                        self.import.file_name = None;
                        self.fail(&failure, "Error reading Excel file")
                    }
                }
            }
            Message::TogglePreviewRow(id) => {
                self.import.preview.toggle(id);
                Task::none()
            }
            Message::TogglePreviewAll => {
                self.import.preview.toggle_all();
                Task::none()
            }
            Message::SubmitImport => {
                if self.import.importing {
                    return Task::none();
                }
                let payload = self.import.preview.selected_payload();
                if payload.is_empty() {
                    return self.toast(ToastKind::Error, "Please select at least one student");
                }
                self.import.importing = true;
                let api = self.api.clone();
                Task::perform(
                    async move { student::bulk_create(&api, payload).await.map_err(Failure::from) },
                    Message::ImportFinished,
                )
            }
            Message::ImportFinished(result) => {
                self.import.importing = false;
                match result {
                    Ok(response) => {
                        let counts = response.results;
                        let note = self.toast(
                            ToastKind::Success,
                            format!("Imported: {}, Skipped: {}", counts.imported, counts.skipped),
                        );
                        let back = Task::perform(
                            async move { tokio::time::sleep(IMPORT_RETURN_DELAY).await },
                            |_| Message::ImportReturn,
                        );
                        Task::batch([note, back])
                    }
                    Err(failure) => self.fail(&failure, "Import failed"),
                }
            }
            Message::ImportReturn => {
                if self.current_screen == Screen::StudentImport {
                    self.navigate(Screen::Students)
                } else {
                    Task::none()
                }
            }
            // Officers
            Message::OfficerSearchChanged(search) => {
                self.officers.search = search;
                self.officers.page = 1;
                self.schedule_officers()
            }
            Message::OfficerStatusFilter(status) => {
                self.officers.status = status;
                self.officers.page = 1;
                self.schedule_officers()
            }
            Message::OfficerPageChanged(page) => {
                self.officers.page = page.max(1);
                self.schedule_officers()
            }
            Message::OfficersDebounced(ticket) => {
                if self.officers.tracker.fire(ticket) {
                    self.fetch_officers(ticket)
                } else {
                    Task::none()
                }
            }
            Message::OfficersLoaded(ticket, result) => {
                if !self.officers.tracker.settle(ticket) {
                    return Task::none();
                }
                match result {
                    Ok(page) => {
                        self.officers.data = page;
                        Task::none()
                    }
                    Err(failure) => self.fail(&failure, "Failed to fetch officers"),
                }
            }
            Message::ToggleOfficerStatus(id) => {
                if self.officers.toggling_id.is_some() {
                    return Task::none();
                }
                self.officers.toggling_id = Some(id.clone());
                let api = self.api.clone();
                Task::perform(
                    {
                        let id = id.clone();
                        async move { officer::toggle_status(&api, &id).await.map_err(Failure::from) }
                    },
                    move |result| Message::OfficerStatusToggled(id.clone(), result),
                )
            }
            Message::OfficerStatusToggled(id, result) => {
                if self.officers.toggling_id.as_deref() == Some(id.as_str()) {
                    self.officers.toggling_id = None;
                }
                match result {
                    Ok(response) => {
                        let note = self.toast(ToastKind::Success, response.message.unwrap_or_else(|| "Status updated".into()));
                        Task::batch([note, self.reload_officers()])
                    }
                    Err(failure) => self.fail(&failure, "Failed to update status"),
                }
            }
            Message::OpenCreateOfficer => {
                self.officers.form = Some(OfficerFormState::default());
                Task::none()
            }
            Message::EditOfficer(o) => {
                self.officers.form = Some(OfficerFormState {
                    editing: Some(o.id.clone()),
                    form: OfficerForm::from_officer(&o),
                    ..Default::default()
                });
                Task::none()
            }
            Message::CloseOfficerForm => {
                if !self.officers.form.as_ref().is_some_and(|f| f.submitting) {
                    self.officers.form = None;
                }
                Task::none()
            }
            Message::OfficerFieldChanged(field, value) => {
                if let Some(state) = &mut self.officers.form {
                    set_officer_field(&mut state.form, field, value);
                }
                Task::none()
            }
            Message::SubmitOfficerForm => {
                let Some(state) = &mut self.officers.form else {
                    return Task::none();
                };
                if state.submitting {
                    return Task::none();
                }
                if let Err(msg) = validation::validate_officer(&state.form, state.editing.is_some()) {
                    state.error = Some(msg.clone());
                    return self.toast(ToastKind::Error, msg);
                }
                state.error = None;
                state.submitting = true;
                let api = self.api.clone();
                let form = state.form.clone();
                let editing = state.editing.clone();
                Task::perform(
                    async move {
                        match editing {
                            Some(id) => officer::update(&api, &id, &form).await,
                            None => officer::create(&api, &form).await,
                        }
                        .map_err(Failure::from)
                    },
                    Message::OfficerSaved,
                )
            }
            Message::OfficerSaved(result) => match result {
                Ok(_) => {
                    let edited = self.officers.form.take().is_some_and(|f| f.editing.is_some());
                    let note = self.toast(
                        ToastKind::Success,
                        if edited { "Officer updated" } else { "Officer created" },
                    );
                    Task::batch([note, self.reload_officers()])
                }
                Err(failure) => {
                    if let Some(state) = &mut self.officers.form {
                        state.submitting = false;
                        state.error = Some(failure.text("Something went wrong"));
                    }
                    self.fail(&failure, "Something went wrong")
                }
            },
            Message::AskDeleteOfficer(o) => {
                self.officers.pending_delete = Some(o);
                Task::none()
            }
            Message::CancelDeleteOfficer => {
                if !self.officers.deleting {
                    self.officers.pending_delete = None;
                }
                Task::none()
            }
            Message::ConfirmDeleteOfficer => {
                let Some(target) = &self.officers.pending_delete else {
                    return Task::none();
                };
                if self.officers.deleting {
                    return Task::none();
                }
                self.officers.deleting = true;
                let api = self.api.clone();
                let id = target.id.clone();
                Task::perform(
                    async move { officer::delete(&api, &id).await.map_err(Failure::from) },
                    Message::OfficerDeleted,
                )
            }
            Message::OfficerDeleted(result) => {
                self.officers.deleting = false;
                self.officers.pending_delete = None;
                match result {
                    Ok(_) => {
                        let note = self.toast(ToastKind::Success, "Officer deleted");
                        Task::batch([note, self.reload_officers()])
                    }
                    Err(failure) => self.fail(&failure, "Failed to delete officer"),
                }
            }
            // Officer detail
            Message::OpenOfficer(id) => {
                self.officer_detail = OfficerDetailState {
                    officer_id: Some(id.clone()),
                    loading_detail: true,
                    tracker: self.officer_detail.tracker.successor(),
                    ..Default::default()
                };
                let open = self.navigate(Screen::OfficerDetail);
                if self.current_screen != Screen::OfficerDetail {
                    return open;
                }
                let api = self.api.clone();
                let detail = Task::perform(
                    async move {
                        let result = officer::get_by_id(&api, &id).await.map_err(Failure::from);
                        (id, result)
                    },
                    |(id, result)| Message::OfficerDetailLoaded(id, result),
                );
                Task::batch([open, detail, self.reload_officer_grievances()])
            }
            Message::OfficerDetailLoaded(id, result) => {
                if self.current_screen != Screen::OfficerDetail
                    || self.officer_detail.officer_id.as_deref() != Some(id.as_str())
                {
                    log::debug!("dropping officer {id}, no longer on screen");
                    return Task::none();
                }
                self.officer_detail.loading_detail = false;
                match result {
                    Ok(detail) => {
                        self.officer_detail.detail = Some(detail);
                        Task::none()
                    }
                    Err(failure) => {
                        let note = self.fail(&failure, "Failed to load officer info");
                        Task::batch([note, self.navigate(Screen::Officers)])
                    }
                }
            }
            Message::OfficerGrievanceStatus(status) => {
                self.officer_detail.status = status;
                self.officer_detail.page = 1;
                self.reload_officer_grievances()
            }
            Message::OfficerGrievancePage(page) => {
                self.officer_detail.page = page.max(1);
                self.reload_officer_grievances()
            }
            Message::OfficerGrievancesLoaded(ticket, result) => {
                if !self.officer_detail.tracker.settle(ticket) {
                    return Task::none();
                }
                match result {
                    Ok(page) => {
                        self.officer_detail.grievances = page;
                        Task::none()
                    }
                    Err(failure) => self.fail(&failure, "Failed to load grievances"),
                }
            }
            // Grievances
            Message::GrievanceSearchChanged(search) => {
                self.grievances.search = search;
                self.grievances.page = 1;
                self.schedule_grievances()
            }
            Message::GrievanceStatusFilter(status) => {
                self.grievances.status = status;
                self.grievances.page = 1;
                self.schedule_grievances()
            }
            Message::GrievancePageChanged(page) => {
                self.grievances.page = page.max(1);
                self.schedule_grievances()
            }
            Message::GrievancesDebounced(ticket) => {
                if self.grievances.tracker.fire(ticket) {
                    self.fetch_grievances(ticket)
                } else {
                    Task::none()
                }
            }
            Message::GrievancesLoaded(ticket, result) => {
                if !self.grievances.tracker.settle(ticket) {
                    return Task::none();
                }
                match result {
                    Ok(page) => {
                        self.grievances.data = page;
                        Task::none()
                    }
                    Err(failure) => self.fail(&failure, "Failed to fetch grievances"),
                }
            }
            Message::OpenGrievance(grievance) => {
                let return_to = match self.current_screen {
                    Screen::GrievanceDetail => self.grievance_detail.return_to,
                    other => other,
                };
                self.grievance_detail = Default::default();
                self.grievance_detail.grievance = Some(grievance);
                self.grievance_detail.return_to = return_to;
                self.navigate(Screen::GrievanceDetail)
            }
            Message::BackFromGrievance => {
                let target = self.grievance_detail.return_to;
                self.navigate(if target == Screen::Login { Screen::Grievances } else { target })
            }
            Message::ShowGrievanceStudent => {
                let Some(id) = self
                    .grievance_detail
                    .grievance
                    .as_ref()
                    .and_then(|g| g.student_id.as_ref())
                    .map(|s| s.id.clone())
                else {
                    return Task::none();
                };
                if self.grievance_detail.student.as_ref().is_some_and(|s| s.id == id) {
                    self.grievance_detail.student_modal = true;
                    return Task::none();
                }
                if self.grievance_detail.fetching_student {
                    return Task::none();
                }
                self.grievance_detail.fetching_student = true;
                let api = self.api.clone();
                Task::perform(
                    async move {
                        let result = student::get_by_id(&api, &id).await.map_err(Failure::from);
                        (id, result)
                    },
                    |(id, result)| Message::GrievanceStudentLoaded(id, result),
                )
            }
            Message::GrievanceStudentLoaded(id, result) => {
                let wanted = self
                    .grievance_detail
                    .grievance
                    .as_ref()
                    .and_then(|g| g.student_id.as_ref())
                    .is_some_and(|s| s.id == id);
                if !wanted {
                    log::debug!("dropping student {id}, grievance changed");
                    return Task::none();
                }
                self.grievance_detail.fetching_student = false;
                match result {
                    Ok(s) => {
                        self.grievance_detail.student = Some(s);
                        self.grievance_detail.student_modal = self.current_screen == Screen::GrievanceDetail;
                        Task::none()
                    }
                    Err(failure) => self.fail(&failure, "Failed to fetch student details"),
                }
            }
            Message::ShowGrievanceOfficer => {
                let Some(id) = self
                    .grievance_detail
                    .grievance
                    .as_ref()
                    .and_then(|g| g.handled_by.as_ref())
                    .map(|o| o.id.clone())
                else {
                    return Task::none();
                };
                if self.grievance_detail.officer.as_ref().is_some_and(|o| o.officer.id == id) {
                    self.grievance_detail.officer_modal = true;
                    return Task::none();
                }
                if self.grievance_detail.fetching_officer {
                    return Task::none();
                }
                self.grievance_detail.fetching_officer = true;
                let api = self.api.clone();
                Task::perform(
                    async move {
                        let result = officer::get_by_id(&api, &id).await.map_err(Failure::from);
                        (id, result)
                    },
                    |(id, result)| Message::GrievanceOfficerLoaded(id, result),
                )
            }
            Message::GrievanceOfficerLoaded(id, result) => {
                let wanted = self
                    .grievance_detail
                    .grievance
                    .as_ref()
                    .and_then(|g| g.handled_by.as_ref())
                    .is_some_and(|o| o.id == id);
                if !wanted {
                    log::debug!("dropping officer {id}, grievance changed");
                    return Task::none();
                }
                self.grievance_detail.fetching_officer = false;
                match result {
                    Ok(detail) => {
                        self.grievance_detail.officer = Some(detail);
                        self.grievance_detail.officer_modal = self.current_screen == Screen::GrievanceDetail;
                        Task::none()
                    }
                    Err(failure) => self.fail(&failure, "Failed to fetch officer details"),
                }
            }
            Message::CloseGrievanceModals => {
                self.grievance_detail.student_modal = false;
                self.grievance_detail.officer_modal = false;
                Task::none()
            }
            Message::OpenAttachment(url) => {
                let url = self.api.absolute(&url);
                match open::that(&url) {
                    Ok(()) => Task::none(),
                    Err(err) => {
                        log::error!("could not open {url}: {err}");
                        self.toast(ToastKind::Error, "Could not open attachment")
                    }
                }
            }
            // Profile
            Message::ProfileNameChanged(v) => {
                self.profile.name = v;
                Task::none()
            }
            Message::ProfileEmailChanged(v) => {
                self.profile.email = v;
                Task::none()
            }
            Message::ProfilePasswordChanged(v) => {
                self.profile.password = v;
                Task::none()
            }
            Message::ChooseProfilePhoto => Task::perform(
                run_blocking(|| {
                    let Some(path) = rfd::FileDialog::new()
                        .add_filter("Image", &["png", "jpg", "jpeg"])
                        .pick_file()
                    else {
                        return Ok(None);
                    };
                    let bytes = fs::read(&path)?;
                    let name = path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| "photo".to_string());
                    PhotoUpload::from_image(name, bytes).map(Some)
                }),
                Message::ProfilePhotoChosen,
            ),
            Message::ProfilePhotoChosen(result) => match result {
                Ok(Some(photo)) => {
                    self.profile.photo = Some(photo);
                    Task::none()
                }
                Ok(None) => Task::none(),
                Err(failure) => self.fail(&failure, "Could not use this image"),
            },
            Message::SubmitProfile => {
                if self.profile.saving {
                    return Task::none();
                }
                let Some(session) = &self.session else {
                    return Task::none();
                };
                let admin_id = session.admin.id.clone();
                let update = ProfileUpdate {
                    name: self.profile.name.clone(),
                    email: self.profile.email.clone(),
                    password: self.profile.password.clone(),
                    photo: self.profile.photo.clone(),
                };
                self.profile.saving = true;
                let api = self.api.clone();
                Task::perform(
                    async move {
                        admin::update_profile(&api, &admin_id, update)
                            .await
                            .map(|r| r.admin)
                            .map_err(Failure::from)
                    },
                    Message::ProfileSaved,
                )
            }
            Message::ProfileSaved(result) => {
                self.profile.saving = false;
                match result {
                    Ok(updated) => {
                        if let Some(store) = &self.store {
                            if let Err(err) = store.update_admin(&updated) {
                                log::error!("could not persist profile: {err}");
                            }
                        }
                        let photo_url = updated.profile_photo.clone();
                        if let Some(session) = &mut self.session {
                            session.admin = updated;
                        }
                        self.fill_profile_form();
                        let photo = self.fetch_profile_photo(photo_url);
                        let note = self.toast(ToastKind::Success, "Profile updated successfully!");
                        let back = Task::perform(
                            async move { tokio::time::sleep(PROFILE_RETURN_DELAY).await },
                            |_| Message::AfterProfileSaved,
                        );
                        Task::batch([photo, note, back])
                    }
                    Err(failure) => self.fail(&failure, "Failed to update profile"),
                }
            }
            Message::ProfilePhotoFetched(result) => {
                match result {
                    Ok(bytes) => self.profile.current_photo = Some(bytes),
                    Err(failure) => log::warn!("profile photo unavailable: {}", failure.detail),
                }
                Task::none()
            }
            Message::AfterProfileSaved => {
                if self.current_screen == Screen::Profile {
                    self.navigate(Screen::Dashboard)
                } else {
                    Task::none()
                }
            }
        }
    }

    pub(crate) fn reload_dashboard(&mut self) -> Task<Message> {
        let ticket = self.dashboard.tracker.begin();
        self.dashboard.tracker.fire(ticket);
        let api = self.api.clone();
        Task::perform(
            async move { admin::dashboard_stats(&api).await.map_err(Failure::from) },
            move |result| Message::DashboardLoaded(ticket, result),
        )
    }

    fn schedule_students(&mut self) -> Task<Message> {
        let ticket = self.students.tracker.begin();
        Task::perform(debounce::wait(self.config.search_debounce(), ticket), Message::StudentsDebounced)
    }

    pub(crate) fn reload_students(&mut self) -> Task<Message> {
        let ticket = self.students.tracker.begin();
        self.students.tracker.fire(ticket);
        self.fetch_students(ticket)
    }

    fn students_query(&self) -> ListQuery {
        ListQuery::new(self.students.page, self.config.page_size)
            .search(self.students.search.clone())
            .status(self.students.status.value)
    }

    fn fetch_students(&self, ticket: Ticket) -> Task<Message> {
        let api = self.api.clone();
        let query = self.students_query();
        Task::perform(
            async move { student::list(&api, &query).await.map_err(Failure::from) },
            move |result| Message::StudentsLoaded(ticket, result),
        )
    }

    fn schedule_officers(&mut self) -> Task<Message> {
        let ticket = self.officers.tracker.begin();
        Task::perform(debounce::wait(self.config.search_debounce(), ticket), Message::OfficersDebounced)
    }

    pub(crate) fn reload_officers(&mut self) -> Task<Message> {
        let ticket = self.officers.tracker.begin();
        self.officers.tracker.fire(ticket);
        self.fetch_officers(ticket)
    }

    fn fetch_officers(&self, ticket: Ticket) -> Task<Message> {
        let api = self.api.clone();
        let query = ListQuery::new(self.officers.page, self.config.page_size)
            .search(self.officers.search.clone())
            .status(self.officers.status.value);
        Task::perform(
            async move { officer::list(&api, &query).await.map_err(Failure::from) },
            move |result| Message::OfficersLoaded(ticket, result),
        )
    }

    fn schedule_grievances(&mut self) -> Task<Message> {
        let ticket = self.grievances.tracker.begin();
        Task::perform(debounce::wait(self.config.grievance_debounce(), ticket), Message::GrievancesDebounced)
    }

    pub(crate) fn reload_grievances(&mut self) -> Task<Message> {
        let ticket = self.grievances.tracker.begin();
        self.grievances.tracker.fire(ticket);
        self.fetch_grievances(ticket)
    }

    fn fetch_grievances(&self, ticket: Ticket) -> Task<Message> {
        let api = self.api.clone();
        let query = ListQuery::new(self.grievances.page, self.config.page_size)
            .search(self.grievances.search.clone())
            .status(self.grievances.status.value);
        Task::perform(
            async move { admin::fetch_grievances(&api, &query).await.map_err(Failure::from) },
            move |result| Message::GrievancesLoaded(ticket, result),
        )
    }

    fn reload_officer_grievances(&mut self) -> Task<Message> {
        let Some(officer_id) = self.officer_detail.officer_id.clone() else {
            return Task::none();
        };
        let ticket = self.officer_detail.tracker.begin();
        self.officer_detail.tracker.fire(ticket);
        let api = self.api.clone();
        let query = ListQuery::new(self.officer_detail.page, OFFICER_GRIEVANCE_LIMIT)
            .status(self.officer_detail.status.value)
            .officer(officer_id);
        Task::perform(
            async move { admin::fetch_grievances(&api, &query).await.map_err(Failure::from) },
            move |result| Message::OfficerGrievancesLoaded(ticket, result),
        )
    }
}

/// Runs dialog and file work off the UI thread.
async fn run_blocking<T, F>(job: F) -> ApiResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
{
    match spawn_blocking(job).await {
        Ok(result) => result.map_err(Failure::from),
        Err(err) => Err(ApiError::from(err).into()),
    }
}

fn pick_workbook(extensions: &[&str]) -> Result<Option<PathBuf>, ApiError> {
    Ok(rfd::FileDialog::new()
        .add_filter("Excel", extensions)
        .pick_file())
}

/// Dates of birth travel as `DD/MM/YYYY`, the format of the sample sheet.
fn dob_text(date: Date) -> String {
    format!("{:02}/{:02}/{:04}", date.day, date.month, date.year)
}

fn set_student_field(student: &mut NewStudent, field: StudentField, value: String) {
    match field {
        StudentField::Name => student.name = value,
        StudentField::EnrollmentNumber => student.enrollment_number = value,
        StudentField::Mobile => student.mobile = value,
        StudentField::Email => student.email = value,
        StudentField::Branch => student.branch = value,
        StudentField::Year => student.year = value,
        StudentField::College => student.college = value,
    }
}

fn set_officer_field(form: &mut OfficerForm, field: OfficerField, value: String) {
    match field {
        OfficerField::Name => form.name = value,
        OfficerField::Mobile => form.mobile = value,
        OfficerField::Email => form.email = value,
        OfficerField::Password => form.password = value,
        OfficerField::Designation => form.designation = value,
        OfficerField::Department => form.department = value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::{ToastKind, ACTIVITY_FILTERS};
    use crate::config::Config;
    use crate::import::ImportPreview;
    use crate::models::{
        Admin, Grievance, GrievancePage, MessageResponse, Officer, OfficerDetail, OfficerStats, Student,
        StudentPage,
    };
    use crate::session::SessionStore;

    fn signed_in_app() -> App {
        let store = SessionStore::open_in_memory().unwrap();
        let session = AuthSession {
            token: "tok".into(),
            admin: Admin { id: "a1".into(), name: "Registrar".into(), email: "reg@college.edu".into(), profile_photo: None },
        };
        store.login(&session).unwrap();
        let mut app = App::with_store(Config::default(), PathBuf::from("unused.json"), Some(store));
        app.session = Some(session);
        app.api.set_token(Some("tok".into()));
        app.current_screen = Screen::Dashboard;
        app
    }

    fn page_of(names: &[&str]) -> StudentPage {
        StudentPage {
            students: names
                .iter()
                .map(|n| Student { id: n.to_string(), name: n.to_string(), ..Default::default() })
                .collect(),
            ..Default::default()
        }
    }

    fn unauthorized() -> Failure {
        Failure { message: Some("jwt expired".into()), unauthorized: true, detail: "401".into() }
    }

    #[test]
    fn protected_screens_need_a_session() {
        let mut app = App::with_store(Config::default(), PathBuf::from("unused.json"), None);
        let _ = app.update(Message::GoToOfficers);
        assert_eq!(app.current_screen, Screen::Login);

        let mut app = signed_in_app();
        let _ = app.update(Message::GoToOfficers);
        assert_eq!(app.current_screen, Screen::Officers);
    }

    #[test]
    fn stale_student_page_is_ignored() {
        let mut app = signed_in_app();
        let _ = app.update(Message::GoToStudents);
        let old = app.students.tracker.begin();
        app.students.tracker.fire(old);
        let new = app.students.tracker.begin();
        app.students.tracker.fire(new);

        let _ = app.update(Message::StudentsLoaded(new, Ok(page_of(&["Asha"]))));
        let _ = app.update(Message::StudentsLoaded(old, Ok(page_of(&["Ravi"]))));
        assert_eq!(app.students.data.students[0].name, "Asha");
    }

    #[test]
    fn filter_changes_reset_the_page() {
        let mut app = signed_in_app();
        app.students.page = 4;
        let _ = app.update(Message::StudentStatusFilter(ACTIVITY_FILTERS[2]));
        assert_eq!(app.students.page, 1);

        app.grievances.page = 3;
        let _ = app.update(Message::GrievanceSearchChanged("hostel".into()));
        assert_eq!(app.grievances.page, 1);
    }

    #[test]
    fn only_one_toggle_at_a_time() {
        let mut app = signed_in_app();
        let _ = app.update(Message::ToggleStudentStatus("s1".into()));
        let _ = app.update(Message::ToggleStudentStatus("s2".into()));
        assert_eq!(app.students.toggling_id.as_deref(), Some("s1"));

        let _ = app.update(Message::StudentStatusToggled("s1".into(), Err(Failure {
            message: None,
            unauthorized: false,
            detail: "boom".into(),
        })));
        assert!(app.students.toggling_id.is_none());
        assert_eq!(app.toasts.last().unwrap().text, "Failed to update status");
    }

    #[test]
    fn rejected_token_signs_out() {
        let mut app = signed_in_app();
        let _ = app.update(Message::GoToGrievances);
        let ticket = app.grievances.tracker.begin();
        app.grievances.tracker.fire(ticket);
        let _ = app.update(Message::GrievancesLoaded(ticket, Err(unauthorized())));

        assert!(app.session.is_none());
        assert_eq!(app.current_screen, Screen::Login);
        assert!(app.store.as_ref().unwrap().load().unwrap().is_none());
    }

    #[test]
    fn logout_clears_everything() {
        let mut app = signed_in_app();
        app.students.search = "asha".into();
        let _ = app.update(Message::Logout);
        assert!(app.store.as_ref().unwrap().load().unwrap().is_none());
        assert!(app.api.token().is_none());
        assert!(app.students.search.is_empty());

        let _ = app.update(Message::GoToDashboard);
        assert_eq!(app.current_screen, Screen::Login);
    }

    #[test]
    fn failed_profile_update_keeps_old_profile() {
        let mut app = signed_in_app();
        let _ = app.update(Message::GoToProfile);
        let _ = app.update(Message::ProfileNameChanged("New Name".into()));
        let _ = app.update(Message::SubmitProfile);
        assert!(app.profile.saving);

        let _ = app.update(Message::ProfileSaved(Err(Failure {
            message: Some("Email already in use".into()),
            unauthorized: false,
            detail: "409".into(),
        })));
        assert!(!app.profile.saving);
        assert_eq!(app.session.as_ref().unwrap().admin.name, "Registrar");
        assert_eq!(app.toasts.last().unwrap().kind, ToastKind::Error);
        assert_eq!(app.toasts.last().unwrap().text, "Email already in use");
    }

    #[test]
    fn successful_profile_update_replaces_admin() {
        let mut app = signed_in_app();
        let _ = app.update(Message::GoToProfile);
        let updated = Admin { id: "a1".into(), name: "Dean".into(), email: "dean@college.edu".into(), profile_photo: None };
        let _ = app.update(Message::ProfileSaved(Ok(updated.clone())));
        assert_eq!(app.session.as_ref().unwrap().admin, updated);
        assert_eq!(app.store.as_ref().unwrap().load().unwrap().unwrap().admin, updated);

        let _ = app.update(Message::AfterProfileSaved);
        assert_eq!(app.current_screen, Screen::Dashboard);
    }

    #[test]
    fn empty_import_selection_is_refused() {
        let mut app = signed_in_app();
        let _ = app.update(Message::GoToStudentImport);
        let headers: Vec<String> = ["name", "enrollmentNumber", "dob"].iter().map(|s| s.to_string()).collect();
        let rows = vec![vec!["Asha".to_string(), "EN1".to_string(), "01/01/2004".to_string()]];
        app.import.preview = ImportPreview::from_table(&headers, &rows).unwrap();

        let _ = app.update(Message::TogglePreviewAll);
        let _ = app.update(Message::SubmitImport);
        assert!(!app.import.importing);
        assert_eq!(app.toasts.last().unwrap().text, "Please select at least one student");

        let _ = app.update(Message::TogglePreviewRow(app.import.preview.rows()[0].preview_id));
        let _ = app.update(Message::SubmitImport);
        assert!(app.import.importing);
    }

    #[test]
    fn invalid_officer_form_stays_open() {
        let mut app = signed_in_app();
        let _ = app.update(Message::OpenCreateOfficer);
        for (field, value) in [
            (OfficerField::Name, "Meera"),
            (OfficerField::Email, "meera@college.edu"),
            (OfficerField::Mobile, "12345"),
            (OfficerField::Password, "secret"),
        ] {
            let _ = app.update(Message::OfficerFieldChanged(field, value.into()));
        }
        let _ = app.update(Message::SubmitOfficerForm);
        let form = app.officers.form.as_ref().unwrap();
        assert!(!form.submitting);
        assert_eq!(form.error.as_deref(), Some("Please enter a valid 10-digit Indian mobile number"));
    }

    fn grievance(id: &str, student: &str, officer: &str) -> Grievance {
        serde_json::from_value(serde_json::json!({
            "_id": id, "subject": "Fees", "status": "Pending",
            "studentId": { "_id": student, "name": student },
            "handledBy": { "_id": officer, "name": officer }
        }))
        .unwrap()
    }

    fn officer_detail(id: &str) -> OfficerDetail {
        OfficerDetail {
            officer: Officer { id: id.into(), name: format!("Officer {id}"), ..Default::default() },
            stats: OfficerStats::default(),
        }
    }

    #[test]
    fn toggled_student_reloads_the_page() {
        let mut app = signed_in_app();
        let _ = app.update(Message::GoToStudents);
        let before = app.students.tracker.latest();
        let _ = app.update(Message::ToggleStudentStatus("s1".into()));
        let _ = app.update(Message::StudentStatusToggled("s1".into(), Ok(MessageResponse::default())));

        assert!(app.students.toggling_id.is_none());
        assert!(app.students.tracker.latest() > before);
        assert!(app.students.tracker.is_loading());
        assert_eq!(app.toasts.last().unwrap().kind, ToastKind::Success);
    }

    #[test]
    fn only_latest_search_timer_fetches() {
        let mut app = signed_in_app();
        app.current_screen = Screen::Students;
        let _ = app.update(Message::StudentSearchChanged("as".into()));
        let early = app.students.tracker.latest();
        let _ = app.update(Message::StudentSearchChanged("asha".into()));
        let late = app.students.tracker.latest();

        let _ = app.update(Message::StudentsDebounced(early));
        assert!(!app.students.tracker.is_loading());

        let _ = app.update(Message::StudentsDebounced(late));
        assert!(app.students.tracker.is_loading());
        assert!(app.students_query().to_pairs().contains(&("search", "asha".to_string())));
    }

    #[test]
    fn late_officer_responses_stay_with_their_officer() {
        let mut app = signed_in_app();
        let _ = app.update(Message::OpenOfficer("A".into()));
        let ticket_of_a = app.officer_detail.tracker.latest();
        let _ = app.update(Message::GoToOfficers);
        let _ = app.update(Message::OpenOfficer("B".into()));

        let stale = GrievancePage { grievances: vec![grievance("grievance-of-A", "s1", "A")], ..Default::default() };
        let _ = app.update(Message::OfficerGrievancesLoaded(ticket_of_a, Ok(stale)));
        let _ = app.update(Message::OfficerDetailLoaded("A".into(), Ok(officer_detail("A"))));

        assert_eq!(app.officer_detail.officer_id.as_deref(), Some("B"));
        assert!(app.officer_detail.grievances.grievances.is_empty());
        assert!(app.officer_detail.detail.is_none());
        assert!(app.officer_detail.loading_detail);

        let ticket_of_b = app.officer_detail.tracker.latest();
        let fresh = GrievancePage { grievances: vec![grievance("grievance-of-B", "s2", "B")], ..Default::default() };
        let _ = app.update(Message::OfficerGrievancesLoaded(ticket_of_b, Ok(fresh)));
        let _ = app.update(Message::OfficerDetailLoaded("B".into(), Ok(officer_detail("B"))));
        assert_eq!(app.officer_detail.grievances.grievances[0].id, "grievance-of-B");
        assert_eq!(app.officer_detail.detail.as_ref().unwrap().officer.name, "Officer B");
    }

    #[test]
    fn officer_lookup_failures_use_their_own_wording() {
        let boom = || Failure { message: None, unauthorized: false, detail: "500".into() };
        let mut app = signed_in_app();
        let _ = app.update(Message::OpenOfficer("A".into()));
        let _ = app.update(Message::OfficerDetailLoaded("A".into(), Err(boom())));
        assert_eq!(app.toasts.last().unwrap().text, "Failed to load officer info");
        assert_eq!(app.current_screen, Screen::Officers);

        let _ = app.update(Message::OpenGrievance(grievance("g1", "s1", "o1")));
        let _ = app.update(Message::ShowGrievanceOfficer);
        let _ = app.update(Message::GrievanceOfficerLoaded("o1".into(), Err(boom())));
        assert_eq!(app.toasts.last().unwrap().text, "Failed to fetch officer details");
        assert!(!app.grievance_detail.fetching_officer);
    }

    #[test]
    fn list_tickets_survive_logout() {
        let mut app = signed_in_app();
        let _ = app.update(Message::GoToStudents);
        let before_logout = app.students.tracker.latest();
        let _ = app.update(Message::Logout);
        app.session = signed_in_app().session;
        let _ = app.update(Message::GoToStudents);

        let _ = app.update(Message::StudentsLoaded(before_logout, Ok(page_of(&["Ravi"]))));
        assert!(app.students.data.students.is_empty());
        assert!(app.students.tracker.is_loading());
    }

    #[test]
    fn lookups_for_a_previous_grievance_are_dropped() {
        let mut app = signed_in_app();
        let _ = app.update(Message::OpenGrievance(grievance("g1", "s1", "o1")));
        let _ = app.update(Message::ShowGrievanceStudent);
        let _ = app.update(Message::ShowGrievanceOfficer);
        let _ = app.update(Message::OpenGrievance(grievance("g2", "s2", "o2")));

        let s1 = Student { id: "s1".into(), name: "Asha".into(), ..Default::default() };
        let _ = app.update(Message::GrievanceStudentLoaded("s1".into(), Ok(s1)));
        let _ = app.update(Message::GrievanceOfficerLoaded("o1".into(), Ok(officer_detail("o1"))));

        assert_eq!(app.grievance_detail.grievance.as_ref().unwrap().id, "g2");
        assert!(app.grievance_detail.student.is_none());
        assert!(app.grievance_detail.officer.is_none());
        assert!(!app.grievance_detail.student_modal);
        assert!(!app.grievance_detail.officer_modal);
    }

    #[test]
    fn preview_picker_offers_only_readable_workbooks() {
        let dir = tempfile::tempdir().unwrap();
        for ext in PREVIEW_EXTENSIONS {
            let path = dir.path().join(format!("sample.{ext}"));
            write_sample_workbook(&path).unwrap();
            assert!(read_workbook(&path).is_ok());
        }
        assert!(!PREVIEW_EXTENSIONS.contains(&"xls"));
        assert!(UPLOAD_EXTENSIONS.contains(&"xls"));
    }

    #[test]
    fn student_lookup_is_cached() {
        let mut app = signed_in_app();
        let grievance: crate::models::Grievance = serde_json::from_str(
            r#"{ "_id": "g1", "subject": "Fees", "description": "", "status": "Pending",
                 "studentId": { "_id": "s1", "name": "Asha" } }"#,
        )
        .unwrap();
        let _ = app.update(Message::OpenGrievance(grievance));
        let _ = app.update(Message::ShowGrievanceStudent);
        assert!(app.grievance_detail.fetching_student);

        let student = Student { id: "s1".into(), name: "Asha".into(), ..Default::default() };
        let _ = app.update(Message::GrievanceStudentLoaded("s1".into(), Ok(student)));
        let _ = app.update(Message::CloseGrievanceModals);
        let _ = app.update(Message::ShowGrievanceStudent);
        assert!(app.grievance_detail.student_modal);
        assert!(!app.grievance_detail.fetching_student);
    }

    #[test]
    fn dob_uses_day_month_year() {
        let date = Date { year: 2004, month: 4, day: 24 };
        assert_eq!(dob_text(date), "24/04/2004");
    }
}
