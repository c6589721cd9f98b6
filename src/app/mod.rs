pub mod state;
pub mod messages;
pub mod update;
pub mod view;

use std::path::{Path, PathBuf};
use std::time::Duration;
use iced::Task;
use crate::api::{admin, ApiClient};
use crate::config::{load_config, Config};
use crate::error::Failure;
use crate::session::{AuthSession, SessionStore};

pub use state::App;
pub use messages::Message;
use state::{
    DashboardState, GrievanceDetailState, GrievancesState, ImportState, LoginState,
    OfficerDetailState, OfficersState, ProfileState, Screen, StudentsState, Toast, ToastKind,
};

const TOAST_LIFETIME: Duration = Duration::from_secs(4);

impl App {
    /// Loads the config, opens the session store and resumes a stored
    /// session straight into the dashboard.
    pub fn new(config_path: PathBuf) -> (Self, Task<Message>) {
        let config = load_config(&config_path);
        let store = match SessionStore::open(Path::new(&config.session_db)) {
            Ok(store) => Some(store),
            Err(err) => {
                log::error!("session store unavailable, sign-ins will not persist: {err}");
                None
            }
        };
        let mut app = Self::with_store(config, config_path, store);

        let stored = match app.store.as_ref().map(SessionStore::load) {
            Some(Ok(session)) => session,
            Some(Err(err)) => {
                log::warn!("could not read stored session: {err}");
                None
            }
            None => None,
        };
        let task = match stored {
            Some(session) => {
                log::info!("resuming session of {}", session.admin.email);
                app.start_session(session)
            }
            None => Task::none(),
        };
        (app, task)
    }

    pub fn with_store(config: Config, config_path: PathBuf, store: Option<SessionStore>) -> Self {
        Self {
            theme: config.theme(),
            api: ApiClient::new(config.api_base_url.clone()),
            config,
            config_path,
            store,
            session: None,
            current_screen: Screen::Login,
            toasts: Vec::new(),
            next_toast_id: 0,
            login: LoginState::default(),
            dashboard: DashboardState::default(),
            students: StudentsState::default(),
            import: ImportState::default(),
            officers: OfficersState::default(),
            officer_detail: OfficerDetailState::default(),
            grievances: GrievancesState::default(),
            grievance_detail: GrievanceDetailState::default(),
            profile: ProfileState::default(),
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.is_some()
    }

    /// Switches screens, kicking off whatever the target screen loads on
    /// entry. Protected screens fall back to Login without a session.
    pub fn navigate(&mut self, screen: Screen) -> Task<Message> {
        let screen = match (screen.requires_session(), self.is_signed_in()) {
            (true, false) => {
                log::debug!("{screen:?} needs a session, showing login");
                Screen::Login
            }
            (false, true) => Screen::Dashboard,
            _ => screen,
        };
        if screen != self.current_screen {
            self.leave(self.current_screen);
        }
        self.current_screen = screen;

        match screen {
            Screen::Dashboard => self.reload_dashboard(),
            Screen::Students => self.reload_students(),
            Screen::Officers => self.reload_officers(),
            Screen::Grievances => self.reload_grievances(),
            Screen::Profile => {
                self.fill_profile_form();
                Task::none()
            }
            _ => Task::none(),
        }
    }

    /// Pending lookups of a screen are dropped once it is left.
    fn leave(&mut self, screen: Screen) {
        match screen {
            Screen::Dashboard => self.dashboard.tracker.cancel(),
            Screen::Students => self.students.tracker.cancel(),
            Screen::Officers => self.officers.tracker.cancel(),
            Screen::OfficerDetail => self.officer_detail.tracker.cancel(),
            Screen::Grievances => self.grievances.tracker.cancel(),
            _ => {}
        }
    }

    fn fill_profile_form(&mut self) {
        if let Some(session) = &self.session {
            self.profile.name = session.admin.name.clone();
            self.profile.email = session.admin.email.clone();
        }
        self.profile.password.clear();
        self.profile.photo = None;
    }

    pub(crate) fn start_session(&mut self, session: AuthSession) -> Task<Message> {
        self.api.set_token(Some(session.token.clone()));
        let photo = session.admin.profile_photo.clone();
        self.session = Some(session);
        self.login = LoginState::default();
        let open = self.navigate(Screen::Dashboard);
        Task::batch([open, self.fetch_profile_photo(photo)])
    }

    pub(crate) fn fetch_profile_photo(&mut self, url: Option<String>) -> Task<Message> {
        self.profile.current_photo = None;
        let Some(url) = url.filter(|u| !u.trim().is_empty()) else {
            return Task::none();
        };
        let api = self.api.clone();
        Task::perform(
            async move { admin::fetch_photo(&api, &url).await.map_err(Failure::from) },
            Message::ProfilePhotoFetched,
        )
    }

    /// Forgets the session everywhere and resets every screen.
    pub fn logout(&mut self) -> Task<Message> {
        if let Some(store) = &self.store {
            if let Err(err) = store.logout() {
                log::error!("could not clear stored session: {err}");
            }
        }
        if let Some(session) = self.session.take() {
            log::info!("{} signed out", session.admin.email);
        }
        self.api.set_token(None);
        self.login = LoginState::default();
        self.dashboard = DashboardState {
            tracker: self.dashboard.tracker.successor(),
            ..Default::default()
        };
        self.students = StudentsState {
            tracker: self.students.tracker.successor(),
            ..Default::default()
        };
        self.import = ImportState::default();
        self.officers = OfficersState {
            tracker: self.officers.tracker.successor(),
            ..Default::default()
        };
        self.officer_detail = OfficerDetailState {
            tracker: self.officer_detail.tracker.successor(),
            ..Default::default()
        };
        self.grievances = GrievancesState {
            tracker: self.grievances.tracker.successor(),
            ..Default::default()
        };
        self.grievance_detail = GrievanceDetailState::default();
        self.profile = ProfileState::default();
        self.current_screen = Screen::Login;
        Task::none()
    }

    pub fn toast(&mut self, kind: ToastKind, text: impl Into<String>) -> Task<Message> {
        self.next_toast_id += 1;
        let id = self.next_toast_id;
        self.toasts.push(Toast { id, kind, text: text.into() });
        Task::perform(
            async move { tokio::time::sleep(TOAST_LIFETIME).await },
            move |_| Message::DismissToast(id),
        )
    }

    /// Turns a failed call into a toast. A rejected token ends the session.
    pub fn fail(&mut self, failure: &Failure, fallback: &str) -> Task<Message> {
        if failure.unauthorized && self.is_signed_in() {
            log::warn!("server rejected the session: {}", failure.detail);
            let out = self.logout();
            let note = self.toast(ToastKind::Error, "Session expired. Please login again.");
            return Task::batch([out, note]);
        }
        log::error!("{fallback}: {}", failure.detail);
        self.toast(ToastKind::Error, failure.text(fallback))
    }
}
