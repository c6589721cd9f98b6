pub mod login;
pub mod nav_menu;
pub mod dashboard;
pub mod students;
pub mod student_import;
pub mod officers;
pub mod officer_detail;
pub mod grievances;
pub mod grievance_detail;
pub mod profile;
pub mod settings;
pub mod widgets;

pub use login::login_screen;
pub use nav_menu::nav_menu;
pub use dashboard::dashboard_screen;
pub use students::students_screen;
pub use student_import::student_import_screen;
pub use officers::officers_screen;
pub use officer_detail::officer_detail_screen;
pub use grievances::grievances_screen;
pub use grievance_detail::grievance_detail_screen;
pub use profile::profile_screen;
pub use settings::settings_screen;
pub use widgets::toast_stack;
