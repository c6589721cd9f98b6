use iced::{widget::{button, column}, Length};
use iced::widget::{text, vertical_space, Button, Container};
use iced_font_awesome::fa_icon_solid;
use crate::app::{Message, App};
use crate::app::state::Screen;
use super::widgets::icon_button_content;

fn nav_button<'a>(app: &'a App, icon: &'a str, label: &'a str, target: &[Screen], message: Message) -> Button<'a, Message> {
    let active = target.contains(&app.current_screen);
    button(icon_button_content(
        fa_icon_solid(icon).style(move |_| text::base(&app.theme)),
        label,
    ))
        .style(if active { button::primary } else { button::text })
        .on_press(message)
        .width(Length::Fill)
}

pub fn nav_menu(app: &App) -> Container<Message> {
    let admin_name = app.session.as_ref().map(|s| s.admin.name.as_str()).unwrap_or_default();

    let content = column![
        text("GRS Admin").size(22),
        text(admin_name).size(14).style(text::secondary),
        vertical_space().height(Length::Fixed(10.0)),
        nav_button(app, "chart-line", "Dashboard", &[Screen::Dashboard], Message::GoToDashboard),
        nav_button(app, "user-graduate", "Students", &[Screen::Students, Screen::StudentImport], Message::GoToStudents),
        nav_button(app, "user-tie", "Officers", &[Screen::Officers, Screen::OfficerDetail], Message::GoToOfficers),
        nav_button(app, "clipboard-list", "Grievances", &[Screen::Grievances, Screen::GrievanceDetail], Message::GoToGrievances),
        nav_button(app, "address-card", "Profile", &[Screen::Profile], Message::GoToProfile),
        vertical_space(),
        nav_button(app, "gear", "Settings", &[Screen::Settings], Message::GoToSettings),
        nav_button(app, "arrow-right-from-bracket", "Logout", &[], Message::Logout),
    ]
        .spacing(10);

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(10)
}
