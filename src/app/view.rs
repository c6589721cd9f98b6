use iced::{Element, Length};
use iced::widget::{Container, Row, Stack};
use crate::app::state::Screen;
use crate::screens::{
    dashboard_screen, grievance_detail_screen, grievances_screen, login_screen, nav_menu,
    officer_detail_screen, officers_screen, profile_screen, settings_screen, student_import_screen,
    students_screen, toast_stack,
};
use super::{App, Message};

impl App {
    pub fn view(&self) -> Element<Message> {
        let screen = match &self.current_screen {
            Screen::Login => login_screen(self),
            Screen::Dashboard => dashboard_screen(self),
            Screen::Students => students_screen(self),
            Screen::StudentImport => student_import_screen(self),
            Screen::Officers => officers_screen(self),
            Screen::OfficerDetail => officer_detail_screen(self),
            Screen::Grievances => grievances_screen(self),
            Screen::GrievanceDetail => grievance_detail_screen(self),
            Screen::Profile => profile_screen(self),
            Screen::Settings => settings_screen(self),
        }
            .width(Length::Fill);

        let mut layout = Row::new().spacing(20);
        if self.current_screen.requires_session() {
            layout = layout.push(
                Container::new(nav_menu(self))
                    .width(Length::Fixed(220.0))
                    .height(Length::Fill)
                    .padding(10),
            );
        }
        layout = layout.push(screen);

        Stack::new()
            .push(layout)
            .push(toast_stack(self))
            .into()
    }
}
