use iced::{widget::{column, text, text_input, button, vertical_space, Container}, Length, Center};
use iced_font_awesome::fa_icon_solid;
use crate::app::{App, Message};

pub fn login_screen(app: &App) -> Container<Message> {
    let submit = button(if app.login.submitting { "Signing in..." } else { "Login" })
        .on_press_maybe((!app.login.submitting).then_some(Message::LoginPressed))
        .padding(10);

    let mut content = column![
        fa_icon_solid("scale-balanced").style(move |_| text::base(&app.theme)),
        text("Grievance Redressal System").size(30),
        text("Admin sign in").size(18),
        vertical_space().height(Length::Fixed(20.0)),
        text_input("Email", &app.login.email)
            .on_input(Message::EmailChanged)
            .on_submit(Message::LoginPressed)
            .padding(10)
            .size(18)
            .width(Length::Fixed(350.0)),
        text_input("Password", &app.login.password)
            .on_input(Message::PasswordChanged)
            .on_submit(Message::LoginPressed)
            .secure(true)
            .padding(10)
            .size(18)
            .width(Length::Fixed(350.0)),
        submit,
    ]
        .spacing(15)
        .width(Length::Fill)
        .align_x(Center);

    if let Some(error) = &app.login.error {
        content = content.push(text(error).size(16).style(text::danger));
    }

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_y(Length::Fill)
        .padding(40)
}
