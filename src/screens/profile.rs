use iced::{widget::{column, text, button, Container}, ContentFit, Length};
use iced::widget::{image, row, text_input, horizontal_space};
use iced::widget::container::bordered_box;
use iced::widget::image::Handle;
use iced::Element;
use iced_font_awesome::fa_icon_solid;
use crate::app::{App, Message};

fn avatar(app: &App) -> Element<'_, Message> {
    // A freshly picked photo previews before it is uploaded.
    let bytes = app
        .profile
        .photo
        .as_ref()
        .map(|p| p.bytes.clone())
        .or_else(|| app.profile.current_photo.clone());

    match bytes {
        Some(data) => image(Handle::from_bytes(data))
            .width(Length::Fixed(180.0))
            .height(Length::Fixed(180.0))
            .content_fit(ContentFit::Cover)
            .into(),
        None => Container::new(fa_icon_solid("circle-user").style(move |_| text::base(&app.theme)))
            .center(Length::Fixed(180.0))
            .style(move |_| bordered_box(&app.theme))
            .into(),
    }
}

pub fn profile_screen(app: &App) -> Container<Message> {
    let state = &app.profile;
    let (name, email) = app
        .session
        .as_ref()
        .map(|s| (s.admin.name.as_str(), s.admin.email.as_str()))
        .unwrap_or_default();

    let photo_note = state
        .photo
        .as_ref()
        .map(|p| format!("New photo: {}", p.file_name))
        .unwrap_or_default();

    let form = column![
        text_input("Name", &state.name).on_input(Message::ProfileNameChanged).padding(10),
        text_input("Email", &state.email).on_input(Message::ProfileEmailChanged).padding(10),
        text_input("New password (optional)", &state.password)
            .on_input(Message::ProfilePasswordChanged)
            .secure(true)
            .padding(10),
        row![
            button("Choose photo").style(button::secondary).on_press(Message::ChooseProfilePhoto),
            text(photo_note).size(14),
            horizontal_space(),
            button(if state.saving { "Saving..." } else { "Save changes" })
                .on_press_maybe((!state.saving).then_some(Message::SubmitProfile)),
        ]
        .spacing(10),
    ]
    .spacing(12)
    .width(Length::Fill);

    let content = column![
        row![
            avatar(app),
            column![
                text(name).size(26),
                text(email).size(18).style(text::secondary),
            ]
            .spacing(8),
        ]
        .spacing(20),
        form,
    ]
        .spacing(20);

    let card = Container::new(content).style(move |_| bordered_box(&app.theme)).width(Length::Fill).padding(20);
    Container::new(column![text("Profile").size(30), card].spacing(20))
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(20)
}
