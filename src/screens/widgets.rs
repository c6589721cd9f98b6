use iced::alignment::{Horizontal, Vertical};
use iced::mouse::Interaction;
use iced::widget::container::{background, bordered_box};
use iced::widget::{
    button, column, horizontal_space, mouse_area, pick_list, row, text, toggler, Column, Container,
    Row,
};
use iced::{Alignment, Color, Element, Length, Renderer, Theme};
use iced_font_awesome::fa_icon_solid;
use crate::app::state::{FilterOption, ToastKind};
use crate::app::{App, Message};
use crate::models::{GrievanceStatus, PageInfo};

pub fn icon_button_content<'a>(
    icon_element: impl Into<Element<'a, Message, Theme, Renderer>>,
    label: &'a str,
) -> Row<'a, Message> {
    Row::new()
        .align_y(Alignment::Center)
        .spacing(5)
        .push(icon_element)
        .push(text(label))
}

/// Overlay layer for a `Stack`: dimmed backdrop, centred card. Clicking the
/// backdrop sends `on_close`; clicks on the card itself go nowhere.
pub fn modal<'a>(
    app: &'a App,
    title: impl ToString,
    body: impl Into<Element<'a, Message>>,
    on_close: Message,
    width: f32,
) -> Element<'a, Message> {
    let header = row![
        text(title.to_string()).size(22),
        horizontal_space(),
        button(fa_icon_solid("xmark").style(move |_| text::base(&app.theme)))
            .style(button::text)
            .on_press(on_close.clone()),
    ]
    .align_y(Alignment::Center);

    let card = Container::new(column![header, body.into()].spacing(15))
        .style(move |_| bordered_box(&app.theme))
        .padding(20)
        .width(Length::Fixed(width));

    mouse_area(
        Container::new(mouse_area(card).on_press(Message::Noop))
            .center(Length::Fill)
            .style(move |_| background(Color { r: 0.0, g: 0.0, b: 0.0, a: 0.7 })),
    )
    .interaction(Interaction::Idle)
    .on_press(on_close)
    .into()
}

pub fn dropdown<'a>(
    options: &'a [FilterOption],
    selected: FilterOption,
    on_select: fn(FilterOption) -> Message,
) -> Element<'a, Message> {
    pick_list(options, Some(selected), on_select)
        .placeholder("Select status")
        .width(Length::Fixed(180.0))
        .into()
}

/// Switch that stops reacting while its request is pending.
pub fn toggle<'a>(is_on: bool, pending: bool, on_toggle: Message) -> Element<'a, Message> {
    let switch = toggler(is_on).size(20.0);
    if pending {
        switch.into()
    } else {
        switch.on_toggle(move |_| on_toggle.clone()).into()
    }
}

/// Pages reachable from `info`: previous and next, `None` at the bounds.
pub fn page_targets(info: PageInfo) -> (Option<u32>, Option<u32>) {
    (
        info.has_previous().then(|| info.current_page - 1),
        info.has_next().then(|| info.current_page + 1),
    )
}

pub fn pagination<'a>(info: PageInfo, on_page: fn(u32) -> Message) -> Row<'a, Message> {
    let (previous, next) = page_targets(info);
    row![
        button("Previous").on_press_maybe(previous.map(on_page)),
        text(format!("Page {} of {}", info.current_page, info.total_pages)),
        button("Next").on_press_maybe(next.map(on_page)),
    ]
    .spacing(10)
    .align_y(Alignment::Center)
}

pub fn stat_card<'a>(app: &'a App, label: &'a str, value: u64, caption: Option<String>) -> Container<'a, Message> {
    let mut content = Column::new()
        .spacing(4)
        .push(text(label).size(14))
        .push(text(value.to_string()).size(28));
    if let Some(caption) = caption {
        content = content.push(text(caption).size(13).style(text::secondary));
    }
    Container::new(content)
        .style(move |_| bordered_box(&app.theme))
        .padding(15)
        .width(Length::Fill)
}

pub fn status_color(status: GrievanceStatus) -> Color {
    match status {
        GrievanceStatus::Pending => Color::from_rgb(0.85, 0.6, 0.1),
        GrievanceStatus::InProgress => Color::from_rgb(0.2, 0.45, 0.85),
        GrievanceStatus::Resolved => Color::from_rgb(0.15, 0.6, 0.3),
        GrievanceStatus::Rejected => Color::from_rgb(0.8, 0.2, 0.2),
    }
}

pub fn status_badge<'a>(app: &'a App, status: GrievanceStatus) -> Container<'a, Message> {
    Container::new(text(status.as_str()).size(13).color(status_color(status)))
        .style(move |_| bordered_box(&app.theme))
        .padding([2, 8])
}

/// Fixed-proportion table cell.
pub fn cell<'a>(content: impl Into<Element<'a, Message>>, portion: u16) -> Container<'a, Message> {
    Container::new(content).width(Length::FillPortion(portion)).align_y(Vertical::Center)
}

pub fn header_cell<'a>(label: &'a str, portion: u16) -> Container<'a, Message> {
    cell(text(label).size(14).style(text::secondary), portion)
}

pub fn detail_line<'a>(label: &'a str, value: impl ToString) -> Row<'a, Message> {
    row![
        text(label).size(15).style(text::secondary).width(Length::Fixed(150.0)),
        text(value.to_string()).size(15),
    ]
    .spacing(10)
}

pub fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() { "-" } else { value }
}

pub fn toast_stack(app: &App) -> Element<'_, Message> {
    let toasts = app.toasts.iter().fold(Column::new().spacing(8), |col, toast| {
        let style = match toast.kind {
            ToastKind::Success => text::success,
            ToastKind::Error => text::danger,
        };
        col.push(
            mouse_area(
                Container::new(text(&toast.text).style(style))
                    .style(move |_| bordered_box(&app.theme))
                    .padding(12)
                    .width(Length::Fixed(320.0)),
            )
            .on_press(Message::DismissToast(toast.id)),
        )
    });
    Container::new(toasts)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(Horizontal::Right)
        .align_y(Vertical::Bottom)
        .padding(20)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_bounds() {
        assert_eq!(page_targets(PageInfo::new(1, 1)), (None, None));
        assert_eq!(page_targets(PageInfo::new(1, 3)), (None, Some(2)));
        assert_eq!(page_targets(PageInfo::new(2, 3)), (Some(1), Some(3)));
        assert_eq!(page_targets(PageInfo::new(3, 3)), (Some(2), None));
    }

    #[test]
    fn blank_values_show_a_dash() {
        assert_eq!(or_dash("  "), "-");
        assert_eq!(or_dash("CSE"), "CSE");
    }
}
