use iced::widget::container::bordered_box;
use iced::widget::{button, column, horizontal_space, row, text, Column, Container, Scrollable};
use iced::{Alignment, Length};
use iced_font_awesome::fa_icon_solid;
use crate::app::state::GRIEVANCE_FILTERS;
use crate::app::{App, Message};
use crate::models::{display_date, OfficerDetail};
use super::widgets::{cell, dropdown, header_cell, icon_button_content, or_dash, pagination, stat_card, status_badge};

fn profile_card<'a>(app: &'a App, detail: &'a OfficerDetail) -> Container<'a, Message> {
    let officer = &detail.officer;
    let status = if officer.is_active { "Active" } else { "Inactive" };
    Container::new(
        column![
            row![text(&officer.name).size(26), horizontal_space(), text(status).style(text::secondary)]
                .align_y(Alignment::Center),
            text(format!("{} · {}", or_dash(&officer.designation), or_dash(&officer.department))),
            text(format!("{} | {}", or_dash(&officer.email), or_dash(&officer.mobile))).size(14),
        ]
        .spacing(6),
    )
    .style(move |_| bordered_box(&app.theme))
    .padding(15)
    .width(Length::Fill)
}

fn grievance_list(app: &App) -> Column<Message> {
    let state = &app.officer_detail;
    let header = row![
        header_cell("ID", 1),
        header_cell("Subject", 4),
        header_cell("Student", 2),
        header_cell("Status", 2),
        header_cell("Created", 2),
    ]
    .spacing(10);

    let mut list = Column::new().spacing(8).push(header);
    if state.tracker.is_loading() {
        list = list.push(text("Loading grievances...").style(text::secondary));
    } else if state.grievances.grievances.is_empty() {
        list = list.push(text("No grievances handled by this officer").style(text::secondary));
    }
    for grievance in &state.grievances.grievances {
        let student = grievance.student_id.as_ref().map(|s| s.name.as_str()).unwrap_or("-");
        let line = row![
            cell(text(format!("#{}", grievance.short_id())), 1),
            cell(text(&grievance.subject), 4),
            cell(text(student), 2),
            cell(status_badge(app, grievance.status), 2),
            cell(text(grievance.created_at.as_deref().map(display_date).unwrap_or_default()), 2),
        ]
        .spacing(10)
        .align_y(Alignment::Center);
        list = list.push(
            button(line)
                .style(button::text)
                .width(Length::Fill)
                .on_press(Message::OpenGrievance(grievance.clone())),
        );
    }
    list
}

pub fn officer_detail_screen(app: &App) -> Container<Message> {
    let state = &app.officer_detail;

    let back = button(icon_button_content(fa_icon_solid("arrow-left").style(move |_| text::base(&app.theme)), "Officers"))
        .style(button::secondary)
        .on_press(Message::GoToOfficers);

    let mut content = Column::new().spacing(20).padding(20).push(back);

    match &state.detail {
        None if state.loading_detail => content = content.push(text("Loading officer...")),
        None => {}
        Some(detail) => {
            let stats = detail.stats;
            content = content.push(profile_card(app, detail)).push(
                row![
                    stat_card(app, "Claimed", stats.claimed, None),
                    stat_card(app, "In progress", stats.in_progress, None),
                    stat_card(app, "Resolved", stats.resolved, None),
                    stat_card(app, "Rejected", stats.rejected, None),
                ]
                .spacing(15),
            );
        }
    }

    content = content
        .push(
            row![
                text("Handled grievances").size(20),
                horizontal_space(),
                dropdown(&GRIEVANCE_FILTERS, state.status, Message::OfficerGrievanceStatus),
            ]
            .align_y(Alignment::Center),
        )
        .push(Scrollable::new(grievance_list(app)).height(Length::Fill))
        .push(pagination(state.grievances.page_info(), Message::OfficerGrievancePage));

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
}
