use iced::widget::{button, column, horizontal_space, row, text, text_input, Column, Container, Scrollable};
use iced::{Alignment, Length};
use crate::app::state::GRIEVANCE_FILTERS;
use crate::app::{App, Message};
use crate::models::display_date;
use super::widgets::{cell, dropdown, header_cell, pagination, stat_card, status_badge};

fn grievance_table(app: &App) -> Column<Message> {
    let state = &app.grievances;
    let header = row![
        header_cell("ID", 1),
        header_cell("Subject", 4),
        header_cell("Student", 2),
        header_cell("Officer", 2),
        header_cell("Status", 2),
        header_cell("Created", 2),
    ]
    .spacing(10);

    let mut table = Column::new().spacing(8).push(header);
    if state.tracker.is_loading() {
        table = table.push(text("Loading grievances...").style(text::secondary));
    } else if state.data.grievances.is_empty() {
        table = table.push(text("No grievances found").style(text::secondary));
    }

    for grievance in &state.data.grievances {
        let student = grievance.student_id.as_ref().map(|s| s.name.as_str()).unwrap_or("-");
        let officer = grievance.handled_by.as_ref().map(|o| o.name.as_str()).unwrap_or("Unassigned");
        let line = row![
            cell(text(format!("#{}", grievance.short_id())), 1),
            cell(text(&grievance.subject), 4),
            cell(text(student), 2),
            cell(text(officer), 2),
            cell(status_badge(app, grievance.status), 2),
            cell(text(grievance.created_at.as_deref().map(display_date).unwrap_or_default()), 2),
        ]
        .spacing(10)
        .align_y(Alignment::Center);
        table = table.push(
            button(line)
                .style(button::text)
                .width(Length::Fill)
                .on_press(Message::OpenGrievance(grievance.clone())),
        );
    }
    table
}

pub fn grievances_screen(app: &App) -> Container<Message> {
    let state = &app.grievances;
    let stats = &state.data.stats;

    let cards = row![
        stat_card(app, "Total", stats.total, None),
        stat_card(app, "Pending", stats.pending, None),
        stat_card(app, "In progress", stats.in_progress, None),
        stat_card(app, "Resolved", stats.resolved, None),
        stat_card(app, "Rejected", stats.rejected, None),
    ]
    .spacing(15);

    let filters = row![
        text_input("Search by subject or student", &state.search)
            .on_input(Message::GrievanceSearchChanged)
            .padding(8),
        dropdown(&GRIEVANCE_FILTERS, state.status, Message::GrievanceStatusFilter),
    ]
    .spacing(10);

    let footer = row![
        text(format!("{} grievances", state.data.total_items)).style(text::secondary),
        horizontal_space(),
        pagination(state.data.page_info(), Message::GrievancePageChanged),
    ]
    .align_y(Alignment::Center);

    let content = column![
        text("Grievances").size(30),
        cards,
        filters,
        Scrollable::new(grievance_table(app)).height(Length::Fill),
        footer,
    ]
    .spacing(20)
    .padding(20);

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
}
