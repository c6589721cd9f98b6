use iced::widget::container::bordered_box;
use iced::widget::{button, column, horizontal_space, row, text, Column, Container, Scrollable, Stack};
use iced::{Alignment, Element, Length};
use iced_font_awesome::fa_icon_solid;
use crate::app::{App, Message};
use crate::models::{display_date, Grievance};
use super::widgets::{detail_line, icon_button_content, modal, or_dash, status_badge};

fn date_or_dash(value: Option<&str>) -> String {
    value.filter(|v| !v.trim().is_empty()).map(display_date).unwrap_or_else(|| "-".to_string())
}

fn section<'a>(app: &'a App, title: &'a str, body: impl Into<Element<'a, Message>>) -> Container<'a, Message> {
    Container::new(column![text(title).size(18), body.into()].spacing(10))
        .style(move |_| bordered_box(&app.theme))
        .padding(15)
        .width(Length::Fill)
}

fn people<'a>(app: &'a App, grievance: &'a Grievance) -> Element<'a, Message> {
    let state = &app.grievance_detail;

    let student: Element<Message> = match &grievance.student_id {
        Some(s) => column![
            detail_line("Name", &s.name),
            detail_line("Enrollment no.", or_dash(&s.enrollment_number)),
            button(if state.fetching_student { "Loading..." } else { "View student" })
                .style(button::secondary)
                .on_press_maybe((!state.fetching_student).then_some(Message::ShowGrievanceStudent)),
        ]
        .spacing(8)
        .into(),
        None => text("Student record unavailable").style(text::secondary).into(),
    };

    let officer: Element<Message> = match &grievance.handled_by {
        Some(o) => column![
            detail_line("Name", &o.name),
            detail_line("Department", or_dash(&o.department)),
            button(if state.fetching_officer { "Loading..." } else { "View officer" })
                .style(button::secondary)
                .on_press_maybe((!state.fetching_officer).then_some(Message::ShowGrievanceOfficer)),
        ]
        .spacing(8)
        .into(),
        None => text("Not claimed by an officer yet").style(text::secondary).into(),
    };

    row![section(app, "Student", student), section(app, "Handled by", officer)]
        .spacing(15)
        .into()
}

fn student_modal(app: &App) -> Option<Element<'_, Message>> {
    let state = &app.grievance_detail;
    let student = state.student.as_ref().filter(|_| state.student_modal)?;
    let body = column![
        detail_line("Name", &student.name),
        detail_line("Enrollment no.", &student.enrollment_number),
        detail_line("Date of birth", display_date(&student.dob)),
        detail_line("Mobile", or_dash(&student.mobile)),
        detail_line("Email", or_dash(&student.email)),
        detail_line("Branch", or_dash(&student.branch)),
        detail_line("Year", or_dash(&student.year)),
        detail_line("College", or_dash(&student.college)),
    ]
    .spacing(8);
    Some(modal(app, "Student", body, Message::CloseGrievanceModals, 520.0))
}

fn officer_modal(app: &App) -> Option<Element<'_, Message>> {
    let state = &app.grievance_detail;
    let detail = state.officer.as_ref().filter(|_| state.officer_modal)?;
    let officer = &detail.officer;
    let body = column![
        detail_line("Name", &officer.name),
        detail_line("Designation", or_dash(&officer.designation)),
        detail_line("Department", or_dash(&officer.department)),
        detail_line("Email", or_dash(&officer.email)),
        detail_line("Mobile", or_dash(&officer.mobile)),
        detail_line("Claimed", detail.stats.claimed),
        detail_line("In progress", detail.stats.in_progress),
        detail_line("Resolved", detail.stats.resolved),
        detail_line("Rejected", detail.stats.rejected),
    ]
    .spacing(8);
    Some(modal(app, "Officer", body, Message::CloseGrievanceModals, 520.0))
}

pub fn grievance_detail_screen(app: &App) -> Container<Message> {
    let back = button(icon_button_content(fa_icon_solid("arrow-left").style(move |_| text::base(&app.theme)), "Back"))
        .style(button::secondary)
        .on_press(Message::BackFromGrievance);

    let Some(grievance) = &app.grievance_detail.grievance else {
        return Container::new(column![back, text("No grievance selected")].spacing(20).padding(20));
    };

    let mut facts = column![
        detail_line("Reference", format!("#{}", grievance.short_id())),
        detail_line("Created", date_or_dash(grievance.created_at.as_deref())),
        detail_line("Last updated", date_or_dash(grievance.updated_at.as_deref())),
        detail_line("Deadline", date_or_dash(grievance.deadline.as_deref())),
        detail_line("Remarks", grievance.remarks.as_deref().map(or_dash).unwrap_or("-")),
    ]
    .spacing(8);
    if let Some(url) = grievance.attachment.as_ref().filter(|u| !u.trim().is_empty()) {
        facts = facts.push(
            button(icon_button_content(fa_icon_solid("paperclip").style(move |_| text::base(&app.theme)), "Open attachment"))
                .style(button::secondary)
                .on_press(Message::OpenAttachment(url.clone())),
        );
    }

    let content: Column<Message> = column![
        back,
        row![text(&grievance.subject).size(28), horizontal_space(), status_badge(app, grievance.status)]
            .align_y(Alignment::Center),
        section(app, "Description", text(or_dash(&grievance.description))),
        section(app, "Details", facts),
        people(app, grievance),
    ]
    .spacing(20)
    .padding(20);

    let mut ui_stack = Stack::new().push(Scrollable::new(content).height(Length::Fill));
    if let Some(layer) = student_modal(app) {
        ui_stack = ui_stack.push(layer);
    }
    if let Some(layer) = officer_modal(app) {
        ui_stack = ui_stack.push(layer);
    }

    Container::new(ui_stack)
        .width(Length::Fill)
        .height(Length::Fill)
}
