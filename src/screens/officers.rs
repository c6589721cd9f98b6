use iced::widget::{button, column, horizontal_space, row, text, text_input, Column, Container, Scrollable, Stack};
use iced::{Alignment, Element, Length};
use iced_font_awesome::fa_icon_solid;
use crate::app::state::{OfficerField, OfficerFormState, ACTIVITY_FILTERS};
use crate::app::{App, Message};
use crate::models::Officer;
use super::widgets::{
    cell, dropdown, header_cell, icon_button_content, modal, or_dash, pagination, stat_card, toggle,
};

fn officer_table(app: &App) -> Column<Message> {
    let state = &app.officers;
    let header = row![
        header_cell("Name", 2),
        header_cell("Contact", 3),
        header_cell("Designation", 3),
        header_cell("Claimed", 1),
        header_cell("Active", 1),
        header_cell("", 3),
    ]
    .spacing(10);

    let mut table = Column::new().spacing(8).push(header);
    if state.tracker.is_loading() {
        table = table.push(text("Loading officers...").style(text::secondary));
    } else if state.data.officers.is_empty() {
        table = table.push(text("No officers found").style(text::secondary));
    }

    for officer in &state.data.officers {
        let pending = state.toggling_id.as_deref() == Some(officer.id.as_str());
        let actions = row![
            button("View").style(button::secondary).on_press(Message::OpenOfficer(officer.id.clone())),
            button("Edit").style(button::secondary).on_press(Message::EditOfficer(officer.clone())),
            button("Delete").style(button::danger).on_press(Message::AskDeleteOfficer(officer.clone())),
        ]
        .spacing(5);
        table = table.push(
            row![
                cell(text(&officer.name), 2),
                cell(column![text(or_dash(&officer.email)), text(or_dash(&officer.mobile)).size(13)], 3),
                cell(
                    column![text(or_dash(&officer.designation)), text(or_dash(&officer.department)).size(13)],
                    3
                ),
                cell(text(officer.total_claimed.to_string()), 1),
                cell(toggle(officer.is_active, pending, Message::ToggleOfficerStatus(officer.id.clone())), 1),
                cell(actions, 3),
            ]
            .spacing(10)
            .align_y(Alignment::Center),
        );
    }
    table
}

fn field<'a>(placeholder: &'a str, value: &'a str, field: OfficerField) -> Element<'a, Message> {
    text_input(placeholder, value)
        .on_input(move |v| Message::OfficerFieldChanged(field, v))
        .secure(field == OfficerField::Password)
        .padding(8)
        .into()
}

fn form_modal<'a>(app: &'a App, state: &'a OfficerFormState) -> Element<'a, Message> {
    let form = &state.form;
    let editing = state.editing.is_some();
    let password_hint = if editing { "New password (leave blank to keep)" } else { "Password *" };

    let mut body = column![
        field("Full name *", &form.name, OfficerField::Name),
        field("Mobile *", &form.mobile, OfficerField::Mobile),
        field("Email *", &form.email, OfficerField::Email),
        field(password_hint, &form.password, OfficerField::Password),
        field("Designation", &form.designation, OfficerField::Designation),
        field("Department", &form.department, OfficerField::Department),
    ]
    .spacing(10);

    if let Some(error) = &state.error {
        body = body.push(text(error).style(text::danger));
    }
    let submit_label = match (state.submitting, editing) {
        (true, _) => "Saving...",
        (false, true) => "Update",
        (false, false) => "Create",
    };
    body = body.push(
        row![
            horizontal_space(),
            button("Cancel").style(button::secondary).on_press_maybe((!state.submitting).then_some(Message::CloseOfficerForm)),
            button(submit_label).on_press_maybe((!state.submitting).then_some(Message::SubmitOfficerForm)),
        ]
        .spacing(10),
    );
    let title = if editing { "Edit officer" } else { "Add officer" };
    modal(app, title, body, Message::CloseOfficerForm, 480.0)
}

fn delete_modal<'a>(app: &'a App, officer: &'a Officer) -> Element<'a, Message> {
    let deleting = app.officers.deleting;
    let body = column![
        text("Are you sure you want to delete this officer?"),
        text(&officer.name).size(18),
        row![
            horizontal_space(),
            button("Cancel").style(button::secondary).on_press_maybe((!deleting).then_some(Message::CancelDeleteOfficer)),
            button(if deleting { "Deleting..." } else { "Delete" })
                .style(button::danger)
                .on_press_maybe((!deleting).then_some(Message::ConfirmDeleteOfficer)),
        ]
        .spacing(10),
    ]
    .spacing(15);
    modal(app, "Delete officer", body, Message::CancelDeleteOfficer, 420.0)
}

pub fn officers_screen(app: &App) -> Container<Message> {
    let state = &app.officers;

    let header = row![
        text("Officers").size(30),
        horizontal_space(),
        button(icon_button_content(fa_icon_solid("plus").style(move |_| text::base(&app.theme)), "Add Officer"))
            .on_press(Message::OpenCreateOfficer),
    ]
    .align_y(Alignment::Center);

    let stats = &state.data.stats;
    let cards = row![
        stat_card(app, "Total officers", stats.total, None),
        stat_card(app, "Active", stats.active, None),
        stat_card(app, "Inactive", stats.inactive, None),
    ]
    .spacing(15);

    let filters = row![
        text_input("Search by name, email or department", &state.search)
            .on_input(Message::OfficerSearchChanged)
            .padding(8),
        dropdown(&ACTIVITY_FILTERS, state.status, Message::OfficerStatusFilter),
    ]
    .spacing(10);

    let base = column![
        header,
        cards,
        filters,
        Scrollable::new(officer_table(app)).height(Length::Fill),
        pagination(state.data.page_info(), Message::OfficerPageChanged),
    ]
    .spacing(20)
    .padding(20);

    let mut ui_stack = Stack::new().push(base);
    if let Some(form) = &state.form {
        ui_stack = ui_stack.push(form_modal(app, form));
    }
    if let Some(officer) = &state.pending_delete {
        ui_stack = ui_stack.push(delete_modal(app, officer));
    }

    Container::new(ui_stack)
        .width(Length::Fill)
        .height(Length::Fill)
}
