use iced::widget::{button, column, horizontal_space, row, text, text_input, Column, Container, Row, Scrollable, Stack};
use iced::{Alignment, Element, Length};
use iced_aw::date_picker;
use iced_font_awesome::fa_icon_solid;
use crate::app::state::{StudentField, StudentFormState, ACTIVITY_FILTERS};
use crate::app::{App, Message};
use crate::models::{display_date, Student};
use super::widgets::{
    cell, detail_line, dropdown, header_cell, icon_button_content, modal, or_dash, pagination,
    stat_card, toggle,
};

fn student_table(app: &App) -> Column<Message> {
    let state = &app.students;
    let header = row![
        header_cell("Name", 3),
        header_cell("Enrollment", 2),
        header_cell("Email", 3),
        header_cell("Branch", 1),
        header_cell("Year", 1),
        header_cell("Active", 1),
        header_cell("", 1),
    ]
    .spacing(10);

    let mut table = Column::new().spacing(8).push(header);
    if state.tracker.is_loading() {
        table = table.push(text("Loading students...").style(text::secondary));
    } else if state.data.students.is_empty() {
        table = table.push(text("No students found").style(text::secondary));
    }

    for student in &state.data.students {
        let pending = state.toggling_id.as_deref() == Some(student.id.as_str());
        table = table.push(
            row![
                cell(text(&student.name), 3),
                cell(text(&student.enrollment_number), 2),
                cell(text(or_dash(&student.email)), 3),
                cell(text(or_dash(&student.branch)), 1),
                cell(text(or_dash(&student.year)), 1),
                cell(toggle(student.is_active, pending, Message::ToggleStudentStatus(student.id.clone())), 1),
                cell(button("View").style(button::secondary).on_press(Message::ViewStudent(student.clone())), 1),
            ]
            .spacing(10)
            .align_y(Alignment::Center),
        );
    }
    table
}

fn view_modal<'a>(app: &'a App, student: &'a Student) -> Element<'a, Message> {
    let body = column![
        detail_line("Name", &student.name),
        detail_line("Enrollment no.", &student.enrollment_number),
        detail_line("Date of birth", display_date(&student.dob)),
        detail_line("Mobile", or_dash(&student.mobile)),
        detail_line("Email", or_dash(&student.email)),
        detail_line("Branch", or_dash(&student.branch)),
        detail_line("Year", or_dash(&student.year)),
        detail_line("College", or_dash(&student.college)),
        detail_line("Status", if student.is_active { "Active" } else { "Inactive" }),
    ]
    .spacing(8);
    modal(app, "Student details", body, Message::CloseStudentView, 520.0)
}

fn field<'a>(placeholder: &'a str, value: &'a str, field: StudentField) -> Element<'a, Message> {
    text_input(placeholder, value)
        .on_input(move |v| Message::NewStudentField(field, v))
        .padding(8)
        .into()
}

fn create_modal<'a>(app: &'a App, form: &'a StudentFormState) -> Element<'a, Message> {
    let student = &form.student;
    let dob_label = if student.dob.is_empty() { "Date of birth *" } else { student.dob.as_str() };
    let dob_button = button(icon_button_content(
        fa_icon_solid("calendar").style(move |_| text::base(&app.theme)),
        dob_label,
    ))
    .style(button::secondary)
    .on_press(Message::ChooseStudentDob);
    let dob = date_picker(
        form.show_picker,
        form.dob,
        dob_button,
        Message::CancelStudentDob,
        Message::SubmitStudentDob,
    );

    let mut body = column![
        field("Full name *", &student.name, StudentField::Name),
        field("Enrollment number *", &student.enrollment_number, StudentField::EnrollmentNumber),
        dob,
        field("Mobile", &student.mobile, StudentField::Mobile),
        field("Email", &student.email, StudentField::Email),
        row![
            field("Branch", &student.branch, StudentField::Branch),
            field("Year", &student.year, StudentField::Year),
        ]
        .spacing(10),
        field("College", &student.college, StudentField::College),
    ]
    .spacing(10);

    if let Some(error) = &form.error {
        body = body.push(text(error).style(text::danger));
    }
    body = body.push(
        row![
            horizontal_space(),
            button("Cancel").style(button::secondary).on_press_maybe((!form.submitting).then_some(Message::CloseCreateStudent)),
            button(if form.submitting { "Creating..." } else { "Create" })
                .on_press_maybe((!form.submitting).then_some(Message::SubmitNewStudent)),
        ]
        .spacing(10),
    );
    modal(app, "Add student", body, Message::CloseCreateStudent, 520.0)
}

pub fn students_screen(app: &App) -> Container<Message> {
    let state = &app.students;

    let header = row![
        text("Students").size(30),
        horizontal_space(),
        button("Sample format").style(button::secondary).on_press(Message::DownloadSample),
        button(if state.uploading { "Uploading..." } else { "Upload Excel" })
            .style(button::secondary)
            .on_press_maybe((!state.uploading).then_some(Message::UploadExcel)),
        button("Import with preview").style(button::secondary).on_press(Message::GoToStudentImport),
        button(icon_button_content(fa_icon_solid("plus").style(move |_| text::base(&app.theme)), "Add Student"))
            .on_press(Message::OpenCreateStudent),
    ]
    .spacing(10)
    .align_y(Alignment::Center);

    let stats = &state.data.stats;
    let cards = row![
        stat_card(app, "Total students", stats.total, None),
        stat_card(app, "Active", stats.active, None),
        stat_card(app, "Inactive", stats.inactive, None),
    ]
    .spacing(15);

    let filters: Row<Message> = row![
        text_input("Search by name, enrollment or email", &state.search)
            .on_input(Message::StudentSearchChanged)
            .padding(8),
        dropdown(&ACTIVITY_FILTERS, state.status, Message::StudentStatusFilter),
    ]
    .spacing(10);

    let base = column![
        header,
        cards,
        filters,
        Scrollable::new(student_table(app)).height(Length::Fill),
        pagination(state.data.page_info(), Message::StudentPageChanged),
    ]
    .spacing(20)
    .padding(20);

    let mut ui_stack = Stack::new().push(base);
    if let Some(student) = &state.viewing {
        ui_stack = ui_stack.push(view_modal(app, student));
    }
    if let Some(form) = &state.create_form {
        ui_stack = ui_stack.push(create_modal(app, form));
    }

    Container::new(ui_stack)
        .width(Length::Fill)
        .height(Length::Fill)
}
