use iced::widget::container::bordered_box;
use iced::widget::{button, checkbox, column, horizontal_space, row, text, Column, Container, Scrollable};
use iced::{Alignment, Length};
use iced_font_awesome::fa_icon_solid;
use crate::app::{App, Message};
use crate::import::REQUIRED_COLUMNS;
use super::widgets::{cell, header_cell, icon_button_content, or_dash};

static PREVIEW_COLUMNS: [(&str, &str, u16); 8] = [
    ("name", "Name", 3),
    ("enrollmentNumber", "Enrollment", 2),
    ("dob", "DOB", 2),
    ("mobile", "Mobile", 2),
    ("email", "Email", 3),
    ("branch", "Branch", 1),
    ("year", "Year", 1),
    ("college", "College", 2),
];

fn preview_table(app: &App) -> Column<Message> {
    let preview = &app.import.preview;
    let header = PREVIEW_COLUMNS.iter().fold(
        row![cell(
            checkbox("", preview.all_selected()).on_toggle(|_| Message::TogglePreviewAll),
            1
        )]
        .spacing(10),
        |r, (_, label, portion)| r.push(header_cell(label, *portion)),
    );

    preview.rows().iter().fold(Column::new().spacing(6).push(header), |table, preview_row| {
        let id = preview_row.preview_id;
        let line = PREVIEW_COLUMNS.iter().fold(
            row![cell(
                checkbox("", preview.is_selected(id)).on_toggle(move |_| Message::TogglePreviewRow(id)),
                1
            )]
            .spacing(10)
            .align_y(Alignment::Center),
            |r, (key, _, portion)| r.push(cell(text(or_dash(preview_row.field(key))), *portion)),
        );
        table.push(line)
    })
}

pub fn student_import_screen(app: &App) -> Container<Message> {
    let state = &app.import;
    let busy = state.reading || state.importing;

    let header = row![
        button(icon_button_content(fa_icon_solid("arrow-left").style(move |_| text::base(&app.theme)), "Back"))
            .style(button::secondary)
            .on_press_maybe((!state.importing).then_some(Message::GoToStudents)),
        text("Import students").size(30),
    ]
    .spacing(15)
    .align_y(Alignment::Center);

    let picker = Container::new(
        column![
            row![
                button(if state.reading { "Reading..." } else { "Choose Excel file" })
                    .on_press_maybe((!busy).then_some(Message::ChooseImportFile)),
                text(state.file_name.as_deref().unwrap_or("No file selected")).style(text::secondary),
            ]
            .spacing(15)
            .align_y(Alignment::Center),
            text(format!("Required columns: {}", REQUIRED_COLUMNS.join(", "))).size(13),
        ]
        .spacing(10),
    )
    .style(move |_| bordered_box(&app.theme))
    .padding(15)
    .width(Length::Fill);

    let mut content = column![header, picker].spacing(20).padding(20);

    if !state.preview.is_empty() {
        let selected = state.preview.selected_count();
        let actions = row![
            text(format!("{selected} of {} rows selected", state.preview.rows().len())),
            horizontal_space(),
            button(text(if state.importing {
                "Importing...".to_string()
            } else {
                format!("Import {selected} students")
            }))
            .on_press_maybe((!busy).then_some(Message::SubmitImport)),
        ]
        .align_y(Alignment::Center);
        content = content
            .push(actions)
            .push(Scrollable::new(preview_table(app)).height(Length::Fill));
    }

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
}
