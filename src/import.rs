//! Spreadsheet side of the bulk student import: reading a workbook into
//! preview rows, tracking which rows are selected, and writing the sample
//! format file.

use std::collections::BTreeSet;
use std::path::Path;
use serde_json::Value;
use umya_spreadsheet::{new_file, reader, writer};
use crate::error::ApiError;
use crate::models::ImportRecord;

pub const REQUIRED_COLUMNS: [&str; 3] = ["name", "enrollmentNumber", "dob"];

pub const SAMPLE_HEADERS: [&str; 8] = [
    "name",
    "enrollmentNumber",
    "dob",
    "mobile",
    "email",
    "branch",
    "year",
    "college",
];

const SAMPLE_ROW: [&str; 8] = [
    "Abhay Vishwakarma",
    "EN123456",
    "24/04/2004",
    "6280486823",
    "av96514290@gmail.com",
    "CSE",
    "3rd",
    "MMIT kushinagar",
];

#[derive(Debug, Clone, PartialEq)]
pub struct PreviewRow {
    pub preview_id: usize,
    pub fields: ImportRecord,
}

impl PreviewRow {
    pub fn field(&self, key: &str) -> &str {
        self.fields.get(key).and_then(Value::as_str).unwrap_or("")
    }
}

/// Parsed rows plus the set of rows the administrator wants to import.
/// The selection only ever holds ids of parsed rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportPreview {
    rows: Vec<PreviewRow>,
    selected: BTreeSet<usize>,
}

impl ImportPreview {
    /// Builds the preview from a header row and data rows. Rejects the whole
    /// sheet when a required column is missing or there is no data.
    pub fn from_table(headers: &[String], rows: &[Vec<String>]) -> Result<Self, ApiError> {
        let headers: Vec<String> = headers.iter().map(|h| h.trim().to_string()).collect();
        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|column| !headers.iter().any(|h| h == column))
            .collect();

        let data: Vec<&Vec<String>> = rows
            .iter()
            .filter(|row| row.iter().any(|cell| !cell.trim().is_empty()))
            .collect();

        if data.is_empty() {
            return Err(ApiError::Validation("Excel file is empty".to_string()));
        }
        if !missing.is_empty() {
            return Err(ApiError::Validation(format!(
                "Invalid Format! Missing: {}",
                missing.join(", ")
            )));
        }

        let rows: Vec<PreviewRow> = data
            .into_iter()
            .enumerate()
            .map(|(preview_id, cells)| {
                let mut fields = ImportRecord::new();
                for (i, header) in headers.iter().enumerate() {
                    if header.is_empty() {
                        continue;
                    }
                    let value = cells.get(i).map(|c| c.trim().to_string()).unwrap_or_default();
                    if value.is_empty() && !REQUIRED_COLUMNS.contains(&header.as_str()) && header != "mobile" {
                        continue;
                    }
                    fields.insert(header.clone(), Value::String(value));
                }
                PreviewRow { preview_id, fields }
            })
            .collect();

        let selected = rows.iter().map(|r| r.preview_id).collect();
        Ok(Self { rows, selected })
    }

    pub fn rows(&self) -> &[PreviewRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn is_selected(&self, preview_id: usize) -> bool {
        self.selected.contains(&preview_id)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn all_selected(&self) -> bool {
        !self.rows.is_empty() && self.selected.len() == self.rows.len()
    }

    pub fn toggle(&mut self, preview_id: usize) {
        if preview_id >= self.rows.len() {
            return;
        }
        if !self.selected.remove(&preview_id) {
            self.selected.insert(preview_id);
        }
    }

    pub fn toggle_all(&mut self) {
        if self.all_selected() {
            self.selected.clear();
        } else {
            self.selected = self.rows.iter().map(|r| r.preview_id).collect();
        }
    }

    /// The selected records in file order, without the preview id.
    pub fn selected_payload(&self) -> Vec<ImportRecord> {
        self.rows
            .iter()
            .filter(|row| self.selected.contains(&row.preview_id))
            .map(|row| row.fields.clone())
            .collect()
    }
}

/// Reads the first worksheet of an `.xlsx` file into a preview.
pub fn read_workbook(path: &Path) -> Result<ImportPreview, ApiError> {
    let book = reader::xlsx::read(path)
        .map_err(|err| ApiError::Spreadsheet(format!("Error reading Excel file: {err}")))?;
    let Some(sheet) = book.get_sheet_collection().first() else {
        return Err(ApiError::Validation("Excel file is empty".to_string()));
    };

    let (max_col, max_row) = sheet.get_highest_column_and_row();
    if max_row == 0 || max_col == 0 {
        return Err(ApiError::Validation("Excel file is empty".to_string()));
    }

    let headers: Vec<String> = (1..=max_col).map(|col| sheet.get_value((col, 1))).collect();
    let rows: Vec<Vec<String>> = (2..=max_row)
        .map(|row| (1..=max_col).map(|col| sheet.get_value((col, row))).collect())
        .collect();

    log::debug!("{}: {} columns, {} data rows", path.display(), max_col, rows.len());
    ImportPreview::from_table(&headers, &rows)
}

fn col_to_letter(col: usize) -> String {
    // A-Z is enough for the sample sheet
    ((b'A' + (col as u8) - 1) as char).to_string()
}

/// Writes a workbook with the expected headers and one example row.
pub fn write_sample_workbook(path: &Path) -> Result<(), ApiError> {
    write_table(path, &SAMPLE_HEADERS, &[SAMPLE_ROW.to_vec()])
}

pub(crate) fn write_table(path: &Path, headers: &[&str], rows: &[Vec<&str>]) -> Result<(), ApiError> {
    let mut book = new_file();
    let Some(sheet) = book.get_sheet_by_name_mut("Sheet1") else {
        return Err(ApiError::Spreadsheet("new workbook has no sheet".to_string()));
    };

    for (i, header) in headers.iter().enumerate() {
        let address = format!("{}1", col_to_letter(i + 1));
        sheet.get_cell_mut(&*address).set_value(*header);
    }
    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            let address = format!("{}{}", col_to_letter(c + 1), r + 2);
            sheet.get_cell_mut(&*address).set_value(*value);
        }
    }

    writer::xlsx::write(&book, path)
        .map_err(|err| ApiError::Spreadsheet(format!("Could not write {}: {err}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn sample_preview() -> ImportPreview {
        let headers = strings(&["name", "enrollmentNumber", "dob", "mobile"]);
        let rows = vec![
            strings(&["Asha", "EN1", "01/01/2004", "9876543210"]),
            strings(&["", "", "", ""]),
            strings(&["Ravi", "EN2", "02/02/2004", ""]),
            strings(&["Kiran", "EN3", "03/03/2004", "6280486823"]),
        ];
        ImportPreview::from_table(&headers, &rows).unwrap()
    }

    #[test]
    fn missing_columns_reject_the_file() {
        let headers = strings(&["name", "roll"]);
        let rows = vec![strings(&["Asha", "1"])];
        let err = ImportPreview::from_table(&headers, &rows).unwrap_err();
        assert_eq!(
            err.user_message("Error reading Excel file"),
            "Invalid Format! Missing: enrollmentNumber, dob"
        );
    }

    #[test]
    fn empty_sheet_is_rejected() {
        let headers = strings(&["name", "enrollmentNumber", "dob"]);
        let err = ImportPreview::from_table(&headers, &[]).unwrap_err();
        assert_eq!(err.user_message(""), "Excel file is empty");
    }

    #[test]
    fn every_row_starts_selected() {
        let preview = sample_preview();
        assert_eq!(preview.rows().len(), 3);
        assert!(preview.all_selected());
        assert_eq!(preview.rows()[1].field("name"), "Ravi");
        assert_eq!(preview.rows()[1].field("mobile"), "");
        assert_eq!(preview.rows()[2].preview_id, 2);
    }

    #[test]
    fn deselected_rows_are_not_submitted() {
        let mut preview = sample_preview();
        preview.toggle(1);
        assert!(!preview.is_selected(1));
        assert_eq!(preview.selected_count(), 2);

        let payload = preview.selected_payload();
        let names: Vec<&str> = payload.iter().map(|r| r["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["Asha", "Kiran"]);
        assert!(payload.iter().all(|r| !r.contains_key("previewId")));
    }

    #[test]
    fn toggle_all_flips_between_all_and_none() {
        let mut preview = sample_preview();
        preview.toggle_all();
        assert_eq!(preview.selected_count(), 0);
        assert!(preview.selected_payload().is_empty());

        preview.toggle(0);
        preview.toggle_all();
        assert!(preview.all_selected());
    }

    #[test]
    fn unknown_ids_do_not_enter_the_selection() {
        let mut preview = sample_preview();
        preview.toggle_all();
        preview.toggle(42);
        assert_eq!(preview.selected_count(), 0);
    }

    #[test]
    fn sample_workbook_parses_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("student_sample_format.xlsx");
        write_sample_workbook(&path).unwrap();

        let preview = read_workbook(&path).unwrap();
        assert_eq!(preview.rows().len(), 1);
        let row = &preview.rows()[0];
        assert_eq!(row.field("enrollmentNumber"), "EN123456");
        assert_eq!(row.field("college"), "MMIT kushinagar");
    }

    #[test]
    fn workbook_without_required_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.xlsx");
        write_table(&path, &["name", "dob"], &[vec!["Asha", "01/01/2004"]]).unwrap();

        let err = read_workbook(&path).unwrap_err();
        assert_eq!(err.user_message(""), "Invalid Format! Missing: enrollmentNumber");
    }
}
