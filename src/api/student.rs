use std::path::Path;
use reqwest::Method;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde_json::json;
use crate::api::{ApiClient, ListQuery};
use crate::error::ApiError;
use crate::models::{BulkCreateResponse, ImportRecord, MessageResponse, NewStudent, Student, StudentListBody, StudentPage};

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub async fn list(client: &ApiClient, query: &ListQuery) -> Result<StudentPage, ApiError> {
    let builder = client
        .request(Method::GET, "/student/admin/get-all")
        .query(&query.to_pairs());
    let body: StudentListBody = client.send_json(builder).await?;
    Ok(body.into())
}

pub async fn create(client: &ApiClient, student: &NewStudent) -> Result<MessageResponse, ApiError> {
    let builder = client.request(Method::POST, "/student/admin/create").json(student);
    client.send_json(builder).await
}

pub async fn toggle_status(client: &ApiClient, id: &str) -> Result<MessageResponse, ApiError> {
    let builder = client.request(Method::POST, &format!("/student/admin/toggle-status/{id}"));
    client.send_json(builder).await
}

/// Hands the workbook to the server as is; the server parses it.
pub async fn import_excel(client: &ApiClient, path: &Path) -> Result<MessageResponse, ApiError> {
    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "students.xlsx".to_string());
    let part = Part::bytes(bytes).file_name(file_name).mime_str(XLSX_MIME)?;
    let builder = client
        .request(Method::POST, "/student/admin/import-excel")
        .multipart(Form::new().part("file", part));
    client.send_json(builder).await
}

pub async fn bulk_create(client: &ApiClient, students: Vec<ImportRecord>) -> Result<BulkCreateResponse, ApiError> {
    let builder = client
        .request(Method::POST, "/student/admin/bulk-create")
        .json(&json!({ "students": students }));
    client.send_json(builder).await
}

/// The detail endpoint answers either with the student itself or wrapped in
/// `{ student }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum StudentBody {
    Wrapped { student: Student },
    Plain(Student),
}

pub async fn get_by_id(client: &ApiClient, id: &str) -> Result<Student, ApiError> {
    let builder = client.request(Method::GET, &format!("/student/admin/get/{id}"));
    let body: StudentBody = client.send_json(builder).await?;
    Ok(match body {
        StudentBody::Wrapped { student } | StudentBody::Plain(student) => student,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn student_body_shapes() {
        let wrapped: StudentBody =
            serde_json::from_str(r#"{ "student": { "_id": "s1", "name": "Asha" } }"#).unwrap();
        let plain: StudentBody = serde_json::from_str(r#"{ "_id": "s2", "name": "Ravi" }"#).unwrap();
        let names: Vec<String> = [wrapped, plain]
            .into_iter()
            .map(|b| match b {
                StudentBody::Wrapped { student } | StudentBody::Plain(student) => student.name,
            })
            .collect();
        assert_eq!(names, vec!["Asha", "Ravi"]);
    }

    #[tokio::test]
    async fn upload_of_missing_file_is_an_io_error() {
        let client = ApiClient::new("http://127.0.0.1:9");
        let err = import_excel(&client, Path::new("/definitely/not/here.xlsx")).await.unwrap_err();
        assert!(matches!(err, ApiError::Io(_)));
    }
}
