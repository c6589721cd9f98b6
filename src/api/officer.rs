use reqwest::Method;
use crate::api::{ApiClient, ListQuery};
use crate::error::ApiError;
use crate::models::{MessageResponse, OfficerDetail, OfficerForm, OfficerPage};

pub async fn list(client: &ApiClient, query: &ListQuery) -> Result<OfficerPage, ApiError> {
    let builder = client
        .request(Method::GET, "/admin/officer/list")
        .query(&query.to_pairs());
    client.send_json(builder).await
}

pub async fn create(client: &ApiClient, form: &OfficerForm) -> Result<MessageResponse, ApiError> {
    let builder = client.request(Method::POST, "/admin/officer/create").json(form);
    client.send_json(builder).await
}

pub async fn update(client: &ApiClient, id: &str, form: &OfficerForm) -> Result<MessageResponse, ApiError> {
    let builder = client
        .request(Method::PATCH, &format!("/admin/officer/update/{id}"))
        .json(form);
    client.send_json(builder).await
}

pub async fn toggle_status(client: &ApiClient, id: &str) -> Result<MessageResponse, ApiError> {
    let builder = client.request(Method::PATCH, &format!("/admin/officer/toggle-status/{id}"));
    client.send_json(builder).await
}

pub async fn delete(client: &ApiClient, id: &str) -> Result<MessageResponse, ApiError> {
    let builder = client.request(Method::DELETE, &format!("/admin/officer/delete/{id}"));
    client.send_json(builder).await
}

pub async fn get_by_id(client: &ApiClient, id: &str) -> Result<OfficerDetail, ApiError> {
    let builder = client.request(Method::GET, &format!("/admin/officer/get/{id}"));
    client.send_json(builder).await
}
