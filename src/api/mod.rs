//! Thin wrappers over the GRS REST API. Each function maps one call to one
//! HTTP request and hands back the decoded body; there is no caching and no
//! retrying.

pub mod admin;
pub mod officer;
pub mod student;

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use crate::error::ApiError;
use crate::models::MessageResponse;

/// Base URL plus the bearer token of the signed-in admin. Cloning is cheap,
/// every async task gets its own copy.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Upload paths come back relative to the server root at times.
    pub fn absolute(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            return url.to_string();
        }
        let root = self.base_url.trim_end_matches("/api");
        format!("{}/{}", root, url.trim_start_matches('/'))
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        log::debug!("{method} {url}");
        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends and decodes a JSON body.
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = check_status(builder.send().await?).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Downloads raw bytes, used for profile photos hosted by the backend.
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        let response = check_status(self.http.get(url).send().await?).await?;
        Ok(response.bytes().await?.to_vec())
    }
}

async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<MessageResponse>(&body)
        .ok()
        .and_then(|m| m.message);
    log::warn!("request failed with {status}: {}", message.as_deref().unwrap_or("no message"));
    Err(ApiError::Status { status: status.as_u16(), message })
}

/// `page` and `limit` always; search, status and officer only when set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    pub page: u32,
    pub limit: u32,
    pub search: String,
    pub status: String,
    pub officer_id: Option<String>,
}

impl ListQuery {
    pub fn new(page: u32, limit: u32) -> Self {
        Self { page: page.max(1), limit, ..Self::default() }
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn officer(mut self, officer_id: impl Into<String>) -> Self {
        self.officer_id = Some(officer_id.into());
        self
    }

    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", self.page.to_string()), ("limit", self.limit.to_string())];
        let search = self.search.trim();
        if !search.is_empty() {
            pairs.push(("search", search.to_string()));
        }
        if !self.status.is_empty() {
            pairs.push(("status", self.status.clone()));
        }
        if let Some(officer_id) = self.officer_id.as_deref().filter(|id| !id.is_empty()) {
            pairs.push(("officerId", officer_id.to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_join_cleanly() {
        let client = ApiClient::new("http://localhost:5000/api/");
        assert_eq!(client.url("/admin/login"), "http://localhost:5000/api/admin/login");
        assert_eq!(client.url("student/admin/get-all"), "http://localhost:5000/api/student/admin/get-all");
    }

    #[test]
    fn relative_uploads_resolve_against_server_root() {
        let client = ApiClient::new("http://localhost:5000/api");
        assert_eq!(client.absolute("/uploads/a.png"), "http://localhost:5000/uploads/a.png");
        assert_eq!(client.absolute("https://cdn.example/a.png"), "https://cdn.example/a.png");
    }

    #[test]
    fn query_skips_empty_filters() {
        let query = ListQuery::new(1, 10).search("  ").status("");
        assert_eq!(
            query.to_pairs(),
            vec![("page", "1".to_string()), ("limit", "10".to_string())]
        );
    }

    #[test]
    fn query_carries_filters() {
        let query = ListQuery::new(3, 5).search(" hostel ").status("In Progress").officer("o1");
        assert_eq!(
            query.to_pairs(),
            vec![
                ("page", "3".to_string()),
                ("limit", "5".to_string()),
                ("search", "hostel".to_string()),
                ("status", "In Progress".to_string()),
                ("officerId", "o1".to_string()),
            ]
        );
    }

    #[test]
    fn page_zero_becomes_one() {
        assert_eq!(ListQuery::new(0, 10).page, 1);
    }

    #[test]
    fn bearer_header_only_when_signed_in() {
        let mut client = ApiClient::new("http://localhost:5000");
        let anonymous = client.request(Method::GET, "/admin/dashboard/stats").build().unwrap();
        assert!(anonymous.headers().get("authorization").is_none());

        client.set_token(Some("tok-1".to_string()));
        let signed = client.request(Method::GET, "/admin/dashboard/stats").build().unwrap();
        assert_eq!(signed.headers()["authorization"], "Bearer tok-1");
    }
}
