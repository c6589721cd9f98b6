use image::ImageFormat;
use reqwest::Method;
use reqwest::multipart::{Form, Part};
use serde_json::json;
use crate::api::{ApiClient, ListQuery};
use crate::error::ApiError;
use crate::models::{DashboardData, GrievancePage, LoginResponse, ProfileUpdateResponse};

/// Photo chosen on the profile screen.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoUpload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl PhotoUpload {
    /// Accepts PNG and JPEG files that actually decode.
    pub fn from_image(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, ApiError> {
        let mime = match image::guess_format(&bytes) {
            Ok(ImageFormat::Png) => "image/png",
            Ok(ImageFormat::Jpeg) => "image/jpeg",
            _ => return Err(ApiError::Validation("Please choose a PNG or JPEG image".to_string())),
        };
        image::load_from_memory(&bytes)
            .map_err(|e| ApiError::Validation(format!("Could not read image: {e}")))?;
        Ok(Self { file_name: file_name.into(), mime: mime.to_string(), bytes })
    }
}

/// Profile edit; blank text fields are not sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
    pub password: String,
    pub photo: Option<PhotoUpload>,
}

impl ProfileUpdate {
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        [("name", &self.name), ("email", &self.email), ("password", &self.password)]
            .into_iter()
            .filter(|(_, value)| !value.trim().is_empty())
            .map(|(key, value)| (key, value.trim().to_string()))
            .collect()
    }

    fn into_form(self) -> Result<Form, ApiError> {
        let mut form = Form::new();
        for (key, value) in self.text_fields() {
            form = form.text(key, value);
        }
        if let Some(photo) = self.photo {
            let part = Part::bytes(photo.bytes)
                .file_name(photo.file_name)
                .mime_str(&photo.mime)?;
            form = form.part("profilePhoto", part);
        }
        Ok(form)
    }
}

pub async fn login(client: &ApiClient, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
    let builder = client
        .request(Method::POST, "/admin/login")
        .json(&json!({ "email": email.trim(), "password": password }));
    client.send_json(builder).await
}

pub async fn update_profile(
    client: &ApiClient,
    admin_id: &str,
    update: ProfileUpdate,
) -> Result<ProfileUpdateResponse, ApiError> {
    if admin_id.is_empty() {
        return Err(ApiError::Validation(
            "Admin ID not found. Please logout and login again.".to_string(),
        ));
    }
    let form = update.into_form()?;
    let builder = client
        .request(Method::PUT, &format!("/admin/update/{admin_id}"))
        .multipart(form);
    client.send_json(builder).await
}

/// Paged grievance list. Also serves the officer detail screen through
/// `ListQuery::officer`.
pub async fn fetch_grievances(client: &ApiClient, query: &ListQuery) -> Result<GrievancePage, ApiError> {
    let builder = client
        .request(Method::GET, "/admin/grievance/list")
        .query(&query.to_pairs());
    client.send_json(builder).await
}

/// Profile photo bytes for the avatar; relative upload paths are resolved
/// against the server.
pub async fn fetch_photo(client: &ApiClient, url: &str) -> Result<Vec<u8>, ApiError> {
    client.fetch_bytes(&client.absolute(url)).await
}

pub async fn dashboard_stats(client: &ApiClient) -> Result<DashboardData, ApiError> {
    let builder = client.request(Method::GET, "/admin/dashboard/stats");
    client.send_json(builder).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_filled_fields_are_sent() {
        let update = ProfileUpdate {
            name: "Registrar".into(),
            email: " ".into(),
            password: String::new(),
            photo: None,
        };
        assert_eq!(update.text_fields(), vec![("name", "Registrar".to_string())]);
    }

    #[test]
    fn photo_must_be_a_real_image() {
        let mut png = Vec::new();
        image::DynamicImage::ImageRgb8(image::RgbImage::new(2, 2))
            .write_to(&mut std::io::Cursor::new(&mut png), ImageFormat::Png)
            .unwrap();
        let photo = PhotoUpload::from_image("me.png", png).unwrap();
        assert_eq!(photo.mime, "image/png");

        let err = PhotoUpload::from_image("notes.txt", b"hello".to_vec()).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn missing_admin_id_fails_before_sending() {
        let client = ApiClient::new("http://127.0.0.1:9");
        let err = update_profile(&client, "", ProfileUpdate::default()).await.unwrap_err();
        assert_eq!(
            err.user_message("Failed to update profile"),
            "Admin ID not found. Please logout and login again."
        );
    }

    #[test]
    fn grievance_query_goes_into_the_url() {
        let client = ApiClient::new("http://localhost:5000/api");
        let query = ListQuery::new(2, 10).status("Resolved");
        let request = client
            .request(Method::GET, "/admin/grievance/list")
            .query(&query.to_pairs())
            .build()
            .unwrap();
        assert_eq!(
            request.url().as_str(),
            "http://localhost:5000/api/admin/grievance/list?page=2&limit=10&status=Resolved"
        );
    }
}
