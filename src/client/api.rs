//! Typed HTTP client for the storefront API.

use reqwest::{multipart, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::constants::UPLOAD_FIELD_NAME;
use crate::models::{
    LoginRequest, LoginResponse, MessageResponse, ProfileImageRequest, ProfileImageResponse,
    Rabbit, RabbitInput, RabbitResponse, RegisterRequest, UpdateUserRequest, UploadResponse, User,
};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response; `message` is the server's `error` or `message` text
    #[error("{message}")]
    Api { status: u16, message: String },
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
        }
    }
}

/// Client for one storefront server
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = check(request.send().await?).await?;
        Ok(response.json().await?)
    }

    // -------------------------------------------------------------------------
    // Rabbits
    // -------------------------------------------------------------------------

    pub async fn list_rabbits(&self) -> Result<Vec<Rabbit>, ClientError> {
        self.send(self.http.get(self.url("/api/rabbits"))).await
    }

    pub async fn get_rabbit(&self, rabbit_id: i32) -> Result<Rabbit, ClientError> {
        self.send(self.http.get(self.url(&format!("/api/rabbits/{}", rabbit_id))))
            .await
    }

    pub async fn create_rabbit(&self, input: &RabbitInput) -> Result<RabbitResponse, ClientError> {
        self.send(self.http.post(self.url("/api/rabbits")).json(input))
            .await
    }

    pub async fn update_rabbit(
        &self,
        rabbit_id: i32,
        input: &RabbitInput,
    ) -> Result<RabbitResponse, ClientError> {
        self.send(
            self.http
                .put(self.url(&format!("/api/rabbits/{}", rabbit_id)))
                .json(input),
        )
        .await
    }

    pub async fn delete_rabbit(&self, rabbit_id: i32) -> Result<MessageResponse, ClientError> {
        self.send(
            self.http
                .delete(self.url(&format!("/api/rabbits/{}", rabbit_id))),
        )
        .await
    }

    // -------------------------------------------------------------------------
    // Accounts
    // -------------------------------------------------------------------------

    pub async fn register(&self, request: &RegisterRequest) -> Result<MessageResponse, ClientError> {
        self.send(self.http.post(self.url("/api/register")).json(request))
            .await
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ClientError> {
        let body = LoginRequest {
            username: Some(username.to_string()),
            password: Some(password.to_string()),
        };
        self.send(self.http.post(self.url("/api/login")).json(&body))
            .await
    }

    pub async fn list_users(&self) -> Result<Vec<User>, ClientError> {
        self.send(self.http.get(self.url("/api/users"))).await
    }

    pub async fn get_user(&self, user_id: i32) -> Result<User, ClientError> {
        self.send(self.http.get(self.url(&format!("/api/users/{}", user_id))))
            .await
    }

    pub async fn update_user(
        &self,
        user_id: i32,
        request: &UpdateUserRequest,
    ) -> Result<User, ClientError> {
        self.send(
            self.http
                .put(self.url(&format!("/api/users/{}", user_id)))
                .json(request),
        )
        .await
    }

    pub async fn update_profile_image(
        &self,
        user_id: i32,
        image_url: &str,
    ) -> Result<ProfileImageResponse, ClientError> {
        let body = ProfileImageRequest {
            profile_image: Some(image_url.to_string()),
        };
        self.send(
            self.http
                .post(self.url(&format!("/api/users/{}/profile-image", user_id)))
                .json(&body),
        )
        .await
    }

    pub async fn delete_user(&self, user_id: i32) -> Result<MessageResponse, ClientError> {
        self.send(self.http.delete(self.url(&format!("/api/users/{}", user_id))))
            .await
    }

    // -------------------------------------------------------------------------
    // Files
    // -------------------------------------------------------------------------

    /// Upload one file under the profile-image field
    pub async fn upload(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadResponse, ClientError> {
        let part = multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = multipart::Form::new().part(UPLOAD_FIELD_NAME, part);
        self.send(self.http.post(self.url("/api/upload")).multipart(form))
            .await
    }

    /// Fetch the raw bytes behind a URL returned by [`ApiClient::upload`]
    pub async fn download(&self, url: &str) -> Result<Vec<u8>, ClientError> {
        let response = check(self.http.get(url).send().await?).await?;
        Ok(response.bytes().await?.to_vec())
    }
}

/// Turn a non-2xx response into [`ClientError::Api`]
async fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body: Value = response.json().await.unwrap_or(Value::Null);
    let message = error_message(&body)
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| status.to_string());

    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}

/// The server puts failure text under `error`, except register/login which use `message`
fn error_message(body: &Value) -> Option<String> {
    body.get("error")
        .or_else(|| body.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string)
}
