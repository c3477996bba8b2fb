//! HTTP client for the library service.
//!
//! Every outbound call goes through [`ApiClient::request`], which attaches
//! the session token and turns transport and HTTP failures into
//! [`ApiError`]s. There are no retries and no response caching.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

use super::error::ApiError;
use super::models::{
    Book, Loan, LoginRequest, Member, Profile, ProfileUpdate, RegisterRequest, TokenResponse,
};
use crate::config::ClientConfig;
use crate::session::SessionStore;
use crate::traits::LibraryApi;

/// Default URL for the library service.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// A successful response body.
#[derive(Debug, Clone)]
pub struct Payload {
    pub status: u16,
    pub body: Bytes,
}

impl Payload {
    pub fn is_empty(&self) -> bool {
        self.body.iter().all(u8::is_ascii_whitespace)
    }

    /// Parse the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_slice(&self.body).map_err(|e| {
            let raw = String::from_utf8_lossy(&self.body);
            ApiError::invalid_response(
                self.status,
                format!(
                    "Invalid response format: {}. Response: {}",
                    e,
                    raw.chars().take(200).collect::<String>()
                ),
            )
        })
    }
}

/// Client for the library service REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// Base URL, without a trailing slash
    base_url: String,
    /// Reusable HTTP client
    client: Client,
    session: Arc<SessionStore>,
}

impl ApiClient {
    /// Create a client for `base_url` that reads its token from `session`.
    pub fn new(base_url: impl Into<String>, session: Arc<SessionStore>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: Client::new(),
            session,
        }
    }

    pub fn from_config(config: &ClientConfig, session: Arc<SessionStore>) -> Self {
        Self::new(config.base_url.clone(), session)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    fn add_auth_header(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Issue a single request.
    ///
    /// `path` is relative to the base URL (e.g. `/api/loans/my`).
    pub async fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        query: &[(&str, &str)],
    ) -> Result<Payload, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("{} {}", method, path);

        let mut builder = self.client.request(method.clone(), &url);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = self
            .add_auth_header(builder)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("{} {} failed without a response: {}", method, path, e);
                ApiError::network(e.to_string())
            })?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| {
            tracing::warn!("{} {} response body could not be read: {}", method, path, e);
            ApiError::network(format!("Failed to read response: {}", e))
        })?;

        if !(200..300).contains(&status) {
            let error = ApiError::from_response(status, &String::from_utf8_lossy(&body));
            tracing::warn!("{} {} -> {} [{}]", method, path, status, error.error_code());
            return Err(error);
        }

        tracing::debug!("{} {} -> {}", method, path, status);
        Ok(Payload { status, body })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        self.request::<()>(Method::GET, path, None, query)
            .await?
            .json()
    }

    /// POST with no body where the response body is ignored.
    async fn post_action(&self, path: &str, query: &[(&str, &str)]) -> Result<(), ApiError> {
        self.request::<()>(Method::POST, path, None, query).await?;
        Ok(())
    }
}

#[async_trait]
impl LibraryApi for ApiClient {
    async fn login(&self, request: &LoginRequest) -> Result<TokenResponse, ApiError> {
        self.request(Method::POST, "/api/auth/login", Some(request), &[])
            .await?
            .json()
    }

    async fn register(&self, request: &RegisterRequest) -> Result<TokenResponse, ApiError> {
        let payload = self
            .request(Method::POST, "/api/auth/register", Some(request), &[])
            .await?;
        if payload.is_empty() {
            return Ok(TokenResponse { token: None });
        }
        payload.json()
    }

    async fn available_books(&self) -> Result<Vec<Book>, ApiError> {
        self.get_json("/api/books/available", &[]).await
    }

    async fn borrow(&self, isbn: &str) -> Result<(), ApiError> {
        self.post_action("/api/loans/borrow", &[("isbn", isbn)]).await
    }

    async fn my_loans(&self) -> Result<Vec<Loan>, ApiError> {
        self.get_json("/api/loans/my", &[]).await
    }

    async fn renew_loan(&self, loan_id: i64) -> Result<(), ApiError> {
        self.post_action(&format!("/api/loans/renew/{}", loan_id), &[])
            .await
    }

    async fn return_loan(&self, loan_id: i64) -> Result<(), ApiError> {
        self.post_action(&format!("/api/loans/return/{}", loan_id), &[])
            .await
    }

    async fn my_profile(&self) -> Result<Profile, ApiError> {
        self.get_json("/api/members/me", &[]).await
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<(), ApiError> {
        self.request(Method::PUT, "/api/members/me", Some(update), &[])
            .await?;
        Ok(())
    }

    async fn list_members(&self) -> Result<Vec<Member>, ApiError> {
        self.get_json("/api/members", &[]).await
    }

    async fn member(&self, member_id: i64) -> Result<Member, ApiError> {
        self.get_json(&format!("/api/members/{}", member_id), &[])
            .await
    }

    async fn search_members(&self, name: &str) -> Result<Vec<Member>, ApiError> {
        self.get_json("/api/members/search", &[("name", name)]).await
    }
}
