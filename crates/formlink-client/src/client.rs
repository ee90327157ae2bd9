//! The HTTP core: builds requests, attaches the bearer token, and turns
//! non-success responses into [`FormlinkError::Api`] values.

use std::time::Duration;

use reqwest::{header, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::Instrument;
use url::Url;

use formlink_core::logging::request_span;
use formlink_core::settings::Settings;
use formlink_core::{FormlinkError, FormlinkResult};

use crate::services::{Analytics, Auth, Forms, PublicForms, Responses};

/// Fallback message when an error body cannot be decoded.
const GENERIC_ERROR: &str = "Something went wrong";

/// The Formlink API client.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Debug, Clone)]
pub struct Formlink {
    http: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl Formlink {
    /// Creates an unauthenticated client against the given base URL.
    pub fn new(base_url: impl AsRef<str>) -> FormlinkResult<Self> {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    /// Creates a client with a custom request timeout.
    pub fn with_timeout(base_url: impl AsRef<str>, timeout: Duration) -> FormlinkResult<Self> {
        let base_url = Url::parse(base_url.as_ref())
            .map_err(|e| FormlinkError::Config(format!("invalid base URL: {e}")))?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FormlinkError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url,
            token: None,
        })
    }

    /// Creates a client from loaded [`Settings`], picking up the API URL,
    /// token, and request timeout.
    pub fn from_settings(settings: &Settings) -> FormlinkResult<Self> {
        let mut client =
            Self::with_timeout(&settings.api_url, Duration::from_secs(settings.request_timeout))?;
        client.token.clone_from(&settings.token);
        Ok(client)
    }

    /// Returns a copy of this client that authenticates with the token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Returns `true` if the client carries a bearer token.
    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Authentication endpoints (`/v1/auth/...`).
    pub const fn auth(&self) -> Auth<'_> {
        Auth::new(self)
    }

    /// Authenticated form management endpoints (`/v1/forms/...`).
    pub const fn forms(&self) -> Forms<'_> {
        Forms::new(self)
    }

    /// Unauthenticated public form endpoints (`/v1/public/...`).
    pub const fn public_forms(&self) -> PublicForms<'_> {
        PublicForms::new(self)
    }

    /// Response listing and export endpoints (`/v1/responses/...`).
    pub const fn responses(&self) -> Responses<'_> {
        Responses::new(self)
    }

    /// Analytics endpoints (`/v1/analytics/...`).
    pub const fn analytics(&self) -> Analytics<'_> {
        Analytics::new(self)
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> FormlinkResult<T> {
        self.request(Method::GET, path, None::<&()>).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> FormlinkResult<T> {
        self.request(Method::POST, path, Some(body)).await
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> FormlinkResult<T> {
        self.request(Method::PUT, path, Some(body)).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, path: &str) -> FormlinkResult<T> {
        self.request(Method::DELETE, path, None::<&()>).await
    }

    /// Fetches a plain-text body (used by the CSV export).
    pub(crate) async fn get_text(&self, path: &str) -> FormlinkResult<String> {
        let response = self.send(Method::GET, path, None::<&()>).await?;
        let status = response.status();
        if status.is_success() {
            response
                .text()
                .await
                .map_err(|e| FormlinkError::Transport(e.to_string()))
        } else {
            Err(Self::api_error(status, response).await)
        }
    }

    async fn request<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> FormlinkResult<T> {
        let response = self.send(method, path, body).await?;
        let status = response.status();
        if status.is_success() {
            // A body that fails to decode is a serialization problem, not a
            // transport one; the request itself succeeded.
            let bytes = response
                .bytes()
                .await
                .map_err(|e| FormlinkError::Transport(e.to_string()))?;
            Ok(serde_json::from_slice(&bytes)?)
        } else {
            Err(Self::api_error(status, response).await)
        }
    }

    async fn send<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> FormlinkResult<reqwest::Response> {
        let span = request_span(method.as_str(), path);

        let url = self
            .base_url
            .join(path)
            .map_err(|e| FormlinkError::Config(format!("invalid path '{path}': {e}")))?;

        let mut request = self.http.request(method, url);
        if let Some(token) = &self.token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        async move {
            tracing::debug!("sending request");
            request
                .send()
                .await
                .map_err(|e| FormlinkError::Transport(e.to_string()))
        }
        .instrument(span)
        .await
    }

    /// Decodes an error response body into an [`FormlinkError::Api`].
    ///
    /// The backend uses both `{"error": "..."}` and `{"message": "..."}`
    /// shapes; anything else falls back to a generic message.
    async fn api_error(status: StatusCode, response: reqwest::Response) -> FormlinkError {
        let message = match response.json::<serde_json::Value>().await {
            Ok(body) => body
                .get("error")
                .or_else(|| body.get("message"))
                .and_then(serde_json::Value::as_str)
                .unwrap_or(GENERIC_ERROR)
                .to_string(),
            Err(_) => GENERIC_ERROR.to_string(),
        };
        tracing::warn!(status = status.as_u16(), %message, "request rejected");
        FormlinkError::Api {
            status: status.as_u16(),
            message,
        }
    }
}
