//! SmartThings REST API client.
//!
//! Every endpoint goes through one generic request helper: relative path,
//! method, optional JSON body, `Authorization: Bearer <token>` header. The
//! per-resource modules only shape typed request bodies and pick paths;
//! responses come back as parsed JSON.
//!
//! The bearer token is supplied per client instance by the caller (it
//! arrives with each lifecycle callback); nothing is stored here.

use anyhow::{bail, Context, Result};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};

pub mod apps;
pub mod deviceprofiles;
pub mod devices;
pub mod installedapps;
pub mod locations;
pub mod rooms;
pub mod rules;
pub mod scenes;
pub mod schedules;
pub mod subscriptions;

const API_URL: &str = "https://api.smartthings.com/v1/";

/// Client for the SmartThings REST API, scoped to one bearer token.
#[derive(Clone)]
pub struct SmartThings {
    auth_token: String,
    base_url: String,
    http: reqwest::Client,
}

impl SmartThings {
    /// Create a client for the production API.
    pub fn new(auth_token: impl Into<String>) -> Self {
        Self::with_base_url(auth_token, API_URL)
    }

    /// Create a client against a different base URL (test servers).
    pub fn with_base_url(auth_token: impl Into<String>, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self {
            auth_token: auth_token.into(),
            base_url,
            http: reqwest::Client::new(),
        }
    }

    /// Send one API request and parse the JSON response.
    ///
    /// Non-2xx responses become an error carrying the HTTP status and the
    /// response text; there is no retry.
    async fn request<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, path, "SmartThings API request");

        let mut request = self
            .http
            .request(method, &url)
            .header("Authorization", format!("Bearer {}", self.auth_token));
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .context("failed to send request to SmartThings API")?;

        let status = response.status();
        let text = response
            .text()
            .await
            .context("failed to read SmartThings API response")?;

        if !status.is_success() {
            error!(%status, path, body = %text, "SmartThings API error");
            bail!("SmartThings API returned HTTP {status} for {path}: {text}");
        }

        if text.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text)
            .with_context(|| format!("failed to parse SmartThings API response: {text}"))
    }

    async fn get(&self, path: &str) -> Result<Value> {
        self.request::<()>(Method::GET, path, None).await
    }

    async fn delete(&self, path: &str) -> Result<Value> {
        self.request::<()>(Method::DELETE, path, None).await
    }

    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        self.request(Method::POST, path, Some(body)).await
    }

    async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        self.request(Method::PUT, path, Some(body)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_always_ends_with_slash() {
        let client = SmartThings::with_base_url("t", "http://localhost:9999/v1");
        assert!(client.base_url.ends_with('/'));

        let client = SmartThings::with_base_url("t", "http://localhost:9999/v1/");
        assert_eq!(client.base_url, "http://localhost:9999/v1/");
    }
}
