use anyhow::{Context, Result};
use reqwest::blocking::{Client, Response, multipart};
use thiserror::Error;

/// Fabric REST API base.
pub const FABRIC_API: &str = "https://api.fabric.microsoft.com/v1";

/// Fabric API call that came back with a non-success status.
///
/// Keeps the raw response body so an operator sees exactly what the API
/// reported.
#[derive(Debug, Error)]
#[error("{method} {url} failed with HTTP {status}: {body}")]
pub struct FabricApiError {
    pub method: &'static str,
    pub url: String,
    pub status: u16,
    pub body: String,
}

/// Blocking Fabric REST client with bearer-token authentication.
pub struct FabricClient {
    base_url: String,
    token: String,
    http: Client,
}

impl FabricClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_base_url(FABRIC_API, token)
    }

    /// Point the client at a different API base.
    pub fn with_base_url(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
            http: Client::new(),
        }
    }

    pub fn get(&self, path: &str) -> Result<Response> {
        let url = self.url(path);
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .with_context(|| format!("failed to reach {url}"))?;
        Self::checked("GET", url, response)
    }

    pub fn post_json(&self, path: &str, body: &serde_json::Value) -> Result<Response> {
        let url = self.url(path);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .with_context(|| format!("failed to reach {url}"))?;
        Self::checked("POST", url, response)
    }

    pub fn post_multipart(&self, path: &str, form: multipart::Form) -> Result<Response> {
        let url = self.url(path);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .multipart(form)
            .send()
            .with_context(|| format!("failed to reach {url}"))?;
        Self::checked("POST", url, response)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn checked(method: &'static str, url: String, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        Err(FabricApiError {
            method,
            url,
            status: status.as_u16(),
            body,
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{CannedResponse, serve_sequence};

    #[test]
    fn successful_get_returns_the_response() {
        let base = serve_sequence(vec![CannedResponse::ok(b"[]".to_vec())]);
        let client = FabricClient::with_base_url(&base, "tok");

        let body = client.get("/workspaces").unwrap().text().unwrap();
        assert_eq!(body, "[]");
    }

    #[test]
    fn non_success_status_becomes_a_typed_error() {
        let base = serve_sequence(vec![CannedResponse::new(
            403,
            "Forbidden",
            b"insufficient scope".to_vec(),
        )]);
        let client = FabricClient::with_base_url(&base, "tok");

        let err = client.get("/workspaces").unwrap_err();
        let api_err = err
            .downcast_ref::<FabricApiError>()
            .expect("typed API error");
        assert_eq!(api_err.status, 403);
        assert_eq!(api_err.method, "GET");
        assert!(api_err.body.contains("insufficient scope"));
    }

    #[test]
    fn unreachable_api_is_an_error() {
        let client = FabricClient::with_base_url("http://127.0.0.1:9", "tok");
        assert!(client.get("/workspaces").is_err());
    }
}
