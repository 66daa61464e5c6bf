use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

const LOGIN_BASE: &str = "https://login.microsoftonline.com";
const FABRIC_SCOPE: &str = "https://api.fabric.microsoft.com/.default";

/// Service-principal credentials for the OAuth2 `client_credentials`
/// grant.
#[derive(Debug, Clone)]
pub struct SpnCredentials {
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
}

impl SpnCredentials {
    /// Read credentials from `FABRIC_TENANT_ID`, `FABRIC_CLIENT_ID` and
    /// `FABRIC_CLIENT_SECRET`.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            tenant_id: std::env::var("FABRIC_TENANT_ID")
                .context("FABRIC_TENANT_ID is not set")?,
            client_id: std::env::var("FABRIC_CLIENT_ID")
                .context("FABRIC_CLIENT_ID is not set")?,
            client_secret: std::env::var("FABRIC_CLIENT_SECRET")
                .context("FABRIC_CLIENT_SECRET is not set")?,
        })
    }

    /// Token endpoint of the credential's tenant.
    pub fn token_url(&self) -> String {
        format!("{LOGIN_BASE}/{}/oauth2/v2.0/token", self.tenant_id)
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Fetch a bearer token for the Fabric API from `token_url`.
///
/// Blocks until the token endpoint answers; a non-success status or a
/// body without an `access_token` is fatal.
pub fn fetch_token(token_url: &str, credentials: &SpnCredentials) -> Result<String> {
    info!("authenticating with service principal");

    let response = reqwest::blocking::Client::new()
        .post(token_url)
        .form(&[
            ("grant_type", "client_credentials"),
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
            ("scope", FABRIC_SCOPE),
        ])
        .send()
        .with_context(|| format!("failed to reach token endpoint {token_url}"))?
        .error_for_status()
        .context("service-principal authentication was rejected")?;

    let token: TokenResponse = response
        .json()
        .context("token endpoint returned an unexpected document")?;
    Ok(token.access_token)
}
