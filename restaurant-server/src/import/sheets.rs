//! Google Sheets API v4 source
//!
//! Authenticates as a service account: an RS256-signed JWT assertion is
//! exchanged at the key's token endpoint for a short-lived bearer token,
//! which is then used for a single `values.get` call.

use std::path::Path;

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::source::{SheetData, TableSource};
use super::ImportError;

/// Read-only spreadsheet scope
pub const SHEETS_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets.readonly";

pub const SHEETS_API_BASE: &str = "https://sheets.googleapis.com";

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Assertion lifetime in seconds; the token endpoint rejects longer ones
const ASSERTION_TTL_SECS: i64 = 3600;

/// Fields of a service-account key file this client needs
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccountKey {
    pub fn from_json(json: &str) -> Result<Self, ImportError> {
        Ok(serde_json::from_str(json)?)
    }

    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, ImportError> {
        let json = tokio::fs::read_to_string(path).await?;
        Self::from_json(&json)
    }
}

/// JWT assertion claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertionClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

impl AssertionClaims {
    pub fn new(key: &ServiceAccountKey, scope: &str, issued_at: i64) -> Self {
        Self {
            iss: key.client_email.clone(),
            scope: scope.to_string(),
            aud: key.token_uri.clone(),
            iat: issued_at,
            exp: issued_at + ASSERTION_TTL_SECS,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// `values.get` response body
#[derive(Debug, Default, Deserialize)]
pub struct ValueRange {
    #[serde(default)]
    pub values: Vec<Vec<Value>>,
}

impl ValueRange {
    /// Rows with every cell rendered as a string
    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.values
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect()
    }
}

fn cell_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Spreadsheet range read through the Sheets API
#[derive(Debug, Clone)]
pub struct SheetsSource {
    key: ServiceAccountKey,
    sheet_id: String,
    range: String,
    api_base: String,
    client: reqwest::Client,
}

impl SheetsSource {
    pub fn new(key: ServiceAccountKey, sheet_id: impl Into<String>, range: impl Into<String>) -> Self {
        Self {
            key,
            sheet_id: sheet_id.into(),
            range: range.into(),
            api_base: SHEETS_API_BASE.to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Signed assertion for the token exchange
    pub fn assertion(&self, issued_at: i64) -> Result<String, ImportError> {
        let claims = AssertionClaims::new(&self.key, SHEETS_READONLY_SCOPE, issued_at);
        let encoding_key = EncodingKey::from_rsa_pem(self.key.private_key.as_bytes())
            .map_err(|e| ImportError::Auth(format!("invalid service-account private key: {e}")))?;
        jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)
            .map_err(|e| ImportError::Auth(format!("failed to sign assertion: {e}")))
    }

    async fn access_token(&self) -> Result<String, ImportError> {
        let assertion = self.assertion(chrono::Utc::now().timestamp())?;

        let resp = self
            .client
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ImportError::Auth(format!(
                "token endpoint returned {status}: {body}"
            )));
        }

        let token: TokenResponse = resp.json().await?;
        Ok(token.access_token)
    }

    /// `{api_base}/v4/spreadsheets/{id}/values/{range}`
    pub fn values_url(&self) -> Result<Url, ImportError> {
        let mut url = Url::parse(&self.api_base)
            .map_err(|e| ImportError::Source(format!("invalid Sheets API base URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| ImportError::Source(format!("Sheets API base URL cannot have a path: {}", self.api_base)))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", self.sheet_id.as_str(), "values", self.range.as_str()]);
        Ok(url)
    }
}

#[async_trait]
impl TableSource for SheetsSource {
    fn describe(&self) -> String {
        format!("sheets:{}!{}", self.sheet_id, self.range)
    }

    async fn fetch(&self) -> Result<SheetData, ImportError> {
        let token = self.access_token().await?;
        let url = self.values_url()?;
        tracing::debug!(url = %url, "Fetching sheet values");

        let range: ValueRange = self
            .client
            .get(url)
            .bearer_auth(token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(SheetData::from_rows(range.into_rows()))
    }
}
