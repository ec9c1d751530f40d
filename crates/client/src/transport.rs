//! Authenticated transport for the Olho Vivo API
//!
//! Every call re-authenticates: `POST /Login/Autenticar` yields a session
//! cookie that is attached to exactly one `GET` and then discarded. The
//! API invalidates sessions aggressively, so the cookie is treated as
//! single-use and never cached across operations.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, header};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::config::OlhoVivoConfig;
use crate::error::{ApiFailure, redact_token};

/// Trait for issuing authenticated Olho Vivo requests
#[async_trait]
pub trait OlhoVivoApi: Send + Sync {
    /// Authenticate and fetch one resource.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiFailure`] for rejected tokens, missing session
    /// cookies, and data-request failures. All variants convert into
    /// diagnostic records; none of them should abort a batch on their own.
    async fn get(
        &self,
        endpoint: &str,
        query: Vec<(String, String)>,
    ) -> Result<Value, ApiFailure>;
}

/// HTTP client for the SPTrans Olho Vivo API
#[derive(Debug)]
pub struct OlhoVivoClient {
    client: Client,
    config: OlhoVivoConfig,
}

impl OlhoVivoClient {
    /// Create a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiFailure::Configuration`] if the configuration is
    /// invalid or the HTTP client cannot be initialized.
    pub fn new(config: &OlhoVivoConfig) -> Result<Self, ApiFailure> {
        config.validate().map_err(ApiFailure::Configuration)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiFailure::Configuration(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    fn token_hint(&self) -> String {
        redact_token(&self.config.token)
    }

    /// Authenticate against the login endpoint and return the session
    /// cookie header value for the follow-up request.
    async fn authenticate(&self) -> Result<String, ApiFailure> {
        let url = format!("{}/Login/Autenticar", self.config.base_url);

        let response = self
            .client
            .post(&url)
            .query(&[("token", self.config.token.as_str())])
            .send()
            .await
            .map_err(|e| ApiFailure::Auth {
                message: e.to_string(),
                token_hint: self.token_hint(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiFailure::Auth {
                message: format!("HTTP {status}"),
                token_hint: self.token_hint(),
            });
        }

        // Cookies must be captured before the body consumes the response.
        let cookies: Vec<String> = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .filter_map(|value| value.split(';').next())
            .map(str::to_owned)
            .collect();

        let body: Value = response.json().await.map_err(|e| ApiFailure::Auth {
            message: e.to_string(),
            token_hint: self.token_hint(),
        })?;

        // The API signals success with a bare boolean body.
        if body != Value::Bool(true) {
            return Err(ApiFailure::Auth {
                message: "Falha na autenticação. Verifique o token fornecido.".to_string(),
                token_hint: self.token_hint(),
            });
        }

        if cookies.is_empty() {
            return Err(ApiFailure::Session {
                token_hint: self.token_hint(),
            });
        }

        Ok(cookies.join("; "))
    }
}

#[async_trait]
impl OlhoVivoApi for OlhoVivoClient {
    #[instrument(skip(self, query))]
    async fn get(
        &self,
        endpoint: &str,
        query: Vec<(String, String)>,
    ) -> Result<Value, ApiFailure> {
        let cookie = self.authenticate().await?;

        let url = format!("{}{}", self.config.base_url, endpoint);
        debug!(%url, "fetching Olho Vivo resource");

        let request_failure = |message: String| ApiFailure::Request {
            message,
            endpoint: endpoint.to_string(),
            parameters: query.clone(),
        };

        let response = self
            .client
            .get(&url)
            .header(header::COOKIE, cookie)
            .query(&query)
            .send()
            .await
            .map_err(|e| request_failure(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, endpoint, "Olho Vivo request failed");
            return Err(request_failure(format!("HTTP {status}")));
        }

        response
            .json()
            .await
            .map_err(|e| request_failure(e.to_string()))
    }
}
