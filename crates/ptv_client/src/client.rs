//! HTTP client for the PTV Timetable API
//!
//! Every operation goes through one routine: build the endpoint's request,
//! sign it, issue a single GET, and hand back the JSON object unmodified.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::config::PtvConfig;
use crate::endpoints::{ApiRequest, Endpoint, RouteTypesRequest};
use crate::error::PtvError;
use crate::models::{ApiResponse, ResponseStatus};
use crate::signer::{RequestSigner, SignedRequest};

/// Trait for Timetable API clients
#[async_trait]
pub trait TimetableApi: Send + Sync {
    /// Sign and execute a prepared request
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, PtvError>;

    /// Validate an endpoint descriptor, then execute it
    ///
    /// Invalid parameters are reported before any HTTP request is issued.
    async fn fetch(&self, endpoint: &(dyn Endpoint + Sync)) -> Result<ApiResponse, PtvError> {
        let request = endpoint.to_request()?;
        self.execute(request).await
    }

    /// Check if the Timetable API is reachable and reports itself healthy
    async fn is_healthy(&self) -> bool;
}

/// Timetable API client holding one set of credentials
#[derive(Debug)]
pub struct PtvClient {
    client: Client,
    signer: RequestSigner,
    timeout_secs: u64,
}

impl PtvClient {
    /// Create a new client from configuration
    ///
    /// # Errors
    ///
    /// Returns [`PtvError::Configuration`] if the configuration is invalid,
    /// credentials are missing, or the HTTP client cannot be initialized.
    pub fn new(config: &PtvConfig) -> Result<Self, PtvError> {
        config.validate()?;
        let credentials = config.credentials()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| PtvError::Configuration(format!("HTTP client: {e}")))?;

        debug!(
            base_url = %config.base_url,
            developer_id = credentials.developer_id(),
            "PTV client initialized"
        );

        Ok(Self {
            client,
            signer: RequestSigner::new(config.base_url.as_str(), credentials),
            timeout_secs: config.timeout_secs,
        })
    }

    /// Create a client for the public PTV host with the given credentials
    ///
    /// # Errors
    ///
    /// Returns [`PtvError::Configuration`] if either credential is empty.
    pub fn with_credentials(
        developer_id: impl std::fmt::Display,
        api_key: impl Into<String>,
    ) -> Result<Self, PtvError> {
        Self::new(&PtvConfig::with_credentials(developer_id, api_key))
    }

    #[must_use]
    pub const fn signer(&self) -> &RequestSigner {
        &self.signer
    }

    /// Sign a prepared request without sending it
    ///
    /// # Errors
    ///
    /// Returns [`PtvError::InvalidParameter`] if the path is empty.
    pub fn sign(&self, request: &ApiRequest) -> Result<SignedRequest, PtvError> {
        self.signer.build_request(request.path(), request.query())
    }

    /// The signed URL an endpoint would be fetched from
    ///
    /// # Errors
    ///
    /// Returns [`PtvError::InvalidParameter`] if the endpoint's parameters
    /// are invalid.
    pub fn signed_url(&self, endpoint: &dyn Endpoint) -> Result<String, PtvError> {
        let request = endpoint.to_request()?;
        Ok(self.sign(&request)?.into_url())
    }

    fn map_send_error(&self, e: &reqwest::Error) -> PtvError {
        if e.is_timeout() {
            PtvError::Transport {
                status: None,
                message: format!("request timed out after {} seconds", self.timeout_secs),
            }
        } else {
            PtvError::Transport {
                status: e.status().map(|s| s.as_u16()),
                message: e.to_string(),
            }
        }
    }

    /// Parse a response body into a JSON object
    fn parse_response(body: &str) -> Result<ApiResponse, PtvError> {
        match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(PtvError::ResponseFormat(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
            Err(e) => Err(PtvError::ResponseFormat(e.to_string())),
        }
    }

    /// Best-effort error detail from a failed response
    ///
    /// PTV error bodies look like `{"message": "...", "status": {...}}`.
    fn error_message(body: &str, fallback: &str) -> String {
        serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|value| value.get("message")?.as_str().map(str::to_string))
            .unwrap_or_else(|| fallback.to_string())
    }
}

#[async_trait]
impl TimetableApi for PtvClient {
    #[instrument(skip(self, request), fields(path = %request.path()))]
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, PtvError> {
        let signed = self.sign(&request)?;
        debug!(raw = signed.raw_path_and_query(), "Sending signed request");

        let response = self
            .client
            .get(signed.url())
            .send()
            .await
            .map_err(|e| self.map_send_error(&e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.map_send_error(&e))?;

        if !status.is_success() {
            let fallback = status.canonical_reason().unwrap_or("request failed");
            let message = Self::error_message(&body, fallback);
            warn!(status = status.as_u16(), %message, "PTV request failed");
            return Err(PtvError::Transport {
                status: Some(status.as_u16()),
                message,
            });
        }

        let result = Self::parse_response(&body)?;
        debug!(keys = result.len(), "Response received");
        Ok(result)
    }

    async fn is_healthy(&self) -> bool {
        self.fetch(&RouteTypesRequest).await.is_ok_and(|response| {
            ResponseStatus::from_response(&response).is_none_or(|status| status.is_healthy())
        })
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoints::{DeparturesRequest, SearchRequest};
    use crate::models::RouteType;

    fn client() -> PtvClient {
        PtvClient::new(&PtvConfig::for_testing()).unwrap()
    }

    #[test]
    fn test_new_requires_credentials() {
        let result = PtvClient::new(&PtvConfig::default());
        assert!(matches!(result, Err(PtvError::Configuration(_))));

        assert!(PtvClient::with_credentials("", "secret").is_err());
        assert!(PtvClient::with_credentials(3_001_026, "secret").is_ok());
    }

    #[test]
    fn test_signed_url() {
        let url = client()
            .signed_url(&DeparturesRequest::new(RouteType::Train, 1071))
            .unwrap();
        assert_eq!(
            url,
            "https://timetableapi.ptv.vic.gov.au/v3/departures/route_type/0/stop/1071?devid=1\
             &signature=1252B894060B1F53C65A1CD8044EDA2028554584"
        );
    }

    #[test]
    fn test_signed_url_encodes_search_term() {
        let url = client().signed_url(&SearchRequest::new("Flinders St")).unwrap();
        assert!(url.contains("/v3/search/Flinders%20St?devid=1&signature="));
    }

    #[test]
    fn test_fetch_rejects_invalid_params_before_sending() {
        // points at a closed port; validation must fail first
        let config = PtvConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            ..PtvConfig::for_testing()
        };
        let client = PtvClient::new(&config).unwrap();
        let result = tokio_test::block_on(
            client.fetch(&DeparturesRequest::new(RouteType::Train, "not-a-stop")),
        );
        assert!(matches!(
            result,
            Err(PtvError::InvalidParameter { name: "stop_id", .. })
        ));
    }

    #[test]
    fn test_parse_response() {
        let map = PtvClient::parse_response(
            r#"{"route_types": [], "status": {"version": "3.0", "health": 1}}"#,
        )
        .unwrap();
        assert!(map.contains_key("route_types"));

        assert!(matches!(
            PtvClient::parse_response("not json"),
            Err(PtvError::ResponseFormat(_))
        ));
        let err = PtvClient::parse_response("[1, 2]").unwrap_err();
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(
            PtvClient::error_message(
                r#"{"message": "Forbidden (403): invalid signature", "status": {"version": "3.0", "health": 1}}"#,
                "Forbidden"
            ),
            "Forbidden (403): invalid signature"
        );
        assert_eq!(PtvClient::error_message("<html>", "Bad Gateway"), "Bad Gateway");
    }
}
