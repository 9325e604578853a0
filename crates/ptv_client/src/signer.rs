//! Request signing and URL construction
//!
//! PTV authenticates every call by an HMAC-SHA1 over the raw request path and
//! query string (including the `devid` parameter), keyed by the developer's
//! secret key. The uppercase hex digest is appended as `signature`, and the
//! server recomputes it over the same bytes, so the query must be rendered
//! exactly as it is sent.

use std::fmt;

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha1::Sha1;

use crate::error::PtvError;
use crate::query::QueryParams;

type HmacSha1 = Hmac<Sha1>;

/// Query parameter carrying the developer ID
pub const DEVELOPER_ID_PARAM: &str = "devid";

/// Query parameter carrying the request signature
pub const SIGNATURE_PARAM: &str = "signature";

/// Developer ID and secret key issued by PTV
#[derive(Clone)]
pub struct Credentials {
    developer_id: String,
    api_key: SecretString,
}

impl Credentials {
    /// Create credentials from a developer ID (string or integer) and key
    ///
    /// # Errors
    ///
    /// Returns [`PtvError::Configuration`] if either value is empty.
    pub fn new(
        developer_id: impl fmt::Display,
        api_key: impl Into<String>,
    ) -> Result<Self, PtvError> {
        let developer_id = developer_id.to_string().trim().to_string();
        let api_key = api_key.into();

        if developer_id.is_empty() {
            return Err(PtvError::Configuration(
                "developer ID must not be empty".to_string(),
            ));
        }
        if api_key.trim().is_empty() {
            return Err(PtvError::Configuration(
                "API key must not be empty".to_string(),
            ));
        }

        Ok(Self {
            developer_id,
            api_key: SecretString::from(api_key),
        })
    }

    /// The public developer ID
    #[must_use]
    pub fn developer_id(&self) -> &str {
        &self.developer_id
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("developer_id", &self.developer_id)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// A fully signed request, ready for an HTTP GET
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    raw_path_and_query: String,
    signature: String,
    url: String,
}

impl SignedRequest {
    /// Path and query exactly as signed, e.g. `/v3/route_types?devid=1`
    #[must_use]
    pub fn raw_path_and_query(&self) -> &str {
        &self.raw_path_and_query
    }

    /// Uppercase hex HMAC-SHA1 of [`Self::raw_path_and_query`]
    #[must_use]
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Absolute URL including the signature parameter
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn into_url(self) -> String {
        self.url
    }
}

/// Signs request paths with a fixed set of credentials
#[derive(Debug, Clone)]
pub struct RequestSigner {
    base_url: String,
    credentials: Credentials,
}

impl RequestSigner {
    /// Create a signer for the given host (scheme and authority, no path)
    #[must_use]
    pub fn new(base_url: impl Into<String>, credentials: Credentials) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            credentials,
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Compute the uppercase hex HMAC-SHA1 of `raw` keyed by the secret key
    ///
    /// # Errors
    ///
    /// Returns [`PtvError::Configuration`] if the key cannot initialise HMAC.
    pub fn signature(&self, raw: &str) -> Result<String, PtvError> {
        let key = self.credentials.api_key.expose_secret();
        let mut mac = HmacSha1::new_from_slice(key.as_bytes())
            .map_err(|e| PtvError::Configuration(format!("invalid signing key: {e}")))?;
        mac.update(raw.as_bytes());
        Ok(hex::encode_upper(mac.finalize().into_bytes()))
    }

    /// Build the signed URL for `path` with `params` in insertion order
    ///
    /// `devid` is appended after the caller's parameters, the signature is
    /// computed over `path?query`, and `&signature=<HEX>` is appended last.
    ///
    /// # Errors
    ///
    /// Returns [`PtvError::InvalidParameter`] if `path` is empty.
    pub fn build_request(
        &self,
        path: &str,
        params: &QueryParams,
    ) -> Result<SignedRequest, PtvError> {
        if path.trim().is_empty() {
            return Err(PtvError::invalid("path", "must not be empty"));
        }

        let mut query = params.clone();
        query.push(DEVELOPER_ID_PARAM, self.credentials.developer_id());

        let mut raw_path_and_query = String::with_capacity(path.len() + 64);
        if !path.starts_with('/') {
            raw_path_and_query.push('/');
        }
        raw_path_and_query.push_str(path);
        raw_path_and_query.push('?');
        raw_path_and_query.push_str(&query.to_query_string());

        let signature = self.signature(&raw_path_and_query)?;
        let url = format!(
            "{}{raw_path_and_query}&{SIGNATURE_PARAM}={signature}",
            self.base_url
        );

        Ok(SignedRequest {
            raw_path_and_query,
            signature,
            url,
        })
    }
}
