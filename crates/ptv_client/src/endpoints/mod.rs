//! Declarative request descriptors for the Timetable API v3
//!
//! Each descriptor holds the parameters of one API operation and knows how to
//! turn them into an [`ApiRequest`]: a resolved path plus ordered query
//! parameters. Validation happens in [`Endpoint::to_request`], so an invalid
//! descriptor never reaches the network.

mod departures;
mod directions;
mod disruptions;
mod outlets;
mod patterns;
mod routes;
mod runs;
mod search;
mod stops;

pub use departures::DeparturesRequest;
pub use directions::{DirectionsForRouteRequest, RoutesForDirectionRequest};
pub use disruptions::{DisruptionModesRequest, DisruptionRequest, DisruptionsRequest};
pub use outlets::OutletsRequest;
pub use patterns::PatternRequest;
pub use routes::{RouteRequest, RouteTypesRequest, RoutesRequest};
pub use runs::{RunRequest, RunsForRouteRequest};
pub use search::SearchRequest;
pub use stops::{StopRequest, StopsForLocationRequest, StopsForRouteRequest};

use crate::error::PtvError;
use crate::models::Identifier;
use crate::query::QueryParams;

/// API version prefix shared by every path
pub const API_PREFIX: &str = "/v3";

/// An unsigned request: resource path and ordered query parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    path: String,
    query: QueryParams,
}

impl ApiRequest {
    /// Create a request for `path` with no query parameters
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: QueryParams::new(),
        }
    }

    /// Replace the query parameters
    #[must_use]
    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub const fn query(&self) -> &QueryParams {
        &self.query
    }
}

/// A Timetable API operation that can be rendered into an [`ApiRequest`]
pub trait Endpoint {
    /// Validate the parameters and build the request
    ///
    /// # Errors
    ///
    /// Returns [`PtvError::InvalidParameter`] if a parameter is missing or
    /// malformed.
    fn to_request(&self) -> Result<ApiRequest, PtvError>;
}

impl Endpoint for ApiRequest {
    fn to_request(&self) -> Result<ApiRequest, PtvError> {
        Ok(self.clone())
    }
}

/// Resolve an optional identifier, naming it in any error
fn resolve_opt(id: Option<&Identifier>, name: &'static str) -> Result<Option<u64>, PtvError> {
    id.map(|id| id.resolve(name)).transpose()
}

/// Render a `latitude,longitude` path segment
fn location_segment(latitude: f64, longitude: f64) -> Result<String, PtvError> {
    Ok(format!(
        "{},{}",
        finite(latitude, "latitude")?,
        finite(longitude, "longitude")?
    ))
}

/// Reject NaN and infinite coordinates and distances
fn finite(value: f64, name: &'static str) -> Result<f64, PtvError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PtvError::invalid(
            name,
            format!("must be a finite number, got {value}"),
        ))
    }
}
