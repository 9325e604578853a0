//! Client for the Public Transport Victoria (PTV) Timetable API v3
//!
//! Every Timetable API call must be signed: the client appends its developer
//! ID as `devid`, computes an HMAC-SHA1 over the raw path and query string
//! keyed by the secret API key, and appends the uppercase hex digest as
//! `signature`. [`RequestSigner`] implements that scheme; everything else is
//! a declarative [`Endpoint`] descriptor per API operation, fetched through
//! the single [`TimetableApi::fetch`] routine.
//!
//! # Architecture
//!
//! - [`signer`]: credentials, HMAC signing and URL construction
//! - [`query`]: ordered, repeatable query parameters in canonical form
//! - [`endpoints`]: one request descriptor per API operation
//! - [`client`]: the HTTP client ([`PtvClient`]) behind [`TimetableApi`]
//!
//! # Example
//!
//! ```rust,ignore
//! use ptv_client::{DeparturesRequest, Expand, PtvClient, RouteType, TimetableApi};
//!
//! let client = PtvClient::with_credentials(3001026, "your-api-key")?;
//!
//! let departures = client
//!     .fetch(
//!         &DeparturesRequest::new(RouteType::Train, 1071)
//!             .with_max_results(3)
//!             .with_expand([Expand::Stop, Expand::Direction]),
//!     )
//!     .await?;
//! ```

pub mod client;
mod config;
pub mod endpoints;
mod error;
mod models;
pub mod query;
pub mod signer;

pub use client::{PtvClient, TimetableApi};
pub use config::PtvConfig;
pub use endpoints::{
    ApiRequest, DeparturesRequest, DirectionsForRouteRequest, DisruptionModesRequest,
    DisruptionRequest, DisruptionsRequest, Endpoint, OutletsRequest, PatternRequest,
    RouteRequest, RouteTypesRequest, RoutesForDirectionRequest, RoutesRequest, RunRequest,
    RunsForRouteRequest, SearchRequest, StopRequest, StopsForLocationRequest,
    StopsForRouteRequest,
};
pub use error::PtvError;
pub use models::{
    ApiResponse, DisruptionStatus, Expand, Identifier, ResponseStatus, RouteType, Timestamp,
};
pub use query::{QueryParams, QueryValue};
pub use signer::{Credentials, RequestSigner, SignedRequest};
