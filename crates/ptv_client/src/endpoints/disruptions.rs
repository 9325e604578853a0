//! Service disruptions

use super::{API_PREFIX, ApiRequest, Endpoint, resolve_opt};
use crate::error::PtvError;
use crate::models::{DisruptionStatus, Identifier, RouteType};
use crate::query::QueryParams;

/// Disruptions, optionally scoped to a route, a stop, or both
///
/// `GET /v3/disruptions[/route/{route_id}][/stop/{stop_id}]`
#[derive(Debug, Clone, Default)]
pub struct DisruptionsRequest {
    route_id: Option<Identifier>,
    stop_id: Option<Identifier>,
    route_types: Vec<RouteType>,
    disruption_modes: Vec<u32>,
    disruption_status: Option<DisruptionStatus>,
}

impl DisruptionsRequest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_route(mut self, route_id: impl Into<Identifier>) -> Self {
        self.route_id = Some(route_id.into());
        self
    }

    #[must_use]
    pub fn with_stop(mut self, stop_id: impl Into<Identifier>) -> Self {
        self.stop_id = Some(stop_id.into());
        self
    }

    #[must_use]
    pub fn with_route_types(mut self, route_types: impl IntoIterator<Item = RouteType>) -> Self {
        self.route_types.extend(route_types);
        self
    }

    /// Filter by disruption mode codes (see [`DisruptionModesRequest`])
    #[must_use]
    pub fn with_disruption_modes(mut self, modes: impl IntoIterator<Item = u32>) -> Self {
        self.disruption_modes.extend(modes);
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: DisruptionStatus) -> Self {
        self.disruption_status = Some(status);
        self
    }
}

impl Endpoint for DisruptionsRequest {
    fn to_request(&self) -> Result<ApiRequest, PtvError> {
        let route_id = resolve_opt(self.route_id.as_ref(), "route_id")?;
        let stop_id = resolve_opt(self.stop_id.as_ref(), "stop_id")?;

        let mut path = format!("{API_PREFIX}/disruptions");
        if let Some(route_id) = route_id {
            path.push_str(&format!("/route/{route_id}"));
        }
        if let Some(stop_id) = stop_id {
            path.push_str(&format!("/stop/{stop_id}"));
        }

        let mut query = QueryParams::new();
        query
            .push_all("route_types", &self.route_types)
            .push_all("disruption_modes", &self.disruption_modes)
            .push_opt("disruption_status", self.disruption_status);

        Ok(ApiRequest::new(path).with_query(query))
    }
}

/// A single disruption
///
/// `GET /v3/disruptions/{disruption_id}`
#[derive(Debug, Clone)]
pub struct DisruptionRequest {
    disruption_id: Identifier,
}

impl DisruptionRequest {
    #[must_use]
    pub fn new(disruption_id: impl Into<Identifier>) -> Self {
        Self {
            disruption_id: disruption_id.into(),
        }
    }
}

impl Endpoint for DisruptionRequest {
    fn to_request(&self) -> Result<ApiRequest, PtvError> {
        let disruption_id = self.disruption_id.resolve("disruption_id")?;
        Ok(ApiRequest::new(format!("{API_PREFIX}/disruptions/{disruption_id}")))
    }
}

/// All disruption mode codes and names
///
/// `GET /v3/disruptions/modes`
#[derive(Debug, Clone, Copy, Default)]
pub struct DisruptionModesRequest;

impl Endpoint for DisruptionModesRequest {
    fn to_request(&self) -> Result<ApiRequest, PtvError> {
        Ok(ApiRequest::new(format!("{API_PREFIX}/disruptions/modes")))
    }
}
