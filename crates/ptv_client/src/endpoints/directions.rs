//! Directions of travel

use super::{API_PREFIX, ApiRequest, Endpoint};
use crate::error::PtvError;
use crate::models::{Identifier, RouteType};

/// Directions of travel for a route
///
/// `GET /v3/directions/route/{route_id}`
#[derive(Debug, Clone)]
pub struct DirectionsForRouteRequest {
    route_id: Identifier,
}

impl DirectionsForRouteRequest {
    #[must_use]
    pub fn new(route_id: impl Into<Identifier>) -> Self {
        Self {
            route_id: route_id.into(),
        }
    }
}

impl Endpoint for DirectionsForRouteRequest {
    fn to_request(&self) -> Result<ApiRequest, PtvError> {
        let route_id = self.route_id.resolve("route_id")?;
        Ok(ApiRequest::new(format!("{API_PREFIX}/directions/route/{route_id}")))
    }
}

/// Routes that travel in a direction, optionally for one route type
///
/// `GET /v3/directions/{direction_id}[/route_type/{route_type}]`
#[derive(Debug, Clone)]
pub struct RoutesForDirectionRequest {
    direction_id: Identifier,
    route_type: Option<RouteType>,
}

impl RoutesForDirectionRequest {
    #[must_use]
    pub fn new(direction_id: impl Into<Identifier>) -> Self {
        Self {
            direction_id: direction_id.into(),
            route_type: None,
        }
    }

    #[must_use]
    pub fn with_route_type(mut self, route_type: RouteType) -> Self {
        self.route_type = Some(route_type);
        self
    }
}

impl Endpoint for RoutesForDirectionRequest {
    fn to_request(&self) -> Result<ApiRequest, PtvError> {
        let direction_id = self.direction_id.resolve("direction_id")?;
        let mut path = format!("{API_PREFIX}/directions/{direction_id}");
        if let Some(route_type) = self.route_type {
            path.push_str(&format!("/route_type/{}", route_type.code()));
        }
        Ok(ApiRequest::new(path))
    }
}
