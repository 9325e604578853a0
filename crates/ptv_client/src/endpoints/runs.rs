//! Runs (individual trips)

use super::{API_PREFIX, ApiRequest, Endpoint};
use crate::error::PtvError;
use crate::models::{Identifier, RouteType};

/// A run, optionally for one route type
///
/// `GET /v3/runs/{run_id}[/route_type/{route_type}]`
#[derive(Debug, Clone)]
pub struct RunRequest {
    run_id: Identifier,
    route_type: Option<RouteType>,
}

impl RunRequest {
    #[must_use]
    pub fn new(run_id: impl Into<Identifier>) -> Self {
        Self {
            run_id: run_id.into(),
            route_type: None,
        }
    }

    #[must_use]
    pub fn with_route_type(mut self, route_type: RouteType) -> Self {
        self.route_type = Some(route_type);
        self
    }
}

impl Endpoint for RunRequest {
    fn to_request(&self) -> Result<ApiRequest, PtvError> {
        let run_id = self.run_id.resolve("run_id")?;
        let mut path = format!("{API_PREFIX}/runs/{run_id}");
        if let Some(route_type) = self.route_type {
            path.push_str(&format!("/route_type/{}", route_type.code()));
        }
        Ok(ApiRequest::new(path))
    }
}

/// All runs of a route, optionally for one route type
///
/// `GET /v3/runs/route/{route_id}[/route_type/{route_type}]`
#[derive(Debug, Clone)]
pub struct RunsForRouteRequest {
    route_id: Identifier,
    route_type: Option<RouteType>,
}

impl RunsForRouteRequest {
    #[must_use]
    pub fn new(route_id: impl Into<Identifier>) -> Self {
        Self {
            route_id: route_id.into(),
            route_type: None,
        }
    }

    #[must_use]
    pub fn with_route_type(mut self, route_type: RouteType) -> Self {
        self.route_type = Some(route_type);
        self
    }
}

impl Endpoint for RunsForRouteRequest {
    fn to_request(&self) -> Result<ApiRequest, PtvError> {
        let route_id = self.route_id.resolve("route_id")?;
        let mut path = format!("{API_PREFIX}/runs/route/{route_id}");
        if let Some(route_type) = self.route_type {
            path.push_str(&format!("/route_type/{}", route_type.code()));
        }
        Ok(ApiRequest::new(path))
    }
}
