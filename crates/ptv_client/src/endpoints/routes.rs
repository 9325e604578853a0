//! Routes and route types

use super::{API_PREFIX, ApiRequest, Endpoint};
use crate::error::PtvError;
use crate::models::{Identifier, RouteType};
use crate::query::QueryParams;

/// All routes, optionally filtered by type or name
///
/// `GET /v3/routes`
#[derive(Debug, Clone, Default)]
pub struct RoutesRequest {
    route_types: Vec<RouteType>,
    route_name: Option<String>,
}

impl RoutesRequest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_route_types(mut self, route_types: impl IntoIterator<Item = RouteType>) -> Self {
        self.route_types.extend(route_types);
        self
    }

    /// Filter by (partial) route name
    #[must_use]
    pub fn with_route_name(mut self, route_name: impl Into<String>) -> Self {
        self.route_name = Some(route_name.into());
        self
    }
}

impl Endpoint for RoutesRequest {
    fn to_request(&self) -> Result<ApiRequest, PtvError> {
        let mut query = QueryParams::new();
        query
            .push_all("route_types", &self.route_types)
            .push_opt("route_name", self.route_name.as_deref());

        Ok(ApiRequest::new(format!("{API_PREFIX}/routes")).with_query(query))
    }
}

/// A single route
///
/// `GET /v3/routes/{route_id}`
#[derive(Debug, Clone)]
pub struct RouteRequest {
    route_id: Identifier,
}

impl RouteRequest {
    #[must_use]
    pub fn new(route_id: impl Into<Identifier>) -> Self {
        Self {
            route_id: route_id.into(),
        }
    }
}

impl Endpoint for RouteRequest {
    fn to_request(&self) -> Result<ApiRequest, PtvError> {
        let route_id = self.route_id.resolve("route_id")?;
        Ok(ApiRequest::new(format!("{API_PREFIX}/routes/{route_id}")))
    }
}

/// All route type codes and names
///
/// `GET /v3/route_types`
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteTypesRequest;

impl Endpoint for RouteTypesRequest {
    fn to_request(&self) -> Result<ApiRequest, PtvError> {
        Ok(ApiRequest::new(format!("{API_PREFIX}/route_types")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_filters() {
        let request = RoutesRequest::new()
            .with_route_types([RouteType::Tram])
            .with_route_name("Upfield")
            .to_request()
            .unwrap();
        assert_eq!(request.path(), "/v3/routes");
        assert_eq!(
            request.query().to_query_string(),
            "route_types=1&route_name=Upfield"
        );
    }

    #[test]
    fn test_single_route() {
        assert_eq!(RouteRequest::new(1).to_request().unwrap().path(), "/v3/routes/1");
        assert!(RouteRequest::new("one").to_request().is_err());
    }

    #[test]
    fn test_route_types() {
        let request = RouteTypesRequest.to_request().unwrap();
        assert_eq!(request.path(), "/v3/route_types");
        assert!(request.query().is_empty());
    }
}
