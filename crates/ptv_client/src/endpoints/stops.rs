//! Stops

use super::{API_PREFIX, ApiRequest, Endpoint, finite, location_segment, resolve_opt};
use crate::error::PtvError;
use crate::models::{Identifier, RouteType};
use crate::query::QueryParams;

/// Details of a single stop
///
/// `GET /v3/stops/{stop_id}/route_type/{route_type}`
#[derive(Debug, Clone)]
pub struct StopRequest {
    stop_id: Identifier,
    route_type: RouteType,
    stop_location: Option<bool>,
    stop_amenities: Option<bool>,
    stop_accessibility: Option<bool>,
    stop_contact: Option<bool>,
    stop_ticket: Option<bool>,
    gtfs: Option<bool>,
    stop_staffing: Option<bool>,
    stop_disruptions: Option<bool>,
}

impl StopRequest {
    #[must_use]
    pub fn new(stop_id: impl Into<Identifier>, route_type: RouteType) -> Self {
        Self {
            stop_id: stop_id.into(),
            route_type,
            stop_location: None,
            stop_amenities: None,
            stop_accessibility: None,
            stop_contact: None,
            stop_ticket: None,
            gtfs: None,
            stop_staffing: None,
            stop_disruptions: None,
        }
    }

    #[must_use]
    pub fn with_stop_location(mut self, include: bool) -> Self {
        self.stop_location = Some(include);
        self
    }

    #[must_use]
    pub fn with_stop_amenities(mut self, include: bool) -> Self {
        self.stop_amenities = Some(include);
        self
    }

    #[must_use]
    pub fn with_stop_accessibility(mut self, include: bool) -> Self {
        self.stop_accessibility = Some(include);
        self
    }

    #[must_use]
    pub fn with_stop_contact(mut self, include: bool) -> Self {
        self.stop_contact = Some(include);
        self
    }

    #[must_use]
    pub fn with_stop_ticket(mut self, include: bool) -> Self {
        self.stop_ticket = Some(include);
        self
    }

    /// Interpret `stop_id` as a GTFS stop ID
    #[must_use]
    pub fn with_gtfs(mut self, gtfs: bool) -> Self {
        self.gtfs = Some(gtfs);
        self
    }

    #[must_use]
    pub fn with_stop_staffing(mut self, include: bool) -> Self {
        self.stop_staffing = Some(include);
        self
    }

    #[must_use]
    pub fn with_stop_disruptions(mut self, include: bool) -> Self {
        self.stop_disruptions = Some(include);
        self
    }
}

impl Endpoint for StopRequest {
    fn to_request(&self) -> Result<ApiRequest, PtvError> {
        let stop_id = self.stop_id.resolve("stop_id")?;
        let path = format!(
            "{API_PREFIX}/stops/{stop_id}/route_type/{}",
            self.route_type.code()
        );

        let mut query = QueryParams::new();
        query
            .push_opt("stop_location", self.stop_location)
            .push_opt("stop_amenities", self.stop_amenities)
            .push_opt("stop_accessibility", self.stop_accessibility)
            .push_opt("stop_contact", self.stop_contact)
            .push_opt("stop_ticket", self.stop_ticket)
            .push_opt("gtfs", self.gtfs)
            .push_opt("stop_staffing", self.stop_staffing)
            .push_opt("stop_disruptions", self.stop_disruptions);

        Ok(ApiRequest::new(path).with_query(query))
    }
}

/// Stops served by a route
///
/// `GET /v3/stops/route/{route_id}/route_type/{route_type}`
#[derive(Debug, Clone)]
pub struct StopsForRouteRequest {
    route_id: Identifier,
    route_type: RouteType,
    direction_id: Option<Identifier>,
    stop_disruptions: Option<bool>,
}

impl StopsForRouteRequest {
    #[must_use]
    pub fn new(route_id: impl Into<Identifier>, route_type: RouteType) -> Self {
        Self {
            route_id: route_id.into(),
            route_type,
            direction_id: None,
            stop_disruptions: None,
        }
    }

    #[must_use]
    pub fn with_direction(mut self, direction_id: impl Into<Identifier>) -> Self {
        self.direction_id = Some(direction_id.into());
        self
    }

    #[must_use]
    pub fn with_stop_disruptions(mut self, include: bool) -> Self {
        self.stop_disruptions = Some(include);
        self
    }
}

impl Endpoint for StopsForRouteRequest {
    fn to_request(&self) -> Result<ApiRequest, PtvError> {
        let route_id = self.route_id.resolve("route_id")?;
        let direction_id = resolve_opt(self.direction_id.as_ref(), "direction_id")?;
        let path = format!(
            "{API_PREFIX}/stops/route/{route_id}/route_type/{}",
            self.route_type.code()
        );

        let mut query = QueryParams::new();
        query
            .push_opt("direction_id", direction_id)
            .push_opt("stop_disruptions", self.stop_disruptions);

        Ok(ApiRequest::new(path).with_query(query))
    }
}

/// Stops near a location
///
/// `GET /v3/stops/location/{latitude},{longitude}`
#[derive(Debug, Clone)]
pub struct StopsForLocationRequest {
    latitude: f64,
    longitude: f64,
    route_types: Vec<RouteType>,
    max_results: Option<u32>,
    max_distance: Option<f64>,
    stop_disruptions: Option<bool>,
}

impl StopsForLocationRequest {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            route_types: Vec::new(),
            max_results: None,
            max_distance: None,
            stop_disruptions: None,
        }
    }

    #[must_use]
    pub fn with_route_types(mut self, route_types: impl IntoIterator<Item = RouteType>) -> Self {
        self.route_types.extend(route_types);
        self
    }

    #[must_use]
    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = Some(max_results);
        self
    }

    /// Search radius in metres
    #[must_use]
    pub fn with_max_distance(mut self, metres: f64) -> Self {
        self.max_distance = Some(metres);
        self
    }

    #[must_use]
    pub fn with_stop_disruptions(mut self, include: bool) -> Self {
        self.stop_disruptions = Some(include);
        self
    }
}

impl Endpoint for StopsForLocationRequest {
    fn to_request(&self) -> Result<ApiRequest, PtvError> {
        let path = format!(
            "{API_PREFIX}/stops/location/{}",
            location_segment(self.latitude, self.longitude)?
        );
        let max_distance = self
            .max_distance
            .map(|v| finite(v, "max_distance"))
            .transpose()?;

        let mut query = QueryParams::new();
        query
            .push_all("route_types", &self.route_types)
            .push_opt("max_results", self.max_results)
            .push_opt("max_distance", max_distance)
            .push_opt("stop_disruptions", self.stop_disruptions);

        Ok(ApiRequest::new(path).with_query(query))
    }
}
