//! Free-text search across stops, routes and outlets

use super::{API_PREFIX, ApiRequest, Endpoint, finite};
use crate::error::PtvError;
use crate::models::RouteType;
use crate::query::{QueryParams, encode_path_segment};

/// Search stops, routes and outlets by name or address
///
/// `GET /v3/search/{search_term}`
#[derive(Debug, Clone)]
pub struct SearchRequest {
    search_term: String,
    route_types: Vec<RouteType>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    max_distance: Option<f64>,
    include_addresses: Option<bool>,
    include_outlets: Option<bool>,
    match_stop_by_suburb: Option<bool>,
    match_route_by_suburb: Option<bool>,
    match_stop_by_gtfs_stop_id: Option<bool>,
}

impl SearchRequest {
    #[must_use]
    pub fn new(search_term: impl Into<String>) -> Self {
        Self {
            search_term: search_term.into(),
            route_types: Vec::new(),
            latitude: None,
            longitude: None,
            max_distance: None,
            include_addresses: None,
            include_outlets: None,
            match_stop_by_suburb: None,
            match_route_by_suburb: None,
            match_stop_by_gtfs_stop_id: None,
        }
    }

    #[must_use]
    pub fn with_route_types(mut self, route_types: impl IntoIterator<Item = RouteType>) -> Self {
        self.route_types.extend(route_types);
        self
    }

    #[must_use]
    pub fn with_latitude(mut self, latitude: f64) -> Self {
        self.latitude = Some(latitude);
        self
    }

    #[must_use]
    pub fn with_longitude(mut self, longitude: f64) -> Self {
        self.longitude = Some(longitude);
        self
    }

    /// Search radius in metres around the given coordinates
    #[must_use]
    pub fn with_max_distance(mut self, metres: f64) -> Self {
        self.max_distance = Some(metres);
        self
    }

    #[must_use]
    pub fn with_include_addresses(mut self, include: bool) -> Self {
        self.include_addresses = Some(include);
        self
    }

    #[must_use]
    pub fn with_include_outlets(mut self, include: bool) -> Self {
        self.include_outlets = Some(include);
        self
    }

    #[must_use]
    pub fn with_match_stop_by_suburb(mut self, enabled: bool) -> Self {
        self.match_stop_by_suburb = Some(enabled);
        self
    }

    #[must_use]
    pub fn with_match_route_by_suburb(mut self, enabled: bool) -> Self {
        self.match_route_by_suburb = Some(enabled);
        self
    }

    #[must_use]
    pub fn with_match_stop_by_gtfs_stop_id(mut self, enabled: bool) -> Self {
        self.match_stop_by_gtfs_stop_id = Some(enabled);
        self
    }
}

impl Endpoint for SearchRequest {
    fn to_request(&self) -> Result<ApiRequest, PtvError> {
        if self.search_term.trim().is_empty() {
            return Err(PtvError::invalid("search_term", "must not be empty"));
        }
        let latitude = self.latitude.map(|v| finite(v, "latitude")).transpose()?;
        let longitude = self.longitude.map(|v| finite(v, "longitude")).transpose()?;
        let max_distance = self
            .max_distance
            .map(|v| finite(v, "max_distance"))
            .transpose()?;

        let path = format!(
            "{API_PREFIX}/search/{}",
            encode_path_segment(&self.search_term)
        );

        let mut query = QueryParams::new();
        query
            .push_all("route_types", &self.route_types)
            .push_opt("latitude", latitude)
            .push_opt("longitude", longitude)
            .push_opt("max_distance", max_distance)
            .push_opt("include_addresses", self.include_addresses)
            .push_opt("include_outlets", self.include_outlets)
            .push_opt("match_stop_by_suburb", self.match_stop_by_suburb)
            .push_opt("match_route_by_suburb", self.match_route_by_suburb)
            .push_opt("match_stop_by_gtfs_stop_id", self.match_stop_by_gtfs_stop_id);

        Ok(ApiRequest::new(path).with_query(query))
    }
}
