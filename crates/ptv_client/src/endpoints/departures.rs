//! Departures from a stop

use super::{API_PREFIX, ApiRequest, Endpoint, resolve_opt};
use crate::error::PtvError;
use crate::models::{Expand, Identifier, RouteType, Timestamp};
use crate::query::QueryParams;

/// Departures from a stop, optionally restricted to one route
///
/// `GET /v3/departures/route_type/{route_type}/stop/{stop_id}[/route/{route_id}]`
#[derive(Debug, Clone)]
pub struct DeparturesRequest {
    route_type: RouteType,
    stop_id: Identifier,
    route_id: Option<Identifier>,
    platform_numbers: Vec<u32>,
    direction_id: Option<Identifier>,
    look_backwards: Option<bool>,
    gtfs: Option<bool>,
    date_utc: Option<Timestamp>,
    max_results: Option<u32>,
    include_cancelled: Option<bool>,
    expand: Vec<Expand>,
}

impl DeparturesRequest {
    #[must_use]
    pub fn new(route_type: RouteType, stop_id: impl Into<Identifier>) -> Self {
        Self {
            route_type,
            stop_id: stop_id.into(),
            route_id: None,
            platform_numbers: Vec::new(),
            direction_id: None,
            look_backwards: None,
            gtfs: None,
            date_utc: None,
            max_results: None,
            include_cancelled: None,
            expand: Vec::new(),
        }
    }

    /// Only departures for this route
    #[must_use]
    pub fn with_route(mut self, route_id: impl Into<Identifier>) -> Self {
        self.route_id = Some(route_id.into());
        self
    }

    /// Only departures from these platforms, in the order given
    #[must_use]
    pub fn with_platform_numbers(mut self, platforms: impl IntoIterator<Item = u32>) -> Self {
        self.platform_numbers.extend(platforms);
        self
    }

    #[must_use]
    pub fn with_direction(mut self, direction_id: impl Into<Identifier>) -> Self {
        self.direction_id = Some(direction_id.into());
        self
    }

    /// Include departures before `date_utc`
    #[must_use]
    pub fn with_look_backwards(mut self, look_backwards: bool) -> Self {
        self.look_backwards = Some(look_backwards);
        self
    }

    /// Interpret `stop_id` as a GTFS stop ID
    #[must_use]
    pub fn with_gtfs(mut self, gtfs: bool) -> Self {
        self.gtfs = Some(gtfs);
        self
    }

    /// Departures from this time onwards (defaults to now on the server)
    ///
    /// Accepts a `DateTime<Utc>` or an ISO-8601 string; strings without an
    /// offset are read as UTC. Sent at whole-second precision, so any
    /// fractional seconds are dropped.
    #[must_use]
    pub fn with_date_utc(mut self, date_utc: impl Into<Timestamp>) -> Self {
        self.date_utc = Some(date_utc.into());
        self
    }

    #[must_use]
    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = Some(max_results);
        self
    }

    #[must_use]
    pub fn with_include_cancelled(mut self, include_cancelled: bool) -> Self {
        self.include_cancelled = Some(include_cancelled);
        self
    }

    /// Objects to return in full, in the order given
    #[must_use]
    pub fn with_expand(mut self, expand: impl IntoIterator<Item = Expand>) -> Self {
        self.expand.extend(expand);
        self
    }
}

impl Endpoint for DeparturesRequest {
    fn to_request(&self) -> Result<ApiRequest, PtvError> {
        let stop_id = self.stop_id.resolve("stop_id")?;
        let route_id = resolve_opt(self.route_id.as_ref(), "route_id")?;
        let direction_id = resolve_opt(self.direction_id.as_ref(), "direction_id")?;
        let date_utc = self
            .date_utc
            .as_ref()
            .map(|date| date.resolve("date_utc"))
            .transpose()?;

        let mut path = format!(
            "{API_PREFIX}/departures/route_type/{}/stop/{stop_id}",
            self.route_type.code()
        );
        if let Some(route_id) = route_id {
            path.push_str(&format!("/route/{route_id}"));
        }

        let mut query = QueryParams::new();
        query
            .push_all("platform_numbers", &self.platform_numbers)
            .push_opt("direction_id", direction_id)
            .push_opt("look_backwards", self.look_backwards)
            .push_opt("gtfs", self.gtfs)
            .push_opt("date_utc", date_utc)
            .push_opt("max_results", self.max_results)
            .push_opt("include_cancelled", self.include_cancelled)
            .push_all("expand", &self.expand);

        Ok(ApiRequest::new(path).with_query(query))
    }
}
