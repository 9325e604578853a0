//! Ticket outlets

use super::{API_PREFIX, ApiRequest, Endpoint, finite, location_segment};
use crate::error::PtvError;
use crate::query::QueryParams;

/// Ticket outlets, optionally near a location
///
/// `GET /v3/outlets[/location/{latitude},{longitude}]`
#[derive(Debug, Clone, Default)]
pub struct OutletsRequest {
    latitude: Option<f64>,
    longitude: Option<f64>,
    max_distance: Option<f64>,
    max_results: Option<u32>,
}

impl OutletsRequest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_latitude(mut self, latitude: f64) -> Self {
        self.latitude = Some(latitude);
        self
    }

    #[must_use]
    pub const fn with_longitude(mut self, longitude: f64) -> Self {
        self.longitude = Some(longitude);
        self
    }

    /// Shorthand for setting both coordinates
    #[must_use]
    pub const fn with_location(self, latitude: f64, longitude: f64) -> Self {
        self.with_latitude(latitude).with_longitude(longitude)
    }

    /// Search radius in metres
    #[must_use]
    pub const fn with_max_distance(mut self, metres: f64) -> Self {
        self.max_distance = Some(metres);
        self
    }

    #[must_use]
    pub const fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = Some(max_results);
        self
    }
}

impl Endpoint for OutletsRequest {
    fn to_request(&self) -> Result<ApiRequest, PtvError> {
        let path = match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => format!(
                "{API_PREFIX}/outlets/location/{}",
                location_segment(latitude, longitude)?
            ),
            (None, None) => format!("{API_PREFIX}/outlets"),
            (Some(_), None) => {
                return Err(PtvError::invalid("longitude", "required when latitude is given"));
            },
            (None, Some(_)) => {
                return Err(PtvError::invalid("latitude", "required when longitude is given"));
            },
        };

        let max_distance = self
            .max_distance
            .map(|d| finite(d, "max_distance"))
            .transpose()?;

        let mut query = QueryParams::new();
        query
            .push_opt("max_distance", max_distance)
            .push_opt("max_results", self.max_results);

        Ok(ApiRequest::new(path).with_query(query))
    }
}
