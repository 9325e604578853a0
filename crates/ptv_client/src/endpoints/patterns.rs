//! Stopping patterns

use super::{API_PREFIX, ApiRequest, Endpoint, resolve_opt};
use crate::error::PtvError;
use crate::models::{Expand, Identifier, RouteType, Timestamp};
use crate::query::QueryParams;

/// The stopping pattern of a run
///
/// `GET /v3/pattern/run/{run_id}/route_type/{route_type}`
///
/// `expand` is mandatory for this operation; an empty list is rejected.
#[derive(Debug, Clone)]
pub struct PatternRequest {
    run_id: Identifier,
    route_type: RouteType,
    expand: Vec<Expand>,
    stop_id: Option<Identifier>,
    date_utc: Option<Timestamp>,
}

impl PatternRequest {
    #[must_use]
    pub fn new(
        run_id: impl Into<Identifier>,
        route_type: RouteType,
        expand: impl IntoIterator<Item = Expand>,
    ) -> Self {
        Self {
            run_id: run_id.into(),
            route_type,
            expand: expand.into_iter().collect(),
            stop_id: None,
            date_utc: None,
        }
    }

    /// Only return the pattern from this stop onwards
    #[must_use]
    pub fn with_stop(mut self, stop_id: impl Into<Identifier>) -> Self {
        self.stop_id = Some(stop_id.into());
        self
    }

    /// Timestamp in UTC (ISO-8601), sent at whole-second precision
    #[must_use]
    pub fn with_date_utc(mut self, date_utc: impl Into<Timestamp>) -> Self {
        self.date_utc = Some(date_utc.into());
        self
    }
}

impl Endpoint for PatternRequest {
    fn to_request(&self) -> Result<ApiRequest, PtvError> {
        let run_id = self.run_id.resolve("run_id")?;
        if self.expand.is_empty() {
            return Err(PtvError::invalid("expand", "at least one option is required"));
        }
        let stop_id = resolve_opt(self.stop_id.as_ref(), "stop_id")?;
        let date_utc = self
            .date_utc
            .as_ref()
            .map(|date| date.resolve("date_utc"))
            .transpose()?;

        let path = format!(
            "{API_PREFIX}/pattern/run/{run_id}/route_type/{}",
            self.route_type.code()
        );

        let mut query = QueryParams::new();
        query
            .push_all("expand", &self.expand)
            .push_opt("stop_id", stop_id)
            .push_opt("date_utc", date_utc);

        Ok(ApiRequest::new(path).with_query(query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_request() {
        let request = PatternRequest::new(1, RouteType::Train, [Expand::All])
            .with_stop(1071)
            .to_request()
            .unwrap();
        assert_eq!(request.path(), "/v3/pattern/run/1/route_type/0");
        assert_eq!(request.query().to_query_string(), "expand=all&stop_id=1071");
    }

    #[test]
    fn test_expand_required() {
        let err = PatternRequest::new(1, RouteType::Train, [])
            .to_request()
            .unwrap_err();
        assert!(matches!(err, PtvError::InvalidParameter { name: "expand", .. }));
    }

    #[test]
    fn test_date_is_normalised_to_utc() {
        let request = PatternRequest::new(1, RouteType::Bus, [Expand::Stop])
            .with_date_utc("2026-10-18T20:30:00+11:00")
            .to_request()
            .unwrap();
        assert_eq!(
            request.query().get("date_utc"),
            Some("2026-10-18T09:30:00Z")
        );
    }
}
