//! PTV parameter vocabularies and response envelope
//!
//! Typed representations of the values the Timetable API accepts as
//! parameters, plus the `status` object every response carries.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::PtvError;
use crate::query::QueryValue;

/// A decoded JSON response body, passed through without schema validation
pub type ApiResponse = Map<String, Value>;

/// Transport mode as identified by PTV route type codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub enum RouteType {
    /// Metropolitan train (0)
    Train,
    /// Tram (1)
    Tram,
    /// Bus (2)
    Bus,
    /// V/Line regional train and coach (3)
    VLine,
    /// Night bus (4)
    NightBus,
    /// Any code this client does not know by name
    Other(u32),
}

impl RouteType {
    /// Numeric code sent to the API
    #[must_use]
    pub const fn code(self) -> u32 {
        match self {
            Self::Train => 0,
            Self::Tram => 1,
            Self::Bus => 2,
            Self::VLine => 3,
            Self::NightBus => 4,
            Self::Other(code) => code,
        }
    }
}

impl From<u32> for RouteType {
    fn from(code: u32) -> Self {
        match code {
            0 => Self::Train,
            1 => Self::Tram,
            2 => Self::Bus,
            3 => Self::VLine,
            4 => Self::NightBus,
            other => Self::Other(other),
        }
    }
}

impl From<RouteType> for u32 {
    fn from(route_type: RouteType) -> Self {
        route_type.code()
    }
}

impl fmt::Display for RouteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Train => write!(f, "Train"),
            Self::Tram => write!(f, "Tram"),
            Self::Bus => write!(f, "Bus"),
            Self::VLine => write!(f, "V/Line"),
            Self::NightBus => write!(f, "Night Bus"),
            Self::Other(code) => write!(f, "Route type {code}"),
        }
    }
}

impl QueryValue for RouteType {
    fn to_query_value(&self) -> String {
        self.code().to_string()
    }
}

/// Objects that may be returned in full alongside a response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Expand {
    All,
    Stop,
    Route,
    Run,
    Direction,
    Disruption,
    VehicleDescriptor,
    VehiclePosition,
    None,
}

impl Expand {
    /// Wire value of this option
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Stop => "stop",
            Self::Route => "route",
            Self::Run => "run",
            Self::Direction => "direction",
            Self::Disruption => "disruption",
            Self::VehicleDescriptor => "vehicledescriptor",
            Self::VehiclePosition => "vehicleposition",
            Self::None => "none",
        }
    }
}

impl FromStr for Expand {
    type Err = PtvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "stop" => Ok(Self::Stop),
            "route" => Ok(Self::Route),
            "run" => Ok(Self::Run),
            "direction" => Ok(Self::Direction),
            "disruption" => Ok(Self::Disruption),
            "vehicledescriptor" => Ok(Self::VehicleDescriptor),
            "vehicleposition" => Ok(Self::VehiclePosition),
            "none" => Ok(Self::None),
            _ => Err(PtvError::invalid("expand", format!("unknown option `{s}`"))),
        }
    }
}

impl fmt::Display for Expand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl QueryValue for Expand {
    fn to_query_value(&self) -> String {
        self.as_str().to_string()
    }
}

/// Filter for disruption queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisruptionStatus {
    Current,
    Planned,
}

impl QueryValue for DisruptionStatus {
    fn to_query_value(&self) -> String {
        match self {
            Self::Current => "current",
            Self::Planned => "planned",
        }
        .to_string()
    }
}

/// A resource identifier as supplied by the caller
///
/// Accepts integers or strings; strings are checked to be non-negative
/// integers when the request is built, before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(String);

impl Identifier {
    /// Validate and return the numeric identifier
    ///
    /// # Errors
    ///
    /// Returns [`PtvError::InvalidParameter`] naming `name` if the value is
    /// not a non-negative integer.
    pub fn resolve(&self, name: &'static str) -> Result<u64, PtvError> {
        self.0.parse::<u64>().map_err(|_| {
            PtvError::invalid(
                name,
                format!("must be a non-negative integer, got `{}`", self.0),
            )
        })
    }
}

macro_rules! identifier_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Identifier {
                fn from(value: $ty) -> Self {
                    Self(value.to_string())
                }
            }
        )*
    };
}

identifier_from!(u8, u16, u32, u64, usize, i32, i64, &str, String);

/// A point in time as supplied by the caller
///
/// Strings must be ISO-8601 timestamps and are normalised to UTC. Values
/// without an offset (`2026-10-18T09:30:00`) or without a time
/// (`2026-10-18`, midnight) are taken as UTC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Timestamp {
    Utc(DateTime<Utc>),
    Raw(String),
}

impl Timestamp {
    /// Validate and return the timestamp in UTC
    ///
    /// # Errors
    ///
    /// Returns [`PtvError::InvalidParameter`] naming `name` if a string value
    /// is not a valid ISO-8601 timestamp.
    pub fn resolve(&self, name: &'static str) -> Result<DateTime<Utc>, PtvError> {
        match self {
            Self::Utc(date) => Ok(*date),
            Self::Raw(raw) => parse_iso8601(raw).ok_or_else(|| {
                PtvError::invalid(name, format!("`{raw}` is not an ISO-8601 timestamp"))
            }),
        }
    }
}

fn parse_iso8601(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }
    // %.f also matches a missing fraction
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(date: DateTime<Utc>) -> Self {
        Self::Utc(date)
    }
}

impl From<&str> for Timestamp {
    fn from(raw: &str) -> Self {
        Self::Raw(raw.to_string())
    }
}

impl From<String> for Timestamp {
    fn from(raw: String) -> Self {
        Self::Raw(raw)
    }
}

/// The `status` object attached to every Timetable API response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseStatus {
    /// API version that served the request
    pub version: String,
    /// 1 when the service is healthy, 0 otherwise
    pub health: u8,
}

impl ResponseStatus {
    /// Extract the status envelope from a response, if present and well formed
    #[must_use]
    pub fn from_response(response: &ApiResponse) -> Option<Self> {
        response
            .get("status")
            .cloned()
            .and_then(|value| serde_json::from_value(value).ok())
    }

    #[must_use]
    pub const fn is_healthy(&self) -> bool {
        self.health == 1
    }
}
