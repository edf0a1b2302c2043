//! Attendance (time clock) model.
//!
//! # Responsibility
//! - Define check-in/check-out records returned by the timesheet API.
//! - Define the request body a client posts when clocking in or out.
//!
//! # Invariants
//! - A `ClockSubmission` always carries a location; it cannot be built
//!   without one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Direction of one clock event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockKind {
    In,
    Out,
}

impl ClockKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
        }
    }
}

/// Office the record was clocked at, as embedded by the timesheet endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Office {
    pub name: String,
}

/// One attendance record as served by the timesheet endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub created_at: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: ClockKind,
    #[serde(default)]
    pub office: Option<Office>,
}

/// Device location captured before clocking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Errors raised while preparing an attendance submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttendanceError {
    /// No device location is available (permission denied or not yet fixed).
    LocationUnavailable,
}

impl Display for AttendanceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LocationUnavailable => write!(f, "location not available"),
        }
    }
}

impl Error for AttendanceError {}

/// Body posted to the timesheet endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClockSubmission {
    pub lat: f64,
    pub long: f64,
    #[serde(rename = "type")]
    pub kind: ClockKind,
}

impl ClockSubmission {
    pub fn new(kind: ClockKind, location: Option<GeoPoint>) -> Result<Self, AttendanceError> {
        let point = location.ok_or(AttendanceError::LocationUnavailable)?;
        Ok(Self {
            lat: point.latitude,
            long: point.longitude,
            kind,
        })
    }
}
