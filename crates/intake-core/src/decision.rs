use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::calendar::CalendarEvent;

/// Why a request may or may not be created right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ReasonCode {
    Ok,
    Weekend,
    BeforeHours,
    AfterHours,
    Holiday,
    CalendarDataUnavailable,
}

impl ReasonCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Weekend => "weekend",
            Self::BeforeHours => "before_hours",
            Self::AfterHours => "after_hours",
            Self::Holiday => "holiday",
            Self::CalendarDataUnavailable => "calendar_data_unavailable",
        }
    }
}

/// Outcome of an admissibility evaluation. Expected non-availability
/// (weekend, out of hours, holiday) is a value, never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdmissibilityDecision {
    pub allowed: bool,
    pub reason: ReasonCode,
    pub local_time: NaiveDateTime,
    pub blocking_event: Option<CalendarEvent>,
}

impl AdmissibilityDecision {
    pub fn allowed(local_time: NaiveDateTime) -> Self {
        Self {
            allowed: true,
            reason: ReasonCode::Ok,
            local_time,
            blocking_event: None,
        }
    }

    pub fn rejected(local_time: NaiveDateTime, reason: ReasonCode) -> Self {
        Self {
            allowed: false,
            reason,
            local_time,
            blocking_event: None,
        }
    }

    pub fn blocked_by(local_time: NaiveDateTime, event: CalendarEvent) -> Self {
        Self {
            allowed: false,
            reason: ReasonCode::Holiday,
            local_time,
            blocking_event: Some(event),
        }
    }

    /// Fail-closed result used when the calendar store cannot be consulted.
    pub fn calendar_unavailable(local_time: NaiveDateTime) -> Self {
        Self {
            allowed: false,
            reason: ReasonCode::CalendarDataUnavailable,
            local_time,
            blocking_event: None,
        }
    }
}
