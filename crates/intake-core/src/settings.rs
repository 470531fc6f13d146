use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::window::WeeklyWindow;

mod tz_serde {
    use chrono_tz::Tz;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(tz: &Tz, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(tz.name())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Tz, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<Tz>().map_err(serde::de::Error::custom)
    }
}

/// Snapshot of the admissibility configuration. Callers hand the engine a
/// fresh snapshot per evaluation; nothing here is cached by the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdmissibilitySettings {
    /// Global kill switch: when false, only the weekly window applies and
    /// the calendar store is never consulted.
    pub calendar_enabled: bool,
    pub window: WeeklyWindow,
    #[serde(with = "tz_serde")]
    pub timezone: Tz,
}

impl AdmissibilitySettings {
    pub fn new(calendar_enabled: bool, window: WeeklyWindow, timezone: Tz) -> Self {
        Self {
            calendar_enabled,
            window,
            timezone,
        }
    }

    /// Validates an IANA zone name at configuration time, so a bad zone
    /// surfaces at settings load rather than mid-evaluation.
    pub fn parse_timezone(name: &str) -> Result<Tz, DomainError> {
        name.parse::<Tz>()
            .map_err(|_| DomainError::InvalidTimezone(name.into()))
    }

    /// Institution wall-clock time for an absolute instant.
    pub fn to_local(&self, at: DateTime<Utc>) -> NaiveDateTime {
        at.with_timezone(&self.timezone).naive_local()
    }
}

impl Default for AdmissibilitySettings {
    fn default() -> Self {
        Self {
            calendar_enabled: true,
            window: WeeklyWindow::default(),
            timezone: chrono_tz::Europe::Istanbul,
        }
    }
}
