use async_trait::async_trait;
use chrono::NaiveDate;

use intake_core::calendar::CalendarEvent;
use intake_core::settings::AdmissibilitySettings;

use crate::error::PortError;

/// Read side of the academic calendar store. Recurring events are expanded
/// by the implementation; callers only ever see concrete date ranges for
/// the years they asked about.
#[async_trait]
pub trait CalendarEventRepository: Send + Sync {
    /// Events whose effective span (buffer included) covers `date`.
    async fn events_overlapping(&self, date: NaiveDate) -> Result<Vec<CalendarEvent>, PortError>;

    /// Events whose effective span intersects the inclusive `[start, end]`
    /// range. Used to prefetch a whole scan span in one round-trip.
    async fn events_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<CalendarEvent>, PortError>;
}

/// Source of the current admissibility configuration. Implementations may
/// cache; the engine requests a snapshot per operation and never holds one.
#[async_trait]
pub trait SettingsProvider: Send + Sync {
    async fn current(&self) -> Result<AdmissibilitySettings, PortError>;
}
