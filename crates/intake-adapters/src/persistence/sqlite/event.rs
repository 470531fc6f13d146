use async_trait::async_trait;
use chrono::{Datelike, Duration, NaiveDate};

use intake_core::calendar::CalendarEvent;
use intake_core::ids::EventId;
use intake_ports::error::PortError;
use intake_ports::outbound::CalendarEventRepository;

use super::SqliteDb;

/// Start date widened backwards by whole buffered days. Conservative on
/// purpose: the SQL span filter may over-match by part of a day, the
/// resolver applies the exact buffer-hour check.
fn block_from(event: &CalendarEvent) -> NaiveDate {
    let buffered_days = i64::from((event.buffer_hours() + 23) / 24);
    event.start_date() - Duration::days(buffered_days)
}

fn intersects(event: &CalendarEvent, start: NaiveDate, end: NaiveDate) -> bool {
    block_from(event) <= end && event.end_date() >= start
}

impl SqliteDb {
    pub async fn save_event(&self, event: &CalendarEvent) -> Result<(), PortError> {
        let data =
            serde_json::to_string(event).map_err(|e| PortError::Persistence(e.to_string()))?;

        sqlx::query(
            "INSERT INTO calendar_events (id, data, block_from, end_date, is_recurring)
             VALUES (?, ?, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET
                 data = excluded.data,
                 block_from = excluded.block_from,
                 end_date = excluded.end_date,
                 is_recurring = excluded.is_recurring",
        )
        .bind(event.id().to_string())
        .bind(&data)
        .bind(block_from(event).to_string())
        .bind(event.end_date().to_string())
        .bind(event.recurrence().is_some())
        .execute(self.pool())
        .await
        .map_err(|e| PortError::Persistence(e.to_string()))?;

        Ok(())
    }

    pub async fn delete_event(&self, id: &EventId) -> Result<(), PortError> {
        let result = sqlx::query("DELETE FROM calendar_events WHERE id = ?")
            .bind(id.to_string())
            .execute(self.pool())
            .await
            .map_err(|e| PortError::Persistence(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(PortError::NotFound);
        }
        Ok(())
    }

    /// Recurring templates are stored once and projected onto every year
    /// touching the queried span. One year of slack on both sides: an
    /// occurrence starting the year before can spill forward over the
    /// boundary, and one starting the year after can reach back into the
    /// span through its buffer hours.
    async fn recurring_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<CalendarEvent>, PortError> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT data FROM calendar_events WHERE is_recurring = 1")
                .fetch_all(self.pool())
                .await
                .map_err(|e| PortError::Persistence(e.to_string()))?;

        let mut occurrences = Vec::new();
        for (data,) in rows {
            let template: CalendarEvent =
                serde_json::from_str(&data).map_err(|e| PortError::Malformed(e.to_string()))?;
            for year in (start.year() - 1)..=(end.year() + 1) {
                if let Some(occurrence) = template.occurrence_in_year(year) {
                    if intersects(&occurrence, start, end) {
                        occurrences.push(occurrence);
                    }
                }
            }
        }
        Ok(occurrences)
    }
}

#[async_trait]
impl CalendarEventRepository for SqliteDb {
    async fn events_overlapping(&self, date: NaiveDate) -> Result<Vec<CalendarEvent>, PortError> {
        self.events_in_range(date, date).await
    }

    async fn events_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<CalendarEvent>, PortError> {
        // ISO dates compare correctly as text
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT data FROM calendar_events
             WHERE is_recurring = 0 AND block_from <= ? AND end_date >= ?",
        )
        .bind(end.to_string())
        .bind(start.to_string())
        .fetch_all(self.pool())
        .await
        .map_err(|e| PortError::Persistence(e.to_string()))?;

        let mut events = Vec::with_capacity(rows.len());
        for (data,) in rows {
            let event: CalendarEvent =
                serde_json::from_str(&data).map_err(|e| PortError::Malformed(e.to_string()))?;
            events.push(event);
        }

        events.extend(self.recurring_in_range(start, end).await?);
        Ok(events)
    }
}
