pub mod resolver;

use chrono::{Datelike, Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::EventId;

/// Informational classification of an academic calendar entry. Whether an
/// event gates request creation is decided by its flag, not its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    Holiday,
    Break,
    ExamPeriod,
    Registration,
    SemesterStart,
    SemesterEnd,
    Orientation,
    NoClasses,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recurrence {
    Yearly,
}

/// A dated academic calendar entry. Immutable once constructed; the
/// evaluation path treats events as facts and never mutates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    id: EventId,
    name: String,
    kind: EventKind,
    start_date: NaiveDate,
    end_date: NaiveDate,
    recurrence: Option<Recurrence>,
    affects_request_creation: bool,
    buffer_hours: u32,
    priority: i32,
}

impl CalendarEvent {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: String,
        kind: EventKind,
        start_date: NaiveDate,
        end_date: NaiveDate,
        recurrence: Option<Recurrence>,
        affects_request_creation: bool,
        buffer_hours: u32,
        priority: i32,
    ) -> Result<Self, DomainError> {
        if end_date < start_date {
            return Err(DomainError::InvalidEventPeriod);
        }
        Ok(Self {
            id: EventId::new(),
            name,
            kind,
            start_date,
            end_date,
            recurrence,
            affects_request_creation,
            buffer_hours,
            priority,
        })
    }

    /// Whether this event blocks request creation on `date`.
    ///
    /// The block runs from local midnight of `start_date` pushed back by
    /// `buffer_hours`, through the end of `end_date`. A date matches when
    /// its local midnight falls inside that span, so a 24-hour buffer
    /// blocks exactly one extra calendar day.
    pub fn blocks_on(&self, date: NaiveDate) -> bool {
        if !self.affects_request_creation {
            return false;
        }
        let midnight = date.and_time(NaiveTime::MIN);
        let effective_start = self.start_date.and_time(NaiveTime::MIN)
            - Duration::hours(i64::from(self.buffer_hours));
        midnight >= effective_start && date <= self.end_date
    }

    /// Projects a yearly-recurring event onto `year`, keeping the span
    /// length across year boundaries. Returns `None` for non-recurring
    /// events and for dates that do not exist in the target year
    /// (a Feb 29 template in a non-leap year).
    pub fn occurrence_in_year(&self, year: i32) -> Option<Self> {
        self.recurrence?;
        let span_years = self.end_date.year() - self.start_date.year();
        let start_date =
            NaiveDate::from_ymd_opt(year, self.start_date.month(), self.start_date.day())?;
        let end_date = NaiveDate::from_ymd_opt(
            year + span_years,
            self.end_date.month(),
            self.end_date.day(),
        )?;
        Some(Self {
            start_date,
            end_date,
            ..self.clone()
        })
    }

    pub fn id(&self) -> &EventId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn recurrence(&self) -> Option<Recurrence> {
        self.recurrence
    }

    pub fn affects_request_creation(&self) -> bool {
        self.affects_request_creation
    }

    pub fn buffer_hours(&self) -> u32 {
        self.buffer_hours
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn blocking(start: NaiveDate, end: NaiveDate, buffer_hours: u32) -> CalendarEvent {
        CalendarEvent::new(
            "winter break".into(),
            EventKind::Break,
            start,
            end,
            None,
            true,
            buffer_hours,
            1,
        )
        .unwrap()
    }

    #[test]
    fn end_before_start_is_rejected() {
        let result = CalendarEvent::new(
            "bad".into(),
            EventKind::Holiday,
            date(2025, 5, 2),
            date(2025, 5, 1),
            None,
            true,
            0,
            1,
        );
        assert_eq!(result, Err(DomainError::InvalidEventPeriod));
    }

    #[test]
    fn blocks_every_day_of_its_span() {
        let event = blocking(date(2025, 12, 24), date(2025, 12, 26), 0);
        assert!(event.blocks_on(date(2025, 12, 24)));
        assert!(event.blocks_on(date(2025, 12, 25)));
        assert!(event.blocks_on(date(2025, 12, 26)));
        assert!(!event.blocks_on(date(2025, 12, 23)));
        assert!(!event.blocks_on(date(2025, 12, 27)));
    }

    #[test]
    fn non_blocking_event_never_blocks() {
        let event = CalendarEvent::new(
            "orientation".into(),
            EventKind::Orientation,
            date(2025, 9, 1),
            date(2025, 9, 5),
            None,
            false,
            0,
            1,
        )
        .unwrap();
        assert!(!event.blocks_on(date(2025, 9, 3)));
    }

    #[test]
    fn buffer_of_24_hours_blocks_one_extra_day() {
        let event = blocking(date(2025, 12, 25), date(2025, 12, 25), 24);
        assert!(event.blocks_on(date(2025, 12, 24)));
        assert!(!event.blocks_on(date(2025, 12, 23)));
    }

    #[test]
    fn short_buffer_does_not_reach_previous_midnight() {
        // 12h buffer starts the block at 12:00 the day before; that day's
        // midnight is outside the span, so the day itself is not blocked.
        let event = blocking(date(2025, 12, 25), date(2025, 12, 25), 12);
        assert!(!event.blocks_on(date(2025, 12, 24)));
        assert!(event.blocks_on(date(2025, 12, 25)));
    }

    #[test]
    fn yearly_event_projects_onto_other_years() {
        let template = CalendarEvent::new(
            "republic day".into(),
            EventKind::Holiday,
            date(2024, 10, 29),
            date(2024, 10, 29),
            Some(Recurrence::Yearly),
            true,
            0,
            1,
        )
        .unwrap();

        let projected = template.occurrence_in_year(2026).unwrap();
        assert_eq!(projected.start_date(), date(2026, 10, 29));
        assert_eq!(projected.end_date(), date(2026, 10, 29));
        assert_eq!(projected.id(), template.id());
    }

    #[test]
    fn yearly_event_keeps_span_across_year_boundary() {
        let template = CalendarEvent::new(
            "winter break".into(),
            EventKind::Break,
            date(2024, 12, 20),
            date(2025, 1, 5),
            Some(Recurrence::Yearly),
            true,
            0,
            1,
        )
        .unwrap();

        let projected = template.occurrence_in_year(2026).unwrap();
        assert_eq!(projected.start_date(), date(2026, 12, 20));
        assert_eq!(projected.end_date(), date(2027, 1, 5));
    }

    #[test]
    fn feb_29_template_skips_non_leap_years() {
        let template = CalendarEvent::new(
            "leap day".into(),
            EventKind::NoClasses,
            date(2024, 2, 29),
            date(2024, 2, 29),
            Some(Recurrence::Yearly),
            true,
            0,
            1,
        )
        .unwrap();

        assert!(template.occurrence_in_year(2025).is_none());
        assert!(template.occurrence_in_year(2028).is_some());
    }

    #[test]
    fn non_recurring_event_has_no_occurrences() {
        let event = blocking(date(2025, 12, 25), date(2025, 12, 25), 0);
        assert!(event.occurrence_in_year(2026).is_none());
    }
}
