use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc};
use tracing::warn;

use intake_core::calendar::{resolver, CalendarEvent};
use intake_core::decision::{AdmissibilityDecision, ReasonCode};
use intake_core::settings::AdmissibilitySettings;
use intake_ports::outbound::{CalendarEventRepository, SettingsProvider};
use intake_ports::types::{AvailabilityReport, NextAvailable};

use crate::error::AppError;

const DEFAULT_MAX_SCAN_DAYS: u32 = 365;
const DEFAULT_MAX_RANGE_DAYS: i64 = 366;

/// Decides whether a guidance request may be created at a given instant,
/// and when the next admissible instant is.
///
/// Weekly-window rejections short-circuit: the calendar store is only
/// consulted on days the window would otherwise leave open. On a store
/// failure the request path fails closed with `CalendarDataUnavailable`;
/// the scan paths propagate the failure instead, since an all-blocked
/// preview would hide the outage from the operator.
pub struct AvailabilityService<C, S>
where
    C: CalendarEventRepository,
    S: SettingsProvider,
{
    calendar: C,
    settings: S,
    max_scan_days: u32,
    max_range_days: i64,
}

impl<C, S> AvailabilityService<C, S>
where
    C: CalendarEventRepository,
    S: SettingsProvider,
{
    pub fn new(calendar: C, settings: S) -> Self {
        Self::with_limits(calendar, settings, DEFAULT_MAX_SCAN_DAYS, DEFAULT_MAX_RANGE_DAYS)
    }

    pub fn with_limits(calendar: C, settings: S, max_scan_days: u32, max_range_days: i64) -> Self {
        Self {
            calendar,
            settings,
            max_scan_days,
            max_range_days,
        }
    }

    /// Admissibility at `now`, as checked before accepting a submission.
    pub async fn check_now(&self, now: DateTime<Utc>) -> Result<AdmissibilityDecision, AppError> {
        let settings = self.settings.current().await?;
        let local = settings.to_local(now);
        Ok(self.evaluate_local(&settings, local).await)
    }

    /// Admissibility on `date`, evaluated at the window's opening time.
    pub async fn check_date(&self, date: NaiveDate) -> Result<AdmissibilityDecision, AppError> {
        let settings = self.settings.current().await?;
        let local = settings.window.opening_on(date);
        Ok(self.evaluate_local(&settings, local).await)
    }

    /// First admissible instant strictly after the day of `from`, proposed
    /// at the window's opening time. Scans day by day, bounded so that a
    /// calendar blocking an entire year surfaces as an error rather than
    /// an unbounded loop.
    pub async fn next_available(&self, from: DateTime<Utc>) -> Result<NextAvailable, AppError> {
        let settings = self.settings.current().await?;
        let start_date = settings.to_local(from).date();
        let events = self
            .prefetch(
                &settings,
                start_date,
                start_date + Duration::days(i64::from(self.max_scan_days)),
            )
            .await?;

        for days_ahead in 1..=self.max_scan_days {
            let date = start_date + Duration::days(i64::from(days_ahead));
            let local = settings.window.opening_on(date);
            if !Self::decide(&settings, local, &events).allowed {
                continue;
            }
            // The candidate may have been shifted past a DST gap, so the
            // instant actually proposed is checked again.
            if let Some(at) = to_utc(&settings, local) {
                if Self::decide(&settings, settings.to_local(at), &events).allowed {
                    return Ok(NextAvailable { at, days_ahead });
                }
            }
        }
        Err(AppError::NoAvailableDay {
            max_days: self.max_scan_days,
        })
    }

    /// Per-day availability tally over `[start, end]`, one evaluation per
    /// day at the window's opening time.
    pub async fn preview_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<AvailabilityReport, AppError> {
        if end < start {
            return Err(AppError::InvalidDateRange);
        }
        let days = (end - start).num_days();
        if days > self.max_range_days {
            return Err(AppError::RangeTooLarge {
                days,
                max: self.max_range_days,
            });
        }

        let settings = self.settings.current().await?;
        let events = self.prefetch(&settings, start, end).await?;

        let mut report = AvailabilityReport::default();
        let mut date = start;
        while date <= end {
            let decision = Self::decide(&settings, settings.window.opening_on(date), &events);
            report.record(decision.reason);
            date = date + Duration::days(1);
        }
        Ok(report)
    }

    async fn evaluate_local(
        &self,
        settings: &AdmissibilitySettings,
        local: NaiveDateTime,
    ) -> AdmissibilityDecision {
        // Fetch only when the decision can actually depend on the calendar.
        if settings.window.check(local) != ReasonCode::Ok || !settings.calendar_enabled {
            return Self::decide(settings, local, &[]);
        }
        match self.calendar.events_overlapping(local.date()).await {
            Ok(events) => Self::decide(settings, local, &events),
            Err(err) => {
                warn!(error = %err, "calendar store lookup failed, failing closed");
                AdmissibilityDecision::calendar_unavailable(local)
            }
        }
    }

    /// One batched fetch for a scanned span. Skipped entirely when the
    /// calendar is disabled.
    async fn prefetch(
        &self,
        settings: &AdmissibilitySettings,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<CalendarEvent>, AppError> {
        if !settings.calendar_enabled {
            return Ok(Vec::new());
        }
        Ok(self.calendar.events_in_range(start, end).await?)
    }

    /// The admissibility decision proper: weekly window first, then the
    /// calendar kill switch, then the holiday resolver.
    fn decide(
        settings: &AdmissibilitySettings,
        local: NaiveDateTime,
        events: &[CalendarEvent],
    ) -> AdmissibilityDecision {
        let reason = settings.window.check(local);
        if reason != ReasonCode::Ok {
            return AdmissibilityDecision::rejected(local, reason);
        }
        if !settings.calendar_enabled {
            return AdmissibilityDecision::allowed(local);
        }
        match resolver::primary_blocker(local.date(), events) {
            Some(event) => AdmissibilityDecision::blocked_by(local, event.clone()),
            None => AdmissibilityDecision::allowed(local),
        }
    }
}

/// Converts a proposed local opening time to an instant. An opening that
/// falls into a DST spring-forward gap is moved one hour past the jump;
/// an ambiguous fall-back time resolves to the earlier instant.
fn to_utc(settings: &AdmissibilitySettings, local: NaiveDateTime) -> Option<DateTime<Utc>> {
    match settings.timezone.from_local_datetime(&local) {
        LocalResult::Single(at) | LocalResult::Ambiguous(at, _) => Some(at.with_timezone(&Utc)),
        LocalResult::None => settings
            .timezone
            .from_local_datetime(&(local + Duration::hours(1)))
            .earliest()
            .map(|at| at.with_timezone(&Utc)),
    }
}
