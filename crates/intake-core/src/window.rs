use std::collections::HashSet;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::decision::ReasonCode;
use crate::error::DomainError;

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Recurring weekly submission window: a set of open weekdays plus an
/// open interval of minutes within those days.
///
/// The start minute is inside the window, the end minute is outside
/// (inclusive start, exclusive end).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyWindow {
    allowed_weekdays: HashSet<Weekday>,
    start_minute: u32,
    end_minute: u32,
}

impl WeeklyWindow {
    pub fn new(
        allowed_weekdays: HashSet<Weekday>,
        start_minute: u32,
        end_minute: u32,
    ) -> Result<Self, DomainError> {
        if allowed_weekdays.is_empty() {
            return Err(DomainError::WindowRequiresWeekday);
        }
        if start_minute >= end_minute || end_minute > MINUTES_PER_DAY {
            return Err(DomainError::InvalidWindowBounds);
        }
        Ok(Self {
            allowed_weekdays,
            start_minute,
            end_minute,
        })
    }

    pub fn check(&self, local: NaiveDateTime) -> ReasonCode {
        if !self.allowed_weekdays.contains(&local.weekday()) {
            return ReasonCode::Weekend;
        }
        let minute_of_day = local.hour() * 60 + local.minute();
        if minute_of_day < self.start_minute {
            ReasonCode::BeforeHours
        } else if minute_of_day >= self.end_minute {
            ReasonCode::AfterHours
        } else {
            ReasonCode::Ok
        }
    }

    /// Local wall-clock instant at which the window opens on `date`.
    pub fn opening_on(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(NaiveTime::MIN) + Duration::minutes(i64::from(self.start_minute))
    }

    pub fn allowed_weekdays(&self) -> &HashSet<Weekday> {
        &self.allowed_weekdays
    }

    pub fn start_minute(&self) -> u32 {
        self.start_minute
    }

    pub fn end_minute(&self) -> u32 {
        self.end_minute
    }
}

impl Default for WeeklyWindow {
    /// Mon–Fri, 08:30–17:30.
    fn default() -> Self {
        Self {
            allowed_weekdays: HashSet::from([
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
            ]),
            start_minute: 8 * 60 + 30,
            end_minute: 17 * 60 + 30,
        }
    }
}
