use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use intake_core::decision::ReasonCode;

/// The next instant at which a request may legally be created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextAvailable {
    pub at: DateTime<Utc>,
    pub days_ahead: u32,
}

/// Per-day availability tally over a date span, used to preview the impact
/// of an academic calendar before it is activated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityReport {
    pub total: u32,
    pub available: u32,
    pub unavailable: u32,
    pub by_reason: BTreeMap<ReasonCode, u32>,
}

impl AvailabilityReport {
    pub fn record(&mut self, reason: ReasonCode) {
        self.total += 1;
        if reason == ReasonCode::Ok {
            self.available += 1;
        } else {
            self.unavailable += 1;
        }
        *self.by_reason.entry(reason).or_insert(0) += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_tallies_per_reason() {
        let mut report = AvailabilityReport::default();
        report.record(ReasonCode::Ok);
        report.record(ReasonCode::Weekend);
        report.record(ReasonCode::Weekend);
        report.record(ReasonCode::Holiday);

        assert_eq!(report.total, 4);
        assert_eq!(report.available, 1);
        assert_eq!(report.unavailable, 3);
        assert_eq!(report.by_reason[&ReasonCode::Weekend], 2);
        assert_eq!(report.by_reason[&ReasonCode::Holiday], 1);
        assert_eq!(report.by_reason[&ReasonCode::Ok], 1);
    }
}
