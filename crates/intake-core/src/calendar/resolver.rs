use chrono::NaiveDate;

use super::CalendarEvent;

/// Picks the event reported as the reason a date is blocked.
///
/// Candidates are events whose effective span covers `date`. Among them the
/// lowest priority number wins; ties fall to the earliest start date, then
/// to the smallest id, so the result is deterministic for any input order.
pub fn primary_blocker(date: NaiveDate, events: &[CalendarEvent]) -> Option<&CalendarEvent> {
    events
        .iter()
        .filter(|event| event.blocks_on(date))
        .min_by(|a, b| {
            a.priority()
                .cmp(&b.priority())
                .then_with(|| a.start_date().cmp(&b.start_date()))
                .then_with(|| a.id().cmp(b.id()))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::EventKind;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(
        name: &str,
        start: NaiveDate,
        end: NaiveDate,
        blocking: bool,
        priority: i32,
    ) -> CalendarEvent {
        CalendarEvent::new(
            name.into(),
            EventKind::Holiday,
            start,
            end,
            None,
            blocking,
            0,
            priority,
        )
        .unwrap()
    }

    #[test]
    fn no_events_means_no_blocker() {
        assert!(primary_blocker(date(2025, 12, 25), &[]).is_none());
    }

    #[test]
    fn covering_event_is_returned() {
        let events = vec![event(
            "christmas",
            date(2025, 12, 25),
            date(2025, 12, 25),
            true,
            1,
        )];
        let blocker = primary_blocker(date(2025, 12, 25), &events).unwrap();
        assert_eq!(blocker.name(), "christmas");
    }

    #[test]
    fn non_blocking_events_are_ignored() {
        let events = vec![event(
            "exam week",
            date(2025, 12, 22),
            date(2025, 12, 26),
            false,
            1,
        )];
        assert!(primary_blocker(date(2025, 12, 25), &events).is_none());
    }

    #[test]
    fn lowest_priority_number_wins() {
        let events = vec![
            event("break", date(2025, 12, 20), date(2026, 1, 5), true, 5),
            event("christmas", date(2025, 12, 25), date(2025, 12, 25), true, 1),
        ];
        let blocker = primary_blocker(date(2025, 12, 25), &events).unwrap();
        assert_eq!(blocker.name(), "christmas");
    }

    #[test]
    fn equal_priority_falls_to_earliest_start() {
        let events = vec![
            event("late", date(2025, 12, 24), date(2025, 12, 26), true, 1),
            event("early", date(2025, 12, 20), date(2025, 12, 26), true, 1),
        ];
        let blocker = primary_blocker(date(2025, 12, 25), &events).unwrap();
        assert_eq!(blocker.name(), "early");
    }

    #[test]
    fn selection_is_independent_of_input_order() {
        let a = event("a", date(2025, 12, 25), date(2025, 12, 25), true, 1);
        let b = event("b", date(2025, 12, 25), date(2025, 12, 25), true, 1);

        let forward = vec![a.clone(), b.clone()];
        let reverse = vec![b, a];
        assert_eq!(
            primary_blocker(date(2025, 12, 25), &forward).map(CalendarEvent::id),
            primary_blocker(date(2025, 12, 25), &reverse).map(CalendarEvent::id),
        );
    }
}
