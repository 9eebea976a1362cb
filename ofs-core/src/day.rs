use chrono::{DateTime, Duration, Local, LocalResult, NaiveDate, NaiveTime, TimeZone};

/// Half-open `[start, end)` range of epoch millis covering one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub start_ms: i64,
    pub end_ms: i64,
}

impl DayWindow {
    /// The server's current local day.
    pub fn today() -> Self {
        Self::containing(&Local::now())
    }

    /// The calendar day `now` falls on, in `now`'s own time zone.
    pub fn containing<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        let tz = now.timezone();
        let date = now.date_naive();

        let start_ms = midnight(&tz, date);
        let end_ms = date
            .succ_opt()
            .map_or(i64::MAX, |tomorrow| midnight(&tz, tomorrow));

        Self { start_ms, end_ms }
    }

    pub fn contains(&self, timestamp_ms: i64) -> bool {
        timestamp_ms >= self.start_ms && timestamp_ms < self.end_ms
    }
}

fn midnight<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> i64 {
    let naive = date.and_time(NaiveTime::MIN);
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(t) => t.timestamp_millis(),
        LocalResult::Ambiguous(earliest, _) => earliest.timestamp_millis(),
        // Midnight skipped by a DST jump: the day starts at the first local
        // minute that exists.
        LocalResult::None => (1..=24 * 60)
            .find_map(|minutes| {
                tz.from_local_datetime(&(naive + Duration::minutes(minutes)))
                    .earliest()
            })
            .map_or_else(
                || tz.from_utc_datetime(&naive).timestamp_millis(),
                |first| first.timestamp_millis(),
            ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveDateTime, Utc};

    /// 2024-09-08T04:00:00Z, when clocks jump from -04:00 to -03:00 and
    /// local midnight of the 8th never happens.
    const SWITCH_SECS: i64 = 1_725_768_000;

    #[derive(Debug, Clone, Copy)]
    struct MidnightSpringForward;

    impl MidnightSpringForward {
        fn before() -> FixedOffset {
            FixedOffset::west_opt(4 * 3600).unwrap()
        }

        fn after() -> FixedOffset {
            FixedOffset::west_opt(3 * 3600).unwrap()
        }
    }

    impl TimeZone for MidnightSpringForward {
        type Offset = FixedOffset;

        fn from_offset(_: &FixedOffset) -> Self {
            MidnightSpringForward
        }

        fn offset_from_local_date(&self, local: &NaiveDate) -> LocalResult<FixedOffset> {
            self.offset_from_local_datetime(&local.and_time(NaiveTime::MIN))
        }

        fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
            let local_secs = local.and_utc().timestamp();
            let valid_before = local_secs + 4 * 3600 < SWITCH_SECS;
            let valid_after = local_secs + 3 * 3600 >= SWITCH_SECS;
            match (valid_before, valid_after) {
                (true, true) => LocalResult::Ambiguous(Self::before(), Self::after()),
                (true, false) => LocalResult::Single(Self::before()),
                (false, true) => LocalResult::Single(Self::after()),
                (false, false) => LocalResult::None,
            }
        }

        fn offset_from_utc_date(&self, utc: &NaiveDate) -> FixedOffset {
            self.offset_from_utc_datetime(&utc.and_time(NaiveTime::MIN))
        }

        fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
            if utc.and_utc().timestamp() < SWITCH_SECS {
                Self::before()
            } else {
                Self::after()
            }
        }
    }

    #[test]
    fn test_utc_day_bounds() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 15, 30, 0).unwrap();
        let window = DayWindow::containing(&now);

        let start = Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap();
        assert_eq!(window.start_ms, start.timestamp_millis());
        assert_eq!(window.end_ms - window.start_ms, 24 * 60 * 60 * 1000);
    }

    #[test]
    fn test_contains_is_half_open() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 15, 30, 0).unwrap();
        let window = DayWindow::containing(&now);

        assert!(window.contains(window.start_ms));
        assert!(window.contains(now.timestamp_millis()));
        assert!(window.contains(window.end_ms - 1));
        assert!(!window.contains(window.end_ms));
        assert!(!window.contains(window.start_ms - 1));
    }

    #[test]
    fn test_offset_zone_uses_local_midnight() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        // 23:30 local on the 10th is 21:30 UTC on the 10th
        let now = tz.with_ymd_and_hms(2024, 3, 10, 23, 30, 0).unwrap();
        let window = DayWindow::containing(&now);

        let utc_start = Utc.with_ymd_and_hms(2024, 3, 9, 22, 0, 0).unwrap();
        assert_eq!(window.start_ms, utc_start.timestamp_millis());
    }

    #[test]
    fn test_skipped_midnight_starts_day_at_first_valid_instant() {
        let now = MidnightSpringForward
            .with_ymd_and_hms(2024, 9, 8, 12, 0, 0)
            .unwrap();
        let window = DayWindow::containing(&now);

        // 01:00 local, right after the jump
        assert_eq!(window.start_ms, SWITCH_SECS * 1000);
        assert_eq!(window.end_ms - window.start_ms, 23 * 60 * 60 * 1000);

        let previous_evening = MidnightSpringForward
            .with_ymd_and_hms(2024, 9, 7, 21, 0, 0)
            .unwrap();
        assert!(!window.contains(previous_evening.timestamp_millis()));
        assert!(window.contains(now.timestamp_millis()));
    }
}
