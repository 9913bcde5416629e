use chrono::{NaiveDate, NaiveDateTime};

/// Half-open datetime range `[start, end)` used for all period filtering.
///
/// Report queries take a calendar month; the admin history listing takes an
/// explicit day range. Both collapse to the same range type so every query
/// filters timestamps the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportPeriod {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl ReportPeriod {
    /// Range covering one calendar month. `month` is 1-12; returns `None`
    /// for anything else.
    pub fn for_month(year: i32, month: u32) -> Option<Self> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)?;
        let end = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)?
        };

        Some(Self {
            start: start.and_hms_opt(0, 0, 0)?,
            end: end.and_hms_opt(0, 0, 0)?,
        })
    }

    /// Range covering whole days from `start` through `end` inclusive.
    pub fn for_days(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: start.and_time(chrono::NaiveTime::MIN),
            end: end.succ_opt().unwrap_or(end).and_time(chrono::NaiveTime::MIN),
        }
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn contains(&self, at: NaiveDateTime) -> bool {
        at >= self.start && at < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn month_range_covers_exactly_one_month() {
        let period = ReportPeriod::for_month(2025, 3).unwrap();

        assert_eq!(period.start(), dt("2025-03-01 00:00:00"));
        assert_eq!(period.end(), dt("2025-04-01 00:00:00"));

        assert!(period.contains(dt("2025-03-01 00:00:00")));
        assert!(period.contains(dt("2025-03-31 23:59:59")));
        assert!(!period.contains(dt("2025-04-01 00:00:00")));
        assert!(!period.contains(dt("2025-02-28 23:59:59")));
    }

    #[test]
    fn december_rolls_over_to_next_year() {
        let period = ReportPeriod::for_month(2024, 12).unwrap();

        assert_eq!(period.start(), dt("2024-12-01 00:00:00"));
        assert_eq!(period.end(), dt("2025-01-01 00:00:00"));
    }

    #[test]
    fn month_out_of_range_is_rejected() {
        assert!(ReportPeriod::for_month(2025, 0).is_none());
        assert!(ReportPeriod::for_month(2025, 13).is_none());
    }

    #[test]
    fn day_range_is_inclusive_of_the_end_day() {
        let start = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 3, 12).unwrap();
        let period = ReportPeriod::for_days(start, end);

        assert!(period.contains(dt("2025-03-10 00:00:00")));
        assert!(period.contains(dt("2025-03-12 23:59:59")));
        assert!(!period.contains(dt("2025-03-13 00:00:00")));
    }
}
