use std::fmt;

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

use crate::error::{Error, Result};

/// A (year, month) pair with its first and last day resolved up front.
///
/// Construction fails for months outside `1..=12` and for months so close to
/// the edge of chrono's date range that a full week of overflow days could not
/// be represented on either side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarMonth {
    year: i32,
    month: u32,
    first: NaiveDate,
    last: NaiveDate,
}

impl CalendarMonth {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        let invalid = || Error::InvalidMonth { year, month };

        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let next_first = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .ok_or_else(invalid)?;
        let last = next_first.pred_opt().ok_or_else(invalid)?;

        // Up to six leading and seven trailing overflow days.
        first.checked_sub_days(Days::new(6)).ok_or_else(invalid)?;
        last.checked_add_days(Days::new(7)).ok_or_else(invalid)?;

        Ok(Self {
            year,
            month,
            first,
            last,
        })
    }

    /// The month that contains `date`.
    pub fn containing(date: NaiveDate) -> Result<Self> {
        Self::new(date.year(), date.month())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn last_day(&self) -> NaiveDate {
        self.last
    }

    /// Local midnight on the first day of the month.
    pub fn beginning(&self) -> NaiveDateTime {
        self.first.and_time(NaiveTime::MIN)
    }

    /// Last representable instant of the month.
    pub fn end(&self) -> NaiveDateTime {
        let last_instant = NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999)
            .unwrap_or(NaiveTime::MIN);
        self.last.and_time(last_instant)
    }

    pub fn days_in_month(&self) -> u32 {
        self.last.day()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn succ(&self) -> Option<Self> {
        let (year, month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        Self::new(year, month).ok()
    }

    pub fn pred(&self) -> Option<Self> {
        let (year, month) = if self.month == 1 {
            (self.year - 1, 12)
        } else {
            (self.year, self.month - 1)
        };
        Self::new(year, month).ok()
    }

    /// `date` moved into this month, keeping its day-of-month where possible
    /// and clamping to the last day otherwise (Jan 31 -> Feb 28).
    pub fn clamp_day(&self, date: NaiveDate) -> NaiveDate {
        let day = date.day().min(self.days_in_month());
        self.first.with_day(day).unwrap_or(self.first)
    }

    /// How many grid columns the first day is shifted right by.
    pub fn leading_days(&self, week_start: Weekday) -> u32 {
        days_after(self.first.weekday(), week_start)
    }

    /// First grid date: `week_start` on or before the first of the month.
    pub fn grid_start(&self, week_start: Weekday) -> NaiveDate {
        self.first
            .checked_sub_days(Days::new(self.leading_days(week_start) as u64))
            .unwrap_or(self.first)
    }

    /// Number of week buckets spanned from `beginning()` up to and including
    /// the first instant of the next month, under `week_start`.
    ///
    /// A month ending on the last column therefore gets one trailing row of
    /// next-month days; a month starting on the first column never gets a
    /// leading row.
    pub fn weeks_in_month(&self, week_start: Weekday) -> u32 {
        (self.leading_days(week_start) + self.days_in_month() + 1).div_ceil(7)
    }
}

impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", month_name(self.month), self.year)
    }
}

/// Days from `start` forward to `day`, in `0..7`.
pub fn days_after(day: Weekday, start: Weekday) -> u32 {
    (day.num_days_from_sunday() + 7 - start.num_days_from_sunday()) % 7
}

pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn rejects_out_of_range_months() {
        assert!(matches!(
            CalendarMonth::new(2023, 13),
            Err(Error::InvalidMonth { year: 2023, month: 13 })
        ));
        assert!(CalendarMonth::new(2023, 0).is_err());
    }

    #[test]
    fn resolves_month_bounds() {
        let feb = CalendarMonth::new(2024, 2).unwrap();
        assert_eq!(feb.first_day(), date(2024, 2, 1));
        assert_eq!(feb.last_day(), date(2024, 2, 29));
        assert_eq!(feb.days_in_month(), 29);
        assert_eq!(feb.beginning(), date(2024, 2, 1).and_hms_opt(0, 0, 0).unwrap());
        assert_eq!(feb.end().date(), date(2024, 2, 29));

        let dec = CalendarMonth::new(2023, 12).unwrap();
        assert_eq!(dec.last_day(), date(2023, 12, 31));
    }

    #[test]
    fn navigates_across_year_boundaries() {
        let dec = CalendarMonth::new(2023, 12).unwrap();
        let jan = dec.succ().unwrap();
        assert_eq!((jan.year(), jan.month()), (2024, 1));
        assert_eq!(jan.pred(), Some(dec));
    }

    #[test]
    fn clamps_day_when_moving_between_months() {
        let feb = CalendarMonth::new(2023, 2).unwrap();
        assert_eq!(feb.clamp_day(date(2023, 1, 31)), date(2023, 2, 28));
        assert_eq!(feb.clamp_day(date(2023, 1, 15)), date(2023, 2, 15));
    }

    #[test]
    fn counts_week_rows() {
        // September 2023 starts on a Friday.
        let sep = CalendarMonth::new(2023, 9).unwrap();
        assert_eq!(sep.leading_days(Weekday::Sun), 5);
        assert_eq!(sep.weeks_in_month(Weekday::Sun), 6);
        assert_eq!(sep.grid_start(Weekday::Sun), date(2023, 8, 27));
        assert_eq!(sep.weeks_in_month(Weekday::Mon), 5);
        assert_eq!(sep.grid_start(Weekday::Mon), date(2023, 8, 28));

        // October 2023 starts on a Sunday: no leading row.
        let oct = CalendarMonth::new(2023, 10).unwrap();
        assert_eq!(oct.weeks_in_month(Weekday::Sun), 5);
        assert_eq!(oct.grid_start(Weekday::Sun), oct.first_day());

        // February 2015 runs Sunday..Saturday; March 1 opens a fifth row.
        let feb = CalendarMonth::new(2015, 2).unwrap();
        assert_eq!(feb.leading_days(Weekday::Sun), 0);
        assert_eq!(feb.weeks_in_month(Weekday::Sun), 5);
        assert_eq!(feb.grid_start(Weekday::Sun), feb.first_day());
    }

    #[test]
    fn formats_as_month_and_year() {
        let sep = CalendarMonth::new(2023, 9).unwrap();
        assert_eq!(sep.to_string(), "September 2023");
    }
}
