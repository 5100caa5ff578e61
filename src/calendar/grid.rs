use std::collections::{BTreeMap, HashMap};

use chrono::{NaiveDate, Weekday};

use super::density::{classify, DensityDescriptor, FullDayThreshold};
use super::month::CalendarMonth;

/// Anything that can answer "how many events fall on this day".
///
/// Days the lookup knows nothing about count as zero.
pub trait EventCountLookup {
    fn event_count(&self, date: NaiveDate) -> u32;
}

impl EventCountLookup for HashMap<NaiveDate, u32> {
    fn event_count(&self, date: NaiveDate) -> u32 {
        self.get(&date).copied().unwrap_or(0)
    }
}

impl EventCountLookup for BTreeMap<NaiveDate, u32> {
    fn event_count(&self, date: NaiveDate) -> u32 {
        self.get(&date).copied().unwrap_or(0)
    }
}

impl<F> EventCountLookup for F
where
    F: Fn(NaiveDate) -> u32,
{
    fn event_count(&self, date: NaiveDate) -> u32 {
        self(date)
    }
}

/// Lookup with no events at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEvents;

impl EventCountLookup for NoEvents {
    fn event_count(&self, _date: NaiveDate) -> u32 {
        0
    }
}

/// One square of the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub in_reference_month: bool,
    pub event_count: u32,
}

impl DayCell {
    pub fn density(&self, threshold: FullDayThreshold) -> DensityDescriptor {
        classify(self.event_count, threshold)
    }
}

/// Builds the `7 × weeks_in_month` cells needed to draw `month`, starting on
/// `week_start` on or before the first of the month.
#[tracing::instrument(level = "debug", skip_all, fields(month = %month, ?week_start))]
pub fn build_grid(
    month: CalendarMonth,
    week_start: Weekday,
    lookup: &impl EventCountLookup,
) -> Vec<DayCell> {
    let total = (month.weeks_in_month(week_start) * 7) as usize;
    let start = month.grid_start(week_start);

    // CalendarMonth guarantees the overflow range is representable.
    let cells: Vec<DayCell> = start
        .iter_days()
        .take(total)
        .map(|date| DayCell {
            date,
            in_reference_month: month.contains(date),
            event_count: lookup.event_count(date),
        })
        .collect();

    tracing::debug!(
        cells = cells.len(),
        start = %start,
        "built month grid"
    );
    cells
}

/// Inclusive date range covered by the grid for `month`.
pub fn grid_range(month: CalendarMonth, week_start: Weekday) -> (NaiveDate, NaiveDate) {
    let start = month.grid_start(week_start);
    let days = (month.weeks_in_month(week_start) * 7 - 1) as u64;
    let end = start
        .checked_add_days(chrono::Days::new(days))
        .unwrap_or(month.last_day());
    (start, end)
}

#[cfg(test)]
mod tests {
    use chrono::Datelike;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn september_2023_sunday_start() {
        let month = CalendarMonth::new(2023, 9).unwrap();
        let cells = build_grid(month, Weekday::Sun, &NoEvents);

        assert_eq!(cells.len(), 42);
        assert_eq!(cells[0].date, date(2023, 8, 27));
        assert_eq!(cells[41].date, date(2023, 10, 7));
        assert!(!cells[0].in_reference_month);

        let sep7 = cells.iter().find(|c| c.date == date(2023, 9, 7)).unwrap();
        assert!(sep7.in_reference_month);
    }

    #[test]
    fn no_leading_week_when_month_starts_on_week_start() {
        // October 2023 starts on a Sunday.
        let month = CalendarMonth::new(2023, 10).unwrap();
        let cells = build_grid(month, Weekday::Sun, &NoEvents);

        assert_eq!(cells[0].date, date(2023, 10, 1));
        assert_eq!(cells.len(), 35);
        assert!(cells[0].in_reference_month);
    }

    #[test]
    fn month_ending_on_last_column_gets_trailing_row() {
        // February 2015 fills Sunday..Saturday exactly.
        let month = CalendarMonth::new(2015, 2).unwrap();
        let cells = build_grid(month, Weekday::Sun, &NoEvents);

        assert_eq!(cells.len(), 35);
        assert_eq!(cells[0].date, date(2015, 2, 1));
        assert_eq!(cells[28].date, date(2015, 3, 1));
        assert_eq!(cells[34].date, date(2015, 3, 7));
        assert!(cells[28..].iter().all(|c| !c.in_reference_month));
    }

    #[test]
    fn cells_are_contiguous_and_start_on_week_start() {
        let month = CalendarMonth::new(2024, 3).unwrap();
        for week_start in [Weekday::Sun, Weekday::Mon, Weekday::Sat] {
            let cells = build_grid(month, week_start, &NoEvents);
            assert_eq!(cells.len() % 7, 0);
            assert_eq!(cells[0].date.weekday(), week_start);
            for pair in cells.windows(2) {
                assert_eq!(pair[0].date.succ_opt(), Some(pair[1].date));
            }
        }
    }

    #[test]
    fn looks_up_counts_and_defaults_missing_days_to_zero() {
        let month = CalendarMonth::new(2023, 9).unwrap();
        let counts: HashMap<NaiveDate, u32> =
            HashMap::from([(date(2023, 9, 7), 4), (date(2023, 8, 30), 2)]);
        let cells = build_grid(month, Weekday::Sun, &counts);

        let count_on = |d: NaiveDate| cells.iter().find(|c| c.date == d).unwrap().event_count;
        assert_eq!(count_on(date(2023, 9, 7)), 4);
        assert_eq!(count_on(date(2023, 8, 30)), 2);
        assert_eq!(count_on(date(2023, 9, 8)), 0);
    }

    #[test]
    fn accepts_closures_as_lookups() {
        let month = CalendarMonth::new(2023, 9).unwrap();
        let cells = build_grid(month, Weekday::Sun, &|d: NaiveDate| d.day());
        assert_eq!(cells[0].event_count, 27);
    }

    #[test]
    fn grid_range_matches_built_cells() {
        let month = CalendarMonth::new(2023, 9).unwrap();
        let cells = build_grid(month, Weekday::Mon, &NoEvents);
        let (start, end) = grid_range(month, Weekday::Mon);
        assert_eq!(start, cells[0].date);
        assert_eq!(end, cells[cells.len() - 1].date);
    }
}
