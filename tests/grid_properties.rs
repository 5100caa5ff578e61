use busy_calendar::calendar::{
    build_grid, classify, CalendarMonth, DensityTier, FullDayThreshold, NoEvents,
};
use busy_calendar::Error;
use chrono::{Datelike, NaiveDate, Weekday};

const WEEK_STARTS: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

fn every_month() -> impl Iterator<Item = CalendarMonth> {
    (1999..=2026).flat_map(|year| {
        (1..=12).map(move |month| CalendarMonth::new(year, month).expect("valid month"))
    })
}

#[test]
fn grid_length_is_seven_times_week_rows() {
    for month in every_month() {
        for week_start in WEEK_STARTS {
            let cells = build_grid(month, week_start, &NoEvents);
            let weeks = month.weeks_in_month(week_start) as usize;

            assert_eq!(cells.len(), weeks * 7, "{month} starting {week_start}");
            assert!((5..=6).contains(&weeks), "{month} starting {week_start}");
        }
    }
}

#[test]
fn cells_are_contiguous_from_configured_weekday() {
    for month in every_month() {
        for week_start in WEEK_STARTS {
            let cells = build_grid(month, week_start, &NoEvents);

            assert_eq!(cells[0].date.weekday(), week_start);
            assert!(cells[0].date <= month.first_day());
            assert!(cells[cells.len() - 1].date >= month.last_day());
            for pair in cells.windows(2) {
                assert_eq!(pair[0].date.succ_opt(), Some(pair[1].date));
            }
        }
    }
}

#[test]
fn grid_has_no_spare_weeks() {
    for month in every_month() {
        for week_start in WEEK_STARTS {
            let cells = build_grid(month, week_start, &NoEvents);
            let first_row = &cells[..7];
            let last_row = &cells[cells.len() - 7..];
            let next_first = month.last_day().succ_opt().expect("next month");

            assert!(first_row.iter().any(|c| c.in_reference_month));
            // The grid runs until the row holding the first day of next month.
            assert!(last_row.iter().any(|c| c.date == next_first));
        }
    }
}

#[test]
fn membership_matches_year_and_month() {
    for month in every_month() {
        let cells = build_grid(month, Weekday::Sun, &NoEvents);
        let in_month = cells.iter().filter(|c| c.in_reference_month).count();
        assert_eq!(in_month as u32, month.days_in_month());

        for cell in &cells {
            let same = cell.date.year() == month.year() && cell.date.month() == month.month();
            assert_eq!(cell.in_reference_month, same);
        }
    }
}

#[test]
fn september_2023_scenario() {
    let month = CalendarMonth::containing(NaiveDate::from_ymd_opt(2023, 9, 19).unwrap()).unwrap();
    let cells = build_grid(month, Weekday::Sun, &NoEvents);

    assert_eq!(cells.len(), 42);
    assert_eq!(cells[0].date, NaiveDate::from_ymd_opt(2023, 8, 27).unwrap());
    assert_eq!(cells[0].date.weekday(), Weekday::Sun);
    assert_eq!(cells[41].date, NaiveDate::from_ymd_opt(2023, 10, 7).unwrap());
    assert_eq!(cells[41].date.weekday(), Weekday::Sat);

    let sep7 = NaiveDate::from_ymd_opt(2023, 9, 7).unwrap();
    assert!(cells.iter().any(|c| c.date == sep7 && c.in_reference_month));
}

#[test]
fn invalid_month_is_an_input_error() {
    assert!(matches!(
        CalendarMonth::new(2023, 13),
        Err(Error::InvalidMonth { .. })
    ));
}

#[test]
fn classifier_properties_hold_for_many_thresholds() {
    for n in 1..=40u32 {
        let threshold = FullDayThreshold::new(n).unwrap();

        let empty = classify(0, threshold);
        assert_eq!(empty.fill_fraction, 0.0);
        assert_eq!(empty.tier, DensityTier::Normal);

        assert_eq!(classify(n, threshold).tier, DensityTier::Normal);

        for count in 0..=(n * 4) {
            let d = classify(count, threshold);
            assert!((0.0..=1.0).contains(&d.fill_fraction));
            if f64::from(count) > 1.5 * f64::from(n) {
                assert_eq!(d.tier, DensityTier::ExtremelyFull);
            }
            assert_eq!(d, classify(count, threshold));
        }
    }
}

#[test]
fn classifier_scenarios() {
    let ten = FullDayThreshold::default();

    let eight = classify(8, ten);
    assert_eq!(eight.tier, DensityTier::Normal);
    assert!(eight.fill_fraction > 0.1 && eight.fill_fraction < 1.0);

    let sixteen = classify(16, ten);
    assert_eq!(sixteen.tier, DensityTier::ExtremelyFull);
    assert_eq!(sixteen.fill_fraction, 1.0);

    assert_eq!(classify(11, ten).tier, DensityTier::OverlyFull);
}
