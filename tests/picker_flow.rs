use busy_calendar::app::{format_selection, App, Outcome};
use busy_calendar::calendar::{CalendarEvent, DensityTier, MemorySource};
use busy_calendar::clock::FixedClock;
use busy_calendar::config::{parse_instant, ConfigFile};
use busy_calendar::theme::Theme;
use chrono::{Duration, NaiveDate, Weekday};

fn meetings(date: NaiveDate, count: i64) -> Vec<CalendarEvent> {
    let day_start = date.and_hms_opt(8, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            let start = day_start + Duration::minutes(30 * i);
            CalendarEvent::new(format!("Meeting {i}"), start, start + Duration::minutes(25))
        })
        .collect()
}

#[test]
fn configured_picker_shades_days_and_returns_selection() {
    let file = ConfigFile::parse(
        r#"
        week_start = "mon"
        full_day_threshold = 4
        minute_step = 15
        simulated_now = "2023-09-07T10:10"
        "#,
    )
    .expect("parse config");
    let config = file.to_builder().unwrap().build().expect("valid config");
    assert_eq!(config.week_start, Weekday::Mon);

    let sep = |d| NaiveDate::from_ymd_opt(2023, 9, d).unwrap();
    let mut events = meetings(sep(7), 3);
    events.extend(meetings(sep(8), 5));
    events.extend(meetings(sep(11), 7));

    let now = config.simulated_now.expect("simulated now");
    let mut app = App::new(
        config,
        Theme::from_config(&file.theme),
        Box::new(FixedClock(now)),
        Box::new(MemorySource::new(events)),
        None,
    )
    .expect("app");

    assert_eq!(app.grid[0].date, NaiveDate::from_ymd_opt(2023, 8, 28).unwrap());
    assert_eq!(app.selected_density().tier, DensityTier::Normal);

    app.next_day();
    assert_eq!(app.selected_density().tier, DensityTier::OverlyFull);

    app.prev_day();
    app.next_week();
    assert_eq!(app.selected_date, sep(14));
    app.prev_day();
    app.prev_day();
    app.prev_day();
    assert_eq!(app.selected_date, sep(11));
    assert_eq!(app.day_events.len(), 7);
    assert_eq!(app.selected_density().tier, DensityTier::ExtremelyFull);

    app.later();
    app.confirm();

    let expected = parse_instant("2023-09-11 10:15").unwrap();
    assert_eq!(app.outcome, Some(Outcome::Selected(expected)));
    assert_eq!(format_selection(expected, false), "2023-09-11 10:15");
}
