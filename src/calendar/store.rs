use std::sync::mpsc;

use block2::RcBlock;
use chrono::{DateTime, Days, Local, NaiveDate, NaiveTime, TimeZone};
use objc2::rc::Retained;
use objc2::runtime::Bool;
use objc2_event_kit::{EKAuthorizationStatus, EKEntityType, EKEvent, EKEventStore};
use objc2_foundation::{NSDate, NSError};
use ratatui::style::Color;

use super::event::CalendarEvent;
use super::source::{EventDataSource, EventsByDay};
use crate::error::{Error, Result};

/// Seconds between Unix epoch (1970-01-01) and NSDate reference date (2001-01-01)
const NSDATE_UNIX_OFFSET: f64 = 978307200.0;

/// Events from the macOS system calendar.
pub struct Store {
    store: Retained<EKEventStore>,
}

impl Store {
    pub fn new() -> Result<Self> {
        let store = unsafe { EKEventStore::new() };
        Ok(Self { store })
    }

    pub fn authorization_status() -> EKAuthorizationStatus {
        unsafe { EKEventStore::authorizationStatusForEntityType(EKEntityType::Event) }
    }

    pub fn request_access(&self) -> Result<bool> {
        match Self::authorization_status() {
            EKAuthorizationStatus::FullAccess => return Ok(true),
            EKAuthorizationStatus::Denied | EKAuthorizationStatus::Restricted => {
                return Ok(false);
            }
            _ => {}
        }

        let (tx, rx) = mpsc::channel();
        let block = RcBlock::new(move |granted: Bool, _error: *mut NSError| {
            let _ = tx.send(granted.as_bool());
        });

        unsafe {
            self.store
                .requestFullAccessToEventsWithCompletion(&*block as *const _ as *mut _);
        }

        rx.recv()
            .map_err(|_| Error::Source("no calendar access response".to_string()))
    }

    fn events_in_range(&self, start: DateTime<Local>, end: DateTime<Local>) -> Vec<CalendarEvent> {
        let ns_start = datetime_to_nsdate(&start);
        let ns_end = datetime_to_nsdate(&end);

        let predicate = unsafe {
            self.store
                .predicateForEventsWithStartDate_endDate_calendars(&ns_start, &ns_end, None)
        };

        let ek_events = unsafe { self.store.eventsMatchingPredicate(&predicate) };
        let mut events: Vec<CalendarEvent> = (0..ek_events.len())
            .map(|i| convert_event(&ek_events.objectAtIndex(i)))
            .collect();

        events.sort_by_key(|e| e.start);
        events
    }
}

impl EventDataSource for Store {
    fn events_between(&self, start: NaiveDate, end: NaiveDate) -> Result<EventsByDay> {
        let after_end = end
            .checked_add_days(Days::new(1))
            .ok_or_else(|| Error::Source(format!("date out of range: {end}")))?;
        let start_dt = local_midnight(start)?;
        let end_dt = local_midnight(after_end)?;

        let mut by_day = EventsByDay::new();
        for event in self.events_in_range(start_dt, end_dt) {
            for date in event.days().filter(|d| *d >= start && *d <= end) {
                by_day.entry(date).or_default().push(event.clone());
            }
        }

        tracing::debug!(%start, %end, days = by_day.len(), "fetched EventKit events");
        Ok(by_day)
    }
}

fn local_midnight(date: NaiveDate) -> Result<DateTime<Local>> {
    Local
        .from_local_datetime(&date.and_time(NaiveTime::MIN))
        .earliest()
        .ok_or_else(|| Error::Source(format!("no local midnight on {date}")))
}

fn convert_event(ev: &EKEvent) -> CalendarEvent {
    let id = unsafe {
        ev.eventIdentifier()
            .map(|s| s.to_string())
            .unwrap_or_default()
    };
    let title = unsafe { ev.title().to_string() };
    let start = unsafe { nsdate_to_datetime(&ev.startDate()) };
    let end = unsafe { nsdate_to_datetime(&ev.endDate()) };
    let is_all_day = unsafe { ev.isAllDay() };
    let location = unsafe { ev.location().map(|s| s.to_string()) };
    let notes = unsafe { ev.notes().map(|s| s.to_string()) };
    let (calendar_name, calendar_color) = unsafe {
        ev.calendar()
            .map(|cal| (cal.title().to_string(), calendar_color(&cal)))
            .unwrap_or(("Unknown".to_string(), Color::White))
    };

    CalendarEvent {
        id,
        title,
        start: start.naive_local(),
        end: end.naive_local(),
        is_all_day,
        calendar_name,
        calendar_color,
        location,
        notes,
    }
}

fn calendar_color(cal: &objc2_event_kit::EKCalendar) -> Color {
    unsafe {
        if let Some(cg_color) = cal.CGColor() {
            use objc2::msg_send;
            let num_components: usize = msg_send![&*cg_color, numberOfComponents];
            if num_components >= 3 {
                let components: *const f64 = msg_send![&*cg_color, components];
                let r = *components;
                let g = *components.add(1);
                let b = *components.add(2);
                return Color::Rgb((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8);
            }
        }
    }
    Color::White
}

fn datetime_to_nsdate(dt: &DateTime<Local>) -> Retained<NSDate> {
    let unix_ts = dt.timestamp() as f64;
    NSDate::dateWithTimeIntervalSinceReferenceDate(unix_ts - NSDATE_UNIX_OFFSET)
}

fn nsdate_to_datetime(date: &NSDate) -> DateTime<Local> {
    let nsdate_ts = date.timeIntervalSinceReferenceDate();
    let unix_ts = (nsdate_ts + NSDATE_UNIX_OFFSET) as i64;
    Local
        .timestamp_opt(unix_ts, 0)
        .single()
        .unwrap_or_else(Local::now)
}
