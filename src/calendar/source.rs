use std::collections::BTreeMap;

use chrono::{Datelike, Days, Duration, NaiveDate, NaiveTime};
use ratatui::style::Color;

use super::event::CalendarEvent;
use super::grid::EventCountLookup;
use crate::error::Result;

/// Events bucketed by the calendar day they fall on.
pub type EventsByDay = BTreeMap<NaiveDate, Vec<CalendarEvent>>;

/// Where the picker gets its events from.
pub trait EventDataSource {
    /// Events for every day in `start..=end`. Days without events may be
    /// omitted.
    fn events_between(&self, start: NaiveDate, end: NaiveDate) -> Result<EventsByDay>;

    fn events_on(&self, date: NaiveDate) -> Result<Vec<CalendarEvent>> {
        Ok(self
            .events_between(date, date)?
            .remove(&date)
            .unwrap_or_default())
    }
}

/// Per-day event counts for a fixed date range.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayCounts {
    counts: BTreeMap<NaiveDate, u32>,
}

impl DayCounts {
    /// Queries `source` once for the whole range and counts events per day.
    /// Entries the source returns outside the range are dropped.
    pub fn fetch(
        source: &dyn EventDataSource,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Self> {
        let events = source.events_between(start, end)?;
        Ok(Self::from_events(&events, start, end))
    }

    pub fn from_events(events: &EventsByDay, start: NaiveDate, end: NaiveDate) -> Self {
        let mut counts = BTreeMap::new();
        let mut dropped = 0usize;

        for (date, day_events) in events {
            if *date < start || *date > end {
                dropped += 1;
                continue;
            }
            if !day_events.is_empty() {
                counts.insert(*date, day_events.len() as u32);
            }
        }

        if dropped > 0 {
            tracing::warn!(dropped, %start, %end, "ignoring days outside requested range");
        }

        Self { counts }
    }

    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }
}

impl EventCountLookup for DayCounts {
    fn event_count(&self, date: NaiveDate) -> u32 {
        self.counts.get(&date).copied().unwrap_or(0)
    }
}

/// Events held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    events: Vec<CalendarEvent>,
}

impl MemorySource {
    pub fn new(events: Vec<CalendarEvent>) -> Self {
        let mut events = events;
        events.sort_by_key(|e| e.start);
        Self { events }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// A few months of made-up but stable meetings around `anchor`, busy
    /// enough to show every density tier.
    pub fn sample(anchor: NaiveDate) -> Self {
        const PER_DAY: [u32; 12] = [0, 0, 1, 2, 3, 5, 8, 10, 11, 13, 16, 20];
        const TITLES: [&str; 6] = [
            "Standup",
            "Design review",
            "1:1",
            "Planning",
            "Customer call",
            "Focus time",
        ];
        const CALENDARS: [(&str, Color); 3] = [
            ("Work", Color::Cyan),
            ("Team", Color::Magenta),
            ("Personal", Color::Green),
        ];

        let first = anchor.checked_sub_days(Days::new(92)).unwrap_or(anchor);
        let mut events = Vec::new();

        for date in first.iter_days().take(185) {
            let seed = date.ordinal() * 37 + date.year().unsigned_abs() * 11 + date.day();
            let count = PER_DAY[(seed % PER_DAY.len() as u32) as usize];
            let day_start = date.and_time(NaiveTime::MIN) + Duration::hours(8);

            for i in 0..count {
                let start = day_start + Duration::minutes(30 * i as i64);
                let title = TITLES[((seed + i) as usize) % TITLES.len()];
                let (calendar_name, calendar_color) = CALENDARS[(i as usize) % CALENDARS.len()];

                let mut event = CalendarEvent::new(title, start, start + Duration::minutes(25));
                event.calendar_name = calendar_name.to_string();
                event.calendar_color = calendar_color;
                events.push(event);
            }
        }

        Self::new(events)
    }
}

impl EventDataSource for MemorySource {
    fn events_between(&self, start: NaiveDate, end: NaiveDate) -> Result<EventsByDay> {
        let mut by_day = EventsByDay::new();
        for event in &self.events {
            if event.start.date() > end {
                break;
            }
            for date in event.days().filter(|d| *d >= start && *d <= end) {
                by_day.entry(date).or_default().push(event.clone());
            }
        }
        Ok(by_day)
    }
}
