use chrono::{NaiveDate, NaiveDateTime};
use ratatui::style::Color;

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub is_all_day: bool,
    pub calendar_name: String,
    pub calendar_color: Color,
    pub location: Option<String>,
    pub notes: Option<String>,
}

impl CalendarEvent {
    pub fn new(title: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        let title = title.into();
        Self {
            id: format!("{}@{}", title, start.format("%Y%m%dT%H%M")),
            title,
            start,
            end: end.max(start),
            is_all_day: false,
            calendar_name: "Default".to_string(),
            calendar_color: Color::Cyan,
            location: None,
            notes: None,
        }
    }

    pub fn duration_display(&self) -> String {
        if self.is_all_day {
            "All day".to_string()
        } else {
            let start = self.start.format("%H:%M");
            let end = self.end.format("%H:%M");
            format!("{} - {}", start, end)
        }
    }

    /// Calendar days this event touches. An event ending exactly at midnight
    /// does not touch the following day.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let first = self.start.date();
        let mut last = self.end.date();
        if last > first && self.end.time() == chrono::NaiveTime::MIN {
            last = last.pred_opt().unwrap_or(first);
        }
        first.iter_days().take_while(move |d| *d <= last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 9, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn single_day_event_touches_one_day() {
        let ev = CalendarEvent::new("Standup", at(7, 9), at(7, 10));
        assert_eq!(ev.days().count(), 1);
        assert_eq!(ev.duration_display(), "09:00 - 10:00");
    }

    #[test]
    fn multi_day_event_ending_at_midnight() {
        let ev = CalendarEvent::new("Offsite", at(7, 9), at(9, 0));
        let days: Vec<_> = ev.days().collect();
        assert_eq!(days, vec![at(7, 0).date(), at(8, 0).date()]);
    }

    #[test]
    fn end_before_start_is_clamped() {
        let ev = CalendarEvent::new("Backwards", at(7, 9), at(6, 9));
        assert_eq!(ev.end, ev.start);
        assert_eq!(ev.days().count(), 1);
    }
}
