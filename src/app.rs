use chrono::{Days, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use color_eyre::eyre::{eyre, Result};

use crate::calendar::{
    build_grid, classify, grid_range, CalendarEvent, CalendarMonth, DayCell, DayCounts,
    DensityDescriptor, EventDataSource,
};
use crate::clock::Clock;
use crate::components::day_view;
use crate::config::SelectorConfig;
use crate::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Selected(NaiveDateTime),
    Cancelled,
}

pub struct App {
    pub running: bool,
    pub outcome: Option<Outcome>,
    pub config: SelectorConfig,
    pub theme: Theme,
    pub selected_date: NaiveDate,
    pub selected_time: NaiveTime,
    pub month: CalendarMonth,
    pub grid: Vec<DayCell>,
    pub day_events: Vec<CalendarEvent>,
    pub day_scroll: usize,
    pub show_help: bool,
    pub status_message: Option<String>,
    clock: Box<dyn Clock>,
    source: Box<dyn EventDataSource>,
}

impl App {
    /// Starts on `initial` if given, otherwise on the clock's today.
    pub fn new(
        config: SelectorConfig,
        theme: Theme,
        clock: Box<dyn Clock>,
        source: Box<dyn EventDataSource>,
        initial: Option<NaiveDateTime>,
    ) -> Result<Self> {
        let now = clock.now();
        let start = initial.unwrap_or(now);
        let month = CalendarMonth::containing(start.date())
            .map_err(|e| eyre!("cannot open picker on {}: {e}", start.date()))?;
        let selected_time = round_down(start.time(), config.minute_step);

        let mut app = Self {
            running: true,
            outcome: None,
            config,
            theme,
            selected_date: start.date(),
            selected_time,
            month,
            grid: Vec::new(),
            day_events: Vec::new(),
            day_scroll: 0,
            show_help: false,
            status_message: None,
            clock,
            source,
        };

        app.refresh_grid();
        app.refresh_day();
        Ok(app)
    }

    /// Rebuilds every cell for the current month and swaps the result in whole.
    pub fn refresh_grid(&mut self) {
        let week_start = self.config.week_start;
        let (start, end) = grid_range(self.month, week_start);

        let counts = match DayCounts::fetch(self.source.as_ref(), start, end) {
            Ok(counts) => counts,
            Err(err) => {
                tracing::warn!(error = %err, month = %self.month, "event counts unavailable");
                self.status_message = Some(format!("Events unavailable: {err}"));
                DayCounts::default()
            }
        };
        tracing::debug!(month = %self.month, events = counts.total(), "fetched event counts");

        self.grid = build_grid(self.month, week_start, &counts);
    }

    pub fn refresh_day(&mut self) {
        self.day_scroll = 0;
        self.day_events = match self.source.events_on(self.selected_date) {
            Ok(events) => events,
            Err(err) => {
                tracing::warn!(error = %err, date = %self.selected_date, "day events unavailable");
                Vec::new()
            }
        };
    }

    /// Read from the clock on every call so a picker left open past
    /// midnight moves its highlight.
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn weeks(&self) -> std::slice::Chunks<'_, DayCell> {
        self.grid.chunks(7)
    }

    pub fn selected_cell(&self) -> Option<&DayCell> {
        self.grid.iter().find(|c| c.date == self.selected_date)
    }

    pub fn selected_density(&self) -> DensityDescriptor {
        let count = self
            .selected_cell()
            .map(|c| c.event_count)
            .unwrap_or(self.day_events.len() as u32);
        classify(count, self.config.full_day_threshold)
    }

    pub fn selection(&self) -> NaiveDateTime {
        if self.config.date_only {
            self.selected_date.and_time(NaiveTime::MIN)
        } else {
            self.selected_date.and_time(self.selected_time)
        }
    }

    pub fn selection_display(&self) -> String {
        format_selection(self.selection(), self.config.date_only)
    }

    pub fn next_day(&mut self) {
        if let Some(date) = self.selected_date.succ_opt() {
            self.select(date);
        }
    }

    pub fn prev_day(&mut self) {
        if let Some(date) = self.selected_date.pred_opt() {
            self.select(date);
        }
    }

    pub fn next_week(&mut self) {
        if let Some(date) = self.selected_date.checked_add_days(Days::new(7)) {
            self.select(date);
        }
    }

    pub fn prev_week(&mut self) {
        if let Some(date) = self.selected_date.checked_sub_days(Days::new(7)) {
            self.select(date);
        }
    }

    pub fn next_month(&mut self) {
        if let Some(month) = self.month.succ() {
            self.select(month.clamp_day(self.selected_date));
        }
    }

    pub fn prev_month(&mut self) {
        if let Some(month) = self.month.pred() {
            self.select(month.clamp_day(self.selected_date));
        }
    }

    pub fn go_to_today(&mut self) {
        self.select(self.today());
    }

    pub fn later(&mut self) {
        self.shift_time(Duration::minutes(self.config.minute_step as i64));
    }

    pub fn earlier(&mut self) {
        self.shift_time(Duration::minutes(-(self.config.minute_step as i64)));
    }

    pub fn next_hour(&mut self) {
        self.shift_time(Duration::hours(1));
    }

    pub fn prev_hour(&mut self) {
        self.shift_time(Duration::hours(-1));
    }

    pub fn scroll_day_down(&mut self) {
        if self.day_scroll + 1 < day_view::row_count(&self.day_events) {
            self.day_scroll += 1;
        }
    }

    pub fn scroll_day_up(&mut self) {
        self.day_scroll = self.day_scroll.saturating_sub(1);
    }

    pub fn confirm(&mut self) {
        self.outcome = Some(Outcome::Selected(self.selection()));
        self.running = false;
    }

    pub fn cancel(&mut self) {
        self.outcome = Some(Outcome::Cancelled);
        self.running = false;
    }

    /// Time wraps around midnight without touching the date.
    fn shift_time(&mut self, delta: Duration) {
        if self.config.date_only {
            return;
        }
        let (time, _) = self.selected_time.overflowing_add_signed(delta);
        self.selected_time = time;
    }

    fn select(&mut self, date: NaiveDate) {
        let Ok(month) = CalendarMonth::containing(date) else {
            self.status_message = Some(format!("{date} is out of range"));
            return;
        };

        self.selected_date = date;
        if month != self.month {
            self.month = month;
            self.refresh_grid();
        }
        self.refresh_day();
    }
}

pub fn format_selection(value: NaiveDateTime, date_only: bool) -> String {
    if date_only {
        value.format("%Y-%m-%d").to_string()
    } else {
        value.format("%Y-%m-%d %H:%M").to_string()
    }
}

fn round_down(time: NaiveTime, step: u32) -> NaiveTime {
    let step = step.max(1);
    let minutes = (time.hour() * 60 + time.minute()) / step * step;
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0).unwrap_or(NaiveTime::MIN)
}
