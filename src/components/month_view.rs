use chrono::{Datelike, NaiveDate, Weekday};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::calendar::month::days_after;
use crate::calendar::{DayCell, DensityTier};
use crate::theme::Theme;

const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

pub struct MonthView;

impl MonthView {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;

        let block = Block::default()
            .title(format!(" {} ", app.month))
            .title_style(theme.header)
            .title_bottom(legend(theme))
            .borders(Borders::ALL)
            .border_style(theme.border);

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let header = Line::from(
            weekday_header(app.config.week_start)
                .iter()
                .map(|d| Span::styled(format!("{:^5}", d), theme.header))
                .collect::<Vec<_>>(),
        );

        let today = app.today();
        let weeks: Vec<Line> = app
            .weeks()
            .map(|week| {
                Line::from(
                    week.iter()
                        .flat_map(|cell| render_cell(cell, today, app))
                        .collect::<Vec<_>>(),
                )
            })
            .collect();

        // Layout: header + weeks
        let mut constraints = vec![Constraint::Length(1)];
        for _ in &weeks {
            constraints.push(Constraint::Length(1));
        }
        constraints.push(Constraint::Min(0));

        let rows = Layout::vertical(constraints).split(inner);

        frame.render_widget(Paragraph::new(header), rows[0]);
        for (i, week) in weeks.into_iter().enumerate() {
            frame.render_widget(Paragraph::new(week), rows[i + 1]);
        }
    }
}

fn render_cell(cell: &DayCell, today: NaiveDate, app: &App) -> [Span<'static>; 3] {
    let theme = &app.theme;
    let is_today = cell.date == today;
    let is_selected = cell.date == app.selected_date;

    let day_style = if is_today && is_selected {
        theme.today_selected()
    } else if is_selected {
        theme.selected
    } else if is_today {
        theme.today
    } else if !cell.in_reference_month {
        theme.dim
    } else {
        Style::default()
    };

    let density = cell.density(app.config.full_day_threshold);
    let mut bar_style = Style::default().fg(theme.density_color(density.tier));
    if !cell.in_reference_month {
        bar_style = bar_style.add_modifier(Modifier::DIM);
    }

    [
        Span::raw(" "),
        Span::styled(format!("{:>2}", cell.date.day()), day_style),
        Span::styled(format!("{} ", density_glyph(density.fill_fraction)), bar_style),
    ]
}

/// Column labels starting at `week_start`.
pub fn weekday_header(week_start: Weekday) -> [&'static str; 7] {
    let offset = days_after(week_start, Weekday::Sun) as usize;
    std::array::from_fn(|i| DAY_NAMES[(offset + i) % 7])
}

/// Bar glyph for a fill fraction; blank for an empty day.
pub fn density_glyph(fill_fraction: f64) -> char {
    if fill_fraction <= 0.0 {
        return ' ';
    }
    let idx = (fill_fraction * BARS.len() as f64).ceil() as usize;
    BARS[idx.clamp(1, BARS.len()) - 1]
}

fn legend(theme: &Theme) -> Line<'static> {
    let swatch = |tier: DensityTier| {
        Span::styled(
            format!(" █ {}", tier.label()),
            Style::default().fg(theme.density_color(tier)),
        )
    };
    Line::from(vec![
        swatch(DensityTier::Normal),
        swatch(DensityTier::OverlyFull),
        swatch(DensityTier::ExtremelyFull),
        Span::raw(" "),
    ])
}
