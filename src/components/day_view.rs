use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::App;
use crate::calendar::{CalendarEvent, DensityDescriptor};
use crate::theme::Theme;

pub struct DayView;

impl DayView {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let date = app.selected_date;
        let w = area.width as usize;

        let title = if w >= 30 {
            format!(" {} ", date.format("%A, %B %d, %Y"))
        } else if w >= 18 {
            format!(" {} ", date.format("%b %d, %Y"))
        } else {
            format!(" {} ", date.format("%m/%d"))
        };

        let density = app.selected_density();
        let block = Block::default()
            .title(title)
            .title_style(theme.header)
            .title_bottom(summary_line(app.day_events.len(), &density, theme))
            .borders(Borders::ALL)
            .border_style(theme.border);

        if app.day_events.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            let msg = Paragraph::new("No events").style(theme.dim);
            frame.render_widget(msg, inner);
            return;
        }

        let inner_w = area.width.saturating_sub(2) as usize;
        let items = build_items(&app.day_events, inner_w, theme);

        let visible_items: Vec<ListItem> = items.into_iter().skip(app.day_scroll).collect();

        let list = List::new(visible_items).block(block);
        frame.render_widget(list, area);
    }
}

/// Rows the day list occupies: an "All Day" header and a blank separator
/// around all-day events, then the timed ones.
pub fn row_count(events: &[CalendarEvent]) -> usize {
    let all_day = events.iter().filter(|e| e.is_all_day).count();
    let timed = events.len() - all_day;
    let header = usize::from(all_day > 0);
    let separator = usize::from(all_day > 0 && timed > 0);
    header + all_day + separator + timed
}

fn build_items(events: &[CalendarEvent], inner_w: usize, theme: &Theme) -> Vec<ListItem<'static>> {
    let all_day: Vec<&CalendarEvent> = events.iter().filter(|e| e.is_all_day).collect();
    let timed: Vec<&CalendarEvent> = events.iter().filter(|e| !e.is_all_day).collect();

    let mut items: Vec<ListItem> = Vec::new();

    if !all_day.is_empty() {
        items.push(ListItem::new(Line::from(Span::styled(
            "All Day",
            Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        ))));
        for ev in &all_day {
            items.push(format_event(ev, inner_w, theme));
        }
        if !timed.is_empty() {
            items.push(ListItem::new(Line::from("")));
        }
    }

    for ev in &timed {
        items.push(format_event(ev, inner_w, theme));
    }
    items
}

fn summary_line(count: usize, density: &DensityDescriptor, theme: &Theme) -> Line<'static> {
    if count == 0 {
        return Line::default();
    }
    Line::from(vec![
        Span::styled(
            format!(" {} event{} · ", count, if count == 1 { "" } else { "s" }),
            theme.dim,
        ),
        Span::styled(
            format!("{:.0}% {} ", density.percent * 100.0, density.tier.label()),
            Style::default().fg(theme.density_color(density.tier)),
        ),
    ])
}

fn format_event(ev: &CalendarEvent, max_width: usize, theme: &Theme) -> ListItem<'static> {
    let cal_indicator = Span::styled("  ", Style::default().bg(ev.calendar_color));

    let time_str = if ev.is_all_day {
        String::new()
    } else {
        format!(" {} ", ev.duration_display())
    };
    let time_span = Span::styled(time_str.clone(), Style::default().add_modifier(Modifier::DIM));

    let title_span = Span::styled(ev.title.clone(), Style::default());

    let mut spans = vec![cal_indicator, time_span, title_span];

    // Only show location if there's room
    let used = 2 + time_str.len() + ev.title.len();
    if let Some(ref loc) = ev.location {
        if !loc.is_empty() && used + 4 + loc.len() <= max_width {
            spans.push(Span::styled(format!(" @ {}", loc), theme.dim));
        }
    }

    ListItem::new(Line::from(spans))
}
