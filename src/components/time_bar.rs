use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;

/// Selected date and time, shown under the grid unless picking dates only.
pub struct TimeBar;

impl TimeBar {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border);

        let mut spans = vec![
            Span::styled(" Date ", theme.dim),
            Span::styled(app.selected_date.format("%a %b %d, %Y").to_string(), theme.header),
        ];
        if !app.config.date_only {
            spans.push(Span::styled("   Time ", theme.dim));
            spans.push(Span::styled(
                app.selected_time.format("%H:%M").to_string(),
                theme.selected,
            ));
            if area.width >= 50 {
                spans.push(Span::styled(
                    format!("  +/-:{}m H/L:1h", app.config.minute_step),
                    theme.dim,
                ));
            }
        }

        frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
    }
}
