use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

pub struct StatusBar;

impl StatusBar {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let w = area.width as usize;
        let style = app.theme.status;

        let left = format!(" {} ", app.selection_display());

        // Show status message if present, otherwise show width-aware hints
        let right = if let Some(ref msg) = app.status_message {
            format!(" {} ", msg)
        } else if w >= 80 {
            " hjkl:Nav [/]:Mon t:Today Enter:Pick Esc:Cancel ?:Help ".to_string()
        } else if w >= 50 {
            " hjkl:Nav Enter:Pick ?:Help ".to_string()
        } else {
            " ?:Help ".to_string()
        };

        let padding = " ".repeat(w.saturating_sub(left.chars().count() + right.chars().count()));

        let line = Line::from(vec![
            Span::styled(left, style),
            Span::styled(padding, style),
            Span::styled(right, style),
        ]);

        frame.render_widget(Paragraph::new(line).style(style), area);
    }
}
