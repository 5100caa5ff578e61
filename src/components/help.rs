use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::theme::Theme;

const BINDINGS: [(&str, &[(&str, &str)]); 3] = [
    (
        "Navigation",
        &[
            ("h/l \u{2190}/\u{2192}", "Previous/next day"),
            ("k/j \u{2191}/\u{2193}", "Previous/next week"),
            ("[/]", "Previous/next month"),
            ("t", "Jump to today"),
        ],
    ),
    (
        "Time",
        &[("+/-", "Later/earlier by one step"), ("H/L", "Earlier/later by an hour")],
    ),
    (
        "Picker",
        &[
            ("Enter", "Pick the selection"),
            ("PgUp/PgDn", "Scroll day events"),
            ("q/Esc", "Cancel"),
        ],
    ),
];

pub fn render_help(frame: &mut Frame, area: Rect, theme: &Theme, date_only: bool) {
    let popup_w = area.width.clamp(30, 52).min(area.width);
    let popup_h = area.height.clamp(12, 20).min(area.height);
    let x = area.x + (area.width.saturating_sub(popup_w)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_h)) / 2;
    let popup_area = Rect::new(x, y, popup_w, popup_h);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Keybindings ")
        .title_style(theme.header)
        .borders(Borders::ALL)
        .border_style(theme.border);

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key_style = theme.header.add_modifier(Modifier::BOLD);
    let section_style = Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED);

    let mut lines = Vec::new();
    for (section, keys) in BINDINGS {
        if date_only && section == "Time" {
            continue;
        }
        lines.push(Line::from(Span::styled(section, section_style)));
        for (key, desc) in keys {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<12}", key), key_style),
                Span::raw(*desc),
            ]));
        }
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled("Press ? or Esc to close", theme.dim)));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
