use crate::{
    tui::widgets::{PAUSE_ICON, PLAY_ICON, SEEK_BACKWARD_ICON, SEEK_FORWARD_ICON},
    ui_state::IndicatorState,
};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Stylize},
    text::Line,
    widgets::Widget,
};

pub struct Overlay<'a> {
    pub state: &'a IndicatorState,
    pub seek_seconds: u32,
}

impl Widget for Overlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [_, row, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(area);

        let [left, center, right] = Layout::horizontal([
            Constraint::Percentage(25),
            Constraint::Percentage(50),
            Constraint::Percentage(25),
        ])
        .areas(row);

        let s = self.state;

        if s.seek_backward_visible {
            Line::from(format!("{SEEK_BACKWARD_ICON} {}s", self.seek_seconds))
                .fg(Color::White)
                .bold()
                .centered()
                .render(left, buf);
        }
        if s.seek_forward_visible {
            Line::from(format!("{}s {SEEK_FORWARD_ICON}", self.seek_seconds))
                .fg(Color::White)
                .bold()
                .centered()
                .render(right, buf);
        }

        let glyph = match (s.play_visible, s.pause_visible, s.speed_visible) {
            (true, _, _) => Some(PLAY_ICON.to_string()),
            (_, true, _) => Some(PAUSE_ICON.to_string()),
            (_, _, true) => Some(format!("{}x", s.current_speed)),
            _ => None,
        };
        if let Some(glyph) = glyph {
            Line::from(glyph).fg(Color::White).bold().centered().render(center, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn draws_only_visible_glyphs() {
        let area = Rect::new(0, 0, 40, 3);
        let mut buf = Buffer::empty(area);
        let state = IndicatorState {
            seek_forward_visible: true,
            speed_visible: true,
            current_speed: 1.5,
            ..Default::default()
        };

        Overlay {
            state: &state,
            seek_seconds: 10,
        }
        .render(area, &mut buf);

        let middle = row_text(&buf, 1);
        assert!(middle.contains("10s »"));
        assert!(middle.contains("1.5x"));
        assert!(!middle.contains('«'));
        assert!(!middle.contains(PLAY_ICON));
    }
}
