use crate::ui_state::UiState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Stylize},
    text::Line,
    widgets::{Block, Borders, Padding, Paragraph, StatefulWidget, Widget},
};

pub struct NoteView;

impl StatefulWidget for NoteView {
    type State = UiState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let Some(note) = state.current_note() else {
            Line::from("No notes open").fg(Color::DarkGray).centered().render(area, buf);
            return;
        };

        let cursor = state.cursor();
        let body_start = note.body_start();

        let block = Block::new()
            .borders(Borders::TOP)
            .border_style(Color::DarkGray)
            .title(format!(" {} ", note.title()))
            .padding(Padding::horizontal(1));
        let inner_height = block.inner(area).height as usize;

        // Keep the cursor on screen
        let scroll = cursor.saturating_sub(inner_height.saturating_sub(1));

        let lines = note
            .lines
            .iter()
            .enumerate()
            .map(|(idx, text)| {
                let line = Line::from(text.as_str());
                match idx {
                    i if i == cursor => line.fg(Color::Black).bg(Color::Gray),
                    i if i < body_start => line.fg(Color::DarkGray),
                    _ => line,
                }
            })
            .collect::<Vec<_>>();

        Paragraph::new(lines)
            .block(block)
            .scroll((scroll as u16, 0))
            .render(area, buf);
    }
}
