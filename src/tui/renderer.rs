use super::{AppLayout, NoteView, PlayerPane, StatusLine};
use crate::ui_state::UiState;
use ratatui::{Frame, widgets::StatefulWidget};

pub fn render(f: &mut Frame, state: &mut UiState) {
    let layout = AppLayout::new(f.area(), state);

    if !layout.player.is_empty() {
        PlayerPane.render(layout.player, f.buffer_mut(), state);
    }
    NoteView.render(layout.note, f.buffer_mut(), state);
    StatusLine.render(layout.status_line, f.buffer_mut(), state);
}
