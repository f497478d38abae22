use crate::ui_state::{PlaybackSettings, SplitMode, UiState};
use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct AppLayout {
    pub player: Rect,
    pub note: Rect,
    pub status_line: Rect,
}

impl AppLayout {
    pub fn new(area: Rect, state: &UiState) -> Self {
        let has_player = state.workspace.active_instance().is_some();

        let [upper_block, status_line] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Fill(1), Constraint::Length(1)])
            .areas(area);

        if !has_player {
            return AppLayout {
                player: Rect::default(),
                note: upper_block,
                status_line,
            };
        }

        let settings = state.workspace.settings();
        let [player, note] = split_player(upper_block, state.workspace.split_mode(), &settings);

        AppLayout {
            player,
            note,
            status_line,
        }
    }
}

// A vertical split puts the player beside the note, a horizontal one above it
fn split_player(area: Rect, mode: SplitMode, settings: &PlaybackSettings) -> [Rect; 2] {
    let (direction, player_percent) = match mode {
        SplitMode::Vertical => (Direction::Horizontal, settings.horizontal_player_width),
        SplitMode::Horizontal => (Direction::Vertical, settings.vertical_player_height),
    };

    Layout::default()
        .direction(direction)
        .constraints([
            Constraint::Percentage(player_percent),
            Constraint::Fill(1),
        ])
        .areas(area)
}
