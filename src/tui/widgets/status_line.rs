use crate::{
    tui::widgets::{PAUSE_ICON, PLAY_ICON},
    ui_state::{SplitMode, UiState},
};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Stylize},
    text::{Line, Span},
    widgets::{StatefulWidget, Widget},
};

const KEY_HINTS: &str = "␣ play  ←/→ seek  +/- speed  t stamp  ⏎ jump  s split  q quit ";

pub struct StatusLine;

impl StatefulWidget for StatusLine {
    type State = UiState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [left, right] = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .areas(area);

        if let Some(err) = state.get_error() {
            Line::from(format!(" {err}")).fg(Color::Red).render(left, buf);
        } else {
            let tabs = state
                .notes()
                .iter()
                .enumerate()
                .flat_map(|(idx, note)| {
                    let name = Span::from(format!(" {} ", note.title()));
                    let name = match idx == state.current_index() {
                        true => name.fg(Color::Black).bg(Color::Gray),
                        false => name.fg(Color::DarkGray),
                    };
                    [name, Span::from(" ")]
                })
                .collect::<Vec<_>>();
            Line::from(tabs).render(left, buf);
        }

        let split = match state.workspace.split_mode() {
            SplitMode::Vertical => "◧",
            SplitMode::Horizontal => "⬓",
        };
        let playback = match state.workspace.active_instance() {
            Some(p) if p.state().is_playing() => format!("{PLAY_ICON} {}x ", p.speed()),
            Some(p) => format!("{PAUSE_ICON} {}x ", p.speed()),
            None => String::new(),
        };

        Line::from_iter([
            Span::from(playback).fg(Color::Gray),
            Span::from(format!("{split} ")).fg(Color::DarkGray),
            Span::from(KEY_HINTS).fg(Color::DarkGray),
        ])
        .right_aligned()
        .render(right, buf);
    }
}
