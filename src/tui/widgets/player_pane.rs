use crate::{
    domain::format_timestamp,
    tui::widgets::{READOUT_WIDTH, overlay::Overlay},
    ui_state::UiState,
};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Stylize},
    text::Line,
    widgets::{Block, BorderType, Borders, LineGauge, Padding, StatefulWidget, Widget},
};

pub struct PlayerPane;

impl StatefulWidget for PlayerPane {
    type State = UiState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let Some(instance) = state.workspace.active_instance() else {
            return;
        };
        let settings = instance.settings();
        let snapshot = instance.indicator().snapshot();

        let title = match instance.link().media_id() {
            Some(id) => format!(" {id} "),
            None => String::new(),
        };

        let block = Block::new()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Color::DarkGray)
            .title(title)
            .bg(settings.background());
        let inner = block.inner(area);
        block.render(area, buf);

        let [video, bar] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Fill(1), Constraint::Length(1)])
            .areas(inner);

        Overlay {
            state: &snapshot,
            seek_seconds: settings.seek_seconds,
        }
        .render(video, buf);

        let [readout, gauge] = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(READOUT_WIDTH), Constraint::Fill(1)])
            .areas(bar);

        if snapshot.timestamp_shown(settings.display_timestamp) {
            Line::from(format_timestamp(Some(instance.position())))
                .fg(Color::Gray)
                .right_aligned()
                .render(readout, buf);
        }

        if let Some(ratio) = instance.progress_ratio() {
            LineGauge::default()
                .block(Block::new().padding(Padding::horizontal(1)))
                .filled_style(settings.progress_color())
                .unfilled_style(Color::DarkGray)
                .label("")
                .ratio(ratio)
                .render(gauge, buf);
        }
    }
}
