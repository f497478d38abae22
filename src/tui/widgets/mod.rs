mod note_view;
mod overlay;
mod player_pane;
mod status_line;

pub use note_view::NoteView;
pub use player_pane::PlayerPane;
pub use status_line::StatusLine;

const PLAY_ICON: &str = "▶";
const PAUSE_ICON: &str = "⏸";
const SEEK_FORWARD_ICON: &str = "»";
const SEEK_BACKWARD_ICON: &str = "«";
const READOUT_WIDTH: u16 = 9;
