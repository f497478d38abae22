mod color;
mod indicator;
mod scheduler;
mod settings;
mod ui_state;

pub use color::parse_color;
pub use indicator::{
    IndicatorError, IndicatorMachine, IndicatorState, PLAY_PAUSE_HOLD, SHOW_DELAY, SPEED_HOLD,
    Subscription, TIMESTAMP_HOLD, WeakIndicator,
};
pub use scheduler::{Scheduler, TimerCallback, TimerId, TimerQueue};
pub use settings::{PlaybackSettings, SplitMode};
pub use ui_state::UiState;
