mod app;
mod broadcast;
mod factory;
mod instance;
mod workspace;

pub use app::MediaNotes;
pub use broadcast::SettingsBroadcast;
pub use factory::{ClockPlayerFactory, PlayerFactory};
pub use instance::{PlayerInstance, SPEED_STEPS};
pub use workspace::{MountChange, Workspace};
