pub enum PlayerCommand {
    Play,
    Pause,
    SeekTo(f64),
    SetRate(f64),
    Stop,
}
