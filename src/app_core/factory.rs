use crate::{
    domain::StartPosition,
    player::{ClockBackend, PlayerHandle, VideoPlayer},
};
use anyhow::Result;
use std::rc::Rc;

pub trait PlayerFactory {
    fn spawn(&self, media_id: &str, start: StartPosition) -> Result<Rc<dyn VideoPlayer>>;
}

pub struct ClockPlayerFactory {
    pub duration: f64,
}

impl PlayerFactory for ClockPlayerFactory {
    fn spawn(&self, media_id: &str, start: StartPosition) -> Result<Rc<dyn VideoPlayer>> {
        let backend = Box::new(ClockBackend::new(self.duration));
        let handle = PlayerHandle::spawn(backend, media_id, start.seconds, start.autoplay);
        Ok(Rc::new(handle))
    }
}
