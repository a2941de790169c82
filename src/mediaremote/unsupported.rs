//! Stub source for platforms without a system now-playing service.

use super::{InfoHandler, MediaRemoteError, NowPlayingSource};
use crate::models::NowPlaying;

pub struct UnsupportedSource;

impl UnsupportedSource {
    pub fn new() -> Self {
        Self
    }
}

impl Default for UnsupportedSource {
    fn default() -> Self {
        Self::new()
    }
}

impl NowPlayingSource for UnsupportedSource {
    fn request_info(&self, _handler: InfoHandler) -> Result<(), MediaRemoteError> {
        tracing::debug!("now-playing info requested on an unsupported platform");
        Err(MediaRemoteError::Unsupported)
    }
}

pub fn observe<F>(_on_change: F) -> Result<(), MediaRemoteError>
where
    F: Fn(Option<NowPlaying>) + Send + Sync + 'static,
{
    Err(MediaRemoteError::Unsupported)
}
