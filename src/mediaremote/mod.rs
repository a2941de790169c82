//! Access to the system's now-playing metadata.
//!
//! On macOS this is backed by the private MediaRemote framework (raw symbol
//! declarations live in [`sys`], the safe wrapper in `macos`). Other
//! platforms get a stub that reports [`MediaRemoteError::Unsupported`].

use std::sync::mpsc;
use std::time::Duration;

use thiserror::Error;

use crate::models::NowPlaying;

#[cfg(target_os = "macos")]
mod macos;
#[cfg(target_os = "macos")]
pub mod sys;

#[cfg(target_os = "macos")]
pub use macos::{MacosSource as PlatformSource, observe};

#[cfg(not(target_os = "macos"))]
mod unsupported;
#[cfg(not(target_os = "macos"))]
pub use unsupported::{UnsupportedSource as PlatformSource, observe};

#[derive(Debug, Error)]
pub enum MediaRemoteError {
    #[error("now-playing info is not available on this platform")]
    Unsupported,
    #[error("timed out waiting for now-playing info after {0:?}")]
    Timeout(Duration),
    #[error("now-playing reply channel closed before a snapshot arrived")]
    ChannelClosed,
}

/// Handler invoked exactly once with the result of a snapshot request.
/// `None` means no media is playing, not an error.
pub type InfoHandler = Box<dyn FnOnce(Option<NowPlaying>) + Send + 'static>;

/// A source of now-playing snapshots.
pub trait NowPlayingSource {
    /// Request a snapshot. Asynchronous and single-shot: returns without
    /// blocking, and the handler fires exactly once on the source's queue,
    /// or never if the process exits first. No cancellation.
    fn request_info(&self, handler: InfoHandler) -> Result<(), MediaRemoteError>;
}

pub fn platform_source() -> PlatformSource {
    PlatformSource::new()
}

/// Block until a snapshot arrives or `timeout` elapses.
///
/// The accessor itself offers no bounded wait, so the timer lives here,
/// layered over the callback interface.
pub fn fetch_blocking(
    source: &dyn NowPlayingSource,
    timeout: Duration,
) -> Result<Option<NowPlaying>, MediaRemoteError> {
    let (tx, rx) = mpsc::sync_channel(1);
    source.request_info(Box::new(move |info| {
        let _ = tx.send(info);
    }))?;

    match rx.recv_timeout(timeout) {
        Ok(info) => Ok(info),
        Err(mpsc::RecvTimeoutError::Timeout) => Err(MediaRemoteError::Timeout(timeout)),
        Err(mpsc::RecvTimeoutError::Disconnected) => Err(MediaRemoteError::ChannelClosed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    /// Delivers a fixed snapshot from another thread, the way the OS service
    /// delivers on a dispatch queue.
    struct FakeSource {
        snapshot: Option<NowPlaying>,
        deliveries: Arc<AtomicUsize>,
    }

    impl NowPlayingSource for FakeSource {
        fn request_info(&self, handler: InfoHandler) -> Result<(), MediaRemoteError> {
            let snapshot = self.snapshot.clone();
            let deliveries = Arc::clone(&self.deliveries);
            thread::spawn(move || {
                deliveries.fetch_add(1, Ordering::SeqCst);
                handler(snapshot);
            });
            Ok(())
        }
    }

    #[test]
    fn test_fetch_delivers_active_media_exactly_once() {
        let deliveries = Arc::new(AtomicUsize::new(0));
        let mut snapshot = NowPlaying::new();
        snapshot.title = Some("A".to_string());
        snapshot.artist = Some("B".to_string());
        let source = FakeSource {
            snapshot: Some(snapshot),
            deliveries: Arc::clone(&deliveries),
        };

        let info = fetch_blocking(&source, Duration::from_secs(1))
            .unwrap()
            .unwrap();
        assert_eq!(info.title.as_deref(), Some("A"));
        assert_eq!(info.artist.as_deref(), Some("B"));

        // Give a stray second delivery time to show up before counting.
        thread::sleep(Duration::from_millis(50));
        assert_eq!(deliveries.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_fetch_with_no_media_is_not_an_error() {
        let source = FakeSource {
            snapshot: None,
            deliveries: Arc::new(AtomicUsize::new(0)),
        };
        let info = fetch_blocking(&source, Duration::from_secs(1)).unwrap();
        assert!(info.is_none());
    }

    #[test]
    fn test_fetch_times_out_when_nothing_arrives() {
        /// Accepts the request but never invokes the handler.
        struct SilentSource;
        impl NowPlayingSource for SilentSource {
            fn request_info(&self, handler: InfoHandler) -> Result<(), MediaRemoteError> {
                std::mem::forget(handler);
                Ok(())
            }
        }

        let err = fetch_blocking(&SilentSource, Duration::from_millis(10)).unwrap_err();
        assert!(matches!(err, MediaRemoteError::Timeout(_)));
    }

    #[test]
    fn test_fetch_reports_dropped_handler() {
        struct DroppingSource;
        impl NowPlayingSource for DroppingSource {
            fn request_info(&self, handler: InfoHandler) -> Result<(), MediaRemoteError> {
                drop(handler);
                Ok(())
            }
        }

        let err = fetch_blocking(&DroppingSource, Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, MediaRemoteError::ChannelClosed));
    }

    #[cfg(not(target_os = "macos"))]
    #[test]
    fn test_platform_source_is_unsupported() {
        let err = platform_source()
            .request_info(Box::new(|_| {}))
            .unwrap_err();
        assert!(matches!(err, MediaRemoteError::Unsupported));
    }
}
