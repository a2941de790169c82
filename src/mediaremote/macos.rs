//! Safe wrapper over the raw MediaRemote symbols.
//!
//! The OS hands snapshots back as a `CFDictionary` with undocumented keys;
//! conversion goes through the toll-free bridged `NSDictionary` view and
//! treats every key as optional.

use std::ptr::NonNull;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use block2::RcBlock;
use chrono::Utc;
use dispatch2::{DispatchQueue, DispatchRetained};
use objc2::runtime::AnyObject;
use objc2_core_foundation::{CFDictionary, CFString};
use objc2_foundation::{
    NSDate, NSDefaultRunLoopMode, NSDictionary, NSNotification, NSNotificationCenter, NSNumber,
    NSRunLoop, NSString,
};
use tracing::{debug, warn};

use super::{InfoHandler, MediaRemoteError, NowPlayingSource, sys};
use crate::models::NowPlaying;

const TITLE_KEY: &str = "kMRMediaRemoteNowPlayingInfoTitle";
const ARTIST_KEY: &str = "kMRMediaRemoteNowPlayingInfoArtist";
const ALBUM_KEY: &str = "kMRMediaRemoteNowPlayingInfoAlbum";
const DURATION_KEY: &str = "kMRMediaRemoteNowPlayingInfoDuration";
const ELAPSED_KEY: &str = "kMRMediaRemoteNowPlayingInfoElapsedTime";
const RATE_KEY: &str = "kMRMediaRemoteNowPlayingInfoPlaybackRate";

/// Now-playing source backed by MediaRemote.
///
/// Owns the serial dispatch queue that completions and notifications are
/// delivered on; the queue must stay alive until every pending completion
/// has fired, which holding it in the struct guarantees.
pub struct MacosSource {
    queue: DispatchRetained<DispatchQueue>,
}

impl MacosSource {
    pub fn new() -> Self {
        Self {
            queue: DispatchQueue::new("nowplay.media-remote", None),
        }
    }
}

impl Default for MacosSource {
    fn default() -> Self {
        Self::new()
    }
}

impl NowPlayingSource for MacosSource {
    fn request_info(&self, handler: InfoHandler) -> Result<(), MediaRemoteError> {
        // The completion is a Fn block while the handler is FnOnce. The OS
        // invokes the block at most once per request, so take() never finds
        // the slot already empty.
        let handler = Mutex::new(Some(handler));
        let completion = RcBlock::new(move |info: *const CFDictionary| {
            let snapshot = unsafe { convert_info(info) };
            if let Some(handler) = handler.lock().unwrap().take() {
                handler(snapshot);
            }
        });

        // The framework copies the block, so it may outlive this scope.
        unsafe { sys::MRMediaRemoteGetNowPlayingInfo(&self.queue, &completion) };
        Ok(())
    }
}

/// Keeps now-playing notification delivery switched on while alive.
struct NotificationRegistration;

impl NotificationRegistration {
    fn new(queue: &DispatchQueue) -> Self {
        unsafe { sys::MRMediaRemoteRegisterForNowPlayingNotifications(queue) };
        Self
    }
}

impl Drop for NotificationRegistration {
    fn drop(&mut self) {
        unsafe { sys::MRMediaRemoteUnregisterForNowPlayingNotifications() };
    }
}

/// Subscribe to now-playing changes and park the calling thread.
///
/// `on_change` fires once per OS notification, never before registration,
/// with a fresh snapshot each time. Never returns; the process runs until
/// killed.
pub fn observe<F>(on_change: F) -> Result<(), MediaRemoteError>
where
    F: Fn(Option<NowPlaying>) + Send + Sync + 'static,
{
    let source = Arc::new(MacosSource::new());
    let _registration = NotificationRegistration::new(&source.queue);
    let on_change = Arc::new(on_change);

    let observer = RcBlock::new({
        let source = Arc::clone(&source);
        move |_notification: NonNull<NSNotification>| {
            debug!("now-playing change notification received");
            let on_change = Arc::clone(&on_change);
            let result = source.request_info(Box::new(move |info| on_change(info)));
            if let Err(e) = result {
                warn!("Failed to refresh now-playing info: {e}");
            }
        }
    });

    let center = unsafe { NSNotificationCenter::defaultCenter() };
    let name = nsstring_from_cf(unsafe { sys::kMRMediaRemoteNowPlayingInfoDidChangeNotification });
    // The token is never removed; observation lasts for the process
    // lifetime, matching the pump loop below.
    let _token = unsafe {
        center.addObserverForName_object_queue_usingBlock(Some(name), None, None, &observer)
    };

    debug!("registered for now-playing notifications");

    // -[NSRunLoop run] returns immediately when the loop has no attached
    // input sources, and neither the dispatch-queue delivery nor the block
    // observer attaches one, so pump explicitly and stay parked either way.
    let run_loop = unsafe { NSRunLoop::currentRunLoop() };
    loop {
        let deadline = unsafe { NSDate::dateWithTimeIntervalSinceNow(0.25) };
        let pumped = unsafe { run_loop.runMode_beforeDate(NSDefaultRunLoopMode, &deadline) };
        if !pumped {
            // No sources to service; notifications still arrive on the
            // dispatch queue.
            thread::sleep(Duration::from_millis(250));
        }
    }
}

/// CFString and NSString are toll-free bridged.
fn nsstring_from_cf(s: &CFString) -> &NSString {
    unsafe { &*(s as *const CFString as *const NSString) }
}

/// Convert the raw snapshot dictionary into the typed model. NULL or empty
/// dictionaries mean nothing is playing.
unsafe fn convert_info(info: *const CFDictionary) -> Option<NowPlaying> {
    if info.is_null() {
        return None;
    }
    // CFDictionary is toll-free bridged to NSDictionary.
    let dict = unsafe { &*(info as *const NSDictionary<NSString, AnyObject>) };
    if dict.count() == 0 {
        return None;
    }

    Some(NowPlaying {
        title: dict_string(dict, TITLE_KEY),
        artist: dict_string(dict, ARTIST_KEY),
        album: dict_string(dict, ALBUM_KEY),
        duration: dict_f64(dict, DURATION_KEY),
        elapsed: dict_f64(dict, ELAPSED_KEY),
        playback_rate: dict_f64(dict, RATE_KEY),
        captured_at: Utc::now(),
    })
}

fn dict_string(dict: &NSDictionary<NSString, AnyObject>, key: &str) -> Option<String> {
    let value = dict.objectForKey(&NSString::from_str(key))?;
    let value = value.downcast::<NSString>().ok()?;
    Some(value.to_string())
}

fn dict_f64(dict: &NSDictionary<NSString, AnyObject>, key: &str) -> Option<f64> {
    let value = dict.objectForKey(&NSString::from_str(key))?;
    let value = value.downcast::<NSNumber>().ok()?;
    Some(value.doubleValue())
}
