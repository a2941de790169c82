//! Raw declarations for the private MediaRemote framework symbols.
//!
//! MediaRemote is not a public SDK; these entry points are resolved at link
//! time, with `build.rs` adding the private-frameworks search path. If the
//! OS drops or renames a symbol the process fails to launch, so nothing
//! here has a runtime error channel.

#![allow(non_snake_case, non_upper_case_globals)]

use block2::DynBlock;
use dispatch2::DispatchQueue;
use objc2_core_foundation::{CFDictionary, CFString};

/// Completion type for [`MRMediaRemoteGetNowPlayingInfo`]. The dictionary
/// is NULL when nothing is playing or the OS denies the request; its
/// ownership lasts for the duration of the block invocation.
pub type MRNowPlayingInfoCompletion = DynBlock<dyn Fn(*const CFDictionary)>;

#[link(name = "MediaRemote", kind = "framework")]
unsafe extern "C" {
    /// Posted to the default notification center whenever the now-playing
    /// info changes. A single immutable process-wide token; it never fires
    /// unless [`MRMediaRemoteRegisterForNowPlayingNotifications`] has been
    /// called first.
    pub static kMRMediaRemoteNowPlayingInfoDidChangeNotification: &'static CFString;

    /// Request a snapshot of the current now-playing info. Returns
    /// immediately; `completion` is invoked exactly once on `queue`, or
    /// never if the process exits first. No cancellation, no error channel.
    /// The caller must keep `queue` alive until the completion has fired.
    pub fn MRMediaRemoteGetNowPlayingInfo(
        queue: &DispatchQueue,
        completion: &MRNowPlayingInfoCompletion,
    );

    /// Start delivery of now-playing notifications to this process, on the
    /// given queue.
    pub fn MRMediaRemoteRegisterForNowPlayingNotifications(queue: &DispatchQueue);

    /// Stop delivery of now-playing notifications to this process.
    pub fn MRMediaRemoteUnregisterForNowPlayingNotifications();
}

#[cfg(test)]
mod tests {
    use super::*;

    // Runs against the live framework, so macOS only.
    #[test]
    fn test_notification_name_matches_emitted_value() {
        // The identifier must match what the OS emits bit for bit, or
        // observation silently never fires. Compare the constant against an
        // independently built string, not against its own identity.
        let constant = unsafe { kMRMediaRemoteNowPlayingInfoDidChangeNotification };
        let expected = CFString::from_str("kMRMediaRemoteNowPlayingInfoDidChangeNotification");
        assert_eq!(constant, &*expected);
        assert_eq!(constant.to_string(), expected.to_string());
    }
}
