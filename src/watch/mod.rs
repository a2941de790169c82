//! Platform-independent half of `nowplay watch`: change detection and
//! output rendering. The platform observer lives in `mediaremote`.

use anyhow::Result;

use crate::models::NowPlaying;

/// Filters a stream of snapshots down to meaningful changes.
///
/// The OS posts the change notification more often than the track state
/// actually changes (seeks, app switches, artwork loads), so consecutive
/// snapshots describing the same track and play state are dropped.
#[derive(Default)]
pub struct ChangeTracker {
    last: Option<Option<NowPlaying>>,
}

impl ChangeTracker {
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Returns true if `info` should be reported. The first snapshot is
    /// always reported.
    pub fn accept(&mut self, info: &Option<NowPlaying>) -> bool {
        let changed = match &self.last {
            None => true,
            Some(last) => !same_state(last, info),
        };
        if changed {
            self.last = Some(info.clone());
        }
        changed
    }
}

fn same_state(a: &Option<NowPlaying>, b: &Option<NowPlaying>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => {
            a.title == b.title
                && a.artist == b.artist
                && a.album == b.album
                && a.is_playing() == b.is_playing()
        }
        _ => false,
    }
}

/// One human-readable line per snapshot.
pub fn render(info: &Option<NowPlaying>) -> String {
    let Some(info) = info else {
        return "Nothing playing".to_string();
    };

    let mut line = info.display_name().to_string();
    if let Some(artist) = &info.artist {
        line.push_str(&format!(" - {artist}"));
    }
    if let Some(album) = &info.album {
        line.push_str(&format!(" ({album})"));
    }
    if let Some(position) = info.format_position() {
        line.push_str(&format!(" [{position}]"));
    }
    if !info.is_playing() {
        line.push_str(" (paused)");
    }
    line
}

/// One JSON object per snapshot; `null` when nothing is playing.
pub fn render_json(info: &Option<NowPlaying>) -> Result<String> {
    Ok(serde_json::to_string(info)?)
}
