use chrono::{DateTime, Utc};
use serde::Serialize;

/// A snapshot of the system's now-playing metadata.
///
/// The OS dictionary this is built from is sparse and undocumented, so every
/// field is optional; a missing key is normal, not an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NowPlaying {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    /// Track length in seconds.
    pub duration: Option<f64>,
    /// Playback position in seconds, as of `captured_at`.
    pub elapsed: Option<f64>,
    /// 1.0 while playing, 0.0 while paused.
    pub playback_rate: Option<f64>,
    pub captured_at: DateTime<Utc>,
}

impl NowPlaying {
    pub fn new() -> Self {
        Self {
            title: None,
            artist: None,
            album: None,
            duration: None,
            elapsed: None,
            playback_rate: None,
            captured_at: Utc::now(),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playback_rate.is_some_and(|rate| rate > 0.0)
    }

    pub fn display_name(&self) -> &str {
        self.title.as_deref().unwrap_or("(unknown)")
    }

    /// Position as "M:SS / M:SS", omitting whichever side is unknown.
    pub fn format_position(&self) -> Option<String> {
        match (self.elapsed, self.duration) {
            (Some(elapsed), Some(duration)) => Some(format!(
                "{} / {}",
                format_seconds(elapsed),
                format_seconds(duration)
            )),
            (Some(elapsed), None) => Some(format_seconds(elapsed)),
            (None, Some(duration)) => Some(format!("-:-- / {}", format_seconds(duration))),
            (None, None) => None,
        }
    }
}

impl Default for NowPlaying {
    fn default() -> Self {
        Self::new()
    }
}

fn format_seconds(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    let minutes = total / 60;
    let seconds = total % 60;
    format!("{minutes}:{seconds:02}")
}
