pub mod handler;

use std::time::{SystemTime, UNIX_EPOCH};

/// Frame index of a looping animation with `frames` frames of `step_ms` each.
pub fn animation_step(step_ms: u64, frames: usize) -> usize {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64;

    (now / step_ms.max(1)) as usize % frames.max(1)
}

pub fn get_active_track_icon(is_playing: bool) -> &'static str {
    if !is_playing {
        return "•";
    }

    match animation_step(100, 6) {
        1 | 4 => "•",
        2 | 3 => "●",
        _ => "·",
    }
}
