use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Output volume in percent, clamped to 0..=100.
    pub volume: u8,
    /// How often the engine polls the sink for a finished clip.
    pub monitor_interval_ms: u64,
}

impl AudioConfig {
    pub fn volume_ratio(&self) -> f32 {
        self.volume.min(100) as f32 / 100.0
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            volume: 100,
            monitor_interval_ms: 100,
        }
    }
}
