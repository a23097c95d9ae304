//! Engine outputs: events from the last update plus the derived frame.

use serde::{Deserialize, Serialize};

use crate::inputs::ViewMode;
use crate::playback::PlaybackState;
use crate::snapshot::Snapshot;

/// Notable occurrences during an update, in order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ReplayEvent {
    /// A new sequence was loaded and classified.
    Analyzed,
    /// The playback cursor advanced to this position.
    Advanced { cursor: usize },
    /// Playback reached the last step and stopped.
    Ended,
    /// Playback restarted from the beginning.
    Replayed,
    /// The freeform path produced an empty script; there is nothing to draw.
    NoVisualObjects,
}

/// Event accumulator. Events pile up across `analyze`/`update` calls until
/// the host consumes and clears them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Outputs {
    pub events: Vec<ReplayEvent>,
}

impl Outputs {
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

/// Everything a renderer needs for the current cursor, derived fresh.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub playback: PlaybackState,
    pub narration: String,
    pub view_mode: ViewMode,
    pub snapshot: Snapshot,
}
