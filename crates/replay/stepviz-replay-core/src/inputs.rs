//! Per-update input batch.

use serde::{Deserialize, Serialize};

/// Presentation mode for families that support both layouts (circular
/// structures render as a flat array or as a ring).
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Array,
    Ring,
}

/// Playback commands, applied in order at the start of an update.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum Command {
    Play,
    Pause,
    Seek { cursor: usize },
    Replay,
    SetSpeed { speed: f32 },
    SetViewMode { mode: ViewMode },
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Inputs {
    pub commands: Vec<Command>,
}

impl Inputs {
    pub fn push(&mut self, cmd: Command) {
        self.commands.push(cmd);
    }
}
