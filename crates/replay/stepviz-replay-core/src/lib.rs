//! stepviz Replay Core (engine-agnostic)
//!
//! Replays a backend-produced log of discrete mutation events ("steps")
//! against a classified data-structure family and reconstructs the exact
//! state at any cursor. Classification, decoding, and narration are pure
//! functions over immutable step sequences; the playback controller owns the
//! only mutable state (cursor/speed/token) and drives a cooperative tick.
//!
//! Nothing in this crate is fatal by design: malformed steps are no-ops,
//! unclassifiable input routes to the freeform interpreter, and stale
//! playback ticks are dropped via replay-token generations.

pub mod config;
pub mod decode;
pub mod engine;
pub mod freeform;
pub mod inputs;
pub mod kind;
pub mod narrate;
pub mod outputs;
pub mod playback;
pub mod snapshot;

// Re-exports for consumers (host UIs, adapters)
pub use config::Config;
pub use decode::{decode, decode_with, DecodeOptions};
pub use engine::Engine;
pub use freeform::{interpret, FreeformPlan, PlanObject, PlanOp, ScriptLine, TimedScript};
pub use inputs::{Command, Inputs, ViewMode};
pub use kind::{resolve, Confidence, Family, KindHint, ResolvedKind, Variant};
pub use narrate::narrate;
pub use outputs::{Frame, Outputs, ReplayEvent};
pub use playback::{Playback, PlaybackState, TickEvent};
pub use snapshot::{
    ring_positions, BTreeNode, BTreeSnapshot, Edge, FrontierKind, GraphSnapshot, HeapSnapshot,
    ListSnapshot, NodeColor, NodeId, RingSnapshot, SeqSnapshot, Snapshot, TreeNode, TreeSnapshot,
};
pub use stepviz_api_core::{parse_analysis_json, AnalysisPayload, Endpoint, Meta, Step, StepValue};
