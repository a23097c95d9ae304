//! Engine facade: load a sequence, pump time, read frames.
//!
//! The engine owns exactly one session at a time. Loading a new payload
//! replaces the session wholesale and carries the playback generation token
//! forward, so a tick scheduled against the old sequence can never advance
//! the new one. Frames are derived fresh from `(steps, cursor)` on every
//! call; nothing in the snapshot is incremental.

use crate::config::Config;
use crate::decode::{decode_with, DecodeOptions};
use crate::freeform::{interpret, FreeformPlan, TimedScript};
use crate::inputs::{Command, Inputs, ViewMode};
use crate::kind::{resolve, Family, KindHint, ResolvedKind};
use crate::narrate::narrate;
use crate::outputs::{Frame, Outputs, ReplayEvent};
use crate::playback::{Playback, TickEvent};
use crate::snapshot::Snapshot;
use stepviz_api_core::{AnalysisPayload, Step};

struct Session {
    steps: Vec<Step>,
    kind: ResolvedKind,
    /// Compiled script for the freeform path; empty otherwise.
    script: TimedScript,
    playback: Playback,
    opts: DecodeOptions,
}

pub struct Engine {
    cfg: Config,
    view_mode: ViewMode,
    session: Option<Session>,
    /// Generation token handed to the next session's playback.
    next_token: u64,
    outputs: Outputs,
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new(Config::default())
    }
}

impl Engine {
    pub fn new(cfg: Config) -> Self {
        Engine {
            cfg,
            view_mode: ViewMode::default(),
            session: None,
            next_token: 0,
            outputs: Outputs::default(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Load and classify a payload, replacing any current session. Playback
    /// starts paused at cursor 0.
    pub fn analyze(&mut self, payload: AnalysisPayload) {
        let hint = KindHint::from_payload(&payload);
        let kind = resolve(&hint, &payload.steps);
        log::debug!(
            "analyzed {} steps as {:?}/{:?} ({:?})",
            payload.steps.len(),
            kind.family,
            kind.variant,
            kind.confidence
        );

        let script = if kind.is_fallback() {
            interpret(&FreeformPlan::from_meta(&payload.meta), &self.cfg)
        } else {
            TimedScript::default()
        };
        // the freeform timeline is its script, not the raw steps
        let len = if kind.is_fallback() {
            script.lines.len()
        } else {
            payload.steps.len()
        };

        let playback = Playback::new(len, self.next_token);
        self.next_token = playback.token().wrapping_add(1);

        self.outputs.events.push(ReplayEvent::Analyzed);
        if kind.is_fallback() && script.is_empty() {
            self.outputs.events.push(ReplayEvent::NoVisualObjects);
        }

        self.session = Some(Session {
            opts: DecodeOptions {
                default_capacity: self.cfg.default_capacity,
                meta_capacity: payload.meta.capacity,
                list_as_stack: payload.meta.is_stack.unwrap_or(false),
            },
            steps: payload.steps,
            kind,
            script,
            playback,
        });
    }

    /// Apply a batch of commands and pump time by `dt` seconds. Events from
    /// this update (and from an `analyze` since the last one) are readable
    /// off the returned outputs until the next call clears them.
    pub fn update(&mut self, dt: f32, inputs: Inputs) -> &Outputs {
        for cmd in &inputs.commands {
            if let Command::SetViewMode { mode } = cmd {
                self.view_mode = *mode;
            }
        }
        if let Some(session) = self.session.as_mut() {
            for cmd in inputs.commands {
                match cmd {
                    Command::Play => session.playback.play(&self.cfg),
                    Command::Pause => session.playback.pause(),
                    Command::Seek { cursor } => session.playback.seek(cursor),
                    Command::Replay => {
                        session.playback.replay(&self.cfg);
                        self.outputs.events.push(ReplayEvent::Replayed);
                    }
                    Command::SetSpeed { speed } => session.playback.set_speed(speed),
                    Command::SetViewMode { .. } => {}
                }
            }
            for event in session.playback.update(dt, &self.cfg) {
                self.outputs.events.push(match event {
                    TickEvent::Advanced(cursor) => ReplayEvent::Advanced { cursor },
                    TickEvent::Ended => ReplayEvent::Ended,
                });
            }
        }
        &self.outputs
    }

    /// Drop accumulated events. Hosts call this after consuming an update's
    /// outputs; `update` does not clear implicitly so analyze-time events
    /// survive until they have been observed.
    pub fn clear_events(&mut self) {
        self.outputs.clear();
    }

    /// The frame at the current cursor, or `None` before the first analyze.
    pub fn frame(&self) -> Option<Frame> {
        let session = self.session.as_ref()?;
        let cursor = session.playback.cursor();

        let (snapshot, narration) = if session.kind.family == Family::Freeform {
            let say = session
                .script
                .lines
                .get(cursor)
                .map(|l| l.say.clone())
                .unwrap_or_default();
            (Snapshot::Script(session.script.clone()), say)
        } else {
            let snapshot = decode_with(&session.kind, &session.steps, cursor, &session.opts);
            let narration = session
                .steps
                .get(cursor.min(session.steps.len().saturating_sub(1)))
                .map(|s| narrate(s, &session.kind))
                .unwrap_or_default();
            (snapshot, narration)
        };

        Some(Frame {
            playback: session.playback.state(),
            narration,
            view_mode: self.view_mode,
            snapshot,
        })
    }

    pub fn kind(&self) -> Option<&ResolvedKind> {
        self.session.as_ref().map(|s| &s.kind)
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    // Direct controls, for hosts that prefer method calls over command
    // batches. Semantics are identical.

    pub fn play(&mut self) {
        if let Some(s) = self.session.as_mut() {
            s.playback.play(&self.cfg);
        }
    }

    pub fn pause(&mut self) {
        if let Some(s) = self.session.as_mut() {
            s.playback.pause();
        }
    }

    pub fn seek(&mut self, cursor: usize) {
        if let Some(s) = self.session.as_mut() {
            s.playback.seek(cursor);
        }
    }

    pub fn set_speed(&mut self, speed: f32) {
        if let Some(s) = self.session.as_mut() {
            s.playback.set_speed(speed);
        }
    }

    pub fn replay(&mut self) {
        if let Some(s) = self.session.as_mut() {
            s.playback.replay(&self.cfg);
            self.outputs.events.push(ReplayEvent::Replayed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepviz_api_core::parse_analysis_json;

    fn stack_payload() -> AnalysisPayload {
        parse_analysis_json(
            r#"{
                "meta": {"kind": "stack"},
                "steps": [
                    {"action": "push", "value": "a"},
                    {"action": "push", "value": "b"},
                    {"action": "pop"}
                ]
            }"#,
        )
        .unwrap()
    }

    /// it should derive the same frame for the same cursor, before and after
    /// playing through
    #[test]
    fn frames_are_pure_functions_of_cursor() {
        let mut engine = Engine::default();
        engine.analyze(stack_payload());
        engine.seek(1);
        let before = engine.frame().unwrap();
        engine.seek(2);
        engine.seek(1);
        let after = engine.frame().unwrap();
        assert_eq!(before.snapshot, after.snapshot);
        assert_eq!(before.narration, after.narration);
    }

    /// it should keep ticks from a replaced session out of the new one
    #[test]
    fn stale_session_ticks_do_not_advance() {
        let mut engine = Engine::default();
        engine.analyze(stack_payload());
        engine.play();
        // half a tick elapses, then a new sequence arrives
        engine.update(0.5, Inputs::default());
        engine.analyze(stack_payload());
        let events = engine.update(10.0, Inputs::default());
        // fresh session is paused; nothing advanced
        assert!(!events
            .events
            .iter()
            .any(|e| matches!(e, ReplayEvent::Advanced { .. })));
        assert_eq!(engine.frame().unwrap().playback.cursor, 0);
    }

    /// it should surface the empty-freeform condition as an event
    #[test]
    fn empty_freeform_reports_no_visual_objects() {
        let mut engine = Engine::default();
        engine.analyze(AnalysisPayload::default());
        assert!(engine
            .update(0.0, Inputs::default())
            .events
            .contains(&ReplayEvent::NoVisualObjects));
    }
}
