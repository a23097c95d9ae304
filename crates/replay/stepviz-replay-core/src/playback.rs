//! Cursor/timing state machine.
//!
//! Advancement is cooperative: the host pumps `update(dt)` and the controller
//! counts down one scheduled tick at a time. Each tick is stamped with the
//! generation token current at schedule time; `replay` bumps the token, so a
//! tick scheduled before the restart expires silently instead of advancing
//! the fresh run. Speed changes never touch the in-flight tick, only the next
//! one scheduled.

use serde::{Deserialize, Serialize};

use crate::config::Config;

/// What one `update` pass did, in order of occurrence.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TickEvent {
    /// The cursor moved to the contained position.
    Advanced(usize),
    /// Playback reached the last step and stopped.
    Ended,
}

#[derive(Clone, Debug, PartialEq)]
struct Tick {
    token: u64,
    remaining: f32,
}

/// Serializable view of the controller, for hosts that mirror playback in UI.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    pub cursor: usize,
    pub total: usize,
    pub playing: bool,
    pub speed: f32,
    /// Current replay generation.
    pub token: u64,
}

#[derive(Clone, Debug)]
pub struct Playback {
    len: usize,
    cursor: usize,
    playing: bool,
    speed: f32,
    token: u64,
    pending: Option<Tick>,
}

impl Playback {
    /// Controller over `len` steps, paused at the start. `initial_token`
    /// carries the generation across sessions so ticks scheduled against a
    /// replaced sequence can never advance the new one.
    pub fn new(len: usize, initial_token: u64) -> Self {
        Playback {
            len,
            cursor: 0,
            playing: false,
            speed: 1.0,
            token: initial_token,
            pending: None,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn token(&self) -> u64 {
        self.token
    }

    pub fn state(&self) -> PlaybackState {
        PlaybackState {
            cursor: self.cursor,
            total: self.len,
            playing: self.playing,
            speed: self.speed,
            token: self.token,
        }
    }

    fn at_end(&self) -> bool {
        self.len == 0 || self.cursor + 1 >= self.len
    }

    fn schedule(&mut self, cfg: &Config) {
        self.pending = Some(Tick {
            token: self.token,
            remaining: cfg.tick_interval(self.speed),
        });
    }

    /// Start advancing. A play at the last step is a no-op; the host replays
    /// instead.
    pub fn play(&mut self, cfg: &Config) {
        if self.playing || self.at_end() {
            return;
        }
        self.playing = true;
        self.schedule(cfg);
    }

    /// Stop advancing; the cursor stays put.
    pub fn pause(&mut self) {
        self.playing = false;
        self.pending = None;
    }

    /// Jump the cursor, clamped into range. Play/pause state is untouched; a
    /// running tick continues and advances from the new position.
    pub fn seek(&mut self, cursor: usize) {
        if self.len == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = cursor.min(self.len - 1);
    }

    /// Speed for subsequently scheduled ticks. The in-flight tick keeps the
    /// interval it was scheduled with.
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = if speed.is_finite() { speed.max(0.05) } else { 1.0 };
    }

    /// Restart from the beginning and resume playing. Bumps the generation
    /// token, expiring any tick scheduled before the restart. A single-step
    /// sequence still enters the playing state and ends on its first tick;
    /// only an empty one stays paused.
    pub fn replay(&mut self, cfg: &Config) {
        self.token = self.token.wrapping_add(1);
        self.cursor = 0;
        self.pending = None;
        if self.len > 0 {
            self.playing = true;
            self.schedule(cfg);
        } else {
            self.playing = false;
        }
    }

    /// Pump time forward. A large `dt` can retire several ticks in one pass;
    /// each advancement is reported in order.
    pub fn update(&mut self, dt: f32, cfg: &Config) -> Vec<TickEvent> {
        let mut events = Vec::new();
        if !self.playing {
            return events;
        }
        let mut budget = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };

        while let Some(tick) = self.pending.as_mut() {
            if tick.token != self.token {
                // stale generation: expire without advancing
                self.pending = None;
                break;
            }
            if tick.remaining > budget {
                tick.remaining -= budget;
                break;
            }
            budget -= tick.remaining;
            self.pending = None;

            if self.at_end() {
                self.playing = false;
                events.push(TickEvent::Ended);
                break;
            }
            self.cursor += 1;
            events.push(TickEvent::Advanced(self.cursor));
            if self.at_end() {
                self.playing = false;
                events.push(TickEvent::Ended);
                break;
            }
            self.schedule(cfg);
        }
        events
    }
}
