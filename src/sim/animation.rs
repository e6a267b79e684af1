//! Animation state machine
//!
//! Each entity carries an `Animator`: a current state tag, a frame index and
//! a frame timer, advanced against the host clock once per tick. Looping
//! clips wrap; non-looping clips clamp at their last frame and hold, which
//! is what makes attack and death segments "play once and stick".

use serde::{Deserialize, Serialize};

use crate::consts::FRAME_INTERVAL_MS;

/// Discrete behavior/animation state tag.
///
/// Players use `Run`, enemies use `Walk`; the remaining tags are shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionState {
    Idle,
    Run,
    Walk,
    Jump,
    Attack,
    Defend,
    Hurt,
    Dead,
}

/// One animation clip: frame count plus loop behavior
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    pub frame_count: u32,
    pub looping: bool,
}

impl Clip {
    pub fn looping(frame_count: u32) -> Self {
        Self { frame_count, looping: true }
    }

    pub fn once(frame_count: u32) -> Self {
        Self { frame_count, looping: false }
    }
}

/// Per-entity clip table, keyed by state tag
#[derive(Debug, Clone, Default)]
pub struct ClipSet {
    entries: Vec<(ActionState, Clip)>,
}

impl ClipSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, state: ActionState, clip: Clip) -> Self {
        self.entries.push((state, clip));
        self
    }

    pub fn get(&self, state: ActionState) -> Option<Clip> {
        self.entries
            .iter()
            .find(|(s, _)| *s == state)
            .map(|(_, clip)| *clip)
    }

    pub fn has(&self, state: ActionState) -> bool {
        self.get(state).is_some()
    }
}

/// Frame-timer driven animation playhead
#[derive(Debug, Clone)]
pub struct Animator {
    pub state: ActionState,
    pub frame_index: u32,
    frame_timer: f64,
    pub frame_interval: f64,
}

impl Animator {
    pub fn new(initial: ActionState) -> Self {
        Self {
            state: initial,
            frame_index: 0,
            frame_timer: 0.0,
            frame_interval: FRAME_INTERVAL_MS,
        }
    }

    /// Switch state; a no-op when already in `new`. A real transition
    /// rewinds to frame 0 and restarts the frame timer.
    pub fn set_state(&mut self, new: ActionState, now: f64) {
        if self.state != new {
            self.state = new;
            self.frame_index = 0;
            self.frame_timer = now;
        }
    }

    /// Advance the playhead if the frame interval has elapsed
    pub fn advance(&mut self, clips: &ClipSet, now: f64) {
        if now - self.frame_timer <= self.frame_interval {
            return;
        }
        if let Some(clip) = clips.get(self.state) {
            if clip.looping {
                self.frame_index = (self.frame_index + 1) % clip.frame_count;
            } else if self.frame_index < clip.frame_count - 1 {
                self.frame_index += 1;
            }
        }
        self.frame_timer = now;
    }
}
