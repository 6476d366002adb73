//! Typing effect for the home page hero
//!
//! The effect cycles through a list of roles: type one character at a time,
//! hold the full text, delete one character at a time, move to the next role.
//! Each `tick` is one transition; the caller owns the timer and waits
//! `Frame::delay_ms` between ticks.

use serde::Serialize;
use std::time::Duration;

use crate::config::HeroConfig;

/// Text to display and how long to wait before the next tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frame {
    pub text: String,
    pub delay_ms: u64,
}

impl Frame {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Delays between transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Speeds {
    pub typing: Duration,
    pub deleting: Duration,
    pub hold: Duration,
}

impl Default for Speeds {
    fn default() -> Self {
        Self {
            typing: Duration::from_millis(100),
            deleting: Duration::from_millis(50),
            hold: Duration::from_millis(2000),
        }
    }
}

impl From<&HeroConfig> for Speeds {
    fn from(hero: &HeroConfig) -> Self {
        Self {
            typing: Duration::from_millis(hero.typing_ms),
            deleting: Duration::from_millis(hero.deleting_ms),
            hold: Duration::from_millis(hero.hold_ms),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct State {
    role: usize,
    shown: usize,
    deleting: bool,
}

/// Typing effect state machine
#[derive(Debug, Clone)]
pub struct Typewriter {
    roles: Vec<String>,
    speeds: Speeds,
    state: State,
}

impl Typewriter {
    pub fn new(roles: Vec<String>, speeds: Speeds) -> Self {
        Self {
            roles,
            speeds,
            state: State::default(),
        }
    }

    pub fn from_config(hero: &HeroConfig) -> Self {
        Self::new(hero.roles.clone(), Speeds::from(hero))
    }

    /// Text currently displayed
    pub fn text(&self) -> String {
        self.roles
            .get(self.state.role)
            .map(|role| role.chars().take(self.state.shown).collect())
            .unwrap_or_default()
    }

    /// Advance one transition. `None` when there are no roles.
    pub fn tick(&mut self) -> Option<Frame> {
        let len = self.roles.get(self.state.role)?.chars().count();
        let state = &mut self.state;

        let delay = if !state.deleting {
            if state.shown < len {
                state.shown += 1;
                self.speeds.typing
            } else {
                state.deleting = true;
                self.speeds.hold
            }
        } else if state.shown > 0 {
            state.shown -= 1;
            self.speeds.deleting
        } else {
            state.deleting = false;
            state.role = (state.role + 1) % self.roles.len();
            self.speeds.deleting
        };

        Some(Frame {
            text: self.text(),
            delay_ms: delay.as_millis() as u64,
        })
    }

    /// Frames for one full rotation through every role, ending back at the
    /// start state.
    pub fn rotation(&self) -> Vec<Frame> {
        let mut machine = Self::new(self.roles.clone(), self.speeds);
        let mut frames = Vec::new();
        while let Some(frame) = machine.tick() {
            frames.push(frame);
            if machine.state == State::default() {
                break;
            }
        }
        frames
    }
}

impl Iterator for Typewriter {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        self.tick()
    }
}
