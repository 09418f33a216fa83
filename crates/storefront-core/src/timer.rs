//! # Timer Handles
//!
//! The carousel never sleeps. Instead it *arms* a timer by handing the app
//! layer a [`TimerToken`] plus a delay, and later receives the token back when
//! the delay elapses.
//!
//! ## Generation Checking
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  slot AutoAdvance                                                       │
//! │                                                                         │
//! │  arm()      ──► token(gen 1)   (runtime starts a 2000ms sleep)          │
//! │  arm()      ──► cancel gen 1, token(gen 2)                              │
//! │  fire(gen 1) ─► false  (late firing of a cancelled timer is ignored)    │
//! │  fire(gen 2) ─► true   (slot is disarmed, caller handles the event)     │
//! │  fire(gen 2) ─► false  (a token fires at most once)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Even if the runtime fails to abort a sleeping task in time, a stale token
//! can never drive the state machine.

use serde::{Deserialize, Serialize};

/// What a timer is for. Each purpose has its own independent slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerKind {
    /// Periodic automatic advance to the next media item.
    AutoAdvance,
    /// End of the visual cross-fade between two items.
    Transition,
    /// Resume of auto-advance after manual navigation.
    ManualCooldown,
}

/// Identifies one arming of a timer slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerToken {
    pub kind: TimerKind,
    pub generation: u64,
}

/// A single-purpose timer handle: at most one armed token at a time.
#[derive(Debug, Clone)]
pub struct TimerSlot {
    kind: TimerKind,
    generation: u64,
    armed: bool,
}

impl TimerSlot {
    pub const fn new(kind: TimerKind) -> Self {
        TimerSlot {
            kind,
            generation: 0,
            armed: false,
        }
    }

    #[inline]
    pub const fn kind(&self) -> TimerKind {
        self.kind
    }

    #[inline]
    pub const fn is_armed(&self) -> bool {
        self.armed
    }

    /// The currently armed token, if any.
    pub fn token(&self) -> Option<TimerToken> {
        self.armed.then_some(TimerToken {
            kind: self.kind,
            generation: self.generation,
        })
    }

    /// Arms the slot, replacing any pending token.
    ///
    /// Returns `(replaced, armed)`: the caller must cancel `replaced` and
    /// schedule `armed`.
    pub fn arm(&mut self) -> (Option<TimerToken>, TimerToken) {
        let replaced = self.token();
        self.generation += 1;
        self.armed = true;
        let armed = TimerToken {
            kind: self.kind,
            generation: self.generation,
        };
        (replaced, armed)
    }

    /// Disarms the slot and returns the token that must be cancelled.
    pub fn cancel(&mut self) -> Option<TimerToken> {
        let token = self.token();
        self.armed = false;
        token
    }

    /// Accepts a firing. Returns `true` only for the currently armed token,
    /// which disarms the slot.
    pub fn fire(&mut self, token: TimerToken) -> bool {
        if self.token() == Some(token) {
            self.armed = false;
            true
        } else {
            false
        }
    }
}
