//! Turn-signal sweep animation state.
//!
//! The sweep advances on wall-clock time rather than tick count so a slow
//! render loop does not slow the blinker to an unfamiliar cadence.

use crate::config::UI_FREQ;

/// Glyph positions in one sweep.
pub const BLINKER_DRAW_COUNT: usize = 8;

/// Milliseconds between sweep advances.
const ADVANCE_INTERVAL_MS: f32 = 900.0 / UI_FREQ as f32;

/// Render ticks the sweep holds at the final glyph before restarting.
const HOLD_TICKS: u32 = UI_FREQ / 4;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TurnSignalClock {
    blink_index: usize,
    blink_wait: u32,
    last_advance_ms: Option<u64>,
}

impl TurnSignalClock {
    pub const fn new() -> Self {
        Self { blink_index: 0, blink_wait: 0, last_advance_ms: None }
    }

    /// Advance the animation for one render tick at wall-clock `now_ms`.
    /// Resets to the sweep start whenever both signals are off.
    pub fn tick(&mut self, now_ms: u64, active: bool) {
        if !active {
            self.blink_index = 0;
            self.blink_wait = 0;
            self.last_advance_ms = None;
            return;
        }

        if self.blink_wait > 0 {
            self.blink_wait -= 1;
            if self.blink_wait == 0 {
                self.blink_index = 0;
                self.last_advance_ms = Some(now_ms);
            }
            return;
        }

        let last = *self.last_advance_ms.get_or_insert(now_ms);
        if (now_ms.saturating_sub(last)) as f32 >= ADVANCE_INTERVAL_MS {
            self.last_advance_ms = Some(now_ms);
            if self.blink_index + 1 >= BLINKER_DRAW_COUNT {
                self.blink_wait = HOLD_TICKS;
            } else {
                self.blink_index += 1;
            }
        }
    }

    pub const fn index(&self) -> usize {
        self.blink_index
    }

    /// Alpha for glyph `i` given the current sweep position: full strength
    /// at the active index, halving with each step of distance.
    pub fn glyph_alpha(&self, base: u8, i: usize) -> u8 {
        let dist = self.blink_index.abs_diff(i) as u32;
        if dist == 0 { base } else { (base as u32 / (2 * dist)) as u8 }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
