//! RMII Line Decoder
//!
//! Purely reactive state machine that consumes one [`RmiiSample`] per
//! reference tick and reconstructs frame byte sequences from the
//! carrier-sense/data-valid transition pattern:
//!
//! ```text
//! Idle --assert--> Receiving --de-assert--> FrameComplete event --> Idle
//! ```
//!
//! The decoder never blocks and never advances time; it emits a
//! [`RxEvent::FrameComplete`] synchronously with the tick that de-asserts
//! the carrier. Assertions shorter than one byte are reported as glitches
//! and discarded.

use alloc::vec::Vec;

use crate::config::Speed;
use crate::constants::SYMBOLS_PER_BYTE;
use crate::phy::{Diagnostics, RmiiSample};

// =============================================================================
// Receive Events
// =============================================================================

/// Event emitted by the decoder on a state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RxEvent {
    /// A full carrier assertion ended; the accumulated line bytes
    /// (preamble through FCS) are ready for codec validation
    FrameComplete(Vec<u8>),
    /// A carrier assertion shorter than one byte was discarded
    Glitch,
}

// =============================================================================
// Decoder State
// =============================================================================

#[derive(Debug, Clone)]
enum RxState {
    Idle,
    Receiving {
        bytes: Vec<u8>,
        /// Byte being assembled from incoming symbols
        current: u8,
        symbol_idx: u8,
        /// Ticks remaining in the current symbol period
        hold: u32,
        /// Total ticks the carrier has been asserted
        active_ticks: u32,
    },
}

/// Reconstructs frame byte sequences from a live RMII sample stream
#[derive(Debug, Clone)]
pub struct RmiiRxDecoder {
    speed: Speed,
    state: RxState,
    diagnostics: Diagnostics,
}

impl RmiiRxDecoder {
    /// Create a decoder for the given link speed
    #[must_use]
    pub fn new(speed: Speed) -> Self {
        Self {
            speed,
            state: RxState::Idle,
            diagnostics: Diagnostics::default(),
        }
    }

    /// Advance the state machine by one sampled tick
    ///
    /// Returns an event only on the tick that completes (or discards) a
    /// carrier assertion; otherwise `None`.
    pub fn tick(&mut self, sample: &RmiiSample) -> Option<RxEvent> {
        let asserted = sample.is_asserted();

        match core::mem::replace(&mut self.state, RxState::Idle) {
            RxState::Idle if !asserted => None,
            RxState::Idle => {
                let mut bytes = Vec::new();
                let mut current = 0;
                let mut symbol_idx = 0;
                take_symbol(sample.data, &mut bytes, &mut current, &mut symbol_idx);
                self.state = RxState::Receiving {
                    bytes,
                    current,
                    symbol_idx,
                    hold: self.speed.ticks_per_symbol() - 1,
                    active_ticks: 1,
                };
                None
            }
            RxState::Receiving {
                mut bytes,
                mut current,
                mut symbol_idx,
                mut hold,
                active_ticks,
            } if asserted => {
                if hold > 0 {
                    // Mid symbol period at 10 Mbit/s; the line repeats the
                    // same pair, sample it once at the period start
                    hold -= 1;
                } else {
                    take_symbol(sample.data, &mut bytes, &mut current, &mut symbol_idx);
                    hold = self.speed.ticks_per_symbol() - 1;
                }
                self.state = RxState::Receiving {
                    bytes,
                    current,
                    symbol_idx,
                    hold,
                    active_ticks: active_ticks + 1,
                };
                None
            }
            RxState::Receiving { bytes, active_ticks, .. } => {
                if active_ticks < self.speed.ticks_per_byte() {
                    self.diagnostics.record_glitch();
                    Some(RxEvent::Glitch)
                } else {
                    // Any partial trailing byte was dropped by take_symbol
                    Some(RxEvent::FrameComplete(bytes))
                }
            }
        }
    }

    /// Discard any partially accumulated frame and return to idle
    ///
    /// Used by cancellation; holds no other resource.
    pub fn reset(&mut self) {
        self.state = RxState::Idle;
    }

    /// Fault counters accumulated so far
    #[must_use]
    pub fn diagnostics(&self) -> Diagnostics {
        self.diagnostics
    }

    /// Count a frame that failed codec validation after capture
    pub fn record_framing_error(&mut self) {
        self.diagnostics.record_framing_error();
    }
}

/// Fold one 2-bit symbol into the byte accumulator, little-symbol-first
fn take_symbol(data: u8, bytes: &mut Vec<u8>, current: &mut u8, symbol_idx: &mut u8) {
    *current |= (data & 0b11) << (2 * *symbol_idx);
    *symbol_idx += 1;
    if u32::from(*symbol_idx) == SYMBOLS_PER_BYTE {
        bytes.push(*current);
        *current = 0;
        *symbol_idx = 0;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
