//! RMII Line Encoder
//!
//! Serializes a line byte sequence (preamble through FCS) into the ordered
//! [`RmiiSample`] sequence a transceiver would drive: each byte as four
//! 2-bit symbols, least-significant pair first, with the control lines
//! asserted exactly for the duration of the data and a configurable
//! inter-frame gap of idle ticks afterwards.
//!
//! The session is a state machine advanced one tick at a time by the
//! clocked bus driver; it never advances time itself. Encoding is
//! deterministic: the same bytes at the same speed always produce the same
//! sample sequence.

use alloc::vec::Vec;

use crate::config::Speed;
use crate::phy::RmiiSample;

/// Transmit session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TxState {
    /// Guaranteed idle tick(s) before the carrier is asserted
    LeadIn { remaining: u32 },
    /// Driving 2-bit symbols; `hold` counts remaining ticks of the current symbol
    Data {
        byte_idx: usize,
        symbol_idx: u8,
        hold: u32,
    },
    /// Inter-frame gap after de-assertion, before the session reports done
    Gap { remaining: u32 },
    /// All samples emitted; the line stays idle
    Done,
}

/// An in-flight serialization of one frame onto the line
///
/// Produced samples are pulled by the bus driver with
/// [`next_sample`](RmiiTxSession::next_sample), one per reference tick.
#[derive(Debug, Clone)]
pub struct RmiiTxSession {
    bytes: Vec<u8>,
    speed: Speed,
    gap_ticks: u32,
    state: TxState,
}

impl RmiiTxSession {
    /// Start a session over a complete line byte sequence
    ///
    /// `gap_bits` is the inter-frame gap in bit times (96 for the 802.3
    /// minimum), converted to idle ticks at the session's speed.
    #[must_use]
    pub fn new(bytes: Vec<u8>, speed: Speed, gap_bits: u32) -> Self {
        let state = if bytes.is_empty() {
            TxState::Done
        } else {
            TxState::LeadIn { remaining: 1 }
        };
        Self {
            bytes,
            speed,
            gap_ticks: speed.bits_to_ticks(gap_bits),
            state,
        }
    }

    /// The sample to drive on the line for the current tick
    ///
    /// Advances the session by one tick. Once the session is done this
    /// keeps returning the idle state.
    pub fn next_sample(&mut self, tick: u64) -> RmiiSample {
        match self.state {
            TxState::LeadIn { remaining } => {
                self.state = if remaining > 1 {
                    TxState::LeadIn {
                        remaining: remaining - 1,
                    }
                } else {
                    TxState::Data {
                        byte_idx: 0,
                        symbol_idx: 0,
                        hold: self.speed.ticks_per_symbol(),
                    }
                };
                RmiiSample::idle(tick)
            }
            TxState::Data {
                byte_idx,
                symbol_idx,
                hold,
            } => {
                let symbol = (self.bytes[byte_idx] >> (2 * symbol_idx)) & 0b11;
                self.state = self.advance_data(byte_idx, symbol_idx, hold);
                RmiiSample::active(tick, symbol)
            }
            TxState::Gap { remaining } => {
                self.state = if remaining > 1 {
                    TxState::Gap {
                        remaining: remaining - 1,
                    }
                } else {
                    TxState::Done
                };
                RmiiSample::idle(tick)
            }
            TxState::Done => RmiiSample::idle(tick),
        }
    }

    /// Whether all data and the trailing gap have been emitted
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.state == TxState::Done
    }

    /// Whether the carrier is currently asserted
    #[must_use]
    pub fn is_data_active(&self) -> bool {
        matches!(self.state, TxState::Data { .. })
    }

    fn advance_data(&self, byte_idx: usize, symbol_idx: u8, hold: u32) -> TxState {
        // Hold the current symbol for the remainder of its period (10 Mbit/s)
        if hold > 1 {
            return TxState::Data {
                byte_idx,
                symbol_idx,
                hold: hold - 1,
            };
        }
        if symbol_idx < 3 {
            return TxState::Data {
                byte_idx,
                symbol_idx: symbol_idx + 1,
                hold: self.speed.ticks_per_symbol(),
            };
        }
        if byte_idx + 1 < self.bytes.len() {
            return TxState::Data {
                byte_idx: byte_idx + 1,
                symbol_idx: 0,
                hold: self.speed.ticks_per_symbol(),
            };
        }
        if self.gap_ticks > 0 {
            TxState::Gap {
                remaining: self.gap_ticks,
            }
        } else {
            TxState::Done
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
