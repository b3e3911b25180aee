//! Clocked Bus Driver
//!
//! The single owner of simulated time. On each reference-clock tick the
//! driver, in fixed order:
//!
//! 1. samples the transmit-from-DUT interface and feeds the observed
//!    [`RmiiSample`] into the line decoder (sample before drive),
//! 2. pulls the next sample from the active transmit session (or the idle
//!    line state) and drives it onto the receive-toward-DUT interface,
//! 3. advances the tick counter and fires due waiters in the order they
//!    were registered.
//!
//! All "concurrent" activity (encoder transmission, decoder reception,
//! deadline countdown) is modeled as independent state machines advanced at
//! most one step per tick, which makes runs deterministic and reproducible.
//!
//! Only one transmit session may be in flight; starting a second fails with
//! [`ConfigError::BusBusy`] before any tick is driven.

pub mod race;

pub use race::{race_receive, CaptureResult};

use alloc::vec::Vec;

use crate::config::Speed;
use crate::error::{ConfigError, ConfigResult};
use crate::phy::{Diagnostics, RmiiRxDecoder, RmiiSample, RmiiTxSession, RxEvent};

// =============================================================================
// DUT Interface
// =============================================================================

/// Signal interface of the device under test
///
/// The bus driver drives the DUT's receive side and samples its transmit
/// side; the trait is the seam where a real simulation backend or a test
/// mock plugs in.
///
/// Call order per tick is fixed: [`sample_tx`](DutModel::sample_tx) first,
/// then [`drive_rx`](DutModel::drive_rx). Implementations advance their own
/// state in `drive_rx`, which is invoked exactly once per tick.
pub trait DutModel {
    /// Drive the active-low reset line (`true` = reset asserted)
    fn set_reset(&mut self, asserted: bool);

    /// State the DUT is currently driving on its transmit pins
    fn sample_tx(&mut self) -> RmiiSample;

    /// Present the receive-side line state for this tick
    fn drive_rx(&mut self, sample: RmiiSample);
}

// =============================================================================
// Waiters
// =============================================================================

/// Handle for a scheduled tick notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WaiterId(u32);

#[derive(Debug, Clone, Copy)]
struct Waiter {
    id: WaiterId,
    due_tick: u64,
}

// =============================================================================
// Bus Events
// =============================================================================

/// Events produced while processing one tick
///
/// Decoder events for a tick are reported before waiter notifications for
/// the same tick, so a frame completing exactly at a deadline is observed
/// first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusEvent {
    /// The decoder reassembled a complete line byte sequence
    FrameComplete {
        /// Captured line bytes, preamble through FCS
        bytes: Vec<u8>,
        /// Tick of the carrier de-assertion that completed the frame
        tick: u64,
    },
    /// The decoder discarded a sub-byte carrier assertion
    Glitch {
        /// Tick of the de-assertion
        tick: u64,
    },
    /// The active transmit session finished its data and inter-frame gap
    TxComplete {
        /// Tick on which the session drained
        tick: u64,
    },
    /// A scheduled waiter's tick arrived
    WaiterDue {
        /// The handle returned at registration
        id: WaiterId,
        /// The tick the waiter was scheduled for
        tick: u64,
    },
}

// =============================================================================
// Clocked Bus Driver
// =============================================================================

/// Owns the reference clock and schedules all signal transitions and samples
#[derive(Debug)]
pub struct ClockedBusDriver {
    tick: u64,
    speed: Speed,
    tx_session: Option<RmiiTxSession>,
    decoder: RmiiRxDecoder,
    waiters: Vec<Waiter>,
    next_waiter_id: u32,
}

impl ClockedBusDriver {
    /// Create a driver for the given link speed with an idle line
    #[must_use]
    pub fn new(speed: Speed) -> Self {
        Self {
            tick: 0,
            speed,
            tx_session: None,
            decoder: RmiiRxDecoder::new(speed),
            waiters: Vec::new(),
            next_waiter_id: 0,
        }
    }

    /// Current value of the monotonically increasing tick counter
    #[must_use]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Link speed the bus is clocked for
    #[must_use]
    pub fn speed(&self) -> Speed {
        self.speed
    }

    /// Begin driving a line byte sequence toward the DUT
    ///
    /// Fails with [`ConfigError::BusBusy`] while a previous session is still
    /// in flight; the in-flight session is unaffected.
    pub fn start_transmit(&mut self, bytes: Vec<u8>, gap_bits: u32) -> ConfigResult<()> {
        if self.tx_session.as_ref().is_some_and(|s| !s.is_done()) {
            return Err(ConfigError::BusBusy);
        }
        self.tx_session = Some(RmiiTxSession::new(bytes, self.speed, gap_bits));
        Ok(())
    }

    /// Whether a transmit session is still in flight
    #[must_use]
    pub fn is_tx_active(&self) -> bool {
        self.tx_session.as_ref().is_some_and(|s| !s.is_done())
    }

    /// Register a notification for `due_tick`
    ///
    /// Waiters due on the same tick fire in registration order.
    pub fn schedule_at(&mut self, due_tick: u64) -> WaiterId {
        let id = WaiterId(self.next_waiter_id);
        self.next_waiter_id += 1;
        self.waiters.push(Waiter { id, due_tick });
        id
    }

    /// Cancel a pending waiter
    ///
    /// Cancellation never blocks and cancelling an already-fired waiter is a
    /// no-op.
    pub fn cancel(&mut self, id: WaiterId) {
        self.waiters.retain(|w| w.id != id);
    }

    /// Discard any partially accumulated receive state
    pub fn reset_decoder(&mut self) {
        self.decoder.reset();
    }

    /// Fault counters accumulated by the receive path
    #[must_use]
    pub fn diagnostics(&self) -> Diagnostics {
        self.decoder.diagnostics()
    }

    /// Count a captured frame that failed codec validation
    pub fn record_framing_error(&mut self) {
        self.decoder.record_framing_error();
    }

    /// Process one reference-clock tick
    ///
    /// Returns the events produced by this tick in their defined order:
    /// decoder events, transmit completion, then due waiters.
    pub fn step(&mut self, dut: &mut dyn DutModel) -> Vec<BusEvent> {
        let tick = self.tick;
        let mut events = Vec::new();

        // Sample before drive: observe the DUT's transmit pins first
        let observed = dut.sample_tx();
        match self.decoder.tick(&observed) {
            Some(RxEvent::FrameComplete(bytes)) => {
                events.push(BusEvent::FrameComplete { bytes, tick });
            }
            Some(RxEvent::Glitch) => events.push(BusEvent::Glitch { tick }),
            None => {}
        }

        // Drive the receive-toward-DUT interface
        let driven = match &mut self.tx_session {
            Some(session) if !session.is_done() => {
                let sample = session.next_sample(tick);
                if session.is_done() {
                    events.push(BusEvent::TxComplete { tick });
                }
                sample
            }
            _ => RmiiSample::idle(tick),
        };
        dut.drive_rx(driven);

        self.tick += 1;

        // Waiters registered for this tick, in registration order
        let mut idx = 0;
        while idx < self.waiters.len() {
            if self.waiters[idx].due_tick <= tick {
                let waiter = self.waiters.remove(idx);
                events.push(BusEvent::WaiterDue {
                    id: waiter.id,
                    tick,
                });
            } else {
                idx += 1;
            }
        }

        events
    }

    /// Free-run for `n` ticks, discarding events
    pub fn run_ticks(&mut self, dut: &mut dyn DutModel, n: u64) {
        for _ in 0..n {
            let _ = self.step(dut);
        }
    }

    /// Run the reset sequence: assert reset, hold it for `hold_ticks` of
    /// stable clock, then de-assert
    pub fn apply_reset(&mut self, dut: &mut dyn DutModel, hold_ticks: u32) {
        dut.set_reset(true);
        self.run_ticks(dut, u64::from(hold_ticks));
        dut.set_reset(false);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
