//! Timeout Race Controller
//!
//! Races the decoder's next `FrameComplete` against a deadline scheduled on
//! the same tick stream. Both arms advance one step per tick; whichever
//! resolves first determines the outcome, and a frame completing exactly on
//! the deadline tick wins the tie.
//!
//! Cancellation is cooperative: the losing arm simply stops receiving
//! ticks. A pending deadline waiter is unregistered, a partially
//! accumulated frame is discarded, and neither ever raises an error.

use crate::bus::{BusEvent, ClockedBusDriver, DutModel};
use crate::error::FramingError;
use crate::frame::EthernetFrame;

// =============================================================================
// Capture Result
// =============================================================================

/// Terminal outcome of one receive race, immutable after creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureResult {
    /// A frame arrived and validated before (or exactly on) the deadline
    Frame {
        /// The decoded frame
        frame: EthernetFrame,
        /// Tick at which the frame completed
        tick: u64,
    },
    /// The deadline passed with no complete frame
    Timeout,
    /// A frame arrived in time but failed codec validation
    DecodeError(FramingError),
}

// =============================================================================
// Race
// =============================================================================

/// Run the bus until a frame completes or `deadline_tick` arrives
///
/// The deadline is registered as a bus waiter; decoder events for a tick
/// are observed before waiter notifications for the same tick, which makes
/// the tie-break explicit: a frame completing on the deadline tick resolves
/// as [`CaptureResult::Frame`], not [`CaptureResult::Timeout`].
pub fn race_receive(
    driver: &mut ClockedBusDriver,
    dut: &mut dyn DutModel,
    deadline_tick: u64,
) -> CaptureResult {
    let deadline = driver.schedule_at(deadline_tick);

    loop {
        let mut deadline_hit = false;

        for event in driver.step(dut) {
            match event {
                BusEvent::FrameComplete { bytes, tick } => {
                    // The frame wins same-tick ties; cancel the other arm
                    driver.cancel(deadline);
                    return match EthernetFrame::decode(&bytes) {
                        Ok(frame) => CaptureResult::Frame { frame, tick },
                        Err(error) => {
                            driver.record_framing_error();
                            CaptureResult::DecodeError(error)
                        }
                    };
                }
                BusEvent::WaiterDue { id, .. } if id == deadline => deadline_hit = true,
                // Glitches are counted by the decoder; keep waiting
                _ => {}
            }
        }

        if deadline_hit {
            // Cancel the receive arm: drop any partial accumulation
            driver.reset_decoder();
            return CaptureResult::Timeout;
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
