//! RMII Line Layer
//!
//! Serialization of byte sequences onto the reduced-pin RMII signal
//! vocabulary and back:
//!
//! - [`RmiiSample`]: the bus state at one reference-clock edge
//! - [`encoder`]: byte sequence → ordered sample sequence
//! - [`decoder`]: live sample stream → reconstructed frame byte sequences
//!
//! RMII carries 2 data bits per 50 MHz reference-clock tick plus the
//! carrier-sense/data-valid (CRS_DV) and transmit-enable (TX_EN) control
//! lines. At 10 Mbit/s every 2-bit symbol is held for ten ticks.
//!
//! Samples are transient: the clocked bus driver owns each one for exactly
//! one tick before it is discarded or archived into a capture trace.

pub mod decoder;
pub mod encoder;

pub use decoder::{RmiiRxDecoder, RxEvent};
pub use encoder::RmiiTxSession;

// =============================================================================
// RMII Sample
// =============================================================================

/// Bus state at one reference-clock edge
///
/// On the receive-toward-DUT path the meaningful control flag is `crs_dv`;
/// on the transmit-from-DUT path it is `tx_en`. The emulator asserts the
/// pair together when it drives data, and the decoder accepts either, so
/// the same type serves both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RmiiSample {
    /// Tick at which this state was driven or sampled
    pub tick: u64,
    /// The 2-bit data pair (only the low two bits are meaningful)
    pub data: u8,
    /// Carrier-sense / data-valid control line
    pub crs_dv: bool,
    /// Transmit-enable control line
    pub tx_en: bool,
}

impl RmiiSample {
    /// Idle line state: control lines de-asserted, data zero
    ///
    /// This is the always-well-defined default the bus driver falls back to
    /// when no session is active.
    #[must_use]
    pub const fn idle(tick: u64) -> Self {
        Self {
            tick,
            data: 0,
            crs_dv: false,
            tx_en: false,
        }
    }

    /// Active line state carrying a 2-bit symbol, both control lines asserted
    #[must_use]
    pub const fn active(tick: u64, data: u8) -> Self {
        Self {
            tick,
            data: data & 0b11,
            crs_dv: true,
            tx_en: true,
        }
    }

    /// Whether either control line reports valid data on the line
    #[must_use]
    pub const fn is_asserted(&self) -> bool {
        self.crs_dv || self.tx_en
    }
}

// =============================================================================
// Diagnostics
// =============================================================================

/// Counters for locally recovered framing faults
///
/// Framing errors never abort a scenario; they are counted here and exposed
/// alongside the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Diagnostics {
    /// Carrier assertions shorter than one byte, discarded by the decoder
    pub glitches: u32,
    /// Captured frames that failed codec validation
    pub framing_errors: u32,
}

impl Diagnostics {
    /// Record a carrier glitch
    pub fn record_glitch(&mut self) {
        self.glitches += 1;
    }

    /// Record a frame that failed validation
    pub fn record_framing_error(&mut self) {
        self.framing_errors += 1;
    }
}
