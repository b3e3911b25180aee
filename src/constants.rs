//! Centralized Constants
//!
//! Single source of truth for the magic numbers used throughout the
//! simulator.
//!
//! # Organization
//!
//! Constants are grouped by category:
//! - **Frame sizes**: Ethernet frame dimensions
//! - **Preamble**: Preamble/SFD byte values
//! - **Timing**: Reference clock and inter-frame gap defaults
//! - **ARP**: Fixed ARP header layout values

// =============================================================================
// Frame Sizes
// =============================================================================

/// Ethernet header size (dst MAC + src MAC + EtherType)
pub const ETH_HEADER_SIZE: usize = 14;

/// Frame check sequence size at end of frame
pub const FCS_SIZE: usize = 4;

/// Minimum payload size; shorter payloads are zero-padded up to this
pub const MIN_PAYLOAD_SIZE: usize = 46;

/// Maximum payload size (standard MTU)
pub const MAX_PAYLOAD_SIZE: usize = 1500;

/// Minimum frame size including FCS (header + padded payload + FCS)
pub const MIN_FRAME_SIZE: usize = ETH_HEADER_SIZE + MIN_PAYLOAD_SIZE + FCS_SIZE;

/// Maximum frame size including FCS
pub const MAX_FRAME_SIZE: usize = ETH_HEADER_SIZE + MAX_PAYLOAD_SIZE + FCS_SIZE;

// =============================================================================
// Preamble / Start Frame Delimiter
// =============================================================================

/// Preamble byte (alternating 1/0 pattern, transmitted LSB first)
pub const PREAMBLE_BYTE: u8 = 0x55;

/// Number of preamble bytes before the SFD
pub const PREAMBLE_LEN: usize = 7;

/// Start frame delimiter byte
pub const SFD_BYTE: u8 = 0xD5;

// =============================================================================
// Timing
// =============================================================================

/// RMII reference clock frequency in Hz (always 50 MHz, for both rates)
pub const RMII_CLK_HZ: u32 = 50_000_000;

/// Reference clock period in nanoseconds
pub const RMII_TICK_NS: u32 = 20;

/// Default inter-frame gap in bit times (IEEE 802.3 minimum)
pub const DEFAULT_IFG_BITS: u32 = 96;

/// Default number of stable ticks to hold reset asserted
pub const DEFAULT_RESET_HOLD_TICKS: u32 = 10;

/// Data bits carried per RMII reference-clock tick at 100 Mbit/s
pub const BITS_PER_SYMBOL: u32 = 2;

/// Symbol periods per byte (four 2-bit symbols)
pub const SYMBOLS_PER_BYTE: u32 = 4;

// =============================================================================
// ARP
// =============================================================================

/// Fixed byte length of an Ethernet/IPv4 ARP message
pub const ARP_MESSAGE_LEN: usize = 28;

/// ARP hardware type for Ethernet
pub const ARP_HW_ETHERNET: u16 = 1;

/// Hardware address length for Ethernet
pub const ARP_HW_ADDR_LEN: u8 = 6;

/// Protocol address length for IPv4
pub const ARP_PROTO_ADDR_LEN: u8 = 4;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_size_bounds() {
        assert_eq!(MIN_FRAME_SIZE, 64);
        assert_eq!(MAX_FRAME_SIZE, 1518);
    }

    #[test]
    fn reference_clock_period() {
        assert_eq!(1_000_000_000 / RMII_CLK_HZ, RMII_TICK_NS);
    }
}
