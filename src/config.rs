//! Configuration types for the simulator and conformance scenarios

use crate::constants::{
    BITS_PER_SYMBOL, DEFAULT_IFG_BITS, DEFAULT_RESET_HOLD_TICKS, RMII_CLK_HZ,
};
use crate::error::{ConfigError, ConfigResult};

// =============================================================================
// Link Speed
// =============================================================================

/// Emulated Ethernet link speed
///
/// The RMII reference clock is 50 MHz for both rates; at 10 Mbit/s each
/// 2-bit symbol is held on the line for ten reference ticks instead of one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Speed {
    /// 10 Mbps
    Mbps10,
    /// 100 Mbps
    #[default]
    Mbps100,
}

impl Speed {
    /// Validate a nominal bit rate in Mbit/s
    ///
    /// Only the two RMII rates are supported; anything else fails with
    /// [`ConfigError::RateUnsupported`] before a session starts.
    pub const fn from_mbps(mbps: u32) -> ConfigResult<Self> {
        match mbps {
            10 => Ok(Speed::Mbps10),
            100 => Ok(Speed::Mbps100),
            _ => Err(ConfigError::RateUnsupported),
        }
    }

    /// Reference-clock ticks each 2-bit symbol is held on the line
    #[must_use]
    pub const fn ticks_per_symbol(self) -> u32 {
        match self {
            Speed::Mbps10 => 10,
            Speed::Mbps100 => 1,
        }
    }

    /// Reference-clock ticks per transmitted byte
    #[must_use]
    pub const fn ticks_per_byte(self) -> u32 {
        self.ticks_per_symbol() * crate::constants::SYMBOLS_PER_BYTE
    }

    /// Reference-clock ticks needed to cover `bits` bit times at this rate
    #[must_use]
    pub const fn bits_to_ticks(self, bits: u32) -> u32 {
        bits.div_ceil(BITS_PER_SYMBOL) * self.ticks_per_symbol()
    }

    /// Nominal bit rate in Mbit/s
    #[must_use]
    pub const fn mbps(self) -> u32 {
        match self {
            Speed::Mbps10 => 10,
            Speed::Mbps100 => 100,
        }
    }
}

// =============================================================================
// Scenario Configuration
// =============================================================================

/// Configuration for an ARP conformance scenario
///
/// Built with the builder pattern:
///
/// ```
/// use rmii_phy_sim::config::ScenarioConfig;
///
/// let config = ScenarioConfig::new()
///     .with_target_ip([192, 168, 1, 20])
///     .with_timeout_us(50)
///     .with_reset_hold_ticks(10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScenarioConfig {
    /// Emulated link speed
    pub speed: Speed,
    /// MAC address the requester sends from
    pub requester_mac: [u8; 6],
    /// Protocol address the requester claims
    pub requester_ip: [u8; 4],
    /// Protocol address being resolved
    pub target_ip: [u8; 4],
    /// Reply deadline in microseconds of simulated time
    pub timeout_us: u32,
    /// Stable reference-clock ticks to hold reset asserted before release
    pub reset_hold_ticks: u32,
    /// Inter-frame gap in bit times appended after each transmitted frame
    pub interframe_gap_bits: u32,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            speed: Speed::default(),
            requester_mac: [0x02, 0x00, 0x00, 0xBE, 0xEF, 0x01],
            requester_ip: [192, 168, 1, 100],
            target_ip: [192, 168, 1, 20],
            timeout_us: 50,
            reset_hold_ticks: DEFAULT_RESET_HOLD_TICKS,
            interframe_gap_bits: DEFAULT_IFG_BITS,
        }
    }
}

impl ScenarioConfig {
    /// Create a configuration with the default scenario values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the link speed from a nominal rate in Mbit/s
    ///
    /// Unsupported rates are rejected at session start; see
    /// [`Speed::from_mbps`].
    pub fn with_rate_mbps(mut self, mbps: u32) -> ConfigResult<Self> {
        self.speed = Speed::from_mbps(mbps)?;
        Ok(self)
    }

    /// Set the link speed directly
    #[must_use]
    pub fn with_speed(mut self, speed: Speed) -> Self {
        self.speed = speed;
        self
    }

    /// Set the requester's MAC address
    #[must_use]
    pub fn with_requester_mac(mut self, mac: [u8; 6]) -> Self {
        self.requester_mac = mac;
        self
    }

    /// Set the requester's protocol address
    #[must_use]
    pub fn with_requester_ip(mut self, ip: [u8; 4]) -> Self {
        self.requester_ip = ip;
        self
    }

    /// Set the protocol address to resolve
    #[must_use]
    pub fn with_target_ip(mut self, ip: [u8; 4]) -> Self {
        self.target_ip = ip;
        self
    }

    /// Set the reply deadline in microseconds of simulated time
    #[must_use]
    pub fn with_timeout_us(mut self, timeout_us: u32) -> Self {
        self.timeout_us = timeout_us;
        self
    }

    /// Set the number of stable ticks reset is held asserted
    #[must_use]
    pub fn with_reset_hold_ticks(mut self, ticks: u32) -> Self {
        self.reset_hold_ticks = ticks;
        self
    }

    /// Set the inter-frame gap in bit times
    #[must_use]
    pub fn with_interframe_gap_bits(mut self, bits: u32) -> Self {
        self.interframe_gap_bits = bits;
        self
    }

    /// Reply deadline converted to reference-clock ticks
    ///
    /// One microsecond is 50 ticks at the 50 MHz reference.
    #[must_use]
    pub const fn timeout_ticks(&self) -> u64 {
        self.timeout_us as u64 * (RMII_CLK_HZ / 1_000_000) as u64
    }

    /// Validate the configuration before a scenario starts
    pub const fn validate(&self) -> ConfigResult<()> {
        if self.timeout_us == 0 {
            return Err(ConfigError::InvalidConfig);
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_from_mbps_supported() {
        assert_eq!(Speed::from_mbps(10), Ok(Speed::Mbps10));
        assert_eq!(Speed::from_mbps(100), Ok(Speed::Mbps100));
    }

    #[test]
    fn speed_mbps_round_trips() {
        for speed in [Speed::Mbps10, Speed::Mbps100] {
            assert_eq!(Speed::from_mbps(speed.mbps()), Ok(speed));
        }
    }

    #[test]
    fn speed_from_mbps_unsupported() {
        assert_eq!(Speed::from_mbps(1000), Err(ConfigError::RateUnsupported));
        assert_eq!(Speed::from_mbps(0), Err(ConfigError::RateUnsupported));
        assert_eq!(Speed::from_mbps(42), Err(ConfigError::RateUnsupported));
    }

    #[test]
    fn ticks_per_symbol() {
        assert_eq!(Speed::Mbps100.ticks_per_symbol(), 1);
        assert_eq!(Speed::Mbps10.ticks_per_symbol(), 10);
        assert_eq!(Speed::Mbps100.ticks_per_byte(), 4);
        assert_eq!(Speed::Mbps10.ticks_per_byte(), 40);
    }

    #[test]
    fn interframe_gap_in_ticks() {
        // 96 bit times = 48 symbols
        assert_eq!(Speed::Mbps100.bits_to_ticks(96), 48);
        assert_eq!(Speed::Mbps10.bits_to_ticks(96), 480);
    }

    #[test]
    fn default_scenario_matches_reference_harness() {
        let config = ScenarioConfig::new();
        assert_eq!(config.target_ip, [192, 168, 1, 20]);
        assert_eq!(config.timeout_us, 50);
        assert_eq!(config.reset_hold_ticks, 10);
        assert_eq!(config.timeout_ticks(), 2500);
    }

    #[test]
    fn builder_chains() {
        let config = ScenarioConfig::new()
            .with_rate_mbps(10)
            .unwrap()
            .with_target_ip([10, 0, 0, 1])
            .with_timeout_us(100)
            .with_reset_hold_ticks(2);

        assert_eq!(config.speed, Speed::Mbps10);
        assert_eq!(config.target_ip, [10, 0, 0, 1]);
        assert_eq!(config.timeout_ticks(), 5000);
        assert_eq!(config.reset_hold_ticks, 2);
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = ScenarioConfig::new().with_timeout_us(0);
        assert_eq!(config.validate(), Err(ConfigError::InvalidConfig));
    }
}
