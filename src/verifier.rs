//! Protocol Verifier
//!
//! Drives the end-to-end ARP conformance scenario against a device under
//! test: reset, inject an ARP request, race the reply against the deadline,
//! and validate the reply's fields. The outcome is a [`Verdict`] with a
//! typed reason, accompanied by the fault counters and the capture trace of
//! every frame seen, in arrival order.

use crate::bus::{race_receive, CaptureResult, ClockedBusDriver, DutModel};
use crate::capture::CaptureTrace;
use crate::config::ScenarioConfig;
use crate::error::{ConfigError, FramingError};
use crate::frame::{ArpMessage, EtherType, EthernetFrame, BROADCAST_MAC};
use crate::phy::Diagnostics;

// =============================================================================
// Verdict
// =============================================================================

/// ARP reply field that failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ArpField {
    /// Reply frame's EtherType is not 0x0806
    EtherType,
    /// Opcode is not Reply
    Opcode,
    /// Sender protocol address is not the probed target address
    SenderProtocolAddress,
    /// Target protocol address is not the requester's address
    TargetProtocolAddress,
}

impl ArpField {
    /// Field name for reporting
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ArpField::EtherType => "ethertype",
            ArpField::Opcode => "opcode",
            ArpField::SenderProtocolAddress => "sender protocol address",
            ArpField::TargetProtocolAddress => "target protocol address",
        }
    }
}

/// Scenario outcome with a typed reason
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Verdict {
    /// A conformant ARP reply arrived in time
    Success,
    /// The deadline passed without a complete frame
    NoReply,
    /// A reply arrived but the named field is wrong
    ProtocolViolation(ArpField),
    /// A captured frame failed codec validation
    Framing(FramingError),
    /// The scenario could not start
    Config(ConfigError),
}

impl Verdict {
    /// Whether the scenario passed
    #[must_use]
    pub const fn is_pass(&self) -> bool {
        matches!(self, Verdict::Success)
    }
}

impl core::fmt::Display for Verdict {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Verdict::Success => f.write_str("success"),
            Verdict::NoReply => f.write_str("no reply before deadline"),
            Verdict::ProtocolViolation(field) => {
                write!(f, "protocol violation: {}", field.as_str())
            }
            Verdict::Framing(e) => write!(f, "framing: {}", e.as_str()),
            Verdict::Config(e) => write!(f, "config: {}", e.as_str()),
        }
    }
}

// =============================================================================
// Conformance Report
// =============================================================================

/// Terminal artifact of one scenario run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConformanceReport {
    /// Pass/fail outcome with its reason
    pub verdict: Verdict,
    /// Locally recovered fault counters
    pub diagnostics: Diagnostics,
    /// Every captured frame (request and reply) in arrival order
    pub trace: CaptureTrace,
    /// Ticks of simulated time the scenario consumed
    pub elapsed_ticks: u64,
}

// =============================================================================
// ARP Conformance Test
// =============================================================================

/// End-to-end ARP request/reply conformance scenario
///
/// ```
/// use rmii_phy_sim::config::ScenarioConfig;
/// use rmii_phy_sim::verifier::ArpConformanceTest;
///
/// let test = ArpConformanceTest::new(
///     ScenarioConfig::new()
///         .with_target_ip([192, 168, 1, 20])
///         .with_timeout_us(50),
/// );
/// // let report = test.run(&mut dut);
/// ```
#[derive(Debug, Clone)]
pub struct ArpConformanceTest {
    config: ScenarioConfig,
}

impl ArpConformanceTest {
    /// Create a scenario from its configuration
    #[must_use]
    pub fn new(config: ScenarioConfig) -> Self {
        Self { config }
    }

    /// The scenario configuration
    #[must_use]
    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    /// Run the scenario against a device under test
    ///
    /// Configuration errors surface as a [`Verdict::Config`] before any tick
    /// is driven; framing and protocol errors become the final verdict after
    /// the run.
    pub fn run(&self, dut: &mut dyn DutModel) -> ConformanceReport {
        let mut trace = CaptureTrace::new();

        if let Err(e) = self.config.validate() {
            return ConformanceReport {
                verdict: Verdict::Config(e),
                diagnostics: Diagnostics::default(),
                trace,
                elapsed_ticks: 0,
            };
        }

        let mut driver = ClockedBusDriver::new(self.config.speed);
        driver.apply_reset(dut, self.config.reset_hold_ticks);

        let request = ArpMessage::request(
            self.config.requester_mac,
            self.config.requester_ip,
            self.config.target_ip,
        );
        let request_frame = EthernetFrame::new(
            BROADCAST_MAC,
            self.config.requester_mac,
            EtherType::Arp,
            request.encode(),
        );
        trace.push(driver.tick(), request_frame.wire_bytes());

        if let Err(e) =
            driver.start_transmit(request_frame.encode(), self.config.interframe_gap_bits)
        {
            return ConformanceReport {
                verdict: Verdict::Config(e),
                diagnostics: driver.diagnostics(),
                trace,
                elapsed_ticks: driver.tick(),
            };
        }

        let deadline = driver.tick() + self.config.timeout_ticks();
        let verdict = match race_receive(&mut driver, dut, deadline) {
            CaptureResult::Frame { frame: reply, tick } => {
                trace.push(tick, reply.wire_bytes());
                let verdict = self.check_reply(&reply);
                if matches!(verdict, Verdict::Framing(_)) {
                    driver.record_framing_error();
                }
                verdict
            }
            CaptureResult::Timeout => Verdict::NoReply,
            CaptureResult::DecodeError(e) => Verdict::Framing(e),
        };

        ConformanceReport {
            verdict,
            diagnostics: driver.diagnostics(),
            trace,
            elapsed_ticks: driver.tick(),
        }
    }

    /// Validate the captured reply field by field
    fn check_reply(&self, reply: &EthernetFrame) -> Verdict {
        if reply.ethertype != EtherType::Arp {
            return Verdict::ProtocolViolation(ArpField::EtherType);
        }

        let arp = match ArpMessage::decode(&reply.payload) {
            Ok(arp) => arp,
            Err(e) => return Verdict::Framing(e),
        };

        if !arp.is_reply() {
            return Verdict::ProtocolViolation(ArpField::Opcode);
        }
        if arp.sender_ip != self.config.target_ip {
            return Verdict::ProtocolViolation(ArpField::SenderProtocolAddress);
        }
        if arp.target_ip != self.config.requester_ip {
            return Verdict::ProtocolViolation(ArpField::TargetProtocolAddress);
        }

        Verdict::Success
    }
}

// =============================================================================
// Scenario Tests
// =============================================================================
