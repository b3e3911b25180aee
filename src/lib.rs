//! RMII PHY Simulator
//!
//! A cycle-accurate emulator of the RMII Ethernet physical-layer interface,
//! paired with a protocol-conformance test driver that injects an ARP
//! request and verifies the device under test's reply.
//!
//! # Architecture
//!
//! The simulator is organized leaf-first:
//!
//! 1. **Frame Codec** ([`frame`]): logical Ethernet/ARP frames ↔ flat line
//!    bytes, including preamble/SFD, padding and FCS
//! 2. **RMII Line Layer** ([`phy`]): line bytes ↔ 2-bit-per-tick
//!    [`RmiiSample`](phy::RmiiSample) sequences with carrier-sense/data-valid
//!    and transmit-enable semantics
//! 3. **Clocked Bus Driver** ([`bus`]): the sole owner of simulated time,
//!    advancing encoder, decoder and waiters in lock-step, plus the
//!    timeout race controller
//! 4. **Protocol Verifier** ([`verifier`]): the end-to-end ARP scenario with
//!    a typed verdict, fault counters and an exportable capture trace
//!
//! The device under test sits behind the [`bus::DutModel`] trait: the
//! driver drives its receive side and samples its transmit side every
//! reference-clock tick.
//!
//! # Concurrency Model
//!
//! Single-threaded cooperative: the only notion of forward progress is the
//! bus driver's tick, and every "concurrent" activity (transmission,
//! reception, deadline countdown) is a state machine advanced at most one
//! step per tick. Within a tick the driver samples before it drives, and
//! waiter notifications fire in registration order, so identical inputs
//! always reproduce identical runs.
//!
//! # Example
//!
//! ```ignore
//! use rmii_phy_sim::{ArpConformanceTest, ScenarioConfig};
//!
//! let config = ScenarioConfig::new()
//!     .with_target_ip([192, 168, 1, 20])
//!     .with_timeout_us(50);
//!
//! let report = ArpConformanceTest::new(config).run(&mut dut);
//! assert!(report.verdict.is_pass());
//!
//! // Export everything seen on the line for inspection in Wireshark
//! let mut file = std::fs::File::create("arp_packets.cap")?;
//! report.trace.write_pcap(&mut file)?;
//! ```
//!
//! # Features
//!
//! - `std` (default): pcap file export via `std::io::Write`
//! - `defmt`: defmt formatting for error, config and sample types

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod bus;
pub mod capture;
pub mod config;
pub mod constants;
pub mod error;
pub mod frame;
pub mod phy;
pub mod verifier;

#[cfg(test)]
pub mod test_utils;

pub use bus::{race_receive, BusEvent, CaptureResult, ClockedBusDriver, DutModel, WaiterId};
pub use capture::{CaptureTrace, CapturedFrame};
pub use config::{ScenarioConfig, Speed};
pub use error::{ConfigError, Error, FramingError, Result};
pub use frame::{ArpMessage, ArpOperation, EtherType, EthernetFrame};
pub use phy::{Diagnostics, RmiiRxDecoder, RmiiSample, RmiiTxSession, RxEvent};
pub use verifier::{ArpConformanceTest, ArpField, ConformanceReport, Verdict};
