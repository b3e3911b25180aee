//! Frame Codec
//!
//! Conversion between logical frames and the flat byte sequences carried on
//! the line:
//!
//! - [`ethernet`]: Ethernet II framing with preamble/SFD, padding and FCS
//! - [`arp`]: the nested ARP codec for EtherType 0x0806 payloads
//! - [`fcs`]: the 32-bit frame check sequence

pub mod arp;
pub mod ethernet;
pub mod fcs;

pub use arp::{ArpMessage, ArpOperation};
pub use ethernet::{BROADCAST_MAC, EtherType, EthernetFrame};
pub use fcs::frame_check_sequence;
