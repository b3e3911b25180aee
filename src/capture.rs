//! Capture Trace
//!
//! Ordered list of captured frames with tick timestamps, exportable as a
//! classic pcap container for post-hoc inspection with standard tooling.
//!
//! Record layout is the conventional capture-file format: a global header
//! (magic 0xa1b2c3d4, version 2.4, linktype 1 for Ethernet) followed by one
//! record per frame carrying seconds/microseconds timestamps, captured and
//! original lengths, and the raw frame bytes without preamble/SFD.

use alloc::vec::Vec;

use byteorder::{ByteOrder, LittleEndian};

use crate::constants::RMII_TICK_NS;

/// Classic pcap magic, microsecond timestamps, little-endian
const PCAP_MAGIC: u32 = 0xA1B2_C3D4;
/// pcap format version 2.4
const PCAP_VERSION: (u16, u16) = (2, 4);
/// Link type 1: Ethernet
const LINKTYPE_ETHERNET: u32 = 1;
/// Snapshot length covering any Ethernet frame
const PCAP_SNAPLEN: u32 = 65_535;

/// Global pcap header size in bytes
const GLOBAL_HEADER_LEN: usize = 24;
/// Per-record pcap header size in bytes
const RECORD_HEADER_LEN: usize = 16;

// =============================================================================
// Captured Frame
// =============================================================================

/// One captured frame with its arrival tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedFrame {
    /// Tick at which the frame completed on the line
    pub tick: u64,
    /// Raw Ethernet frame bytes (header + payload, no preamble/SFD/FCS)
    pub bytes: Vec<u8>,
}

impl CapturedFrame {
    /// Arrival time in nanoseconds of simulated time
    #[must_use]
    pub const fn timestamp_ns(&self) -> u64 {
        self.tick * RMII_TICK_NS as u64
    }
}

// =============================================================================
// Capture Trace
// =============================================================================

/// Ordered trace of captured frames
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptureTrace {
    records: Vec<CapturedFrame>,
}

impl CaptureTrace {
    /// Create an empty trace
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a frame in arrival order
    pub fn push(&mut self, tick: u64, bytes: Vec<u8>) {
        self.records.push(CapturedFrame { tick, bytes });
    }

    /// Number of captured frames
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the trace is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Captured frames in arrival order
    pub fn iter(&self) -> core::slice::Iter<'_, CapturedFrame> {
        self.records.iter()
    }

    /// Serialize the trace as a classic pcap capture
    #[must_use]
    pub fn to_pcap_bytes(&self) -> Vec<u8> {
        let records_len: usize = self
            .records
            .iter()
            .map(|r| RECORD_HEADER_LEN + r.bytes.len())
            .sum();
        let mut out = Vec::with_capacity(GLOBAL_HEADER_LEN + records_len);

        let mut word = [0u8; 4];
        let mut half = [0u8; 2];

        LittleEndian::write_u32(&mut word, PCAP_MAGIC);
        out.extend_from_slice(&word);
        LittleEndian::write_u16(&mut half, PCAP_VERSION.0);
        out.extend_from_slice(&half);
        LittleEndian::write_u16(&mut half, PCAP_VERSION.1);
        out.extend_from_slice(&half);
        // thiszone and sigfigs are always zero
        out.extend_from_slice(&[0u8; 8]);
        LittleEndian::write_u32(&mut word, PCAP_SNAPLEN);
        out.extend_from_slice(&word);
        LittleEndian::write_u32(&mut word, LINKTYPE_ETHERNET);
        out.extend_from_slice(&word);

        for record in &self.records {
            let ns = record.timestamp_ns();
            let ts_sec = (ns / 1_000_000_000) as u32;
            let ts_usec = ((ns % 1_000_000_000) / 1_000) as u32;
            let len = record.bytes.len() as u32;

            LittleEndian::write_u32(&mut word, ts_sec);
            out.extend_from_slice(&word);
            LittleEndian::write_u32(&mut word, ts_usec);
            out.extend_from_slice(&word);
            // Nothing is truncated in a simulated capture
            LittleEndian::write_u32(&mut word, len);
            out.extend_from_slice(&word);
            LittleEndian::write_u32(&mut word, len);
            out.extend_from_slice(&word);
            out.extend_from_slice(&record.bytes);
        }

        out
    }

    /// Write the trace as a classic pcap capture
    #[cfg(feature = "std")]
    pub fn write_pcap<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.to_pcap_bytes())
    }
}

impl<'a> IntoIterator for &'a CaptureTrace {
    type Item = &'a CapturedFrame;
    type IntoIter = core::slice::Iter<'a, CapturedFrame>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
