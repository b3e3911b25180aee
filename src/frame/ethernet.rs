//! Ethernet II frame codec
//!
//! Converts between the logical [`EthernetFrame`] and the flat byte sequence
//! an RMII transceiver carries: 7 preamble bytes and the start frame
//! delimiter, header fields in network byte order, payload zero-padded to
//! the 46-byte minimum, and a trailing frame check sequence.

use alloc::vec::Vec;

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::constants::{
    ETH_HEADER_SIZE, FCS_SIZE, MIN_FRAME_SIZE, MIN_PAYLOAD_SIZE, PREAMBLE_BYTE, PREAMBLE_LEN,
    SFD_BYTE,
};
use crate::error::{FramingError, FramingResult};
use crate::frame::fcs::frame_check_sequence;

/// Broadcast MAC address
pub const BROADCAST_MAC: [u8; 6] = [0xFF; 6];

// =============================================================================
// EtherType
// =============================================================================

/// EtherType field of an Ethernet II frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EtherType {
    /// Internet Protocol version 4 (0x0800)
    Ipv4,
    /// Address Resolution Protocol (0x0806)
    Arp,
    /// Any other EtherType or length value
    Unknown(u16),
}

impl From<u16> for EtherType {
    fn from(raw: u16) -> Self {
        match raw {
            0x0800 => EtherType::Ipv4,
            0x0806 => EtherType::Arp,
            other => EtherType::Unknown(other),
        }
    }
}

impl From<EtherType> for u16 {
    fn from(ethertype: EtherType) -> Self {
        match ethertype {
            EtherType::Ipv4 => 0x0800,
            EtherType::Arp => 0x0806,
            EtherType::Unknown(other) => other,
        }
    }
}

// =============================================================================
// Ethernet Frame
// =============================================================================

/// A logical Ethernet II frame
///
/// The payload is stored as given; padding to the 46-byte minimum happens
/// during [`encode`](EthernetFrame::encode). A decoded frame keeps whatever
/// padding arrived on the line, so round trips are equal modulo padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EthernetFrame {
    /// Destination MAC address
    pub dst: [u8; 6],
    /// Source MAC address
    pub src: [u8; 6],
    /// EtherType of the payload
    pub ethertype: EtherType,
    /// Payload bytes (padded on encode if shorter than 46)
    pub payload: Vec<u8>,
}

impl EthernetFrame {
    /// Create a frame from its header fields and payload
    #[must_use]
    pub fn new(dst: [u8; 6], src: [u8; 6], ethertype: EtherType, payload: Vec<u8>) -> Self {
        Self {
            dst,
            src,
            ethertype,
            payload,
        }
    }

    /// Serialize to the full line byte sequence
    ///
    /// Output layout: preamble, SFD, destination MAC, source MAC, EtherType,
    /// payload zero-padded to 46 bytes, frame check sequence over
    /// destination..payload appended least-significant byte first.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let padded_len = self.payload.len().max(MIN_PAYLOAD_SIZE);
        let mut bytes =
            Vec::with_capacity(PREAMBLE_LEN + 1 + ETH_HEADER_SIZE + padded_len + FCS_SIZE);

        bytes.extend_from_slice(&[PREAMBLE_BYTE; PREAMBLE_LEN]);
        bytes.push(SFD_BYTE);

        let body_start = bytes.len();
        bytes.extend_from_slice(&self.dst);
        bytes.extend_from_slice(&self.src);
        let mut ethertype = [0u8; 2];
        BigEndian::write_u16(&mut ethertype, self.ethertype.into());
        bytes.extend_from_slice(&ethertype);
        bytes.extend_from_slice(&self.payload);
        bytes.resize(body_start + ETH_HEADER_SIZE + padded_len, 0);

        let fcs = frame_check_sequence(&bytes[body_start..]);
        let mut trailer = [0u8; FCS_SIZE];
        LittleEndian::write_u32(&mut trailer, fcs);
        bytes.extend_from_slice(&trailer);

        bytes
    }

    /// Parse a captured line byte sequence back into a frame
    ///
    /// Leading preamble bytes and the SFD are stripped if present. Fails
    /// with [`FramingError::Truncated`] below the 64-byte frame minimum and
    /// [`FramingError::ChecksumMismatch`] when the trailing check sequence
    /// disagrees with the recomputed value.
    pub fn decode(bytes: &[u8]) -> FramingResult<Self> {
        let body = strip_preamble(bytes);

        if body.len() < MIN_FRAME_SIZE {
            return Err(FramingError::Truncated);
        }

        let fcs_start = body.len() - FCS_SIZE;
        let received_fcs = LittleEndian::read_u32(&body[fcs_start..]);
        let computed_fcs = frame_check_sequence(&body[..fcs_start]);
        if received_fcs != computed_fcs {
            return Err(FramingError::ChecksumMismatch);
        }

        let mut dst = [0u8; 6];
        let mut src = [0u8; 6];
        dst.copy_from_slice(&body[0..6]);
        src.copy_from_slice(&body[6..12]);
        let ethertype = EtherType::from(BigEndian::read_u16(&body[12..14]));

        Ok(Self {
            dst,
            src,
            ethertype,
            payload: body[ETH_HEADER_SIZE..fcs_start].to_vec(),
        })
    }

    /// Header and padded payload without preamble, SFD or check sequence
    ///
    /// This is the representation stored in capture traces (the conventional
    /// pcap record content).
    #[must_use]
    pub fn wire_bytes(&self) -> Vec<u8> {
        let padded_len = self.payload.len().max(MIN_PAYLOAD_SIZE);
        let mut bytes = Vec::with_capacity(ETH_HEADER_SIZE + padded_len);
        bytes.extend_from_slice(&self.dst);
        bytes.extend_from_slice(&self.src);
        let mut ethertype = [0u8; 2];
        BigEndian::write_u16(&mut ethertype, self.ethertype.into());
        bytes.extend_from_slice(&ethertype);
        bytes.extend_from_slice(&self.payload);
        bytes.resize(ETH_HEADER_SIZE + padded_len, 0);
        bytes
    }
}

/// Skip the leading preamble run and SFD, if present
fn strip_preamble(bytes: &[u8]) -> &[u8] {
    let mut idx = 0;
    while idx < bytes.len() && idx < PREAMBLE_LEN && bytes[idx] == PREAMBLE_BYTE {
        idx += 1;
    }
    if idx < bytes.len() && bytes[idx] == SFD_BYTE {
        idx += 1;
    } else {
        // No SFD: the input never carried a preamble, parse from the start
        idx = 0;
    }
    &bytes[idx..]
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn sample_frame() -> EthernetFrame {
        EthernetFrame::new(
            [0x02, 0x00, 0x00, 0x00, 0x00, 0x01],
            [0x02, 0x00, 0x00, 0x00, 0x00, 0x02],
            EtherType::Ipv4,
            vec![0xAB; 100],
        )
    }

    #[test]
    fn encode_layout() {
        let frame = sample_frame();
        let bytes = frame.encode();

        assert_eq!(&bytes[..7], &[PREAMBLE_BYTE; 7]);
        assert_eq!(bytes[7], SFD_BYTE);
        assert_eq!(&bytes[8..14], &frame.dst);
        assert_eq!(&bytes[14..20], &frame.src);
        assert_eq!(&bytes[20..22], &[0x08, 0x00]);
        // preamble(8) + header(14) + payload(100) + fcs(4)
        assert_eq!(bytes.len(), 126);
    }

    #[test]
    fn round_trip() {
        let frame = sample_frame();
        let decoded = EthernetFrame::decode(&frame.encode()).unwrap();
        assert_eq!(decoded, frame);
    }

    #[test]
    fn round_trip_pads_short_payload() {
        let frame = EthernetFrame::new(
            BROADCAST_MAC,
            [0x02, 0x00, 0x00, 0x00, 0x00, 0x02],
            EtherType::Arp,
            vec![0x01, 0x02, 0x03],
        );
        let decoded = EthernetFrame::decode(&frame.encode()).unwrap();

        assert_eq!(decoded.dst, frame.dst);
        assert_eq!(decoded.ethertype, EtherType::Arp);
        assert_eq!(decoded.payload.len(), MIN_PAYLOAD_SIZE);
        assert_eq!(&decoded.payload[..3], &[0x01, 0x02, 0x03]);
        assert!(decoded.payload[3..].iter().all(|&b| b == 0));
    }

    #[test]
    fn decode_short_input_is_truncated() {
        for len in [0, 1, 13, 63] {
            let bytes = vec![0u8; len];
            assert_eq!(
                EthernetFrame::decode(&bytes),
                Err(FramingError::Truncated),
                "length {len} should be truncated"
            );
        }
    }

    #[test]
    fn decode_corrupted_fcs() {
        let mut bytes = sample_frame().encode();
        let len = bytes.len();
        // Flip bits in the trailing check sequence
        for b in &mut bytes[len - 4..] {
            *b ^= 0xFF;
        }
        assert_eq!(
            EthernetFrame::decode(&bytes),
            Err(FramingError::ChecksumMismatch)
        );
    }

    #[test]
    fn decode_corrupted_payload() {
        let mut bytes = sample_frame().encode();
        bytes[40] ^= 0x01;
        assert_eq!(
            EthernetFrame::decode(&bytes),
            Err(FramingError::ChecksumMismatch)
        );
    }

    #[test]
    fn decode_without_preamble() {
        let frame = sample_frame();
        let bytes = frame.encode();
        let decoded = EthernetFrame::decode(&bytes[8..]).unwrap();
        assert_eq!(decoded, frame);
    }

    #[test]
    fn wire_bytes_excludes_preamble_and_fcs() {
        let frame = sample_frame();
        let wire = frame.wire_bytes();
        let full = frame.encode();
        assert_eq!(wire.len(), full.len() - 8 - 4);
        assert_eq!(&full[8..full.len() - 4], &wire[..]);
    }

    #[test]
    fn ethertype_raw_round_trip() {
        assert_eq!(EtherType::from(0x0806), EtherType::Arp);
        assert_eq!(u16::from(EtherType::Arp), 0x0806);
        assert_eq!(EtherType::from(0x88CC), EtherType::Unknown(0x88CC));
        assert_eq!(u16::from(EtherType::Unknown(0x88CC)), 0x88CC);
    }

    // Cross-check our codec against an independent wire implementation
    #[test]
    fn encode_agrees_with_smoltcp() {
        use smoltcp::wire::{EthernetFrame as SmolFrame, EthernetProtocol};

        let frame = sample_frame();
        let bytes = frame.encode();
        // smoltcp sees the frame without preamble/SFD and FCS
        let smol = SmolFrame::new_checked(&bytes[8..bytes.len() - 4]).unwrap();

        assert_eq!(smol.dst_addr().as_bytes(), &frame.dst);
        assert_eq!(smol.src_addr().as_bytes(), &frame.src);
        assert_eq!(smol.ethertype(), EthernetProtocol::Ipv4);
        assert_eq!(smol.payload(), &frame.payload[..]);
    }
}
