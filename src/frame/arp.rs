//! ARP message codec
//!
//! Nested codec for the 28-byte payload of EtherType 0x0806 frames. Only the
//! Ethernet/IPv4 pair (hardware type 1 with 6-byte addresses, protocol type
//! 0x0800 with 4-byte addresses) is decodable; anything else fails with an
//! unsupported-type error.

use alloc::vec::Vec;

use byteorder::{BigEndian, ByteOrder};

use crate::constants::{ARP_HW_ADDR_LEN, ARP_HW_ETHERNET, ARP_MESSAGE_LEN, ARP_PROTO_ADDR_LEN};
use crate::error::{FramingError, FramingResult};

/// ARP protocol type for IPv4 (same namespace as EtherType)
const ARP_PROTO_IPV4: u16 = 0x0800;

// =============================================================================
// ARP Operation
// =============================================================================

/// ARP operation code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ArpOperation {
    /// Request (1)
    Request,
    /// Reply (2)
    Reply,
    /// Any other opcode
    Unknown(u16),
}

impl From<u16> for ArpOperation {
    fn from(raw: u16) -> Self {
        match raw {
            1 => ArpOperation::Request,
            2 => ArpOperation::Reply,
            other => ArpOperation::Unknown(other),
        }
    }
}

impl From<ArpOperation> for u16 {
    fn from(op: ArpOperation) -> Self {
        match op {
            ArpOperation::Request => 1,
            ArpOperation::Reply => 2,
            ArpOperation::Unknown(other) => other,
        }
    }
}

// =============================================================================
// ARP Message
// =============================================================================

/// An Ethernet/IPv4 ARP message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ArpMessage {
    /// Operation code
    pub operation: ArpOperation,
    /// Sender hardware address
    pub sender_mac: [u8; 6],
    /// Sender protocol address
    pub sender_ip: [u8; 4],
    /// Target hardware address (all-zero in a request)
    pub target_mac: [u8; 6],
    /// Target protocol address
    pub target_ip: [u8; 4],
}

impl ArpMessage {
    /// Build a who-has request for `target_ip`
    ///
    /// The target hardware address is zero, as the request exists to learn
    /// it.
    #[must_use]
    pub fn request(sender_mac: [u8; 6], sender_ip: [u8; 4], target_ip: [u8; 4]) -> Self {
        Self {
            operation: ArpOperation::Request,
            sender_mac,
            sender_ip,
            target_mac: [0; 6],
            target_ip,
        }
    }

    /// Build the reply answering `request` on behalf of `mac`/`ip`
    #[must_use]
    pub fn reply_to(request: &ArpMessage, mac: [u8; 6], ip: [u8; 4]) -> Self {
        Self {
            operation: ArpOperation::Reply,
            sender_mac: mac,
            sender_ip: ip,
            target_mac: request.sender_mac,
            target_ip: request.sender_ip,
        }
    }

    /// Whether this is a request
    #[must_use]
    pub fn is_request(&self) -> bool {
        self.operation == ArpOperation::Request
    }

    /// Whether this is a reply
    #[must_use]
    pub fn is_reply(&self) -> bool {
        self.operation == ArpOperation::Reply
    }

    /// Serialize to the 28-byte wire layout
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(ARP_MESSAGE_LEN);
        let mut word = [0u8; 2];

        BigEndian::write_u16(&mut word, ARP_HW_ETHERNET);
        bytes.extend_from_slice(&word);
        BigEndian::write_u16(&mut word, ARP_PROTO_IPV4);
        bytes.extend_from_slice(&word);
        bytes.push(ARP_HW_ADDR_LEN);
        bytes.push(ARP_PROTO_ADDR_LEN);
        BigEndian::write_u16(&mut word, self.operation.into());
        bytes.extend_from_slice(&word);
        bytes.extend_from_slice(&self.sender_mac);
        bytes.extend_from_slice(&self.sender_ip);
        bytes.extend_from_slice(&self.target_mac);
        bytes.extend_from_slice(&self.target_ip);

        bytes
    }

    /// Parse the 28-byte wire layout
    ///
    /// Trailing bytes beyond the message (Ethernet padding) are ignored.
    pub fn decode(bytes: &[u8]) -> FramingResult<Self> {
        if bytes.len() < ARP_MESSAGE_LEN {
            return Err(FramingError::Truncated);
        }

        let hardware_type = BigEndian::read_u16(&bytes[0..2]);
        let protocol_type = BigEndian::read_u16(&bytes[2..4]);
        let hardware_len = bytes[4];
        let protocol_len = bytes[5];

        if hardware_type != ARP_HW_ETHERNET || hardware_len != ARP_HW_ADDR_LEN {
            return Err(FramingError::UnsupportedHardwareType);
        }
        if protocol_type != ARP_PROTO_IPV4 || protocol_len != ARP_PROTO_ADDR_LEN {
            return Err(FramingError::UnsupportedProtocolType);
        }

        let operation = ArpOperation::from(BigEndian::read_u16(&bytes[6..8]));

        let mut sender_mac = [0u8; 6];
        let mut sender_ip = [0u8; 4];
        let mut target_mac = [0u8; 6];
        let mut target_ip = [0u8; 4];
        sender_mac.copy_from_slice(&bytes[8..14]);
        sender_ip.copy_from_slice(&bytes[14..18]);
        target_mac.copy_from_slice(&bytes[18..24]);
        target_ip.copy_from_slice(&bytes[24..28]);

        Ok(Self {
            operation,
            sender_mac,
            sender_ip,
            target_mac,
            target_ip,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
