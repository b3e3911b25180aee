//! IEEE 802.3 frame check sequence
//!
//! Bitwise CRC-32 with the reflected polynomial 0xEDB88320, computed over
//! destination MAC through payload. The value is appended to the frame
//! least-significant byte first, which is the order it appears on the wire.

const CRC32_POLYNOMIAL: u32 = 0xEDB8_8320;

/// Compute the frame check sequence over `data`
#[must_use]
pub fn frame_check_sequence(data: &[u8]) -> u32 {
    let mut crc: u32 = 0xFFFF_FFFF;

    for &byte in data {
        crc ^= byte as u32;
        for _ in 0..8 {
            if (crc & 1) != 0 {
                crc = (crc >> 1) ^ CRC32_POLYNOMIAL;
            } else {
                crc >>= 1;
            }
        }
    }

    !crc
}
