//! Testing utilities and mock implementations
//!
//! Mock devices under test for exercising the simulator on the host without
//! a real MAC/PHY behind the signal interface.
//!
//! Only available when running `cargo test`.

// Note: The #[cfg(test)] attribute is applied in lib.rs where this module is declared
#![allow(missing_docs)]

use alloc::vec::Vec;

use crate::bus::DutModel;
use crate::config::Speed;
use crate::constants::DEFAULT_IFG_BITS;
use crate::frame::{ArpMessage, ArpOperation, EtherType, EthernetFrame};
use crate::phy::{RmiiRxDecoder, RmiiSample, RmiiTxSession, RxEvent};

// =============================================================================
// ARP Responder DUT
// =============================================================================

/// Mock DUT that answers ARP requests for its own address
///
/// Internally runs the same line decoder/encoder machinery the simulator
/// uses: it reassembles the injected request from the receive-side samples,
/// waits a configurable number of ticks, and then drives an encoded ARP
/// reply on its transmit side.
///
/// # Example
///
/// ```ignore
/// let mut dut = ArpResponderDut::new(mac, ip, Speed::Mbps100)
///     .with_reply_delay_ticks(250);
/// let report = ArpConformanceTest::new(config).run(&mut dut);
/// ```
pub struct ArpResponderDut {
    mac: [u8; 6],
    ip: [u8; 4],
    speed: Speed,
    reply_delay_ticks: u64,
    /// Sender protocol address to claim in the reply (defaults to `ip`)
    claimed_ip: [u8; 4],
    reply_operation: ArpOperation,
    decoder: RmiiRxDecoder,
    tx: Option<RmiiTxSession>,
    pending: Option<(u64, Vec<u8>)>,
    in_reset: bool,
    tick: u64,
}

impl ArpResponderDut {
    pub fn new(mac: [u8; 6], ip: [u8; 4], speed: Speed) -> Self {
        Self {
            mac,
            ip,
            speed,
            reply_delay_ticks: 0,
            claimed_ip: ip,
            reply_operation: ArpOperation::Reply,
            decoder: RmiiRxDecoder::new(speed),
            tx: None,
            pending: None,
            in_reset: false,
            tick: 0,
        }
    }

    /// Ticks between receiving the request and starting the reply
    pub fn with_reply_delay_ticks(mut self, ticks: u64) -> Self {
        self.reply_delay_ticks = ticks;
        self
    }

    /// Claim a different sender protocol address in the reply
    pub fn with_claimed_ip(mut self, ip: [u8; 4]) -> Self {
        self.claimed_ip = ip;
        self
    }

    /// Answer with a different opcode
    pub fn with_reply_operation(mut self, operation: ArpOperation) -> Self {
        self.reply_operation = operation;
        self
    }

    fn handle_frame(&mut self, bytes: &[u8]) {
        let Ok(frame) = EthernetFrame::decode(bytes) else {
            return;
        };
        if frame.ethertype != EtherType::Arp {
            return;
        }
        let Ok(request) = ArpMessage::decode(&frame.payload) else {
            return;
        };
        if !request.is_request() || request.target_ip != self.ip {
            return;
        }

        let mut reply = ArpMessage::reply_to(&request, self.mac, self.claimed_ip);
        reply.operation = self.reply_operation;

        let reply_frame =
            EthernetFrame::new(request.sender_mac, self.mac, EtherType::Arp, reply.encode());
        self.pending = Some((self.reply_delay_ticks, reply_frame.encode()));
    }
}

impl DutModel for ArpResponderDut {
    fn set_reset(&mut self, asserted: bool) {
        self.in_reset = asserted;
        if asserted {
            self.decoder.reset();
            self.tx = None;
            self.pending = None;
        }
    }

    fn sample_tx(&mut self) -> RmiiSample {
        match &mut self.tx {
            Some(session) => {
                let sample = session.next_sample(self.tick);
                if session.is_done() {
                    self.tx = None;
                }
                sample
            }
            None => RmiiSample::idle(self.tick),
        }
    }

    fn drive_rx(&mut self, sample: RmiiSample) {
        if !self.in_reset {
            if let Some(RxEvent::FrameComplete(bytes)) = self.decoder.tick(&sample) {
                self.handle_frame(&bytes);
            }

            if let Some((countdown, bytes)) = &mut self.pending {
                if *countdown == 0 {
                    let bytes = core::mem::take(bytes);
                    self.tx = Some(RmiiTxSession::new(bytes, self.speed, DEFAULT_IFG_BITS));
                    self.pending = None;
                } else {
                    *countdown -= 1;
                }
            }
        }
        self.tick += 1;
    }
}

// =============================================================================
// Silent DUT
// =============================================================================

/// Mock DUT that never drives its transmit side
#[derive(Debug, Default)]
pub struct SilentDut {
    tick: u64,
}

impl SilentDut {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DutModel for SilentDut {
    fn set_reset(&mut self, _asserted: bool) {}

    fn sample_tx(&mut self) -> RmiiSample {
        RmiiSample::idle(self.tick)
    }

    fn drive_rx(&mut self, _sample: RmiiSample) {
        self.tick += 1;
    }
}

// =============================================================================
// Glitch DUT
// =============================================================================

/// Mock DUT that asserts transmit-enable for a sub-byte burst and nothing else
#[derive(Debug)]
pub struct GlitchDut {
    start_tick: u64,
    assert_ticks: u64,
    tick: u64,
}

impl GlitchDut {
    pub fn new(start_tick: u64, assert_ticks: u64) -> Self {
        Self {
            start_tick,
            assert_ticks,
            tick: 0,
        }
    }
}

impl DutModel for GlitchDut {
    fn set_reset(&mut self, _asserted: bool) {}

    fn sample_tx(&mut self) -> RmiiSample {
        let window = self.start_tick..self.start_tick + self.assert_ticks;
        if window.contains(&self.tick) {
            RmiiSample {
                tick: self.tick,
                data: 0b11,
                crs_dv: false,
                tx_en: true,
            }
        } else {
            RmiiSample::idle(self.tick)
        }
    }

    fn drive_rx(&mut self, _sample: RmiiSample) {
        self.tick += 1;
    }
}

// =============================================================================
// Self Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::{BusEvent, ClockedBusDriver};
    use crate::frame::BROADCAST_MAC;

    const MAC: [u8; 6] = [0x02, 0x00, 0x00, 0x00, 0x00, 0x20];
    const IP: [u8; 4] = [192, 168, 1, 20];

    #[test]
    fn responder_answers_matching_request() {
        let speed = Speed::Mbps100;
        let mut driver = ClockedBusDriver::new(speed);
        let mut dut = ArpResponderDut::new(MAC, IP, speed).with_reply_delay_ticks(10);

        let request = ArpMessage::request([0x02; 6], [192, 168, 1, 100], IP);
        let frame = EthernetFrame::new(BROADCAST_MAC, [0x02; 6], EtherType::Arp, request.encode());
        driver.start_transmit(frame.encode(), DEFAULT_IFG_BITS).unwrap();

        let mut reply = None;
        for _ in 0..5_000 {
            for event in driver.step(&mut dut) {
                if let BusEvent::FrameComplete { bytes, .. } = event {
                    reply = Some(EthernetFrame::decode(&bytes).unwrap());
                }
            }
            if reply.is_some() {
                break;
            }
        }

        let reply = reply.expect("responder should reply");
        let arp = ArpMessage::decode(&reply.payload).unwrap();
        assert!(arp.is_reply());
        assert_eq!(arp.sender_ip, IP);
        assert_eq!(arp.target_ip, [192, 168, 1, 100]);
        assert_eq!(reply.dst, [0x02; 6]);
    }

    #[test]
    fn responder_ignores_request_for_other_address() {
        let speed = Speed::Mbps100;
        let mut driver = ClockedBusDriver::new(speed);
        let mut dut = ArpResponderDut::new(MAC, IP, speed);

        let request = ArpMessage::request([0x02; 6], [192, 168, 1, 100], [192, 168, 1, 99]);
        let frame = EthernetFrame::new(BROADCAST_MAC, [0x02; 6], EtherType::Arp, request.encode());
        driver.start_transmit(frame.encode(), DEFAULT_IFG_BITS).unwrap();

        for _ in 0..5_000 {
            for event in driver.step(&mut dut) {
                assert!(
                    !matches!(event, BusEvent::FrameComplete { .. }),
                    "responder must stay silent for a foreign address"
                );
            }
        }
    }

    #[test]
    fn reset_clears_pending_reply() {
        let speed = Speed::Mbps100;
        let mut driver = ClockedBusDriver::new(speed);
        let mut dut = ArpResponderDut::new(MAC, IP, speed).with_reply_delay_ticks(1_000);

        let request = ArpMessage::request([0x02; 6], [192, 168, 1, 100], IP);
        let frame = EthernetFrame::new(BROADCAST_MAC, [0x02; 6], EtherType::Arp, request.encode());
        driver.start_transmit(frame.encode(), DEFAULT_IFG_BITS).unwrap();

        // Let the request land, then reset mid-countdown
        driver.run_ticks(&mut dut, 500);
        driver.apply_reset(&mut dut, 10);

        for _ in 0..5_000 {
            for event in driver.step(&mut dut) {
                assert!(!matches!(event, BusEvent::FrameComplete { .. }));
            }
        }
    }
}
