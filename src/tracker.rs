//! APRS tracker driver: frame construction, AFSK playback, PTT sequencing.
//!
//! This module provides the [`Tracker`] struct, the high-level transmit
//! driver tying the crate together. It owns the configuration snapshot,
//! the telemetry and message-id counters, the [`AfskModulator`], the PTT
//! (and optional power-down) GPIO lines, the [`AudioSink`], and a delay
//! provider. Every operation is a synchronous call on `&mut self`; nothing
//! is shared mutably.
//!
//! ## Transmission
//!
//! A call such as [`send_position`](Tracker::send_position) formats the
//! information field, assembles the AX.25 UI frame, and then runs one
//! transmission session:
//!
//! ```text
//! READY --send--> PTT on --lead--> preamble/frame/tail samples --drain-->
//!                 --trail--> PTT off --> READY
//! ```
//!
//! The caller blocks until PTT has been released. Builder validation
//! errors are returned before the radio is touched; a sink fault aborts
//! the session with PTT forced off and is not retried here, because APRS
//! is a best-effort broadcast and the outer loop decides when to try
//! again.
//!
//! ## Example
//!
//! ```rust
//! # use embedded_hal_mock::eh1::delay::NoopDelay;
//! # use embedded_hal_mock::eh1::digital::{Mock as Pin, State as PinState, Transaction as PinTransaction};
//! use afsk1200::afsk::AudioSink;
//! use afsk1200::ax25::Ax25Call;
//! use afsk1200::config::TrackerConfig;
//! use afsk1200::tracker::Tracker;
//!
//! struct DacSink;
//! impl AudioSink for DacSink {
//!     type Error = ();
//!     fn write(&mut self, samples: &[i16]) -> Result<usize, ()> { Ok(samples.len()) }
//!     fn drain(&mut self) -> Result<(), ()> { Ok(()) }
//! }
//!
//! # let ptt = Pin::new(&[
//! #     PinTransaction::set(PinState::Low),
//! #     PinTransaction::set(PinState::High),
//! #     PinTransaction::set(PinState::Low),
//! # ]);
//! let source = Ax25Call::new("N0CALL", 9).unwrap();
//! let mut tracker: Tracker<Pin, Pin, DacSink, NoopDelay> = Tracker::new(
//!     TrackerConfig::new(source),
//!     DacSink,
//!     ptt,
//!     None,
//!     NoopDelay::new(),
//!     105_600,
//!     None,
//! )
//! .unwrap();
//!
//! tracker.send_position(49.1023, -122.6365, "tracker online", None).unwrap();
//! # tracker.ptt.done();
//! ```

use crate::afsk::{AfskModulator, AudioSink};
use crate::ax25::{build_ui_frame, Ax25Call};
use crate::config::TrackerConfig;
use crate::consts::{MESSAGE_ID_MAX, PTT_LEAD_MS, PTT_TRAIL_MS, TELEMETRY_SEQ_MOD, TOCALL};
use crate::error::{ModemError, Result};
use crate::position::{build_position, Phg};
use crate::telemetry::{
    build_data_packet, build_parm_packet, build_unit_packet, Telemetry, STANDARD_PARM_NAMES,
    STANDARD_UNIT_LABELS,
};

use core::convert::Infallible;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

/// Samples offered to the sink per write.
const TX_BLOCK: usize = 256;

/// Wait before re-offering samples when the sink's buffers are full.
const SINK_FULL_WAIT_US: u32 = 1000;

/// High-level state of the tracker, for external inspection.
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TrackerMode {
    /// Ready to transmit.
    #[default]
    Idle,
    /// A transmission session is in progress.
    Tx,
}

/// The APRS transmit driver.
///
/// ## Type Parameters
/// - `PTT`: push-to-talk output pin
/// - `PD`: optional radio power-down pin, held high while operating
/// - `SINK`: audio sample destination
/// - `D`: delay provider for PTT lead/trail timing
#[derive(Debug)]
pub struct Tracker<PTT, PD, SINK, D>
where
    PTT: OutputPin,
    PD: OutputPin,
    SINK: AudioSink,
    D: DelayNs,
{
    /// The current mode of the tracker.
    pub mode: TrackerMode,
    /// PTT pin.
    pub ptt: PTT,
    /// Radio power-down pin, driven high at init when present.
    pub pd: Option<PD>,
    /// Audio sample destination.
    pub sink: SINK,
    /// Counter of completed transmissions.
    pub tx_good: u16,
    config: TrackerConfig,
    modem: AfskModulator,
    delay: D,
    ptt_inverted: bool,
    telemetry_seq: u16,
    message_id: u16,
}

impl<PTT, PD, SINK, D> Tracker<PTT, PD, SINK, D>
where
    PTT: OutputPin,
    PD: OutputPin,
    SINK: AudioSink,
    D: DelayNs,
{
    /// Creates a new `Tracker` from a validated configuration.
    ///
    /// # Arguments
    /// - `config`: configuration snapshot; checked once here
    /// - `sink`: initialized audio sink running at `sample_rate`
    /// - `ptt`: push-to-talk output, driven inactive immediately
    /// - `pd`: optional power-down line, driven high immediately
    /// - `delay`: delay provider for PTT timing
    /// - `sample_rate`: sink sample rate in Hz, a multiple of 1200
    /// - `ptt_inverted`: `Some(true)` for an active-low transmitter key
    ///
    /// # Errors
    /// [`ModemError::BadConfig`] for out-of-range options or a sample rate
    /// that is not a whole number of samples per bit.
    pub fn new(
        config: TrackerConfig,
        sink: SINK,
        ptt: PTT,
        pd: Option<PD>,
        delay: D,
        sample_rate: u32,
        ptt_inverted: Option<bool>,
    ) -> Result<Self> {
        config.validate()?;
        let modem = AfskModulator::new(sample_rate, config.preamble_ms, config.tail_ms)?;
        let mut tracker = Self {
            mode: TrackerMode::Idle,
            ptt,
            pd,
            sink,
            tx_good: 0,
            config,
            modem,
            delay,
            ptt_inverted: ptt_inverted.unwrap_or(false),
            telemetry_seq: 0,
            message_id: 1,
        };
        tracker.write_ptt(false);
        if let Some(ref mut pd) = tracker.pd {
            let _ = pd.set_high();
        }
        Ok(tracker)
    }

    /// Sends a position report for the given coordinates.
    ///
    /// # Arguments
    /// - `lat`, `lon`: position in signed decimal degrees
    /// - `comment`: free text appended to the report, truncated to 43 chars
    /// - `phg`: optional power/height/gain/directivity descriptor
    pub fn send_position(
        &mut self,
        lat: f32,
        lon: f32,
        comment: &str,
        phg: Option<Phg>,
    ) -> Result<()> {
        let info = build_position(
            lat,
            lon,
            self.config.symbol_table,
            self.config.symbol,
            phg,
            comment,
        )?;
        self.transmit(info.as_bytes())
    }

    /// Sends a telemetry data packet.
    ///
    /// With `auto_increment` the sequence number advances (wrapping at
    /// 1000) after the packet is built, matching the beacon cadence of the
    /// outer loop.
    pub fn send_telemetry(&mut self, telemetry: &Telemetry, auto_increment: bool) -> Result<()> {
        let info = build_data_packet(self.telemetry_seq, telemetry);
        if auto_increment {
            self.telemetry_seq = (self.telemetry_seq + 1) % TELEMETRY_SEQ_MOD;
        }
        self.transmit(info.as_bytes())
    }

    /// Sends the `PARM` and `UNIT` telemetry definition packets for the
    /// standard channel set. Stations send these at startup and
    /// periodically so receivers can label the data packets.
    pub fn send_telemetry_definitions(&mut self) -> Result<()> {
        let parm_id = self.next_message_id();
        let parm = build_parm_packet(&self.config.source, &STANDARD_PARM_NAMES, parm_id);
        self.transmit(parm.as_bytes())?;

        let unit_id = self.next_message_id();
        let unit = build_unit_packet(&self.config.source, &STANDARD_UNIT_LABELS, unit_id);
        self.transmit(unit.as_bytes())
    }

    /// Sends a free-text payload as the information field.
    pub fn send_message(&mut self, message: &str) -> Result<()> {
        self.transmit(message.as_bytes())
    }

    /// Sends a caller-built information field unchanged.
    pub fn send_raw(&mut self, info: &[u8]) -> Result<()> {
        self.transmit(info)
    }

    /// Current telemetry sequence number.
    pub fn telemetry_sequence(&self) -> u16 {
        self.telemetry_seq
    }

    /// Overrides the telemetry sequence number (wraps at 1000).
    pub fn set_telemetry_sequence(&mut self, seq: u16) {
        self.telemetry_seq = seq % TELEMETRY_SEQ_MOD;
    }

    /// Polls for session completion, `nb`-style. Useful when the tracker
    /// is shared with an interrupt context through a critical section.
    pub fn wait_tx_done(&self) -> nb::Result<(), Infallible> {
        if self.mode == TrackerMode::Tx {
            Err(nb::Error::WouldBlock)
        } else {
            Ok(())
        }
    }

    fn next_message_id(&mut self) -> u16 {
        let id = self.message_id;
        self.message_id = (self.message_id % MESSAGE_ID_MAX) + 1;
        id
    }

    fn write_ptt(&mut self, on: bool) {
        let state = if self.ptt_inverted { !on } else { on };
        if state {
            let _ = self.ptt.set_high();
        } else {
            let _ = self.ptt.set_low();
        }
    }

    /// Forces the transmitter off after a sink fault.
    fn abort_tx(&mut self) {
        self.write_ptt(false);
        self.modem.reset();
        self.mode = TrackerMode::Idle;
        #[cfg(feature = "log")]
        log::warn!("tx aborted: audio sink fault");
        #[cfg(feature = "defmt")]
        defmt::warn!("tx aborted: audio sink fault");
    }

    /// Runs one complete transmission session for `info`.
    ///
    /// Validation happens before any PTT action; once keyed, the session
    /// streams every sample, confirms drain, holds the PTT trail, and only
    /// then releases the transmitter.
    fn transmit(&mut self, info: &[u8]) -> Result<()> {
        if self.mode == TrackerMode::Tx {
            return Err(ModemError::Busy);
        }

        let dst = Ax25Call::new(TOCALL, 0)?;
        let path = self.config.path();
        let frame = build_ui_frame(&dst, &self.config.source, &path, info)?;

        #[cfg(feature = "log")]
        log::debug!("tx start: {} byte frame", frame.len());
        #[cfg(feature = "defmt")]
        defmt::debug!("tx start: {} byte frame", frame.len());

        self.mode = TrackerMode::Tx;
        self.modem.load(&frame);

        self.write_ptt(true);
        self.delay.delay_ms(PTT_LEAD_MS);

        let mut block = [0i16; TX_BLOCK];
        while self.modem.is_active() {
            let produced = self.modem.pull_samples(&mut block);
            let mut offset = 0;
            while offset < produced {
                match self.sink.write(&block[offset..produced]) {
                    Ok(0) => self.delay.delay_us(SINK_FULL_WAIT_US),
                    Ok(accepted) => offset += accepted,
                    Err(_) => {
                        self.abort_tx();
                        return Err(ModemError::AudioFault);
                    }
                }
            }
        }

        // The last flag must physically leave the DAC before PTT drops
        if self.sink.drain().is_err() {
            self.abort_tx();
            return Err(ModemError::AudioFault);
        }
        self.delay.delay_ms(PTT_TRAIL_MS);
        self.write_ptt(false);

        self.mode = TrackerMode::Idle;
        self.tx_good += 1;
        #[cfg(feature = "log")]
        log::debug!("tx done ({} total)", self.tx_good);
        #[cfg(feature = "defmt")]
        defmt::debug!("tx done ({} total)", self.tx_good);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hdlc::HdlcEncoder;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };
    use std::vec::Vec;

    /// Sink that records every accepted sample, optionally in small
    /// chunks, optionally failing.
    struct TestSink {
        samples: Vec<i16>,
        chunk: usize,
        fail_writes: bool,
    }

    impl TestSink {
        fn new() -> Self {
            Self { samples: Vec::new(), chunk: usize::MAX, fail_writes: false }
        }
    }

    impl AudioSink for TestSink {
        type Error = ();

        fn write(&mut self, samples: &[i16]) -> core::result::Result<usize, ()> {
            if self.fail_writes {
                return Err(());
            }
            let accepted = samples.len().min(self.chunk);
            self.samples.extend_from_slice(&samples[..accepted]);
            Ok(accepted)
        }

        fn drain(&mut self) -> core::result::Result<(), ()> {
            Ok(())
        }
    }

    fn config() -> TrackerConfig {
        let mut config = TrackerConfig::new(Ax25Call::new("VA7RCV", 15).unwrap());
        config.preamble_ms = 100;
        config.tail_ms = 10;
        config
    }

    fn tracker_with(
        ptt: PinMock,
        sink: TestSink,
    ) -> Tracker<PinMock, PinMock, TestSink, NoopDelay> {
        Tracker::new(config(), sink, ptt, None, NoopDelay::new(), 9600, None).unwrap()
    }

    fn expected_samples(info: &[u8]) -> usize {
        let config = config();
        let dst = Ax25Call::new(TOCALL, 0).unwrap();
        let frame = build_ui_frame(&dst, &config.source, &config.path(), info).unwrap();
        let mut encoder = HdlcEncoder::new(config.preamble_ms, config.tail_ms);
        encoder.load(&frame);
        let mut bits = 0;
        while encoder.next_bit().is_some() {
            bits += 1;
        }
        bits * 8 // 9600 Hz / 1200 bps
    }

    #[test]
    fn test_session_emits_exact_sample_count_and_keys_ptt() {
        let ptt = PinMock::new(&[
            PinTransaction::set(PinState::Low),  // init
            PinTransaction::set(PinState::High), // key up
            PinTransaction::set(PinState::Low),  // release
        ]);
        let mut tracker = tracker_with(ptt, TestSink::new());

        tracker.send_raw(b">test beacon").unwrap();

        assert_eq!(tracker.mode, TrackerMode::Idle);
        assert_eq!(tracker.tx_good, 1);
        assert_eq!(tracker.sink.samples.len(), expected_samples(b">test beacon"));
        tracker.ptt.done();
    }

    #[test]
    fn test_backpressured_sink_receives_every_sample() {
        let ptt = PinMock::new(&[
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
        ]);
        let mut sink = TestSink::new();
        sink.chunk = 37; // force partial writes
        let mut tracker = tracker_with(ptt, sink);

        tracker.send_message("chunked").unwrap();
        assert_eq!(tracker.sink.samples.len(), expected_samples(b"chunked"));
        tracker.ptt.done();
    }

    #[test]
    fn test_validation_errors_precede_ptt() {
        // No PTT transactions beyond init may occur
        let ptt = PinMock::new(&[PinTransaction::set(PinState::Low)]);
        let mut tracker = tracker_with(ptt, TestSink::new());

        assert_eq!(
            tracker.send_position(95.0, 0.0, "", None),
            Err(ModemError::BadCoordinate)
        );
        let info = [b'x'; 257];
        assert_eq!(tracker.send_raw(&info), Err(ModemError::InfoTooLong));
        assert_eq!(tracker.tx_good, 0);
        tracker.ptt.done();
    }

    #[test]
    fn test_audio_fault_forces_ptt_off() {
        let ptt = PinMock::new(&[
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low), // forced off by abort
        ]);
        let mut sink = TestSink::new();
        sink.fail_writes = true;
        let mut tracker = tracker_with(ptt, sink);

        assert_eq!(tracker.send_message("x"), Err(ModemError::AudioFault));
        assert_eq!(tracker.mode, TrackerMode::Idle);
        assert_eq!(tracker.tx_good, 0);
        tracker.ptt.done();
    }

    #[test]
    fn test_busy_rejected_without_touching_radio() {
        let ptt = PinMock::new(&[PinTransaction::set(PinState::Low)]);
        let mut tracker = tracker_with(ptt, TestSink::new());

        tracker.mode = TrackerMode::Tx;
        assert_eq!(tracker.send_message("x"), Err(ModemError::Busy));
        assert_eq!(tracker.wait_tx_done(), Err(nb::Error::WouldBlock));

        tracker.mode = TrackerMode::Idle;
        assert_eq!(tracker.wait_tx_done(), Ok(()));
        tracker.ptt.done();
    }

    #[test]
    fn test_inverted_ptt() {
        let ptt = PinMock::new(&[
            PinTransaction::set(PinState::High), // inactive = high
            PinTransaction::set(PinState::Low),  // key up
            PinTransaction::set(PinState::High), // release
        ]);
        let mut tracker: Tracker<PinMock, PinMock, TestSink, NoopDelay> =
            Tracker::new(config(), TestSink::new(), ptt, None, NoopDelay::new(), 9600, Some(true))
                .unwrap();

        tracker.send_message("inv").unwrap();
        tracker.ptt.done();
    }

    #[test]
    fn test_power_down_pin_held_high() {
        let ptt = PinMock::new(&[PinTransaction::set(PinState::Low)]);
        let pd = PinMock::new(&[PinTransaction::set(PinState::High)]);
        let mut tracker: Tracker<PinMock, PinMock, TestSink, NoopDelay> =
            Tracker::new(config(), TestSink::new(), ptt, Some(pd), NoopDelay::new(), 9600, None)
                .unwrap();

        tracker.ptt.done();
        let _ = tracker.pd.as_mut().map(|pd| pd.done());
    }

    #[test]
    fn test_telemetry_sequence_advances_and_wraps() {
        let ptt = PinMock::new(&[
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
        ]);
        let mut tracker = tracker_with(ptt, TestSink::new());
        tracker.set_telemetry_sequence(999);

        let telemetry = Telemetry { analog: [0.0; 5], digital: 0 };
        tracker.send_telemetry(&telemetry, true).unwrap();
        assert_eq!(tracker.telemetry_sequence(), 0);
        tracker.send_telemetry(&telemetry, false).unwrap();
        assert_eq!(tracker.telemetry_sequence(), 0);
        tracker.ptt.done();
    }

    #[test]
    fn test_definitions_use_distinct_message_ids() {
        let ptt = PinMock::new(&[
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
        ]);
        let mut tracker = tracker_with(ptt, TestSink::new());

        tracker.send_telemetry_definitions().unwrap();
        assert_eq!(tracker.tx_good, 2);
        assert_eq!(tracker.next_message_id(), 3);
        tracker.ptt.done();
    }

    #[test]
    fn test_bad_config_rejected_at_init() {
        let mut ptt = PinMock::new(&[]);
        let mut config = config();
        config.tail_ms = 5;
        let result: Result<Tracker<&mut PinMock, PinMock, TestSink, NoopDelay>> = Tracker::new(
            config,
            TestSink::new(),
            &mut ptt,
            None,
            NoopDelay::new(),
            9600,
            None,
        );
        assert!(matches!(result, Err(ModemError::BadConfig)));
        ptt.done();
    }
}
