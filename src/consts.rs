//! Constants used across the AFSK/AX.25 protocol implementation.
//!
//! This module defines the protocol-wide constants for tone generation,
//! AX.25 framing, HDLC delimiting, and the APRS information-field formats.
//!
//! These values follow the Bell 202 / AX.25 UI-frame conventions used by the
//! worldwide APRS network, adapted for embedded use in constrained
//! environments.
//!
//! ## Key Concepts
//!
//! - **Tones**: 1200 Hz carries a logical mark, 2200 Hz a space, at 1200 baud.
//! - **Flags**: the HDLC octet `0x7E` delimits frames and trains receiver
//!   clock recovery during the preamble and tail.
//! - **Addresses**: each callsign occupies 7 octets on the wire; a frame
//!   carries a destination, a source, and up to eight digipeater hops.
//! - **Buffer Sizing**: derived from the maximum address chain plus the
//!   largest permitted information field and the FCS trailer.

/// Mark tone frequency in Hz (logical `1` after NRZI).
pub const MARK_FREQ: u32 = 1200;

/// Space tone frequency in Hz.
pub const SPACE_FREQ: u32 = 2200;

/// Signalling rate in bits per second.
pub const BIT_RATE: u32 = 1200;

/// Default audio sample rate in Hz.
///
/// Chosen as 1200 baud x 88 so each bit interval spans an integer number of
/// samples. Any rate that divides evenly by [`BIT_RATE`] is accepted by
/// [`AfskModulator::new`](crate::afsk::AfskModulator::new).
pub const SAMPLE_RATE: u32 = 105_600;

/// Audio samples per transmitted bit at the default [`SAMPLE_RATE`].
pub const SAMPLES_PER_BIT: u32 = SAMPLE_RATE / BIT_RATE;

/// The HDLC frame delimiter octet, `0b01111110`.
///
/// Sent back-to-back during the preamble and tail, and never bit-stuffed.
pub const HDLC_FLAG: u8 = 0x7E;

/// Number of consecutive `1` bits after which a `0` is stuffed into the
/// frame region of the bit stream.
pub const BIT_STUFF_LEN: u8 = 5;

/// AX.25 control octet for an Unnumbered Information frame.
pub const AX25_CTRL_UI: u8 = 0x03;

/// AX.25 PID octet indicating no layer-3 protocol.
pub const AX25_PID_NOLAYER3: u8 = 0xF0;

/// Maximum length of a callsign base, in characters.
pub const AX25_CALL_LEN: usize = 6;

/// Largest legal Secondary Station Identifier.
pub const AX25_SSID_MAX: u8 = 15;

/// Maximum number of digipeater hops accepted by the frame builder.
pub const AX25_MAX_HOPS: usize = 8;

/// Maximum length (in bytes) of the information field.
pub const AX25_INFO_MAX: usize = 256;

/// Maximum size (in bytes) of a fully assembled UI frame.
///
/// Ten 7-octet addresses (destination, source, eight hops), control, PID,
/// the largest information field, and the two FCS octets.
pub const AX25_FRAME_MAX: usize = 7 * (2 + AX25_MAX_HOPS) + 2 + AX25_INFO_MAX + 2;

/// Destination callsign advertising this firmware family (the APRS "TOCALL",
/// `APZ...` experimental block).
pub const TOCALL: &str = "APZMDR";

/// Maximum length of the free-text comment in a position report.
pub const POSITION_COMMENT_MAX: usize = 43;

/// Telemetry sequence numbers count 0..=999 and wrap.
pub const TELEMETRY_SEQ_MOD: u16 = 1000;

/// APRS message identifiers count 1..=999 and wrap.
pub const MESSAGE_ID_MAX: u16 = 999;

/// Delay between PTT assertion and the first audio sample, in milliseconds.
/// Lets the transmitter's PA settle before the opening flags.
pub const PTT_LEAD_MS: u32 = 250;

/// Delay between audio-sink drain and PTT release, in milliseconds.
pub const PTT_TRAIL_MS: u32 = 120;
