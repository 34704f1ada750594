//! AX.25 UI-frame assembly.
//!
//! This module provides [`Ax25Call`], the callsign + SSID pair used in every
//! address slot, and [`build_ui_frame`], which assembles a complete
//! Unnumbered Information frame: address chain, control and PID octets,
//! information field, and the complemented CRC-16-CCITT Frame Check
//! Sequence in wire order.
//!
//! ## Address Format
//!
//! Each address occupies 7 octets. The base callsign is padded with spaces
//! to six characters and every octet is shifted left by one bit. The
//! seventh octet carries the SSID in bits 1-4, the reserved `11` pattern in
//! bits 5-6, a clear bit 7, and the end-of-address marker in bit 0, set
//! only on the final address of the chain.
//!
//! ## Example
//!
//! ```rust
//! use afsk1200::ax25::{build_ui_frame, Ax25Call};
//!
//! let dst = Ax25Call::new("APZMDR", 0).unwrap();
//! let src = Ax25Call::new("N0CALL", 9).unwrap();
//! let path = [Ax25Call::new("WIDE1", 1).unwrap()];
//! let frame = build_ui_frame(&dst, &src, &path, b"!hello").unwrap();
//! assert_eq!(frame[0], b'A' << 1);
//! ```

use crate::consts::{
    AX25_CALL_LEN, AX25_CTRL_UI, AX25_INFO_MAX, AX25_MAX_HOPS, AX25_PID_NOLAYER3, AX25_SSID_MAX,
};
#[cfg(not(feature = "std"))]
use crate::consts::AX25_FRAME_MAX;
use crate::crc::crc_ccitt_fcs;
use crate::error::{ModemError, Result};

use core::fmt;
#[cfg(not(feature = "std"))]
use heapless::Vec;
use heapless::String;
#[cfg(feature = "std")]
use std::vec::Vec;

/// Buffer holding one assembled UI frame.
#[cfg(not(feature = "std"))]
pub type FrameBuf = Vec<u8, AX25_FRAME_MAX>;

/// Buffer holding one assembled UI frame.
#[cfg(feature = "std")]
pub type FrameBuf = Vec<u8>;

/// A formatted information field, ready to hand to [`build_ui_frame`].
pub type InfoString = String<AX25_INFO_MAX>;

/// An AX.25 station address: a 1-6 character base callsign plus an SSID.
///
/// The base is uppercased on construction and restricted to ASCII letters
/// and digits; the SSID must be 0-15. Anything else is [`ModemError::BadCallsign`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ax25Call {
    base: String<AX25_CALL_LEN>,
    ssid: u8,
}

impl Ax25Call {
    /// Validates and builds an address from its base callsign and SSID.
    pub fn new(base: &str, ssid: u8) -> Result<Self> {
        if base.is_empty() || base.len() > AX25_CALL_LEN || ssid > AX25_SSID_MAX {
            return Err(ModemError::BadCallsign);
        }
        let mut upper: String<AX25_CALL_LEN> = String::new();
        for ch in base.chars() {
            if !ch.is_ascii_alphanumeric() {
                return Err(ModemError::BadCallsign);
            }
            let _ = upper.push(ch.to_ascii_uppercase());
        }
        Ok(Self { base: upper, ssid })
    }

    /// The uppercased base callsign, without padding.
    pub fn base(&self) -> &str {
        self.base.as_str()
    }

    /// The Secondary Station Identifier, 0-15.
    pub fn ssid(&self) -> u8 {
        self.ssid
    }

    /// Encodes the address into its 7-octet wire form.
    ///
    /// `last` sets the end-of-address marker; exactly one address per frame
    /// carries it, and it must be the final one.
    pub fn to_bytes(&self, last: bool) -> [u8; 7] {
        let mut out = [b' ' << 1; 7];
        for (slot, ch) in out.iter_mut().zip(self.base.as_bytes().iter().copied()) {
            *slot = ch << 1;
        }
        // Reserved bits 5-6 set, bit 7 clear
        out[6] = 0x60 | ((self.ssid & 0x0F) << 1) | u8::from(last);
        out
    }
}

impl fmt::Display for Ax25Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ssid > 0 {
            write!(f, "{}-{}", self.base, self.ssid)
        } else {
            write!(f, "{}", self.base)
        }
    }
}

/// Assembles a complete AX.25 UI frame.
///
/// Addresses are laid down destination first, then source, then each
/// digipeater hop in order; only the final address carries the
/// end-of-address bit. The control octet 0x03 (UI) and PID 0xF0 (no
/// layer 3) follow, then the information field, then the complemented
/// CRC-16-CCITT over everything so far, low byte first.
///
/// # Errors
/// - [`ModemError::TooManyHops`] for more than eight path entries
/// - [`ModemError::InfoTooLong`] for an information field over 256 bytes
pub fn build_ui_frame(
    dst: &Ax25Call,
    src: &Ax25Call,
    path: &[Ax25Call],
    info: &[u8],
) -> Result<FrameBuf> {
    if path.len() > AX25_MAX_HOPS {
        return Err(ModemError::TooManyHops);
    }
    if info.len() > AX25_INFO_MAX {
        return Err(ModemError::InfoTooLong);
    }

    let mut frame = FrameBuf::new();
    let _ = frame.extend_from_slice(&dst.to_bytes(false));
    let _ = frame.extend_from_slice(&src.to_bytes(path.is_empty()));
    for (i, hop) in path.iter().enumerate() {
        let _ = frame.extend_from_slice(&hop.to_bytes(i + 1 == path.len()));
    }
    let _ = frame.push(AX25_CTRL_UI);
    let _ = frame.push(AX25_PID_NOLAYER3);
    let _ = frame.extend_from_slice(info);

    let fcs = crc_ccitt_fcs(&frame);
    let _ = frame.push((fcs & 0xFF) as u8);
    let _ = frame.push((fcs >> 8) as u8);
    Ok(frame)
}
