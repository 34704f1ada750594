//! APRS position-report formatting.
//!
//! Converts signed decimal-degree coordinates into the fixed-width
//! `DDMM.MMH` / `DDDMM.MMH` strings APRS expects, and assembles the
//! no-timestamp position information field:
//!
//! ```text
//! =DDMM.MMHt DDDMM.MMHs [PHGphgd] [comment]
//! ```
//!
//! where `t` is the symbol-table character and `s` the symbol. The PHG
//! extension is included only when every digit fits, and the comment is
//! truncated to 43 characters.

use crate::ax25::InfoString;
use crate::consts::POSITION_COMMENT_MAX;
use crate::error::{ModemError, Result};

use core::fmt::Write;
use heapless::String;

/// Power / height / gain / directivity propagation descriptor.
///
/// Encoded as `PHG` plus four ASCII digits. The whole extension is omitted
/// from the report when any value does not fit in a single digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Phg {
    /// Transmitter power code, 0-9.
    pub power: u8,
    /// Antenna height code, 0-9.
    pub height: u8,
    /// Antenna gain code, 0-9.
    pub gain: u8,
    /// Directivity code, 0-8 (0 = omnidirectional).
    pub directivity: u8,
}

impl Phg {
    fn is_encodable(&self) -> bool {
        self.power < 10 && self.height < 10 && self.gain < 10 && self.directivity <= 9
    }
}

/// Formats a latitude as the 8-character `DDMM.MMH` string.
///
/// `49.1023` becomes `"4906.14N"`. Out-of-range input is
/// [`ModemError::BadCoordinate`].
pub fn format_latitude(lat: f32) -> Result<String<8>> {
    if !(-90.0..=90.0).contains(&lat) {
        return Err(ModemError::BadCoordinate);
    }
    let hemisphere = if lat >= 0.0 { 'N' } else { 'S' };
    let abs = libm::fabsf(lat);
    let degrees = abs as u16;
    let minutes = (abs - degrees as f32) * 60.0;

    let mut out = String::new();
    let _ = write!(out, "{degrees:02}{minutes:05.2}{hemisphere}");
    Ok(out)
}

/// Formats a longitude as the 9-character `DDDMM.MMH` string.
///
/// `-122.6365` becomes `"12238.19W"`.
pub fn format_longitude(lon: f32) -> Result<String<9>> {
    if !(-180.0..=180.0).contains(&lon) {
        return Err(ModemError::BadCoordinate);
    }
    let hemisphere = if lon >= 0.0 { 'E' } else { 'W' };
    let abs = libm::fabsf(lon);
    let degrees = abs as u16;
    let minutes = (abs - degrees as f32) * 60.0;

    let mut out = String::new();
    let _ = write!(out, "{degrees:03}{minutes:05.2}{hemisphere}");
    Ok(out)
}

/// Builds the no-timestamp position information field.
///
/// # Arguments
/// - `lat`, `lon`: position in signed decimal degrees
/// - `symbol_table`: `/` (primary) or `\` (alternate)
/// - `symbol`: APRS map symbol character
/// - `phg`: optional propagation descriptor
/// - `comment`: free text, truncated to 43 characters
pub fn build_position(
    lat: f32,
    lon: f32,
    symbol_table: u8,
    symbol: u8,
    phg: Option<Phg>,
    comment: &str,
) -> Result<InfoString> {
    let lat_str = format_latitude(lat)?;
    let lon_str = format_longitude(lon)?;

    let mut info = InfoString::new();
    let _ = info.push('=');
    let _ = info.push_str(&lat_str);
    let _ = info.push(symbol_table as char);
    let _ = info.push_str(&lon_str);
    let _ = info.push(symbol as char);

    if let Some(phg) = phg {
        if phg.is_encodable() {
            let _ = write!(
                info,
                "PHG{}{}{}{}",
                phg.power, phg.height, phg.gain, phg.directivity
            );
        }
    }

    for ch in comment.chars().take(POSITION_COMMENT_MAX) {
        let _ = info.push(ch);
    }
    Ok(info)
}
