//! APRS telemetry packet formatting.
//!
//! Builds the `T#` data packet carrying five analog channels and eight
//! digital bits, and the message-shaped `PARM` / `UNIT` definition packets
//! that name those channels for receiving stations. Definition packets are
//! addressed to the sending station itself, with the addressee field padded
//! to the nine columns the APRS message format requires.

use crate::ax25::{Ax25Call, InfoString};
use crate::consts::TELEMETRY_SEQ_MOD;

use core::fmt::Write;
use heapless::String;

/// One telemetry sample set: five analog channels and a digital byte.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Telemetry {
    /// Analog channel values, rendered with three fractional digits.
    pub analog: [f32; 5],
    /// Digital channel bits, rendered MSB-first as `0`/`1` characters.
    pub digital: u8,
}

/// Standard channel names sent in the `PARM` definition packet.
pub const STANDARD_PARM_NAMES: [&str; 5] =
    ["Battery", "Temp", "Pressure", "Humidity", "Altitude"];

/// Standard channel units sent in the `UNIT` definition packet.
pub const STANDARD_UNIT_LABELS: [&str; 5] = ["volts", "deg.C", "mbar", "%", "meters"];

/// Builds a telemetry data packet:
/// `T#SSS,a1,a2,a3,a4,a5,DDDDDDDD`.
///
/// The sequence number wraps at 1000.
pub fn build_data_packet(sequence: u16, telemetry: &Telemetry) -> InfoString {
    let mut info = InfoString::new();
    let _ = write!(info, "T#{:03}", sequence % TELEMETRY_SEQ_MOD);
    for value in &telemetry.analog {
        let _ = write!(info, ",{value:.3}");
    }
    let _ = info.push(',');
    for i in (0..8).rev() {
        let _ = info.push(if telemetry.digital & (1 << i) != 0 { '1' } else { '0' });
    }
    info
}

/// Builds a `PARM` channel-name definition packet:
/// `:ADDRESSEE:PARM.n1,n2,n3,n4,n5{id`.
pub fn build_parm_packet(source: &Ax25Call, names: &[&str; 5], message_id: u16) -> InfoString {
    build_definition(source, "PARM", names, message_id)
}

/// Builds a `UNIT` channel-unit definition packet:
/// `:ADDRESSEE:UNIT.u1,u2,u3,u4,u5{id`.
pub fn build_unit_packet(source: &Ax25Call, units: &[&str; 5], message_id: u16) -> InfoString {
    build_definition(source, "UNIT", units, message_id)
}

fn build_definition(
    source: &Ax25Call,
    kind: &str,
    fields: &[&str; 5],
    message_id: u16,
) -> InfoString {
    // Message addressee is the sending station, space-padded to 9 columns
    let mut addressee: String<9> = String::new();
    let _ = write!(addressee, "{}-{}", source.base(), source.ssid());
    while addressee.len() < 9 {
        let _ = addressee.push(' ');
    }

    let mut info = InfoString::new();
    let _ = write!(info, ":{addressee}:{kind}.");
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            let _ = info.push(',');
        }
        let _ = info.push_str(field);
    }
    let _ = write!(info, "{{{message_id}");
    info
}

/// Scales an analog reading into the 0..=999 range used by legacy
/// single-byte telemetry consumers. Values outside `[min, max]` are
/// clamped.
pub fn scale_analog(value: f32, min: f32, max: f32) -> u16 {
    let clamped = value.clamp(min, max);
    let scaled = (clamped - min) / (max - min) * 999.0;
    (scaled + 0.5) as u16
}
