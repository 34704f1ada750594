//! Error taxonomy for frame construction and transmission.

use thiserror::Error;

/// Everything that can go wrong between payload formatting and PTT release.
///
/// Validation errors (`BadCallsign`, `InfoTooLong`, `TooManyHops`,
/// `BadCoordinate`, `BadConfig`) are reported synchronously, before the
/// radio is touched. `Busy` and `AudioFault` arise from the transmit
/// session itself; an `AudioFault` aborts the session with PTT forced off
/// and is never retried at this layer.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModemError {
    /// Callsign base is empty, longer than six characters, or contains a
    /// non-alphanumeric character, or the SSID is out of range.
    #[error("invalid callsign or SSID")]
    BadCallsign,

    /// Information field exceeds 256 bytes.
    #[error("information field too long")]
    InfoTooLong,

    /// More than eight digipeater hops requested.
    #[error("too many digipeater hops")]
    TooManyHops,

    /// Latitude outside [-90, +90] or longitude outside [-180, +180].
    #[error("coordinate out of range")]
    BadCoordinate,

    /// A transmission session is already in progress.
    #[error("transmitter busy")]
    Busy,

    /// The audio sink refused a write or failed to drain. The session has
    /// been aborted and PTT released.
    #[error("audio sink fault")]
    AudioFault,

    /// Configuration rejected at init (ranges in [`crate::config`]).
    #[error("invalid configuration")]
    BadConfig,
}

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, ModemError>;
