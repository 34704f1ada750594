//! Tracker configuration snapshot.
//!
//! [`TrackerConfig`] collects everything the persistent settings store
//! feeds the tracker: source station, map symbol, digipeater path, and the
//! flag durations. The snapshot is validated once when the
//! [`Tracker`](crate::tracker::Tracker) is built; after that it is owned by
//! the tracker and never mutated mid-session.

use crate::ax25::Ax25Call;
use crate::error::{ModemError, Result};

use heapless::Vec;

/// Accepted preamble duration range in milliseconds.
pub const PREAMBLE_MS_RANGE: core::ops::RangeInclusive<u16> = 100..=1000;

/// Accepted tail duration range in milliseconds.
pub const TAIL_MS_RANGE: core::ops::RangeInclusive<u16> = 10..=500;

/// User-configurable APRS parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Source station (base callsign and SSID).
    pub source: Ax25Call,
    /// APRS map symbol character.
    pub symbol: u8,
    /// Symbol table: `/` (primary) or `\` (alternate).
    pub symbol_table: u8,
    /// First digipeater hop; `None` omits it.
    pub path1: Option<Ax25Call>,
    /// Second digipeater hop; `None` omits it.
    pub path2: Option<Ax25Call>,
    /// Pre-frame flag duration in milliseconds.
    pub preamble_ms: u16,
    /// Post-frame flag duration in milliseconds.
    pub tail_ms: u16,
}

impl TrackerConfig {
    /// Builds a configuration with the stock tracker defaults: car symbol
    /// on the primary table, `WIDE1-1,WIDE2-2` path, 350 ms preamble,
    /// 50 ms tail.
    pub fn new(source: Ax25Call) -> Self {
        Self {
            source,
            symbol: b'n',
            symbol_table: b'/',
            path1: Ax25Call::new("WIDE1", 1).ok(),
            path2: Ax25Call::new("WIDE2", 2).ok(),
            preamble_ms: 350,
            tail_ms: 50,
        }
    }

    /// Checks every option against its accepted range.
    ///
    /// Callsign and SSID validity are already guaranteed by [`Ax25Call`];
    /// this catches the remaining out-of-range settings. Digipeater hops
    /// must use SSIDs 1-7 (the `WIDEn-N` convention).
    pub fn validate(&self) -> Result<()> {
        if !PREAMBLE_MS_RANGE.contains(&self.preamble_ms) || !TAIL_MS_RANGE.contains(&self.tail_ms)
        {
            return Err(ModemError::BadConfig);
        }
        if self.symbol_table != b'/' && self.symbol_table != b'\\' {
            return Err(ModemError::BadConfig);
        }
        if !self.symbol.is_ascii_graphic() {
            return Err(ModemError::BadConfig);
        }
        for hop in [&self.path1, &self.path2].into_iter().flatten() {
            if hop.ssid() == 0 || hop.ssid() > 7 {
                return Err(ModemError::BadConfig);
            }
        }
        Ok(())
    }

    /// The digipeater hops actually in use, in order.
    pub fn path(&self) -> Vec<Ax25Call, 2> {
        let mut path = Vec::new();
        for hop in [&self.path1, &self.path2].into_iter().flatten() {
            let _ = path.push(hop.clone());
        }
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> TrackerConfig {
        TrackerConfig::new(Ax25Call::new("VA7RCV", 15).unwrap())
    }

    #[test]
    fn test_defaults_validate() {
        let config = config();
        assert!(config.validate().is_ok());
        assert_eq!(config.preamble_ms, 350);
        assert_eq!(config.tail_ms, 50);
        assert_eq!(config.path().len(), 2);
    }

    #[test]
    fn test_duration_ranges() {
        let mut config = config();
        config.preamble_ms = 99;
        assert_eq!(config.validate(), Err(ModemError::BadConfig));
        config.preamble_ms = 1000;
        assert!(config.validate().is_ok());
        config.tail_ms = 501;
        assert_eq!(config.validate(), Err(ModemError::BadConfig));
    }

    #[test]
    fn test_symbol_table_restricted() {
        let mut config = config();
        config.symbol_table = b'\\';
        assert!(config.validate().is_ok());
        config.symbol_table = b'x';
        assert_eq!(config.validate(), Err(ModemError::BadConfig));
    }

    #[test]
    fn test_path_ssid_range() {
        let mut config = config();
        config.path1 = Ax25Call::new("WIDE1", 0).ok();
        assert_eq!(config.validate(), Err(ModemError::BadConfig));
        config.path1 = None;
        assert!(config.validate().is_ok());
        assert_eq!(config.path().len(), 1);
    }
}
