//! # afsk1200
//!
//! A portable, no_std Rust transmit modem for APRS over AX.25, generating
//! Bell 202 AFSK audio for the microphone input of cheap VHF modules like
//! the DRA818 and SA818.
//!
//! This driver implements a software AFSK transmitter using:
//! - `embedded-hal` traits for the PTT and power-down lines and PTT timing
//! - a phase-accumulator DDS over a 256-entry sine table for
//!   continuous-phase 1200/2200 Hz tones at 1200 baud
//! - interrupt-safe modulator access with `critical-section`
//! - `heapless` fixed-capacity buffers for frames and information fields
//!
//! ## Crate features
//! | Feature | Description |
//! |---------|-------------|
//! | `std`   | Disables `#![no_std]` support and replaces the `heapless::Vec` frame buffer with `std::vec::Vec` |
//! | `defmt` | Uses `defmt` logging |
//! | `log`   | Uses `log` logging |
//!
//! ## Software Features
//!
//! - **AX.25 UI frames** in pure software: shifted address chains,
//!   CRC-16-CCITT FCS, HDLC flags, five-ones bit-stuffing, NRZI
//! - **APRS information fields**: position reports with PHG and comment,
//!   telemetry data and PARM/UNIT definition packets
//! - **PTT sequencing** with configurable polarity, lead/trail timing, and
//!   drain confirmation before release
//! - Bit-exact interoperability with the existing APRS infrastructure
//!   (digipeaters, IGates, stations)
//!
//! ## Usage
//!
//! Feed the [`Tracker`](crate::tracker::Tracker) an audio sink and a PTT
//! pin, then call its send operations from the main loop:
//!
//! ```rust,ignore
//! let mut tracker = Tracker::new(config, dac, ptt, Some(pd), delay, 105_600, Some(true))?;
//! tracker.send_telemetry_definitions()?;
//! tracker.send_position(lat, lon, "ESP32 Tracker", None)?;
//! ```
//!
//! Or, for DMA-interrupt sample delivery, install an
//! [`AfskModulator`](crate::afsk::AfskModulator) with
//! [`irq::global_modem_setup`] and refill buffers from the handler with
//! [`irq::global_modem_fill`].
//!
//! ## Integration Notes
//!
//! - The sink's sample rate must be an integer multiple of 1200 so each
//!   bit spans a whole number of samples; the stock rate is 105,600 Hz.
//! - [`Tracker::send_*`](crate::tracker::Tracker) blocks until the tail
//!   flags have drained and PTT is released; sessions never overlap.
//! - GPS parsing, sensors, the settings store, and radio AT-command setup
//!   are external collaborators; this crate only consumes their outputs.
//!
//! --
//! Designed for `#![no_std]` use in resource-constrained embedded environments.

#![deny(
    bad_style,
    dead_code,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused,
    while_true,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results
)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(all(test, not(feature = "std")))]
extern crate std;

pub use critical_section;

#[cfg(not(feature = "std"))]
pub use heapless;

pub mod afsk;
pub mod ax25;
pub mod config;
pub mod consts;
pub(crate) mod crc;
pub mod error;
pub mod hdlc;
pub mod irq;
pub mod position;
pub mod telemetry;
pub mod tracker;
