//! Interrupt-context helpers for DMA-driven sample delivery.
//!
//! On targets where the audio peripheral raises a DMA-completion interrupt,
//! the modulator must be reachable from the handler as well as from the
//! foreground code that loads frames. These helpers wrap an
//! [`AfskModulator`] in a `critical_section` mutex so both contexts can
//! touch it safely; the handler refills the drained buffer with
//! [`global_modem_fill`].
//!
//! # Example
//! ```rust
//! use afsk1200::afsk::AfskModulator;
//! use afsk1200::irq::{global_modem_fill, global_modem_init, global_modem_setup};
//! use core::cell::RefCell;
//! use critical_section::Mutex;
//!
//! static MODEM: Mutex<RefCell<Option<AfskModulator>>> = global_modem_init();
//!
//! // foreground, once at boot
//! global_modem_setup(&MODEM, AfskModulator::new(105_600, 350, 50).unwrap());
//!
//! // in the DMA-completion handler
//! let mut dma_buf = [0i16; 256];
//! let produced = global_modem_fill(&MODEM, &mut dma_buf);
//! ```

use crate::afsk::AfskModulator;
use core::cell::RefCell;
use critical_section::Mutex;

/// Initializes the global static modulator slot for use with
/// `critical_section`.
///
/// # Returns
/// * An empty mutable ref-cell
pub const fn global_modem_init() -> Mutex<RefCell<Option<AfskModulator>>> {
    Mutex::new(RefCell::new(None))
}

/// Installs a modulator into the global slot.
///
/// # Arguments
/// * The global static modulator slot
/// * The configured [`AfskModulator`]
pub fn global_modem_setup(
    global_modem: &'static Mutex<RefCell<Option<AfskModulator>>>,
    modem: AfskModulator,
) {
    critical_section::with(|cs| {
        let _ = global_modem.borrow(cs).replace(Some(modem));
    });
}

/// Refills a drained DMA buffer from the global modulator.
///
/// Intended to be called from the audio interrupt handler. Returns the
/// number of samples produced; anything short of `buf.len()` means the
/// session ended inside this buffer (or no modulator is installed) and the
/// remainder of `buf` is untouched.
pub fn global_modem_fill(
    global_modem: &'static Mutex<RefCell<Option<AfskModulator>>>,
    buf: &mut [i16],
) -> usize {
    critical_section::with(|cs| {
        if let Some(modem) = global_modem.borrow(cs).borrow_mut().as_mut() {
            modem.pull_samples(buf)
        } else {
            0
        }
    })
}

/// Whether the global modulator still has samples to produce.
pub fn global_modem_active(global_modem: &'static Mutex<RefCell<Option<AfskModulator>>>) -> bool {
    critical_section::with(|cs| {
        global_modem
            .borrow(cs)
            .borrow()
            .as_ref()
            .is_some_and(AfskModulator::is_active)
    })
}
