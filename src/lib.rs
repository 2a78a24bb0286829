//! Input-processing core for the Quill keyboard.
//!
//! Per cycle: scan the switch matrix, classify what is pressed, fold the
//! ordinary keys into a slot-stable six-key output buffer, and hand exactly
//! one report to the host-facing transport. The crate owns no hardware:
//! electrical sensing comes in through [`KeySense`], reports leave through
//! [`ReportSink`], and an external polling loop calls [`Controller::cycle`]
//! as often as it likes.

#![cfg_attr(not(any(feature = "std", test)), no_std)]

use arrayvec::ArrayVec;

pub mod keys;
pub mod layout;
pub mod report;
pub mod resolve;
pub mod scan;

pub use keys::{Code, Key, Modifier, Mods};
pub use layout::{Layout, Variant, COLS, ROWS};
pub use report::{Report, ReportSink};
pub use scan::{KeySense, ScanFrame};

cfg_if::cfg_if! {
    if #[cfg(all(feature = "defmt", not(test)))] {
        mod log {
            pub use ::defmt::debug;
        }
    } else if #[cfg(any(feature = "log", test))] {
        mod log {
            pub use ::log::debug;
        }
    } else {
        mod log {
            macro_rules! debug {
                ($($args:tt)*) => {};
            }
            pub(crate) use debug;
        }
    }
}

/// Concurrent ordinary keys a boot-protocol report can carry.
pub const ROLLOVER: usize = 6;

/// The per-cycle driver.
///
/// Owns the persistent slot state and keeps the last cycle's scan results
/// around for inspection. Single-threaded by construction: one cycle runs to
/// completion before the next starts, and nothing else touches the state.
pub struct Controller {
    slots: resolve::Slots,
    pressed: ArrayVec<Key, { ROWS * COLS }>,
    released: ArrayVec<Key, ROLLOVER>,
    ordinary_seen: u8,
}

impl Controller {
    pub fn new() -> Controller {
        Controller {
            slots: resolve::Slots::new(),
            pressed: ArrayVec::new(),
            released: ArrayVec::new(),
            ordinary_seen: 0,
        }
    }

    /// Run one scan → resolve → emit cycle against the given layout table.
    ///
    /// The table reference is taken fresh each call; switching variants
    /// between cycles is the caller's decision. Exactly one report goes to
    /// `sink` per call.
    pub fn cycle<S: KeySense, T: ReportSink>(
        &mut self,
        layout: &Layout,
        sense: &mut S,
        sink: &mut T,
    ) {
        let frame = scan::scan(layout, sense);

        self.released = self.slots.resolve(&frame);
        let media = resolve::resolve_media(&frame);

        let report = Report::build(self.slots.codes(), frame.mods, media);
        sink.send(&report);

        self.pressed = frame.all;
        self.ordinary_seen = frame.ordinary_seen;
    }

    /// Every pressed key the last cycle saw, in scan order, including
    /// modifiers, layer shifts and media keys.
    pub fn pressed(&self) -> &[Key] {
        &self.pressed
    }

    /// Keys whose slots were freed on the last cycle.
    pub fn just_released(&self) -> &[Key] {
        &self.released
    }

    /// Ordinary keys the last cycle saw, counting past the rollover cap.
    pub fn ordinary_seen(&self) -> u8 {
        self.ordinary_seen
    }

    /// The key resident in each output slot.
    pub fn slots(&self) -> &[Option<Key>; ROLLOVER] {
        self.slots.keys()
    }
}

impl Default for Controller {
    fn default() -> Self {
        Controller::new()
    }
}
