//! Slot resolution.
//!
//! The output buffer has six slots in a fixed order the transport depends
//! on. A key keeps the slot it was first given for as long as it stays
//! pressed; its slot is freed only when a scan no longer finds it. Releases
//! are processed to completion before any placement, so a slot freed this
//! cycle can be taken by a new key in the same cycle.

use arrayvec::ArrayVec;
use usbd_human_interface_device::page::{Consumer, Keyboard};

use crate::keys::Key;
use crate::log::debug;
use crate::scan::ScanFrame;
use crate::ROLLOVER;

/// The persistent output buffer: which key holds each slot, and the usage
/// each slot currently emits.
pub struct Slots {
    keys: [Option<Key>; ROLLOVER],
    codes: [Keyboard; ROLLOVER],
}

impl Slots {
    pub const fn new() -> Slots {
        Slots {
            keys: [None; ROLLOVER],
            codes: [Keyboard::NoEventIndicated; ROLLOVER],
        }
    }

    /// Resolved usage per slot for the current cycle, in fixed slot order.
    /// Free slots read as `NoEventIndicated`.
    pub fn codes(&self) -> &[Keyboard; ROLLOVER] {
        &self.codes
    }

    /// The key resident in each slot.
    pub fn keys(&self) -> &[Option<Key>; ROLLOVER] {
        &self.keys
    }

    /// Fold one scan frame into the buffer and return the keys released
    /// since the previous cycle.
    ///
    /// Phase order is load-bearing: all releases are cleared first, then
    /// new keys are placed, then every occupied slot's code is recomputed
    /// under the frame's layer flags. A held key never moves between slots,
    /// but a layer shift can change its code in place.
    pub fn resolve(&mut self, frame: &ScanFrame) -> ArrayVec<Key, ROLLOVER> {
        let released = self.remove_released(frame);
        for &key in &frame.ordinary {
            self.place(key);
        }
        self.recompute_codes(frame);
        released
    }

    fn remove_released(&mut self, frame: &ScanFrame) -> ArrayVec<Key, ROLLOVER> {
        let mut released = ArrayVec::new();

        for (slot, code) in self.keys.iter_mut().zip(self.codes.iter_mut()) {
            let Some(key) = *slot else { continue };
            if !frame.ordinary.contains(&key) {
                released.push(key);
                *slot = None;
                *code = Keyboard::NoEventIndicated;
            }
        }

        if !released.is_empty() {
            debug!("released {} keys", released.len());
        }

        released
    }

    /// One pass over the slots: nothing to do if `key` is already resident,
    /// otherwise take the lowest free slot. With every slot occupied the key
    /// is dropped for this cycle.
    fn place(&mut self, key: Key) {
        let mut free = None;

        for (i, slot) in self.keys.iter().enumerate() {
            match slot {
                Some(resident) if *resident == key => return,
                Some(_) => (),
                None => {
                    if free.is_none() {
                        free = Some(i);
                    }
                }
            }
        }

        if let Some(i) = free {
            self.keys[i] = Some(key);
        }
    }

    fn recompute_codes(&mut self, frame: &ScanFrame) {
        for (slot, code) in self.keys.iter().zip(self.codes.iter_mut()) {
            *code = match slot {
                Some(key) => key
                    .resolve(frame.fn_held, frame.fn2_held)
                    .hid()
                    .unwrap_or(Keyboard::NoEventIndicated),
                None => Keyboard::NoEventIndicated,
            };
        }
    }
}

impl Default for Slots {
    fn default() -> Self {
        Slots::new()
    }
}

/// Media channel resolution, independent of the slot buffer.
///
/// The Fn layer substitutes a media key's alternate usage when it has one;
/// Fn2 never applies to the media channel.
pub fn resolve_media(frame: &ScanFrame) -> Consumer {
    let Some(key) = frame.media else {
        return Consumer::Unassigned;
    };

    let code = if frame.fn_held && key.has_fn_alt() {
        key.fn_alt
    } else {
        key.base
    };
    code.consumer().unwrap_or(Consumer::Unassigned)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_of(keys: &[Key]) -> ScanFrame {
        let mut frame = ScanFrame::new();
        for &key in keys {
            if frame.ordinary.len() < ROLLOVER {
                frame.ordinary.push(key);
            }
            frame.ordinary_seen += 1;
        }
        frame
    }

    fn key(code: Keyboard) -> Key {
        Key::plain(code)
    }

    #[test]
    fn placement_fills_lowest_slots_in_scan_order() {
        let mut slots = Slots::new();
        let frame = frame_of(&[key(Keyboard::A), key(Keyboard::B)]);

        let released = slots.resolve(&frame);

        assert!(released.is_empty());
        assert_eq!(slots.keys()[0], Some(key(Keyboard::A)));
        assert_eq!(slots.keys()[1], Some(key(Keyboard::B)));
        assert_eq!(slots.codes()[0], Keyboard::A);
        assert_eq!(slots.codes()[1], Keyboard::B);
        assert_eq!(slots.codes()[2], Keyboard::NoEventIndicated);
    }

    #[test]
    fn resident_key_is_never_duplicated_or_moved() {
        let mut slots = Slots::new();
        slots.resolve(&frame_of(&[key(Keyboard::A), key(Keyboard::B)]));

        // Same keys again, reversed scan order: nothing moves.
        slots.resolve(&frame_of(&[key(Keyboard::B), key(Keyboard::A)]));

        assert_eq!(slots.keys()[0], Some(key(Keyboard::A)));
        assert_eq!(slots.keys()[1], Some(key(Keyboard::B)));
        assert_eq!(slots.keys()[2], None);
    }

    #[test]
    fn release_frees_slot_for_reuse_in_same_cycle() {
        let mut slots = Slots::new();
        slots.resolve(&frame_of(&[
            key(Keyboard::A),
            key(Keyboard::B),
            key(Keyboard::C),
            key(Keyboard::D),
            key(Keyboard::E),
            key(Keyboard::F),
        ]));

        // A goes up, G goes down in the same cycle: G lands in slot 0.
        let released = slots.resolve(&frame_of(&[
            key(Keyboard::B),
            key(Keyboard::C),
            key(Keyboard::D),
            key(Keyboard::E),
            key(Keyboard::F),
            key(Keyboard::G),
        ]));

        assert_eq!(released.as_slice(), &[key(Keyboard::A)]);
        assert_eq!(slots.keys()[0], Some(key(Keyboard::G)));
        assert_eq!(slots.keys()[1], Some(key(Keyboard::B)));
        assert_eq!(slots.keys()[5], Some(key(Keyboard::F)));
    }

    #[test]
    fn overflow_key_is_dropped_without_disturbing_residents() {
        let mut slots = Slots::new();
        slots.resolve(&frame_of(&[
            key(Keyboard::A),
            key(Keyboard::B),
            key(Keyboard::C),
            key(Keyboard::D),
            key(Keyboard::E),
            key(Keyboard::F),
        ]));

        let frame = frame_of(&[
            key(Keyboard::A),
            key(Keyboard::B),
            key(Keyboard::C),
            key(Keyboard::D),
            key(Keyboard::E),
            key(Keyboard::F),
            key(Keyboard::G),
        ]);
        assert_eq!(frame.ordinary_seen, 7);

        let released = slots.resolve(&frame);

        assert!(released.is_empty());
        assert_eq!(slots.keys()[0], Some(key(Keyboard::A)));
        assert_eq!(slots.keys()[5], Some(key(Keyboard::F)));
        assert!(!slots.keys().iter().any(|s| *s == Some(key(Keyboard::G))));
    }

    #[test]
    fn codes_follow_layer_flags_while_held() {
        let mut slots = Slots::new();
        let held = Key::with_fn(Keyboard::L, Keyboard::UpArrow);

        slots.resolve(&frame_of(&[held]));
        assert_eq!(slots.codes()[0], Keyboard::L);

        let mut frame = frame_of(&[held]);
        frame.fn_held = true;
        slots.resolve(&frame);

        // Same slot, different code.
        assert_eq!(slots.keys()[0], Some(held));
        assert_eq!(slots.codes()[0], Keyboard::UpArrow);
    }

    #[test]
    fn media_resolution_honors_fn_only() {
        let media = Key::media_with_fn(Consumer::VolumeIncrement, Consumer::Mute);

        let mut frame = ScanFrame::new();
        assert_eq!(resolve_media(&frame), Consumer::Unassigned);

        frame.media = Some(media);
        assert_eq!(resolve_media(&frame), Consumer::VolumeIncrement);

        frame.fn_held = true;
        assert_eq!(resolve_media(&frame), Consumer::Mute);

        // Fn2 has no say over the media channel.
        frame.fn_held = false;
        frame.fn2_held = true;
        assert_eq!(resolve_media(&frame), Consumer::VolumeIncrement);
    }
}
