//! Logical key assignments.
//!
//! Every position of a layout table carries a [`Key`]: the code it emits
//! normally, and optional alternate codes for the Fn and Fn2 layer shifts.
//! Keys are plain values; the tables define them once and the engine copies
//! them into its working buffers.

use bitflags::bitflags;
use usbd_human_interface_device::page::{Consumer, Keyboard};

bitflags! {
    /// The boot-protocol modifier byte.
    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    pub struct Mods: u8 {
        const LEFT_CTRL = 0x01;
        const LEFT_SHIFT = 0x02;
        const LEFT_ALT = 0x04;
        const LEFT_GUI = 0x08;
        const RIGHT_CTRL = 0x10;
        const RIGHT_SHIFT = 0x20;
        const RIGHT_ALT = 0x40;
        const RIGHT_GUI = 0x80;
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Mods {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "Mods({})", self.bits());
    }
}

/// Modifier identities a layout position can carry.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Modifier {
    LeftShift,
    LeftCtrl,
    LeftAlt,
    RightAlt,
    Gui,
    RightShift,
}

impl Modifier {
    /// The bit this modifier contributes to the report's modifier byte.
    pub fn bit(self) -> Mods {
        match self {
            Modifier::LeftShift => Mods::LEFT_SHIFT,
            Modifier::LeftCtrl => Mods::LEFT_CTRL,
            Modifier::LeftAlt => Mods::LEFT_ALT,
            Modifier::RightAlt => Mods::RIGHT_ALT,
            Modifier::Gui => Mods::LEFT_GUI,
            Modifier::RightShift => Mods::RIGHT_SHIFT,
        }
    }
}

/// What one layout position emits.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Code {
    /// Unpopulated position, or an absent alternate.
    None,
    /// Ordinary keyboard usage, delivered through the rollover slots.
    Hid(Keyboard),
    /// Modifier identity, aggregated into the modifier byte.
    Mod(Modifier),
    /// Momentary shift to the Fn layer while held.
    FnShift,
    /// Momentary shift to the Fn2 layer while held.
    Fn2Shift,
    /// Consumer-control usage, delivered through the media channel.
    Media(Consumer),
}

impl Code {
    pub fn is_none(self) -> bool {
        matches!(self, Code::None)
    }

    /// The keyboard usage carried by this code, if any.
    pub fn hid(self) -> Option<Keyboard> {
        match self {
            Code::Hid(k) => Some(k),
            _ => None,
        }
    }

    /// The consumer usage carried by this code, if any.
    pub fn consumer(self) -> Option<Consumer> {
        match self {
            Code::Media(c) => Some(c),
            _ => None,
        }
    }
}

/// One logical key assignment at a layout position.
///
/// `fn_alt` and `fn2_alt` are emitted in place of `base` while the Fn or Fn2
/// layer shift is held; [`Code::None`] marks an absent alternate.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Key {
    pub base: Code,
    pub fn_alt: Code,
    pub fn2_alt: Code,
}

/// Key identity compares the base and Fn codes only; the Fn2 code does not
/// participate. Slot dedup and release detection rely on exactly this.
impl PartialEq for Key {
    fn eq(&self, other: &Key) -> bool {
        self.base == other.base && self.fn_alt == other.fn_alt
    }
}

impl Eq for Key {}

impl Key {
    /// An unpopulated matrix position.
    pub const EMPTY: Key = Key::new(Code::None, Code::None, Code::None);

    pub const fn new(base: Code, fn_alt: Code, fn2_alt: Code) -> Key {
        Key {
            base,
            fn_alt,
            fn2_alt,
        }
    }

    /// Ordinary key with no alternates.
    pub const fn plain(base: Keyboard) -> Key {
        Key::new(Code::Hid(base), Code::None, Code::None)
    }

    /// Ordinary key with an Fn-layer alternate.
    pub const fn with_fn(base: Keyboard, fn_alt: Keyboard) -> Key {
        Key::new(Code::Hid(base), Code::Hid(fn_alt), Code::None)
    }

    /// Ordinary key with an Fn2-layer alternate.
    pub const fn with_fn2(base: Keyboard, fn2_alt: Keyboard) -> Key {
        Key::new(Code::Hid(base), Code::None, Code::Hid(fn2_alt))
    }

    pub const fn modifier(modifier: Modifier) -> Key {
        Key::new(Code::Mod(modifier), Code::None, Code::None)
    }

    pub const fn fn_shift() -> Key {
        Key::new(Code::FnShift, Code::None, Code::None)
    }

    pub const fn fn2_shift() -> Key {
        Key::new(Code::Fn2Shift, Code::None, Code::None)
    }

    /// Media key.
    pub const fn media(base: Consumer) -> Key {
        Key::new(Code::Media(base), Code::None, Code::None)
    }

    /// Media key with an Fn-layer alternate usage.
    pub const fn media_with_fn(base: Consumer, fn_alt: Consumer) -> Key {
        Key::new(Code::Media(base), Code::Media(fn_alt), Code::None)
    }

    /// An unpopulated position, excluded from every classification path.
    pub fn is_empty(&self) -> bool {
        self.base.is_none()
    }

    pub fn is_modifier(&self) -> bool {
        matches!(self.base, Code::Mod(_))
    }

    pub fn is_fn_shift(&self) -> bool {
        matches!(self.base, Code::FnShift)
    }

    pub fn is_fn2_shift(&self) -> bool {
        matches!(self.base, Code::Fn2Shift)
    }

    pub fn is_media(&self) -> bool {
        matches!(self.base, Code::Media(_))
    }

    pub fn has_fn_alt(&self) -> bool {
        !self.fn_alt.is_none()
    }

    pub fn has_fn2_alt(&self) -> bool {
        !self.fn2_alt.is_none()
    }

    /// Effective code under the active layer shifts. Fn2 wins over Fn when
    /// both are held and both alternates exist.
    pub fn resolve(&self, fn_held: bool, fn2_held: bool) -> Code {
        if fn2_held && self.has_fn2_alt() {
            self.fn2_alt
        } else if fn_held && self.has_fn_alt() {
            self.fn_alt
        } else {
            self.base
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        assert!(Key::EMPTY.is_empty());
        assert!(Key::modifier(Modifier::LeftShift).is_modifier());
        assert!(Key::fn_shift().is_fn_shift());
        assert!(Key::fn2_shift().is_fn2_shift());
        assert!(Key::media(Consumer::PlayPause).is_media());

        let plain = Key::plain(Keyboard::A);
        assert!(!plain.is_empty());
        assert!(!plain.is_modifier());
        assert!(!plain.has_fn_alt());
        assert!(!plain.has_fn2_alt());
    }

    #[test]
    fn identity_ignores_fn2_alt() {
        let bare = Key::plain(Keyboard::A);
        let with_pad = Key::with_fn2(Keyboard::A, Keyboard::Keypad4);
        let with_f1 = Key::with_fn(Keyboard::A, Keyboard::F1);

        assert_eq!(bare, with_pad);
        assert_ne!(bare, with_f1);
        assert_ne!(with_pad, with_f1);
    }

    #[test]
    fn layer_resolution_precedence() {
        let key = Key::new(
            Code::Hid(Keyboard::E),
            Code::Hid(Keyboard::F3),
            Code::Hid(Keyboard::Keypad9),
        );

        assert_eq!(key.resolve(false, false), Code::Hid(Keyboard::E));
        assert_eq!(key.resolve(true, false), Code::Hid(Keyboard::F3));
        assert_eq!(key.resolve(false, true), Code::Hid(Keyboard::Keypad9));
        // Both layers held: Fn2 wins.
        assert_eq!(key.resolve(true, true), Code::Hid(Keyboard::Keypad9));
    }

    #[test]
    fn missing_alternates_fall_back_to_base() {
        let key = Key::with_fn(Keyboard::L, Keyboard::UpArrow);
        assert_eq!(key.resolve(false, true), Code::Hid(Keyboard::L));
        assert_eq!(key.resolve(true, true), Code::Hid(Keyboard::UpArrow));

        let bare = Key::plain(Keyboard::Z);
        assert_eq!(bare.resolve(true, true), Code::Hid(Keyboard::Z));
    }

    #[test]
    fn modifier_bits() {
        assert_eq!(Modifier::LeftCtrl.bit(), Mods::LEFT_CTRL);
        assert_eq!(Modifier::RightShift.bit(), Mods::RIGHT_SHIFT);
        assert_eq!(Modifier::Gui.bit(), Mods::LEFT_GUI);
        assert_eq!(
            Modifier::LeftShift.bit() | Modifier::RightAlt.bit(),
            Mods::LEFT_SHIFT | Mods::RIGHT_ALT
        );
    }
}
