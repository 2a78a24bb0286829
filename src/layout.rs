//! Layout tables.
//!
//! The board is a 5×14 matrix. Two tables are shipped: [`Variant::Base`]
//! puts digits on the top row with F-keys behind Fn, [`Variant::Special`]
//! swaps that row so the F-keys are primary. The remaining rows are shared.
//! Which table the engine scans against is the caller's decision, taken
//! fresh every cycle.
//!
//! Column 0 is the rightmost column of the physical board.

use usbd_human_interface_device::page::Keyboard;

use crate::keys::{Key, Modifier};

/// Matrix rows.
pub const ROWS: usize = 5;
/// Matrix columns.
pub const COLS: usize = 14;

/// A full table of key assignments, indexed `[row][col]`.
pub type Layout = [[Key; COLS]; ROWS];

/// The selectable layout tables.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Variant {
    Base,
    Special,
}

impl Variant {
    pub fn table(self) -> &'static Layout {
        match self {
            Variant::Base => &BASE,
            Variant::Special => &SPECIAL,
        }
    }
}

/// Unpopulated position.
const ___: Key = Key::EMPTY;
const FN: Key = Key::fn_shift();
const FN2: Key = Key::fn2_shift();

const fn k(base: Keyboard) -> Key {
    Key::plain(base)
}

const fn f(base: Keyboard, fn_alt: Keyboard) -> Key {
    Key::with_fn(base, fn_alt)
}

/// Keypad alternate on the Fn2 layer.
const fn pad(base: Keyboard, fn2_alt: Keyboard) -> Key {
    Key::with_fn2(base, fn2_alt)
}

const fn m(modifier: Modifier) -> Key {
    Key::modifier(modifier)
}

pub static BASE: Layout = [
    // Row 0: number row
    [
        k(Keyboard::DeleteBackspace),
        f(Keyboard::Equal, Keyboard::F12),
        f(Keyboard::Minus, Keyboard::F11),
        f(Keyboard::Keyboard0, Keyboard::F10),
        f(Keyboard::Keyboard9, Keyboard::F9),
        f(Keyboard::Keyboard8, Keyboard::F8),
        f(Keyboard::Keyboard7, Keyboard::F7),
        f(Keyboard::Keyboard6, Keyboard::F6),
        f(Keyboard::Keyboard5, Keyboard::F5),
        f(Keyboard::Keyboard4, Keyboard::F4),
        f(Keyboard::Keyboard3, Keyboard::F3),
        f(Keyboard::Keyboard2, Keyboard::F2),
        f(Keyboard::Keyboard1, Keyboard::F1),
        f(Keyboard::Escape, Keyboard::Grave),
    ],
    // Row 1: top letter row, keypad digits behind Fn2 on the left hand
    [
        ___,
        k(Keyboard::RightBrace),
        k(Keyboard::LeftBrace),
        k(Keyboard::P),
        k(Keyboard::O),
        k(Keyboard::I),
        k(Keyboard::U),
        k(Keyboard::Y),
        k(Keyboard::T),
        k(Keyboard::R),
        pad(Keyboard::E, Keyboard::Keypad9),
        pad(Keyboard::W, Keyboard::Keypad8),
        pad(Keyboard::Q, Keyboard::Keypad7),
        k(Keyboard::Tab),
    ],
    // Row 2: home row
    [
        k(Keyboard::ReturnEnter),
        k(Keyboard::Backslash),
        k(Keyboard::Apostrophe),
        k(Keyboard::Semicolon),
        f(Keyboard::L, Keyboard::UpArrow),
        k(Keyboard::K),
        k(Keyboard::J),
        k(Keyboard::H),
        k(Keyboard::G),
        k(Keyboard::F),
        pad(Keyboard::D, Keyboard::Keypad6),
        pad(Keyboard::S, Keyboard::Keypad5),
        pad(Keyboard::A, Keyboard::Keypad4),
        k(Keyboard::CapsLock),
    ],
    // Row 3: bottom letter row, arrows behind Fn
    [
        m(Modifier::RightShift),
        ___,
        f(Keyboard::ForwardSlash, Keyboard::RightArrow),
        f(Keyboard::Dot, Keyboard::DownArrow),
        f(Keyboard::Comma, Keyboard::LeftArrow),
        k(Keyboard::M),
        k(Keyboard::N),
        k(Keyboard::B),
        k(Keyboard::V),
        pad(Keyboard::C, Keyboard::Keypad3),
        pad(Keyboard::X, Keyboard::Keypad2),
        pad(Keyboard::Z, Keyboard::Keypad1),
        pad(Keyboard::NonUSBackslash, Keyboard::Keypad0),
        m(Modifier::LeftShift),
    ],
    // Row 4: modifier row
    [
        m(Modifier::LeftCtrl),
        FN,
        FN2,
        m(Modifier::RightAlt),
        ___,
        ___,
        ___,
        k(Keyboard::Space),
        ___,
        ___,
        ___,
        m(Modifier::LeftAlt),
        m(Modifier::Gui),
        m(Modifier::LeftCtrl),
    ],
];

pub static SPECIAL: Layout = [
    // Row 0: F-keys primary, digits behind Fn
    [
        k(Keyboard::DeleteBackspace),
        f(Keyboard::F12, Keyboard::Equal),
        f(Keyboard::F11, Keyboard::Minus),
        f(Keyboard::F10, Keyboard::Keyboard0),
        f(Keyboard::F9, Keyboard::Keyboard9),
        f(Keyboard::F8, Keyboard::Keyboard8),
        f(Keyboard::F7, Keyboard::Keyboard7),
        f(Keyboard::F6, Keyboard::Keyboard6),
        f(Keyboard::F5, Keyboard::Keyboard5),
        f(Keyboard::F4, Keyboard::Keyboard4),
        f(Keyboard::F3, Keyboard::Keyboard3),
        f(Keyboard::F2, Keyboard::Keyboard2),
        f(Keyboard::F1, Keyboard::Keyboard1),
        f(Keyboard::Escape, Keyboard::Grave),
    ],
    // Rows 1-4 match the base table.
    [
        ___,
        k(Keyboard::RightBrace),
        k(Keyboard::LeftBrace),
        k(Keyboard::P),
        k(Keyboard::O),
        k(Keyboard::I),
        k(Keyboard::U),
        k(Keyboard::Y),
        k(Keyboard::T),
        k(Keyboard::R),
        pad(Keyboard::E, Keyboard::Keypad9),
        pad(Keyboard::W, Keyboard::Keypad8),
        pad(Keyboard::Q, Keyboard::Keypad7),
        k(Keyboard::Tab),
    ],
    [
        k(Keyboard::ReturnEnter),
        k(Keyboard::Backslash),
        k(Keyboard::Apostrophe),
        k(Keyboard::Semicolon),
        f(Keyboard::L, Keyboard::UpArrow),
        k(Keyboard::K),
        k(Keyboard::J),
        k(Keyboard::H),
        k(Keyboard::G),
        k(Keyboard::F),
        pad(Keyboard::D, Keyboard::Keypad6),
        pad(Keyboard::S, Keyboard::Keypad5),
        pad(Keyboard::A, Keyboard::Keypad4),
        k(Keyboard::CapsLock),
    ],
    [
        m(Modifier::RightShift),
        ___,
        f(Keyboard::ForwardSlash, Keyboard::RightArrow),
        f(Keyboard::Dot, Keyboard::DownArrow),
        f(Keyboard::Comma, Keyboard::LeftArrow),
        k(Keyboard::M),
        k(Keyboard::N),
        k(Keyboard::B),
        k(Keyboard::V),
        pad(Keyboard::C, Keyboard::Keypad3),
        pad(Keyboard::X, Keyboard::Keypad2),
        pad(Keyboard::Z, Keyboard::Keypad1),
        pad(Keyboard::NonUSBackslash, Keyboard::Keypad0),
        m(Modifier::LeftShift),
    ],
    [
        m(Modifier::LeftCtrl),
        FN,
        FN2,
        m(Modifier::RightAlt),
        ___,
        ___,
        ___,
        k(Keyboard::Space),
        ___,
        ___,
        ___,
        m(Modifier::LeftAlt),
        m(Modifier::Gui),
        m(Modifier::LeftCtrl),
    ],
];
