//! Matrix scanning.
//!
//! Once per cycle the engine walks every matrix position in row-major order,
//! asks the hardware-sense collaborator whether the switch there is active,
//! and classifies whatever it finds into a [`ScanFrame`]. There is no
//! debouncing here: a key is pressed exactly when the sense reports it
//! active, and any bounce suppression belongs to the sense implementation.

use arrayvec::ArrayVec;

use crate::keys::{Code, Key, Mods};
use crate::layout::{Layout, COLS, ROWS};
use crate::ROLLOVER;

/// Hardware sense for the switch matrix.
///
/// Implementations drive whatever electrical scheme the board uses; `read`
/// answers whether the switch at `(row, col)` is active right now. The
/// engine queries each position exactly once per cycle.
pub trait KeySense {
    fn read(&mut self, row: usize, col: usize) -> bool;
}

/// Everything one scan pass found. Rebuilt from scratch every cycle.
pub struct ScanFrame {
    /// Every pressed, populated key, in scan order. Sized by the matrix
    /// itself, so never capacity-limited.
    pub all: ArrayVec<Key, { ROWS * COLS }>,
    /// Ordinary keys in scan order, capped at the rollover limit.
    pub ordinary: ArrayVec<Key, ROLLOVER>,
    /// Ordinary keys seen this cycle, counting past the cap.
    pub ordinary_seen: u8,
    /// OR of every pressed modifier's bit.
    pub mods: Mods,
    /// The Fn layer shift is held.
    pub fn_held: bool,
    /// The Fn2 layer shift is held.
    pub fn2_held: bool,
    /// Last media key seen in scan order, if any.
    pub media: Option<Key>,
}

impl ScanFrame {
    pub fn new() -> ScanFrame {
        ScanFrame {
            all: ArrayVec::new(),
            ordinary: ArrayVec::new(),
            ordinary_seen: 0,
            mods: Mods::empty(),
            fn_held: false,
            fn2_held: false,
            media: None,
        }
    }
}

impl Default for ScanFrame {
    fn default() -> Self {
        ScanFrame::new()
    }
}

/// Scan the whole matrix once against the given table.
///
/// Scan order only matters for the media channel, where the last media key
/// seen wins.
pub fn scan<S: KeySense>(layout: &Layout, sense: &mut S) -> ScanFrame {
    let mut frame = ScanFrame::new();

    for (row, keys) in layout.iter().enumerate() {
        for (col, &key) in keys.iter().enumerate() {
            if !sense.read(row, col) || key.is_empty() {
                continue;
            }

            frame.all.push(key);

            match key.base {
                Code::FnShift => frame.fn_held = true,
                Code::Fn2Shift => frame.fn2_held = true,
                Code::Mod(modifier) => frame.mods |= modifier.bit(),
                Code::Media(_) => frame.media = Some(key),
                Code::Hid(_) => {
                    if frame.ordinary.len() < ROLLOVER {
                        frame.ordinary.push(key);
                    }
                    frame.ordinary_seen += 1;
                }
                // Unpopulated positions were excluded above.
                Code::None => (),
            }
        }
    }

    frame
}
