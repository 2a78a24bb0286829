//! Report assembly and the outbound transport seam.

use usbd_human_interface_device::page::{Consumer, Keyboard};

use crate::keys::Mods;
use crate::ROLLOVER;

/// One host-bound frame: six key usages in fixed slot order, the modifier
/// byte, and one consumer-control usage.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Report {
    pub keys: [Keyboard; ROLLOVER],
    pub mods: Mods,
    pub media: Consumer,
}

impl Report {
    pub const fn empty() -> Report {
        Report {
            keys: [Keyboard::NoEventIndicated; ROLLOVER],
            mods: Mods::empty(),
            media: Consumer::Unassigned,
        }
    }

    /// Assemble the cycle's frame from the resolved slot codes.
    pub fn build(codes: &[Keyboard; ROLLOVER], mods: Mods, media: Consumer) -> Report {
        Report {
            keys: *codes,
            mods,
            media,
        }
    }
}

/// Host-facing HID transport.
///
/// Receives exactly one report per scan cycle, fire-and-forget: framing,
/// retries and delivery failures are the transport's concern, and the engine
/// never buffers or re-sends.
pub trait ReportSink {
    fn send(&mut self, report: &Report);
}
