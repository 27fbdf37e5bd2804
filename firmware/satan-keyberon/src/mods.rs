//! Modifier mask, in the bit order of the HID keyboard report.

use bitflags::bitflags;
use keyberon::key_code::KeyCode;

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Mods: u8 {
        const LCTRL = 0x01;
        const LSHIFT = 0x02;
        const LALT = 0x04;
        const LGUI = 0x08;
        const RCTRL = 0x10;
        const RSHIFT = 0x20;
        const RALT = 0x40;
        const RGUI = 0x80;

        const SHIFT = Self::LSHIFT.bits() | Self::RSHIFT.bits();
    }
}

impl Mods {
    /// Modifier bit of a single key code, empty for non-modifier keys.
    pub fn from_keycode(kc: KeyCode) -> Self {
        let code = kc as u8;
        let first = KeyCode::LCtrl as u8;
        if (first..=KeyCode::RGui as u8).contains(&code) {
            Self::from_bits_truncate(1 << (code - first))
        } else {
            Self::empty()
        }
    }

    /// Modifier state of a set of held key codes, e.g. `Layout::keycodes()`.
    pub fn from_keycodes(kcs: impl IntoIterator<Item = KeyCode>) -> Self {
        kcs.into_iter()
            .fold(Self::empty(), |mods, kc| mods | Self::from_keycode(kc))
    }

    pub fn shifted(self) -> bool {
        self.intersects(Self::SHIFT)
    }
}

impl defmt::Format for Mods {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "Mods({=u8:#04x})", self.bits())
    }
}
