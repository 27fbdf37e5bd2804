//! Keys pressed by function handlers, merged into keyberon's HID report.

use heapless::Vec;
use keyberon::key_code::{KbHidReport, KeyCode};
use keyberon::layout::Layout;

use crate::function::{Host, MAX_HELD};
use crate::layouts::common::CustomAction;
use crate::log::warn;
use crate::mods::Mods;

#[derive(Debug, Default)]
pub struct PendingKeys {
    keys: Vec<KeyCode, MAX_HELD>,
    flush: bool,
}

impl PendingKeys {
    pub const fn new() -> Self {
        Self {
            keys: Vec::new(),
            flush: false,
        }
    }

    pub fn add(&mut self, kc: KeyCode) {
        if self.keys.contains(&kc) {
            return;
        }
        if self.keys.push(kc).is_err() {
            warn!("no room for key {}", kc as u8);
        }
    }

    pub fn del(&mut self, kc: KeyCode) {
        self.keys.retain(|&k| k != kc);
    }

    pub fn keycodes(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.keys.iter().copied()
    }

    pub fn request_flush(&mut self) {
        self.flush = true;
    }

    /// Whether a report was requested since the last call.
    pub fn take_flush(&mut self) -> bool {
        core::mem::replace(&mut self.flush, false)
    }

    /// Report with keyberon's keys and the pending ones.
    pub fn hid_report<const C: usize, const R: usize, const L: usize>(
        &self,
        layout: &Layout<C, R, L, CustomAction>,
    ) -> KbHidReport {
        layout.keycodes().chain(self.keycodes()).collect()
    }
}

/// `Host` backed by a keyberon layout, modifiers come from the keys it
/// currently reports.
pub struct LayoutHost<'a, const C: usize, const R: usize, const L: usize> {
    layout: &'a Layout<C, R, L, CustomAction>,
    pending: &'a mut PendingKeys,
}

impl<'a, const C: usize, const R: usize, const L: usize> LayoutHost<'a, C, R, L> {
    pub fn new(layout: &'a Layout<C, R, L, CustomAction>, pending: &'a mut PendingKeys) -> Self {
        Self { layout, pending }
    }
}

impl<'a, const C: usize, const R: usize, const L: usize> Host for LayoutHost<'a, C, R, L> {
    fn mods(&self) -> Mods {
        Mods::from_keycodes(self.layout.keycodes())
    }

    fn add_key(&mut self, kc: KeyCode) {
        self.pending.add(kc);
    }

    fn del_key(&mut self, kc: KeyCode) {
        self.pending.del(kc);
    }

    fn send_report(&mut self) {
        self.pending.request_flush();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use keyberon::action::k;
    use keyberon::key_code::KeyCode::*;
    use keyberon::layout::{Event, Layers};

    static LAYERS: Layers<2, 1, 1, CustomAction> = [[[k(LShift), k(A)]]];

    #[test]
    fn pending_keys_are_a_set() {
        let mut pending = PendingKeys::new();
        pending.add(Escape);
        pending.add(Escape);
        pending.add(Grave);
        assert_eq!(vec![Escape, Grave], pending.keycodes().collect::<std::vec::Vec<_>>());

        pending.del(Escape);
        pending.del(Escape);
        assert_eq!(vec![Grave], pending.keycodes().collect::<std::vec::Vec<_>>());
    }

    #[test]
    fn flush_is_taken_once() {
        let mut pending = PendingKeys::new();
        assert!(!pending.take_flush());
        pending.request_flush();
        assert!(pending.take_flush());
        assert!(!pending.take_flush());
    }

    #[test]
    fn host_reads_modifiers_from_layout() {
        let mut layout = Layout::new(&LAYERS);
        let mut pending = PendingKeys::new();

        assert_eq!(Mods::empty(), LayoutHost::new(&layout, &mut pending).mods());

        layout.event(Event::Press(0, 0));
        layout.tick();
        layout.event(Event::Press(0, 1));
        layout.tick();
        let mut host = LayoutHost::new(&layout, &mut pending);
        assert_eq!(Mods::LSHIFT, host.mods());

        host.add_key(Grave);
        host.send_report();
        assert!(pending.take_flush());

        let report = pending.hid_report(&layout);
        let expected: KbHidReport = [LShift, A, Grave].iter().copied().collect();
        assert_eq!(expected.as_bytes(), report.as_bytes());
    }
}
