//! Function keys: matrix entries that run code instead of reporting a key.
//!
//! A function key is placed in a layer with [`f`](crate::layouts::common::f)
//! and its id is looked up in [`FN_ACTIONS`]. Keyberon resolves the key like
//! any other and hands back a custom event; the handler runs at that point,
//! so layers and modifiers are exactly what keyberon saw for that key.
//! State is kept per physical key.

use heapless::LinearMap;
use keyberon::key_code::KeyCode;
use keyberon::layout::CustomEvent;

use crate::keymap;
use crate::layouts::common::{CustomAction, Layers};
use crate::log::{debug, warn};
use crate::mods::Mods;

/// Maximum number of function keys held at the same time.
pub const MAX_HELD: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, defmt::Format)]
pub enum FunctionAction {
    /// Escape, or Grave when a shift is held at press time.
    ShiftEsc,
}

/// Function id to action.
pub static FN_ACTIONS: [FunctionAction; 1] = [FunctionAction::ShiftEsc];

#[derive(Clone, Copy, Debug, PartialEq, Eq, defmt::Format)]
pub enum FunctionError {
    /// A layer references an id missing from `FN_ACTIONS`.
    UnknownFunction(u8),
    /// More than `MAX_HELD` function keys held at once.
    TooManyHeld,
    /// A function reference that is not an entry of the layer table.
    NotInLayers(u8),
}

pub fn lookup(id: u8) -> Result<FunctionAction, FunctionError> {
    FN_ACTIONS
        .get(usize::from(id))
        .copied()
        .ok_or(FunctionError::UnknownFunction(id))
}

/// Checks that every function referenced by `layers` exists.
pub fn check<const C: usize, const R: usize, const L: usize>(
    layers: &Layers<C, R, L>,
) -> Result<(), FunctionError> {
    keymap::function_ids(layers).try_for_each(|id| lookup(id).map(drop))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, defmt::Format)]
pub struct KeyRecord {
    /// Matrix position (row, column).
    pub coord: (u8, u8),
    pub pressed: bool,
}

impl KeyRecord {
    pub fn press(coord: (u8, u8)) -> Self {
        Self {
            coord,
            pressed: true,
        }
    }

    pub fn release(coord: (u8, u8)) -> Self {
        Self {
            coord,
            pressed: false,
        }
    }
}

/// What a function handler may do to the keyboard.
pub trait Host {
    /// Modifiers held right now.
    fn mods(&self) -> Mods;
    fn add_key(&mut self, kc: KeyCode);
    fn del_key(&mut self, kc: KeyCode);
    fn send_report(&mut self);
}

/// Sends Escape, or Grave when a shift is held.
///
/// The choice is made when the key goes down and remembered for that key
/// until it goes up, so letting go of shift first still releases Grave.
pub struct ShiftEsc<const N: usize> {
    held: LinearMap<(u8, u8), KeyCode, N>,
}

impl<const N: usize> ShiftEsc<N> {
    pub fn new() -> Self {
        Self {
            held: LinearMap::new(),
        }
    }

    #[cfg(test)]
    fn held(&self) -> usize {
        self.held.len()
    }

    pub fn process<H: Host>(&mut self, host: &mut H, record: KeyRecord) -> Result<(), FunctionError> {
        if record.pressed {
            let kc = if host.mods().shifted() {
                KeyCode::Grave
            } else {
                KeyCode::Escape
            };
            match self.held.insert(record.coord, kc) {
                Ok(Some(prev)) if prev != kc => host.del_key(prev),
                Ok(_) => (),
                Err(_) => return Err(FunctionError::TooManyHeld),
            }
            debug!(
                "shift-esc down at ({}, {}): {}",
                record.coord.0, record.coord.1, kc as u8
            );
            host.add_key(kc);
            host.send_report();
        } else if let Some(kc) = self.held.remove(&record.coord) {
            debug!(
                "shift-esc up at ({}, {}): {}",
                record.coord.0, record.coord.1, kc as u8
            );
            host.del_key(kc);
            host.send_report();
        }
        Ok(())
    }
}

impl<const N: usize> Default for ShiftEsc<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs function keys as keyberon reaches them.
pub struct Functions<const N: usize = MAX_HELD> {
    shift_esc: ShiftEsc<N>,
}

impl<const N: usize> Functions<N> {
    pub fn new() -> Self {
        Self {
            shift_esc: ShiftEsc::new(),
        }
    }

    /// Runs the function behind a custom event returned by
    /// `Layout::tick`, other custom actions are ignored. Must be called
    /// right after the tick, while the layout still holds the state the
    /// event was resolved in.
    ///
    /// Keyberon hands out custom actions as references into `layers`, the
    /// table entry referenced gives the key position.
    pub fn on_custom<H: Host, const C: usize, const R: usize, const L: usize>(
        &mut self,
        host: &mut H,
        layers: &Layers<C, R, L>,
        event: &CustomEvent<CustomAction>,
    ) -> Result<(), FunctionError> {
        let (value, pressed) = match *event {
            CustomEvent::Press(value) => (value, true),
            CustomEvent::Release(value) => (value, false),
            CustomEvent::NoEvent => return Ok(()),
        };
        let CustomAction::Function(id) = *value else {
            return Ok(());
        };
        let coord = keymap::custom_coord(layers, value).ok_or(FunctionError::NotInLayers(id))?;
        let record = if pressed {
            KeyRecord::press(coord)
        } else {
            KeyRecord::release(coord)
        };
        self.action_function(host, record, id, 0)
    }

    /// Runs function `id` for one key transition. `_opt` is the parameter
    /// byte of the function reference, unused by the current functions.
    pub fn action_function<H: Host>(
        &mut self,
        host: &mut H,
        record: KeyRecord,
        id: u8,
        _opt: u8,
    ) -> Result<(), FunctionError> {
        let res = match lookup(id)? {
            FunctionAction::ShiftEsc => self.shift_esc.process(host, record),
        };
        if let Err(e) = res {
            warn!("function {} at ({}, {}) failed", id, record.coord.0, record.coord.1);
            return Err(e);
        }
        Ok(())
    }
}

impl<const N: usize> Default for Functions<N> {
    fn default() -> Self {
        Self::new()
    }
}
