use keyberon::action::{k, l, m, Action, HoldTapAction, HoldTapConfig};
use keyberon::key_code::KeyCode::{self, *};

use crate::backlight::BacklightAction;

pub type Layers<const C: usize, const R: usize, const L: usize> =
    keyberon::layout::Layers<C, R, L, CustomAction>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, defmt::Format)]
pub enum CustomAction {
    /// Function id, resolved through `function::FN_ACTIONS`.
    Function(u8),
    Backlight(BacklightAction),
    Bootloader,
}

/// Reference to the function with the given id.
pub const fn f(id: u8) -> Action<CustomAction> {
    Action::Custom(CustomAction::Function(id))
}

pub const fn hold_layer_tap_key(
    layer: usize,
    key: KeyCode,
) -> HoldTapAction<CustomAction, KeyCode> {
    return HoldTapAction {
        timeout: 200,
        tap_hold_interval: 0,
        config: HoldTapConfig::Default,
        hold: l(layer),
        tap: k(key),
    };
}

// shifted number row
pub const EXLM: Action<CustomAction> = m(&&[LShift, Kb1].as_slice());
pub const AT: Action<CustomAction> = m(&&[LShift, Kb2].as_slice());
pub const HASH: Action<CustomAction> = m(&&[LShift, Kb3].as_slice());
pub const DLR: Action<CustomAction> = m(&&[LShift, Kb4].as_slice());
pub const PERC: Action<CustomAction> = m(&&[LShift, Kb5].as_slice());
pub const CIRC: Action<CustomAction> = m(&&[LShift, Kb6].as_slice());
pub const AMPR: Action<CustomAction> = m(&&[LShift, Kb7].as_slice());
pub const ASTR: Action<CustomAction> = m(&&[LShift, Kb8].as_slice());
pub const LPRN: Action<CustomAction> = m(&&[LShift, Kb9].as_slice());
pub const RPRN: Action<CustomAction> = m(&&[LShift, Kb0].as_slice());

pub const BL_DEC: Action<CustomAction> =
    Action::Custom(CustomAction::Backlight(BacklightAction::Decrease));
pub const BL_INC: Action<CustomAction> =
    Action::Custom(CustomAction::Backlight(BacklightAction::Increase));
pub const BL_TOGG: Action<CustomAction> =
    Action::Custom(CustomAction::Backlight(BacklightAction::Toggle));

/// Hands the controller over to the ROM USB bootloader. There is no way back
/// short of flashing or power cycling.
pub const BOOTLOADER: Action<CustomAction> = Action::Custom(CustomAction::Bootloader);
