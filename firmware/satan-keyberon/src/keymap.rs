//! Walks over a layer table.

use keyberon::action::Action;

use crate::layouts::common::{CustomAction, Layers};

/// Every entry of the table with its (row, column), layer by layer.
pub fn entries<const C: usize, const R: usize, const L: usize>(
    layers: &Layers<C, R, L>,
) -> impl Iterator<Item = ((u8, u8), &Action<CustomAction>)> + '_ {
    layers.iter().flat_map(|layer| {
        layer.iter().enumerate().flat_map(|(i, row)| {
            row.iter()
                .enumerate()
                .map(move |(j, action)| ((i as u8, j as u8), action))
        })
    })
}

/// Every function id referenced anywhere in the table.
pub fn function_ids<const C: usize, const R: usize, const L: usize>(
    layers: &Layers<C, R, L>,
) -> impl Iterator<Item = u8> + '_ {
    entries(layers).filter_map(|(_, action)| match action {
        Action::Custom(CustomAction::Function(id)) => Some(*id),
        _ => None,
    })
}

/// Position of the table entry `value` lives in.
///
/// Keyberon's custom events borrow the custom action straight out of the
/// table, from whichever layer the key resolved on. Entries are matched by
/// address, so equal actions at different positions stay apart.
pub fn custom_coord<const C: usize, const R: usize, const L: usize>(
    layers: &Layers<C, R, L>,
    value: &CustomAction,
) -> Option<(u8, u8)> {
    entries(layers).find_map(|(coord, action)| match action {
        Action::Custom(custom) if core::ptr::eq(custom, value) => Some(coord),
        _ => None,
    })
}
