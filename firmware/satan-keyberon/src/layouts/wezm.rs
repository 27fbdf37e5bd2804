use keyberon::action::{k, l, Action, Action::*, HoldTapAction};
use keyberon::key_code::KeyCode::{self, *};

use super::common::*;
use crate::keyboards::satan::{COLS, ROWS};

pub const BASE: usize = 0;
pub const FN: usize = 1;
pub const FN2: usize = 2;
pub const FN3: usize = 3;
pub const LAYER_COUNT: usize = 4;

/// Escape, Grave with shift.
pub const SHIFT_ESC: u8 = 0;

const TAB_FN2_HOLD_TAP: HoldTapAction<CustomAction, KeyCode> = hold_layer_tap_key(FN2, Tab);
const TAB_FN2: Action<CustomAction> = HoldTap(&TAB_FN2_HOLD_TAP);

// Rows are in matrix order, see `keyboards::satan`. The top right key (49)
// sits in row 4, the bottom row has holes at 43 44 46 47 48, and the right
// shift (3d) comes after 3c.
//
// base
// ,-----------------------------------------------------------.
// |Esc~| 1|  2|  3|  4|  5|  6|  7|  8|  9|  0|  -|  =|  \|Del|
// |-----------------------------------------------------------|
// |FN2/Tab|  Q|  W|  E|  R|  T|  Y|  U|  I|  O|  P|  [|  ]| Bsp|
// |-----------------------------------------------------------|
// |FN     |  A|  S|  D|  F|  G|  H|  J|  K|  L|  ;|  '|Return |
// |-----------------------------------------------------------|
// |Shift|FN3|  Z|  X|  C|  V|  B|  N|  M|  ,|  .|  /|Shift|Ctrl|
// |-----------------------------------------------------------|
// |Ctrl|Alt |Gui |      Space            |Gui |Alt |Menu|FN   |
// `-----------------------------------------------------------'
#[rustfmt::skip]
pub static LAYERS: Layers<COLS, ROWS, LAYER_COUNT> = [
    // base
    [
        [f(SHIFT_ESC), k(Kb1), k(Kb2), k(Kb3), k(Kb4), k(Kb5),  k(Kb6), k(Kb7), k(Kb8), k(Kb9),  k(Kb0),    k(Minus),    k(Equal),    k(Bslash)],
        [TAB_FN2,      k(Q),   k(W),   k(E),   k(R),   k(T),    k(Y),   k(U),   k(I),   k(O),    k(P),      k(LBracket), k(RBracket), k(BSpace)],
        [l(FN),        k(A),   k(S),   k(D),   k(F),   k(G),    k(H),   k(J),   k(K),   k(L),    k(SColon), k(Quote),    NoOp,        k(Enter)],
        [k(LShift),    l(FN3), k(Z),   k(X),   k(C),   k(V),    k(B),   k(N),   k(M),   k(Comma),k(Dot),    k(Slash),    k(RCtrl),    k(RShift)],
        [k(LCtrl),     k(LAlt),k(LGui),NoOp,   NoOp,   k(Space),NoOp,   NoOp,   NoOp,   k(Delete),k(RGui),  k(RAlt),     k(Menu),     l(FN)],
    ],
    // fn: F keys, backlight, symbols, arrows on hjkl
    [
        [k(Grave), k(F1), k(F2), k(F3), k(F4), k(F5), k(F6),   k(F7),   k(F8), k(F9),    k(F10), BL_DEC, BL_INC, BL_TOGG],
        [Trans,    EXLM,  AT,    HASH,  DLR,   PERC,  CIRC,    AMPR,    ASTR,  LPRN,     RPRN,   LPRN,   RPRN,   k(Bslash)],
        [Trans,    Trans, Trans, Trans, Trans, Trans, k(Left), k(Down), k(Up), k(Right), Trans,  Trans,  Trans,  Trans],
        [Trans,    Trans, Trans, Trans, Trans, Trans, Trans,   Trans,   Trans, Trans,    Trans,  Trans,  Trans,  Trans],
        [Trans,    Trans, Trans, NoOp,  NoOp,  Trans, NoOp,    NoOp,    NoOp,  k(PScreen), Trans, Trans, Trans,  Trans],
    ],
    // fn2: navigation on hjkl, bootloader on 49
    [
        [Trans, Trans, Trans, Trans, Trans, Trans, Trans,   Trans,     Trans,   Trans,      Trans, Trans, Trans, Trans],
        [Trans, Trans, Trans, Trans, Trans, Trans, Trans,   Trans,     Trans,   Trans,      Trans, Trans, Trans, Trans],
        [Trans, Trans, Trans, Trans, Trans, Trans, k(Home), k(PgDown), k(PgUp), k(End),     Trans, Trans, Trans, Trans],
        [Trans, Trans, Trans, Trans, Trans, Trans, Trans,   Trans,     Trans,   Trans,      Trans, Trans, Trans, Trans],
        [Trans, Trans, Trans, NoOp,  NoOp,  Trans, NoOp,    NoOp,      NoOp,    BOOTLOADER, Trans, Trans, Trans, Trans],
    ],
    // fn3: fn2 without the bootloader
    [
        [Trans, Trans, Trans, Trans, Trans, Trans, Trans,   Trans,     Trans,   Trans,  Trans, Trans, Trans, Trans],
        [Trans, Trans, Trans, Trans, Trans, Trans, Trans,   Trans,     Trans,   Trans,  Trans, Trans, Trans, Trans],
        [Trans, Trans, Trans, Trans, Trans, Trans, k(Home), k(PgDown), k(PgUp), k(End), Trans, Trans, Trans, Trans],
        [Trans, Trans, Trans, Trans, Trans, Trans, Trans,   Trans,     Trans,   Trans,  Trans, Trans, Trans, Trans],
        [Trans, Trans, Trans, NoOp,  NoOp,  Trans, NoOp,    NoOp,      NoOp,    Trans,  Trans, Trans, Trans, Trans],
    ],
];

#[cfg(test)]
mod test {
    use super::*;
    use crate::function::{self, FunctionAction, Functions};
    use crate::keyboards::satan::UNUSED;
    use crate::keymap;
    use crate::report::{LayoutHost, PendingKeys};
    use keyberon::layout::{CustomEvent, Event, Layout};
    use std::vec::Vec;

    struct Board {
        layout: Layout<COLS, ROWS, LAYER_COUNT, CustomAction>,
        functions: Functions,
        pending: PendingKeys,
    }

    impl Board {
        fn new() -> Self {
            Self {
                layout: Layout::new(&LAYERS),
                functions: Functions::new(),
                pending: PendingKeys::new(),
            }
        }

        fn event(&mut self, event: Event) {
            self.layout.event(event);
        }

        fn tick(&mut self) -> CustomEvent<CustomAction> {
            let custom = self.layout.tick();
            let mut host = LayoutHost::new(&self.layout, &mut self.pending);
            self.functions
                .on_custom(&mut host, &LAYERS, &custom)
                .unwrap();
            custom
        }

        fn ticks(&mut self, n: usize) {
            for _ in 0..n {
                self.tick();
            }
        }

        fn tap(&mut self, (i, j): (u8, u8)) -> CustomEvent<CustomAction> {
            self.event(Event::Press(i, j));
            let custom = self.tick();
            self.event(Event::Release(i, j));
            self.tick();
            custom
        }

        fn keys(&self) -> Vec<KeyCode> {
            self.layout
                .keycodes()
                .chain(self.pending.keycodes())
                .collect()
        }
    }

    fn action(layer: usize, (i, j): (u8, u8)) -> Option<&'static Action<CustomAction>> {
        LAYERS.get(layer)?.get(usize::from(i))?.get(usize::from(j))
    }

    fn all_coords() -> impl Iterator<Item = (u8, u8)> {
        (0..ROWS as u8).flat_map(|i| (0..COLS as u8).map(move |j| (i, j)))
    }

    #[test]
    fn every_position_is_defined() {
        for layer in 0..LAYER_COUNT {
            for coord in all_coords() {
                assert!(action(layer, coord).is_some());
            }
        }
        assert!(action(LAYER_COUNT, (0, 0)).is_none());
    }

    #[test]
    fn base_layer_is_opaque() {
        for coord in all_coords() {
            let action = action(BASE, coord).unwrap();
            assert!(!matches!(action, Trans), "transparent base at {:?}", coord);
        }
    }

    #[test]
    fn unused_positions_are_noop_everywhere() {
        for layer in 0..LAYER_COUNT {
            for coord in UNUSED {
                let action = action(layer, coord).unwrap();
                assert!(matches!(action, NoOp), "layer {} {:?}", layer, coord);
            }
        }
        // the one KC_NO on a real switch
        assert!(matches!(action(BASE, (2, 12)), Some(NoOp)));
    }

    #[test]
    fn function_references_are_defined() {
        let ids = keymap::function_ids(&LAYERS).collect::<Vec<_>>();
        assert_eq!(vec![SHIFT_ESC], ids);
        assert_eq!(Ok(()), function::check(&LAYERS));
        assert_eq!(Ok(FunctionAction::ShiftEsc), function::lookup(SHIFT_ESC));
    }

    #[test]
    fn top_right_key_per_layer() {
        let at = |layer| action(layer, (4, 9)).unwrap();
        assert!(matches!(at(BASE), Action::KeyCode(Delete)));
        assert!(matches!(at(FN), Action::KeyCode(PScreen)));
        assert!(matches!(at(FN2), Custom(CustomAction::Bootloader)));
        assert!(matches!(at(FN3), Trans));
    }

    #[test]
    fn bottom_row_right_side() {
        assert!(matches!(action(BASE, (4, 11)), Some(Action::KeyCode(RAlt))));
        assert!(matches!(action(BASE, (4, 12)), Some(Action::KeyCode(Menu))));
        assert!(matches!(action(BASE, (4, 13)), Some(Layer(FN))));
    }

    #[test]
    fn right_shift_sits_left_of_ctrl() {
        assert!(matches!(action(BASE, (3, 13)), Some(Action::KeyCode(RShift))));
        assert!(matches!(action(BASE, (3, 12)), Some(Action::KeyCode(RCtrl))));
    }

    #[test]
    fn shift_esc_sends_escape() {
        let mut board = Board::new();
        board.event(Event::Press(0, 0));
        board.tick();
        assert_eq!(vec![Escape], board.keys());

        board.event(Event::Release(0, 0));
        board.tick();
        assert!(board.keys().is_empty());
    }

    #[test]
    fn shift_esc_sends_grave_under_shift() {
        let mut board = Board::new();
        board.event(Event::Press(3, 0));
        board.tick();
        board.event(Event::Press(0, 0));
        board.tick();
        assert_eq!(vec![LShift, Grave], board.keys());

        // shift goes up first, the key still releases grave
        board.event(Event::Release(3, 0));
        board.tick();
        assert_eq!(vec![Grave], board.keys());
        board.event(Event::Release(0, 0));
        board.tick();
        assert!(board.keys().is_empty());
    }

    #[test]
    fn shift_esc_with_right_shift() {
        let mut board = Board::new();
        board.event(Event::Press(3, 13));
        board.tick();
        board.event(Event::Press(0, 0));
        board.tick();
        assert_eq!(vec![RShift, Grave], board.keys());
    }

    #[test]
    fn shift_pressed_after_escape_does_not_change_it() {
        let mut board = Board::new();
        board.event(Event::Press(0, 0));
        board.tick();
        board.event(Event::Press(3, 0));
        board.tick();
        assert_eq!(vec![LShift, Escape], board.keys());
        board.event(Event::Release(0, 0));
        board.tick();
        assert_eq!(vec![LShift], board.keys());
    }

    #[test]
    fn fn_layer_has_plain_grave() {
        let mut board = Board::new();
        board.event(Event::Press(2, 0));
        board.tick();
        assert_eq!(FN, board.layout.current_layer());

        board.event(Event::Press(0, 0));
        board.tick();
        assert_eq!(vec![Grave], board.keys());
        board.event(Event::Release(0, 0));
        board.tick();
        assert!(board.keys().is_empty());
    }

    #[test]
    fn fn_layer_arrows_and_symbols() {
        let mut board = Board::new();
        board.event(Event::Press(4, 13));
        board.tick();
        assert_eq!(FN, board.layout.current_layer());

        board.event(Event::Press(2, 6));
        board.tick();
        assert_eq!(vec![Left], board.keys());
        board.event(Event::Release(2, 6));
        board.tick();

        board.event(Event::Press(1, 1));
        board.tick();
        assert_eq!(vec![LShift, Kb1], board.keys());
    }

    #[test]
    fn fn_layer_backlight_keys() {
        let mut board = Board::new();
        board.event(Event::Press(2, 0));
        board.tick();

        let custom = board.tap((0, 11));
        assert!(matches!(
            custom,
            CustomEvent::Press(CustomAction::Backlight(crate::backlight::BacklightAction::Decrease))
        ));
        let custom = board.tap((0, 13));
        assert!(matches!(
            custom,
            CustomEvent::Press(CustomAction::Backlight(crate::backlight::BacklightAction::Toggle))
        ));
    }

    #[test]
    fn tab_tap_sends_tab() {
        let mut board = Board::new();
        board.event(Event::Press(1, 0));
        board.tick();
        board.event(Event::Release(1, 0));

        let mut seen = false;
        for _ in 0..5 {
            board.tick();
            seen |= board.keys().contains(&Tab);
        }
        assert!(seen);
        assert_eq!(BASE, board.layout.current_layer());
    }

    #[test]
    fn tab_hold_reaches_fn2_and_bootloader() {
        let mut board = Board::new();
        board.event(Event::Press(1, 0));
        for _ in 0..250 {
            board.tick();
        }
        assert_eq!(FN2, board.layout.current_layer());
        assert!(!board.keys().contains(&Tab));

        board.event(Event::Press(2, 6));
        board.tick();
        assert_eq!(vec![Home], board.keys());
        board.event(Event::Release(2, 6));
        board.tick();

        let custom = board.tap((4, 9));
        assert!(matches!(custom, CustomEvent::Press(CustomAction::Bootloader)));
    }

    #[test]
    fn shift_esc_reachable_through_fn2() {
        let mut board = Board::new();
        board.event(Event::Press(1, 0));
        for _ in 0..250 {
            board.tick();
        }
        board.event(Event::Press(0, 0));
        board.tick();
        assert_eq!(vec![Escape], board.keys());

        // layer goes away before the key does
        board.event(Event::Release(1, 0));
        board.tick();
        board.event(Event::Release(0, 0));
        board.tick();
        assert!(board.keys().is_empty());
    }

    #[test]
    fn fn3_has_no_bootloader() {
        let mut board = Board::new();
        board.event(Event::Press(3, 1));
        board.tick();
        assert_eq!(FN3, board.layout.current_layer());

        board.event(Event::Press(2, 9));
        board.tick();
        assert_eq!(vec![End], board.keys());
        board.event(Event::Release(2, 9));
        board.tick();

        let custom = board.tap((4, 9));
        assert!(matches!(custom, CustomEvent::NoEvent));
        assert!(board.keys().is_empty());
    }

    #[test]
    fn fn_and_escape_in_one_batch() {
        let mut board = Board::new();
        board.event(Event::Press(2, 0));
        board.event(Event::Press(0, 0));
        board.ticks(5);
        assert_eq!(FN, board.layout.current_layer());
        assert_eq!(vec![Grave], board.keys());

        board.event(Event::Release(0, 0));
        board.event(Event::Release(2, 0));
        board.ticks(5);
        assert!(board.keys().is_empty());
    }

    #[test]
    fn shift_and_escape_in_one_batch() {
        let mut board = Board::new();
        board.event(Event::Press(3, 0));
        board.event(Event::Press(0, 0));
        board.ticks(5);
        assert_eq!(vec![LShift, Grave], board.keys());

        board.event(Event::Release(3, 0));
        board.event(Event::Release(0, 0));
        board.ticks(5);
        assert!(board.keys().is_empty());
    }

    #[test]
    fn escape_before_shift_in_one_batch() {
        let mut board = Board::new();
        board.event(Event::Press(0, 0));
        board.event(Event::Press(3, 13));
        board.ticks(5);
        assert_eq!(vec![RShift, Escape], board.keys());
    }

    #[test]
    fn shift_stacked_behind_tab_hold() {
        let mut board = Board::new();
        board.event(Event::Press(1, 0));
        board.tick();
        // the layer-tap is undecided, both keys wait behind it
        board.event(Event::Press(3, 0));
        board.event(Event::Press(0, 0));
        board.ticks(5);
        assert!(board.keys().is_empty());

        board.ticks(250);
        assert_eq!(FN2, board.layout.current_layer());
        assert_eq!(vec![LShift, Grave], board.keys());

        board.event(Event::Release(0, 0));
        board.event(Event::Release(3, 0));
        board.event(Event::Release(1, 0));
        board.ticks(5);
        assert!(board.keys().is_empty());
        assert_eq!(BASE, board.layout.current_layer());
    }

    #[test]
    fn shift_stacked_behind_tab_tap() {
        let mut board = Board::new();
        board.event(Event::Press(1, 0));
        board.tick();
        board.event(Event::Press(3, 0));
        board.event(Event::Press(0, 0));
        board.event(Event::Release(1, 0));
        board.ticks(10);
        assert_eq!(BASE, board.layout.current_layer());
        assert_eq!(vec![LShift, Grave], board.keys());
    }
}
