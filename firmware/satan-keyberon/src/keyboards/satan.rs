//! GH60 "Satan" matrix wired to an RP2040.
//!
//! ```text
//! ,-----------------------------------------------------------.
//! | 00 |01| 02| 03| 04| 05| 06| 07| 08| 09| 0a| 0b| 0c| 0d| 49|
//! |-----------------------------------------------------------|
//! | 10  | 11| 12| 13| 14| 15| 16| 17| 18| 19| 1a| 1b| 1c|  1d |
//! |-----------------------------------------------------------|
//! | 20    | 21| 22| 23| 24| 25| 26| 27| 28| 29| 2a| 2b| 2c|2d |
//! |-----------------------------------------------------------|
//! | 30 | 31| 32| 33| 34| 35| 36| 37| 38| 39| 3a| 3b|  3d | 3c |
//! |-----------------------------------------------------------|
//! | 40 | 41 | 42 |        45             | 4a | 4b | 4c | 4d  |
//! `-----------------------------------------------------------'
//! ```

pub const COLS: usize = 14;
pub const ROWS: usize = 5;

/// Matrix positions with no switch behind them.
pub const UNUSED: [(u8, u8); 5] = [(4, 3), (4, 4), (4, 6), (4, 7), (4, 8)];

/// Consecutive identical scans before a key state change is reported.
pub const DEBOUNCE: u16 = 5;

pub const BACKLIGHT_LEVELS: u8 = 3;

#[cfg(target_os = "none")]
pub use pins::*;

#[cfg(target_os = "none")]
mod pins {
    use rp_pico::hal;

    use hal::gpio::bank0;

    use super::{COLS, ROWS};
    use crate::common::{AnyPin, InputPin, KeyMatrix, OutputPin};

    #[allow(clippy::too_many_arguments)]
    pub fn cols(
        gp0: AnyPin<bank0::Gpio0>,
        gp1: AnyPin<bank0::Gpio1>,
        gp2: AnyPin<bank0::Gpio2>,
        gp3: AnyPin<bank0::Gpio3>,
        gp4: AnyPin<bank0::Gpio4>,
        gp5: AnyPin<bank0::Gpio5>,
        gp6: AnyPin<bank0::Gpio6>,
        gp7: AnyPin<bank0::Gpio7>,
        gp8: AnyPin<bank0::Gpio8>,
        gp9: AnyPin<bank0::Gpio9>,
        gp10: AnyPin<bank0::Gpio10>,
        gp11: AnyPin<bank0::Gpio11>,
        gp12: AnyPin<bank0::Gpio12>,
        gp13: AnyPin<bank0::Gpio13>,
    ) -> [InputPin; COLS] {
        return [
            gp0.into_pull_up_input().into_dyn_pin(),
            gp1.into_pull_up_input().into_dyn_pin(),
            gp2.into_pull_up_input().into_dyn_pin(),
            gp3.into_pull_up_input().into_dyn_pin(),
            gp4.into_pull_up_input().into_dyn_pin(),
            gp5.into_pull_up_input().into_dyn_pin(),
            gp6.into_pull_up_input().into_dyn_pin(),
            gp7.into_pull_up_input().into_dyn_pin(),
            gp8.into_pull_up_input().into_dyn_pin(),
            gp9.into_pull_up_input().into_dyn_pin(),
            gp10.into_pull_up_input().into_dyn_pin(),
            gp11.into_pull_up_input().into_dyn_pin(),
            gp12.into_pull_up_input().into_dyn_pin(),
            gp13.into_pull_up_input().into_dyn_pin(),
        ];
    }

    pub fn rows(
        gp18: AnyPin<bank0::Gpio18>,
        gp19: AnyPin<bank0::Gpio19>,
        gp20: AnyPin<bank0::Gpio20>,
        gp21: AnyPin<bank0::Gpio21>,
        gp22: AnyPin<bank0::Gpio22>,
    ) -> [OutputPin; ROWS] {
        return [
            gp18.into_push_pull_output().into_dyn_pin(),
            gp19.into_push_pull_output().into_dyn_pin(),
            gp20.into_push_pull_output().into_dyn_pin(),
            gp21.into_push_pull_output().into_dyn_pin(),
            gp22.into_push_pull_output().into_dyn_pin(),
        ];
    }

    pub type Matrix = KeyMatrix<COLS, ROWS>;
}
