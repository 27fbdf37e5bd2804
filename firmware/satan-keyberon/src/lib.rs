#![no_std]

// Use std when running tests, they run on the host:
//   cargo test --lib --target x86_64-unknown-linux-gnu
#[cfg(test)]
#[macro_use]
extern crate std;

pub mod backlight;
pub mod function;
pub mod keyboards;
pub mod keymap;
pub mod layouts;
pub mod mods;
pub mod report;

#[cfg(target_os = "none")]
pub mod common;
#[cfg(target_os = "none")]
pub mod mcu;


#[cfg(not(test))]
mod log {
    pub use defmt::{debug, warn};
}
