pub mod common;
pub mod wezm;
