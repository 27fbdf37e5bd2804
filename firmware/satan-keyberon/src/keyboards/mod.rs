pub mod satan;
