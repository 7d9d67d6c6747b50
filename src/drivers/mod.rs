//! Button driver and raw GPIO helpers.

pub mod button;
pub mod hw_init;
