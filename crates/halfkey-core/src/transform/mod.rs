// Halfkey Transform Module
// The half-keyboard remapping state machine

pub mod remap;

pub use remap::{HalfKeyboard, Mode, RemapResult};
