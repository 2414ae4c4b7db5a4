// Halfkey State Module
// Downstream key state tracking

mod keystate;

pub use keystate::KeyState;
