// Halfkey Self Test
// Scripted key sequences replayed through a dispatcher without any device

use std::fmt;
use std::time::SystemTime;

use crate::event::Dispatcher;
use crate::output::RecordingSink;
use crate::transform::{HalfKeyboard, Mode, RemapResult};
use crate::{Action, Key};

use crate::transform::Mode::{Idle, SpaceModified, SpacePressed};
use crate::transform::RemapResult::{Emit, Swallow, Tap};
use crate::Action::{Press as DOWN, Release as UP};

/// One scripted physical event and what the remapper must answer
#[derive(Debug, Clone, Copy)]
pub struct Step {
    pub key: Key,
    pub action: Action,
    pub expected: RemapResult,
    pub mode: Mode,
}

const fn step(key: Key, action: Action, expected: RemapResult, mode: Mode) -> Step {
    Step {
        key,
        action,
        expected,
        mode,
    }
}

/// Built-in scenario, grouped by what each block checks
pub const SCRIPT: &[(&str, &[Step])] = &[
    (
        "a key returns as expected",
        &[
            step(Key::KEY_0, DOWN, Emit(Key::KEY_0), Idle),
            step(Key::KEY_0, UP, Emit(Key::KEY_0), Idle),
        ],
    ),
    (
        "space works alone",
        &[
            step(Key::SPACE, DOWN, Swallow, SpacePressed),
            step(Key::SPACE, UP, Tap(Key::SPACE), Idle),
        ],
    ),
    (
        "a key gets mirrored",
        &[
            step(Key::SPACE, DOWN, Swallow, SpacePressed),
            step(Key::F, DOWN, Emit(Key::J), SpaceModified),
            step(Key::F, UP, Emit(Key::J), SpaceModified),
            step(Key::SPACE, UP, Swallow, Idle),
        ],
    ),
    (
        "a non-mirrored key doesn't break the space bar",
        &[
            step(Key::SPACE, DOWN, Swallow, SpacePressed),
            step(Key::LEFT_SHIFT, DOWN, Emit(Key::LEFT_SHIFT), SpacePressed),
            step(Key::LEFT_SHIFT, UP, Emit(Key::LEFT_SHIFT), SpacePressed),
            step(Key::SPACE, UP, Tap(Key::SPACE), Idle),
        ],
    ),
    (
        "pressing paired mirror keys sequentially still works",
        &[
            step(Key::F, DOWN, Emit(Key::F), Idle),
            step(Key::J, DOWN, Emit(Key::J), Idle),
            step(Key::F, UP, Emit(Key::F), Idle),
            step(Key::J, UP, Emit(Key::J), Idle),
            step(Key::R, DOWN, Emit(Key::R), Idle),
            step(Key::U, DOWN, Emit(Key::U), Idle),
            step(Key::U, UP, Emit(Key::U), Idle),
            step(Key::R, UP, Emit(Key::R), Idle),
        ],
    ),
    (
        "releasing a key after space was pressed releases what was sent",
        &[
            step(Key::D, DOWN, Emit(Key::D), Idle),
            step(Key::SPACE, DOWN, Swallow, SpacePressed),
            step(Key::D, UP, Emit(Key::D), SpacePressed),
            step(Key::SPACE, UP, Tap(Key::SPACE), Idle),
        ],
    ),
];

/// A step whose outcome differed from the script
#[derive(Debug, Clone)]
pub struct Mismatch {
    pub scenario: &'static str,
    pub step: Step,
    pub result: Option<RemapResult>,
    pub mode: Mode,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} {}: got {:?} in {}, expected {:?} in {}",
            self.scenario,
            self.step.key,
            self.step.action,
            self.result,
            self.mode,
            self.step.expected,
            self.step.mode
        )
    }
}

/// Replay [`SCRIPT`] and return every step that did not match
pub fn run_self_test() -> Vec<Mismatch> {
    let mut dispatcher = Dispatcher::new(HalfKeyboard::new(), RecordingSink::new());
    let mut mismatches = Vec::new();

    for &(scenario, steps) in SCRIPT {
        log::info!("Checking {}", scenario);
        for step in steps.iter() {
            let result = dispatcher
                .dispatch(step.key, step.action, SystemTime::now())
                .ok();
            let mode = dispatcher.mode();
            if result != Some(step.expected) || mode != step.mode {
                log::error!(
                    "{} {} returned {:?} in {}, expected {:?} in {}",
                    step.key,
                    step.action,
                    result,
                    mode,
                    step.expected,
                    step.mode
                );
                mismatches.push(Mismatch {
                    scenario,
                    step: *step,
                    result,
                    mode,
                });
            }
        }
    }

    log::info!("Self test finished with {} errors", mismatches.len());
    mismatches
}
