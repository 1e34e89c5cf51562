//! The match engine: one round on one fresh core.
//!
//! A round alternates single process steps between the two warriors, warrior
//! `first` moving first in every cycle. The winner is the warrior whose
//! opponent's queue empties first; reaching the cycle cap with both warriors
//! alive, or both queues emptying on the same step, is a tie.

use crate::core::Core;
use crate::execute::{execute_process, ExecutionLimits};

/// Result of one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    /// The given warrior (0 or 1) survived its opponent.
    Winner(usize),
    /// Both warriors alive at the cycle cap, or both died on the same step.
    Tie,
}

/// Executes one process step for warrior `owner`: pops the oldest program
/// counter and runs that instruction. Does nothing for a dead warrior.
pub fn step_warrior(core: &mut Core, owner: usize, limits: &ExecutionLimits) {
    if let Some(pc) = core.queue_mut(owner).pop() {
        execute_process(core, owner, pc, limits);
    }
}

/// Runs one round to completion. `entries` are the two warriors' entry
/// addresses; `first` (0 or 1) takes the first step of every cycle.
pub fn run_round(
    core: &mut Core,
    entries: [i32; 2],
    first: usize,
    max_cycles: i32,
    limits: &ExecutionLimits,
) -> RoundOutcome {
    core.queue_mut(0).push(entries[0]);
    core.queue_mut(1).push(entries[1]);

    let mut winner: Option<usize> = None;
    let second = 1 - first;

    for _ in 0..max_cycles {
        if core.queue(0).is_empty() || core.queue(1).is_empty() {
            break;
        }
        for owner in [first, second] {
            if core.queue(owner).is_empty() {
                continue;
            }
            step_warrior(core, owner, limits);
            if winner.is_none() {
                let own_dead = core.queue(owner).is_empty();
                let opponent_dead = core.queue(1 - owner).is_empty();
                winner = match (own_dead, opponent_dead) {
                    (true, false) => Some(1 - owner),
                    (false, true) => Some(owner),
                    _ => None,
                };
            }
        }
    }

    winner.map_or(RoundOutcome::Tie, RoundOutcome::Winner)
}
