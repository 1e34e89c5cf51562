//! The battle driver: a fixed number of rounds aggregated into one score
//! pair.
//!
//! Each round gets a fresh core; warrior 1 loads at cell 0 and warrior 2 at
//! `min_distance + offset` with the offset drawn from the deterministic
//! placement generator. The first move alternates between the warriors from
//! round to round so neither side keeps a permanent initiative advantage.

use crate::address::normalize;
use crate::core::Core;
use crate::error::BattleError;
use crate::execute::ExecutionLimits;
use crate::params::BattleParameters;
use crate::parser::{parse_warrior, ParseOptions, ParsedWarrior};
use crate::placement::PlacementRng;
use crate::round::{run_round, RoundOutcome};

/// Points per round, pMARS KOTH scoring: part of the cross-engine contract.
const WIN_POINTS: u32 = 3;
const TIE_POINTS: u32 = 1;

/// Final score pair of one battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct BattleScores {
    /// Points accumulated by warrior 1.
    pub warrior1: u32,
    /// Points accumulated by warrior 2.
    pub warrior2: u32,
}

/// Runs one battle between two warrior sources.
///
/// # Errors
///
/// Returns a [`BattleError`] when the parameters, either warrior, or the
/// placement seed are rejected. No rounds run in that case.
pub fn run_battle(
    warrior1: &str,
    warrior2: &str,
    params: &BattleParameters,
) -> Result<BattleScores, BattleError> {
    params.validate()?;

    let options = ParseOptions {
        strict_1988: params.strict_1988_mode,
        max_warrior_length: params.max_warrior_length,
    };
    let w1 = parse_warrior(warrior1, &options).map_err(|e| BattleError::warrior(1, e))?;
    let w2 = parse_warrior(warrior2, &options).map_err(|e| BattleError::warrior(2, e))?;

    // Two identical warriors can only draw; emit the draw without running.
    if w1.instructions == w2.instructions && w1.entry_point == w2.entry_point {
        return Ok(BattleScores {
            warrior1: params.rounds,
            warrior2: params.rounds,
        });
    }

    let placements = params.placements();
    if placements <= 0 {
        return Err(BattleError::NoPlacements);
    }
    let mut placement = PlacementRng::new(params.seed, params.min_distance)?;

    let limits = ExecutionLimits {
        read_limit: params.read_limit,
        write_limit: params.write_limit,
    };

    let mut scores = BattleScores {
        warrior1: 0,
        warrior2: 0,
    };

    for round_index in 0..params.rounds {
        let offset = placement.next_offset(placements);
        let w2_start = normalize(params.min_distance + offset, params.core_size);
        let first = (round_index % 2) as usize;

        let outcome = play_round(&w1, 0, &w2, w2_start, params, &limits, first);
        match outcome {
            RoundOutcome::Winner(0) => scores.warrior1 += WIN_POINTS,
            RoundOutcome::Winner(_) => scores.warrior2 += WIN_POINTS,
            RoundOutcome::Tie => {
                scores.warrior1 += TIE_POINTS;
                scores.warrior2 += TIE_POINTS;
            }
        }

        let remaining = params.rounds - (round_index + 1);
        let lead = i64::from(scores.warrior1).abs_diff(i64::from(scores.warrior2));
        if lead > u64::from(WIN_POINTS) * u64::from(remaining) {
            break;
        }
    }

    Ok(scores)
}

fn play_round(
    w1: &ParsedWarrior,
    w1_start: i32,
    w2: &ParsedWarrior,
    w2_start: i32,
    params: &BattleParameters,
    limits: &ExecutionLimits,
    first: usize,
) -> RoundOutcome {
    let mut core = Core::new(params.core_size, params.max_processes);
    core.load_warrior(w1_start, &w1.instructions);
    core.load_warrior(w2_start, &w2.instructions);

    let entries = [
        normalize(w1_start + w1.entry_point as i32, params.core_size),
        normalize(w2_start + w2.entry_point as i32, params.core_size),
    ];
    run_round(&mut core, entries, first, params.max_cycles, limits)
}
