//! Battle parameters and their validation.
//!
//! A [`BattleParameters`] value is immutable for the duration of one battle
//! and is validated in full before any warrior text is parsed; the first
//! violated bound is reported and the battle is not run.

use thiserror::Error;

/// Largest supported core. pMARS allows arenas up to ~1 billion cells; this
/// core is built to run many battles inside an evolution loop, so the caps
/// sit where memory use and run time stay reasonable while still covering
/// every tournament configuration in common use.
pub const MAX_CORE_SIZE: i32 = 262_144;
/// Largest supported cycle cap per round.
pub const MAX_CYCLES: i32 = 5_000_000;
/// Largest supported per-warrior process count.
pub const MAX_PROCESSES: usize = 131_072;
/// Largest supported warrior length.
pub const MAX_WARRIOR_LENGTH: usize = MAX_CORE_SIZE as usize;
/// Largest supported minimum separation between warriors.
pub const MAX_MIN_DISTANCE: i32 = MAX_CORE_SIZE / 2;
/// Largest supported round count per battle.
pub const MAX_ROUNDS: u32 = 100_000;

/// Immutable per-battle configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct BattleParameters {
    /// Number of cells in the circular core.
    pub core_size: i32,
    /// Cycle cap per round; reaching it declares a tie.
    pub max_cycles: i32,
    /// Per-warrior process queue capacity.
    pub max_processes: usize,
    /// Fold limit applied to A-operand resolution.
    pub read_limit: i32,
    /// Fold limit applied to B-operand resolution.
    pub write_limit: i32,
    /// Minimum separation between the two warriors' load addresses.
    pub min_distance: i32,
    /// Upper bound on either warrior's instruction count.
    pub max_warrior_length: usize,
    /// Number of rounds aggregated into the battle score.
    pub rounds: u32,
    /// Deterministic placement seed; `None` draws a random initial state.
    pub seed: Option<i64>,
    /// Restrict the accepted opcode/modifier/mode surface to ICWS'88.
    pub strict_1988_mode: bool,
}

impl Default for BattleParameters {
    fn default() -> Self {
        Self::corewar_94_nop()
    }
}

impl BattleParameters {
    /// The standard `'94 no-pspace` tournament arena: 8000 cells, 80 000
    /// cycles, 8000 processes, warriors up to 100 instructions.
    #[must_use]
    pub const fn corewar_94_nop() -> Self {
        Self {
            core_size: 8000,
            max_cycles: 80_000,
            max_processes: 8000,
            read_limit: 8000,
            write_limit: 8000,
            min_distance: 100,
            max_warrior_length: 100,
            rounds: 10,
            seed: None,
            strict_1988_mode: false,
        }
    }

    /// The classic ICWS'88 arena: same dimensions as `'94 nop` with the
    /// restricted instruction surface.
    #[must_use]
    pub const fn corewar_88() -> Self {
        Self {
            strict_1988_mode: true,
            ..Self::corewar_94_nop()
        }
    }

    /// The `nano` hill: an 80-cell core with 5-instruction warriors.
    #[must_use]
    pub const fn nano() -> Self {
        Self {
            core_size: 80,
            max_cycles: 800,
            max_processes: 80,
            read_limit: 80,
            write_limit: 80,
            min_distance: 5,
            max_warrior_length: 5,
            rounds: 10,
            seed: None,
            strict_1988_mode: false,
        }
    }

    /// Checks every bound from the battle contract.
    ///
    /// # Errors
    ///
    /// Returns the first violated bound as a [`ParameterError`].
    pub fn validate(&self) -> Result<(), ParameterError> {
        if self.core_size < 2 || self.core_size > MAX_CORE_SIZE {
            return Err(ParameterError::CoreSizeOutOfRange(self.core_size));
        }
        if self.max_cycles < 1 || self.max_cycles > MAX_CYCLES {
            return Err(ParameterError::CyclesOutOfRange(self.max_cycles));
        }
        if self.max_processes < 1 || self.max_processes > MAX_PROCESSES {
            return Err(ParameterError::ProcessesOutOfRange(self.max_processes));
        }
        if self.read_limit < 1 || self.read_limit > self.core_size {
            return Err(ParameterError::ReadLimitOutOfRange(self.read_limit));
        }
        if self.write_limit < 1 || self.write_limit > self.core_size {
            return Err(ParameterError::WriteLimitOutOfRange(self.write_limit));
        }
        if self.max_warrior_length < 1
            || self.max_warrior_length > MAX_WARRIOR_LENGTH
            || self.max_warrior_length as i32 > self.core_size
        {
            return Err(ParameterError::WarriorLengthOutOfRange(
                self.max_warrior_length,
            ));
        }
        if self.min_distance < 0
            || self.min_distance > MAX_MIN_DISTANCE
            || self.min_distance > self.core_size / 2
        {
            return Err(ParameterError::MinDistanceOutOfRange(self.min_distance));
        }
        if (self.min_distance as usize) < self.max_warrior_length {
            return Err(ParameterError::MinDistanceBelowWarriorLength {
                min_distance: self.min_distance,
                max_warrior_length: self.max_warrior_length,
            });
        }
        if self.rounds < 1 || self.rounds > MAX_ROUNDS {
            return Err(ParameterError::RoundsOutOfRange(self.rounds));
        }
        Ok(())
    }

    /// Warrior-2 placement slots available to the placement RNG.
    #[must_use]
    pub const fn placements(&self) -> i32 {
        self.core_size - 2 * self.min_distance + 1
    }
}

/// A battle-parameter bound violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParameterError {
    /// `core_size` outside `[2, MAX_CORE_SIZE]`.
    #[error("core size must be between 2 and {MAX_CORE_SIZE}, got {0}")]
    CoreSizeOutOfRange(i32),
    /// `max_cycles` outside `[1, MAX_CYCLES]`.
    #[error("max cycles must be between 1 and {MAX_CYCLES}, got {0}")]
    CyclesOutOfRange(i32),
    /// `max_processes` outside `[1, MAX_PROCESSES]`.
    #[error("max processes must be between 1 and {MAX_PROCESSES}, got {0}")]
    ProcessesOutOfRange(usize),
    /// `read_limit` outside `[1, core_size]`.
    #[error("read limit must be between 1 and the core size, got {0}")]
    ReadLimitOutOfRange(i32),
    /// `write_limit` outside `[1, core_size]`.
    #[error("write limit must be between 1 and the core size, got {0}")]
    WriteLimitOutOfRange(i32),
    /// `min_distance` negative or above both caps.
    #[error("min distance must be between 0 and min({MAX_MIN_DISTANCE}, core_size/2), got {0}")]
    MinDistanceOutOfRange(i32),
    /// Warriors could overlap at the minimum separation.
    #[error(
        "min distance {min_distance} must be at least the max warrior length {max_warrior_length}"
    )]
    MinDistanceBelowWarriorLength {
        /// Configured minimum separation.
        min_distance: i32,
        /// Configured warrior length bound.
        max_warrior_length: usize,
    },
    /// `max_warrior_length` outside `[1, min(MAX_WARRIOR_LENGTH, core_size)]`.
    #[error("max warrior length must be between 1 and the core size, got {0}")]
    WarriorLengthOutOfRange(usize),
    /// `rounds` outside `[1, MAX_ROUNDS]`.
    #[error("number of rounds must be between 1 and {MAX_ROUNDS}, got {0}")]
    RoundsOutOfRange(u32),
}
