//! Deterministic Core War Memory Array Redcode Simulator (MARS).
//!
//! The crate is a pure battle function: two pre-assembled warrior sources
//! plus immutable [`BattleParameters`] go in, a score pair (or a rejection)
//! comes out. Given identical inputs and seed, a battle is bit-identical
//! across runs and hosts; every scheduling, placement, and side-effect
//! ordering decision exists to keep that true against the reference
//! pMARS/EMI94 semantics.

/// Core address arithmetic: `normalize` and the pMARS fold operator.
pub mod address;
pub use address::{fold, normalize};

/// Opcodes, modifiers, addressing modes, and the core cell value type.
pub mod instruction;
pub use instruction::{AddressMode, Instruction, Modifier, Opcode};

/// Strict warrior-text parser.
pub mod parser;
pub use parser::{
    parse_warrior, OperandSide, ParseError, ParseErrorKind, ParseOptions, ParsedWarrior,
};

/// Battle parameters, tournament profiles, and their validation.
pub mod params;
pub use params::{
    BattleParameters, ParameterError, MAX_CORE_SIZE, MAX_CYCLES, MAX_MIN_DISTANCE, MAX_PROCESSES,
    MAX_ROUNDS, MAX_WARRIOR_LENGTH,
};

/// The circular memory core and per-warrior process queues.
pub mod core;
pub use crate::core::{CellField, Core, ProcessQueue};

mod evaluate;

/// The instruction execution unit.
pub mod execute;
pub use execute::{execute_process, ExecutionLimits};

/// The match engine: one round of alternating process steps.
pub mod round;
pub use round::{run_round, step_warrior, RoundOutcome};

/// Deterministic Park-Miller warrior placement.
pub mod placement;
pub use placement::{PlacementError, PlacementRng};

/// The battle driver aggregating rounds into a score pair.
pub mod battle;
pub use battle::{run_battle, BattleScores};

/// Battle rejection taxonomy.
pub mod error;
pub use error::BattleError;

/// Host-facing entry points and the cross-engine report format.
pub mod api;
pub use api::{render_error, render_scores, run_battle_report};

/// Optional per-instruction trace sink.
pub mod trace;
pub use trace::{Tracer, TRACE_FILE_ENV};

#[cfg(test)]
use rstest as _;
#[cfg(all(test, not(feature = "trace")))]
use tempfile as _;
