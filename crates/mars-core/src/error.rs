//! Top-level error taxonomy for one battle.
//!
//! Everything that can stop a battle is a rejection at the boundary: bad
//! parameters, a bad warrior, or a bad seed. In-battle events (DAT, zero
//! divisors, queue overflow, cycle-cap ties) are normal outcomes and never
//! surface here.

use thiserror::Error;

use crate::params::ParameterError;
use crate::parser::ParseError;
use crate::placement::PlacementError;

/// A battle that was refused before any round ran.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleError {
    /// A battle-parameter bound was violated.
    #[error(transparent)]
    Parameters(#[from] ParameterError),
    /// One of the warriors was rejected by the parser.
    #[error("warrior {which}: {source}")]
    Warrior {
        /// Which warrior (1 or 2) was rejected.
        which: u8,
        /// The parser rejection.
        source: ParseError,
    },
    /// The placement seed was rejected.
    #[error(transparent)]
    Placement(#[from] PlacementError),
    /// No legal placement slot exists for warrior 2.
    #[error("core size is too small for the configured warrior distance")]
    NoPlacements,
}

impl BattleError {
    /// Wraps a parser rejection with the warrior it belongs to.
    #[must_use]
    pub const fn warrior(which: u8, source: ParseError) -> Self {
        Self::Warrior { which, source }
    }
}
