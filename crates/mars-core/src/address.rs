//! Core address arithmetic shared by every operand evaluation.
//!
//! Two primitives: [`normalize`] brings any value into `[0, modulus)` and is
//! applied to every in-core field and program counter; [`fold`] is the pMARS
//! `M` operator bringing a relative offset into `(-limit/2, +limit/2]` so
//! read and write limits smaller than the core wrap symmetrically around the
//! executing instruction.

/// Reduces `value` into `[0, modulus)`. `modulus` must be positive.
#[must_use]
pub const fn normalize(value: i32, modulus: i32) -> i32 {
    ((value % modulus) + modulus) % modulus
}

/// Folds a relative offset into `(-limit/2, +limit/2]` (for even limits):
/// reduce modulo `limit`, then shift results above `limit/2` down by one
/// whole limit. With `limit` equal to the core size this is an identity on
/// the reachable address space.
#[must_use]
pub const fn fold(offset: i32, limit: i32) -> i32 {
    let reduced = normalize(offset, limit);
    if reduced > limit / 2 {
        reduced - limit
    } else {
        reduced
    }
}
