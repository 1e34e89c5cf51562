//! The execution unit: one process, one instruction, one state transition.
//!
//! Dispatch is an exhaustive match over the opcode with the modifier fan-out
//! in shared field-pairing helpers, so every opcode × modifier combination
//! is enumerated statically and an unhandled combination cannot fall back to
//! a silent no-op.
//!
//! Side-effect order within one instruction is fixed: A-predecrement →
//! A-read → A-postincrement → B-predecrement → B-address → B-snapshot →
//! write/condition → B-postincrement → queue push. A process killed by DAT
//! or a zero divisor still fires the deferred B-postincrement; side effects
//! never roll back.

use crate::address::normalize;
use crate::core::{CellField, Core};
use crate::evaluate::{apply_postincrement, resolve_a_operand, resolve_b_operand};
use crate::instruction::{Instruction, Modifier, Opcode};

/// Fold limits applied during operand evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionLimits {
    /// Limit folding A-operand resolution and source reads.
    pub read_limit: i32,
    /// Limit folding B-operand resolution and the write target.
    pub write_limit: i32,
}

/// Control-flow result of one instruction.
enum Transition {
    /// Re-queue at `pc + 1`.
    Proceed,
    /// Re-queue at `pc + 2`.
    Skip,
    /// Re-queue at the A-operand's resolved address.
    Jump,
    /// Re-queue at `pc + 1`, then also at the A-address if capacity allows.
    Split,
    /// Do not re-queue; the process dies.
    Terminate,
}

/// Executes one instruction for the process of warrior `owner` at `pc`,
/// pushing zero, one, or two successor program counters onto the owner's
/// queue.
pub fn execute_process(core: &mut Core, owner: usize, pc: i32, limits: &ExecutionLimits) {
    let instr = core.fetch(pc);

    let a = resolve_a_operand(core, pc, &instr, limits.read_limit);
    apply_postincrement(core, a.postinc);
    let b = resolve_b_operand(core, pc, &instr, limits.write_limit);

    core.tracer_mut()
        .instruction(pc, &instr, a.addr, &a.source, b.addr, &b.snapshot);

    let transition = dispatch(core, &instr, &a.source, b.addr, &b.snapshot);
    apply_postincrement(core, b.postinc);

    let size = core.size();
    let queue = core.queue_mut(owner);
    match transition {
        Transition::Proceed => queue.push(normalize(pc + 1, size)),
        Transition::Skip => queue.push(normalize(pc + 2, size)),
        Transition::Jump => queue.push(a.addr),
        Transition::Split => {
            queue.push(normalize(pc + 1, size));
            queue.push(a.addr);
        }
        Transition::Terminate => {}
    }
}

fn dispatch(
    core: &mut Core,
    instr: &Instruction,
    src: &Instruction,
    b_addr: i32,
    snapshot: &Instruction,
) -> Transition {
    let modifier = instr.modifier;
    match instr.opcode {
        Opcode::Dat => Transition::Terminate,
        Opcode::Nop => Transition::Proceed,
        Opcode::Mov => {
            mov(core, modifier, src, b_addr);
            Transition::Proceed
        }
        Opcode::Add => arithmetic(core, modifier, src, b_addr, |lhs, rhs| lhs + rhs),
        Opcode::Sub => arithmetic(core, modifier, src, b_addr, |lhs, rhs| lhs - rhs),
        Opcode::Mul => arithmetic(core, modifier, src, b_addr, |lhs, rhs| lhs * rhs),
        Opcode::Div => guarded_arithmetic(core, modifier, src, b_addr, |lhs, rhs| lhs / rhs),
        Opcode::Mod => guarded_arithmetic(core, modifier, src, b_addr, |lhs, rhs| lhs % rhs),
        Opcode::Jmp => Transition::Jump,
        Opcode::Jmz => branch_if(jmz_taken(snapshot, modifier)),
        Opcode::Jmn => branch_if(jmn_taken(snapshot, modifier)),
        Opcode::Djn => branch_if(djn_decrement_and_test(core, modifier, b_addr)),
        Opcode::Cmp => skip_if(pairs_equal(src, snapshot, modifier)),
        Opcode::Sne => skip_if(!pairs_equal(src, snapshot, modifier)),
        Opcode::Slt => skip_if(source_less_than(src, snapshot, modifier)),
        Opcode::Spl => Transition::Split,
    }
}

const fn branch_if(taken: bool) -> Transition {
    if taken {
        Transition::Jump
    } else {
        Transition::Proceed
    }
}

const fn skip_if(skip: bool) -> Transition {
    if skip {
        Transition::Skip
    } else {
        Transition::Proceed
    }
}

/// The `(destination field, source value)` pairs a modifier touches, in the
/// order the reference emulator applies them.
fn field_pairs(modifier: Modifier, src: &Instruction) -> ([(CellField, i32); 2], usize) {
    let filler = (CellField::A, 0);
    match modifier {
        Modifier::A => ([(CellField::A, src.a_field), filler], 1),
        Modifier::B => ([(CellField::B, src.b_field), filler], 1),
        Modifier::AB => ([(CellField::B, src.a_field), filler], 1),
        Modifier::BA => ([(CellField::A, src.b_field), filler], 1),
        Modifier::F | Modifier::I => (
            [(CellField::A, src.a_field), (CellField::B, src.b_field)],
            2,
        ),
        Modifier::X => (
            [(CellField::A, src.b_field), (CellField::B, src.a_field)],
            2,
        ),
    }
}

fn mov(core: &mut Core, modifier: Modifier, src: &Instruction, b_addr: i32) {
    if modifier == Modifier::I {
        core.store(b_addr, *src);
        return;
    }
    let mut dst = core.fetch(b_addr);
    let (pairs, count) = field_pairs(modifier, src);
    for &(field, value) in &pairs[..count] {
        match field {
            CellField::A => dst.a_field = value,
            CellField::B => dst.b_field = value,
        }
    }
    core.store(b_addr, dst);
}

/// Field-wise modular arithmetic. Operands are normalized core values; the
/// 64-bit intermediate keeps `MUL` exact at the largest supported core.
fn arithmetic(
    core: &mut Core,
    modifier: Modifier,
    src: &Instruction,
    b_addr: i32,
    op: fn(i64, i64) -> i64,
) -> Transition {
    let size = i64::from(core.size());
    let mut dst = core.fetch(b_addr);
    let (pairs, count) = field_pairs(modifier, src);
    for &(field, value) in &pairs[..count] {
        let slot = match field {
            CellField::A => &mut dst.a_field,
            CellField::B => &mut dst.b_field,
        };
        let result = op(i64::from(*slot), i64::from(value)).rem_euclid(size);
        *slot = result as i32;
    }
    core.store(b_addr, dst);
    Transition::Proceed
}

/// As [`arithmetic`], but any zero divisor among the touched pairs leaves
/// that destination field unchanged and kills the process. Non-zero pairs
/// are still written before the process dies.
fn guarded_arithmetic(
    core: &mut Core,
    modifier: Modifier,
    src: &Instruction,
    b_addr: i32,
    op: fn(i64, i64) -> i64,
) -> Transition {
    let size = i64::from(core.size());
    let mut dst = core.fetch(b_addr);
    let (pairs, count) = field_pairs(modifier, src);
    let mut divided_by_zero = false;
    let mut wrote = false;
    for &(field, value) in &pairs[..count] {
        if value == 0 {
            divided_by_zero = true;
            continue;
        }
        let slot = match field {
            CellField::A => &mut dst.a_field,
            CellField::B => &mut dst.b_field,
        };
        *slot = op(i64::from(*slot), i64::from(value)).rem_euclid(size) as i32;
        wrote = true;
    }
    if wrote {
        core.store(b_addr, dst);
    }
    if divided_by_zero {
        Transition::Terminate
    } else {
        Transition::Proceed
    }
}

fn jmz_taken(snapshot: &Instruction, modifier: Modifier) -> bool {
    match modifier {
        Modifier::A | Modifier::BA => snapshot.a_field == 0,
        Modifier::B | Modifier::AB => snapshot.b_field == 0,
        // Both fields must be zero: logical AND.
        Modifier::F | Modifier::X | Modifier::I => {
            snapshot.a_field == 0 && snapshot.b_field == 0
        }
    }
}

fn jmn_taken(snapshot: &Instruction, modifier: Modifier) -> bool {
    match modifier {
        Modifier::A | Modifier::BA => snapshot.a_field != 0,
        Modifier::B | Modifier::AB => snapshot.b_field != 0,
        // Either field non-zero: logical OR, the EMI94 reading rather than
        // the ICWS'94 draft prose. The asymmetry with JMZ is deliberate.
        Modifier::F | Modifier::X | Modifier::I => {
            snapshot.a_field != 0 || snapshot.b_field != 0
        }
    }
}

/// Decrements the destination per the modifier, writes the decrement back,
/// and reports whether the branch is taken on the post-decrement values.
fn djn_decrement_and_test(core: &mut Core, modifier: Modifier, b_addr: i32) -> bool {
    let size = core.size();
    let mut dst = core.fetch(b_addr);
    let (decrement_a, decrement_b) = match modifier {
        Modifier::A | Modifier::BA => (true, false),
        Modifier::B | Modifier::AB => (false, true),
        Modifier::F | Modifier::X | Modifier::I => (true, true),
    };
    if decrement_a {
        dst.a_field = normalize(dst.a_field - 1, size);
    }
    if decrement_b {
        dst.b_field = normalize(dst.b_field - 1, size);
    }
    core.store(b_addr, dst);

    match modifier {
        Modifier::A | Modifier::BA => dst.a_field != 0,
        Modifier::B | Modifier::AB => dst.b_field != 0,
        // Like JMN: either decremented field non-zero takes the branch.
        Modifier::F | Modifier::X | Modifier::I => dst.a_field != 0 || dst.b_field != 0,
    }
}

fn pairs_equal(src: &Instruction, snapshot: &Instruction, modifier: Modifier) -> bool {
    match modifier {
        Modifier::A => src.a_field == snapshot.a_field,
        Modifier::B => src.b_field == snapshot.b_field,
        Modifier::AB => src.a_field == snapshot.b_field,
        Modifier::BA => src.b_field == snapshot.a_field,
        Modifier::F => {
            src.a_field == snapshot.a_field && src.b_field == snapshot.b_field
        }
        Modifier::X => {
            src.a_field == snapshot.b_field && src.b_field == snapshot.a_field
        }
        Modifier::I => src == snapshot,
    }
}

fn source_less_than(src: &Instruction, snapshot: &Instruction, modifier: Modifier) -> bool {
    match modifier {
        Modifier::A => src.a_field < snapshot.a_field,
        Modifier::B => src.b_field < snapshot.b_field,
        Modifier::AB => src.a_field < snapshot.b_field,
        Modifier::BA => src.b_field < snapshot.a_field,
        Modifier::F | Modifier::I => {
            src.a_field < snapshot.a_field && src.b_field < snapshot.b_field
        }
        Modifier::X => {
            src.a_field < snapshot.b_field && src.b_field < snapshot.a_field
        }
    }
}
