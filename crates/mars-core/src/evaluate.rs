//! Operand evaluation.
//!
//! Resolving an operand may itself mutate the core (predecrement fires
//! before the pointer field is read) or schedule a mutation (postincrement
//! fires after the operand's use). Postincrement targets are captured as
//! `(address, field)` pairs and applied by the execution unit at the
//! documented ordering points, never held as live references, so operands
//! that indirect through overlapping cells read exactly what the reference
//! emulator reads.

use crate::address::{fold, normalize};
use crate::core::{CellField, Core};
use crate::instruction::{AddressMode, Instruction};

/// A captured postincrement: one field of one cell, bumped later.
pub(crate) type DeferredIncrement = Option<(i32, CellField)>;

/// Fully resolved A-operand.
pub(crate) struct AOperand {
    /// Effective source instruction (a snapshot, not a reference).
    pub source: Instruction,
    /// Resolved pointer address.
    pub addr: i32,
    /// Postincrement to fire once the A-operand is complete.
    pub postinc: DeferredIncrement,
}

/// Fully resolved B-operand.
pub(crate) struct BOperand {
    /// Resolved pointer address; writes target this cell.
    pub addr: i32,
    /// Destination snapshot taken before any execution-unit write.
    pub snapshot: Instruction,
    /// Postincrement to fire after the write/condition.
    pub postinc: DeferredIncrement,
}

/// An immediate operand resolves to the executing instruction itself with
/// both fields holding the literal, and its pointer is the program counter.
fn immediate_value(instr: &Instruction, literal: i32) -> Instruction {
    Instruction {
        a_field: literal,
        b_field: literal,
        ..*instr
    }
}

/// Resolves an indirect pointer: applies a predecrement if the mode calls
/// for one, reads the pointer field, and computes the final address.
fn resolve_indirect(
    core: &mut Core,
    pc: i32,
    mode: AddressMode,
    primary: i32,
    limit: i32,
) -> (i32, DeferredIncrement) {
    let intermediate = normalize(pc + primary, core.size());
    let field = if mode.uses_a_pointer() {
        CellField::A
    } else {
        CellField::B
    };

    let pointer = if mode.is_predecrement() {
        core.bump_field(intermediate, field, -1)
    } else {
        core.field(intermediate, field)
    };

    let addr = normalize(pc + fold(primary + pointer, limit), core.size());
    let postinc = mode.is_postincrement().then_some((intermediate, field));
    (addr, postinc)
}

pub(crate) fn resolve_a_operand(
    core: &mut Core,
    pc: i32,
    instr: &Instruction,
    read_limit: i32,
) -> AOperand {
    match instr.a_mode {
        AddressMode::Immediate => AOperand {
            source: immediate_value(instr, instr.a_field),
            addr: pc,
            postinc: None,
        },
        AddressMode::Direct => {
            let addr = normalize(pc + fold(instr.a_field, read_limit), core.size());
            AOperand {
                source: core.fetch(addr),
                addr,
                postinc: None,
            }
        }
        mode => {
            let primary = fold(instr.a_field, read_limit);
            let (addr, postinc) = resolve_indirect(core, pc, mode, primary, read_limit);
            AOperand {
                source: core.fetch(addr),
                addr,
                postinc,
            }
        }
    }
}

pub(crate) fn resolve_b_operand(
    core: &mut Core,
    pc: i32,
    instr: &Instruction,
    write_limit: i32,
) -> BOperand {
    match instr.b_mode {
        AddressMode::Immediate => BOperand {
            addr: pc,
            snapshot: immediate_value(instr, instr.b_field),
            postinc: None,
        },
        AddressMode::Direct => {
            let addr = normalize(pc + fold(instr.b_field, write_limit), core.size());
            BOperand {
                addr,
                snapshot: core.fetch(addr),
                postinc: None,
            }
        }
        mode => {
            let primary = fold(instr.b_field, write_limit);
            let (addr, postinc) = resolve_indirect(core, pc, mode, primary, write_limit);
            BOperand {
                addr,
                snapshot: core.fetch(addr),
                postinc,
            }
        }
    }
}

/// Fires a captured postincrement.
pub(crate) fn apply_postincrement(core: &mut Core, target: DeferredIncrement) {
    if let Some((addr, field)) = target {
        core.bump_field(addr, field, 1);
    }
}

#[cfg(test)]
mod tests {
    use super::{apply_postincrement, resolve_a_operand, resolve_b_operand};
    use crate::core::{CellField, Core};
    use crate::instruction::{AddressMode, Instruction, Modifier, Opcode};

    fn dat(a: i32, b: i32) -> Instruction {
        Instruction::new(
            Opcode::Dat,
            Modifier::F,
            AddressMode::Direct,
            a,
            AddressMode::Direct,
            b,
        )
    }

    fn core_with(cells: &[(i32, Instruction)]) -> Core {
        let mut core = Core::new(16, 16);
        for (addr, instr) in cells {
            core.store(*addr, *instr);
        }
        core
    }

    #[test]
    fn immediate_a_synthesizes_both_fields_from_the_literal() {
        let mut core = core_with(&[(5, dat(7, 8))]);
        let instr = Instruction::new(
            Opcode::Mov,
            Modifier::I,
            AddressMode::Immediate,
            7,
            AddressMode::Direct,
            1,
        );
        let a = resolve_a_operand(&mut core, 3, &instr, 16);
        assert_eq!(a.addr, 3);
        assert_eq!(a.source.a_field, 7);
        assert_eq!(a.source.b_field, 7);
        assert_eq!(a.source.opcode, Opcode::Mov);
        assert!(a.postinc.is_none());
    }

    #[test]
    fn direct_a_reads_the_pointed_cell() {
        let mut core = core_with(&[(5, dat(7, 8))]);
        let instr = dat(0, 0);
        let probe = Instruction {
            a_field: 2,
            ..instr
        };
        let a = resolve_a_operand(&mut core, 3, &probe, 16);
        assert_eq!(a.addr, 5);
        assert_eq!(a.source, core.fetch(5));
    }

    #[test]
    fn b_indirect_follows_the_b_pointer() {
        // cell 4 points 3 further via its B-field; 4 + 3 = 7.
        let mut core = core_with(&[(4, dat(0, 3)), (7, dat(9, 9))]);
        let instr = Instruction::new(
            Opcode::Mov,
            Modifier::I,
            AddressMode::Direct,
            0,
            AddressMode::BIndirect,
            4,
        );
        let b = resolve_b_operand(&mut core, 0, &instr, 16);
        assert_eq!(b.addr, 7);
        assert_eq!(b.snapshot, core.fetch(7));
        assert!(b.postinc.is_none());
    }

    #[test]
    fn predecrement_fires_before_the_pointer_is_read() {
        // cell 4's A-field starts at 3; `{4` decrements it to 2 and then
        // resolves through the decremented value: 4 + 2 = 6.
        let mut core = core_with(&[(4, dat(3, 0)), (6, dat(1, 1))]);
        let instr = Instruction::new(
            Opcode::Mov,
            Modifier::I,
            AddressMode::APredecrement,
            4,
            AddressMode::Direct,
            0,
        );
        let a = resolve_a_operand(&mut core, 0, &instr, 16);
        assert_eq!(core.field(4, CellField::A), 2);
        assert_eq!(a.addr, 6);
        assert_eq!(a.source, core.fetch(6));
    }

    #[test]
    fn postincrement_is_deferred_until_applied() {
        let mut core = core_with(&[(4, dat(0, 2)), (6, dat(5, 5))]);
        let instr = Instruction::new(
            Opcode::Mov,
            Modifier::I,
            AddressMode::BPostincrement,
            4,
            AddressMode::Direct,
            0,
        );
        let a = resolve_a_operand(&mut core, 0, &instr, 16);
        assert_eq!(a.addr, 6);
        // Not yet applied at resolution time.
        assert_eq!(core.field(4, CellField::B), 2);

        apply_postincrement(&mut core, a.postinc);
        assert_eq!(core.field(4, CellField::B), 3);
    }

    #[test]
    fn immediate_b_targets_the_program_counter() {
        let mut core = Core::new(16, 16);
        let instr = Instruction::new(
            Opcode::Cmp,
            Modifier::B,
            AddressMode::Direct,
            0,
            AddressMode::Immediate,
            9,
        );
        let b = resolve_b_operand(&mut core, 5, &instr, 16);
        assert_eq!(b.addr, 5);
        assert_eq!(b.snapshot.a_field, 9);
        assert_eq!(b.snapshot.b_field, 9);
    }

    #[test]
    fn folding_respects_a_reduced_read_limit() {
        // With read_limit 6, an offset of 4 folds to -2: 8 + (-2) = 6.
        let mut core = core_with(&[(6, dat(3, 3)), (12, dat(4, 4))]);
        let probe = Instruction {
            a_field: 4,
            ..dat(0, 0)
        };
        let a = resolve_a_operand(&mut core, 8, &probe, 6);
        assert_eq!(a.addr, 6);
    }

    #[test]
    fn postincrement_wraps_at_the_core_edge() {
        let mut core = core_with(&[(4, dat(0, 15))]);
        let instr = Instruction::new(
            Opcode::Mov,
            Modifier::I,
            AddressMode::BPostincrement,
            4,
            AddressMode::Direct,
            0,
        );
        let a = resolve_a_operand(&mut core, 0, &instr, 16);
        apply_postincrement(&mut core, a.postinc);
        assert_eq!(core.field(4, CellField::B), 0);
        // 0 + fold(4 + 15, 16) = 0 + 3 = 3.
        assert_eq!(a.addr, 3);
    }
}
