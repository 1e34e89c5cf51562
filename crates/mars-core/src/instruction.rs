//! Redcode instruction model: opcodes, modifiers, addressing modes, and the
//! value type stored in every core cell.
//!
//! Instructions are plain values. Equality is structural over all six fields
//! and the canonical printable form is `OPCODE.MOD <Amode><Afield>,
//! <Bmode><Bfield>`, which is also the form accepted back by the parser.

use std::fmt;

/// Executable Redcode opcodes. `SEQ` is a source-text alias for [`Opcode::Cmp`]
/// and canonicalizes at parse time; it never appears in a stored instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Opcode {
    /// Data cell; executing it terminates the process.
    Dat,
    /// Copy fields or a whole instruction.
    Mov,
    /// Field-wise modular addition.
    Add,
    /// Field-wise modular subtraction.
    Sub,
    /// Field-wise modular multiplication.
    Mul,
    /// Field-wise division; a zero divisor kills the process.
    Div,
    /// Field-wise remainder; a zero divisor kills the process.
    Mod,
    /// Unconditional branch to the A-address.
    Jmp,
    /// Branch if the destination tests zero.
    Jmz,
    /// Branch if the destination tests non-zero.
    Jmn,
    /// Decrement the destination, branch if the result is non-zero.
    Djn,
    /// Skip the next instruction if source and destination compare equal.
    Cmp,
    /// Skip if source is less than destination.
    Slt,
    /// Queue a second process at the A-address.
    Spl,
    /// Skip if source and destination compare unequal.
    Sne,
    /// Advance to the next instruction.
    Nop,
}

impl Opcode {
    /// Every opcode, in canonical table order.
    pub const ALL: [Self; 16] = [
        Self::Dat,
        Self::Mov,
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Div,
        Self::Mod,
        Self::Jmp,
        Self::Jmz,
        Self::Jmn,
        Self::Djn,
        Self::Cmp,
        Self::Slt,
        Self::Spl,
        Self::Sne,
        Self::Nop,
    ];

    /// Canonical mnemonic used by traces and the printable instruction form.
    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Dat => "DAT",
            Self::Mov => "MOV",
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Mul => "MUL",
            Self::Div => "DIV",
            Self::Mod => "MOD",
            Self::Jmp => "JMP",
            Self::Jmz => "JMZ",
            Self::Jmn => "JMN",
            Self::Djn => "DJN",
            Self::Cmp => "CMP",
            Self::Slt => "SLT",
            Self::Spl => "SPL",
            Self::Sne => "SNE",
            Self::Nop => "NOP",
        }
    }

    /// Resolves a source mnemonic, case-insensitively. `SEQ` canonicalizes to
    /// `CMP`. Returns `None` for anything else, including `LDP`/`STP`.
    #[must_use]
    pub fn from_mnemonic(token: &str) -> Option<Self> {
        let upper = token.to_ascii_uppercase();
        if upper == "SEQ" {
            return Some(Self::Cmp);
        }
        Self::ALL.into_iter().find(|op| op.mnemonic() == upper)
    }

    /// Whether the opcode belongs to the ICWS'88 instruction set.
    #[must_use]
    pub const fn allowed_in_1988(self) -> bool {
        !matches!(self, Self::Mul | Self::Div | Self::Mod | Self::Sne | Self::Nop)
    }
}

/// Instruction modifier selecting which field pairs an opcode touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Modifier {
    /// Source A-field to destination A-field.
    A,
    /// Source B-field to destination B-field.
    B,
    /// Source A-field to destination B-field.
    AB,
    /// Source B-field to destination A-field.
    BA,
    /// Both fields, pairwise.
    F,
    /// Both fields, crossed.
    X,
    /// The whole instruction where that is meaningful, otherwise as `F`.
    I,
}

impl Modifier {
    /// Every modifier, in canonical table order.
    pub const ALL: [Self; 7] = [
        Self::A,
        Self::B,
        Self::AB,
        Self::BA,
        Self::F,
        Self::X,
        Self::I,
    ];

    /// Canonical modifier suffix.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::AB => "AB",
            Self::BA => "BA",
            Self::F => "F",
            Self::X => "X",
            Self::I => "I",
        }
    }

    /// Resolves a source modifier suffix, case-insensitively.
    #[must_use]
    pub fn from_suffix(token: &str) -> Option<Self> {
        let upper = token.to_ascii_uppercase();
        Self::ALL.into_iter().find(|m| m.suffix() == upper)
    }

    /// Whether the modifier belongs to the ICWS'88 set.
    #[must_use]
    pub const fn allowed_in_1988(self) -> bool {
        !matches!(self, Self::X | Self::I)
    }
}

/// Operand addressing mode, one of the eight single-character prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum AddressMode {
    /// `#`: the operand is a literal, not a core address.
    Immediate,
    /// `$`: the field is a relative offset.
    Direct,
    /// `*`: indirect through the pointed-to cell's A-field.
    AIndirect,
    /// `@`: indirect through the pointed-to cell's B-field.
    BIndirect,
    /// `{`: as `*`, decrementing the pointer field before use.
    APredecrement,
    /// `<`: as `@`, decrementing the pointer field before use.
    BPredecrement,
    /// `}`: as `*`, incrementing the pointer field after use.
    APostincrement,
    /// `>`: as `@`, incrementing the pointer field after use.
    BPostincrement,
}

impl AddressMode {
    /// Every addressing mode, in canonical table order.
    pub const ALL: [Self; 8] = [
        Self::Immediate,
        Self::Direct,
        Self::AIndirect,
        Self::BIndirect,
        Self::APredecrement,
        Self::BPredecrement,
        Self::APostincrement,
        Self::BPostincrement,
    ];

    /// The single-character operand prefix.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Immediate => '#',
            Self::Direct => '$',
            Self::AIndirect => '*',
            Self::BIndirect => '@',
            Self::APredecrement => '{',
            Self::BPredecrement => '<',
            Self::APostincrement => '}',
            Self::BPostincrement => '>',
        }
    }

    /// Resolves an operand prefix character.
    #[must_use]
    pub fn from_symbol(symbol: char) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.symbol() == symbol)
    }

    /// Whether the mode belongs to the ICWS'88 set.
    #[must_use]
    pub const fn allowed_in_1988(self) -> bool {
        !matches!(
            self,
            Self::AIndirect | Self::APredecrement | Self::APostincrement
        )
    }

    /// Whether the indirect pointer lives in the A-field (`*`, `{`, `}`).
    #[must_use]
    pub const fn uses_a_pointer(self) -> bool {
        matches!(
            self,
            Self::AIndirect | Self::APredecrement | Self::APostincrement
        )
    }

    /// Whether the mode decrements its pointer field before the read.
    #[must_use]
    pub const fn is_predecrement(self) -> bool {
        matches!(self, Self::APredecrement | Self::BPredecrement)
    }

    /// Whether the mode increments its pointer field after its operand is used.
    #[must_use]
    pub const fn is_postincrement(self) -> bool {
        matches!(self, Self::APostincrement | Self::BPostincrement)
    }
}

/// One core cell. Fields hold raw signed values as parsed; once an
/// instruction is laid into a core every field is kept normalized in
/// `[0, core_size)` by the execution unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Instruction {
    /// Operation to perform.
    pub opcode: Opcode,
    /// Field-pair selector.
    pub modifier: Modifier,
    /// A-operand addressing mode.
    pub a_mode: AddressMode,
    /// A-operand numeric field.
    pub a_field: i32,
    /// B-operand addressing mode.
    pub b_mode: AddressMode,
    /// B-operand numeric field.
    pub b_field: i32,
}

impl Instruction {
    /// Builds an instruction from its six fields.
    #[must_use]
    pub const fn new(
        opcode: Opcode,
        modifier: Modifier,
        a_mode: AddressMode,
        a_field: i32,
        b_mode: AddressMode,
        b_field: i32,
    ) -> Self {
        Self {
            opcode,
            modifier,
            a_mode,
            a_field,
            b_mode,
            b_field,
        }
    }
}

impl Default for Instruction {
    /// The initial contents of every core cell: `DAT.F $0, $0`.
    fn default() -> Self {
        Self::new(
            Opcode::Dat,
            Modifier::F,
            AddressMode::Direct,
            0,
            AddressMode::Direct,
            0,
        )
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{} {}{}, {}{}",
            self.opcode.mnemonic(),
            self.modifier.suffix(),
            self.a_mode.symbol(),
            self.a_field,
            self.b_mode.symbol(),
            self.b_field,
        )
    }
}
