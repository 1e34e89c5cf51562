//! Strict parser for pre-assembled, one-instruction-per-line Redcode.
//!
//! The accepted grammar is deliberately narrow: every instruction is
//! `OPCODE.MOD <mode><int>, <mode><int>` with both operands and both mode
//! prefixes mandatory, integers in signed base-10, and opcode/modifier
//! matched case-insensitively. Blank lines and `;` comments are ignored. An
//! optional leading `ORG <label>` selects the entry point; instructions may
//! carry a `label:` (or `label `) definition consumed only by `ORG`. Nothing
//! is defaulted and nothing is guessed: any deviation is a [`ParseError`]
//! naming the violated rule and the offending line.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

use crate::instruction::{AddressMode, Instruction, Modifier, Opcode};
use crate::params::MAX_WARRIOR_LENGTH;

/// Pseudo-ops that exist in full Redcode but are rejected here; the core
/// consumes fully resolved warriors and `ORG` is the only directive allowed.
const REJECTED_PSEUDO_OPS: &[&str] = &["END", "EQU", "FOR", "ROF", "PIN", "SPACE"];

/// Opcodes that are valid Redcode but deliberately unsupported by this core.
const UNSUPPORTED_OPCODES: &[&str] = &["LDP", "STP"];

/// Parser configuration derived from the battle parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Restrict opcodes, modifiers, and modes to the ICWS'88 sets.
    pub strict_1988: bool,
    /// Upper bound on the instruction count.
    pub max_warrior_length: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            strict_1988: false,
            max_warrior_length: MAX_WARRIOR_LENGTH,
        }
    }
}

/// A parsed warrior: a non-empty instruction sequence plus its entry offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedWarrior {
    /// Instructions in source order, fields still raw signed values.
    pub instructions: Vec<Instruction>,
    /// Index of the first instruction to execute.
    pub entry_point: usize,
}

impl ParsedWarrior {
    /// Number of instructions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Always false for a successfully parsed warrior.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Canonical re-print accepted back by the parser. Emits an `ORG start`
    /// header and a `start:` label when the entry point is not the first
    /// instruction, so re-parsing reproduces both the sequence and the entry.
    #[must_use]
    pub fn to_canonical_string(&self) -> String {
        let mut out = String::new();
        if self.entry_point != 0 {
            out.push_str("ORG start\n");
        }
        for (index, instr) in self.instructions.iter().enumerate() {
            if self.entry_point != 0 && index == self.entry_point {
                out.push_str("start: ");
            }
            out.push_str(&instr.to_string());
            out.push('\n');
        }
        out
    }
}

/// Which operand of an instruction a parse error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandSide {
    /// The A-operand (before the comma).
    A,
    /// The B-operand (after the comma).
    B,
}

impl fmt::Display for OperandSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}

/// Rule violated by a rejected warrior line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// The opcode token is not a known mnemonic.
    #[error("unknown opcode '{0}'")]
    UnknownOpcode(String),
    /// `LDP`/`STP` are valid Redcode but rejected by this core.
    #[error("opcode '{0}' is not supported")]
    UnsupportedOpcode(String),
    /// A pseudo-op other than a leading `ORG`.
    #[error("unsupported pseudo-opcode '{0}'")]
    UnsupportedPseudoOp(String),
    /// The opcode token carries no `.MOD` suffix.
    #[error("missing modifier for opcode '{0}'")]
    MissingModifier(String),
    /// The `.MOD` suffix is not a known modifier.
    #[error("unknown modifier '{0}'")]
    UnknownModifier(String),
    /// An operand (or the whole operand list) is absent.
    #[error("missing {0}-field operand")]
    MissingOperand(OperandSide),
    /// An operand does not start with one of `# $ * @ {{ }} < >`.
    #[error("missing addressing mode prefix in {side}-field operand '{operand}'")]
    MissingModePrefix {
        /// Operand the prefix is missing from.
        side: OperandSide,
        /// Offending operand text.
        operand: String,
    },
    /// A mode prefix with no number after it.
    #[error("missing value for {0}-field operand")]
    MissingValue(OperandSide),
    /// The operand value is not a signed base-10 integer.
    #[error("invalid numeric operand '{operand}' in {side}-field")]
    InvalidNumeric {
        /// Operand the value belongs to.
        side: OperandSide,
        /// Offending value text.
        operand: String,
    },
    /// `ORG` somewhere other than the first non-comment line.
    #[error("'ORG' is only accepted as the first non-comment line")]
    MisplacedOrg,
    /// `ORG` with no label or more than one label.
    #[error("'ORG' requires exactly one label, found {0}")]
    OrgLabelCount(usize),
    /// `ORG` names a label that is never defined.
    #[error("'ORG' references undefined label '{0}'")]
    UndefinedOrgLabel(String),
    /// The same label is defined twice.
    #[error("duplicate label '{0}'")]
    DuplicateLabel(String),
    /// A label prefix with no instruction after it.
    #[error("label '{0}' is not followed by an instruction")]
    LabelWithoutInstruction(String),
    /// Opcode outside the ICWS'88 set while strict mode is active.
    #[error("opcode '{0}' is not in the 1988 instruction set")]
    OpcodeNotIn1988(String),
    /// Modifier outside the ICWS'88 set while strict mode is active.
    #[error("modifier '{0}' is not in the 1988 instruction set")]
    ModifierNotIn1988(String),
    /// Addressing mode outside the ICWS'88 set while strict mode is active.
    #[error("addressing mode '{mode}' in {side}-field operand is not in the 1988 instruction set")]
    ModeNotIn1988 {
        /// Operand the mode belongs to.
        side: OperandSide,
        /// Offending mode prefix.
        mode: char,
    },
    /// The warrior has no instructions at all.
    #[error("warrior contains no executable instructions")]
    EmptyWarrior,
    /// The warrior is longer than the configured maximum.
    #[error("warrior length {length} exceeds the configured maximum of {max}")]
    TooLong {
        /// Parsed instruction count.
        length: usize,
        /// Configured maximum.
        max: usize,
    },
}

/// A rejected warrior: the violated rule plus the 1-based source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// 1-based line number the error was raised on (0 for whole-warrior
    /// errors such as an empty source).
    pub line: usize,
    /// The violated rule.
    pub kind: ParseErrorKind,
}

impl ParseError {
    fn new(line: usize, kind: ParseErrorKind) -> Self {
        Self { line, kind }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line == 0 {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "line {}: {}", self.line, self.kind)
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

/// Parses a complete warrior source.
///
/// # Errors
///
/// Returns the first [`ParseError`] encountered; nothing about a rejected
/// warrior is ever defaulted or repaired.
pub fn parse_warrior(source: &str, options: &ParseOptions) -> Result<ParsedWarrior, ParseError> {
    let mut instructions = Vec::new();
    let mut labels: HashMap<String, usize> = HashMap::new();
    let mut org: Option<(String, usize)> = None;

    for (index, raw_line) in source.lines().enumerate() {
        let line_number = index + 1;
        let code = strip_comment(raw_line).trim();
        if code.is_empty() {
            continue;
        }

        let (first_token, remainder) = split_first_token(code);

        if first_token.eq_ignore_ascii_case("ORG") {
            if org.is_some() || !instructions.is_empty() || !labels.is_empty() {
                return Err(ParseError::new(line_number, ParseErrorKind::MisplacedOrg));
            }
            org = Some((parse_org_label(remainder, line_number)?, line_number));
            continue;
        }

        let (label, instruction_text) = split_label(code, first_token, remainder, line_number)?;
        if let Some(name) = label {
            if labels.insert(name.clone(), instructions.len()).is_some() {
                return Err(ParseError::new(
                    line_number,
                    ParseErrorKind::DuplicateLabel(name),
                ));
            }
        }

        instructions.push(parse_instruction(instruction_text, line_number, options)?);
    }

    if instructions.is_empty() {
        return Err(ParseError::new(0, ParseErrorKind::EmptyWarrior));
    }
    if instructions.len() > options.max_warrior_length {
        return Err(ParseError::new(
            0,
            ParseErrorKind::TooLong {
                length: instructions.len(),
                max: options.max_warrior_length,
            },
        ));
    }

    let entry_point = match org {
        None => 0,
        Some((label, line)) => *labels
            .get(&label)
            .ok_or_else(|| ParseError::new(line, ParseErrorKind::UndefinedOrgLabel(label)))?,
    };

    Ok(ParsedWarrior {
        instructions,
        entry_point,
    })
}

fn strip_comment(line: &str) -> &str {
    line.find(';').map_or(line, |pos| &line[..pos])
}

fn split_first_token(text: &str) -> (&str, &str) {
    text.find(char::is_whitespace)
        .map_or((text, ""), |pos| (&text[..pos], text[pos..].trim_start()))
}

fn is_valid_label(text: &str) -> bool {
    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn parse_org_label(operands: &str, line: usize) -> Result<String, ParseError> {
    let tokens: Vec<&str> = operands.split_whitespace().collect();
    if tokens.len() != 1 || !is_valid_label(tokens[0]) {
        return Err(ParseError::new(
            line,
            ParseErrorKind::OrgLabelCount(tokens.len()),
        ));
    }
    Ok(tokens[0].to_string())
}

/// Splits an optional `label:` / `label ` prefix off an instruction line.
/// The first token is a label when it carries a trailing colon, or when it is
/// a plain identifier that cannot be an opcode token and an instruction
/// follows it on the same line.
fn split_label<'a>(
    code: &'a str,
    first_token: &'a str,
    remainder: &'a str,
    line: usize,
) -> Result<(Option<String>, &'a str), ParseError> {
    if let Some(name) = first_token.strip_suffix(':') {
        if !is_valid_label(name) {
            return Err(ParseError::new(
                line,
                ParseErrorKind::UnknownOpcode(first_token.to_string()),
            ));
        }
        if remainder.is_empty() {
            return Err(ParseError::new(
                line,
                ParseErrorKind::LabelWithoutInstruction(name.to_string()),
            ));
        }
        return Ok((Some(name.to_string()), remainder));
    }

    let looks_like_instruction = first_token.contains('.')
        || Opcode::from_mnemonic(first_token).is_some()
        || is_rejected_op(first_token);
    if !looks_like_instruction && is_valid_label(first_token) && !remainder.is_empty() {
        return Ok((Some(first_token.to_string()), remainder));
    }

    Ok((None, code))
}

fn is_rejected_op(token: &str) -> bool {
    let upper = token.to_ascii_uppercase();
    UNSUPPORTED_OPCODES.contains(&upper.as_str()) || REJECTED_PSEUDO_OPS.contains(&upper.as_str())
}

fn parse_instruction(
    text: &str,
    line: usize,
    options: &ParseOptions,
) -> Result<Instruction, ParseError> {
    let (opcode_token, operand_text) = split_first_token(text);

    let (opcode_part, modifier_part) = match opcode_token.split_once('.') {
        Some((op, modifier)) => (op, Some(modifier)),
        None => (opcode_token, None),
    };

    let upper = opcode_part.to_ascii_uppercase();
    if REJECTED_PSEUDO_OPS.contains(&upper.as_str()) {
        return Err(ParseError::new(
            line,
            ParseErrorKind::UnsupportedPseudoOp(upper),
        ));
    }
    if UNSUPPORTED_OPCODES.contains(&upper.as_str()) {
        return Err(ParseError::new(
            line,
            ParseErrorKind::UnsupportedOpcode(upper),
        ));
    }
    let opcode = Opcode::from_mnemonic(opcode_part).ok_or_else(|| {
        ParseError::new(line, ParseErrorKind::UnknownOpcode(opcode_part.to_string()))
    })?;
    if options.strict_1988 && !opcode.allowed_in_1988() {
        return Err(ParseError::new(line, ParseErrorKind::OpcodeNotIn1988(upper)));
    }

    let modifier_token = modifier_part.ok_or_else(|| {
        ParseError::new(
            line,
            ParseErrorKind::MissingModifier(opcode_part.to_string()),
        )
    })?;
    let modifier = Modifier::from_suffix(modifier_token).ok_or_else(|| {
        ParseError::new(
            line,
            ParseErrorKind::UnknownModifier(modifier_token.to_string()),
        )
    })?;
    if options.strict_1988 && !modifier.allowed_in_1988() {
        return Err(ParseError::new(
            line,
            ParseErrorKind::ModifierNotIn1988(modifier_token.to_ascii_uppercase()),
        ));
    }

    let operand_text = operand_text.trim();
    if operand_text.is_empty() {
        return Err(ParseError::new(
            line,
            ParseErrorKind::MissingOperand(OperandSide::A),
        ));
    }
    let Some((a_text, b_text)) = operand_text.split_once(',') else {
        return Err(ParseError::new(
            line,
            ParseErrorKind::MissingOperand(OperandSide::B),
        ));
    };

    let (a_mode, a_field) = parse_operand(a_text.trim(), OperandSide::A, line, options)?;
    let (b_mode, b_field) = parse_operand(b_text.trim(), OperandSide::B, line, options)?;

    Ok(Instruction::new(
        opcode, modifier, a_mode, a_field, b_mode, b_field,
    ))
}

fn parse_operand(
    text: &str,
    side: OperandSide,
    line: usize,
    options: &ParseOptions,
) -> Result<(AddressMode, i32), ParseError> {
    if text.is_empty() {
        return Err(ParseError::new(line, ParseErrorKind::MissingOperand(side)));
    }

    let mut chars = text.chars();
    let prefix = chars.next().unwrap_or_default();
    let mode = AddressMode::from_symbol(prefix).ok_or_else(|| {
        ParseError::new(
            line,
            ParseErrorKind::MissingModePrefix {
                side,
                operand: text.to_string(),
            },
        )
    })?;
    if options.strict_1988 && !mode.allowed_in_1988() {
        return Err(ParseError::new(
            line,
            ParseErrorKind::ModeNotIn1988 { side, mode: prefix },
        ));
    }

    let value_text = chars.as_str().trim();
    if value_text.is_empty() {
        return Err(ParseError::new(line, ParseErrorKind::MissingValue(side)));
    }
    let value = value_text.parse::<i32>().map_err(|_| {
        ParseError::new(
            line,
            ParseErrorKind::InvalidNumeric {
                side,
                operand: value_text.to_string(),
            },
        )
    })?;

    Ok((mode, value))
}

#[cfg(test)]
mod tests {
    use super::{parse_warrior, OperandSide, ParseErrorKind, ParseOptions};
    use crate::instruction::{AddressMode, Instruction, Modifier, Opcode};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn parse(source: &str) -> Result<super::ParsedWarrior, super::ParseError> {
        parse_warrior(source, &ParseOptions::default())
    }

    fn parse_1988(source: &str) -> Result<super::ParsedWarrior, super::ParseError> {
        parse_warrior(
            source,
            &ParseOptions {
                strict_1988: true,
                ..ParseOptions::default()
            },
        )
    }

    #[test]
    fn parses_a_minimal_imp() {
        let warrior = parse("MOV.I $0, $1\n").expect("imp should parse");
        assert_eq!(warrior.entry_point, 0);
        assert_eq!(
            warrior.instructions,
            vec![Instruction::new(
                Opcode::Mov,
                Modifier::I,
                AddressMode::Direct,
                0,
                AddressMode::Direct,
                1,
            )],
        );
    }

    #[test]
    fn tolerates_case_comments_and_spacing() {
        let source = "; leading comment\n\n  mov.i $ 0 ,  $1 ; imp\nadd.aB #1,$2\n";
        let warrior = parse(source).expect("should parse");
        assert_eq!(warrior.len(), 2);
        assert_eq!(warrior.instructions[0].opcode, Opcode::Mov);
        assert_eq!(warrior.instructions[1].modifier, Modifier::AB);
        assert_eq!(warrior.instructions[1].a_mode, AddressMode::Immediate);
    }

    #[test]
    fn seq_is_stored_as_cmp() {
        let warrior = parse("SEQ.I $0, $1\nDAT.F #0, #0\n").expect("should parse");
        assert_eq!(warrior.instructions[0].opcode, Opcode::Cmp);
    }

    #[test]
    fn negative_and_signed_fields_parse_raw() {
        let warrior = parse("MOV.B #-123, $+45\n").expect("should parse");
        assert_eq!(warrior.instructions[0].a_field, -123);
        assert_eq!(warrior.instructions[0].b_field, 45);
    }

    #[test]
    fn org_label_selects_the_entry_point() {
        let source = "ORG start\nDAT.F #0, #0\nstart: MOV.I $0, $1\n";
        let warrior = parse(source).expect("should parse");
        assert_eq!(warrior.entry_point, 1);
        assert_eq!(warrior.len(), 2);
    }

    #[test]
    fn label_without_colon_also_defines_the_entry() {
        let source = "org top\ntop JMP.B $0, $0\n";
        let warrior = parse(source).expect("should parse");
        assert_eq!(warrior.entry_point, 0);
    }

    #[test]
    fn rejects_unknown_opcode() {
        let err = parse("FOO.I $0, $1\n").unwrap_err();
        assert_eq!(err.line, 1);
        assert_eq!(err.kind, ParseErrorKind::UnknownOpcode("FOO".into()));
    }

    #[test]
    fn rejects_ldp_and_stp() {
        let err = parse("LDP.A #0, $1\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnsupportedOpcode("LDP".into()));
        let err = parse("stp.b #0, $1\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnsupportedOpcode("STP".into()));
    }

    #[test]
    fn rejects_other_pseudo_ops() {
        let err = parse("END\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnsupportedPseudoOp("END".into()));
    }

    #[test]
    fn rejects_missing_modifier() {
        let err = parse("MOV $0, $1\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingModifier("MOV".into()));
    }

    #[test]
    fn rejects_unknown_modifier() {
        let err = parse("MOV.Q $0, $1\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnknownModifier("Q".into()));
    }

    #[test]
    fn rejects_missing_operands() {
        let err = parse("MOV.I\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingOperand(OperandSide::A));
        let err = parse("MOV.I $0\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingOperand(OperandSide::B));
        let err = parse("MOV.I $0,\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingOperand(OperandSide::B));
    }

    #[test]
    fn rejects_missing_mode_prefix() {
        let err = parse("MOV.I 0, $1\n").unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::MissingModePrefix {
                side: OperandSide::A,
                operand: "0".into(),
            },
        );
    }

    #[test]
    fn rejects_non_decimal_operand() {
        let err = parse("MOV.I #abc, $0\n").unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::InvalidNumeric {
                side: OperandSide::A,
                operand: "abc".into(),
            },
        );
        let err = parse("MOV.I #0x10, $0\n").unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::InvalidNumeric { .. }));
    }

    #[test]
    fn rejects_bare_mode_prefix() {
        let err = parse("MOV.I #, $0\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingValue(OperandSide::A));
    }

    #[test]
    fn rejects_org_after_first_code_line() {
        let err = parse("MOV.I $0, $1\nORG start\n").unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(err.kind, ParseErrorKind::MisplacedOrg);
    }

    #[test]
    fn rejects_duplicate_org() {
        let err = parse("ORG a\nORG b\na: MOV.I $0, $1\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MisplacedOrg);
    }

    #[test]
    fn rejects_org_label_count_violations() {
        let err = parse("ORG\nMOV.I $0, $1\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::OrgLabelCount(0));
        let err = parse("ORG a b\na: MOV.I $0, $1\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::OrgLabelCount(2));
        let err = parse("ORG 1\nMOV.I $0, $1\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::OrgLabelCount(1));
    }

    #[test]
    fn rejects_undefined_org_label() {
        let err = parse("ORG nowhere\nMOV.I $0, $1\n").unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::UndefinedOrgLabel("nowhere".into()),
        );
    }

    #[test]
    fn rejects_duplicate_label() {
        let err = parse("a: MOV.I $0, $1\na: DAT.F #0, #0\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::DuplicateLabel("a".into()));
    }

    #[test]
    fn rejects_label_without_instruction() {
        let err = parse("lonely:\nMOV.I $0, $1\n").unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::LabelWithoutInstruction("lonely".into()),
        );
    }

    #[test]
    fn rejects_empty_warrior() {
        let err = parse("; nothing here\n\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::EmptyWarrior);
    }

    #[test]
    fn rejects_warrior_over_the_length_bound() {
        let source = "JMP.B $0, $0\n".repeat(5);
        let err = parse_warrior(
            &source,
            &ParseOptions {
                strict_1988: false,
                max_warrior_length: 3,
            },
        )
        .unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::TooLong { length: 5, max: 3 });
    }

    #[test]
    fn strict_1988_rejects_94_only_constructs() {
        let err = parse_1988("MUL.A $0, $1\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::OpcodeNotIn1988("MUL".into()));

        let err = parse_1988("MOV.X $0, $1\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::ModifierNotIn1988("X".into()));

        let err = parse_1988("MOV.A *0, $1\n").unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::ModeNotIn1988 {
                side: OperandSide::A,
                mode: '*',
            },
        );
    }

    #[test]
    fn strict_1988_accepts_the_1988_surface() {
        let source = "SEQ.F $1, @2\nDJN.B <1, $0\nDAT.F #0, #0\n";
        let warrior = parse_1988(source).expect("1988 warrior should parse");
        assert_eq!(warrior.len(), 3);
    }

    #[test]
    fn canonical_print_then_reparse_reproduces_the_warrior() {
        let source = "ORG go\nDAT.F #4, #-7\ngo: MOV.I {2, >-1\nSPL.B @0, <3\n";
        let warrior = parse(source).expect("should parse");
        let reparsed = parse(&warrior.to_canonical_string()).expect("canonical form reparses");
        assert_eq!(reparsed, warrior);
    }

    fn arbitrary_instruction() -> impl Strategy<Value = Instruction> {
        (
            prop::sample::select(Opcode::ALL.to_vec()),
            prop::sample::select(Modifier::ALL.to_vec()),
            prop::sample::select(AddressMode::ALL.to_vec()),
            -99_999i32..99_999,
            prop::sample::select(AddressMode::ALL.to_vec()),
            -99_999i32..99_999,
        )
            .prop_map(|(op, m, am, a, bm, b)| Instruction::new(op, m, am, a, bm, b))
    }

    proptest! {
        #[test]
        fn printed_instructions_always_reparse(instrs in prop::collection::vec(arbitrary_instruction(), 1..20)) {
            let source: String = instrs.iter().map(|i| format!("{i}\n")).collect();
            let warrior = parse(&source).expect("canonical instructions must parse");
            prop_assert_eq!(warrior.instructions, instrs);
            prop_assert_eq!(warrior.entry_point, 0);
        }
    }
}
