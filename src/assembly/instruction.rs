//! CIL instruction representation: opcodes, operands, and decoded instructions.
//!
//! The model covers the subset of ECMA-335 opcodes that the decoded graphs this
//! engine consumes actually contain around closure call sites - loads, stores,
//! calls, delegate construction, and short branches. Each opcode knows its
//! encoded byte pair and its mnemonic; mnemonics are the strings that appear in
//! trace output.

use std::fmt;

use strum::{Display, EnumIter, IntoStaticStr};

use crate::metadata::token::Token;

/// The operation kind of a single CIL instruction.
///
/// Variants are named after their ECMA-335 mnemonics. The derived string form
/// of each variant is the mnemonic itself:
///
/// ```rust
/// use cilweave::assembly::OpCode;
///
/// assert_eq!(OpCode::Ldsfld.to_string(), "ldsfld");
/// assert_eq!(OpCode::Ldnull.mnemonic(), "ldnull");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr, EnumIter)]
pub enum OpCode {
    /// No operation
    #[strum(serialize = "nop")]
    Nop,
    /// Load argument 0 onto the stack
    #[strum(serialize = "ldarg.0")]
    Ldarg0,
    /// Load argument 1 onto the stack
    #[strum(serialize = "ldarg.1")]
    Ldarg1,
    /// Load argument 2 onto the stack
    #[strum(serialize = "ldarg.2")]
    Ldarg2,
    /// Load local variable 0 onto the stack
    #[strum(serialize = "ldloc.0")]
    Ldloc0,
    /// Store the stack top into local variable 0
    #[strum(serialize = "stloc.0")]
    Stloc0,
    /// Push a null reference onto the stack
    #[strum(serialize = "ldnull")]
    Ldnull,
    /// Push a 32-bit integer constant (short form)
    #[strum(serialize = "ldc.i4.s")]
    LdcI4S,
    /// Push a 32-bit integer constant
    #[strum(serialize = "ldc.i4")]
    LdcI4,
    /// Duplicate the value on top of the stack
    #[strum(serialize = "dup")]
    Dup,
    /// Remove the value on top of the stack
    #[strum(serialize = "pop")]
    Pop,
    /// Call a method
    #[strum(serialize = "call")]
    Call,
    /// Call a method associated with an object
    #[strum(serialize = "callvirt")]
    Callvirt,
    /// Return from the current method
    #[strum(serialize = "ret")]
    Ret,
    /// Unconditional branch (short form)
    #[strum(serialize = "br.s")]
    BrS,
    /// Branch if the stack top is true/non-null (short form)
    #[strum(serialize = "brtrue.s")]
    BrtrueS,
    /// Branch if the stack top is false/null (short form)
    #[strum(serialize = "brfalse.s")]
    BrfalseS,
    /// Push a string literal
    #[strum(serialize = "ldstr")]
    Ldstr,
    /// Allocate an object and call its constructor
    #[strum(serialize = "newobj")]
    Newobj,
    /// Load the value of a static field onto the stack
    #[strum(serialize = "ldsfld")]
    Ldsfld,
    /// Store the stack top into a static field
    #[strum(serialize = "stsfld")]
    Stsfld,
    /// Push a pointer to a method referenced by token
    #[strum(serialize = "ldftn")]
    Ldftn,
}

impl OpCode {
    /// Returns the encoded byte pair of this opcode as `(prefix, opcode)`.
    ///
    /// Single-byte opcodes have a zero prefix; extended opcodes carry the
    /// `0xFE` prefix byte.
    #[must_use]
    pub const fn bytes(&self) -> (u8, u8) {
        match self {
            OpCode::Nop => (0x00, 0x00),
            OpCode::Ldarg0 => (0x00, 0x02),
            OpCode::Ldarg1 => (0x00, 0x03),
            OpCode::Ldarg2 => (0x00, 0x04),
            OpCode::Ldloc0 => (0x00, 0x06),
            OpCode::Stloc0 => (0x00, 0x0A),
            OpCode::Ldnull => (0x00, 0x14),
            OpCode::LdcI4S => (0x00, 0x1F),
            OpCode::LdcI4 => (0x00, 0x20),
            OpCode::Dup => (0x00, 0x25),
            OpCode::Pop => (0x00, 0x26),
            OpCode::Call => (0x00, 0x28),
            OpCode::Ret => (0x00, 0x2A),
            OpCode::BrS => (0x00, 0x2B),
            OpCode::BrfalseS => (0x00, 0x2C),
            OpCode::BrtrueS => (0x00, 0x2D),
            OpCode::Callvirt => (0x00, 0x6F),
            OpCode::Ldstr => (0x00, 0x72),
            OpCode::Newobj => (0x00, 0x73),
            OpCode::Ldsfld => (0x00, 0x7E),
            OpCode::Stsfld => (0x00, 0x80),
            OpCode::Ldftn => (0xFE, 0x06),
        }
    }

    /// Returns the ECMA-335 mnemonic of this opcode.
    #[must_use]
    pub fn mnemonic(&self) -> &'static str {
        self.into()
    }
}

/// The operand attached to a single instruction.
///
/// Tokens reference metadata entities indirectly; resolving them against a
/// module is the consumer's job, and a token that fails to resolve is a loader
/// precondition violation.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// No operand present
    None,
    /// Metadata token reference (field, method, or type)
    Token(Token),
    /// Inline 32-bit integer constant
    Immediate(i32),
    /// Branch target as an absolute byte offset within the body
    Target(u64),
    /// Inline string literal
    String(String),
}

/// A single decoded CIL instruction at a fixed position within its method body.
///
/// Instructions are ordered and addressed by byte offset. Substituting an
/// instruction in place never disturbs the offsets of its neighbors, which is
/// the only structural guarantee the weaver relies on.
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    /// Byte offset of this instruction within its method body
    pub offset: u64,
    /// The operation kind
    pub opcode: OpCode,
    /// The operand data for this instruction
    pub operand: Operand,
}

impl Instruction {
    /// Creates an instruction at the given offset.
    #[must_use]
    pub fn new(offset: u64, opcode: OpCode, operand: Operand) -> Self {
        Instruction {
            offset,
            opcode,
            operand,
        }
    }

    /// Creates a `ldnull` at the given offset, the substitute the weaver drops
    /// in place of a singleton-field load.
    #[must_use]
    pub fn ldnull(offset: u64) -> Self {
        Instruction::new(offset, OpCode::Ldnull, Operand::None)
    }

    /// Returns the ECMA-335 mnemonic of this instruction's opcode.
    #[must_use]
    pub fn mnemonic(&self) -> &'static str {
        self.opcode.mnemonic()
    }

    /// Returns the operand as a metadata token, if it is one.
    #[must_use]
    pub fn token_operand(&self) -> Option<Token> {
        match self.operand {
            Operand::Token(token) => Some(token),
            _ => None,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.operand {
            Operand::None => write!(f, "IL_{:04x}: {}", self.offset, self.mnemonic()),
            Operand::Token(token) => {
                write!(f, "IL_{:04x}: {} {}", self.offset, self.mnemonic(), token)
            }
            Operand::Immediate(value) => {
                write!(f, "IL_{:04x}: {} {}", self.offset, self.mnemonic(), value)
            }
            Operand::Target(target) => {
                write!(
                    f,
                    "IL_{:04x}: {} IL_{:04x}",
                    self.offset,
                    self.mnemonic(),
                    target
                )
            }
            Operand::String(text) => {
                write!(f, "IL_{:04x}: {} \"{}\"", self.offset, self.mnemonic(), text)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_mnemonics_are_lowercase_and_unique() {
        let mut seen = std::collections::HashSet::new();
        for opcode in OpCode::iter() {
            let mnemonic = opcode.mnemonic();
            assert_eq!(mnemonic, mnemonic.to_lowercase());
            assert!(seen.insert(mnemonic), "duplicate mnemonic: {mnemonic}");
        }
    }

    #[test]
    fn test_byte_pairs_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for opcode in OpCode::iter() {
            assert!(seen.insert(opcode.bytes()), "duplicate encoding: {opcode}");
        }
    }

    #[test]
    fn test_extended_prefix() {
        assert_eq!(OpCode::Ldftn.bytes(), (0xFE, 0x06));
        assert_eq!(OpCode::Ldsfld.bytes(), (0x00, 0x7E));
        assert_eq!(OpCode::Ldnull.bytes(), (0x00, 0x14));
    }

    #[test]
    fn test_ldnull_substitute_keeps_offset() {
        let original = Instruction::new(0x0A, OpCode::Ldsfld, Operand::Token(Token::new(0x04000001)));
        let substitute = Instruction::ldnull(original.offset);
        assert_eq!(substitute.offset, 0x0A);
        assert_eq!(substitute.opcode, OpCode::Ldnull);
        assert_eq!(substitute.operand, Operand::None);
    }

    #[test]
    fn test_display() {
        let instr = Instruction::new(0x10, OpCode::Ldsfld, Operand::Token(Token::new(0x04000002)));
        assert_eq!(instr.to_string(), "IL_0010: ldsfld 0x04000002");
        assert_eq!(Instruction::ldnull(0).to_string(), "IL_0000: ldnull");
    }
}
