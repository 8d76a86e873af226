//! Instruction-level object model for decoded CIL method bodies.
//!
//! # Key Types
//! - [`Instruction`] - A decoded, position-addressable instruction
//! - [`OpCode`] - The operation kinds the model expresses
//! - [`Operand`] - Instruction operands (tokens, immediates, branch targets)
//!
//! The weaver never inserts or removes instructions; it only substitutes one
//! instruction in place for another at the same offset, so instruction counts,
//! ordering, and branch targets elsewhere in a body are preserved exactly.

mod instruction;

pub use instruction::{Instruction, OpCode, Operand};
