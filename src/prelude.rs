//! # cilweave Prelude
//!
//! This module provides a convenient prelude for the most commonly used types
//! from the cilweave library. Import this module to get quick access to the
//! essential types for building module graphs and running the weaving pass.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all cilweave operations
pub use crate::Error;

/// The result type used throughout cilweave
pub use crate::Result;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// The weaving orchestrator
pub use crate::weave::Weaver;

/// Engine configuration, including the host opt-out switch
pub use crate::weave::WeaveConfig;

/// Optional debug/info observer channels for one pass
pub use crate::weave::WeaveObservers;

/// Classification surface: the pure predicate and the frozen candidate set
pub use crate::weave::{classify, CandidateSet};

// ================================================================================================
// Metadata Object Model
// ================================================================================================

/// Metadata token type for referencing module entities
pub use crate::metadata::token::Token;

/// The decoded compilation unit
pub use crate::metadata::module::Module;

/// Type definitions, attribute flags, and the compiler-generated marker
pub use crate::metadata::typedef::{
    CustomAttribute, TypeAttributes, TypeDef, TypeRef, COMPILER_GENERATED_ATTRIBUTE,
};

/// Field definitions and flags
pub use crate::metadata::field::{Field, FieldAccessFlags, FieldModifiers};

/// Method definitions and flags
pub use crate::metadata::method::{Method, MethodAccessFlags, MethodModifiers};

// ================================================================================================
// Instruction Model
// ================================================================================================

/// Decoded instructions, opcodes, and operands
pub use crate::assembly::{Instruction, OpCode, Operand};
