// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![allow(dead_code)]

//! # cilweave
//!
//! A post-compilation bytecode weaver for decoded CIL module graphs.
//!
//! When a compiler lowers a stateless lambda, it synthesizes a nested cache type
//! holding a static singleton field of its own type, and call sites load that
//! singleton only to bind it as the target of a delegate. `cilweave` finds exactly
//! those synthetic cache types, converts their members to public static methods,
//! and replaces every singleton-field load with a null load, so that no singleton
//! instance is ever allocated or observed. All other types and all other bytecode
//! are left untouched.
//!
//! The crate operates purely on an already-decoded object model: reading and
//! writing the binary container format is the job of an external loader and
//! serializer. `cilweave` only queries and mutates the decoded graph in place.
//!
//! ## Quick Start
//!
//! ```rust
//! use cilweave::prelude::*;
//!
//! let mut module = Module::new("App.exe");
//! // ... populated by an external loader ...
//!
//! let weaver = Weaver::new(WeaveConfig::default());
//! weaver.run(&mut module, WeaveObservers::default())?;
//! # Ok::<(), cilweave::Error>(())
//! ```
//!
//! ## Observing the pass
//!
//! The engine never logs through a global sink. Callers hand in up to two
//! string observers, one per verbosity level:
//!
//! ```rust
//! use cilweave::prelude::*;
//!
//! let mut module = Module::new("App.exe");
//! let mut trace = Vec::new();
//!
//! let observers = WeaveObservers::new()
//!     .on_debug(|line| trace.push(line.to_string()))
//!     .on_info(|line| println!("{line}"));
//!
//! Weaver::default().run(&mut module, observers)?;
//! # Ok::<(), cilweave::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`metadata`] - The decoded object model: modules, types, fields, methods
//! - [`assembly`] - Instruction representation: opcodes and operands
//! - [`weave`] - The analysis-and-rewrite engine itself
//! - [`Error`] and [`Result`] - Error handling
//!
//! The engine runs three phases in a fixed order: classification (which types
//! are synthetic singleton caches), member transformation (public + static),
//! and call-site rewriting (`ldsfld` of a cache singleton becomes `ldnull`).
//! The candidate set is frozen before any mutation occurs.

pub(crate) mod error;

/// Shared functionality which is used in unit- and integration-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// This module provides a curated selection of the most frequently used types
/// from across the cilweave library, allowing for convenient glob imports.
///
/// # Example
///
/// ```rust
/// use cilweave::prelude::*;
///
/// let mut module = Module::new("App.exe");
/// Weaver::default().run(&mut module, WeaveObservers::default())?;
/// # Ok::<(), cilweave::Error>(())
/// ```
pub mod prelude;

/// CIL instruction representation based on ECMA-335
///
/// This module provides the instruction-level half of the decoded object model:
///
/// - [`assembly::OpCode`] - The operation kinds the model can express
/// - [`assembly::Operand`] - Instruction operands (tokens, immediates, targets)
/// - [`assembly::Instruction`] - A position-addressable decoded instruction
///
/// Instructions are ordered and addressed by byte offset within their method
/// body. The weaver only ever substitutes instructions in place, so offsets
/// and branch targets elsewhere in a body stay valid by construction.
pub mod assembly;

/// Decoded CIL metadata object model based on ECMA-335
///
/// This module holds the container half of the decoded object model that an
/// external loader produces and hands to the engine:
///
/// - [`metadata::module::Module`] - Top-level container of declared types
/// - [`metadata::typedef::TypeDef`] - A declared type with attributes, fields, methods
/// - [`metadata::field::Field`] - A field with storage-kind flags and a value type
/// - [`metadata::method::Method`] - A method with binding flags and an instruction body
/// - [`metadata::token::Token`] - Metadata tokens for cross-references
///
/// The engine never constructs or destroys these entities during a pass; it
/// only mutates flags and substitutes individual instructions in place.
pub mod metadata;

/// The singleton-cache weaving engine
///
/// Composes three components in a fixed dependency order:
///
/// 1. [`weave::classify`] - decides which types are eligible targets
/// 2. [`weave::transform`] - converts an eligible type's members to public static
/// 3. [`weave::rewrite`] - replaces singleton-field loads with null loads
///
/// The [`weave::Weaver`] orchestrator runs all three over exactly one
/// [`metadata::module::Module`] per invocation and reports progress through
/// caller-supplied observers.
pub mod weave;

pub use error::{Error, Result};
