//! Decoded CIL metadata object model.
//!
//! This is the container half of the object model an external loader hands to
//! the engine: modules owning types, types owning fields and methods, and
//! tokens tying instruction operands back to metadata entities.
//!
//! # Key Types
//! - [`module::Module`] - Top-level container of all declared types
//! - [`typedef::TypeDef`] - A declared type with attributes and members
//! - [`field::Field`] - A field with a storage-kind flag and a value type
//! - [`method::Method`] - A method with binding flags and an instruction body
//! - [`token::Token`] - Metadata tokens for cross-references
//!
//! Ownership of the whole graph remains with the caller; the engine only
//! mutates flags and substitutes individual instructions in place.

pub mod field;
pub mod method;
pub mod module;
pub mod token;
pub mod typedef;
