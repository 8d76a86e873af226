//! The singleton-cache weaving engine.
//!
//! Three components composed by one orchestrator, run in a fixed dependency
//! order over exactly one [`crate::metadata::module::Module`] per invocation:
//!
//! 1. [`classify`] - decides which declared types are eligible targets. The
//!    candidate set is computed once, before any mutation, and frozen.
//! 2. [`transform`] - converts an eligible type and its non-constructor
//!    methods to publicly visible, per-type bound members.
//! 3. [`rewrite`] - replaces every static-field load of an eligible type's
//!    singleton with a null load across the bodies of its enclosing type.
//!
//! The engine reports progress through two optional caller-supplied observers
//! ([`WeaveObservers`]), never through ambient logging, and can be skipped
//! wholesale via [`WeaveConfig`] when the host build opts out.
//!
//! # Example
//!
//! ```rust
//! use cilweave::prelude::*;
//!
//! let mut module = Module::new("App.exe");
//! let weaver = Weaver::new(WeaveConfig::default());
//! weaver.run(&mut module, WeaveObservers::default())?;
//! # Ok::<(), cilweave::Error>(())
//! ```

pub mod classify;
pub mod config;
pub mod observer;
pub mod rewrite;
pub mod transform;

mod engine;

pub use classify::{classify, CandidateSet};
pub use config::WeaveConfig;
pub use engine::Weaver;
pub use observer::WeaveObservers;
