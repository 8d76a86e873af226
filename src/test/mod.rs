//! Shared builders for synthetic module graphs used across unit tests.

pub(crate) mod factories;
