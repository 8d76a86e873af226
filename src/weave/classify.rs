//! Type classification: which declared types are eligible weaving targets.
//!
//! A type is eligible iff it carries the compiler-generated marker, owns at
//! least one singleton-storage field, and every one of its non-constructor
//! methods can be converted to per-type binding. The predicate is pure - no
//! mutation happens during classification - and the resulting candidate set is
//! frozen before any later phase runs, so the call-site scan never sees types
//! invalidated or added mid-pass.

use crate::metadata::{method::Method, module::Module, token::Token, typedef::TypeDef};

/// The frozen, ordered set of eligible types produced by [`classify`].
///
/// Tokens and full names are stored side by side: the transformer addresses
/// candidates by token, while the call-site rewriter matches field value types
/// by full name.
#[derive(Debug, Clone, Default)]
pub struct CandidateSet {
    tokens: Vec<Token>,
    names: Vec<String>,
}

impl CandidateSet {
    /// Tokens of all eligible types, in module declaration order.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Full names of all eligible types, parallel to [`tokens`](Self::tokens).
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Is a type with this full name part of the candidate set?
    #[must_use]
    pub fn contains_name(&self, full_name: &str) -> bool {
        self.names.iter().any(|name| name == full_name)
    }

    /// True when no eligible type was found; the pass then performs zero
    /// mutations and emits zero completion notices, which is success.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Number of eligible types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }
}

/// Computes the frozen candidate set for a module.
///
/// Evaluated exactly once per pass, before any mutation occurs. An empty
/// result is valid and terminates the pass with zero rewrites.
#[must_use]
pub fn classify(module: &Module) -> CandidateSet {
    let mut candidates = CandidateSet::default();
    for ty in &module.types {
        if is_candidate(ty) {
            candidates.tokens.push(ty.token);
            candidates.names.push(ty.full_name());
        }
    }
    candidates
}

/// The pure eligibility predicate, short-circuiting in order: generated-marker
/// check, singleton-field existence check, all-methods-convertible check.
#[must_use]
pub fn is_candidate(ty: &TypeDef) -> bool {
    ty.is_compiler_generated()
        && owns_singleton_storage(ty)
        && ty
            .methods
            .iter()
            .all(|method| method.is_constructor() || is_convertible(method))
}

/// Does this type hold at least one static field of its own type?
fn owns_singleton_storage(ty: &TypeDef) -> bool {
    let full_name = ty.full_name();
    ty.fields
        .iter()
        .any(|field| field.is_singleton_storage(&full_name))
}

/// Can this non-constructor method be converted to per-type binding?
///
/// Conversion is unconditional today, so this always answers yes; a stricter
/// conversion rule belongs here, and the all-methods check above keeps its
/// shape for that reason.
fn is_convertible(_method: &Method) -> bool {
    true
}
