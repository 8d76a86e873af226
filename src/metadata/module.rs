//! The top-level module container of a decoded compilation unit.

use crate::metadata::{field::Field, method::Method, token::Token, typedef::TypeDef};

/// A decoded compilation unit: the set of all declared types reachable for one
/// build output, with their fields, methods, and instruction-sequence bodies.
///
/// The graph is produced by an external loader and owned by the caller for the
/// engine's entire execution. Set membership is immutable during a pass: types
/// may be mutated in place, but none are added or removed once classification
/// completes. The engine assumes exclusive access for the duration of a call.
#[derive(Debug, Clone)]
pub struct Module {
    /// Name of the module, e.g. `App.exe`.
    pub name: String,
    /// All types declared in this module, in loader order.
    pub types: Vec<TypeDef>,
}

impl Module {
    /// Creates an empty module with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Module {
            name: name.into(),
            types: Vec::new(),
        }
    }

    /// Looks up a type by its metadata token.
    #[must_use]
    pub fn type_by_token(&self, token: Token) -> Option<&TypeDef> {
        self.types.iter().find(|ty| ty.token == token)
    }

    /// Looks up a type by its metadata token, mutably.
    pub fn type_by_token_mut(&mut self, token: Token) -> Option<&mut TypeDef> {
        self.types.iter_mut().find(|ty| ty.token == token)
    }

    /// Looks up a type by its CIL-style full name.
    #[must_use]
    pub fn type_by_name(&self, full_name: &str) -> Option<&TypeDef> {
        self.types.iter().find(|ty| ty.full_name() == full_name)
    }

    /// Resolves a field token to the declaring type and the field itself.
    ///
    /// Modules are small enough that a linear scan over the owned graph beats
    /// maintaining a side table that mutation could invalidate.
    #[must_use]
    pub fn field(&self, token: Token) -> Option<(&TypeDef, &Field)> {
        self.types.iter().find_map(|ty| {
            ty.fields
                .iter()
                .find(|field| field.token == token)
                .map(|field| (ty, field))
        })
    }

    /// Resolves a method token to the declaring type and the method itself.
    #[must_use]
    pub fn method(&self, token: Token) -> Option<(&TypeDef, &Method)> {
        self.types.iter().find_map(|ty| {
            ty.methods
                .iter()
                .find(|method| method.token == token)
                .map(|method| (ty, method))
        })
    }

    /// Total instruction count across all method bodies.
    #[must_use]
    pub fn instruction_count(&self) -> usize {
        self.types
            .iter()
            .flat_map(|ty| ty.methods.iter())
            .map(|method| method.body.len())
            .sum()
    }
}
