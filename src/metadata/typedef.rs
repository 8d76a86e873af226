//! Type definitions and type attribute flags.
//!
//! A [`TypeDef`] is one declared type of a [`crate::metadata::module::Module`]:
//! its qualified name, attached custom attributes, owned fields and methods, an
//! optional enclosing type reference, and a raw [`TypeAttributes`] flag word.
//! The flag word stays raw `u32` (visibility is a 3-bit field, not independent
//! bits), with masked accessors for the pieces the weaver touches.

use crate::metadata::{field::Field, method::Method, token::Token};

/// Full name of the marker attribute compilers attach to types they synthesize.
///
/// The classifier only ever considers types carrying this marker; everything a
/// source author wrote directly is off limits by construction.
pub const COMPILER_GENERATED_ATTRIBUTE: &str =
    "System.Runtime.CompilerServices.CompilerGeneratedAttribute";

#[allow(non_snake_case)]
/// Type attribute flag constants for TypeDef entries.
///
/// These are the ECMA-335 `TypeDef.Flags` values. Visibility is a 3-bit field
/// extracted with [`TypeAttributes::VISIBILITY_MASK`] and compared against the
/// visibility constants; the remaining constants are independent bits.
pub mod TypeAttributes {
    /// Mask for extracting type visibility information.
    pub const VISIBILITY_MASK: u32 = 0x0000_0007;

    /// Type has no public scope (internal to assembly).
    pub const NOT_PUBLIC: u32 = 0x0000_0000;

    /// Type has public scope (visible outside assembly).
    pub const PUBLIC: u32 = 0x0000_0001;

    /// Nested type, accessible wherever the enclosing type is accessible.
    pub const NESTED_PUBLIC: u32 = 0x0000_0002;

    /// Nested type, accessible only within the enclosing type.
    pub const NESTED_PRIVATE: u32 = 0x0000_0003;

    /// Nested type, accessible to types deriving from the enclosing type.
    pub const NESTED_FAMILY: u32 = 0x0000_0004;

    /// Nested type, accessible within the same assembly.
    pub const NESTED_ASSEMBLY: u32 = 0x0000_0005;

    /// Class is abstract and cannot be instantiated directly.
    pub const ABSTRACT: u32 = 0x0000_0080;

    /// Class is sealed and cannot be inherited from.
    pub const SEALED: u32 = 0x0000_0100;

    /// Type name carries special meaning to tooling.
    pub const SPECIAL_NAME: u32 = 0x0000_0400;

    /// Initializing the type need not happen before the first static field access.
    pub const BEFORE_FIELD_INIT: u32 = 0x0010_0000;
}

/// A custom attribute attached to a type.
///
/// Only the constructor's declaring type matters to the weaver, so the decoded
/// model keeps the full name of the attribute type and drops blob arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomAttribute {
    /// Full name of the attribute type, e.g.
    /// `System.Runtime.CompilerServices.CompilerGeneratedAttribute`.
    pub attribute_type: String,
}

impl CustomAttribute {
    /// Creates a custom attribute from the full name of its attribute type.
    #[must_use]
    pub fn new(attribute_type: impl Into<String>) -> Self {
        CustomAttribute {
            attribute_type: attribute_type.into(),
        }
    }

    /// Is this the compiler-generated marker attribute?
    #[must_use]
    pub fn is_compiler_generated(&self) -> bool {
        self.attribute_type == COMPILER_GENERATED_ATTRIBUTE
    }
}

/// A by-name reference to another type, as stored on nested types to identify
/// their lexical container.
///
/// Carrying the full name alongside the token lets [`TypeDef::full_name`]
/// render CIL-style nested names without module context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef {
    /// Token of the referenced type.
    pub token: Token,
    /// Full name of the referenced type, e.g. `App.Program`.
    pub full_name: String,
}

impl TypeRef {
    /// Creates a type reference.
    #[must_use]
    pub fn new(token: Token, full_name: impl Into<String>) -> Self {
        TypeRef {
            token,
            full_name: full_name.into(),
        }
    }
}

/// A declared type: qualified name, markers, members, and mutable attributes.
///
/// Set membership within a module is fixed for the duration of a pass; the
/// weaver mutates flags and instruction operands in place but never adds or
/// removes types, fields, or methods.
#[derive(Debug, Clone)]
pub struct TypeDef {
    /// Metadata token of this type (table `0x02`).
    pub token: Token,
    /// Namespace, empty for nested types (CIL stores the namespace on the
    /// outermost enclosing type only).
    pub namespace: String,
    /// Simple name of the type, e.g. `<>c`.
    pub name: String,
    /// Raw ECMA-335 [`TypeAttributes`] flag word.
    pub flags: u32,
    /// Custom attributes attached to this type.
    pub custom_attributes: Vec<CustomAttribute>,
    /// Fields owned by this type.
    pub fields: Vec<Field>,
    /// Methods owned by this type.
    pub methods: Vec<Method>,
    /// Enclosing type for nested types, `None` for top-level types.
    pub declaring: Option<TypeRef>,
}

impl TypeDef {
    /// Creates an empty type definition with the given token, namespace and name.
    #[must_use]
    pub fn new(token: Token, namespace: impl Into<String>, name: impl Into<String>) -> Self {
        TypeDef {
            token,
            namespace: namespace.into(),
            name: name.into(),
            flags: 0,
            custom_attributes: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            declaring: None,
        }
    }

    /// Renders the CIL-style full name of this type.
    ///
    /// Top-level types render as `Namespace.Name` (or just `Name` when the
    /// namespace is empty); nested types render as `Enclosing/Name`.
    #[must_use]
    pub fn full_name(&self) -> String {
        match &self.declaring {
            Some(declaring) => format!("{}/{}", declaring.full_name, self.name),
            None if self.namespace.is_empty() => self.name.clone(),
            None => format!("{}.{}", self.namespace, self.name),
        }
    }

    /// Does this type carry the compiler-generated marker attribute?
    #[must_use]
    pub fn is_compiler_generated(&self) -> bool {
        self.custom_attributes
            .iter()
            .any(CustomAttribute::is_compiler_generated)
    }

    /// Is this a nested type?
    #[must_use]
    pub fn is_nested(&self) -> bool {
        self.declaring.is_some()
    }

    /// Extracts the 3-bit visibility field from the flag word.
    #[must_use]
    pub fn visibility(&self) -> u32 {
        self.flags & TypeAttributes::VISIBILITY_MASK
    }

    /// Replaces the 3-bit visibility field, leaving all other flags intact.
    pub fn set_visibility(&mut self, visibility: u32) {
        self.flags =
            (self.flags & !TypeAttributes::VISIBILITY_MASK) | (visibility & TypeAttributes::VISIBILITY_MASK);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_top_level() {
        let ty = TypeDef::new(Token::new(0x02000001), "App", "Program");
        assert_eq!(ty.full_name(), "App.Program");

        let global = TypeDef::new(Token::new(0x02000002), "", "<Module>");
        assert_eq!(global.full_name(), "<Module>");
    }

    #[test]
    fn test_full_name_nested() {
        let mut ty = TypeDef::new(Token::new(0x02000003), "", "<>c");
        ty.declaring = Some(TypeRef::new(Token::new(0x02000001), "App.Program"));
        assert_eq!(ty.full_name(), "App.Program/<>c");
    }

    #[test]
    fn test_compiler_generated_marker() {
        let mut ty = TypeDef::new(Token::new(0x02000001), "App", "Program");
        assert!(!ty.is_compiler_generated());

        ty.custom_attributes
            .push(CustomAttribute::new("System.SerializableAttribute"));
        assert!(!ty.is_compiler_generated());

        ty.custom_attributes
            .push(CustomAttribute::new(COMPILER_GENERATED_ATTRIBUTE));
        assert!(ty.is_compiler_generated());
    }

    #[test]
    fn test_set_visibility_preserves_other_flags() {
        let mut ty = TypeDef::new(Token::new(0x02000001), "App", "Program");
        ty.flags = TypeAttributes::NESTED_PRIVATE
            | TypeAttributes::SEALED
            | TypeAttributes::BEFORE_FIELD_INIT;

        ty.set_visibility(TypeAttributes::NESTED_PUBLIC);

        assert_eq!(ty.visibility(), TypeAttributes::NESTED_PUBLIC);
        assert_ne!(ty.flags & TypeAttributes::SEALED, 0);
        assert_ne!(ty.flags & TypeAttributes::BEFORE_FIELD_INIT, 0);
    }
}
