//! Method definitions and method attribute flags.
//!
//! This module defines the bitflags used to represent method accessibility and
//! binding, split into logical groups the same way the raw ECMA-335 attribute
//! word is masked apart, plus the [`Method`] definition itself with its body as
//! an ordered instruction sequence.

use bitflags::bitflags;

use crate::{assembly::Instruction, metadata::token::Token};

/// Bitmask for `ACCESS` state extraction
pub const METHOD_ACCESS_MASK: u32 = 0x0007;
/// Bitmask for `VTABLE_LAYOUT` information extraction
pub const METHOD_VTABLE_LAYOUT_MASK: u32 = 0x0100;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    /// Method access flags
    pub struct MethodAccessFlags: u32 {
        /// Member not referenceable
        const COMPILER_CONTROLLED = 0x0000;
        /// Accessible only by the parent type
        const PRIVATE = 0x0001;
        /// Accessible by sub-types only in this Assembly
        const FAM_AND_ASSEM = 0x0002;
        /// Accessible by anyone in the Assembly
        const ASSEM = 0x0003;
        /// Accessible only by type and sub-types
        const FAMILY = 0x0004;
        /// Accessible by sub-types anywhere, plus anyone in assembly
        const FAM_OR_ASSEM = 0x0005;
        /// Accessible by anyone who has visibility to this scope
        const PUBLIC = 0x0006;
    }
}

impl MethodAccessFlags {
    /// Extract access flags from raw method attributes
    #[must_use]
    pub fn from_method_flags(flags: u32) -> Self {
        Self::from_bits_truncate(flags & METHOD_ACCESS_MASK)
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    /// Method modifiers and properties
    pub struct MethodModifiers: u32 {
        /// Defined on type, else per instance
        const STATIC = 0x0010;
        /// Method cannot be overridden
        const FINAL = 0x0020;
        /// Method is virtual
        const VIRTUAL = 0x0040;
        /// Method hides by name+sig, else just by name
        const HIDE_BY_SIG = 0x0080;
        /// Method can only be overridden if also accessible
        const STRICT = 0x0200;
        /// Method does not provide an implementation
        const ABSTRACT = 0x0400;
        /// Method is special
        const SPECIAL_NAME = 0x0800;
        /// CLI provides 'special' behavior, depending upon the name of the method
        const RTSPECIAL_NAME = 0x1000;
    }
}

impl MethodModifiers {
    /// Extract method modifiers from raw method attributes
    #[must_use]
    pub fn from_method_flags(flags: u32) -> Self {
        Self::from_bits_truncate(flags & !METHOD_ACCESS_MASK & !METHOD_VTABLE_LAYOUT_MASK)
    }
}

/// A method belonging to exactly one type, with its body as an ordered,
/// position-addressable instruction sequence.
#[derive(Debug, Clone)]
pub struct Method {
    /// Metadata token of this method (table `0x06`).
    pub token: Token,
    /// Simple name of the method; `.ctor` / `.cctor` for constructors.
    pub name: String,
    /// Accessibility of the method.
    pub access: MethodAccessFlags,
    /// Binding and other modifiers.
    pub modifiers: MethodModifiers,
    /// Instruction stream of the method body, ordered by offset. Empty for
    /// abstract and runtime-provided methods.
    pub body: Vec<Instruction>,
}

impl Method {
    /// Creates a bodyless method with the given token and name, private and
    /// per-instance by default.
    #[must_use]
    pub fn new(token: Token, name: impl Into<String>) -> Self {
        Method {
            token,
            name: name.into(),
            access: MethodAccessFlags::PRIVATE,
            modifiers: MethodModifiers::empty(),
            body: Vec::new(),
        }
    }

    /// Is this an instance constructor?
    #[must_use]
    pub fn is_ctor(&self) -> bool {
        self.name == ".ctor"
    }

    /// Is this a type initializer (static constructor)?
    #[must_use]
    pub fn is_cctor(&self) -> bool {
        self.name == ".cctor"
    }

    /// Is this a constructor of either kind?
    ///
    /// Constructors are never converted by the weaver: the singleton
    /// construction path, if ever invoked, must remain an instance construction.
    #[must_use]
    pub fn is_constructor(&self) -> bool {
        self.is_ctor() || self.is_cctor()
    }

    /// Is this method bound per-type rather than per-instance?
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.modifiers.contains(MethodModifiers::STATIC)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_extraction_splits_groups() {
        let raw = 0x00C6; // public | virtual | hide_by_sig
        assert_eq!(
            MethodAccessFlags::from_method_flags(raw),
            MethodAccessFlags::PUBLIC
        );
        let modifiers = MethodModifiers::from_method_flags(raw);
        assert!(modifiers.contains(MethodModifiers::VIRTUAL));
        assert!(modifiers.contains(MethodModifiers::HIDE_BY_SIG));
        assert!(!modifiers.contains(MethodModifiers::STATIC));
    }

    #[test]
    fn test_constructor_detection() {
        let ctor = Method::new(Token::new(0x06000001), ".ctor");
        assert!(ctor.is_ctor());
        assert!(!ctor.is_cctor());
        assert!(ctor.is_constructor());

        let cctor = Method::new(Token::new(0x06000002), ".cctor");
        assert!(cctor.is_constructor());

        let invoke = Method::new(Token::new(0x06000003), "Invoke");
        assert!(!invoke.is_constructor());
    }

    #[test]
    fn test_is_static() {
        let mut method = Method::new(Token::new(0x06000001), "Invoke");
        assert!(!method.is_static());
        method.modifiers |= MethodModifiers::STATIC;
        assert!(method.is_static());
    }
}
