//! Field definitions and field attribute flags.
//!
//! Fields carry a storage-kind flag (per-instance vs per-type) and the full
//! name of their declared value type. The one shape the weaver cares about is
//! "singleton storage": a static field whose value type is its own declaring
//! type, i.e. the cache slot of a lazily-created single instance.

use bitflags::bitflags;

use crate::metadata::token::Token;

/// Bitmask for field accessibility extraction
pub const FIELD_ACCESS_MASK: u32 = 0x0007;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    /// Field access flags
    pub struct FieldAccessFlags: u32 {
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

impl FieldAccessFlags {
    /// Extract access flags from raw field attributes
    #[must_use]
    pub fn from_field_flags(flags: u32) -> Self {
        Self::from_bits_truncate(flags & FIELD_ACCESS_MASK)
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    /// Field modifiers and properties
    pub struct FieldModifiers: u32 {
        /// Defined on type, else per instance
        const STATIC = 0x0010;
        /// Field may only be initialized, not written to after init
        const INIT_ONLY = 0x0020;
        /// Value is a compile-time constant
        const LITERAL = 0x0040;
        /// Field does not have to be serialized when type is remoted
        const NOT_SERIALIZED = 0x0080;
        /// Field is special
        const SPECIAL_NAME = 0x0200;
        /// CLI provides 'special' behavior, depending upon the name of the field
        const RTSPECIAL_NAME = 0x0400;
        /// Field has a default value
        const HAS_DEFAULT = 0x8000;
    }
}

impl FieldModifiers {
    /// Extract field modifiers from raw field attributes
    #[must_use]
    pub fn from_field_flags(flags: u32) -> Self {
        Self::from_bits_truncate(flags & !FIELD_ACCESS_MASK)
    }
}

/// A field belonging to exactly one type.
#[derive(Debug, Clone)]
pub struct Field {
    /// Metadata token of this field (table `0x04`).
    pub token: Token,
    /// Simple name of the field, e.g. `<>9`.
    pub name: String,
    /// Full name of the field's declared value type.
    pub field_type: String,
    /// Accessibility of the field.
    pub access: FieldAccessFlags,
    /// Storage kind and other modifiers.
    pub modifiers: FieldModifiers,
}

impl Field {
    /// Creates a field with the given token, name and value type, private and
    /// per-instance by default.
    #[must_use]
    pub fn new(token: Token, name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Field {
            token,
            name: name.into(),
            field_type: field_type.into(),
            access: FieldAccessFlags::PRIVATE,
            modifiers: FieldModifiers::empty(),
        }
    }

    /// Is this field per-type storage rather than per-instance?
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.modifiers.contains(FieldModifiers::STATIC)
    }

    /// Is this field the singleton cache slot of its declaring type?
    ///
    /// True iff the field is static and its declared value type equals the
    /// declaring type's full name - a type holding a static field of itself.
    #[must_use]
    pub fn is_singleton_storage(&self, declaring_full_name: &str) -> bool {
        self.is_static() && self.field_type == declaring_full_name
    }
}
