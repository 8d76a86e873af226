//! Member transformation: public visibility and per-type binding for an
//! eligible type.
//!
//! Conversion is unconditional given eligibility and irreversible within the
//! pass; there is no rollback path. The classifier therefore only reports
//! types for which this step is guaranteed to succeed on every method, which
//! it is, because no precondition on a method can make the conversion fail.

use crate::{
    metadata::{
        method::{MethodAccessFlags, MethodModifiers},
        typedef::{TypeAttributes, TypeDef},
    },
    weave::observer::WeaveObservers,
};

/// Converts one eligible type in place.
///
/// Every non-constructor method becomes publicly visible and per-type bound:
/// a caller that previously needed an instance only to invoke the method can
/// now call it without one, which is what makes the singleton storage
/// unnecessary. Constructors keep their binding and visibility so that the
/// singleton construction path, if ever invoked, remains an instance
/// construction. The type itself becomes publicly visible last, so call sites
/// anywhere in the module can still reference it structurally after rewriting.
pub fn apply(ty: &mut TypeDef, observers: &mut WeaveObservers) {
    let full_name = ty.full_name();

    for method in &mut ty.methods {
        if method.is_constructor() {
            continue;
        }

        observers.debug(|| {
            format!(
                "Changing {}::{} to be a public static method.",
                full_name, method.name
            )
        });
        method.access = MethodAccessFlags::PUBLIC;
        method.modifiers |= MethodModifiers::STATIC;
    }

    observers.debug(|| format!("Changing {full_name} to be a public type."));
    if ty.is_nested() {
        ty.set_visibility(TypeAttributes::NESTED_PUBLIC);
    } else {
        ty.set_visibility(TypeAttributes::PUBLIC);
    }
}
