//! Factories for the decoded-graph shapes the weaver encounters.
//!
//! Token numbering is deterministic per cache index so tests can reference
//! entities directly: cache type `0x02000100 + i`, singleton field
//! `0x04000000 + i`, cache constructor `0x06000000 + i*0x10`, cache invoke
//! method `0x06000000 + i*0x10 + 1`. Outer types use `0x02000000 + i` and
//! outer methods stay below `0x06000010`.

use crate::{
    assembly::{Instruction, OpCode, Operand},
    metadata::{
        field::{Field, FieldAccessFlags, FieldModifiers},
        method::{Method, MethodAccessFlags, MethodModifiers},
        module::Module,
        token::Token,
        typedef::{CustomAttribute, TypeAttributes, TypeDef, TypeRef, COMPILER_GENERATED_ATTRIBUTE},
    },
};

/// A static `System.String` field on the outer type, present so bodies can
/// carry a resolvable static-field load the weaver must not touch.
pub(crate) const UNRELATED_FIELD: Token = Token(0x0400_0100);

/// Builds a compiler-synthesized closure cache type: marker attribute, one
/// singleton-storage field `<>9`, a constructor, and one instance method
/// holding the lambda body.
pub(crate) fn closure_cache(index: u32, declaring_full_name: &str) -> TypeDef {
    let mut ty = TypeDef::new(Token::new(0x0200_0100 + index), "", "<>c");
    ty.declaring = Some(TypeRef::new(
        Token::new(0x0200_0000 + index),
        declaring_full_name,
    ));
    ty.flags = TypeAttributes::NESTED_PRIVATE
        | TypeAttributes::SEALED
        | TypeAttributes::BEFORE_FIELD_INIT;
    ty.custom_attributes
        .push(CustomAttribute::new(COMPILER_GENERATED_ATTRIBUTE));

    let full_name = ty.full_name();
    let mut singleton = Field::new(Token::new(0x0400_0000 + index), "<>9", full_name);
    singleton.access = FieldAccessFlags::PUBLIC;
    singleton.modifiers |= FieldModifiers::STATIC | FieldModifiers::INIT_ONLY;
    ty.fields.push(singleton);

    let mut ctor = Method::new(Token::new(0x0600_0000 + index * 0x10), ".ctor");
    ctor.modifiers |= MethodModifiers::HIDE_BY_SIG
        | MethodModifiers::SPECIAL_NAME
        | MethodModifiers::RTSPECIAL_NAME;
    ty.methods.push(ctor);

    let mut invoke = Method::new(Token::new(0x0600_0000 + index * 0x10 + 1), "<Main>b__0_0");
    invoke.access = MethodAccessFlags::ASSEM;
    invoke.modifiers |= MethodModifiers::HIDE_BY_SIG;
    invoke.body = vec![
        Instruction::new(0, OpCode::LdcI4S, Operand::Immediate(42)),
        Instruction::new(2, OpCode::Ret, Operand::None),
    ];
    ty.methods.push(invoke);

    ty
}

/// Builds an outer type with one public static method and no body yet.
fn outer(index: u32, namespace: &str, name: &str, method_token: Token, method_name: &str) -> TypeDef {
    let mut ty = TypeDef::new(Token::new(0x0200_0000 + index), namespace, name);
    ty.flags = TypeAttributes::PUBLIC | TypeAttributes::BEFORE_FIELD_INIT;

    let mut method = Method::new(method_token, method_name);
    method.access = MethodAccessFlags::PUBLIC;
    method.modifiers |= MethodModifiers::STATIC | MethodModifiers::HIDE_BY_SIG;
    ty.methods.push(method);

    ty
}

/// The delegate-construction sequence a compiler emits around a singleton
/// load: load the cache instance, load the method pointer, construct the
/// delegate, hand it to a consumer, return.
fn call_site_body(singleton_field: Token, invoke_method: Token) -> Vec<Instruction> {
    vec![
        Instruction::new(0, OpCode::Ldsfld, Operand::Token(singleton_field)),
        Instruction::new(5, OpCode::Ldftn, Operand::Token(invoke_method)),
        Instruction::new(11, OpCode::Newobj, Operand::Token(Token::new(0x0A00_0001))),
        Instruction::new(16, OpCode::Call, Operand::Token(Token::new(0x0A00_0002))),
        Instruction::new(21, OpCode::Ret, Operand::None),
    ]
}

/// A module with one outer type `App.Program` whose `Main` constructs a
/// delegate over the nested closure cache's singleton.
pub(crate) fn module_with_call_site() -> Module {
    let mut module = Module::new("App.exe");

    let mut program = outer(1, "App", "Program", Token::new(0x0600_0001), "Main");
    // Cache index 1: singleton 0x04000001, invoke 0x06000011.
    program.methods[0].body = call_site_body(Token::new(0x0400_0001), Token::new(0x0600_0011));

    let mut unrelated = Field::new(UNRELATED_FIELD, "Greeting", "System.String");
    unrelated.modifiers |= FieldModifiers::STATIC;
    program.fields.push(unrelated);

    module.types.push(program);
    module.types.push(closure_cache(1, "App.Program"));
    module
}

/// Two outer types, each with its own nested closure cache and call site.
pub(crate) fn module_with_two_caches() -> Module {
    let mut module = Module::new("App.exe");

    let mut program = outer(1, "App", "Program", Token::new(0x0600_0001), "Main");
    program.methods[0].body = call_site_body(Token::new(0x0400_0001), Token::new(0x0600_0011));
    module.types.push(program);
    module.types.push(closure_cache(1, "App.Program"));

    let mut worker = outer(2, "App", "Worker", Token::new(0x0600_0002), "Run");
    worker.methods[0].body = call_site_body(Token::new(0x0400_0002), Token::new(0x0600_0021));
    module.types.push(worker);
    module.types.push(closure_cache(2, "App.Worker"));

    module
}

/// A module whose single outer method loads the same singleton `count` times.
pub(crate) fn module_with_repeated_loads(count: u64) -> Module {
    let mut module = Module::new("App.exe");

    let mut program = outer(1, "App", "Program", Token::new(0x0600_0001), "Main");
    let mut body = Vec::new();
    let mut offset = 0;
    for _ in 0..count {
        body.push(Instruction::new(
            offset,
            OpCode::Ldsfld,
            Operand::Token(Token::new(0x0400_0001)),
        ));
        body.push(Instruction::new(offset + 5, OpCode::Pop, Operand::None));
        offset += 6;
    }
    body.push(Instruction::new(offset, OpCode::Ret, Operand::None));
    program.methods[0].body = body;

    module.types.push(program);
    module.types.push(closure_cache(1, "App.Program"));
    module
}
