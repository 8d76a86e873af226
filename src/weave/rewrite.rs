//! Call-site rewriting: singleton-field loads become null loads.
//!
//! The only prior use of a cache type's singleton field was to obtain an
//! instance to bind as the delegate target of a closure. Once the target
//! method is per-type bound, a delegate over it legally takes a null target,
//! so every `ldsfld` whose field's value type is an eligible cache type is
//! replaced in place by `ldnull` at the same offset.
//!
//! The scan scope is the lexical container of each eligible type - the
//! declaring type that originally held the closure and therefore holds the
//! code referencing the singleton. Each body is scanned once, all match
//! positions are collected, then all of them are replaced; replacements never
//! change the sequence length, so a single forward pass is equivalent to
//! rescanning after every substitution. Methods with no occurrence are left
//! byte-for-byte identical, and no instruction count or offset ever changes.

use crate::{
    assembly::{Instruction, OpCode},
    metadata::{
        module::Module,
        token::{Token, TABLE_FIELD},
    },
    weave::{classify::CandidateSet, observer::WeaveObservers},
    Error, Result,
};

/// One instruction to be replaced, located while the module was borrowed
/// immutably.
struct MatchSite {
    method_idx: usize,
    instr_idx: usize,
    offset: u64,
    method_full_name: String,
}

/// Rewrites all call sites of the candidate set across the module.
///
/// Returns the number of instructions replaced. Eligible types without a
/// declaring type have no lexical container to scan and contribute nothing;
/// eligible types sharing one declaring type are scanned through it once.
///
/// # Errors
///
/// Returns [`Error::DanglingToken`] when a candidate token, a declaring-type
/// token, or a Field-table `ldsfld` operand does not resolve in the module,
/// and [`Error::MalformedOperand`] when a `ldsfld` carries no token operand.
/// Both are precondition violations of the external loader.
pub fn apply(
    module: &mut Module,
    candidates: &CandidateSet,
    observers: &mut WeaveObservers,
) -> Result<usize> {
    let mut scopes: Vec<Token> = Vec::new();
    for &token in candidates.tokens() {
        let ty = module
            .type_by_token(token)
            .ok_or_else(|| Error::DanglingToken {
                token,
                context: "eligible type".to_string(),
            })?;
        if let Some(declaring) = &ty.declaring {
            if !scopes.contains(&declaring.token) {
                scopes.push(declaring.token);
            }
        }
    }

    let mut replaced = 0;
    for scope in scopes {
        let sites = collect_sites(module, scope, candidates)?;

        // The scope resolved during collection; the set of types is fixed for
        // the whole pass, so it still does.
        let Some(ty) = module.type_by_token_mut(scope) else {
            continue;
        };
        for site in sites {
            let instruction = &mut ty.methods[site.method_idx].body[site.instr_idx];
            let before = instruction.mnemonic();
            *instruction = Instruction::ldnull(site.offset);

            observers.debug(|| {
                format!(
                    "Replaced {} IL_{:04x}'s {} with {}.",
                    site.method_full_name,
                    site.offset,
                    before,
                    OpCode::Ldnull.mnemonic()
                )
            });
            replaced += 1;
        }
    }

    Ok(replaced)
}

/// Scans every body of one declaring type and collects the positions of all
/// `ldsfld` instructions loading a field whose value type is eligible.
///
/// Operand tokens outside the Field table (member references into other
/// modules, for instance) are skipped: eligible types are module-local, so a
/// foreign field can never be singleton storage of one.
fn collect_sites(
    module: &Module,
    scope: Token,
    candidates: &CandidateSet,
) -> Result<Vec<MatchSite>> {
    let ty = module
        .type_by_token(scope)
        .ok_or_else(|| Error::DanglingToken {
            token: scope,
            context: "declaring type of an eligible type".to_string(),
        })?;
    let scope_name = ty.full_name();

    let mut sites = Vec::new();
    for (method_idx, method) in ty.methods.iter().enumerate() {
        for (instr_idx, instruction) in method.body.iter().enumerate() {
            if instruction.opcode != OpCode::Ldsfld {
                continue;
            }

            let token = instruction
                .token_operand()
                .ok_or(Error::MalformedOperand {
                    offset: instruction.offset,
                    mnemonic: instruction.mnemonic(),
                })?;
            if token.table() != TABLE_FIELD {
                continue;
            }

            let (_, field) = module.field(token).ok_or_else(|| Error::DanglingToken {
                token,
                context: format!("ldsfld operand in {}::{}", scope_name, method.name),
            })?;

            if candidates.contains_name(&field.field_type) {
                sites.push(MatchSite {
                    method_idx,
                    instr_idx,
                    offset: instruction.offset,
                    method_full_name: format!("{}::{}", scope_name, method.name),
                });
            }
        }
    }

    Ok(sites)
}
