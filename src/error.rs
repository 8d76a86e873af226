use thiserror::Error;

use crate::metadata::token::Token;

/// The generic Error type, which provides coverage for all errors this library can
/// potentially return.
///
/// The weaving pass itself has no recoverable-error taxonomy: classification is a
/// pure predicate, member conversion is unconditional, and a call-site scan that
/// finds no match simply terminates. The variants below therefore all describe
/// precondition violations of the external loader - an object graph that refers
/// to entities which do not exist. Such inconsistency surfaces as an error
/// propagated to the caller rather than being silently swallowed.
///
/// # Examples
///
/// ```rust
/// use cilweave::{Error, prelude::*};
///
/// let mut module = Module::new("App.exe");
/// match Weaver::default().run(&mut module, WeaveObservers::default()) {
///     Ok(()) => println!("pass complete"),
///     Err(Error::DanglingToken { token, context }) => {
///         eprintln!("loader handed us an inconsistent graph: {token} in {context}");
///     }
///     Err(e) => eprintln!("other error: {e}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// An instruction operand references a metadata token that does not resolve
    /// to any entity in the module.
    ///
    /// The engine does not validate container-level structural correctness, but
    /// when a rewrite step must resolve an operand and the token dangles, the
    /// graph the loader supplied is inconsistent and the pass cannot continue.
    #[error("Token {token} does not resolve to any entity in this module ({context})")]
    DanglingToken {
        /// The token that failed to resolve.
        token: Token,
        /// Where resolution was attempted, for diagnostics.
        context: String,
    },

    /// An instruction carries an operand of a different shape than its opcode
    /// requires, e.g. a `ldsfld` without a field token.
    #[error("Instruction at IL_{offset:04x} has a malformed operand for {mnemonic}")]
    MalformedOperand {
        /// Byte offset of the instruction within its method body.
        offset: u64,
        /// Mnemonic of the offending instruction.
        mnemonic: &'static str,
    },
}

/// Specialized `Result` type used throughout this crate.
pub type Result<T> = std::result::Result<T, Error>;
