//! Metadata tokens for cross-references between metadata entities.

use std::fmt;

/// Table tag for `TypeDef` tokens (high byte).
pub const TABLE_TYPE_DEF: u8 = 0x02;
/// Table tag for `Field` tokens (high byte).
pub const TABLE_FIELD: u8 = 0x04;
/// Table tag for `MethodDef` tokens (high byte).
pub const TABLE_METHOD_DEF: u8 = 0x06;

/// A metadata token representing a reference to a metadata table entry.
///
/// Tokens consist of a 32-bit value where:
/// - The high byte (bits 24-31) indicates the table type
/// - The low 24 bits (bits 0-23) indicate the row index within that table
///
/// Instruction operands reference fields and methods by token rather than by
/// pointer, which keeps the decoded object graph plainly ownable. Tokens are
/// assigned by the external loader and never re-numbered by the engine.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Token(pub u32);

impl Token {
    /// Creates a new token from a raw 32-bit value
    #[must_use]
    pub fn new(value: u32) -> Self {
        Token(value)
    }

    /// Returns the raw token value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Extracts the table type from the token (high byte)
    #[must_use]
    pub fn table(&self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Extracts the row index from the token (low 24 bits)
    #[must_use]
    pub fn row(&self) -> u32 {
        self.0 & 0x00FF_FFFF
    }

    /// Returns true if this is a null token (value 0)
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for Token {
    fn from(value: u32) -> Self {
        Token(value)
    }
}

impl From<Token> for u32 {
    fn from(token: Token) -> Self {
        token.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Token(0x{:08x}, table: 0x{:02x}, row: {})",
            self.0,
            self.table(),
            self.row()
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_new() {
        let token = Token::new(0x06000001);
        assert_eq!(token.value(), 0x06000001);
    }

    #[test]
    fn test_token_table() {
        assert_eq!(Token(0x06000001).table(), TABLE_METHOD_DEF);
        assert_eq!(Token(0x02000005).table(), TABLE_TYPE_DEF);
        assert_eq!(Token(0x04000003).table(), TABLE_FIELD);
        assert_eq!(Token(0x00000000).table(), 0x00);
    }

    #[test]
    fn test_token_row() {
        assert_eq!(Token(0x06000001).row(), 1);
        assert_eq!(Token(0x02000005).row(), 5);
        assert_eq!(Token(0x06FFFFFF).row(), 0x00FF_FFFF);
    }

    #[test]
    fn test_token_is_null() {
        assert!(Token(0).is_null());
        assert!(!Token(0x02000001).is_null());
    }

    #[test]
    fn test_token_display() {
        assert_eq!(format!("{}", Token(0x04000002)), "0x04000002");
    }
}
