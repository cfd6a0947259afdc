use crate::value::Value;

#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    OpenParen,
    CloseParen,
    OpenBrace,
    CloseBrace,
    Period,
    Delimiter,
    String(String),
    Number(f64),
    Identifier,
    Boolean(bool),
    Null,
    Undefined,
    /// Host defined keywords carry the value they stand for.
    Keyword(Value),
}

/// A lexical unit. `length` counts source characters, so it is larger
/// than `original` when escaped quotes were collapsed.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub original: String,
    pub length: usize,
    pub offset: usize,
}

impl Token {
    pub fn new(kind: TokenKind, original: impl Into<String>, length: usize) -> Token {
        Token{kind, original: original.into(), length, offset: 0}
    }

    /// A token whose source text is exactly `original`.
    pub fn exact(kind: TokenKind, original: &str) -> Token {
        Token::new(kind, original, original.chars().count())
    }

    /// Same text and position, different category.
    pub fn reclassify(&self, kind: TokenKind) -> Token {
        Token{kind, ..self.clone()}
    }

    pub fn is_structural(&self) -> bool {
        matches!(self.kind, TokenKind::OpenParen | TokenKind::CloseParen
                 | TokenKind::OpenBrace | TokenKind::CloseBrace | TokenKind::Period)
    }
}
