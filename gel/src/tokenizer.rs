use crate::error::{Error, Result};
use crate::registry::Registry;
use crate::token::{Token, TokenKind};

use lexers::{Quoted, Scanner};
use std::rc::Rc;
use tracing::trace;

/// Tries to claim a token at the start of the given text.
pub type Recognizer = Rc<dyn Fn(&str) -> Result<Option<Token>>>;

/// Maps an identifier token to a keyword token, if it is one.
pub type KeywordRecognizer = Rc<dyn Fn(&Token) -> Option<Token>>;

pub type Defaults<T> = Rc<Vec<(String, T)>>;

/// Recognizer tiers, tried in field order for every token.
#[derive(Clone)]
pub struct Categories {
    pub nests: Registry<Recognizer>,
    pub primitives: Registry<Recognizer>,
    pub identifiers: Registry<Recognizer>,
}

impl Categories {
    pub fn new(nests: Defaults<Recognizer>, primitives: Defaults<Recognizer>,
               identifiers: Defaults<Recognizer>) -> Categories {
        Categories{
            nests: Registry::new(nests),
            primitives: Registry::new(primitives),
            identifiers: Registry::new(identifiers),
        }
    }
}

fn named(entries: Vec<(&str, Recognizer)>) -> Defaults<Recognizer> {
    Rc::new(entries.into_iter().map(|(n, r)| (n.to_string(), r)).collect())
}

pub fn default_nests() -> Defaults<Recognizer> {
    named(vec![
        ("parentheses", Rc::new(parentheses) as Recognizer),
        ("function", Rc::new(function) as Recognizer),
        ("period", Rc::new(period) as Recognizer),
    ])
}

pub fn default_primitives() -> Defaults<Recognizer> {
    named(vec![
        ("delimiter", Rc::new(delimiter) as Recognizer),
        ("string", Rc::new(double_quoted) as Recognizer),
        ("singleQuoteString", Rc::new(single_quoted) as Recognizer),
        ("number", Rc::new(number) as Recognizer),
    ])
}

pub fn default_identifiers() -> Defaults<Recognizer> {
    named(vec![("identifier", Rc::new(identifier) as Recognizer)])
}

pub fn default_keywords() -> Defaults<KeywordRecognizer> {
    let keywords: Vec<(&str, KeywordRecognizer)> = vec![
        ("boolean", Rc::new(boolean) as KeywordRecognizer),
        ("null", keyword("null", TokenKind::Null)),
        ("undefined", keyword("undefined", TokenKind::Undefined)),
    ];
    Rc::new(keywords.into_iter().map(|(n, k)| (n.to_string(), k)).collect())
}

/// A keyword recognizer for one exact word.
pub fn keyword(word: &str, kind: TokenKind) -> KeywordRecognizer {
    let word = word.to_string();
    Rc::new(move |token: &Token| {
        (token.original == word).then(|| token.reclassify(kind.clone()))
    })
}

fn boolean(token: &Token) -> Option<Token> {
    match token.original.as_str() {
        "true" => Some(token.reclassify(TokenKind::Boolean(true))),
        "false" => Some(token.reclassify(TokenKind::Boolean(false))),
        _ => None,
    }
}

fn single(text: &str, table: &[(char, TokenKind)]) -> Option<Token> {
    let first = text.chars().next()?;
    table.iter()
        .find(|(c, _)| *c == first)
        .map(|(c, kind)| Token::new(kind.clone(), c.to_string(), 1))
}

fn parentheses(text: &str) -> Result<Option<Token>> {
    Ok(single(text, &[('(', TokenKind::OpenParen), (')', TokenKind::CloseParen)]))
}

fn function(text: &str) -> Result<Option<Token>> {
    Ok(single(text, &[('{', TokenKind::OpenBrace), ('}', TokenKind::CloseBrace)]))
}

fn period(text: &str) -> Result<Option<Token>> {
    Ok(single(text, &[('.', TokenKind::Period)]))
}

fn delimiter(text: &str) -> Result<Option<Token>> {
    Ok(Scanner::new(text.chars()).scan_delimiter()
        .map(|d| Token::exact(TokenKind::Delimiter, &d)))
}

fn quoted(text: &str, quote: char) -> Result<Option<Token>> {
    match Scanner::new(text.chars()).scan_quoted_string(quote) {
        None => Ok(None),
        Some(Quoted{terminated: false, ..}) => Err(Error::UnclosedString{quote, offset: 0}),
        Some(Quoted{text, consumed, ..}) => {
            let mut content = text.chars();
            content.next();
            content.next_back();
            let content = content.as_str().to_string();
            Ok(Some(Token::new(TokenKind::String(content), text, consumed)))
        }
    }
}

fn double_quoted(text: &str) -> Result<Option<Token>> {
    quoted(text, '"')
}

fn single_quoted(text: &str) -> Result<Option<Token>> {
    quoted(text, '\'')
}

fn number(text: &str) -> Result<Option<Token>> {
    let mut s = Scanner::new(text.chars());
    if let Some(special) = s.scan_special_number() {
        let n = match special.as_str() {
            "Infinity" => f64::INFINITY,
            "-Infinity" => f64::NEG_INFINITY,
            _ => f64::NAN,
        };
        return Ok(Some(Token::exact(TokenKind::Number(n), &special)));
    }
    Ok(s.scan_number().and_then(|run| {
        run.parse::<f64>().ok().map(|n| Token::exact(TokenKind::Number(n), &run))
    }))
}

fn identifier(text: &str) -> Result<Option<Token>> {
    let mut s = Scanner::new(text.chars());
    Ok(s.scan_operator()
        .or_else(|| s.scan_identifier())
        .map(|id| Token::exact(TokenKind::Identifier, &id)))
}

fn recognize(tier: &Registry<Recognizer>, text: &str) -> Result<Option<Token>> {
    for (name, recognizer) in tier.iter() {
        if let Some(token) = recognizer(text)? {
            trace!(recognizer = name, original = %token.original, "recognized");
            return Ok(Some(token));
        }
    }
    Ok(None)
}

/// Splits text into tokens. Tiers are tried in order and identifiers get a
/// chance to become keywords.
pub fn tokenize(text: &str, categories: &Categories,
                keywords: &Registry<KeywordRecognizer>) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut rest = text;
    let mut offset = 0;
    while !rest.is_empty() {
        let found = recognize(&categories.nests, rest)
            .and_then(|t| match t {
                Some(t) => Ok(Some(t)),
                None => recognize(&categories.primitives, rest),
            })
            .and_then(|t| match t {
                Some(t) => Ok(Some(t)),
                None => Ok(recognize(&categories.identifiers, rest)?.map(|t| {
                    keywords.iter().find_map(|(_, k)| k(&t)).unwrap_or(t)
                })),
            })
            .map_err(|err| match err {
                Error::UnclosedString{quote, ..} => Error::UnclosedString{quote, offset},
                err => err,
            })?;

        let mut token = match found {
            Some(token) if token.length > 0 => token,
            _ => return Err(Error::UnparseableToken{offset, remainder: rest.to_string()}),
        };
        token.offset = offset;
        let cut = rest.char_indices().nth(token.length).map_or(rest.len(), |(i, _)| i);
        rest = &rest[cut..];
        offset += token.length;
        tokens.push(token);
    }
    Ok(tokens)
}

///////////////////////////////////////////////////////////////////////////////
