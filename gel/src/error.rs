use thiserror::Error;

/// Everything that can abort an evaluation.
///
/// Reading an unbound identifier is deliberately not here: it yields
/// `undefined`. Only a callee position reports `UnknownFunction`.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
    #[error("unable to determine next token at character {offset}: {remainder}")]
    UnparseableToken { offset: usize, remainder: String },

    #[error("invalid nesting: unmatched '{token}' at character {offset}")]
    BadNesting { token: String, offset: usize },

    #[error("unclosed {quote} string starting at character {offset}")]
    UnclosedString { quote: char, offset: usize },

    #[error("incorrect number of arguments: {callee} ran out after {supplied}")]
    Arity { callee: String, supplied: usize },

    #[error("function is undefined in given expression: {0}")]
    UnknownFunction(String),

    #[error("{0} is not a function")]
    NotCallable(String),

    #[error("type error: {0}")]
    Type(String),

    #[error("invalid JSON: {0}")]
    Json(String),

    #[error("expression nested deeper than {0} levels")]
    TooDeep(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
