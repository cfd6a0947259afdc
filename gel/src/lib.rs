//! Gel, a small prefix-notation expression language meant to be embedded.
//!
//! ```
//! let session = gel::Session::new();
//! assert_eq!(session.evaluate("(+ 1 2)").unwrap(), gel::Value::from(3));
//! ```

mod args;
mod builtin;
mod error;
mod eval;
mod parser;
mod procedure;
mod registry;
mod scope;
mod session;
mod stats;
mod token;
mod tokenizer;
mod value;

pub use args::{Arg, Args};
pub use builtin::builtins;
pub use error::{Error, Result};
pub use eval::{call_with, Evaluator, DEFAULT_MAX_DEPTH};
pub use parser::{parse, parse_with_depth, Node, NodeKind};
pub use procedure::{NativeFn, Procedure};
pub use registry::Registry;
pub use scope::Scope;
pub use session::{Bindings, Defaults, Evaluated, Session};
pub use stats::{ExprStats, Stats};
pub use token::{Token, TokenKind};
pub use tokenizer::{keyword, tokenize, Categories, KeywordRecognizer, Recognizer};
pub use value::{Object, Value};

#[cfg(test)]
mod parser_test;
#[cfg(test)]
mod eval_test;
#[cfg(test)]
mod properties_test;
