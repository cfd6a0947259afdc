use crate::error::{Error, Result};
use crate::eval::DEFAULT_MAX_DEPTH;
use crate::token::{Token, TokenKind};
use crate::value::Value;

use std::fmt;
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    /// `(callee args...)`
    Call(Vec<Rc<Node>>),
    /// `{params... body}`
    Function(Vec<Rc<Node>>),
    /// `target.identifier`
    Member { target: Rc<Node>, identifier: Rc<Node> },
    String(String),
    Number(f64),
    Identifier,
    Boolean(bool),
    Null,
    Undefined,
    Keyword(Value),
}

/// A parsed expression tree. Trees are never mutated after parsing so a
/// memoized tree can be shared by any number of evaluations.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub original: String,
    pub offset: usize,
}

impl Node {
    fn new(kind: NodeKind, token: &Token) -> Node {
        Node{kind, original: token.original.clone(), offset: token.offset}
    }
}

// prints back an equivalent source text, delimiters normalized
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let join = |children: &[Rc<Node>]| children.iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        match &self.kind {
            NodeKind::Call(children) => write!(f, "({})", join(children)),
            NodeKind::Function(children) => write!(f, "{{{}}}", join(children)),
            NodeKind::Member{target, identifier} => write!(f, "{}.{}", target, identifier),
            _ => write!(f, "{}", self.original),
        }
    }
}

fn bad_nesting(token: &Token) -> Error {
    Error::BadNesting{token: token.original.clone(), offset: token.offset}
}

fn leaf(token: &Token) -> Option<Node> {
    let kind = match &token.kind {
        TokenKind::String(s) => NodeKind::String(s.clone()),
        TokenKind::Number(n) => NodeKind::Number(*n),
        TokenKind::Identifier => NodeKind::Identifier,
        TokenKind::Boolean(b) => NodeKind::Boolean(*b),
        TokenKind::Null => NodeKind::Null,
        TokenKind::Undefined => NodeKind::Undefined,
        TokenKind::Keyword(v) => NodeKind::Keyword(v.clone()),
        _ => return None,
    };
    Some(Node::new(kind, token))
}

fn closes(opener: &Token, closer: &Token) -> bool {
    matches!((&opener.kind, &closer.kind),
             (TokenKind::OpenParen, TokenKind::CloseParen)
             | (TokenKind::OpenBrace, TokenKind::CloseBrace))
}

// an open bracket and the nodes reduced inside it so far, with their heights
struct Frame<'t> {
    opener: Option<&'t Token>,
    nodes: Vec<(Rc<Node>, usize)>,
}

impl<'t> Frame<'t> {
    fn new(opener: Option<&'t Token>) -> Frame<'t> {
        Frame{opener, nodes: Vec::new()}
    }

    fn push(&mut self, node: Node, height: usize, max_depth: usize) -> Result<()> {
        if height > max_depth {
            return Err(Error::TooDeep(max_depth));
        }
        self.nodes.push((Rc::new(node), height));
        Ok(())
    }
}

/// Reduces a flat token sequence into top level nodes, trees may be at
/// most `DEFAULT_MAX_DEPTH` nodes tall.
pub fn parse(tokens: &[Token]) -> Result<Vec<Rc<Node>>> {
    parse_with_depth(tokens, DEFAULT_MAX_DEPTH)
}

/// Single pass over the tokens keeping a stack of open brackets. Trees
/// taller than `max_depth` fail with `TooDeep`.
pub fn parse_with_depth(tokens: &[Token], max_depth: usize) -> Result<Vec<Rc<Node>>> {
    let mut outer: Vec<Frame> = Vec::new();
    let mut current = Frame::new(None);
    let mut idx = 0;
    while idx < tokens.len() {
        let token = &tokens[idx];
        match token.kind {
            TokenKind::Delimiter => (),
            TokenKind::OpenParen | TokenKind::OpenBrace => {
                outer.push(std::mem::replace(&mut current, Frame::new(Some(token))));
            },
            TokenKind::CloseParen | TokenKind::CloseBrace => {
                let opener = match current.opener {
                    Some(opener) if closes(opener, token) => opener,
                    // something opened further out is left unclosed
                    Some(opener) if outer.iter().filter_map(|f| f.opener)
                        .any(|o| closes(o, token)) => return Err(bad_nesting(opener)),
                    _ => return Err(bad_nesting(token)),
                };
                let parent = outer.pop().ok_or_else(|| bad_nesting(token))?;
                let frame = std::mem::replace(&mut current, parent);
                let height = 1 + frame.nodes.iter().map(|(_, h)| *h).max().unwrap_or(0);
                let children = frame.nodes.into_iter().map(|(node, _)| node).collect();
                let kind = match opener.kind {
                    TokenKind::OpenParen => NodeKind::Call(children),
                    _ => NodeKind::Function(children),
                };
                current.push(Node::new(kind, opener), height, max_depth)?;
            },
            TokenKind::Period => {
                let (target, height) = current.nodes.pop().ok_or_else(|| bad_nesting(token))?;
                let name = tokens.get(idx + 1).ok_or_else(|| bad_nesting(token))?;
                if name.is_structural() {
                    return Err(bad_nesting(name));
                }
                let identifier = Rc::new(Node::new(NodeKind::Identifier, name));
                current.push(Node::new(NodeKind::Member{target, identifier}, token),
                             height + 1, max_depth)?;
                idx += 1;
            },
            _ => match leaf(token) {
                Some(node) => current.push(node, 1, max_depth)?,
                None => return Err(bad_nesting(token)),
            },
        }
        idx += 1;
    }
    // report the outermost bracket left open
    if let Some(opener) = outer.iter().filter_map(|f| f.opener).chain(current.opener).next() {
        return Err(bad_nesting(opener));
    }
    Ok(current.nodes.into_iter().map(|(node, _)| node).collect())
}
