use crate::error::Error;
use crate::eval::DEFAULT_MAX_DEPTH;
use crate::parser::{parse, parse_with_depth, Node, NodeKind};
use crate::session::Session;

use pretty_assertions::assert_eq;
use std::rc::Rc;

fn parse_str(text: &str) -> Result<Vec<Rc<Node>>, Error> {
    let session = Session::new();
    parse(&session.tokenize(text)?)
}

fn printed(text: &str) -> Vec<String> {
    parse_str(text).unwrap().iter().map(|n| n.to_string()).collect()
}

fn children(node: &Node) -> &[Rc<Node>] {
    match &node.kind {
        NodeKind::Call(children) | NodeKind::Function(children) => children,
        other => panic!("no children in {:?}", other),
    }
}

#[test]
fn test_call() {
    let nodes = parse_str("(+ 1 (f x 'y'))").unwrap();
    assert_eq!(nodes.len(), 1);
    let call = children(&nodes[0]);
    assert_eq!(call.len(), 3);
    assert_eq!(call[0].kind, NodeKind::Identifier);
    assert_eq!(call[0].original, "+");
    assert_eq!(call[1].kind, NodeKind::Number(1.0));
    let inner = children(&call[2]);
    assert_eq!(inner[2].kind, NodeKind::String(format!("y")));
    assert_eq!(inner[2].offset, 10);
}

#[test]
fn test_delimiters_dropped() {
    assert_eq!(printed("(  +  1,2\n)"), vec![format!("(+ 1 2)")]);
    assert_eq!(printed(" 1 , 'a' true "), vec![format!("1"), format!("'a'"), format!("true")]);
    assert_eq!(parse_str("").unwrap(), Vec::new());
    assert_eq!(parse_str(" ,, ").unwrap(), Vec::new());
}

#[test]
fn test_nesting() {
    assert_eq!(printed("((a) ((b) c))"), vec![format!("((a) ((b) c))")]);
    assert_eq!(printed("({x (f {y y})})"), vec![format!("({{x (f {{y y}})}})")]);
    let nodes = parse_str("{x y (+ x y)}").unwrap();
    assert!(matches!(nodes[0].kind, NodeKind::Function(_)));
    assert_eq!(children(&nodes[0]).len(), 3);
}

#[test]
fn test_keywords() {
    let nodes = parse_str("true false null undefined").unwrap();
    let kinds: Vec<_> = nodes.iter().map(|n| n.kind.clone()).collect();
    assert_eq!(kinds, vec![
        NodeKind::Boolean(true), NodeKind::Boolean(false), NodeKind::Null, NodeKind::Undefined,
    ]);
}

#[test]
fn test_member_access() {
    let nodes = parse_str("a.b.c").unwrap();
    assert_eq!(nodes.len(), 1);
    match &nodes[0].kind {
        NodeKind::Member{target, identifier} => {
            assert_eq!(identifier.original, "c");
            assert_eq!(target.to_string(), "a.b");
            assert!(matches!(target.kind, NodeKind::Member{..}));
        },
        other => panic!("not a member access {:?}", other),
    }
    assert_eq!(printed("(f x).y z"), vec![format!("(f x).y"), format!("z")]);
    assert_eq!(printed("(g a.0)"), vec![format!("(g a.0)")]);
}

#[test]
fn test_bad_nesting() {
    let bad = |text: &str, token: &str, offset: usize| {
        assert_eq!(parse_str(text), Err(Error::BadNesting{token: token.to_string(), offset}),
                   "{}", text);
    };
    bad("(+ 1", "(", 0);
    bad(")", ")", 0);
    bad("(a))", ")", 3);
    bad("{a", "{", 0);
    bad("(a}", "}", 2);
    bad("(a {)}", "{", 3);
    bad("}", "}", 0);
    bad(".a", ".", 0);
    bad("a.", ".", 1);
    bad("a.(b)", "(", 2);
}

#[test]
fn test_deep_nesting() {
    let deep = format!("{}1{}", "(".repeat(5000), ")".repeat(5000));
    assert_eq!(parse_str(&deep), Err(Error::TooDeep(DEFAULT_MAX_DEPTH)));
    assert_eq!(Session::new().evaluate(&deep), Err(Error::TooDeep(DEFAULT_MAX_DEPTH)));
    let chain = format!("a{}", ".b".repeat(5000));
    assert_eq!(parse_str(&chain), Err(Error::TooDeep(DEFAULT_MAX_DEPTH)));
    // unclosed runs report the outermost opener
    assert_eq!(parse_str(&"(".repeat(5000)),
               Err(Error::BadNesting{token: format!("("), offset: 0}));
    assert_eq!(parse_str(&")".repeat(5000)),
               Err(Error::BadNesting{token: format!(")"), offset: 0}));

    let nested = format!("{}1{}", "(".repeat(200), ")".repeat(200));
    assert_eq!(parse_str(&nested).map(|nodes| nodes.len()), Ok(1));
    let tokens = Session::new().tokenize("(a (b (c)))").unwrap();
    assert_eq!(parse_with_depth(&tokens, 4).map(|nodes| nodes.len()), Ok(1));
    assert_eq!(parse_with_depth(&tokens, 3), Err(Error::TooDeep(3)));
}
