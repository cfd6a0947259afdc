use crate::session::Session;
use crate::token::{Token, TokenKind};
use crate::value::Value;

use proptest::prelude::*;

fn atom() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z][a-z0-9]{0,5}",
        "[0-9]{1,4}(\\.[0-9]{1,2})?",
        "[a-z ']{0,6}".prop_map(|s| format!("'{}'", s.replace('\'', "\\'"))),
        "[+*/<>=!&|?-]{1,3}",
    ]
}

fn expression() -> impl Strategy<Value = String> {
    atom().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(|xs| format!("({})", xs.join(" "))),
            prop::collection::vec(inner, 0..6).prop_map(|xs| format!("{{{}}}", xs.join(", "))),
        ]
    })
}

// string tokens keep the collapsed quote, put the escape back
fn source_of(token: &Token) -> String {
    match &token.kind {
        TokenKind::String(content) => {
            let quote = token.original.chars().next().unwrap_or('\'');
            let escaped = content.replace(quote, &format!("\\{}", quote));
            format!("{}{}{}", quote, escaped, quote)
        },
        _ => token.original.clone(),
    }
}

proptest! {
    #[test]
    fn tokens_rebuild_source(text in expression()) {
        let tokens = Session::new().tokenize(&text).unwrap();
        let rebuilt: String = tokens.iter().map(source_of).collect();
        prop_assert_eq!(rebuilt, text);
    }

    #[test]
    fn offsets_are_contiguous(text in expression()) {
        let tokens = Session::new().tokenize(&text).unwrap();
        let mut offset = 0;
        for token in tokens.iter() {
            prop_assert_eq!(token.offset, offset);
            offset += token.length;
        }
        prop_assert_eq!(offset, text.chars().count());
    }

    #[test]
    fn well_nested_text_parses(text in expression()) {
        let session = Session::new();
        let tokens = session.tokenize(&text).unwrap();
        prop_assert_eq!(session.parse(&tokens).map(|nodes| nodes.len()), Ok(1));
    }

    #[test]
    fn tokenizing_is_idempotent(text in "\\PC{0,24}") {
        let session = Session::new();
        let first = format!("{:?}", session.tokenize(&text));
        let second = format!("{:?}", session.tokenize(&text));
        let fresh = format!("{:?}", Session::new().tokenize(&text));
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(&first, &fresh);
    }

    #[test]
    fn addition_matches_host(a in -10000i32..10000, b in -10000i32..10000) {
        let text = format!("(+ {} {})", a, b);
        prop_assert_eq!(Session::new().evaluate(&text), Ok(Value::from(a + b)));
    }
}
