use crate::scanner::Scanner;

#[test]
fn test_extremes() {
    let mut s = Scanner::new("just a test buffer@".chars());
    assert_eq!(s.curr(), None);
    assert_eq!(s.next(), Some('j'));
    while s.next() != Some('@') {}
    assert_eq!(s.curr(), Some('@'));
    assert!(s.set_pos(s.pos() - 2));
    assert_eq!(s.curr(), Some('e'));
    assert_eq!(s.next(), Some('r'));
    assert_eq!(s.next(), Some('@'));
    assert_eq!(s.next(), None);
    assert_eq!(s.next(), None);
    assert!(!s.set_pos(-2));
}

#[test]
fn test_extract() {
    let mut s = Scanner::new("just a test buffer@".chars());
    for _ in 0..4 { assert!(s.next().is_some()); }
    assert_eq!(s.extract_string(), "just");
    assert_eq!(s.pos(), -1);
    assert_eq!(s.peek(), Some(' '));
    assert_eq!(s.next(), Some(' '));
    for _ in 0..6 { assert!(s.next().is_some()); }
    assert_eq!(s.pending(), 7);
    assert_eq!(s.extract_string(), " a test");
    assert_eq!(s.next(), Some(' '));
    s.ignore();
    assert_eq!(s.pending(), 0);
    assert_eq!(s.next(), Some('b'));
}

#[test]
fn test_accept() {
    let mut s = Scanner::new("heey  you!".chars());
    assert_eq!(s.accept_any(&['h', 'e']), Some('h'));
    assert_eq!(s.curr(), Some('h'));
    assert_eq!(s.accept_any(&['h', 'e']), Some('e'));
    assert_eq!(s.accept_any(&['h', 'y', 'e']), Some('e'));
    assert_eq!(s.accept(&'e'), None);
    assert_eq!(s.accept_any(&['h', 'e', 'y']), Some('y'));
    assert!(Scanner::skip_while(&mut s, |c| c.is_whitespace()));
    assert!(!Scanner::skip_while(&mut s, |c| c.is_whitespace()));
    assert_eq!(s.curr(), Some(' '));
    assert_eq!(s.peek(), Some('y'));
}

#[test]
fn test_accept_seq() {
    let mut s = Scanner::new("-Inferno".chars());
    let infinity: Vec<char> = "-Infinity".chars().collect();
    assert!(!s.accept_seq(&infinity));
    assert_eq!(s.pos(), -1);
    let inf: Vec<char> = "-Inf".chars().collect();
    assert!(s.accept_seq(&inf));
    assert_eq!(s.extract_string(), "-Inf");
}

#[test]
fn test_skips() {
    let mut s = Scanner::new("heey  you!".chars());
    assert_eq!(s.accept(&'h'), Some('h'));
    assert!(s.skip_all(&['h', 'e', 'y']));
    assert!(!s.skip_all(&['h', 'e', 'y']));
    assert_eq!(s.curr(), Some('y'));
    assert!(Scanner::skip_while(&mut s, |c| *c != '!'));
    assert!(!Scanner::skip_while(&mut s, |c| *c != '!'));
    assert_eq!(s.accept(&'!'), Some('!'));
    assert_eq!(s.next(), None);
    assert_eq!(s.curr(), None);
}
