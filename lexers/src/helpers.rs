#![deny(warnings)]

use crate::scanner::Scanner;

static NUMERIC: &[char] = &[
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', '-', '.', 'E', 'e', 'x'];
static OPERATORS: &[char] = &[
    '!', '=', '<', '>', '/', '&', '|', '*', '%', '-', '^', '?', '+', '\\'];

/// Special numeric literals, tried as prefixes before any numeric run.
pub static SPECIAL_NUMBERS: &[&str] = &["NaN", "-NaN", "Infinity", "-Infinity"];

/// A quoted string as found in the source.
#[derive(Clone, Debug, PartialEq)]
pub struct Quoted {
    /// Text including both terminals, escaped terminals collapsed.
    pub text: String,
    /// Characters consumed from the source, escapes included.
    pub consumed: usize,
    /// False when the source ended before the closing terminal.
    pub terminated: bool,
}

fn is_identifier_start(c: &char) -> bool {
    c.is_ascii_alphabetic() || *c == '_' || *c == '$'
}

fn is_identifier_char(c: &char) -> bool {
    c.is_ascii_alphanumeric() || *c == '_' || *c == '$'
}

/*
 * The caller of these functions is expected to setup the scanner for a
 * clear start, ie: call scanner.ignore() to start fresh
 */
impl<I: Iterator<Item=char>> Scanner<I> {
    pub fn extract_string(&mut self) -> String {
        self.extract().into_iter().collect()
    }

    // a run of whitespace and commas
    pub fn scan_delimiter(&mut self) -> Option<String> {
        if self.skip_while(|c| c.is_whitespace() || *c == ',') {
            return Some(self.extract_string());
        }
        None
    }

    // scan a quoted string like "this is \"an\" example", only an escaped
    // terminal is special, any other backslash is kept as is
    pub fn scan_quoted_string(&mut self, q: char) -> Option<Quoted> {
        self.accept(&q)?;
        let mut text = String::from(q);
        let mut consumed = 1;
        while let Some(n) = self.next() {
            consumed += 1;
            if n == '\\' && self.accept(&q).is_some() {
                consumed += 1;
                text.push(q);
                continue;
            }
            text.push(n);
            if n == q {
                self.ignore();
                return Some(Quoted{text, consumed, terminated: true});
            }
        }
        self.ignore();
        Some(Quoted{text, consumed, terminated: false})
    }

    // scan one of the SPECIAL_NUMBERS, longest candidates first
    pub fn scan_special_number(&mut self) -> Option<String> {
        let mut specials = SPECIAL_NUMBERS.to_vec();
        specials.sort_by_key(|s| std::cmp::Reverse(s.len()));
        for special in specials {
            let seq: Vec<char> = special.chars().collect();
            if self.accept_seq(&seq) {
                return Some(self.extract_string());
            }
        }
        None
    }

    // scan a maximal run over [0-9.eEx-], accepted only if the whole run is
    // a valid f64 for rust's parser
    pub fn scan_number(&mut self) -> Option<String> {
        let backtrack = self.pos();
        if !self.skip_all(NUMERIC) {
            return None;
        }
        let run: String = self.view().iter().collect();
        if run.parse::<f64>().is_err() {
            self.set_pos(backtrack);
            return None;
        }
        Some(self.extract_string())
    }

    // a maximal run of operator symbols so that '>=' or '!==' stay whole
    pub fn scan_operator(&mut self) -> Option<String> {
        if self.skip_all(OPERATORS) {
            return Some(self.extract_string());
        }
        None
    }

    // scan [$a-zA-Z_][$a-zA-Z0-9_]*
    pub fn scan_identifier(&mut self) -> Option<String> {
        match self.peek() {
            Some(c) if is_identifier_start(&c) => self.next(),
            _ => return None,
        };
        self.skip_while(is_identifier_char);
        Some(self.extract_string())
    }
}

///////////////////////////////////////////////////////////////////////////////
