mod scanner;
mod helpers;

pub use scanner::Scanner;
pub use helpers::{Quoted, SPECIAL_NUMBERS};

#[cfg(test)]
mod scanner_test;
