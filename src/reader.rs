// The reader: a single-pass tokenising parser from source text to a
// `Block`, scanned left to right with no lookahead beyond one
// character. Nesting (`[` `]`) is tracked with an explicit stack of
// in-progress child lists rather than recursion, since bracket depth
// is unbounded and this keeps the scan iterative.

use lazy_static::lazy_static;
use regex::Regex;

use crate::block::{catenate, Block};
use crate::error::{ReadError, ReadErrorKind};

lazy_static! {
    static ref CONSTANT_RE: Regex = Regex::new(r"^[A-Z][A-Za-z0-9_-]*$").unwrap();
    static ref VARIABLE_RE: Regex = Regex::new(r"^[a-z][A-Za-z0-9_-]*$").unwrap();
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == '[' || c == ']'
}

/// Parse `source` into a `Block`. See the module docs for the grammar.
pub fn read(source: &str) -> Result<Block, ReadError> {
    let chars: Vec<char> = source.chars().collect();
    let mut index = 0usize;
    let mut build: Vec<Block> = Vec::new();
    let mut stack: Vec<Vec<Block>> = Vec::new();

    while index < chars.len() {
        let c = chars[index];
        if c.is_whitespace() {
            while index < chars.len() && chars[index].is_whitespace() {
                index += 1;
            }
        } else if c == '[' {
            stack.push(build);
            build = Vec::new();
            index += 1;
        } else if c == ']' {
            if stack.is_empty() {
                return Err(ReadError::new(ReadErrorKind::UnbalancedBrackets, "]"));
            }
            let body = catenate(build);
            build = stack.pop().unwrap();
            build.push(Block::quote(body));
            index += 1;
        } else if c == '"' {
            index += 1;
            let start = index;
            while index < chars.len() && chars[index] != '"' {
                index += 1;
            }
            if index >= chars.len() {
                return Err(ReadError::new(
                    ReadErrorKind::UnbalancedQuotes,
                    chars[start..].iter().collect::<String>(),
                ));
            }
            let value: String = chars[start..index].iter().collect();
            build.push(Block::string(value));
            index += 1;
        } else if c == '{' {
            index += 1;
            let start = index;
            while index < chars.len() && chars[index] != '}' {
                index += 1;
            }
            if index >= chars.len() {
                return Err(ReadError::new(
                    ReadErrorKind::UnbalancedBraces,
                    chars[start..].iter().collect::<String>(),
                ));
            }
            let value: String = chars[start..index].iter().collect();
            build.push(Block::prompt(value));
            index += 1;
        } else {
            let start = index;
            index += 1;
            while index < chars.len() && !is_separator(chars[index]) {
                index += 1;
            }
            let token: String = chars[start..index].iter().collect();
            if c.is_ascii_uppercase() {
                if !CONSTANT_RE.is_match(&token) {
                    return Err(ReadError::new(ReadErrorKind::UnknownSymbol, token));
                }
                build.push(Block::constant(token));
            } else {
                if !VARIABLE_RE.is_match(&token) {
                    return Err(ReadError::new(ReadErrorKind::UnknownSymbol, token));
                }
                build.push(Block::variable(token));
            }
        }
    }

    if !stack.is_empty() {
        return Err(ReadError::new(
            ReadErrorKind::UnbalancedBrackets,
            source.to_string(),
        ));
    }

    Ok(catenate(build))
}
