//! PDF tokenizer.
//!
//! [`next_token`] is a pure function: it takes a span and returns the first
//! token in it together with the span that remains after the token. Feeding
//! the remainder back in walks every token of the input.
//!
//! Token values are left raw. Names lose their leading `/`, strings lose
//! their outer parentheses and hex strings lose their angle brackets, but
//! escapes and hex digits are not decoded here.

use crate::span::Span;
use std::fmt;

/// Token kinds recognised by the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Input exhausted.
    EndOfStream,
    /// Lead byte sequence that cannot start any token.
    Bad,
    Keyword,
    Name,
    String,
    HexString,
    Number,
    ArrayBegin,
    ArrayEnd,
    DictBegin,
    DictEnd,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenKind::EndOfStream => "end of stream",
            TokenKind::Bad => "bad token",
            TokenKind::Keyword => "keyword",
            TokenKind::Name => "name",
            TokenKind::String => "string",
            TokenKind::HexString => "hexstring",
            TokenKind::Number => "number",
            TokenKind::ArrayBegin => "array begin",
            TokenKind::ArrayEnd => "array end",
            TokenKind::DictBegin => "dict begin",
            TokenKind::DictEnd => "dict end",
        };
        f.write_str(s)
    }
}

/// A token: its kind and the bytes it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub value: Span<'a>,
}

impl<'a> Token<'a> {
    pub const fn new(kind: TokenKind, value: Span<'a>) -> Self {
        Self { kind, value }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

/// Check if byte is whitespace
pub fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n' | b'\x00' | b'\x0c')
}

/// Check if byte is delimiter
pub fn is_delimiter(b: u8) -> bool {
    matches!(
        b,
        b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%'
    )
}

fn is_break(b: u8) -> bool {
    is_whitespace(b) || is_delimiter(b)
}

fn is_eol(b: u8) -> bool {
    b == b'\r' || b == b'\n'
}

fn is_numeric(b: u8) -> bool {
    b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.')
}

/// Skip whitespace and comments.
fn skip_whitespace(mut input: Span<'_>) -> Span<'_> {
    loop {
        input = input.skip_while(is_whitespace);
        if input.get(0) != Some(b'%') {
            return input;
        }
        input = input.skip_until(is_eol);
    }
}

/// Parse a name (/Name). The value excludes the slash.
fn parse_name(input: Span<'_>) -> (Token<'_>, Span<'_>) {
    let body = input.rest();
    let value = body.take_until(is_break);
    (Token::new(TokenKind::Name, value), body.skip(value.len()))
}

/// Parse a number. Grammar checks are left to the parser.
fn parse_number(input: Span<'_>) -> (Token<'_>, Span<'_>) {
    let value = input.take_while(is_numeric);
    (Token::new(TokenKind::Number, value), input.skip(value.len()))
}

/// Parse a literal string (...), honouring nesting and backslash escapes.
///
/// An unterminated string runs to the end of input.
fn parse_string(input: Span<'_>) -> (Token<'_>, Span<'_>) {
    let body = input.rest();
    let data = body.as_bytes();
    let mut depth = 1usize;
    let mut pos = 0;

    while pos < data.len() {
        match data[pos] {
            b'\\' => {
                pos += 2;
                continue;
            }
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    let value = body.left(pos);
                    return (Token::new(TokenKind::String, value), body.skip(pos + 1));
                }
            }
            _ => {}
        }
        pos += 1;
    }

    let value = body.left(data.len());
    (Token::new(TokenKind::String, value), body.skip(data.len()))
}

/// Parse a `<` token: either a dict opener or a hex string <...>.
fn parse_angle_open(input: Span<'_>) -> (Token<'_>, Span<'_>) {
    if input.get(1) == Some(b'<') {
        return (Token::new(TokenKind::DictBegin, input.left(2)), input.skip(2));
    }
    let body = input.rest();
    let value = body.take_until(|b| b == b'>');
    // Skips the closing '>' when present; clamped otherwise.
    (Token::new(TokenKind::HexString, value), body.skip(value.len() + 1))
}

/// Parse a `>` token: only `>>` is valid.
fn parse_angle_close(input: Span<'_>) -> (Token<'_>, Span<'_>) {
    if input.get(1) == Some(b'>') {
        (Token::new(TokenKind::DictEnd, input.left(2)), input.skip(2))
    } else {
        (Token::new(TokenKind::Bad, input.left(1)), input.skip(1))
    }
}

/// Parse a keyword
fn parse_keyword(input: Span<'_>) -> (Token<'_>, Span<'_>) {
    let value = input.take_until(is_break);
    if value.is_empty() {
        (Token::new(TokenKind::Bad, input.left(1)), input.skip(1))
    } else {
        (Token::new(TokenKind::Keyword, value), input.skip(value.len()))
    }
}

/// Return the first token in `input` and the span remaining after it.
pub fn next_token(input: Span<'_>) -> (Token<'_>, Span<'_>) {
    let input = skip_whitespace(input);

    let Some(b) = input.get(0) else {
        return (Token::new(TokenKind::EndOfStream, input), input);
    };

    match b {
        b'/' => parse_name(input),
        b'(' => parse_string(input),
        b'<' => parse_angle_open(input),
        b'>' => parse_angle_close(input),
        b'[' => (Token::new(TokenKind::ArrayBegin, input.left(1)), input.skip(1)),
        b']' => (Token::new(TokenKind::ArrayEnd, input.left(1)), input.skip(1)),
        c if is_numeric(c) => parse_number(input),
        _ => parse_keyword(input),
    }
}

/// Return the first token in `input` without consuming it.
pub fn peek_token(input: Span<'_>) -> Token<'_> {
    next_token(input).0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(data: &[u8]) -> Vec<TokenKind> {
        let mut input = Span::new(data);
        let mut out = Vec::new();
        loop {
            let (tok, rest) = next_token(input);
            out.push(tok.kind);
            if tok.is(TokenKind::EndOfStream) {
                return out;
            }
            input = rest;
        }
    }

    #[test]
    fn test_comment_is_skipped() {
        let (tok, _) = next_token(Span::new(b"% a comment\r\n  keyword"));
        assert_eq!(tok.kind, TokenKind::Keyword);
        assert_eq!(tok.value, "keyword");
    }

    #[test]
    fn test_comment_at_end_of_input() {
        assert_eq!(kinds(b"  % trailing"), vec![TokenKind::EndOfStream]);
    }

    #[test]
    fn test_lone_closers_are_bad() {
        assert_eq!(next_token(Span::new(b"> x")).0.kind, TokenKind::Bad);
        assert_eq!(next_token(Span::new(b")")).0.kind, TokenKind::Bad);
        assert_eq!(next_token(Span::new(b"{")).0.kind, TokenKind::Bad);
    }

    #[test]
    fn test_token_offsets() {
        let (tok, rest) = next_token(Span::new(b"  /Type /Page"));
        assert_eq!(tok.value.offset(), 3);
        assert_eq!(rest.offset(), 7);
    }
}
