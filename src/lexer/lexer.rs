use std::io::{Bytes, Read};

use crate::lexer::tokens::{lookup_word, Token};

/// Streaming tokenizer over any byte source.
///
/// Reads exactly one character ahead of the token it produces. There is no
/// failure mode: malformed numeric text degrades to a best-effort parse and
/// a read error is treated as end of input.
pub struct Lexer<R: Read> {
    input: Bytes<R>,
    /// The single character of lookahead. `None` once the input is
    /// exhausted; starts as a space so the first call skips straight into
    /// the source.
    last_char: Option<char>,
}

impl<R: Read> Lexer<R> {
    pub fn new(input: R) -> Lexer<R> {
        Lexer {
            input: input.bytes(),
            last_char: Some(' '),
        }
    }

    fn read_char(&mut self) -> Option<char> {
        match self.input.next() {
            Some(Ok(byte)) => Some(byte as char),
            _ => None,
        }
    }

    /// Produces the next token, consuming exactly the characters it needs.
    pub fn next_token(&mut self) -> Token {
        while matches!(self.last_char, Some(c) if c.is_ascii_whitespace()) {
            self.last_char = self.read_char();
        }

        let c = match self.last_char {
            Some(c) => c,
            None => return Token::Eof,
        };

        if c.is_ascii_alphabetic() {
            return self.read_word(c);
        }
        if c.is_ascii_digit() || c == '.' {
            return self.read_number(c);
        }
        if c == '#' {
            // Comment until end of line, then pick up the next real token.
            loop {
                self.last_char = self.read_char();
                match self.last_char {
                    None => return Token::Eof,
                    Some('\n') | Some('\r') => break,
                    Some(_) => {}
                }
            }
            return self.next_token();
        }

        self.last_char = self.read_char();
        Token::Char(c)
    }

    /// Maximal alphanumeric run. Underscores are not word characters, which
    /// keeps the reserved anonymous-function name out of the grammar.
    fn read_word(&mut self, first: char) -> Token {
        let mut word = String::from(first);
        loop {
            self.last_char = self.read_char();
            match self.last_char {
                Some(c) if c.is_ascii_alphanumeric() => word.push(c),
                _ => break,
            }
        }
        lookup_word(&word)
    }

    /// Maximal run of digits and dots. Accepted permissively: text like
    /// `1.2.3` is not rejected, it parses to whatever the standard float
    /// parser makes of it, or 0.
    fn read_number(&mut self, first: char) -> Token {
        let mut text = String::from(first);
        loop {
            self.last_char = self.read_char();
            match self.last_char {
                Some(c) if c.is_ascii_digit() || c == '.' => text.push(c),
                _ => break,
            }
        }
        Token::Number(text.parse().unwrap_or(0.0))
    }
}
