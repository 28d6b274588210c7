//! Parser implementation and token plumbing.
//!
//! This module contains the main Parser struct: the streaming lexer, a
//! single token of lookahead, and the operator precedence table. The
//! grammar itself lives in `expr` (expressions, precedence climbing) and
//! `stmt` (prototypes, definitions, externs).

use std::io::Read;

use crate::{
    errors::errors::Error,
    lexer::{lexer::Lexer, tokens::Token},
};

use super::lookups::{create_operator_lookups, precedence_of, PrecedenceLookup};

/// The main parser structure that maintains parsing state.
///
/// Tokens are pulled from the lexer one at a time; exactly one is held as
/// lookahead. The operator table is owned here rather than being process
/// state, so independent parsers never interfere.
pub struct Parser<R: Read> {
    /// Token source
    lexer: Lexer<R>,
    /// Current lookahead token, pulled lazily on first use
    cur_tok: Option<Token>,
    /// Infix operator binding strengths, extensible at runtime
    precedences: PrecedenceLookup,
}

impl<R: Read> Parser<R> {
    /// Creates a parser over a character source with the base operator set
    /// registered.
    pub fn new(input: R) -> Parser<R> {
        Parser {
            lexer: Lexer::new(input),
            cur_tok: None,
            precedences: create_operator_lookups(),
        }
    }

    /// Returns the current token without consuming it, pulling the first
    /// one on demand.
    pub fn current_token(&mut self) -> &Token {
        self.cur_tok.get_or_insert_with(|| self.lexer.next_token())
    }

    /// Consumes the current token and returns it, pulling the next one
    /// into the lookahead. Past end of input this keeps returning Eof.
    pub fn advance(&mut self) -> Token {
        let consumed = match self.cur_tok.take() {
            Some(token) => token,
            None => self.lexer.next_token(),
        };
        self.cur_tok = Some(self.lexer.next_token());
        consumed
    }

    /// Consumes the current token if it equals `expected`, otherwise fails
    /// with `error` and consumes nothing.
    pub fn expect(&mut self, expected: Token, error: Error) -> Result<Token, Error> {
        if *self.current_token() != expected {
            return Err(error);
        }
        Ok(self.advance())
    }

    /// Registers `operator` as an infix operator with the given binding
    /// strength. A non-positive strength disables it.
    pub fn register_operator(&mut self, operator: char, precedence: i32) {
        self.precedences.insert(operator, precedence);
    }

    /// Binding strength of the current token, when it is a registered
    /// infix operator.
    pub fn current_precedence(&mut self) -> Option<i32> {
        if self.cur_tok.is_none() {
            self.cur_tok = Some(self.lexer.next_token());
        }
        match &self.cur_tok {
            Some(token) => precedence_of(&self.precedences, token),
            None => None,
        }
    }
}
