//! Lexical analysis module for the front end.
//!
//! This module contains the lexer (tokenizer) that converts a character
//! stream into tokens for parsing. It handles:
//!
//! - Streaming tokenization with a single character of lookahead
//! - Recognition of keywords, identifiers, and numeric literals
//! - Raw character tokens for operators and punctuation
//! - Comments and whitespace handling

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
