//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords and identifiers
//! - Numeric literals, including permissive malformed ones
//! - Raw character tokens for operators and punctuation
//! - Comments
//! - End-of-input behavior

use super::{lexer::Lexer, tokens::Token};

/// Drains the streaming lexer, including the final Eof.
fn tokenize(source: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(source.as_bytes());
    let mut tokens = vec![];
    loop {
        let token = lexer.next_token();
        let done = token == Token::Eof;
        tokens.push(token);
        if done {
            return tokens;
        }
    }
}

#[test]
fn test_tokenize_keywords() {
    let tokens = tokenize("def extern if then else for in");

    assert_eq!(tokens[0], Token::Def);
    assert_eq!(tokens[1], Token::Extern);
    assert_eq!(tokens[2], Token::If);
    assert_eq!(tokens[3], Token::Then);
    assert_eq!(tokens[4], Token::Else);
    assert_eq!(tokens[5], Token::For);
    assert_eq!(tokens[6], Token::In);
    assert_eq!(tokens[7], Token::Eof);
}

#[test]
fn test_tokenize_identifiers() {
    let tokens = tokenize("foo bar2 CamelCase");

    assert_eq!(tokens[0], Token::Identifier("foo".to_string()));
    assert_eq!(tokens[1], Token::Identifier("bar2".to_string()));
    assert_eq!(tokens[2], Token::Identifier("CamelCase".to_string()));
    assert_eq!(tokens[3], Token::Eof);
}

#[test]
fn test_underscore_is_not_a_word_character() {
    // '_' comes out as a raw character, so a word can never contain one and
    // the reserved anonymous-function name stays out of user reach.
    let tokens = tokenize("an_id");

    assert_eq!(tokens[0], Token::Identifier("an".to_string()));
    assert_eq!(tokens[1], Token::Char('_'));
    assert_eq!(tokens[2], Token::Identifier("id".to_string()));
}

#[test]
fn test_tokenize_numbers() {
    let tokens = tokenize("42 3.14 0 .5");

    assert_eq!(tokens[0], Token::Number(42.0));
    assert_eq!(tokens[1], Token::Number(3.14));
    assert_eq!(tokens[2], Token::Number(0.0));
    assert_eq!(tokens[3], Token::Number(0.5));
    assert_eq!(tokens[4], Token::Eof);
}

#[test]
fn test_malformed_number_degrades_to_zero() {
    let tokens = tokenize("1.2.3");

    assert_eq!(tokens[0], Token::Number(0.0));
    assert_eq!(tokens[1], Token::Eof);
}

#[test]
fn test_tokenize_operators_and_punctuation() {
    let tokens = tokenize("a+b*2 < (c-1), ;");

    assert_eq!(tokens[0], Token::Identifier("a".to_string()));
    assert_eq!(tokens[1], Token::Char('+'));
    assert_eq!(tokens[2], Token::Identifier("b".to_string()));
    assert_eq!(tokens[3], Token::Char('*'));
    assert_eq!(tokens[4], Token::Number(2.0));
    assert_eq!(tokens[5], Token::Char('<'));
    assert_eq!(tokens[6], Token::Char('('));
    assert_eq!(tokens[7], Token::Identifier("c".to_string()));
    assert_eq!(tokens[8], Token::Char('-'));
    assert_eq!(tokens[9], Token::Number(1.0));
    assert_eq!(tokens[10], Token::Char(')'));
    assert_eq!(tokens[11], Token::Char(','));
    assert_eq!(tokens[12], Token::Char(';'));
    assert_eq!(tokens[13], Token::Eof);
}

#[test]
fn test_tokenize_comments() {
    let tokens = tokenize("# a comment line\ndef # trailing\nfoo");

    assert_eq!(tokens[0], Token::Def);
    assert_eq!(tokens[1], Token::Identifier("foo".to_string()));
    assert_eq!(tokens[2], Token::Eof);
}

#[test]
fn test_comment_running_into_end_of_input() {
    let tokens = tokenize("42 # no newline after this");

    assert_eq!(tokens[0], Token::Number(42.0));
    assert_eq!(tokens[1], Token::Eof);
}

#[test]
fn test_eof_is_sticky() {
    let mut lexer = Lexer::new("x".as_bytes());

    assert_eq!(lexer.next_token(), Token::Identifier("x".to_string()));
    assert_eq!(lexer.next_token(), Token::Eof);
    assert_eq!(lexer.next_token(), Token::Eof);
}

#[test]
fn test_empty_input() {
    assert_eq!(tokenize(""), vec![Token::Eof]);
    assert_eq!(tokenize("   \n\t  "), vec![Token::Eof]);
}
