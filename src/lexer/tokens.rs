use lazy_static::lazy_static;
use std::collections::HashMap;

lazy_static! {
    pub static ref KEYWORDS: HashMap<&'static str, Token> = {
        let mut map = HashMap::new();
        map.insert("def", Token::Def);
        map.insert("extern", Token::Extern);
        map.insert("if", Token::If);
        map.insert("then", Token::Then);
        map.insert("else", Token::Else);
        map.insert("for", Token::For);
        map.insert("in", Token::In);
        map
    };
}

/// One lexical unit. Tokens are produced one at a time and never stored in
/// a sequence; the parser holds at most one as lookahead.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// End of input. Produced again on every call once the source is
    /// exhausted.
    Eof,

    // Reserved
    Def,
    Extern,
    If,
    Then,
    Else,
    For,
    In,

    /// An alphanumeric word that is not reserved.
    Identifier(String),
    /// A numeric literal, already parsed.
    Number(f64),
    /// Any other character: operators, punctuation, separators.
    Char(char),
}

/// Classifies an alphanumeric word as a keyword or an identifier.
pub fn lookup_word(word: &str) -> Token {
    match KEYWORDS.get(word) {
        Some(token) => token.clone(),
        None => Token::Identifier(word.to_string()),
    }
}
