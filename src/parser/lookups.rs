use std::collections::HashMap;

use crate::lexer::tokens::Token;

// Lookup table inside the parser struct, so it's easier to extend at runtime
pub type PrecedenceLookup = HashMap<char, i32>;

/// Builds the table of infix binding strengths the language ships with.
pub fn create_operator_lookups() -> PrecedenceLookup {
    let mut precedences = HashMap::new();

    // 1 is the lowest strength.
    precedences.insert('<', 10);
    precedences.insert('+', 20);
    precedences.insert('-', 30);
    precedences.insert('*', 40); // highest

    precedences
}

/// Binding strength of `token` when it names a registered infix operator.
/// Absent entries and non-positive strengths both mean "not an operator".
pub fn precedence_of(precedences: &PrecedenceLookup, token: &Token) -> Option<i32> {
    match token {
        Token::Char(op) => match precedences.get(op) {
            Some(&precedence) if precedence > 0 => Some(precedence),
            _ => None,
        },
        _ => None,
    }
}
