use std::io::Read;

use crate::{
    ast::ast::{Function, Prototype},
    errors::errors::Error,
    lexer::tokens::Token,
    parser::expr::parse_expr,
};

use super::parser::Parser;

/// prototype := identifier '(' identifier* ')'
///
/// Parameters are space-separated. Duplicate names are not rejected here.
pub fn parse_prototype<R: Read>(parser: &mut Parser<R>) -> Result<Prototype, Error> {
    let name = match parser.current_token().clone() {
        Token::Identifier(name) => name,
        _ => return Err(Error::ExpectedPrototypeName),
    };
    parser.advance();

    parser.expect(Token::Char('('), Error::ExpectedPrototypeOpenParen)?;

    let mut params = vec![];
    while let Token::Identifier(param) = parser.current_token().clone() {
        params.push(param);
        parser.advance();
    }

    parser.expect(Token::Char(')'), Error::ExpectedPrototypeCloseParen)?;

    Ok(Prototype { name, params })
}

/// definition := 'def' prototype expr
pub fn parse_definition<R: Read>(parser: &mut Parser<R>) -> Result<Function, Error> {
    parser.advance(); // eat 'def'

    let proto = parse_prototype(parser)?;
    let body = parse_expr(parser)?;

    Ok(Function { proto, body })
}

/// extern := 'extern' prototype
pub fn parse_extern<R: Read>(parser: &mut Parser<R>) -> Result<Prototype, Error> {
    parser.advance(); // eat 'extern'
    parse_prototype(parser)
}

/// topLevel := expr, wrapped as an anonymous zero-parameter definition so
/// the rest of the pipeline only ever sees functions.
pub fn parse_top_level_expr<R: Read>(parser: &mut Parser<R>) -> Result<Function, Error> {
    let body = parse_expr(parser)?;
    Ok(Function::anonymous(body))
}
